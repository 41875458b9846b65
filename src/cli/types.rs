use anyhow::Result;

use crate::config::{Config, ToolConfig};
use crate::diff::{diff, Metric};
use crate::error::HarnessError;
use crate::format::{format_count, format_kb};
use crate::metrics::{read_metrics, FileMetrics};
use crate::report::console::{
    banner, delta_block, field, missing_warning, section, signal_block, type_counts_table,
};
use crate::signals::{extract_signals, preview, sample_after};
use crate::style::{Palette, Style};

use super::Outcome;

const SAMPLE_LINES: usize = 40;
const SCHEMA_SAMPLE_BYTES: usize = 300;

/// First schema-like declaration in each style of output.
const SCHEMA_PATTERNS: [&str; 2] = [r"export interface components", r"export type \w+ = \{"];

/// Compare only the primary types file of each generator.
pub fn types(config: &Config, palette: &Palette) -> Result<()> {
    render(config, palette)?.finish()
}

fn load(tool: &ToolConfig) -> Result<Option<FileMetrics>, HarnessError> {
    let path = tool.types_path();
    if !path.is_file() {
        return Ok(None);
    }
    read_metrics(&path).map(Some)
}

fn render(config: &Config, p: &Palette) -> Result<Outcome> {
    let mut out = banner(p, "Type Definitions Comparison (Types Only)");
    out.push_str(&format!(
        "{} This comparison covers the types file of each generator only.\n",
        p.paint(Style::Warning, "Note:")
    ));

    let tools = [&config.first, &config.second];
    let mut loaded = Vec::with_capacity(2);
    let mut error = None;

    for (n, tool) in tools.iter().enumerate() {
        let title = format!("{}. {} Type Definitions", n + 1, tool.name);
        out.push_str(&section(p, &title));
        out.push('\n');

        let Some(metrics) = load(tool)? else {
            let warning = missing_warning(p, "File not found", &tool.generate_hint);
            out.push_str(&format!("{}\n", warning));
            if error.is_none() {
                error = Some(HarnessError::missing_file(tool.types_path(), &tool.generate_hint));
            }
            loaded.push(None);
            continue;
        };

        for (label, value) in [
            ("File", tool.types_file.clone()),
            ("Size", format_kb(metrics.size_bytes as f64)),
            ("Lines", format_count(metrics.line_count as i64)),
        ] {
            out.push_str(&format!("{}\n", field(p, label, &value)));
        }
        out.push_str(&signal_block(p, &extract_signals(&metrics.content)));

        let heading = format!("Sample (first {} lines):", SAMPLE_LINES);
        out.push_str(&format!("\n{}\n\n", p.paint(Style::Strong, &heading)));
        out.push_str(&format!("{}\n", preview(&metrics.content, SAMPLE_LINES)));
        loaded.push(Some(metrics));
    }

    if let [Some(a), Some(b)] = loaded.as_slice() {
        let (first, second) = (&config.first, &config.second);
        out.push_str(&section(p, "3. Type Definitions Comparison"));
        out.push('\n');
        let size = diff(
            Metric::Size,
            &first.name,
            a.size_bytes as f64,
            &second.name,
            b.size_bytes as f64,
        );
        let lines = diff(
            Metric::Lines,
            &first.name,
            a.line_count as f64,
            &second.name,
            b.line_count as f64,
        );
        out.push_str(&delta_block(p, "File Size", &size));
        out.push_str(&delta_block(p, "Line Count", &lines));
        out.push_str(&type_counts_table(
            p,
            &first.name,
            &extract_signals(&a.content),
            &second.name,
            &extract_signals(&b.content),
        ));

        out.push_str(&section(p, "4. Schema Samples"));
        out.push('\n');
        for (tool, metrics) in [(first, a), (second, b)] {
            let sample = SCHEMA_PATTERNS
                .iter()
                .find_map(|pattern| sample_after(&metrics.content, pattern, SCHEMA_SAMPLE_BYTES));
            let heading = format!("{}:", tool.name);
            out.push_str(&format!("\n{}\n", p.paint(Style::Strong, &heading)));
            match sample {
                Some(text) => out.push_str(&format!("{}\n", p.paint(Style::Accent, &text))),
                None => out.push_str("  (no schema declaration found)\n"),
            }
        }
    }
    out.push('\n');

    Ok(Outcome { text: out, error })
}
