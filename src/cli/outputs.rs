use anyhow::Result;

use crate::config::{Config, ToolConfig};
use crate::metrics::read_metrics;
use crate::report::console::{banner, missing_warning, preview_block, section};
use crate::style::{Palette, Style};
use crate::walker::list_relative_sorted;

use super::Outcome;

/// List every generated file and preview the configured key files.
pub fn outputs(config: &Config, palette: &Palette, lines: usize) -> Result<()> {
    render(config, palette, lines).finish()
}

fn render(config: &Config, p: &Palette, lines: usize) -> Outcome {
    let (a, b) = (&config.first, &config.second);
    let title = format!("Detailed Code Comparison: {} vs {}", a.name, b.name);
    let mut out = banner(p, &title);

    for (n, tool) in [(1, a), (2, b)] {
        let title = format!("{}. {} Generated Files", n, tool.name);
        out.push_str(&section(p, &title));
        out.push('\n');
        out.push_str(&tool_listing(p, tool, lines));
    }
    out.push('\n');

    Outcome::new(out)
}

fn tool_listing(p: &Palette, tool: &ToolConfig, lines: usize) -> String {
    let files = list_relative_sorted(&tool.output_dir);
    if files.is_empty() {
        let warning = missing_warning(p, "No files generated", &tool.generate_hint);
        return format!("{}\n", warning);
    }

    let mut out = format!("{}\n", p.paint(Style::Label, "Files generated:"));
    for file in &files {
        out.push_str(&format!("  - {}\n", file));
    }

    for name in &tool.preview_files {
        let path = tool.output_dir.join(name);
        if !path.is_file() {
            continue;
        }
        match read_metrics(&path) {
            Ok(metrics) => {
                let heading = format!("Preview of {} (first {} lines):", name, lines);
                out.push_str(&format!("\n{}\n\n", p.paint(Style::Strong, &heading)));
                out.push_str(&preview_block(p, &metrics.content, lines));
            }
            Err(e) => out.push_str(&format!("{}\n", p.paint(Style::Error, &e.to_string()))),
        }
    }
    out
}
