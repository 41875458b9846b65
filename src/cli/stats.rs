use anyhow::Result;
use serde_json::json;

use crate::config::Config;
use crate::report::console::{banner, delta_block, field, missing_warning, section, stats_block};
use crate::report::stats_deltas;
use crate::stats::DirectoryStats;
use crate::style::{Palette, Style};

use super::{missing_outputs, report::tool_summary, Outcome};

/// Compare the two output directories. Fails when either directory is absent,
/// after printing whatever could be compared.
pub fn stats(config: &Config, palette: &Palette, json: bool) -> Result<()> {
    if json {
        render_json(config)?.finish()
    } else {
        render(config, palette).finish()
    }
}

fn absent(config: &Config) -> (bool, bool) {
    (
        !config.first.output_dir.is_dir(),
        !config.second.output_dir.is_dir(),
    )
}

fn render(config: &Config, p: &Palette) -> Outcome {
    let first = tool_summary(&config.first);
    let second = tool_summary(&config.second);

    let mut out = banner(p, "OpenAPI Code Generator Comparison");
    let source = config.input_spec.display().to_string();
    out.push_str(&format!("{}\n", field(p, "Source", &source)));

    for (n, tool, summary) in [(1, &config.first, &first), (2, &config.second, &second)] {
        out.push_str(&section(p, &format!("{}. {} Output", n, tool.name)));
        out.push('\n');
        out.push_str(&side(p, &summary.stats, &tool.generate_hint));
    }

    if !first.stats.is_empty() && !second.stats.is_empty() {
        out.push_str(&section(p, "3. Comparison Summary"));
        out.push('\n');
        for delta in stats_deltas(&first, &second) {
            out.push_str(&delta_block(p, delta.metric.name(), &delta));
        }
    }

    out.push_str(&section(p, "4. Output Locations"));
    out.push('\n');
    for tool in [&config.first, &config.second] {
        let dir = format!("{}/", tool.output_dir.display());
        out.push_str(&format!("{}\n", field(p, &tool.name, &p.paint(Style::Accent, &dir))));
    }
    out.push('\n');

    let (first_missing, second_missing) = absent(config);
    Outcome {
        text: out,
        error: missing_outputs(config, first_missing, second_missing),
    }
}

fn side(p: &Palette, stats: &DirectoryStats, hint: &str) -> String {
    if stats.is_empty() {
        format!("{}\n", missing_warning(p, "No files found", hint))
    } else {
        stats_block(p, stats)
    }
}

fn render_json(config: &Config) -> Result<Outcome> {
    let first = tool_summary(&config.first);
    let second = tool_summary(&config.second);
    let value = json!({
        "source": config.input_spec,
        "first": {
            "name": first.name,
            "output_dir": first.output_dir,
            "stats": first.stats,
        },
        "second": {
            "name": second.name,
            "output_dir": second.output_dir,
            "stats": second.stats,
        },
        "deltas": stats_deltas(&first, &second),
    });

    let (first_missing, second_missing) = absent(config);
    Ok(Outcome {
        text: format!("{}\n", serde_json::to_string_pretty(&value)?),
        error: missing_outputs(config, first_missing, second_missing),
    })
}
