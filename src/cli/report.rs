use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::bench::BenchmarkResult;
use crate::config::{Config, ToolConfig};
use crate::metrics::read_metrics;
use crate::report::{ComparisonReport, ReportInput, SourceMetadata, ToolSummary};
use crate::signals::extract_signals;
use crate::stats::analyze_directory;
use crate::style::{Palette, Style};

use super::missing_outputs;

/// Scan one generator's output and fingerprint its types file.
pub(crate) fn tool_summary(tool: &ToolConfig) -> ToolSummary {
    let types_path = tool.types_path();
    let signals = match read_metrics(&types_path) {
        Ok(metrics) => Some(extract_signals(&metrics.content)),
        Err(e) => {
            debug!(tool = %tool.name, error = %e, "no types file to fingerprint");
            None
        }
    };

    ToolSummary {
        name: tool.name.clone(),
        output_dir: tool.output_dir.display().to_string(),
        stats: analyze_directory(&tool.output_dir),
        signals,
    }
}

/// Build the comparison from both output directories, with optional timings.
pub(crate) fn build_report(
    config: &Config,
    timings: Option<(BenchmarkResult, BenchmarkResult)>,
) -> ComparisonReport {
    let mut first = tool_summary(&config.first);
    let mut second = tool_summary(&config.second);
    // Only the directory name belongs in the report, not the resolved path.
    first.output_dir = dir_name(&config.first.output_dir);
    second.output_dir = dir_name(&config.second.output_dir);

    ComparisonReport::new(ReportInput {
        source: SourceMetadata::detect(&config.input_spec, &config.source),
        first,
        second,
        timings,
    })
}

/// Write the Markdown report and return where it went.
///
/// Both output directories must exist. Otherwise nothing is written and the
/// error names the command that generates the missing output.
pub fn report(config: &Config, palette: &Palette, output: Option<&Path>) -> Result<PathBuf> {
    let first_missing = !config.first.output_dir.is_dir();
    let second_missing = !config.second.output_dir.is_dir();
    if let Some(err) = missing_outputs(config, first_missing, second_missing) {
        return Err(err.into());
    }

    let path = output.map_or_else(|| config.report_path.clone(), Path::to_path_buf);
    build_report(config, None).save(&path)?;

    println!("{}", written_line(palette, &path));
    Ok(path)
}

/// `✓ Report written to <path>`
pub(crate) fn written_line(p: &Palette, path: &Path) -> String {
    format!(
        "{} Report written to {}",
        p.paint(Style::Success, "✓"),
        p.paint(Style::Accent, &path.display().to_string())
    )
}

fn dir_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
