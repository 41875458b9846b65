//! Rendering of comparison results: console sections and the Markdown report.

pub mod console;
mod markdown;

pub use markdown::{ComparisonReport, ReportInput};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

use crate::config::SourceDefaults;
use crate::diff::{diff, ComparisonDelta, Metric};
use crate::signals::StructuralSignal;
use crate::stats::DirectoryStats;

/// Description of the OpenAPI input both generators consumed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceMetadata {
    pub input_file: String,
    pub api_title: String,
    pub openapi_version: String,
}

impl SourceMetadata {
    /// Read `info.title`, `info.version` and `openapi`/`swagger` from the spec
    /// file, keeping the configured defaults for anything missing.
    pub fn detect(spec_path: &Path, defaults: &SourceDefaults) -> Self {
        let input_file = spec_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| spec_path.display().to_string());

        let mut meta = Self {
            input_file,
            api_title: defaults.api_title.clone(),
            openapi_version: defaults.openapi_version.clone(),
        };

        let doc: serde_json::Value = match std::fs::read_to_string(spec_path)
            .ok()
            .and_then(|text| serde_json::from_str(&text).ok())
        {
            Some(doc) => doc,
            None => {
                debug!(spec = %spec_path.display(), "spec unreadable, using configured metadata");
                return meta;
            }
        };

        let title = doc.pointer("/info/title").and_then(|v| v.as_str());
        let version = doc.pointer("/info/version").and_then(|v| v.as_str());
        if let Some(title) = title {
            meta.api_title = match version {
                Some(v) => format!("{} {}", title, v),
                None => title.to_string(),
            };
        }
        if let Some(spec_version) = doc
            .get("openapi")
            .or_else(|| doc.get("swagger"))
            .and_then(|v| v.as_str())
        {
            meta.openapi_version = spec_version.to_string();
        }
        meta
    }
}

/// One generator's side of a comparison.
#[derive(Debug, Clone)]
pub struct ToolSummary {
    pub name: String,
    pub output_dir: String,
    pub stats: DirectoryStats,
    /// Signals of the tool's types file, when it was readable
    pub signals: Option<StructuralSignal>,
}

/// File, size and line deltas of `second` against `first`.
pub fn stats_deltas(first: &ToolSummary, second: &ToolSummary) -> Vec<ComparisonDelta> {
    vec![
        diff(
            Metric::Files,
            &first.name,
            first.stats.total_files as f64,
            &second.name,
            second.stats.total_files as f64,
        ),
        diff(
            Metric::Size,
            &first.name,
            first.stats.total_size_bytes as f64,
            &second.name,
            second.stats.total_size_bytes as f64,
        ),
        diff(
            Metric::Lines,
            &first.name,
            first.stats.total_lines as f64,
            &second.name,
            second.stats.total_lines as f64,
        ),
    ]
}

/// `.ts: 3, .json: 1`, with files lacking an extension shown as `(none)`.
pub fn file_types_summary(counts: &BTreeMap<String, usize>) -> String {
    if counts.is_empty() {
        return "(none)".to_string();
    }
    counts
        .iter()
        .map(|(ext, n)| {
            let ext = if ext.is_empty() {
                "(none)"
            } else {
                ext.as_str()
            };
            format!("{}: {}", ext, n)
        })
        .collect::<Vec<_>>()
        .join(", ")
}
