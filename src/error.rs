use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures the harness distinguishes between.
///
/// `Read` is absorbed at the file level during scans. `ExternalTool` is
/// captured into a [`crate::bench::BenchmarkResult`]. `MissingInput` and
/// `Config` reach the CLI boundary and end the run with a non-zero exit.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("{what} not found: {}\nGenerate the outputs first with: {hint}", path.display())]
    MissingInput {
        what: String,
        path: PathBuf,
        hint: String,
    },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{tool} failed: {message}")]
    ExternalTool { tool: String, message: String },

    #[error("invalid config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl HarnessError {
    pub fn missing_dir(path: impl Into<PathBuf>, hint: &str) -> Self {
        Self::MissingInput {
            what: "Output directory".to_string(),
            path: path.into(),
            hint: hint.to_string(),
        }
    }

    pub fn missing_file(path: impl Into<PathBuf>, hint: &str) -> Self {
        Self::MissingInput {
            what: "File".to_string(),
            path: path.into(),
            hint: hint.to_string(),
        }
    }
}
