use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{Config, ToolConfig};
use crate::error::HarnessError;

mod bench;
mod outputs;
mod progress;
mod report;
mod stats;
mod types;

pub use bench::bench;
pub use outputs::outputs;
pub use report::report;
pub use stats::stats;
pub use types::types;

#[derive(Parser)]
#[command(
    name = "genbench",
    about = "Benchmark two OpenAPI code generators and compare what they produce",
    version,
    author
)]
pub struct Cli {
    /// Read configuration from this file instead of ./.genbenchrc.json
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log scan and process details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Clean outputs, run both generators and compare timing and size
    Bench {
        /// Also write the Markdown report, including generation times
        #[arg(long)]
        report: bool,
    },

    /// Compare file counts, sizes and line counts of both output directories
    Stats {
        /// Output as JSON
        #[arg(short = 'j', long = "json")]
        json: bool,
    },

    /// Compare only the main types file of each generator
    Types,

    /// List generated files and preview the key ones
    Outputs {
        /// Number of lines shown per preview
        #[arg(short = 'n', long, default_value_t = 50)]
        lines: usize,
    },

    /// Write the Markdown comparison report
    Report {
        /// Report path (default: report_path from config)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

/// Rendered console text of a command, plus the error to exit with once the
/// text has been printed.
pub struct Outcome {
    pub text: String,
    pub error: Option<HarnessError>,
}

impl Outcome {
    fn new(text: String) -> Self {
        Self { text, error: None }
    }

    /// Print the text, then fail with the recorded error, if any.
    pub fn finish(self) -> Result<()> {
        print!("{}", self.text);
        match self.error {
            Some(err) => Err(err.into()),
            None => Ok(()),
        }
    }
}

/// Load the configuration named on the command line, or the default one.
pub fn load_config(path: Option<&PathBuf>) -> Result<Config, HarnessError> {
    match path {
        Some(path) => Config::load_from_file(path),
        None => Config::load(),
    }
}

/// Error for an output directory that both a comparison needs.
///
/// With both sides missing the hint is the command generating everything.
fn missing_outputs(
    config: &Config,
    first_missing: bool,
    second_missing: bool,
) -> Option<HarnessError> {
    match (first_missing, second_missing) {
        (true, true) => Some(HarnessError::missing_dir(
            config.first.output_dir.clone(),
            &config.generate_all_hint,
        )),
        (true, false) => Some(missing_tool_dir(&config.first)),
        (false, true) => Some(missing_tool_dir(&config.second)),
        (false, false) => None,
    }
}

fn missing_tool_dir(tool: &ToolConfig) -> HarnessError {
    HarnessError::missing_dir(tool.output_dir.clone(), &tool.generate_hint)
}
