use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::HarnessError;

pub const CONFIG_FILE: &str = ".genbenchrc.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// OpenAPI document both generators read
    #[serde(default = "default_input_spec")]
    pub input_spec: PathBuf,

    /// Markdown report written by `genbench report`
    #[serde(default = "default_report_path")]
    pub report_path: PathBuf,

    /// Upper bound on one generator run (unbounded when absent)
    #[serde(default)]
    pub max_wait_ms: Option<u64>,

    /// Command suggested when both outputs are missing
    #[serde(default = "default_generate_all_hint")]
    pub generate_all_hint: String,

    #[serde(default = "default_first")]
    pub first: ToolConfig,

    #[serde(default = "default_second")]
    pub second: ToolConfig,

    /// Report metadata used when the input spec cannot be read
    #[serde(default)]
    pub source: SourceDefaults,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolConfig {
    /// Display name in tables and reports
    pub name: String,
    pub output_dir: PathBuf,
    /// Types file inside `output_dir` compared by `genbench types`
    pub types_file: String,
    /// Files inside `output_dir` previewed by `genbench outputs`
    #[serde(default)]
    pub preview_files: Vec<String>,
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
    /// Command that produces this tool's output
    pub generate_hint: String,
}

impl ToolConfig {
    pub fn types_path(&self) -> PathBuf {
        self.output_dir.join(&self.types_file)
    }

    /// The full command line, for display.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceDefaults {
    #[serde(default = "default_api_title")]
    pub api_title: String,
    #[serde(default = "default_openapi_version")]
    pub openapi_version: String,
}

impl Default for SourceDefaults {
    fn default() -> Self {
        Self {
            api_title: default_api_title(),
            openapi_version: default_openapi_version(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_spec: default_input_spec(),
            report_path: default_report_path(),
            max_wait_ms: None,
            generate_all_hint: default_generate_all_hint(),
            first: default_first(),
            second: default_second(),
            source: SourceDefaults::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, HarnessError> {
        Self::load_from_dir(Path::new("."))
    }

    pub fn load_from_dir(dir: &Path) -> Result<Self, HarnessError> {
        Self::load_from_file(&dir.join(CONFIG_FILE))
    }

    /// Read `path`, falling back to defaults when it does not exist.
    pub fn load_from_file(path: &Path) -> Result<Self, HarnessError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| HarnessError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| HarnessError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn max_wait(&self) -> Option<Duration> {
        self.max_wait_ms.map(Duration::from_millis)
    }

    /// Resolve every relative path against `base`.
    pub fn rooted_at(mut self, base: &Path) -> Self {
        self.input_spec = base.join(&self.input_spec);
        self.report_path = base.join(&self.report_path);
        self.first.output_dir = base.join(&self.first.output_dir);
        self.second.output_dir = base.join(&self.second.output_dir);
        self
    }
}

fn default_input_spec() -> PathBuf {
    PathBuf::from("swagger.json")
}

fn default_report_path() -> PathBuf {
    PathBuf::from("COMPARISON_REPORT.md")
}

fn default_generate_all_hint() -> String {
    "npm run gen:all".to_string()
}

fn default_api_title() -> String {
    "MVS Api 5.0".to_string()
}

fn default_openapi_version() -> String {
    "3.0.4".to_string()
}

fn default_first() -> ToolConfig {
    ToolConfig {
        name: "openapi-typescript".to_string(),
        output_dir: PathBuf::from("output-openapi-typescript"),
        types_file: "types.ts".to_string(),
        preview_files: vec!["types.ts".to_string()],
        program: "npx".to_string(),
        args: [
            "openapi-typescript",
            "swagger.json",
            "--output",
            "output-openapi-typescript/types.ts",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect(),
        generate_hint: "npm run gen:openapi-typescript".to_string(),
    }
}

fn default_second() -> ToolConfig {
    ToolConfig {
        name: "@hey-api/openapi-ts".to_string(),
        output_dir: PathBuf::from("output-hey-api"),
        types_file: "types.gen.ts".to_string(),
        preview_files: ["types.gen.ts", "index.ts", "services.gen.ts", "sdk.gen.ts"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        program: "npx".to_string(),
        args: [
            "@hey-api/openapi-ts",
            "-i",
            "swagger.json",
            "-o",
            "output-hey-api",
            "--plugins",
            "@hey-api/typescript",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect(),
        generate_hint: "npm run gen:hey-api".to_string(),
    }
}
