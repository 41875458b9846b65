//! Timed invocation of the external generators.
//!
//! Generators run strictly one after another. Nothing here interprets their
//! output: a run is a success or a failure plus elapsed wall-clock time.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::config::ToolConfig;
use crate::error::HarnessError;

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Outcome of one generator run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkResult {
    pub tool_name: String,
    pub success: bool,
    /// Wall-clock time, measured for failed runs too
    pub duration_ms: f64,
    pub error_message: Option<String>,
}

impl BenchmarkResult {
    pub fn succeeded(tool_name: &str, duration: Duration) -> Self {
        Self {
            tool_name: tool_name.to_string(),
            success: true,
            duration_ms: duration.as_secs_f64() * 1000.0,
            error_message: None,
        }
    }

    pub fn failed(tool_name: &str, duration: Duration, error: HarnessError) -> Self {
        Self {
            tool_name: tool_name.to_string(),
            success: false,
            duration_ms: duration.as_secs_f64() * 1000.0,
            error_message: Some(error.to_string()),
        }
    }
}

/// An external generator invocation.
#[derive(Debug, Clone)]
pub struct Generator {
    pub name: String,
    pub program: String,
    pub args: Vec<String>,
    /// Rendered once for logs and error messages
    pub command_line: String,
}

impl From<&ToolConfig> for Generator {
    fn from(tool: &ToolConfig) -> Self {
        Self {
            name: tool.name.clone(),
            program: tool.program.clone(),
            args: tool.args.clone(),
            command_line: tool.command_line(),
        }
    }
}

/// Run `generator` to completion and time it.
///
/// With `max_wait` set, a run still going after that long is killed and
/// reported as failed. Without it the call blocks until the process exits.
pub fn run_generator(generator: &Generator, max_wait: Option<Duration>) -> BenchmarkResult {
    debug!(tool = %generator.name, command = %generator.command_line, "starting generator");
    let start = Instant::now();

    let outcome = execute(generator, max_wait, start);
    let elapsed = start.elapsed();

    match outcome {
        Ok(()) => BenchmarkResult::succeeded(&generator.name, elapsed),
        Err(message) => {
            warn!(tool = %generator.name, %message, "generator failed");
            BenchmarkResult::failed(
                &generator.name,
                elapsed,
                HarnessError::ExternalTool {
                    tool: generator.name.clone(),
                    message,
                },
            )
        }
    }
}

fn execute(
    generator: &Generator,
    max_wait: Option<Duration>,
    start: Instant,
) -> Result<(), String> {
    let mut child = Command::new(&generator.program)
        .args(&generator.args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| format!("could not start `{}`: {}", generator.command_line, e))?;

    // Drain stderr on a side thread so a chatty child never blocks on a full pipe.
    let stderr_reader = child.stderr.take().map(|mut pipe| {
        thread::spawn(move || {
            let mut buf = String::new();
            let _ = pipe.read_to_string(&mut buf);
            buf
        })
    });

    // A killed child may leave grandchildren holding the pipe, so the reader
    // is only joined once the process has exited on its own.
    let status = wait(&mut child, max_wait, start)?;
    if status.success() {
        return Ok(());
    }

    let stderr = stderr_reader
        .and_then(|handle| handle.join().ok())
        .unwrap_or_default();
    Err(format!(
        "Command failed: {} ({})\n{}",
        generator.command_line,
        status,
        stderr.trim_end()
    ))
}

fn wait(
    child: &mut Child,
    max_wait: Option<Duration>,
    start: Instant,
) -> Result<ExitStatus, String> {
    let Some(limit) = max_wait else {
        return child.wait().map_err(|e| e.to_string());
    };

    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok(status),
            Ok(None) if start.elapsed() >= limit => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(format!("timed out after {}ms", limit.as_millis()));
            }
            Ok(None) => thread::sleep(POLL_INTERVAL),
            Err(e) => return Err(e.to_string()),
        }
    }
}

/// Delete previous output directories so stale files cannot skew the stats.
pub fn clean_outputs(dirs: &[&Path]) -> std::io::Result<()> {
    for dir in dirs {
        if dir.exists() {
            debug!(dir = %dir.display(), "removing previous output");
            fs::remove_dir_all(dir)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use tempfile::TempDir;

    fn tool(name: &str, program: &str, args: &[&str]) -> ToolConfig {
        let mut tool = Config::default().second;
        tool.name = name.to_string();
        tool.program = program.to_string();
        tool.args = args.iter().map(|a| a.to_string()).collect();
        tool
    }

    fn sh(name: &str, script: &str) -> Generator {
        Generator::from(&tool(name, "sh", &["-c", script]))
    }

    #[test]
    fn result_constructors_are_exclusive() {
        let ok = BenchmarkResult::succeeded("a", Duration::from_millis(1500));
        assert!(ok.success);
        assert!(ok.error_message.is_none());
        assert!((ok.duration_ms - 1500.0).abs() < f64::EPSILON);

        let err = BenchmarkResult::failed(
            "b",
            Duration::from_millis(10),
            HarnessError::ExternalTool {
                tool: "b".to_string(),
                message: "boom".to_string(),
            },
        );
        assert!(!err.success);
        assert_eq!(err.error_message.as_deref(), Some("b failed: boom"));
    }

    #[test]
    fn generator_from_tool_config() {
        let config = Config::default();
        let generator = Generator::from(&config.second);
        assert_eq!(generator.name, "@hey-api/openapi-ts");
        assert_eq!(generator.program, "npx");
        assert!(generator.args.contains(&"--plugins".to_string()));
        assert_eq!(generator.command_line, config.second.command_line());
        assert!(generator.command_line.starts_with("npx @hey-api/openapi-ts "));
    }

    #[cfg(unix)]
    #[test]
    fn successful_run_is_timed() {
        let result = run_generator(&sh("ok", "exit 0"), None);
        assert!(result.success);
        assert!(result.duration_ms >= 0.0);
        assert!(result.error_message.is_none());
    }

    #[cfg(unix)]
    #[test]
    fn nonzero_exit_captures_stderr() {
        let generator = sh("bad", "echo 'spec not found' >&2; exit 3");
        let result = run_generator(&generator, None);
        assert!(!result.success);
        let msg = result.error_message.unwrap();
        assert!(msg.starts_with("bad failed: Command failed: sh -c"));
        assert!(msg.contains("spec not found"));
    }

    #[test]
    fn missing_program_is_failure() {
        let generator = Generator::from(&tool("ghost", "genbench-no-such-program", &[]));
        let result = run_generator(&generator, None);
        assert!(!result.success);
        let msg = result.error_message.unwrap();
        assert!(msg.contains("could not start `genbench-no-such-program`"));
    }

    #[cfg(unix)]
    #[test]
    fn bounded_wait_kills_slow_generator() {
        let limit = Some(Duration::from_millis(100));
        let result = run_generator(&sh("slow", "exec sleep 5"), limit);
        assert!(!result.success);
        let msg = result.error_message.unwrap();
        assert!(msg.contains("timed out after 100ms"));
        assert!(result.duration_ms < 5000.0);
    }

    #[cfg(unix)]
    #[test]
    fn bounded_wait_allows_fast_generator() {
        let result = run_generator(&sh("fast", "exit 0"), Some(Duration::from_secs(10)));
        assert!(result.success);
    }

    #[test]
    fn clean_outputs_removes_existing_dirs_only() {
        let tmp = TempDir::new().unwrap();
        let present = tmp.path().join("output-hey-api");
        fs::create_dir_all(present.join("client")).unwrap();
        fs::write(present.join("client/a.ts"), "x").unwrap();
        let absent = tmp.path().join("output-openapi-typescript");

        clean_outputs(&[&present, &absent]).unwrap();
        assert!(!present.exists());
        assert!(!absent.exists());
    }
}
