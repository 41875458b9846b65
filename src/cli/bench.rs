use anyhow::{Context, Result};

use crate::bench::{clean_outputs, run_generator, BenchmarkResult, Generator};
use crate::config::{Config, ToolConfig};
use crate::diff::{diff, Metric, Scoreboard};
use crate::format::{format_count, format_kb};
use crate::report::console::{banner, benchmark_line, delta_block, field, section, winner_analysis};
use crate::report::stats_deltas;
use crate::stats::analyze_directory;
use crate::style::{Palette, Style};

use super::progress::Spinner;
use super::report::{build_report, tool_summary, written_line};

/// Regenerate both outputs from scratch and compare how long each took.
///
/// A failing generator is reported but does not fail the command; the
/// comparison is skipped instead.
pub fn bench(config: &Config, palette: &Palette, write_report: bool) -> Result<()> {
    let p = palette;
    print!("{}", banner(p, "OpenAPI Generator Benchmark"));
    let source = config.input_spec.display().to_string();
    println!("{}", field(p, "Source", &source));
    if let Some(ms) = config.max_wait_ms {
        let limit = format!("{}ms per generator", ms);
        println!("{}", field(p, "Max wait", &limit));
    }

    let cleaning = p.paint(Style::Warning, "Cleaning previous outputs...");
    println!("\n{}", cleaning);
    clean_outputs(&[&config.first.output_dir, &config.second.output_dir])
        .context("Failed to clean previous outputs")?;

    let first = run_one(config, p, 1, &config.first);
    let second = run_one(config, p, 2, &config.second);

    if first.success && second.success {
        print!("{}", comparison(config, p, &first, &second));
        if write_report {
            build_report(config, Some((first, second))).save(&config.report_path)?;
            println!("\n{}", written_line(p, &config.report_path));
        }
    } else {
        let skipped = "⚠ Comparison skipped: at least one generator failed";
        println!("\n{}", p.paint(Style::Warning, skipped));
    }

    print!("{}", summary(config, p));
    Ok(())
}

fn summary(config: &Config, p: &Palette) -> String {
    let tick = p.paint(Style::Success, "✓");
    let mut out = section(p, "5. Summary");
    out.push('\n');
    out.push_str(&format!("{} Benchmark complete\n", tick));
    out.push_str(&format!("{} Generated outputs are in:\n", tick));
    for tool in [&config.first, &config.second] {
        out.push_str(&format!("    {}/\n", tool.output_dir.display()));
    }
    out.push_str(&format!(
        "{} Run {} to see the detailed comparison\n\n",
        tick,
        p.paint(Style::Accent, "genbench stats")
    ));
    out
}

fn run_one(config: &Config, p: &Palette, n: usize, tool: &ToolConfig) -> BenchmarkResult {
    let title = format!("{}. Benchmarking {}", n, tool.name);
    println!("{}", section(p, &title));

    let generator = Generator::from(tool);
    let spinner = Spinner::start(format!("Running: {}", generator.command_line));
    let result = run_generator(&generator, config.max_wait());
    spinner.finish();

    println!("{}", benchmark_line(p, &result));
    if result.success {
        let stats = analyze_directory(&tool.output_dir);
        println!("  Files: {}", format_count(stats.total_files as i64));
        println!("  Size: {}", format_kb(stats.total_size_bytes as f64));
        println!("  Lines: {}", format_count(stats.total_lines as i64));
    }
    result
}

fn comparison(
    config: &Config,
    p: &Palette,
    first: &BenchmarkResult,
    second: &BenchmarkResult,
) -> String {
    let speed = diff(
        Metric::Duration,
        &first.tool_name,
        first.duration_ms,
        &second.tool_name,
        second.duration_ms,
    );
    let mut deltas = vec![speed];
    deltas.extend(stats_deltas(&tool_summary(&config.first), &tool_summary(&config.second)));
    let board = Scoreboard::new(deltas);

    let mut out = section(p, "3. Performance Comparison");
    out.push('\n');
    for delta in &board.deltas {
        out.push_str(&delta_block(p, delta.metric.name(), delta));
    }
    out.push_str(&section(p, "4. Winner Analysis"));
    out.push('\n');
    out.push_str(&winner_analysis(p, &board));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn comparison_covers_time_and_size() {
        let tmp = TempDir::new().unwrap();
        let config = Config::default().rooted_at(tmp.path());
        fs::create_dir_all(&config.first.output_dir).unwrap();
        fs::write(config.first.types_path(), vec![b'a'; 1024]).unwrap();
        fs::create_dir_all(&config.second.output_dir).unwrap();
        fs::write(config.second.types_path(), vec![b'a'; 512]).unwrap();

        let first = BenchmarkResult::succeeded("openapi-typescript", Duration::from_millis(500));
        let second = BenchmarkResult::succeeded("@hey-api/openapi-ts", Duration::from_secs(1));
        let text = comparison(&config, &Palette::plain(), &first, &second);

        assert!(text.contains("Generation Time:"));
        assert!(text.contains("+500ms (100.0% slower)"));
        assert!(text.contains("-0.50 KB (50.0% smaller)"));
        assert!(text.contains("Speed Winner: openapi-typescript"));
        assert!(text.contains("Size Winner: @hey-api/openapi-ts"));
    }

    #[test]
    fn summary_points_at_outputs() {
        let config = Config::default();
        let text = summary(&config, &Palette::plain());
        assert!(text.contains("✓ Benchmark complete\n"));
        assert!(text.contains("    output-openapi-typescript/\n"));
        assert!(text.contains("✓ Run genbench stats to see the detailed comparison"));
    }

    #[cfg(unix)]
    #[test]
    fn failing_generator_does_not_fail_the_command() {
        let tmp = TempDir::new().unwrap();
        let mut config = Config::default().rooted_at(tmp.path());
        for tool in [&mut config.first, &mut config.second] {
            tool.program = "sh".to_string();
            tool.args = vec!["-c".to_string(), "exit 1".to_string()];
        }
        fs::create_dir_all(&config.first.output_dir).unwrap();

        bench(&config, &Palette::plain(), true).unwrap();
        assert!(!config.first.output_dir.exists());
        assert!(!config.report_path.exists());
    }

    #[cfg(unix)]
    #[test]
    fn successful_run_can_write_report() {
        let tmp = TempDir::new().unwrap();
        let mut config = Config::default().rooted_at(tmp.path());
        for tool in [&mut config.first, &mut config.second] {
            let script = format!(
                "mkdir -p '{dir}' && printf 'export type A = string;\\n' > '{file}'",
                dir = tool.output_dir.display(),
                file = tool.types_path().display()
            );
            tool.program = "sh".to_string();
            tool.args = vec!["-c".to_string(), script];
        }

        bench(&config, &Palette::plain(), true).unwrap();
        let report = fs::read_to_string(&config.report_path).unwrap();
        assert!(report.contains("| **Generation Time** |"));
        assert!(report.contains("**Speed"));
    }
}
