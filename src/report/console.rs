//! Terminal rendering. Every function returns the text instead of printing it,
//! so the CLI decides where it goes and tests can use `Palette::plain()`.

use crate::bench::BenchmarkResult;
use crate::diff::{ComparisonDelta, Metric, Scoreboard};
use crate::format::{format_count, format_duration, format_kb, format_percent};
use crate::signals::StructuralSignal;
use crate::stats::DirectoryStats;
use crate::style::{Palette, Style};

use super::file_types_summary;

const RULE_WIDTH: usize = 80;
const NAME_COLUMN: usize = 24;

/// Title framed by two `=` rules.
pub fn banner(p: &Palette, title: &str) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    format!(
        "\n{}\n{}\n{}\n",
        p.paint(Style::Header, &rule),
        p.paint(Style::Header, title),
        p.paint(Style::Header, &rule)
    )
}

/// Section title over a `-` rule.
pub fn section(p: &Palette, title: &str) -> String {
    format!(
        "\n{}\n{}",
        p.paint(Style::Section, title),
        p.paint(Style::Section, &"-".repeat(RULE_WIDTH))
    )
}

pub fn field(p: &Palette, label: &str, value: &str) -> String {
    let label = p.paint(Style::Label, &format!("{}:", label));
    format!("{} {}", label, value)
}

/// `⚠ No files found. Run: npm run gen:hey-api`
pub fn missing_warning(p: &Palette, what: &str, hint: &str) -> String {
    p.paint(Style::Warning, &format!("⚠ {}. Run: {}", what, hint))
}

pub fn stats_block(p: &Palette, stats: &DirectoryStats) -> String {
    let rows = [
        ("Total Files", format_count(stats.total_files as i64)),
        ("Total Size", format_kb(stats.total_size_bytes as f64)),
        ("Total Lines", format_count(stats.total_lines as i64)),
        ("File Types", file_types_summary(&stats.file_type_counts)),
    ];
    let mut out = String::new();
    for (label, value) in rows {
        out.push_str(&format!("{}\n", field(p, label, &value)));
    }

    out.push_str(&format!("\n{}\n", p.paint(Style::Strong, "Files:")));
    let mut files: Vec<_> = stats.files.iter().collect();
    files.sort_by(|a, b| a.path.cmp(&b.path));
    for file in files {
        out.push_str(&format!(
            "  - {} ({}, {} lines)\n",
            file.path,
            format_kb(file.size_bytes as f64),
            format_count(file.line_count as i64)
        ));
    }
    out
}

/// Both sides of one metric and the difference between them.
pub fn delta_block(p: &Palette, title: &str, delta: &ComparisonDelta) -> String {
    let mut out = format!("\n{}\n", p.paint(Style::Strong, &format!("{}:", title)));
    out.push_str(&name_row(&delta.a_label, &delta.format_a()));
    out.push_str(&name_row(&delta.b_label, &delta.format_b()));
    out.push_str(&name_row("Difference", &delta.describe()));
    out
}

pub fn signal_block(p: &Palette, signal: &StructuralSignal) -> String {
    let mut out = format!("\n{}\n", p.paint(Style::Strong, "Type Structure:"));
    for (label, n) in [
        ("Interfaces", signal.interface_count),
        ("Types", signal.type_count),
        ("Enums", signal.enum_count),
    ] {
        out.push_str(&format!("  {}: {}\n", label, format_count(n as i64)));
    }

    out.push_str(&format!("\n{}\n", p.paint(Style::Strong, "Organization:")));
    if signal.has_paths_root {
        out.push_str("  ✓ Paths-based structure (maps to OpenAPI paths)\n");
    }
    if signal.has_components_root {
        out.push_str("  ✓ Components-based structure (schemas, responses, etc.)\n");
    }
    if !signal.has_paths_root && !signal.has_components_root {
        out.push_str("  ✓ Flat structure (all types at root level)\n");
    }
    out
}

/// Construct counts of both types files side by side.
pub fn type_counts_table(
    p: &Palette,
    a_name: &str,
    a: &StructuralSignal,
    b_name: &str,
    b: &StructuralSignal,
) -> String {
    let mut out = format!("\n{}\n", p.paint(Style::Strong, "Type Counts:"));
    out.push_str(&counts_row("", "Interfaces", "Types", "Enums"));
    for (name, s) in [(a_name, a), (b_name, b)] {
        out.push_str(&counts_row(
            &truncate(name, 13),
            &format_count(s.interface_count as i64),
            &format_count(s.type_count as i64),
            &format_count(s.enum_count as i64),
        ));
    }
    out
}

/// `✓ Completed in 1.23s` or `✗ Failed: <message>`.
pub fn benchmark_line(p: &Palette, result: &BenchmarkResult) -> String {
    if result.success {
        p.paint(
            Style::Success,
            &format!("✓ Completed in {}", format_duration(result.duration_ms)),
        )
    } else {
        let message = result.error_message.as_deref().unwrap_or("unknown error");
        p.paint(Style::Error, &format!("✗ Failed: {}", message))
    }
}

/// One paragraph per measured metric naming its winner.
pub fn winner_analysis(p: &Palette, board: &Scoreboard) -> String {
    let mut out = String::new();
    for (metric, heading) in [
        (Metric::Duration, "Speed Winner"),
        (Metric::Size, "Size Winner"),
        (Metric::Lines, "Lines Winner"),
        (Metric::Files, "Files Winner"),
    ] {
        let Some(delta) = board.get(metric) else {
            continue;
        };
        let heading = p.paint(Style::Strong, &format!("{}:", heading));
        let margin = delta.winner_margin_pct();
        match (delta.winner_label(), delta.loser_label(), margin) {
            (Some(winner), Some(loser), Some(margin)) => {
                let winner = p.paint(Style::Success, winner);
                out.push_str(&format!("\n{} {}\n", heading, winner));
                out.push_str(&format!(
                    "  • {} {} than {}\n",
                    format_percent(margin),
                    metric.decrease_word(),
                    loser
                ));
            }
            _ => {
                out.push_str(&format!("\n{} tie\n", heading));
                out.push_str(&format!("  • both at {}\n", delta.format_a()));
            }
        }
    }
    out
}

/// First `lines` lines of a file with a trailer counting what was cut.
pub fn preview_block(p: &Palette, text: &str, lines: usize) -> String {
    let total = crate::metrics::count_lines(text);
    let mut out = crate::signals::preview(text, lines);
    out.push('\n');
    if total > lines {
        let more = format!("... ({} more lines)", total - lines);
        out.push_str(&format!("{}\n", p.paint(Style::Warning, &more)));
    }
    out
}

fn name_row(name: &str, value: &str) -> String {
    let name = format!("{}:", name);
    format!("  {:<width$}{}\n", name, value, width = NAME_COLUMN)
}

fn counts_row(name: &str, interfaces: &str, types: &str, enums: &str) -> String {
    format!(
        "  {:<14}{:>14}{:>14}{:>14}\n",
        name, interfaces, types, enums
    )
}

fn truncate(name: &str, max: usize) -> String {
    if name.chars().count() <= max {
        return name.to_string();
    }
    let mut cut: String = name.chars().take(max - 1).collect();
    cut.push('…');
    cut
}
