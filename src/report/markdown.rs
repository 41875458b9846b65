//! The persisted Markdown comparison report.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use super::{file_types_summary, stats_deltas, SourceMetadata, ToolSummary};
use crate::bench::BenchmarkResult;
use crate::diff::{diff, ComparisonDelta, Metric, Scoreboard, Winner};
use crate::format::{format_count, format_count_signed, format_kb, format_kb_signed, format_percent};
use crate::metrics::FileRecord;
use crate::signals::StructuralSignal;

/// Input parameters for creating a comparison report.
pub struct ReportInput {
    pub source: SourceMetadata,
    pub first: ToolSummary,
    pub second: ToolSummary,
    /// Generation timings, when both generators were run successfully
    pub timings: Option<(BenchmarkResult, BenchmarkResult)>,
}

/// Complete side-by-side report of the two generators' output.
#[derive(Debug, Clone)]
pub struct ComparisonReport {
    pub timestamp: String,
    pub source: SourceMetadata,
    pub first: ToolSummary,
    pub second: ToolSummary,
    pub scoreboard: Scoreboard,
}

impl ComparisonReport {
    pub fn new(input: ReportInput) -> Self {
        let mut deltas = stats_deltas(&input.first, &input.second);
        if let Some((a, b)) = &input.timings {
            if a.success && b.success {
                let speed = diff(
                    Metric::Duration,
                    &a.tool_name,
                    a.duration_ms,
                    &b.tool_name,
                    b.duration_ms,
                );
                deltas.insert(0, speed);
            }
        }

        Self {
            timestamp: chrono::Utc::now().to_rfc3339(),
            source: input.source,
            first: input.first,
            second: input.second,
            scoreboard: Scoreboard::new(deltas),
        }
    }

    /// Replace the generation timestamp, e.g. to compare two renders.
    pub fn with_timestamp(mut self, timestamp: &str) -> Self {
        self.timestamp = timestamp.to_string();
        self
    }

    /// Overwrite `path` with the rendered report.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(path, self.to_markdown())
            .with_context(|| format!("Failed to write report to {}", path.display()))
    }

    pub fn to_markdown(&self) -> String {
        let source = &self.source;
        let mut md = String::new();

        md.push_str("# OpenAPI Generator Comparison Report\n\n");
        md.push_str(&format!("Generated: {}\n\n", self.timestamp));

        md.push_str("## Source\n\n");
        md.push_str(&format!("- **Input File**: {}\n", source.input_file));
        md.push_str(&format!("- **API**: {}\n", source.api_title));
        md.push_str(&format!("- **OpenAPI Version**: {}\n\n", source.openapi_version));
        md.push_str("---\n\n");

        self.push_tool_section(&mut md, Winner::First);
        self.push_tool_section(&mut md, Winner::Second);
        self.push_side_by_side(&mut md);
        self.push_signals(&mut md);
        self.push_winners(&mut md);
        self.push_narrative(&mut md);
        self.push_size_table(&mut md);

        md.push_str("## Conclusion\n\n");
        md.push_str("Both generators are excellent tools for different use cases:\n\n");
        md.push_str(&format!(
            "- **{}** excels at providing type-only definitions\n",
            self.first.name
        ));
        md.push_str(&format!(
            "- **{}** excels at providing a complete, batteries-included client\n\n",
            self.second.name
        ));
        md.push_str("Your choice should depend on your project requirements, ");
        md.push_str("team preferences, and existing infrastructure.\n");

        md
    }

    fn push_tool_section(&self, md: &mut String, side: Winner) {
        let (n, tool, profile) = match side {
            Winner::Second => (2, &self.second, SECOND_PROFILE),
            _ => (1, &self.first, FIRST_PROFILE),
        };
        let stats = &tool.stats;

        md.push_str(&format!("## {}. {}\n\n", n, tool.name));
        md.push_str(&format!("**Purpose**: {}\n\n", profile.purpose));

        md.push_str("### Statistics\n\n");
        md.push_str("| Metric | Value |\n");
        md.push_str("|--------|-------|\n");
        md.push_str(&format!("| Total Files | {} |\n", count(stats.total_files)));
        md.push_str(&format!("| Total Size | {} |\n", kb(stats.total_size_bytes)));
        md.push_str(&format!("| Total Lines | {} |\n", count(stats.total_lines)));
        let types = file_types_summary(&stats.file_type_counts);
        md.push_str(&format!("| File Types | {} |\n\n", types));

        md.push_str("### Generated Files\n\n");
        if stats.files.is_empty() {
            md.push_str("_No files generated._\n");
        }
        for file in sorted_files(&stats.files) {
            md.push_str(&format!(
                "- `{}` ({}, {} lines)\n",
                file.path,
                kb(file.size_bytes),
                count(file.line_count)
            ));
        }
        md.push('\n');

        md.push_str("### Characteristics\n\n");
        for line in profile.characteristics {
            md.push_str(&format!("- {}\n", line));
        }
        if let Some(line) = self.footprint_line(side) {
            md.push_str(&format!("- {}\n", line));
        }
        md.push_str("\n### Use Cases\n\nBest suited for:\n");
        for line in profile.use_cases {
            md.push_str(&format!("- {}\n", line));
        }
        md.push_str("\n---\n\n");
    }

    /// Output size of one side, worded by who won the size comparison.
    fn footprint_line(&self, side: Winner) -> Option<String> {
        let size = self.scoreboard.get(Metric::Size)?;
        let line = if size.winner() == Winner::Tie {
            "✅ **Same footprint** - Same amount of generated code".to_string()
        } else if size.winner() == side {
            let margin = size.winner_margin_pct().unwrap_or_default();
            format!(
                "✅ **Smaller footprint** - {} less generated code",
                format_percent(margin)
            )
        } else {
            "❌ **Larger footprint** - More generated code".to_string()
        };
        Some(line)
    }

    fn push_side_by_side(&self, md: &mut String) {
        let (a, b) = (&self.first.name, &self.second.name);
        md.push_str("## 3. Side-by-Side Comparison\n\n");
        md.push_str(&format!("| Feature | {} | {} | Difference |\n", a, b));
        md.push_str("|---------|------|------|------------|\n");
        for delta in &self.scoreboard.deltas {
            md.push_str(&format!(
                "| **{}** | {} | {} | {} |\n",
                delta.metric.name(),
                delta.format_a(),
                delta.format_b(),
                delta.describe()
            ));
        }
        for (feature, first, second) in FEATURE_ROWS {
            md.push_str(&format!("| **{}** | {} | {} | |\n", feature, first, second));
        }
        md.push_str("\n---\n\n");
    }

    fn push_signals(&self, md: &mut String) {
        md.push_str("## 4. Type Structure\n\n");
        let (Some(a), Some(b)) = (self.first.signals, self.second.signals) else {
            md.push_str("_Type definitions not available for both generators._\n\n---\n\n");
            return;
        };

        let (first, second) = (&self.first.name, &self.second.name);
        md.push_str(&format!("| Construct | {} | {} |\n", first, second));
        md.push_str("|-----------|------|------|\n");
        let counts = [
            ("Exported interfaces", a.interface_count, b.interface_count),
            ("Exported types", a.type_count, b.type_count),
            ("Exported enums", a.enum_count, b.enum_count),
        ];
        for (label, x, y) in counts {
            md.push_str(&table_row(label, &count(x), &count(y)));
        }
        md.push_str(&table_row(
            "`paths` root",
            &yes_no(a.has_paths_root),
            &yes_no(b.has_paths_root),
        ));
        md.push_str(&table_row(
            "`components` root",
            &yes_no(a.has_components_root),
            &yes_no(b.has_components_root),
        ));
        md.push_str(&format!("\n{}\n\n", organization_note(first, &a, second, &b)));
        md.push_str("_Counts come from textual pattern matching and are a coarse fingerprint, ");
        md.push_str("not a parse._\n\n---\n\n");
    }

    fn push_winners(&self, md: &mut String) {
        md.push_str("## 5. Winner Analysis\n\n");
        for metric in [Metric::Duration, Metric::Size, Metric::Lines, Metric::Files] {
            if let Some(delta) = self.scoreboard.get(metric) {
                md.push_str(&format!("- {}\n", winner_sentence(delta)));
            }
        }
        if self.scoreboard.get(Metric::Duration).is_none() {
            md.push_str("- **Speed**: not measured in this run\n");
        }
        md.push_str("\nEach metric is judged on its own; there is no combined score.\n\n");
        md.push_str("---\n\n");
    }

    fn push_narrative(&self, md: &mut String) {
        let (a, b) = (&self.first, &self.second);

        md.push_str("## 6. Code Structure Comparison\n\n");
        md.push_str(&format!("### {} Structure\n\n", a.name));
        md.push_str(&code_tree(a));
        md.push_str("**Philosophy**: Provide types, let developers choose implementation\n\n");
        md.push_str(&format!("### {} Structure\n\n", b.name));
        md.push_str(&code_tree(b));
        md.push_str("**Philosophy**: Provide complete solution with types and client\n\n");
        md.push_str("---\n\n");

        md.push_str("## 7. Example Usage Patterns\n\n");
        md.push_str(&format!("### Using {}\n\n", a.name));
        md.push_str(FIRST_USAGE);
        md.push_str(&format!("\n### Using {}\n\n", b.name));
        md.push_str(SECOND_USAGE);
        md.push_str("\n---\n\n");

        md.push_str("## 8. Recommendations\n\n");
        let size_winner = self.scoreboard.winner(Metric::Size);
        for (tool, profile, side) in [
            (a, FIRST_PROFILE, Winner::First),
            (b, SECOND_PROFILE, Winner::Second),
        ] {
            md.push_str(&format!("### Choose {} if:\n\n", tool.name));
            let mut reasons = profile.choose_if.to_vec();
            if size_winner == Some(side) {
                reasons.push("You want the smaller generated output");
            }
            for (i, line) in reasons.iter().enumerate() {
                md.push_str(&format!("{}. {}\n", i + 1, line));
            }
            md.push('\n');
        }
        md.push_str("---\n\n");
    }

    fn push_size_table(&self, md: &mut String) {
        let (a, b) = (&self.first.stats, &self.second.stats);
        md.push_str("## 9. Size Comparison\n\n");
        md.push_str("| Generator | Files | Size | Lines |\n");
        md.push_str("|-----------|-------|------|-------|\n");
        for tool in [&self.first, &self.second] {
            md.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                tool.name,
                count(tool.stats.total_files),
                kb(tool.stats.total_size_bytes),
                count(tool.stats.total_lines)
            ));
        }

        let files = b.total_files as i64 - a.total_files as i64;
        let bytes = b.total_size_bytes as f64 - a.total_size_bytes as f64;
        let lines = b.total_lines as i64 - a.total_lines as i64;
        md.push_str(&format!(
            "| **Difference** | {} | {} | {} |\n\n",
            format_count_signed(files),
            format_kb_signed(bytes),
            format_count_signed(lines)
        ));

        if let Some(size) = self.scoreboard.get(Metric::Size) {
            md.push_str(&format!("{}\n\n", size_note(size)));
        }
        md.push_str("---\n\n");
    }
}

/// Static description of one generator. Nothing here claims a measured
/// result; those lines are chosen from the scoreboard instead.
struct Profile {
    purpose: &'static str,
    characteristics: &'static [&'static str],
    use_cases: &'static [&'static str],
    choose_if: &'static [&'static str],
}

const FIRST_PROFILE: &Profile = &Profile {
    purpose: "Type-only generator for OpenAPI specifications",
    characteristics: &[
        "✅ **Pure TypeScript types** - No runtime code",
        "✅ **Single file output** - Easy to manage",
        "✅ **Direct schema mapping** - Types match OpenAPI schemas exactly",
        "❌ **No client code** - You must implement your own API client",
        "❌ **No service functions** - Manual endpoint implementation required",
    ],
    use_cases: &[
        "Projects with existing API client infrastructure",
        "Teams that want full control over HTTP client implementation",
        "Microservices where you only need type safety",
        "Library authors who want minimal dependencies",
    ],
    choose_if: &[
        "You have an existing API client setup (axios, fetch wrapper, etc.)",
        "You need maximum flexibility in implementation",
        "You prefer explicit control over HTTP requests",
        "You're building a library that should be client-agnostic",
    ],
};

const SECOND_PROFILE: &Profile = &Profile {
    purpose: "Complete client generator with types and runtime code",
    characteristics: &[
        "✅ **Complete client** - Ready-to-use API client out of the box",
        "✅ **Service functions** - Auto-generated functions for each endpoint",
        "✅ **Type safety** - Full TypeScript support with inference",
        "✅ **Request/Response types** - Complete type coverage",
        "❌ **More opinionated** - Specific client structure",
    ],
    use_cases: &[
        "New projects starting from scratch",
        "Teams that want to move fast with minimal boilerplate",
        "Applications that need a complete API client solution",
        "Projects without existing API client patterns",
    ],
    choose_if: &[
        "You're starting a new project",
        "You want to reduce boilerplate code",
        "You prefer convention over configuration",
        "You want auto-generated service functions",
        "You need a complete, ready-to-use solution",
    ],
};

const FEATURE_ROWS: [(&str, &str, &str); 6] = [
    ("Runtime Code", "❌ No", "✅ Yes"),
    ("Service Functions", "❌ No", "✅ Yes"),
    ("Client Implementation", "Manual", "Auto-generated"),
    ("Customization", "Full", "Limited"),
    ("Learning Curve", "Low", "Medium"),
    ("Maintenance", "Low", "Low"),
];

const FIRST_USAGE: &str = r#"```typescript
import type { paths } from './output-openapi-typescript/types';

// Define your own client
async function createVoyage(
  data: paths['/api/v5/Voyage/Bulk/Create']['post']['requestBody']['content']['application/json']
) {
  const response = await fetch('/api/v5/Voyage/Bulk/Create', {
    method: 'POST',
    headers: { 'Content-Type': 'application/json' },
    body: JSON.stringify(data)
  });
  return response.json();
}
```
"#;

const SECOND_USAGE: &str = r#"```typescript
import { createClient } from './output-hey-api';

// Use generated client
const client = createClient({ baseUrl: 'https://api.example.com' });
const result = await client.bulkVoyage.createBulkVoyages({ body: data });
```
"#;

fn count(n: usize) -> String {
    format_count(n as i64)
}

fn kb(bytes: u64) -> String {
    format_kb(bytes as f64)
}

fn yes_no(flag: bool) -> String {
    let text = if flag { "✅ Yes" } else { "❌ No" };
    text.to_string()
}

fn table_row(label: &str, first: &str, second: &str) -> String {
    format!("| {} | {} | {} |\n", label, first, second)
}

fn sorted_files(files: &[FileRecord]) -> Vec<&FileRecord> {
    let mut sorted: Vec<&FileRecord> = files.iter().collect();
    sorted.sort_by(|x, y| x.path.cmp(&y.path));
    sorted
}

fn tree_listing(files: &[FileRecord]) -> String {
    let sorted = sorted_files(files);
    let mut out = String::new();
    for (i, file) in sorted.iter().enumerate() {
        let branch = if i + 1 == sorted.len() { "└──" } else { "├──" };
        out.push_str(&format!("{} {}\n", branch, file.path));
    }
    out
}

fn code_tree(tool: &ToolSummary) -> String {
    format!(
        "```\n{}/\n{}```\n\n",
        tool.output_dir,
        tree_listing(&tool.stats.files)
    )
}

fn winner_sentence(delta: &ComparisonDelta) -> String {
    let label = match delta.metric {
        Metric::Duration => "Speed",
        Metric::Size => "Size",
        Metric::Lines => "Lines",
        Metric::Files => "Files",
    };
    let margin = delta.winner_margin_pct();
    match (delta.winner_label(), delta.loser_label(), margin) {
        (Some(winner), Some(loser), Some(margin)) => format!(
            "**{} Winner**: {} ({} {} than {})",
            label,
            winner,
            format_percent(margin),
            delta.metric.decrease_word(),
            loser
        ),
        _ => format!("**{}**: tie ({} each)", label, delta.format_a()),
    }
}

fn organization_note(
    a_name: &str,
    a: &StructuralSignal,
    b_name: &str,
    b: &StructuralSignal,
) -> String {
    let describe = |s: &StructuralSignal| {
        if s.has_paths_root {
            "path-centric (nested under a `paths` root, mirroring the OpenAPI document)"
        } else {
            "schema-centric (flat, one export per schema)"
        }
    };
    format!(
        "**Organization**: {} is {}; {} is {}.",
        a_name,
        describe(a),
        b_name,
        describe(b)
    )
}

fn size_note(size: &ComparisonDelta) -> String {
    match (size.winner_label(), size.loser_label()) {
        (Some(winner), Some(loser)) => format!(
            "{} produces less code than {} for the same input.",
            winner, loser
        ),
        _ => "Both generators produce the same amount of code.".to_string(),
    }
}
