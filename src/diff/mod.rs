//! Pairwise comparison of metrics between the first and second generator.
//!
//! Differences are always `second - first`: a positive delta means the second
//! tool is larger/slower, a negative one that it is smaller/faster.

use serde::{Deserialize, Serialize};

use crate::format::{
    format_count, format_count_signed, format_duration, format_duration_signed, format_kb,
    format_kb_signed, format_percent,
};

/// What a delta measures. Decides how values print and how a change is worded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Generation time in milliseconds
    Duration,
    /// Output size in bytes
    Size,
    Lines,
    Files,
}

impl Metric {
    pub fn name(self) -> &'static str {
        match self {
            Metric::Duration => "Generation Time",
            Metric::Size => "Total Size",
            Metric::Lines => "Total Lines",
            Metric::Files => "Files Generated",
        }
    }

    /// Word for a positive delta.
    pub fn increase_word(self) -> &'static str {
        match self {
            Metric::Duration => "slower",
            Metric::Size => "larger",
            Metric::Lines | Metric::Files => "more",
        }
    }

    /// Word for a negative delta.
    pub fn decrease_word(self) -> &'static str {
        match self {
            Metric::Duration => "faster",
            Metric::Size => "smaller",
            Metric::Lines | Metric::Files => "fewer",
        }
    }

    pub fn format_value(self, value: f64) -> String {
        match self {
            Metric::Duration => format_duration(value),
            Metric::Size => format_kb(value),
            Metric::Lines | Metric::Files => format_count(value.round() as i64),
        }
    }

    pub fn format_signed(self, value: f64) -> String {
        match self {
            Metric::Duration => format_duration_signed(value),
            Metric::Size => format_kb_signed(value),
            Metric::Lines | Metric::Files => format_count_signed(value.round() as i64),
        }
    }
}

/// Which side holds the smaller value for a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winner {
    First,
    Second,
    Tie,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Increase,
    Decrease,
    Unchanged,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonDelta {
    pub metric: Metric,
    pub a_label: String,
    pub b_label: String,
    pub a: f64,
    pub b: f64,
    /// `b - a`
    pub absolute_diff: f64,
    /// `(b - a) / a * 100`, absent when `a` is zero
    pub percent_diff: Option<f64>,
}

/// Compare `b` against `a` for one metric.
pub fn diff(metric: Metric, a_label: &str, a: f64, b_label: &str, b: f64) -> ComparisonDelta {
    let absolute_diff = b - a;
    let percent_diff = if a == 0.0 {
        None
    } else {
        Some(absolute_diff / a * 100.0).filter(|p| p.is_finite())
    };

    ComparisonDelta {
        metric,
        a_label: a_label.to_string(),
        b_label: b_label.to_string(),
        a,
        b,
        absolute_diff,
        percent_diff,
    }
}

impl ComparisonDelta {
    pub fn direction(&self) -> Direction {
        if self.absolute_diff > 0.0 {
            Direction::Increase
        } else if self.absolute_diff < 0.0 {
            Direction::Decrease
        } else {
            Direction::Unchanged
        }
    }

    pub fn winner(&self) -> Winner {
        if self.a < self.b {
            Winner::First
        } else if self.b < self.a {
            Winner::Second
        } else {
            Winner::Tie
        }
    }

    /// Label of the winning side, `None` on a tie.
    pub fn winner_label(&self) -> Option<&str> {
        match self.winner() {
            Winner::First => Some(self.a_label.as_str()),
            Winner::Second => Some(self.b_label.as_str()),
            Winner::Tie => None,
        }
    }

    /// Label of the losing side, `None` on a tie.
    pub fn loser_label(&self) -> Option<&str> {
        match self.winner() {
            Winner::First => Some(self.b_label.as_str()),
            Winner::Second => Some(self.a_label.as_str()),
            Winner::Tie => None,
        }
    }

    /// How much smaller the winner is, as a percentage of the loser's value.
    pub fn winner_margin_pct(&self) -> Option<f64> {
        let larger = self.a.max(self.b);
        if self.winner() == Winner::Tie || larger == 0.0 {
            return None;
        }
        Some(self.absolute_diff.abs() / larger * 100.0)
    }

    pub fn format_a(&self) -> String {
        self.metric.format_value(self.a)
    }

    pub fn format_b(&self) -> String {
        self.metric.format_value(self.b)
    }

    /// Signed absolute difference, e.g. `"-0.25 KB"`.
    pub fn format_absolute(&self) -> String {
        self.metric.format_signed(self.absolute_diff)
    }

    /// Percentage with direction word, e.g. `"25.0% smaller"`, or `"n/a"`.
    pub fn format_percent(&self) -> String {
        match (self.percent_diff, self.direction()) {
            (None, _) => "n/a".to_string(),
            (Some(_), Direction::Unchanged) => "no change".to_string(),
            (Some(pct), Direction::Increase) => {
                let pct = format_percent(pct.abs());
                format!("{} {}", pct, self.metric.increase_word())
            }
            (Some(pct), Direction::Decrease) => {
                let pct = format_percent(pct.abs());
                format!("{} {}", pct, self.metric.decrease_word())
            }
        }
    }

    /// Full difference text, e.g. `"-0.25 KB (25.0% smaller)"`.
    pub fn describe(&self) -> String {
        format!("{} ({})", self.format_absolute(), self.format_percent())
    }
}

/// Per-metric winners. Metrics are judged independently with no combined score.
#[derive(Debug, Clone, Default)]
pub struct Scoreboard {
    pub deltas: Vec<ComparisonDelta>,
}

impl Scoreboard {
    pub fn new(deltas: Vec<ComparisonDelta>) -> Self {
        Self { deltas }
    }

    pub fn get(&self, metric: Metric) -> Option<&ComparisonDelta> {
        self.deltas.iter().find(|d| d.metric == metric)
    }

    pub fn winner(&self, metric: Metric) -> Option<Winner> {
        self.get(metric).map(ComparisonDelta::winner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(a: f64, b: f64) -> ComparisonDelta {
        diff(
            Metric::Size,
            "openapi-typescript",
            a,
            "@hey-api/openapi-ts",
            b,
        )
    }

    #[test]
    fn both_zero_is_not_applicable() {
        let d = size(0.0, 0.0);
        assert_eq!(d.absolute_diff, 0.0);
        assert_eq!(d.percent_diff, None);
        assert_eq!(d.format_percent(), "n/a");
        assert_eq!(d.winner(), Winner::Tie);
    }

    #[test]
    fn zero_base_is_not_applicable() {
        let d = diff(Metric::Lines, "a", 0.0, "b", 5.0);
        assert_eq!(d.absolute_diff, 5.0);
        assert_eq!(d.percent_diff, None);
        assert_eq!(d.describe(), "+5 (n/a)");
    }

    #[test]
    fn decrease_is_negative_percent() {
        let d = diff(Metric::Lines, "a", 100.0, "b", 80.0);
        assert_eq!(d.absolute_diff, -20.0);
        assert_eq!(d.percent_diff, Some(-20.0));
        assert_eq!(d.direction(), Direction::Decrease);
        assert_eq!(d.describe(), "-20 (20.0% fewer)");
    }

    #[test]
    fn size_wording() {
        assert_eq!(size(1024.0, 768.0).describe(), "-0.25 KB (25.0% smaller)");
        assert_eq!(size(768.0, 1024.0).describe(), "+0.25 KB (33.3% larger)");
        assert_eq!(size(512.0, 512.0).describe(), "0.00 KB (no change)");
    }

    #[test]
    fn duration_wording() {
        let d = diff(Metric::Duration, "a", 2000.0, "b", 1500.0);
        assert_eq!(d.describe(), "-500ms (25.0% faster)");
        let d = diff(Metric::Duration, "a", 1000.0, "b", 2500.0);
        assert_eq!(d.describe(), "+1.50s (150.0% slower)");
    }

    #[test]
    fn smaller_value_wins() {
        let d = size(1024.0, 768.0);
        assert_eq!(d.winner(), Winner::Second);
        assert_eq!(d.winner_label(), Some("@hey-api/openapi-ts"));
        assert_eq!(d.loser_label(), Some("openapi-typescript"));

        let d = size(100.0, 900.0);
        assert_eq!(d.winner(), Winner::First);
        assert_eq!(d.winner_label(), Some("openapi-typescript"));
    }

    #[test]
    fn winner_margin_is_relative_to_loser() {
        assert_eq!(size(1024.0, 768.0).winner_margin_pct(), Some(25.0));
        assert_eq!(size(768.0, 1024.0).winner_margin_pct(), Some(25.0));
        assert_eq!(size(0.0, 0.0).winner_margin_pct(), None);
        assert_eq!(size(0.0, 10.0).winner_margin_pct(), Some(100.0));
    }

    #[test]
    fn tie_has_no_winner_label() {
        let d = size(10.0, 10.0);
        assert_eq!(d.winner_label(), None);
        assert_eq!(d.loser_label(), None);
    }

    #[test]
    fn scoreboard_judges_metrics_independently() {
        let board = Scoreboard::new(vec![
            diff(Metric::Duration, "a", 900.0, "b", 1200.0),
            diff(Metric::Size, "a", 4096.0, "b", 2048.0),
            diff(Metric::Lines, "a", 10.0, "b", 10.0),
        ]);
        assert_eq!(board.winner(Metric::Duration), Some(Winner::First));
        assert_eq!(board.winner(Metric::Size), Some(Winner::Second));
        assert_eq!(board.winner(Metric::Lines), Some(Winner::Tie));
        assert_eq!(board.winner(Metric::Files), None);
    }

    #[test]
    fn delta_json_carries_raw_values() {
        let json = serde_json::to_value(size(1024.0, 768.0)).unwrap();
        assert_eq!(json["metric"], "size");
        assert_eq!(json["absolute_diff"], -256.0);
        assert_eq!(json["percent_diff"], -25.0);
        assert!(json.get("winner").is_none());
    }

    #[test]
    fn formats_sides() {
        let d = diff(Metric::Files, "a", 1.0, "b", 1200.0);
        assert_eq!(d.format_a(), "1");
        assert_eq!(d.format_b(), "1,200");
        assert_eq!(d.format_absolute(), "+1,199");
    }
}
