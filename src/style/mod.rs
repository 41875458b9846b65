//! Named console styles.
//!
//! Renderers take a `Palette` instead of reaching for color codes directly,
//! so the same rendering code produces colored terminal output or plain text.

use colored::{Color, Colorize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Style {
    /// Top-level banner
    Header,
    /// Numbered section title and rule
    Section,
    /// Field label, e.g. "Total Size:"
    Label,
    /// Emphasized heading inside a section
    Strong,
    Warning,
    Success,
    Error,
    /// Code and command snippets
    Accent,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleSpec {
    pub color: Option<Color>,
    pub bold: bool,
}

impl StyleSpec {
    const fn new(color: Option<Color>, bold: bool) -> Self {
        Self { color, bold }
    }
}

/// Immutable lookup table from [`Style`] to terminal attributes.
#[derive(Debug, Clone)]
pub struct Palette {
    styles: HashMap<Style, StyleSpec>,
}

impl Default for Palette {
    fn default() -> Self {
        Self::colored()
    }
}

impl Palette {
    pub fn colored() -> Self {
        let styles = HashMap::from([
            (Style::Header, StyleSpec::new(Some(Color::Cyan), true)),
            (Style::Section, StyleSpec::new(Some(Color::Blue), true)),
            (Style::Label, StyleSpec::new(Some(Color::Green), false)),
            (Style::Strong, StyleSpec::new(None, true)),
            (Style::Warning, StyleSpec::new(Some(Color::Yellow), false)),
            (Style::Success, StyleSpec::new(Some(Color::Green), false)),
            (Style::Error, StyleSpec::new(Some(Color::Red), false)),
            (Style::Accent, StyleSpec::new(Some(Color::Cyan), false)),
        ]);
        Self { styles }
    }

    /// No escape codes at all. Used for piped output and tests.
    pub fn plain() -> Self {
        Self {
            styles: HashMap::new(),
        }
    }

    pub fn spec(&self, style: Style) -> Option<StyleSpec> {
        self.styles.get(&style).copied()
    }

    pub fn paint(&self, style: Style, text: &str) -> String {
        let Some(spec) = self.spec(style) else {
            return text.to_string();
        };
        let mut out = match spec.color {
            Some(color) => text.color(color),
            None => text.normal(),
        };
        if spec.bold {
            out = out.bold();
        }
        out.to_string()
    }
}
