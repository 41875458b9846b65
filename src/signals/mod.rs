//! Coarse structural fingerprint of generated TypeScript declarations.
//!
//! This is pattern matching, not parsing. Nesting, comments and string
//! literals are not tracked, so lookalike text inside a comment or a string is
//! counted too. The counts are meant for side-by-side human comparison only.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static INTERFACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"export interface \w+").unwrap());
static TYPE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"export type \w+").unwrap());
static ENUM_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"export enum \w+").unwrap());

const PATHS_ROOT: &str = "export interface paths";
const COMPONENTS_ROOT: &str = "export interface components";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuralSignal {
    pub interface_count: usize,
    pub type_count: usize,
    pub enum_count: usize,
    /// A path-keyed `paths` root interface is present
    pub has_paths_root: bool,
    /// A `components` root interface is present
    pub has_components_root: bool,
}

pub fn extract_signals(source: &str) -> StructuralSignal {
    StructuralSignal {
        interface_count: INTERFACE_RE.find_iter(source).count(),
        type_count: TYPE_RE.find_iter(source).count(),
        enum_count: ENUM_RE.find_iter(source).count(),
        has_paths_root: source.contains(PATHS_ROOT),
        has_components_root: source.contains(COMPONENTS_ROOT),
    }
}

/// The first `lines` lines of `source`.
pub fn preview(source: &str, lines: usize) -> String {
    source
        .split('\n')
        .take(lines)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Up to `context` bytes of `source` starting at the first match of `pattern`.
///
/// Returns `None` when the pattern is invalid or does not match. The cut is
/// moved back to the nearest char boundary.
pub fn sample_after(source: &str, pattern: &str, context: usize) -> Option<String> {
    let re = Regex::new(pattern).ok()?;
    let start = re.find(source)?.start();
    let mut end = (start + context).min(source.len());
    while !source.is_char_boundary(end) {
        end -= 1;
    }
    Some(source[start..end].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_two_interfaces_and_one_type() {
        let src = "export interface Pet { id: number }\n\
                   export interface Owner { name: string }\n\
                   export type PetId = number;\n";
        let s = extract_signals(src);
        assert_eq!(s.interface_count, 2);
        assert_eq!(s.type_count, 1);
        assert_eq!(s.enum_count, 0);
        assert!(!s.has_paths_root);
        assert!(!s.has_components_root);
    }

    #[test]
    fn detects_openapi_typescript_roots() {
        let src = "export interface paths {\n  '/pets': {};\n}\n\
                   export type webhooks = Record<string, never>;\n\
                   export interface components {\n  schemas: {};\n}\n";
        let s = extract_signals(src);
        assert!(s.has_paths_root);
        assert!(s.has_components_root);
        assert_eq!(s.interface_count, 2);
        assert_eq!(s.type_count, 1);
    }

    #[test]
    fn counts_enums() {
        let s = extract_signals("export enum Status { A, B }\nexport enum Kind { X }");
        assert_eq!(s.enum_count, 2);
    }

    #[test]
    fn requires_identifier_after_keyword() {
        let s = extract_signals("export type = broken;\nexport interface {");
        assert_eq!(s.type_count, 0);
        assert_eq!(s.interface_count, 0);
    }

    #[test]
    fn counts_lookalikes_in_comments() {
        let s = extract_signals("// export interface Ghost {}\n");
        assert_eq!(s.interface_count, 1);
    }

    #[test]
    fn empty_source_is_all_zero() {
        assert_eq!(extract_signals(""), StructuralSignal::default());
    }

    #[test]
    fn preview_takes_leading_lines() {
        assert_eq!(preview("a\nb\nc\nd", 2), "a\nb");
        assert_eq!(preview("a\nb", 10), "a\nb");
    }

    #[test]
    fn sample_after_first_match() {
        let src = "// header\nexport type BulkVoyageCreateDto = {\n  pol: string;\n};";
        let sample = sample_after(src, r"export type BulkVoyageCreateDto", 40).unwrap();
        assert!(sample.starts_with("export type BulkVoyageCreateDto"));
        assert_eq!(sample.len(), 40);
    }

    #[test]
    fn sample_after_no_match() {
        assert!(sample_after("nothing here", r"export interface X", 10).is_none());
        assert!(sample_after("text", r"(unclosed", 10).is_none());
    }

    #[test]
    fn sample_after_respects_char_boundaries() {
        let sample = sample_after("export type É = 1;", "export", 13).unwrap();
        assert_eq!(sample, "export type ");
    }
}
