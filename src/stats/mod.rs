//! Directory-level aggregation of file metrics.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::metrics::{read_metrics, FileRecord};
use crate::walker::{list_files, relative_path};

/// Size, line and file-count summary of one output tree.
///
/// `total_files == files.len()`, and the size and line totals are the exact
/// sums over `files`. Unreadable files are excluded from all of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryStats {
    pub total_files: usize,
    pub total_size_bytes: u64,
    pub total_lines: usize,
    /// Extension (with leading dot, `""` when none) to file count
    pub file_type_counts: BTreeMap<String, usize>,
    pub files: Vec<FileRecord>,
}

impl DirectoryStats {
    /// True when no files were found, e.g. the generator has not run.
    pub fn is_empty(&self) -> bool {
        self.total_files == 0
    }

    fn push(&mut self, record: FileRecord) {
        self.total_files += 1;
        self.total_size_bytes += record.size_bytes;
        self.total_lines += record.line_count;
        *self
            .file_type_counts
            .entry(extension_of(&record.path).to_string())
            .or_insert(0) += 1;
        self.files.push(record);
    }
}

/// Extension of the last path segment, including the dot.
///
/// Names without a dot, and dotfiles such as `.gitignore`, have no extension.
pub fn extension_of(path: &str) -> &str {
    let name = path.rsplit('/').next().unwrap_or(path);
    match name.rfind('.') {
        Some(0) | None => "",
        Some(idx) => &name[idx..],
    }
}

/// Scan `root` and aggregate every readable file beneath it.
///
/// A missing root produces all-zero stats rather than an error.
pub fn analyze_directory(root: &Path) -> DirectoryStats {
    aggregate(root, list_files(root))
}

/// Fold `files` into one summary. A file that cannot be read is logged and
/// left out, so a file removed after listing does not fail the scan.
fn aggregate(root: &Path, files: Vec<PathBuf>) -> DirectoryStats {
    let mut stats = DirectoryStats::default();

    for file in files {
        match read_metrics(&file) {
            Ok(metrics) => stats.push(FileRecord {
                path: relative_path(root, &file),
                size_bytes: metrics.size_bytes,
                line_count: metrics.line_count,
            }),
            Err(e) => warn!(error = %e, "excluding file from totals"),
        }
    }

    debug!(
        root = %root.display(),
        files = stats.total_files,
        bytes = stats.total_size_bytes,
        lines = stats.total_lines,
        "analyzed directory"
    );
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn nonexistent_root_is_all_zero() {
        let tmp = TempDir::new().unwrap();
        let stats = analyze_directory(&tmp.path().join("output-hey-api"));
        assert_eq!(stats, DirectoryStats::default());
        assert!(stats.is_empty());
        assert!(stats.file_type_counts.is_empty());
    }

    #[test]
    fn totals_match_file_records() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("client")).unwrap();
        fs::write(tmp.path().join("types.gen.ts"), "export type A = string;\n").unwrap();
        fs::write(tmp.path().join("index.ts"), "export * from './types.gen';").unwrap();
        fs::write(tmp.path().join("client/client.gen.ts"), "a\nb\nc").unwrap();

        let stats = analyze_directory(tmp.path());
        assert_eq!(stats.total_files, 3);
        assert_eq!(stats.total_files, stats.files.len());
        assert_eq!(
            stats.total_size_bytes,
            stats.files.iter().map(|f| f.size_bytes).sum::<u64>()
        );
        assert_eq!(
            stats.total_lines,
            stats.files.iter().map(|f| f.line_count).sum::<usize>()
        );
        assert_eq!(stats.total_lines, 2 + 1 + 3);
        assert_eq!(stats.file_type_counts.get(".ts"), Some(&3));
    }

    #[test]
    fn records_use_relative_paths() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("core")).unwrap();
        fs::write(tmp.path().join("core/auth.gen.ts"), "x").unwrap();

        let stats = analyze_directory(tmp.path());
        assert_eq!(stats.files[0].path, "core/auth.gen.ts");
    }

    #[test]
    fn groups_by_extension() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.ts"), "x").unwrap();
        fs::write(tmp.path().join("b.ts"), "x").unwrap();
        fs::write(tmp.path().join("schema.json"), "{}").unwrap();
        fs::write(tmp.path().join("LICENSE"), "MIT").unwrap();

        let stats = analyze_directory(tmp.path());
        assert_eq!(stats.file_type_counts.get(".ts"), Some(&2));
        assert_eq!(stats.file_type_counts.get(".json"), Some(&1));
        assert_eq!(stats.file_type_counts.get(""), Some(&1));
    }

    #[test]
    fn extension_rules() {
        assert_eq!(extension_of("types.gen.ts"), ".ts");
        assert_eq!(extension_of("dir.v2/README"), "");
        assert_eq!(extension_of(".gitignore"), "");
        assert_eq!(extension_of("nested/.env.local"), ".local");
        assert_eq!(extension_of("trailing."), ".");
    }

    #[test]
    fn unreadable_file_is_skipped() {
        let tmp = TempDir::new().unwrap();
        let ok = tmp.path().join("ok.ts");
        fs::write(&ok, "x").unwrap();
        let vanished = tmp.path().join("vanished.ts");
        fs::write(&vanished, "secret").unwrap();
        let files = list_files(tmp.path());
        fs::remove_file(&vanished).unwrap();
        assert_eq!(files.len(), 2);

        let stats = aggregate(tmp.path(), files);
        assert_eq!(stats.total_files, 1);
        assert_eq!(stats.files.len(), 1);
        assert_eq!(stats.files[0].path, "ok.ts");
        assert_eq!(stats.total_size_bytes, 1);
    }
}
