//! Recursive file enumeration for generator output trees.

use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// List every regular file beneath `root`.
///
/// A root that does not exist (or is not a directory) yields an empty list:
/// the generator may simply not have run yet. Ignore files and hidden-file
/// rules are disabled so that every generated file is counted. Symlinks are
/// not followed. Order is enumeration order.
pub fn list_files(root: &Path) -> Vec<PathBuf> {
    if !root.is_dir() {
        debug!(root = %root.display(), "scan root missing, nothing to list");
        return Vec::new();
    }

    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(false)
        .build();

    let mut files = Vec::new();
    for entry in walker {
        match entry {
            Ok(entry) => {
                if entry.file_type().is_some_and(|ft| ft.is_file()) {
                    files.push(entry.into_path());
                }
            }
            Err(e) => warn!(root = %root.display(), error = %e, "skipping unreadable entry"),
        }
    }

    debug!(root = %root.display(), count = files.len(), "listed files");
    files
}

/// Path of `file` relative to `root`, with `/` separators.
pub fn relative_path(root: &Path, file: &Path) -> String {
    let rel = file.strip_prefix(root).unwrap_or(file);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Relative paths of every file beneath `root`, sorted lexicographically.
pub fn list_relative_sorted(root: &Path) -> Vec<String> {
    let mut files: Vec<String> = list_files(root)
        .iter()
        .map(|f| relative_path(root, f))
        .collect();
    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn missing_root_is_empty() {
        let tmp = TempDir::new().unwrap();
        assert!(list_files(&tmp.path().join("nope")).is_empty());
    }

    #[test]
    fn file_root_is_empty() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("types.ts");
        fs::write(&file, "x").unwrap();
        assert!(list_files(&file).is_empty());
    }

    #[test]
    fn recurses_without_depth_limit() {
        let tmp = TempDir::new().unwrap();
        let deep = tmp.path().join("a/b/c/d/e");
        fs::create_dir_all(&deep).unwrap();
        fs::write(deep.join("deep.ts"), "x").unwrap();
        fs::write(tmp.path().join("top.ts"), "x").unwrap();

        let files = list_files(tmp.path());
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|f| f.is_file()));
    }

    #[test]
    fn hidden_and_ignored_files_are_counted() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".gitignore"), "*.gen.ts\n").unwrap();
        fs::write(tmp.path().join("types.gen.ts"), "x").unwrap();
        fs::write(tmp.path().join(".hidden"), "x").unwrap();

        assert_eq!(list_files(tmp.path()).len(), 3);
    }

    #[test]
    fn empty_directories_contribute_nothing() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("empty/nested")).unwrap();
        assert!(list_files(tmp.path()).is_empty());
    }

    #[test]
    fn relative_listing_is_sorted() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("client")).unwrap();
        fs::write(tmp.path().join("types.gen.ts"), "x").unwrap();
        fs::write(tmp.path().join("index.ts"), "x").unwrap();
        fs::write(tmp.path().join("client/client.gen.ts"), "x").unwrap();

        assert_eq!(
            list_relative_sorted(tmp.path()),
            vec!["client/client.gen.ts", "index.ts", "types.gen.ts"]
        );
    }
}
