//! Per-file size and line metrics.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::HarnessError;

/// One file's entry in a directory scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Path relative to the scan root, `/` separated
    pub path: String,
    pub size_bytes: u64,
    pub line_count: usize,
}

/// Everything read from a single file.
#[derive(Debug, Clone)]
pub struct FileMetrics {
    pub size_bytes: u64,
    pub line_count: usize,
    pub content: String,
}

/// Number of `'\n'`-delimited segments.
///
/// A trailing partial line counts, and an empty text is one line.
pub fn count_lines(text: &str) -> usize {
    text.split('\n').count()
}

pub fn read_metrics(path: &Path) -> Result<FileMetrics, HarnessError> {
    let bytes = fs::read(path).map_err(|source| HarnessError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let content = String::from_utf8_lossy(&bytes).into_owned();

    Ok(FileMetrics {
        size_bytes: bytes.len() as u64,
        line_count: count_lines(&content),
        content,
    })
}
