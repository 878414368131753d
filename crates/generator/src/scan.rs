//! Scanner module for discovering video files in the library directory.
//!
//! This module provides functionality to recursively scan the configured
//! library root for video files, filtering by extension and ordering the
//! results by modification time, newest first.

use std::cmp::Reverse;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use walkdir::WalkDir;

/// A candidate video file discovered during library scanning.
#[derive(Debug, Clone)]
pub struct ScanCandidate {
    /// Full path to the video file.
    pub path: PathBuf,
    /// Last modified time of the file at discovery time.
    pub modified_time: SystemTime,
}

/// Checks if a file's extension matches any entry in the configured set.
///
/// The match is literal: entries are compared exactly as given, so callers
/// wanting case-insensitive behavior must pre-normalize the set.
pub fn matches_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| extensions.iter().any(|e| e == ext))
        .unwrap_or(false)
}

/// Scans the library root for video files.
///
/// Recursively walks the root directory, keeping regular files whose
/// extension matches the configured set and capturing each file's
/// modification time for ordering. Unreadable entries are skipped.
pub fn scan_library(root: &Path, extensions: &[String]) -> Vec<ScanCandidate> {
    let mut candidates = Vec::new();

    for entry in WalkDir::new(root).into_iter().filter_map(|e| e.ok()) {
        if !entry.file_type().is_file() {
            continue;
        }

        if !matches_extension(entry.path(), extensions) {
            continue;
        }

        if let Ok(metadata) = entry.metadata() {
            let modified_time = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);
            candidates.push(ScanCandidate {
                path: entry.path().to_path_buf(),
                modified_time,
            });
        }
    }

    candidates
}

/// Sorts candidates by modification time, most recently modified first.
///
/// The sort is stable, so ties keep their discovery order.
pub fn sort_newest_first(candidates: &mut [ScanCandidate]) {
    candidates.sort_by_key(|c| Reverse(c.modified_time));
}
