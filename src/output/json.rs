//! JSON report for scripting and automation.
//!
//! # Output Schema
//!
//! ```json
//! {
//!   "duplicates": [
//!     {
//!       "hash": "9f86d081...",
//!       "size": 1024,
//!       "files": ["/path/to/file1.txt", "/path/to/file2.txt"]
//!     }
//!   ],
//!   "summary": {
//!     "files_visited": 100,
//!     "files_hashed": 99,
//!     "bytes_hashed": 1048576,
//!     "dirs_pruned": 3,
//!     "unreadable_files": 1,
//!     "duplicate_groups": 5,
//!     "duplicate_files": 10,
//!     "reclaimable_space": 51200,
//!     "scan_duration_ms": 1234,
//!     "interrupted": false
//!   }
//! }
//! ```

use serde::Serialize;

use crate::duplicates::{DuplicateGroup, ScanSummary};

/// One duplicate group in the JSON report.
#[derive(Debug, Clone, Serialize)]
pub struct JsonGroup {
    /// SHA-256 fingerprint as 64 lowercase hex characters
    pub hash: String,
    /// Size of each file in bytes
    pub size: u64,
    /// Absolute paths in discovery order
    pub files: Vec<String>,
}

impl From<&DuplicateGroup> for JsonGroup {
    fn from(group: &DuplicateGroup) -> Self {
        Self {
            hash: group.fingerprint.to_hex(),
            size: group.size,
            files: group
                .files
                .iter()
                .map(|p| p.to_string_lossy().into_owned())
                .collect(),
        }
    }
}

/// Scan statistics in the JSON report.
#[derive(Debug, Clone, Serialize)]
pub struct JsonSummary {
    /// Regular files reached by the walk
    pub files_visited: usize,
    /// Files fingerprinted successfully
    pub files_hashed: usize,
    /// Bytes read while fingerprinting
    pub bytes_hashed: u64,
    /// Directories skipped because they are excluded
    pub dirs_pruned: usize,
    /// Files skipped because they are excluded
    pub files_excluded: usize,
    /// Files and directory entries skipped because they could not be read
    pub unreadable_files: usize,
    /// Groups of two or more identical files
    pub duplicate_groups: usize,
    /// Copies beyond the first, summed over all groups
    pub duplicate_files: usize,
    /// Bytes freed by keeping one copy per group
    pub reclaimable_space: u64,
    /// Wall-clock scan time in milliseconds
    pub scan_duration_ms: u64,
    /// Whether the scan was stopped by Ctrl+C
    pub interrupted: bool,
}

impl From<&ScanSummary> for JsonSummary {
    fn from(summary: &ScanSummary) -> Self {
        Self {
            files_visited: summary.files_visited,
            files_hashed: summary.files_hashed,
            bytes_hashed: summary.bytes_hashed,
            dirs_pruned: summary.dirs_pruned,
            files_excluded: summary.files_excluded,
            unreadable_files: summary.unreadable_files(),
            duplicate_groups: summary.duplicate_groups,
            duplicate_files: summary.duplicate_files,
            reclaimable_space: summary.reclaimable_space,
            scan_duration_ms: u64::try_from(summary.scan_duration.as_millis())
                .unwrap_or(u64::MAX),
            interrupted: summary.interrupted,
        }
    }
}

/// Complete JSON report: every duplicate group followed by the scan summary.
#[derive(Debug, Clone, Serialize)]
pub struct JsonReport {
    /// Duplicate groups in first-seen order
    pub duplicates: Vec<JsonGroup>,
    /// Totals for the whole scan
    pub summary: JsonSummary,
}

impl JsonReport {
    /// Build a report from finalized groups and the summary of the same scan.
    #[must_use]
    pub fn new(groups: &[DuplicateGroup], summary: &ScanSummary) -> Self {
        Self {
            duplicates: groups.iter().map(JsonGroup::from).collect(),
            summary: JsonSummary::from(summary),
        }
    }

    /// Serialize to a pretty-printed string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
