//! Fingerprint index and duplicate groups.
//!
//! # Overview
//!
//! [`FingerprintIndex`] accumulates `fingerprint -> paths` during the single
//! traversal pass. Paths keep their discovery order within a fingerprint, and
//! fingerprints keep the order in which they were first seen, so the final
//! report is deterministic for a given tree.
//!
//! # Example
//!
//! ```
//! use hashdupe::duplicates::FingerprintIndex;
//! use hashdupe::scanner::{FileRecord, Hasher};
//! use std::path::PathBuf;
//!
//! let hasher = Hasher::new();
//! let same = hasher.fingerprint_reader(&b"same"[..]).unwrap().fingerprint;
//! let other = hasher.fingerprint_reader(&b"other"[..]).unwrap().fingerprint;
//!
//! let mut index = FingerprintIndex::new();
//! index.record(same, FileRecord::new(PathBuf::from("/a.txt"), 4));
//! index.record(other, FileRecord::new(PathBuf::from("/b.txt"), 5));
//! index.record(same, FileRecord::new(PathBuf::from("/c.txt"), 4));
//!
//! let groups = index.finalize();
//! assert_eq!(groups.len(), 1);
//! assert_eq!(groups[0].files, vec![PathBuf::from("/a.txt"), PathBuf::from("/c.txt")]);
//! ```

use std::collections::HashMap;
use std::path::PathBuf;

use crate::scanner::{FileRecord, Fingerprint};

/// Two or more distinct files sharing one fingerprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateGroup {
    /// SHA-256 fingerprint shared by every file in the group
    pub fingerprint: Fingerprint,
    /// Size in bytes of each file (identical content implies identical size)
    pub size: u64,
    /// Absolute paths in discovery order
    pub files: Vec<PathBuf>,
}

impl DuplicateGroup {
    /// Number of files in this group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if this group is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Copies beyond the first.
    #[must_use]
    pub fn duplicate_count(&self) -> usize {
        self.files.len().saturating_sub(1)
    }

    /// Bytes that removing every copy but one would free.
    #[must_use]
    pub fn reclaimable_space(&self) -> u64 {
        self.size * self.duplicate_count() as u64
    }
}

/// Fingerprint to path-list mapping built during a scan.
#[derive(Debug, Default)]
pub struct FingerprintIndex {
    /// Position of each fingerprint in `entries`
    positions: HashMap<Fingerprint, usize>,
    /// Entries in first-seen order
    entries: Vec<DuplicateGroup>,
    /// Total paths recorded
    recorded: usize,
}

impl FingerprintIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `record` to the list for `fingerprint`, keeping discovery order.
    ///
    /// Each file must be recorded at most once; the walker guarantees this.
    pub fn record(&mut self, fingerprint: Fingerprint, record: FileRecord) {
        self.recorded += 1;

        match self.positions.get(&fingerprint) {
            Some(&pos) => {
                let entry = &mut self.entries[pos];
                debug_assert!(
                    !entry.files.contains(&record.path),
                    "{} recorded twice",
                    record.path.display()
                );
                entry.files.push(record.path);
            }
            None => {
                self.positions.insert(fingerprint, self.entries.len());
                self.entries.push(DuplicateGroup {
                    fingerprint,
                    size: record.size,
                    files: vec![record.path],
                });
            }
        }
    }

    /// Total number of paths recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.recorded
    }

    /// Check if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recorded == 0
    }

    /// Number of distinct fingerprints seen.
    #[must_use]
    pub fn unique_fingerprints(&self) -> usize {
        self.entries.len()
    }

    /// Keep only fingerprints shared by two or more files.
    ///
    /// Groups come back in the order their fingerprint was first seen.
    #[must_use]
    pub fn finalize(self) -> Vec<DuplicateGroup> {
        self.entries
            .into_iter()
            .filter(|group| group.len() >= 2)
            .collect()
    }
}
