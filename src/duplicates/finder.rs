//! Duplicate finder: one pass of walk, hash and record.
//!
//! # Overview
//!
//! [`DuplicateFinder`] drives a single run:
//!
//! ```text
//! Idle -> Scanning -> (per file) Hashing -> Recording -> Scanning ... -> Finalizing -> Done
//! ```
//!
//! The walker yields one file at a time; each file is fully hashed and
//! recorded before the next one is visited. A file that cannot be read is
//! logged, counted in [`ScanSummary`] and left out of every group. The finder
//! is consumed by [`DuplicateFinder::find_duplicates`], so a finished run can
//! never be re-entered.
//!
//! # Example
//!
//! ```no_run
//! use hashdupe::duplicates::{DuplicateFinder, FinderConfig};
//! use hashdupe::scanner::ExclusionSet;
//! use std::path::Path;
//!
//! let finder = DuplicateFinder::new(FinderConfig::default(), ExclusionSet::defaults());
//! let (groups, summary) = finder.find_duplicates(Path::new(".")).unwrap();
//!
//! println!("{} duplicate groups, {} unreadable files", groups.len(), summary.unreadable_files());
//! ```

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use bytesize::ByteSize;

use super::groups::{DuplicateGroup, FingerprintIndex};
use crate::error::ConfigError;
use crate::progress::ScanObserver;
use crate::scanner::{ExclusionSet, Hasher, ReadError, Walker, WalkerConfig, CHUNK_SIZE};

/// Configuration for a duplicate scan.
#[derive(Clone, Default)]
pub struct FinderConfig {
    /// Directory walking options
    pub walker_config: WalkerConfig,
    /// Read chunk size for fingerprinting (defaults to 64 KiB)
    pub chunk_size: Option<usize>,
    /// Optional shutdown flag for graceful termination
    pub shutdown_flag: Option<Arc<AtomicBool>>,
    /// Optional progress observer
    pub observer: Option<Arc<dyn ScanObserver>>,
}

impl std::fmt::Debug for FinderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinderConfig")
            .field("walker_config", &self.walker_config)
            .field("chunk_size", &self.chunk_size)
            .field("shutdown_flag", &self.shutdown_flag)
            .field("observer", &self.observer.as_ref().map(|_| "<observer>"))
            .finish()
    }
}

impl FinderConfig {
    /// Set the walker configuration.
    #[must_use]
    pub fn with_walker_config(mut self, config: WalkerConfig) -> Self {
        self.walker_config = config;
        self
    }

    /// Set the fingerprint chunk size.
    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = Some(chunk_size);
        self
    }

    /// Set the shutdown flag for graceful termination.
    #[must_use]
    pub fn with_shutdown_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.shutdown_flag = Some(flag);
        self
    }

    /// Set the progress observer.
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn ScanObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    fn is_shutdown_requested(&self) -> bool {
        self.shutdown_flag
            .as_ref()
            .is_some_and(|f| f.load(Ordering::SeqCst))
    }
}

/// Phase of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// Constructed, nothing done yet
    Idle,
    /// Waiting for the walker to yield the next file
    Scanning,
    /// Reading and hashing one file
    Hashing,
    /// Folding one fingerprint into the index
    Recording,
    /// Filtering the index down to duplicate groups
    Finalizing,
    /// Terminal; the grouping is available
    Done,
}

impl ScanState {
    /// Whether moving from `self` to `next` is a legal step.
    #[must_use]
    pub fn can_transition(self, next: ScanState) -> bool {
        use ScanState::{Done, Finalizing, Hashing, Idle, Recording, Scanning};

        matches!(
            (self, next),
            (Idle, Scanning)
                | (Scanning, Hashing)
                | (Hashing, Recording)
                | (Hashing, Scanning)
                | (Recording, Scanning)
                | (Scanning, Finalizing)
                | (Finalizing, Done)
        )
    }
}

/// Tracks the current [`ScanState`] and rejects illegal steps.
#[derive(Debug)]
struct StateMachine {
    state: ScanState,
}

impl StateMachine {
    fn new() -> Self {
        Self {
            state: ScanState::Idle,
        }
    }

    fn advance(&mut self, next: ScanState) {
        debug_assert!(
            self.state.can_transition(next),
            "illegal scan transition {:?} -> {:?}",
            self.state,
            next
        );
        self.state = next;
    }
}

/// Summary statistics from a duplicate scan.
#[derive(Debug, Default)]
pub struct ScanSummary {
    /// Regular files handed to the fingerprinter
    pub files_visited: usize,
    /// Files fingerprinted successfully
    pub files_hashed: usize,
    /// Bytes read while fingerprinting
    pub bytes_hashed: u64,
    /// Excluded directories that were never entered
    pub dirs_pruned: usize,
    /// Files skipped because they are excluded themselves
    pub files_excluded: usize,
    /// Files that could not be fingerprinted
    pub read_errors: Vec<ReadError>,
    /// Directory entries that could not be listed or inspected
    pub traversal_errors: Vec<ReadError>,
    /// Number of duplicate groups
    pub duplicate_groups: usize,
    /// Copies beyond the first, summed over all groups
    pub duplicate_files: usize,
    /// Bytes that removing the extra copies would free
    pub reclaimable_space: u64,
    /// Wall-clock duration of the run
    pub scan_duration: Duration,
    /// Whether the run stopped early on Ctrl+C
    pub interrupted: bool,
}

impl ScanSummary {
    /// Files and entries skipped because they could not be read.
    #[must_use]
    pub fn unreadable_files(&self) -> usize {
        self.read_errors.len() + self.traversal_errors.len()
    }

    /// Whether any non-fatal error occurred.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.unreadable_files() > 0
    }

    /// Reclaimable space as a human-readable string.
    #[must_use]
    pub fn reclaimable_display(&self) -> String {
        ByteSize(self.reclaimable_space).to_string()
    }

    /// Bytes hashed as a human-readable string.
    #[must_use]
    pub fn bytes_hashed_display(&self) -> String {
        ByteSize(self.bytes_hashed).to_string()
    }
}

/// Errors that can occur during duplicate finding.
#[derive(thiserror::Error, Debug)]
pub enum FinderError {
    /// The run could not start.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Single-use duplicate finder.
#[derive(Debug)]
pub struct DuplicateFinder {
    config: FinderConfig,
    exclusions: ExclusionSet,
    hasher: Hasher,
}

impl DuplicateFinder {
    /// Create a finder that skips everything in `exclusions`.
    #[must_use]
    pub fn new(config: FinderConfig, exclusions: ExclusionSet) -> Self {
        let hasher = Hasher::new().with_chunk_size(config.chunk_size.unwrap_or(CHUNK_SIZE));

        Self {
            config,
            exclusions,
            hasher,
        }
    }

    /// Create a finder with default configuration and no exclusions.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(FinderConfig::default(), ExclusionSet::empty())
    }

    /// Scan `root` once and return its duplicate groups.
    ///
    /// An interrupted run still returns the groups found so far, with
    /// [`ScanSummary::interrupted`] set.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError::Config`] before any hashing if `root` does not
    /// exist or is not a directory.
    pub fn find_duplicates(
        self,
        root: &Path,
    ) -> Result<(Vec<DuplicateGroup>, ScanSummary), FinderError> {
        let start_time = Instant::now();
        let mut machine = StateMachine::new();
        let mut summary = ScanSummary::default();
        let mut index = FingerprintIndex::new();

        let mut walker = Walker::new(root, &self.exclusions, self.config.walker_config.clone());
        if let Some(ref flag) = self.config.shutdown_flag {
            walker = walker.with_shutdown_flag(flag.clone());
        }
        if let Some(ref observer) = self.config.observer {
            walker = walker.with_observer(observer.clone());
        }

        // Validate before touching the observer so a bad root does no work.
        let resolved_root = walker.resolve_root().map_err(ConfigError::from)?;
        log::info!("Scanning {} for duplicate files", resolved_root.display());

        if let Some(ref observer) = self.config.observer {
            observer.on_scan_start(&resolved_root);
        }
        machine.advance(ScanState::Scanning);

        let hasher = &self.hasher;
        let read_errors = &mut summary.read_errors;
        let mut files_hashed = 0usize;
        let mut bytes_hashed = 0u64;

        let walk_result = walker.walk(|mut record| {
            machine.advance(ScanState::Hashing);
            match hasher.fingerprint(&record.path) {
                Ok(hashed) => {
                    machine.advance(ScanState::Recording);
                    files_hashed += 1;
                    bytes_hashed += hashed.bytes_read;
                    record.size = hashed.bytes_read;
                    index.record(hashed.fingerprint, record);
                }
                Err(e) => {
                    log::warn!("Skipping unreadable file: {}", e);
                    read_errors.push(e);
                }
            }
            machine.advance(ScanState::Scanning);
        });

        let walk_stats = match walk_result {
            Ok(stats) => stats,
            Err(e) => {
                if let Some(ref observer) = self.config.observer {
                    observer.on_scan_end(0);
                }
                return Err(ConfigError::from(e).into());
            }
        };

        if let Some(ref observer) = self.config.observer {
            observer.on_scan_end(walk_stats.files_visited);
        }

        summary.files_visited = walk_stats.files_visited;
        summary.files_hashed = files_hashed;
        summary.bytes_hashed = bytes_hashed;
        summary.dirs_pruned = walk_stats.dirs_pruned;
        summary.files_excluded = walk_stats.files_excluded;
        summary.traversal_errors = walk_stats.errors;
        summary.interrupted = walk_stats.interrupted || self.config.is_shutdown_requested();

        machine.advance(ScanState::Finalizing);
        let groups = index.finalize();

        summary.duplicate_groups = groups.len();
        summary.duplicate_files = groups.iter().map(DuplicateGroup::duplicate_count).sum();
        summary.reclaimable_space = groups.iter().map(DuplicateGroup::reclaimable_space).sum();
        summary.scan_duration = start_time.elapsed();

        machine.advance(ScanState::Done);
        log::debug!(
            "Scan finished in {:.2?}: {} files, {} groups",
            summary.scan_duration,
            summary.files_visited,
            summary.duplicate_groups
        );

        Ok((groups, summary))
    }
}
