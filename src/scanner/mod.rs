//! Scanner module for directory traversal and file fingerprinting.
//!
//! This module provides functionality for:
//! - Single-pass directory walking with subtree pruning
//! - Streaming SHA-256 content fingerprints
//! - Exclusion of system and volatile paths
//! - Unicode path normalization
//!
//! # Architecture
//!
//! The scanner is divided into submodules:
//! - [`exclusion`]: The immutable set of paths never scanned
//! - [`hasher`]: SHA-256 file fingerprinting (streaming, bounded memory)
//! - [`walker`]: Directory traversal and file discovery
//! - [`path_utils`]: NFC normalization used for path comparison
//!
//! # Example
//!
//! ```no_run
//! use hashdupe::scanner::{ExclusionSet, Hasher, Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let exclusions = ExclusionSet::build(None);
//! let hasher = Hasher::new();
//! let walker = Walker::new(Path::new("."), &exclusions, WalkerConfig::default());
//!
//! let stats = walker
//!     .walk(|record| match hasher.fingerprint(&record.path) {
//!         Ok(hashed) => println!("{}  {}", hashed.fingerprint, record.path.display()),
//!         Err(e) => eprintln!("Warning: {e}"),
//!     })
//!     .unwrap();
//! println!("{} files visited", stats.files_visited);
//! ```

pub mod exclusion;
pub mod hasher;
pub mod path_utils;
pub mod walker;

use std::path::PathBuf;

// Re-export main types
pub use exclusion::ExclusionSet;
pub use hasher::{Fingerprint, Hashed, Hasher, CHUNK_SIZE};
pub use walker::{WalkStats, Walker};

/// A regular file discovered during traversal.
///
/// Records are created by the walker and handed straight to the visitor;
/// nothing retains them once a fingerprint has been produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Absolute path to the file
    pub path: PathBuf,
    /// File size in bytes at discovery, replaced by the hashed byte count
    /// once the finder has read the file
    pub size: u64,
}

impl FileRecord {
    /// Create a new FileRecord.
    #[must_use]
    pub fn new(path: PathBuf, size: u64) -> Self {
        Self { path, size }
    }
}

/// Configuration for directory walking.
#[derive(Debug, Clone, Default)]
pub struct WalkerConfig {
    /// Follow symbolic links during traversal.
    ///
    /// When disabled, links are skipped entirely. When enabled, walkdir's
    /// loop detection reports cycles and each resolved file is visited once.
    pub follow_symlinks: bool,
}

impl WalkerConfig {
    /// Create a new configuration.
    #[must_use]
    pub fn new(follow_symlinks: bool) -> Self {
        Self { follow_symlinks }
    }
}

/// Fatal errors that prevent a walk from starting.
#[derive(thiserror::Error, Debug)]
pub enum WalkError {
    /// The root path was not found.
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// The root path is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// The root path exists but could not be resolved.
    #[error("Cannot access {path}: {source}")]
    Inaccessible {
        /// The root as given
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Per-entry failure while reading a file or listing a directory.
///
/// These never abort a scan: the entry is skipped, a warning is logged and
/// the error is collected for the post-run summary.
#[derive(thiserror::Error, Debug)]
pub enum ReadError {
    /// The file vanished between discovery and reading.
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// Permission was denied when reading the entry.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// Any other I/O error.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl ReadError {
    /// Classify an I/O error for the given path.
    #[must_use]
    pub fn from_io(path: PathBuf, error: std::io::Error) -> Self {
        use std::io::ErrorKind;

        match error.kind() {
            ErrorKind::NotFound => Self::NotFound(path),
            ErrorKind::PermissionDenied => Self::PermissionDenied(path),
            _ => Self::Io {
                path,
                source: error,
            },
        }
    }

    /// Path of the entry that failed.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::NotFound(path) | Self::PermissionDenied(path) => path,
            Self::Io { path, .. } => path,
        }
    }
}
