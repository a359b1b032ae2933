//! Configuration errors and process exit codes.

use std::path::PathBuf;

use crate::scanner::WalkError;

/// Exit codes for the hashdupe binary.
///
/// - 0: Success (scan completed; duplicates may or may not have been found)
/// - 1: General error (including failure to write the report)
/// - 2: Configuration error (root directory missing or not a directory)
/// - 3: Partial success (completed, but some files could not be read)
/// - 130: Interrupted by user (Ctrl+C)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Scan completed without unreadable files.
    Success = 0,
    /// An unexpected error occurred.
    GeneralError = 1,
    /// The run could not start because of its configuration.
    ConfigError = 2,
    /// Scan completed but skipped unreadable files.
    PartialSuccess = 3,
    /// Scan was interrupted by Ctrl+C.
    Interrupted = 130,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the machine-readable code prefix.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "HD000",
            Self::GeneralError => "HD001",
            Self::ConfigError => "HD002",
            Self::PartialSuccess => "HD003",
            Self::Interrupted => "HD130",
        }
    }
}

/// Problems with the run's inputs.
///
/// A bad root is fatal and reported before any scanning. An unreadable
/// exclusion file or config file is recoverable: the caller logs it and
/// falls back to defaults.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// The root directory cannot be scanned.
    #[error(transparent)]
    Root(#[from] WalkError),

    /// The exclusion list file cannot be read.
    #[error("Cannot read exclusion file {path}: {source}")]
    ExcludeFile {
        /// The list file as given
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The configuration file or environment is malformed.
    #[error("Invalid configuration: {0}")]
    Settings(#[from] Box<figment::Error>),
}
