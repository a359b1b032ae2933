//! Command-line interface definitions for hashdupe.
//!
//! # Example
//!
//! ```bash
//! # Scan the current directory, report to duplicates.txt
//! hashdupe
//!
//! # Scan a drive with a custom exclusion list and report file
//! hashdupe -d /mnt/data -e exclude.txt -o /tmp/dupes.txt
//!
//! # JSON report, debug logging
//! hashdupe -v -d ~/Pictures --format json -o dupes.json
//! ```

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Find duplicate files by SHA-256 content fingerprint.
///
/// Scans a directory tree once, skipping excluded system directories
/// without entering them, and reports every set of files with identical
/// content.
#[derive(Debug, Parser)]
#[command(name = "hashdupe")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR")]
    pub no_color: bool,

    /// Root directory to scan
    #[arg(short, long, value_name = "PATH", default_value = ".")]
    pub directory: PathBuf,

    /// File listing directories to exclude, one per line
    ///
    /// If missing or unreadable, the built-in list of system directories is used.
    #[arg(short, long, value_name = "FILE")]
    pub exclude_file: Option<PathBuf>,

    /// Report file to write [default: duplicates.txt]
    #[arg(short, long, value_name = "FILE")]
    pub output_file: Option<PathBuf>,

    /// Report format [default: text]
    #[arg(long, value_enum)]
    pub format: Option<ReportFormat>,

    /// Follow symbolic links during the scan
    ///
    /// Cycles are detected and each file is hashed at most once.
    #[arg(long)]
    pub follow_symlinks: bool,

    /// Do not show the progress spinner
    #[arg(long)]
    pub no_progress: bool,

    /// Configuration file to use instead of the platform default
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Format of the duplicate report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Timestamped plain-text report
    #[default]
    Text,
    /// JSON document with groups and scan summary
    Json,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Text => write!(f, "text"),
            ReportFormat::Json => write!(f, "json"),
        }
    }
}
