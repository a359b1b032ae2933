//! Report writers for duplicate scan results.
//!
//! - [`text`]: the timestamped plain-text report (default)
//! - [`json`]: a JSON document for automation
//!
//! [`write_report`] picks the format and writes the whole report to a file.
//! It is only called when at least one duplicate group exists.
//!
//! # Example
//!
//! ```no_run
//! use hashdupe::cli::ReportFormat;
//! use hashdupe::duplicates::DuplicateFinder;
//! use hashdupe::output::write_report;
//! use std::path::Path;
//!
//! let (groups, summary) = DuplicateFinder::with_defaults()
//!     .find_duplicates(Path::new("."))
//!     .unwrap();
//! if !groups.is_empty() {
//!     write_report(Path::new("duplicates.txt"), &groups, &summary, ReportFormat::Text).unwrap();
//! }
//! ```

pub mod json;
pub mod text;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::cli::ReportFormat;
use crate::duplicates::{DuplicateGroup, ScanSummary};

pub use json::JsonReport;
pub use text::TextReport;

/// Failure to produce the report file.
///
/// The grouping itself stays valid; only the report is lost.
#[derive(thiserror::Error, Debug)]
pub enum WriteError {
    /// The report file could not be created or written.
    #[error("Cannot write report to {path}: {source}")]
    Io {
        /// Report destination
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The JSON document could not be serialized.
    #[error("Cannot serialize JSON report: {0}")]
    Json(#[from] serde_json::Error),
}

/// Write all `groups` to `path` in the given format, replacing any existing file.
///
/// # Errors
///
/// Returns [`WriteError`] if the file cannot be created or written.
pub fn write_report(
    path: &Path,
    groups: &[DuplicateGroup],
    summary: &ScanSummary,
    format: ReportFormat,
) -> Result<(), WriteError> {
    let io_error = |source: std::io::Error| WriteError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_error)?;
    let mut writer = BufWriter::new(file);

    match format {
        ReportFormat::Text => TextReport::new(groups)
            .write_to(&mut writer)
            .map_err(io_error)?,
        ReportFormat::Json => {
            let report = JsonReport::new(groups, summary);
            serde_json::to_writer_pretty(&mut writer, &report)?;
            writer.write_all(b"\n").map_err(io_error)?;
        }
    }

    writer.flush().map_err(io_error)?;
    log::debug!("Report written to {}", path.display());
    Ok(())
}
