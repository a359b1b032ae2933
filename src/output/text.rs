//! Plain-text report.
//!
//! ```text
//! --- Duplicates with hash: 9f86d081884c7d65... ---
//! 2024-05-01T10:15:02.123456 | Duplicate file: /home/me/a.txt
//! 2024-05-01T10:15:02.123490 | Duplicate file: /home/me/copy/a.txt
//!
//! ```
//!
//! Each file line carries the local time at which it was written.

use std::io::{self, Write};
use std::path::Path;

use chrono::{DateTime, Local};

use crate::duplicates::DuplicateGroup;

/// Timestamp layout for report lines, microsecond precision.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Text report over a slice of duplicate groups.
#[derive(Debug, Clone, Copy)]
pub struct TextReport<'a> {
    groups: &'a [DuplicateGroup],
}

impl<'a> TextReport<'a> {
    /// Create a report over `groups`, written in the order given.
    #[must_use]
    pub fn new(groups: &'a [DuplicateGroup]) -> Self {
        Self { groups }
    }

    /// Write every group, stamping each file line with the current local time.
    ///
    /// # Errors
    ///
    /// Returns any error from the underlying writer.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        self.write_with_clock(writer, Local::now)
    }

    fn write_with_clock<W, C>(&self, writer: &mut W, mut clock: C) -> io::Result<()>
    where
        W: Write,
        C: FnMut() -> DateTime<Local>,
    {
        for group in self.groups {
            writeln!(writer, "{}", header_line(group))?;
            for path in &group.files {
                writeln!(writer, "{}", file_line(&clock(), path))?;
            }
            writeln!(writer)?;
        }
        Ok(())
    }
}

fn header_line(group: &DuplicateGroup) -> String {
    format!("--- Duplicates with hash: {} ---", group.fingerprint)
}

fn file_line(timestamp: &DateTime<Local>, path: &Path) -> String {
    format!(
        "{} | Duplicate file: {}",
        timestamp.format(TIMESTAMP_FORMAT),
        path.display()
    )
}
