//! Duplicate detection module.
//!
//! This module provides functionality for:
//! - Accumulating fingerprints into an ordered index
//! - Filtering the index down to duplicate groups
//! - Driving a single scan from walk to final grouping

pub mod finder;
pub mod groups;

pub use finder::{DuplicateFinder, FinderConfig, FinderError, ScanState, ScanSummary};
pub use groups::{DuplicateGroup, FingerprintIndex};
