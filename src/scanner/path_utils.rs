//! Path normalization and hierarchy comparison.
//!
//! Exclusion matching compares resolved paths component by component.
//! Before comparing, both sides are converted to Unicode NFC, because macOS
//! reports names in NFD while exclusion files are usually typed in NFC:
//!
//! - NFC: `café` - 'é' is U+00E9 (single code point)
//! - NFD: `café` - 'e' U+0065 + combining acute accent U+0301
//!
//! # Example
//!
//! ```
//! use hashdupe::scanner::path_utils::is_within;
//! use std::path::Path;
//!
//! assert!(is_within(Path::new("/var/log/syslog"), Path::new("/var")));
//! assert!(!is_within(Path::new("/var2/data"), Path::new("/var")));
//! assert!(is_within(Path::new("/data/cafe\u{0301}/x"), Path::new("/data/café")));
//! ```

use std::borrow::Cow;
use std::path::{Path, PathBuf};
use unicode_normalization::UnicodeNormalization;

/// Normalize a [`Path`] to NFC form.
///
/// Paths that are not valid UTF-8 cannot be normalized and are returned
/// unchanged; they still compare correctly against byte-identical paths.
#[must_use]
pub fn normalize_path(path: &Path) -> Cow<'_, Path> {
    match path.to_str() {
        Some(s) if !unicode_normalization::is_nfc(s) => {
            Cow::Owned(PathBuf::from(s.nfc().collect::<String>()))
        }
        _ => Cow::Borrowed(path),
    }
}

/// Owned variant of [`normalize_path`].
#[must_use]
pub fn normalize_pathbuf(path: &Path) -> PathBuf {
    normalize_path(path).into_owned()
}

/// Check whether `path` equals `ancestor` or lies beneath it.
///
/// Comparison is by path component, never by string prefix, so `/var2` is
/// not within `/var`. Both sides are NFC-normalized first.
#[must_use]
pub fn is_within(path: &Path, ancestor: &Path) -> bool {
    normalize_path(path).starts_with(normalize_path(ancestor))
}
