//! The set of paths that are never scanned.
//!
//! An [`ExclusionSet`] is built once at startup, either from a user-supplied
//! list file or from a built-in list of system and volatile locations, and is
//! read-only afterwards. Every member is canonicalized (symlinks resolved,
//! no relative segments) and NFC-normalized so that [`ExclusionSet::is_excluded`]
//! can compare resolved paths component by component.
//!
//! # List file format
//!
//! One path per line. Surrounding whitespace is trimmed, blank lines and
//! lines starting with `#` are ignored. Entries may name directories or
//! single files such as swap files.
//!
//! # Example
//!
//! ```no_run
//! use hashdupe::scanner::ExclusionSet;
//! use std::path::Path;
//!
//! let set = ExclusionSet::build(Some(Path::new("exclude.txt")));
//! if set.is_excluded(Path::new("/proc/self")) {
//!     println!("skipping");
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use super::path_utils::{is_within, normalize_pathbuf};
use crate::error::ConfigError;

/// Immutable, ordered collection of resolved paths to skip.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    members: Vec<PathBuf>,
}

/// Which list an entry came from; decides how loudly a bad entry is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    User,
    BuiltIn,
}

impl ExclusionSet {
    /// An exclusion set with no members.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build the set from an optional list file.
    ///
    /// Falls back to [`ExclusionSet::defaults`] when no file is given or the
    /// file cannot be read. Neither case is fatal; the fallback is logged.
    #[must_use]
    pub fn build(source: Option<&Path>) -> Self {
        let Some(path) = source else {
            log::info!("No exclusion file provided, using the default exclusion list");
            return Self::defaults();
        };

        match load_list(path) {
            Ok(entries) => {
                log::info!(
                    "Loaded {} exclusion entries from {}",
                    entries.len(),
                    path.display()
                );
                Self::resolve(entries, Origin::User)
            }
            Err(e) => {
                log::warn!("{}. Using the default exclusion list", e);
                Self::defaults()
            }
        }
    }

    /// Build the set from explicit paths, dropping any that fail to resolve.
    #[must_use]
    pub fn from_paths<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self::resolve(paths.into_iter().map(Into::into), Origin::User)
    }

    /// The built-in list, restricted to entries that exist on this machine.
    #[must_use]
    pub fn defaults() -> Self {
        Self::resolve(default_paths(), Origin::BuiltIn)
    }

    fn resolve<I>(entries: I, origin: Origin) -> Self
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let mut members: Vec<PathBuf> = Vec::new();

        for entry in entries {
            match fs::canonicalize(&entry) {
                Ok(resolved) => {
                    let resolved = normalize_pathbuf(&resolved);
                    if !members.contains(&resolved) {
                        log::debug!("Excluding {}", resolved.display());
                        members.push(resolved);
                    }
                }
                Err(e) => match origin {
                    Origin::User => {
                        log::warn!("Ignoring exclusion entry {}: {}", entry.display(), e);
                    }
                    Origin::BuiltIn => {
                        log::debug!("Default exclusion {} not present: {}", entry.display(), e);
                    }
                },
            }
        }

        Self { members }
    }

    /// True iff `path` equals, or descends from, a member of the set.
    ///
    /// `path` is expected to be already resolved; it is NFC-normalized here.
    #[must_use]
    pub fn is_excluded(&self, path: &Path) -> bool {
        self.members.iter().any(|member| is_within(path, member))
    }

    /// Number of resolved members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Check if the set has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Iterate over the resolved members in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.members.iter().map(PathBuf::as_path)
    }
}

/// Read and parse an exclusion list file.
///
/// # Errors
///
/// Returns [`ConfigError::ExcludeFile`] if the file is missing, unreadable
/// or not UTF-8.
pub fn load_list(path: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::ExcludeFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_list(&content))
}

/// Parse exclusion list content into raw (unresolved) paths.
#[must_use]
pub fn parse_list(content: &str) -> Vec<PathBuf> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(PathBuf::from)
        .collect()
}

/// Built-in system and volatile locations for the current platform.
#[must_use]
pub fn default_paths() -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = platform_defaults().iter().map(PathBuf::from).collect();

    if let Some(trash) = user_trash_dir() {
        paths.push(trash);
    }

    paths
}

#[cfg(windows)]
fn platform_defaults() -> &'static [&'static str] {
    &[
        "C:\\Windows",
        "C:\\Program Files",
        "C:\\Program Files (x86)",
        "C:\\$Recycle.Bin",
        "C:\\hiberfil.sys",
        "C:\\pagefile.sys",
        "C:\\swapfile.sys",
        "C:\\DumpStack.log.tmp",
    ]
}

#[cfg(target_os = "macos")]
fn platform_defaults() -> &'static [&'static str] {
    &[
        "/System",
        "/private/var/vm",
        "/.Trashes",
        "/.Spotlight-V100",
        "/.fseventsd",
        "/dev",
    ]
}

#[cfg(all(unix, not(target_os = "macos")))]
fn platform_defaults() -> &'static [&'static str] {
    &["/proc", "/sys", "/dev", "/run", "/swapfile", "/lost+found"]
}

#[cfg(not(any(unix, windows)))]
fn platform_defaults() -> &'static [&'static str] {
    &[]
}

/// The current user's trash directory, if it can be determined.
fn user_trash_dir() -> Option<PathBuf> {
    let dirs = directories::BaseDirs::new()?;

    if cfg!(target_os = "macos") {
        Some(dirs.home_dir().join(".Trash"))
    } else if cfg!(windows) {
        // Covered by the per-volume $Recycle.Bin entry.
        None
    } else {
        Some(dirs.data_local_dir().join("Trash"))
    }
}
