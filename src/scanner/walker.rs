//! Single-pass directory walker with subtree pruning.
//!
//! # Overview
//!
//! [`Walker`] traverses a directory tree exactly once, depth first, using
//! [`walkdir`]. Before entering any subdirectory it asks the
//! [`ExclusionSet`] whether the resolved directory is excluded; excluded
//! subtrees are pruned through `filter_entry` and never listed, so the work
//! done is proportional to the non-excluded part of the tree.
//!
//! Every regular file whose resolved path is not excluded is handed to the
//! caller's visitor as a [`FileRecord`]. Entries that cannot be read are
//! logged, collected in [`WalkStats::errors`] and skipped.
//!
//! # Symbolic links
//!
//! - Default: links are skipped, so every visited path is already resolved
//!   under the canonical root and no cycle can form.
//! - `follow_symlinks`: walkdir reports loops back to an ancestor as errors,
//!   and each canonical file path is visited at most once.
//!
//! # Example
//!
//! ```no_run
//! use hashdupe::scanner::{ExclusionSet, Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let exclusions = ExclusionSet::defaults();
//! let walker = Walker::new(Path::new("/home/user"), &exclusions, WalkerConfig::default());
//!
//! let mut files = Vec::new();
//! let stats = walker.walk(|record| files.push(record.path)).unwrap();
//! assert_eq!(stats.files_visited, files.len());
//! ```

use std::cell::Cell;
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use walkdir::{DirEntry, WalkDir};

use super::{ExclusionSet, FileRecord, ReadError, WalkError, WalkerConfig};
use crate::progress::ScanObserver;

/// Counters and non-fatal errors from one traversal.
#[derive(Debug, Default)]
pub struct WalkStats {
    /// Regular files passed to the visitor
    pub files_visited: usize,
    /// Directories skipped because they are excluded (not entered)
    pub dirs_pruned: usize,
    /// Files skipped because they are excluded themselves
    pub files_excluded: usize,
    /// Entries that could not be listed or inspected
    pub errors: Vec<ReadError>,
    /// Whether the walk stopped early on a shutdown request
    pub interrupted: bool,
}

/// Directory walker for single-threaded file discovery.
pub struct Walker<'a> {
    /// Root path as given by the caller
    root: PathBuf,
    /// Paths that must never be entered or visited
    exclusions: &'a ExclusionSet,
    /// Walker configuration
    config: WalkerConfig,
    /// Optional shutdown flag, checked between entries
    shutdown_flag: Option<Arc<AtomicBool>>,
    /// Optional observer for the visited-file count
    observer: Option<Arc<dyn ScanObserver>>,
}

impl std::fmt::Debug for Walker<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Walker")
            .field("root", &self.root)
            .field("exclusions", &self.exclusions.len())
            .field("config", &self.config)
            .field("shutdown_flag", &self.shutdown_flag)
            .field("observer", &self.observer.as_ref().map(|_| "<observer>"))
            .finish()
    }
}

impl<'a> Walker<'a> {
    /// Create a new walker for the given root.
    #[must_use]
    pub fn new(root: &Path, exclusions: &'a ExclusionSet, config: WalkerConfig) -> Self {
        Self {
            root: root.to_path_buf(),
            exclusions,
            config,
            shutdown_flag: None,
            observer: None,
        }
    }

    /// Set the shutdown flag for graceful termination.
    ///
    /// The flag is checked before each entry, never while a file is being
    /// processed by the visitor.
    #[must_use]
    pub fn with_shutdown_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.shutdown_flag = Some(flag);
        self
    }

    /// Report the visited-file count to `observer`.
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

    /// Validate and canonicalize the root directory.
    ///
    /// # Errors
    ///
    /// Returns [`WalkError`] if the root does not exist, cannot be resolved,
    /// or is not a directory.
    pub fn resolve_root(&self) -> Result<PathBuf, WalkError> {
        let resolved = fs::canonicalize(&self.root).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => WalkError::NotFound(self.root.clone()),
            _ => WalkError::Inaccessible {
                path: self.root.clone(),
                source: e,
            },
        })?;

        if !resolved.is_dir() {
            return Err(WalkError::NotADirectory(self.root.clone()));
        }

        Ok(resolved)
    }

    /// Resolve an entry's path for exclusion checks and reporting.
    ///
    /// Without link following nothing below the canonical root can contain a
    /// link, so the entry path is already resolved.
    fn resolved_path(&self, entry: &DirEntry) -> io::Result<PathBuf> {
        if self.config.follow_symlinks {
            fs::canonicalize(entry.path())
        } else {
            Ok(entry.path().to_path_buf())
        }
    }

    /// Pruning hook: decide whether to descend into a directory entry.
    fn should_descend(&self, entry: &DirEntry, pruned: &Cell<usize>) -> bool {
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            return true;
        }

        let resolved = match self.resolved_path(entry) {
            Ok(p) => p,
            // Let the walker surface the error when it tries to list it.
            Err(_) => return true,
        };

        if self.exclusions.is_excluded(&resolved) {
            log::debug!("Pruning excluded directory: {}", entry.path().display());
            pruned.set(pruned.get() + 1);
            return false;
        }

        true
    }

    /// Walk the tree once, calling `visit` for every eligible regular file.
    ///
    /// Files are visited in depth-first order with siblings sorted by name.
    ///
    /// # Errors
    ///
    /// Returns [`WalkError`] before any work is done if the root is missing
    /// or not a directory. Failures on individual entries are not errors;
    /// they are collected in [`WalkStats::errors`].
    pub fn walk<F>(&self, mut visit: F) -> Result<WalkStats, WalkError>
    where
        F: FnMut(FileRecord),
    {
        let root = self.resolve_root()?;
        let mut stats = WalkStats::default();

        if self.exclusions.is_excluded(&root) {
            log::warn!("Root directory {} is excluded, nothing to scan", root.display());
            stats.dirs_pruned = 1;
            return Ok(stats);
        }

        let pruned = Cell::new(0usize);
        let mut seen: HashSet<PathBuf> = HashSet::new();

        let entries = WalkDir::new(&root)
            .follow_links(self.config.follow_symlinks)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| self.should_descend(e, &pruned));

        for entry in entries {
            if self.is_shutdown_requested() {
                log::debug!("Walker: Shutdown requested, stopping iteration");
                stats.interrupted = true;
                break;
            }

            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    stats.errors.push(self.handle_walkdir_error(&root, e));
                    continue;
                }
            };

            let file_type = entry.file_type();
            if file_type.is_dir() {
                continue;
            }

            if entry.path_is_symlink() && !self.config.follow_symlinks {
                log::trace!("Skipping symlink: {}", entry.path().display());
                continue;
            }

            if !file_type.is_file() {
                log::trace!("Skipping special file: {}", entry.path().display());
                continue;
            }

            let path = match self.resolved_path(&entry) {
                Ok(p) => p,
                Err(e) => {
                    log::warn!("Cannot resolve {}: {}", entry.path().display(), e);
                    stats
                        .errors
                        .push(ReadError::from_io(entry.path().to_path_buf(), e));
                    continue;
                }
            };

            if self.config.follow_symlinks && !seen.insert(path.clone()) {
                log::debug!(
                    "Already visited {} through another link",
                    entry.path().display()
                );
                continue;
            }

            if self.exclusions.is_excluded(&path) {
                log::debug!("Skipping excluded file: {}", path.display());
                stats.files_excluded += 1;
                continue;
            }

            let size = match entry.metadata() {
                Ok(m) => m.len(),
                Err(e) => {
                    stats.errors.push(self.handle_walkdir_error(&root, e));
                    continue;
                }
            };

            stats.files_visited += 1;
            if let Some(ref observer) = self.observer {
                observer.on_file(stats.files_visited, &path);
            }
            log::trace!("Visiting {}", path.display());

            visit(FileRecord::new(path, size));
        }

        stats.dirs_pruned += pruned.get();
        Ok(stats)
    }

    /// Convert a walkdir error into a logged, non-fatal [`ReadError`].
    fn handle_walkdir_error(&self, root: &Path, error: walkdir::Error) -> ReadError {
        let path = error
            .path()
            .map_or_else(|| root.to_path_buf(), Path::to_path_buf);

        if let Some(ancestor) = error.loop_ancestor() {
            log::warn!(
                "Symlink cycle: {} points back to {}",
                path.display(),
                ancestor.display()
            );
            return ReadError::Io {
                path,
                source: io::Error::other("filesystem loop detected"),
            };
        }

        let err = match error.into_io_error() {
            Some(io_err) => ReadError::from_io(path, io_err),
            None => ReadError::Io {
                path,
                source: io::Error::other("directory traversal failed"),
            },
        };
        log::warn!("{}", err);
        err
    }
}
