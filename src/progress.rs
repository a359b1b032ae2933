//! Progress reporting using indicatif.
//!
//! The scan only knows how many files it has visited so far, not how many
//! remain, so progress is a spinner with a running count. Observers are
//! cosmetic: nothing they do can change traversal order or results.

use std::io::IsTerminal;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Receives progress updates during a scan.
pub trait ScanObserver: Send + Sync {
    /// Called once before traversal begins.
    fn on_scan_start(&self, _root: &Path) {}

    /// Called for each visited file with the running (1-based) count.
    fn on_file(&self, visited: usize, path: &Path);

    /// Called once after traversal ends, interrupted or not.
    fn on_scan_end(&self, _visited: usize) {}
}

/// Spinner-based progress reporter.
pub struct Progress {
    bar: Mutex<Option<ProgressBar>>,
    enabled: bool,
}

impl Progress {
    /// Create a progress reporter.
    ///
    /// Nothing is drawn when `enabled` is false or stderr is not a terminal.
    ///
    /// # Examples
    ///
    /// ```
    /// use hashdupe::progress::Progress;
    ///
    /// let progress = Progress::new(false);
    /// assert!(!progress.is_enabled());
    /// ```
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self {
            bar: Mutex::new(None),
            enabled: enabled && std::io::stderr().is_terminal(),
        }
    }

    /// Whether the spinner will actually be drawn.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {pos} files {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
    }

    fn with_bar(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(guard) = self.bar.lock() {
            if let Some(ref pb) = *guard {
                f(pb);
            }
        }
    }
}

impl ScanObserver for Progress {
    fn on_scan_start(&self, root: &Path) {
        if !self.enabled {
            return;
        }

        let pb = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr());
        pb.set_style(Self::style());
        pb.set_message(format!("Scanning {}", truncate_path(&root.to_string_lossy(), 40)));
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut guard) = self.bar.lock() {
            *guard = Some(pb);
        }
    }

    fn on_file(&self, visited: usize, path: &Path) {
        self.with_bar(|pb| {
            pb.set_position(visited as u64);
            pb.set_message(truncate_path(&path.to_string_lossy(), 40));
        });
    }

    fn on_scan_end(&self, visited: usize) {
        if let Ok(mut guard) = self.bar.lock() {
            if let Some(pb) = guard.take() {
                pb.set_position(visited as u64);
                pb.finish_and_clear();
            }
        }
    }
}

/// Truncate a path for display, keeping the file name.
fn truncate_path(path: &str, max_len: usize) -> String {
    if path.chars().count() <= max_len {
        return path.to_string();
    }

    let file_name = Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let name_len = file_name.chars().count();
    if name_len + 4 > max_len {
        let tail: String = file_name.chars().skip(name_len + 3 - max_len).collect();
        return format!("...{tail}");
    }

    format!(".../{file_name}")
}
