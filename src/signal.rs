//! Ctrl+C handling.
//!
//! A scan is never cancelled in the middle of a file. Ctrl+C only sets a
//! shared flag; the walker checks it before moving to the next entry, the
//! finder finalizes what was recorded so far, and the process exits with
//! code 130 (128 + SIGINT) without writing a report.
//!
//! ```rust,no_run
//! use hashdupe::signal::install_handler;
//!
//! let handler = install_handler();
//! let flag = handler.get_flag();
//! // hand `flag` to the walker
//! ```

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

/// Shared, clonable shutdown flag.
#[derive(Debug, Clone, Default)]
pub struct ShutdownHandler {
    flag: Arc<AtomicBool>,
}

impl ShutdownHandler {
    /// Create a handler with no shutdown requested.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` once Ctrl+C was pressed or [`request_shutdown`](Self::request_shutdown) was called.
    #[must_use]
    pub fn is_shutdown_requested(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Request a shutdown manually.
    pub fn request_shutdown(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Clear the flag.
    pub fn reset(&self) {
        self.flag.store(false, Ordering::SeqCst);
    }

    /// The underlying flag, for passing to the walker.
    #[must_use]
    pub fn get_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.flag)
    }
}

static GLOBAL_HANDLER: OnceLock<ShutdownHandler> = OnceLock::new();

/// Install the process-wide Ctrl+C hook and return its handler.
///
/// `ctrlc` allows one hook per process. Later calls (tests calling
/// `run_app` repeatedly) get the already installed handler back with its
/// flag cleared. If the hook cannot be installed at all, an unhooked handler
/// is returned and the failure is logged at debug level.
pub fn install_handler() -> ShutdownHandler {
    GLOBAL_HANDLER
        .get_or_init(|| {
            let handler = ShutdownHandler::new();
            let flag = handler.get_flag();

            let installed = ctrlc::set_handler(move || {
                flag.store(true, Ordering::SeqCst);
                let mut stderr = std::io::stderr();
                let _ = writeln!(stderr, "\nInterrupted. Finishing the current file...");
                let _ = stderr.flush();
            });

            if let Err(e) = installed {
                log::debug!("Ctrl+C handler not installed: {}", e);
            }

            handler
        })
        .reset_and_clone()
}

impl ShutdownHandler {
    fn reset_and_clone(&self) -> Self {
        self.reset();
        self.clone()
    }
}
