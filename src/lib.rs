//! hashdupe - Duplicate File Finder
//!
//! Walks a directory tree once, skipping excluded system directories without
//! entering them, fingerprints every regular file with SHA-256 and reports
//! each set of files whose content is identical.

pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod output;
pub mod progress;
pub mod scanner;
pub mod signal;

use std::sync::Arc;

use anyhow::{Context, Result};
use yansi::Paint;

use crate::cli::Cli;
use crate::config::Config;
use crate::duplicates::{DuplicateFinder, FinderConfig, FinderError, ScanSummary};
use crate::error::ExitCode;
use crate::progress::Progress;
use crate::scanner::{ExclusionSet, WalkerConfig};

/// Run one scan as described by `cli` and return the process exit code.
///
/// # Errors
///
/// Returns an error if the root directory cannot be scanned or the report
/// cannot be written. Use [`exit_code_for`] to map it to an exit code.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet);
    if cli.no_color {
        yansi::disable();
    }

    let mut config = Config::load_or_default(cli.config.as_deref());
    config.apply_cli(&cli);
    log::debug!("Effective configuration: {:?}", config);

    let exclusions = ExclusionSet::build(config.exclude_file.as_deref());
    log::debug!("{} exclusion entries active", exclusions.len());

    let shutdown = signal::install_handler();
    let progress = Arc::new(Progress::new(config.progress));

    let finder_config = FinderConfig::default()
        .with_walker_config(WalkerConfig::new(config.follow_symlinks))
        .with_chunk_size(config.chunk_size)
        .with_shutdown_flag(shutdown.get_flag())
        .with_observer(progress);

    let (groups, summary) =
        DuplicateFinder::new(finder_config, exclusions).find_duplicates(&cli.directory)?;

    log_summary(&summary);

    if summary.interrupted {
        log::warn!("Scan interrupted, no report written");
        return Ok(ExitCode::Interrupted);
    }

    if groups.is_empty() {
        if !cli.quiet {
            println!("{}", "No duplicate files found.".green().bold());
        }
    } else {
        output::write_report(&config.output_file, &groups, &summary, config.format)
            .with_context(|| {
                format!("Failed to write report to {}", config.output_file.display())
            })?;

        if !cli.quiet {
            println!(
                "{} Found {} duplicate groups ({} reclaimable), report written to {}",
                "✓".green().bold(),
                groups.len(),
                summary.reclaimable_display(),
                config.output_file.display()
            );
        }
    }

    if summary.has_errors() {
        if !cli.quiet {
            println!(
                "{}",
                format!(
                    "{} files or directories could not be read, see the log for details",
                    summary.unreadable_files()
                )
                .yellow()
            );
        }
        Ok(ExitCode::PartialSuccess)
    } else {
        Ok(ExitCode::Success)
    }
}

/// Map an error returned by [`run_app`] to its exit code.
#[must_use]
pub fn exit_code_for(err: &anyhow::Error) -> ExitCode {
    match err.downcast_ref::<FinderError>() {
        Some(FinderError::Config(_)) => ExitCode::ConfigError,
        None => ExitCode::GeneralError,
    }
}

fn log_summary(summary: &ScanSummary) {
    log::info!(
        "Scanned {} files ({} hashed, {}) in {:.2?}",
        summary.files_visited,
        summary.files_hashed,
        summary.bytes_hashed_display(),
        summary.scan_duration
    );
    if summary.dirs_pruned > 0 || summary.files_excluded > 0 {
        log::info!(
            "Skipped {} excluded directories and {} excluded files",
            summary.dirs_pruned,
            summary.files_excluded
        );
    }
    log::info!(
        "{} duplicate groups, {} redundant copies, {} reclaimable",
        summary.duplicate_groups,
        summary.duplicate_files,
        summary.reclaimable_display()
    );
    if summary.has_errors() {
        log::warn!(
            "{} unreadable files or directories were skipped",
            summary.unreadable_files()
        );
    }
}
