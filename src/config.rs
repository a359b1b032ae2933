//! Layered configuration.
//!
//! Settings are merged with figment, lowest priority first:
//!
//! 1. Built-in defaults ([`Config::default`])
//! 2. TOML config file (`--config`, or `config.toml` in the platform config dir)
//! 3. `HASHDUPE_*` environment variables (e.g. `HASHDUPE_OUTPUT_FILE`)
//! 4. Command-line flags ([`Config::apply_cli`])

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::cli::{Cli, ReportFormat};
use crate::error::ConfigError;
use crate::scanner::CHUNK_SIZE;

/// Default report file name.
pub const DEFAULT_OUTPUT_FILE: &str = "duplicates.txt";

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "HASHDUPE_";

/// Effective settings for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Report file path.
    pub output_file: PathBuf,
    /// Exclusion list file; the built-in list is used when unset.
    pub exclude_file: Option<PathBuf>,
    /// Report format.
    pub format: ReportFormat,
    /// Follow symbolic links during traversal.
    pub follow_symlinks: bool,
    /// Show the progress spinner.
    pub progress: bool,
    /// Fingerprint read chunk size in bytes.
    pub chunk_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
            exclude_file: None,
            format: ReportFormat::Text,
            follow_symlinks: false,
            progress: true,
            chunk_size: CHUNK_SIZE,
        }
    }
}

impl Config {
    /// Merge defaults, the config file and the environment.
    ///
    /// `path` overrides the platform default location. A missing file
    /// contributes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Settings`] if the file or an environment
    /// variable cannot be parsed into the expected types.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = path.map(Path::to_path_buf).or_else(Self::default_path);

        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(ref file) = file {
            if file.exists() {
                log::debug!("Loading configuration from {}", file.display());
                figment = figment.merge(Toml::file(file));
            } else if path.is_some() {
                log::warn!("Config file {} not found, ignoring it", file.display());
            }
        }
        figment = figment.merge(Env::prefixed(ENV_PREFIX));

        figment
            .extract()
            .map_err(|e| ConfigError::Settings(Box::new(e)))
    }

    /// Like [`Config::load`], but logs a bad configuration and uses defaults.
    #[must_use]
    pub fn load_or_default(path: Option<&Path>) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("{}. Using default settings", e);
                Self::default()
            }
        }
    }

    /// Apply command-line overrides on top of the loaded settings.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(ref output) = cli.output_file {
            self.output_file = output.clone();
        }
        if let Some(ref exclude) = cli.exclude_file {
            self.exclude_file = Some(exclude.clone());
        }
        if let Some(format) = cli.format {
            self.format = format;
        }
        if cli.follow_symlinks {
            self.follow_symlinks = true;
        }
        if cli.no_progress || cli.quiet {
            self.progress = false;
        }
    }

    /// Platform-specific default config file location.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "hashdupe", "hashdupe")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}
