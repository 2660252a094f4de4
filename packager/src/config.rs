//! Packager configuration.
//!
//! Settings come from three layers: built-in defaults, an optional
//! `stub-packager.toml` in the invocation directory (or the file named by
//! `--config`), and command-line overrides. Later layers win.

use crate::cli::Cli;
use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Configuration file looked up in the invocation directory.
pub const DEFAULT_CONFIG_FILE: &str = "stub-packager.toml";

/// Errors arising from loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("could not read configuration file {path}")]
    Read {
        /// Path of the configuration file.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for [`PackagerConfig`].
    #[error("invalid configuration file {path}: {reason}")]
    Parse {
        /// Path of the configuration file.
        path: Utf8PathBuf,
        /// Description of the parse error.
        reason: String,
    },
}

/// Settings for a packaging run.
///
/// # Examples
///
/// ```
/// use stub_packager::config::PackagerConfig;
///
/// let config = PackagerConfig::from_toml_str("repository = \"acme/stubs\"")
///     .expect("valid configuration");
/// assert_eq!(config.repository, "acme/stubs");
/// assert_eq!(config.artefact_prefix, "phalconautocomplete");
/// ```
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PackagerConfig {
    /// GitHub `owner/name` slug hosting the stub releases.
    pub repository: String,
    /// Directory holding the metadata templates, relative to the
    /// invocation directory unless absolute.
    pub meta_dir: Utf8PathBuf,
    /// Directory receiving the finished artefact.
    pub dist_dir: Utf8PathBuf,
    /// File name prefix of the artefact.
    pub artefact_prefix: String,
    /// Name of the plugin descriptor inside the metadata directory.
    pub descriptor: String,
    /// `User-Agent` header sent with the download request.
    pub user_agent: String,
    /// Optional overall download timeout in seconds. Unset means no limit.
    pub timeout_secs: Option<u64>,
}

impl PackagerConfig {
    /// Parse configuration from TOML text, filling omitted keys with
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the text is not valid TOML or
    /// contains unknown keys.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Self::parse(text, Utf8Path::new(DEFAULT_CONFIG_FILE))
    }

    /// Load configuration for a run started in `invocation_dir`.
    ///
    /// An `explicit` path must exist. Without one, the default file in
    /// `invocation_dir` is used when present and defaults otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if a required file cannot be read, or
    /// [`ConfigError::Parse`] if its contents are invalid.
    pub fn load(explicit: Option<&Utf8Path>, invocation_dir: &Utf8Path) -> Result<Self, ConfigError> {
        let (path, required) = match explicit {
            Some(path) => (invocation_dir.join(path), true),
            None => (invocation_dir.join(DEFAULT_CONFIG_FILE), false),
        };

        if !required && !path.is_file() {
            log::debug!("no configuration file at {path}; using defaults");
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        log::debug!("loaded configuration from {path}");
        Self::parse(&text, &path)
    }

    /// Apply command-line overrides on top of this configuration.
    #[must_use]
    pub fn with_overrides(mut self, cli: &Cli) -> Self {
        if let Some(repository) = &cli.repository {
            self.repository.clone_from(repository);
        }
        if let Some(meta_dir) = &cli.meta_dir {
            self.meta_dir.clone_from(meta_dir);
        }
        if let Some(dist_dir) = &cli.dist_dir {
            self.dist_dir.clone_from(dist_dir);
        }
        self
    }

    /// Return the download timeout, if one is configured.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    fn parse(text: &str, path: &Utf8Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::Parse {
            path: path.to_owned(),
            reason: e.message().to_owned(),
        })
    }
}

impl Default for PackagerConfig {
    fn default() -> Self {
        Self {
            repository: "phalcon/ide-stubs".to_owned(),
            meta_dir: Utf8PathBuf::from("meta"),
            dist_dir: Utf8PathBuf::from("dist"),
            artefact_prefix: "phalconautocomplete".to_owned(),
            descriptor: "plugin.xml".to_owned(),
            user_agent: concat!("stub-packager/", env!("CARGO_PKG_VERSION")).to_owned(),
            timeout_secs: None,
        }
    }
}
