//! Configuration management
//!
//! Settings come from `buildparams.yaml` in the working directory when it
//! exists, then from `BUILDPARAMS_*` environment variables.

use crate::params::ApiVersion;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the configuration file looked up in the working directory
pub const CONFIG_FILE: &str = "buildparams.yaml";

/// Errors raised while loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read
    #[error("Cannot read config '{}': {source}", path.display())]
    Io {
        /// Config path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid YAML for [`Config`]
    #[error("Invalid config '{}': {source}", path.display())]
    Parse {
        /// Config path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_yaml::Error,
    },

    /// An environment override holds an unusable value
    #[error("Invalid value '{value}' for {var}: {reason}")]
    Env {
        /// Variable name.
        var: String,
        /// Offending value.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API version assumed for documents that do not declare one
    pub default_version: ApiVersion,
    /// Log level
    pub log_level: String,
    /// Treat lint warnings as failures in `check`
    pub deny_warnings: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_version: ApiVersion::Latest,
            log_level: "warn".to_string(),
            deny_warnings: false,
        }
    }
}

impl Config {
    /// Reads configuration from a YAML file. Missing keys take their
    /// default values.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads `buildparams.yaml` from `dir` if present, then applies
    /// environment overrides
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file or an override is invalid.
    pub fn load_from(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join(CONFIG_FILE);
        let mut config = if path.is_file() {
            tracing::debug!(path = %path.display(), "loading config");
            Self::from_file(&path)?
        } else {
            Self::default()
        };
        config.apply_overrides(|var| std::env::var(var).ok())?;
        Ok(config)
    }

    /// Loads configuration for the current working directory
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file or an override is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new("."))
    }

    /// Applies `BUILDPARAMS_LOG_LEVEL` and `BUILDPARAMS_VERSION` as returned
    /// by `lookup`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Env`] if the version override is not a known
    /// API version.
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(level) = lookup("BUILDPARAMS_LOG_LEVEL") {
            self.log_level = level;
        }
        if let Some(value) = lookup("BUILDPARAMS_VERSION") {
            self.default_version = value.parse().map_err(|reason| ConfigError::Env {
                var: "BUILDPARAMS_VERSION".to_string(),
                value: value.clone(),
                reason,
            })?;
        }
        Ok(())
    }
}
