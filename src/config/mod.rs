//! Configuration loading
//!
//! Defaults, then an optional TOML file, then CLI overrides.

mod merge;

pub use merge::{merge_cli_with_config, CliOverrides};

use figment::providers::{Format, Serialized, Toml};
use figment::Figment;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::domain::Config;

/// Config file picked up from the working directory when present
pub const DEFAULT_CONFIG_FILE: &str = "vanity-redirects.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("invalid config file {}", .0.display())]
    Parse(PathBuf, #[source] Box<figment::Error>),

    #[error("config validation error: {0}")]
    Validation(String),
}

/// Load configuration from `explicit`, or from `DEFAULT_CONFIG_FILE` in
/// `anchor` when no file is named. A missing default file yields defaults.
pub fn load_config(anchor: &Path, explicit: Option<&Path>) -> Result<Config, ConfigError> {
    let path = match explicit {
        Some(path) if !path.is_file() => return Err(ConfigError::NotFound(path.to_path_buf())),
        Some(path) => path.to_path_buf(),
        None => {
            let candidate = anchor.join(DEFAULT_CONFIG_FILE);
            if !candidate.is_file() {
                return Ok(Config::default());
            }
            candidate
        }
    };

    debug!("Loading config from {}", path.display());
    let config: Config = Figment::from(Serialized::defaults(Config::default()))
        .merge(Toml::file(&path))
        .extract()
        .map_err(|e| ConfigError::Parse(path.clone(), Box::new(e)))?;

    validate(&config)?;
    Ok(config)
}

/// Reject settings no run could succeed with.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.remote.trim().is_empty() {
        return Err(ConfigError::Validation("remote must not be empty".to_string()));
    }
    if config.remote.contains(char::is_whitespace) {
        return Err(ConfigError::Validation(format!(
            "remote {:?} must not contain whitespace",
            config.remote
        )));
    }
    Ok(())
}
