//! Environment variable handling.

use crate::types::FeedConfig;
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable errors.
#[derive(Debug, Error)]
pub enum EnvError {
    #[error("invalid value for {var}: {message}")]
    InvalidValue { var: String, message: String },

    #[error("failed to load .env file: {0}")]
    DotenvError(#[from] dotenvy::Error),
}

/// Environment variable names.
pub mod vars {
    /// Path to an explicit config file.
    pub const NOTIFEED_CONFIG: &str = "NOTIFEED_CONFIG";
    pub const NOTIFEED_INPUT_DIR: &str = "NOTIFEED_INPUT_DIR";
    pub const NOTIFEED_OUTPUT_DIR: &str = "NOTIFEED_OUTPUT_DIR";
    pub const NOTIFEED_OUTPUT_FILE: &str = "NOTIFEED_OUTPUT_FILE";
    pub const NOTIFEED_ORDERING: &str = "NOTIFEED_ORDERING";
}

/// Environment access.
pub struct Environment;

impl Environment {
    /// Load `.env` then `.env.local` from `dir` (later overrides earlier).
    ///
    /// Missing files are fine; malformed ones are reported.
    pub fn init(dir: impl AsRef<Path>) -> Result<(), EnvError> {
        for name in [".env", ".env.local"] {
            let path = dir.as_ref().join(name);
            if path.is_file() {
                dotenvy::from_path_override(&path)?;
            }
        }
        Ok(())
    }

    /// Get an optional string variable.
    pub fn get(var: &str) -> Option<String> {
        env::var(var).ok().filter(|v| !v.is_empty())
    }

    /// Apply overrides from the process environment.
    pub fn apply_overrides(config: &mut FeedConfig) -> Result<(), EnvError> {
        apply_overrides_from(config, Self::get)
    }
}

/// Apply overrides using `lookup` to read variables.
pub fn apply_overrides_from<F>(config: &mut FeedConfig, lookup: F) -> Result<(), EnvError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(dir) = lookup(vars::NOTIFEED_INPUT_DIR) {
        config.input_dir = PathBuf::from(dir);
    }

    if let Some(dir) = lookup(vars::NOTIFEED_OUTPUT_DIR) {
        config.output_dir = PathBuf::from(dir);
    }

    if let Some(file) = lookup(vars::NOTIFEED_OUTPUT_FILE) {
        config.output_file = file;
    }

    if let Some(ordering) = lookup(vars::NOTIFEED_ORDERING) {
        config.ordering = ordering.parse().map_err(|message| EnvError::InvalidValue {
            var: vars::NOTIFEED_ORDERING.to_string(),
            message,
        })?;
    }

    Ok(())
}
