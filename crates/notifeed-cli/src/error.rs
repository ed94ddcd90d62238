//! CLI error handling and formatting.

use std::fmt::Write as _;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use notifeed_common_config::{ConfigError, EnvError};
use notifeed_common_log::LogError;
use notifeed_spec::FeedError;
use thiserror::Error;

/// Application exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Exit {
    Success = 0,
    GeneralError = 1,
    ConfigError = 2,
    IoError = 3,
    FeedError = 4,
    ValidationError = 5,
}

impl From<Exit> for ExitCode {
    fn from(exit: Exit) -> Self {
        ExitCode::from(exit as u8)
    }
}

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{message}")]
    Config {
        message: String,
        #[source]
        source: Option<ConfigError>,
        hint: Option<String>,
    },

    #[error("{message}")]
    Io {
        message: String,
        #[source]
        source: io::Error,
        path: Option<PathBuf>,
    },

    #[error(transparent)]
    Feed(#[from] FeedError),

    #[error("{skipped} of {total} notification specs failed to load")]
    Check { skipped: usize, total: usize },

    #[error(transparent)]
    Log(#[from] LogError),
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        let hint = match &err {
            ConfigError::ParseError { .. } => {
                Some("check notifeed.yaml against the documented keys".to_string())
            }
            ConfigError::NotFound { .. } => {
                Some("pass an existing file with --config or unset NOTIFEED_CONFIG".to_string())
            }
            _ => None,
        };
        Self::Config {
            message: format!("invalid configuration: {err}"),
            source: Some(err),
            hint,
        }
    }
}

impl From<EnvError> for CliError {
    fn from(err: EnvError) -> Self {
        ConfigError::from(err).into()
    }
}

impl CliError {
    pub fn io(message: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
            path: None,
        }
    }

    /// Get the error code for this error
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config { .. } => "E001",
            Self::Io { .. } => "E002",
            Self::Feed(_) => "E003",
            Self::Check { .. } => "E004",
            Self::Log(_) => "E005",
        }
    }

    /// Get the exit status for this error
    pub fn exit(&self) -> Exit {
        match self {
            Self::Config { .. } => Exit::ConfigError,
            Self::Io { .. } => Exit::IoError,
            Self::Feed(FeedError::InputDirMissing { .. }) => Exit::IoError,
            Self::Feed(_) => Exit::FeedError,
            Self::Check { .. } => Exit::ValidationError,
            Self::Log(_) => Exit::GeneralError,
        }
    }

    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::Config { hint, .. } => hint.as_deref(),
            Self::Feed(FeedError::InputDirMissing { .. }) => {
                Some("run from the project directory or pass --project / --input")
            }
            _ => None,
        }
    }

    /// Render the error for stderr: code, message, hint.
    pub fn render(&self) -> String {
        let mut output = format!("error[{}]: {self}", self.code());
        if let Self::Io { path: Some(path), .. } = self {
            let _ = write!(output, "\n  path: {}", path.display());
        }
        if let Some(hint) = self.hint() {
            let _ = write!(output, "\n  hint: {hint}");
        }
        output
    }
}
