//! Logging infrastructure for notifeed.
//!
//! Everything is written to stderr so that stdout stays free for command
//! output. An optional log file receives a second, uncolored copy.

use std::io;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use tracing::Subscriber;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan, MakeWriter},
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

pub mod spans;

pub use tracing::{debug, error, info, trace, warn};

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Level used when `RUST_LOG` holds no directives.
    pub level: LogLevel,
    pub format: LogFormat,
    /// Optional file receiving a copy of every event.
    pub file_path: Option<PathBuf>,
    pub timestamps: bool,
    /// Print file and line of each event.
    pub source_location: bool,
    /// Log span open/close events.
    pub span_events: bool,
    /// Color the stderr output. The file sink is never colored.
    pub ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Pretty,
            file_path: None,
            timestamps: true,
            source_location: false,
            span_events: false,
            ansi: true,
        }
    }
}

/// Verbosity threshold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Directive string understood by `EnvFilter`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl FromStr for LogLevel {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            other => Err(LogError::UnknownLevel(other.to_string())),
        }
    }
}

/// Shape of each log line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Multi-line, with span context underneath each event.
    #[default]
    Pretty,
    /// One line per event.
    Compact,
    /// One JSON object per event.
    Json,
}

impl LogFormat {
    /// Unrecognized names fall back to [`LogFormat::Pretty`].
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Self::Json,
            "compact" => Self::Compact,
            _ => Self::Pretty,
        }
    }
}

/// Environment variable names read by [`LogConfig::from_env`].
pub mod vars {
    pub const LOG_LEVEL: &str = "NOTIFEED_LOG_LEVEL";
    pub const LOG_FORMAT: &str = "NOTIFEED_LOG_FORMAT";
    pub const LOG_FILE: &str = "NOTIFEED_LOG_FILE";
    pub const LOG_SOURCE: &str = "NOTIFEED_LOG_SOURCE";
    pub const LOG_SPANS: &str = "NOTIFEED_LOG_SPANS";
    pub const RUST_LOG: &str = "RUST_LOG";
}

fn truthy(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

impl LogConfig {
    /// Build a config from `NOTIFEED_LOG_*`, falling back to a bare level in
    /// `RUST_LOG`.
    pub fn from_env() -> Self {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`LogConfig::from_env`] with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        let level = lookup(vars::LOG_LEVEL).or_else(|| lookup(vars::RUST_LOG));
        if let Some(level) = level.and_then(|l| l.parse().ok()) {
            config.level = level;
        }
        if let Some(format) = lookup(vars::LOG_FORMAT) {
            config.format = LogFormat::parse(&format);
        }
        config.file_path = lookup(vars::LOG_FILE).filter(|p| !p.is_empty()).map(PathBuf::from);
        if let Some(source) = lookup(vars::LOG_SOURCE) {
            config.source_location = truthy(&source);
        }
        if let Some(spans) = lookup(vars::LOG_SPANS) {
            config.span_events = truthy(&spans);
        }

        config
    }

    fn span_events(&self) -> FmtSpan {
        if self.span_events {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }

    fn layer<S, W>(&self, writer: W, ansi: bool) -> Box<dyn Layer<S> + Send + Sync>
    where
        S: Subscriber + for<'a> LookupSpan<'a> + 'static,
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        match self.format {
            LogFormat::Pretty => {
                let layer = fmt::layer()
                    .pretty()
                    .with_writer(writer)
                    .with_ansi(ansi)
                    .with_file(self.source_location)
                    .with_line_number(self.source_location)
                    .with_span_events(self.span_events());
                if self.timestamps {
                    layer.boxed()
                } else {
                    layer.without_time().boxed()
                }
            }
            LogFormat::Compact => {
                let layer = fmt::layer()
                    .compact()
                    .with_writer(writer)
                    .with_ansi(ansi)
                    .with_target(false)
                    .with_span_events(self.span_events());
                if self.timestamps {
                    layer.boxed()
                } else {
                    layer.without_time().boxed()
                }
            }
            LogFormat::Json => fmt::layer()
                .json()
                .with_writer(writer)
                .with_file(self.source_location)
                .with_line_number(self.source_location)
                .with_span_events(self.span_events())
                .boxed(),
        }
    }
}

/// Install the global subscriber.
///
/// `RUST_LOG` directives take precedence over `config.level` when they parse.
pub fn init(config: LogConfig) -> Result<(), LogError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.as_str()));

    let file_layer = config
        .file_path
        .as_ref()
        .map(|path| {
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map(|file| config.layer(Arc::new(file), false))
        })
        .transpose()?;

    tracing_subscriber::registry()
        .with(filter)
        .with(config.layer(io::stderr, config.ansi))
        .with(file_layer)
        .try_init()
        .map_err(|e| LogError::InitError(e.to_string()))
}

/// Logging errors.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("failed to initialize logging: {0}")]
    InitError(String),

    #[error("cannot open log file: {0}")]
    FileError(#[from] io::Error),

    #[error("unknown log level `{0}`")]
    UnknownLevel(String),
}
