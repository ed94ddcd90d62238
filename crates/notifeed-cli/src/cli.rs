//! CLI argument definitions using clap derive macros.

use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, ValueEnum, ValueHint};
use notifeed_common_config::{vars, ConfigLoader, Environment, FeedConfig, OrderingMode};
use notifeed_common_log::{LogConfig, LogFormat, LogLevel};

use crate::error::CliError;

/// Build the notification feed from `notifications/*.yml` into `out/feed.yaml`.
#[derive(Debug, Parser)]
#[command(name = "notifeed", author, version, about, long_about = None)]
pub struct Cli {
    /// Project directory (defaults to the current directory)
    #[arg(short = 'C', long = "project", value_hint = ValueHint::DirPath)]
    pub project: Option<PathBuf>,

    /// Path to configuration file
    #[arg(short, long, env = vars::NOTIFEED_CONFIG, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Directory containing the notification specs
    #[arg(short, long, value_hint = ValueHint::DirPath)]
    pub input: Option<PathBuf>,

    /// Output directory (removed and recreated on every run)
    #[arg(short, long, value_hint = ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Order of records in the feed
    #[arg(long, value_enum)]
    pub order: Option<OrderArg>,

    /// Load and translate every spec without writing the feed
    #[arg(long)]
    pub check: bool,

    /// Increase verbosity level (-v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Feed ordering selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OrderArg {
    /// Keep discovery order
    Discovery,
    /// Highest priority first
    Priority,
}

impl From<OrderArg> for OrderingMode {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Discovery => OrderingMode::Discovery,
            OrderArg::Priority => OrderingMode::Priority,
        }
    }
}

impl Cli {
    /// Absolute project directory.
    pub fn project_dir(&self) -> Result<PathBuf, CliError> {
        let cwd = std::env::current_dir()
            .map_err(|e| CliError::io("cannot determine the current directory", e))?;
        let dir = match &self.project {
            Some(project) => notifeed_common_fs::path::resolve(&cwd, project),
            None => cwd,
        };

        if !notifeed_common_fs::is_dir(&dir) {
            return Err(CliError::Io {
                message: "project directory not found".to_string(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
                path: Some(dir),
            });
        }
        Ok(dir)
    }

    /// Logging setup: environment first, then `-v` / `-q`.
    pub fn log_config(&self) -> LogConfig {
        let mut config = LogConfig::from_env();

        if std::env::var_os(notifeed_common_log::vars::LOG_FORMAT).is_none() {
            config.format = LogFormat::Compact;
        }
        config.timestamps = self.verbose >= 2;
        config.ansi = ansi_enabled();

        match self.verbose {
            0 if self.quiet => config.level = LogLevel::Error,
            0 => {}
            1 => config.level = LogLevel::Debug,
            _ => config.level = LogLevel::Trace,
        }
        config
    }

    /// Load `.env`, the config file and the environment, then apply flags.
    pub fn load_config(&self, project: &Path) -> Result<FeedConfig, CliError> {
        Environment::init(project)?;

        let loader = ConfigLoader::new(project);
        let mut config = match &self.config {
            Some(path) => loader.load_from(path)?,
            None => loader.load()?,
        };

        self.apply_overrides(&mut config);
        loader.validate(&config)?;
        Ok(config)
    }

    fn apply_overrides(&self, config: &mut FeedConfig) {
        if let Some(input) = &self.input {
            config.input_dir = input.clone();
        }
        if let Some(output) = &self.output {
            config.output_dir = output.clone();
        }
        if let Some(order) = self.order {
            config.ordering = order.into();
        }
    }
}

fn ansi_enabled() -> bool {
    use std::io::IsTerminal;
    std::io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none()
}
