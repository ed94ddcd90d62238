//! Configuration types.

use notifeed_common_fs::path;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Default directory holding the notification spec files.
pub const DEFAULT_INPUT_DIR: &str = "notifications";
/// Default output directory, recreated on every run.
pub const DEFAULT_OUTPUT_DIR: &str = "out";
/// Default feed file name inside the output directory.
pub const DEFAULT_OUTPUT_FILE: &str = "feed.yaml";
/// Default cap on the size of a single spec file.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024;

/// Root configuration for a feed generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FeedConfig {
    /// Directory scanned for notification spec files.
    pub input_dir: PathBuf,
    /// Output directory (removed and recreated on each run).
    pub output_dir: PathBuf,
    /// Feed file name inside `output_dir`.
    pub output_file: String,
    /// Recognized spec file extensions, without the leading dot.
    pub extensions: Vec<String>,
    /// Order of records in the emitted feed.
    pub ordering: OrderingMode,
    /// Maximum size of a spec file in bytes.
    pub max_file_size: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            output_file: DEFAULT_OUTPUT_FILE.to_string(),
            extensions: vec!["yml".to_string(), "yaml".to_string()],
            ordering: OrderingMode::default(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

impl FeedConfig {
    /// Input directory resolved against the project root.
    pub fn input_path(&self, root: impl AsRef<Path>) -> PathBuf {
        path::resolve(root, &self.input_dir)
    }

    /// Output directory resolved against the project root.
    pub fn output_path(&self, root: impl AsRef<Path>) -> PathBuf {
        path::resolve(root, &self.output_dir)
    }

    /// Full path of the feed file.
    pub fn feed_path(&self, root: impl AsRef<Path>) -> PathBuf {
        self.output_path(root).join(&self.output_file)
    }
}

/// How records are ordered in the emitted feed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderingMode {
    /// Keep the order in which spec files were discovered.
    Discovery,
    /// Stable sort by descending priority; ties keep discovery order.
    #[default]
    Priority,
}

impl OrderingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Discovery => "discovery",
            Self::Priority => "priority",
        }
    }
}

impl fmt::Display for OrderingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "discovery" => Ok(Self::Discovery),
            "priority" => Ok(Self::Priority),
            other => Err(format!(
                "unknown ordering '{other}' (expected 'discovery' or 'priority')"
            )),
        }
    }
}
