//! Test utilities for notifeed crates.

use std::path::{Path, PathBuf};

use serde_yaml::Value;
use tempfile::TempDir;

/// Creates a temporary directory that is cleaned up on drop.
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// A throwaway project directory with a `notifications/` folder.
///
/// ```
/// let project = notifeed_test_utils::SpecFixture::new()
///     .spec("hello.yml", "title: Hello\n");
/// assert!(project.input_dir().join("hello.yml").exists());
/// ```
pub struct SpecFixture {
    dir: TempDir,
}

impl SpecFixture {
    pub const INPUT_DIR: &'static str = "notifications";
    pub const OUTPUT_DIR: &'static str = "out";
    pub const FEED_FILE: &'static str = "feed.yaml";

    pub fn new() -> Self {
        let dir = temp_dir();
        std::fs::create_dir(dir.path().join(Self::INPUT_DIR)).expect("Failed to create input dir");
        Self { dir }
    }

    /// A project directory without the input folder.
    pub fn empty() -> Self {
        Self { dir: temp_dir() }
    }

    /// Add a spec file to the input folder.
    pub fn spec(self, name: &str, content: &str) -> Self {
        self.write(Path::new(Self::INPUT_DIR).join(name), content)
    }

    /// Write an arbitrary file relative to the project root.
    pub fn write(self, relative: impl AsRef<Path>, content: &str) -> Self {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        std::fs::write(&path, content).expect("Failed to write fixture file");
        self
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn input_dir(&self) -> PathBuf {
        self.root().join(Self::INPUT_DIR)
    }

    pub fn output_dir(&self) -> PathBuf {
        self.root().join(Self::OUTPUT_DIR)
    }

    pub fn feed_path(&self) -> PathBuf {
        self.output_dir().join(Self::FEED_FILE)
    }

    /// Read the default feed file and return its records.
    pub fn read_feed(&self) -> Vec<FeedRecord> {
        let content = std::fs::read_to_string(self.feed_path()).expect("Failed to read feed");
        feed_records(&content)
    }
}

impl Default for SpecFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// One record of an emitted feed.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedRecord {
    /// Tag without the leading `!`.
    pub tag: String,
    pub value: Value,
}

impl FeedRecord {
    pub fn id(&self) -> &str {
        self.str("id").expect("record has no id")
    }

    pub fn str(&self, key: &str) -> Option<&str> {
        self.value.get(key).and_then(Value::as_str)
    }
}

/// Parse feed text into its tagged records.
pub fn feed_records(content: &str) -> Vec<FeedRecord> {
    let value: Value = serde_yaml::from_str(content).expect("Feed is not valid YAML");
    let records = match value {
        Value::Sequence(records) => records,
        other => panic!("Feed is not a sequence: {other:?}"),
    };

    records
        .into_iter()
        .map(|record| match record {
            Value::Tagged(tagged) => FeedRecord {
                tag: tagged.tag.to_string().trim_start_matches('!').to_string(),
                value: tagged.value,
            },
            other => panic!("Feed record is not tagged: {other:?}"),
        })
        .collect()
}

/// Assert that a Result is Ok and return the value.
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert that a Result is Err and return the error.
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(v) => panic!("Expected Err, got Ok: {:?}", v),
            Err(e) => e,
        }
    };
}
