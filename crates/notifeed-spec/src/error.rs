//! Error types for spec processing and feed emission.
//!
//! [`SpecError`] covers everything that can go wrong with a single spec
//! file; the pipeline logs it and moves on. [`FeedError`] covers the run as
//! a whole and is always fatal.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use notifeed_common_fs::FsError;
use thiserror::Error;

use crate::requirements::RequirementError;

/// Why a single spec file was rejected.
#[derive(Debug, Error)]
pub enum SpecErrorKind {
    #[error("cannot access file: {0}")]
    Unlisted(#[source] std::io::Error),

    #[error("{0}")]
    Read(#[from] FsError),

    #[error("invalid YAML{}: {message}", line.map(|l| format!(" at line {l}")).unwrap_or_default())]
    Syntax { line: Option<usize>, message: String },

    #[error("expected a mapping at the top level, found {found}")]
    NotAMapping { found: &'static str },

    #[error("unknown field `{field}`")]
    UnknownField { field: String },

    #[error("invalid value: {message}")]
    InvalidValue { message: String },

    #[error("invalid requirement: {0}")]
    Requirement(#[from] RequirementError),

    #[error("`{field}` date {date} cannot be widened by one day")]
    DateOutOfRange { field: &'static str, date: NaiveDate },

    #[error("file name has no stem to use as identifier")]
    MissingStem,
}

/// A spec file that could not be turned into a notification.
#[derive(Debug, Error)]
#[error("{}: {kind}", path.display())]
pub struct SpecError {
    /// The offending file.
    pub path: PathBuf,
    /// What went wrong.
    pub kind: SpecErrorKind,
}

impl SpecError {
    pub fn new(path: impl Into<PathBuf>, kind: SpecErrorKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Fatal errors of a feed generation run.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("input directory not found: {}", path.display())]
    InputDirMissing { path: PathBuf },

    #[error("invalid discovery pattern `{pattern}`: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("failed to serialize feed: {0}")]
    Serialize(#[from] serde_yaml::Error),

    #[error("failed to prepare output directory: {0}")]
    OutputDir(#[source] FsError),

    #[error("failed to write feed: {0}")]
    Write(#[source] FsError),
}
