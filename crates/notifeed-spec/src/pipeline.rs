//! Feed generation run: discover, parse, normalize, order, emit.

use std::path::{Path, PathBuf};

use notifeed_common_config::FeedConfig;
use notifeed_common_log::spans::{record_error, run_span, spec_span, Timer};
use tracing::{debug, info, warn};

use crate::discovery::discover;
use crate::emit::{render_feed, write_feed};
use crate::error::{FeedError, SpecError};
use crate::notification::NormalizedNotification;
use crate::ordering::order_by;
use crate::parsing::load_spec;
use crate::raw::Priority;

/// A notification ready for the feed, with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedEntry {
    pub path: PathBuf,
    pub priority: Priority,
    pub notification: NormalizedNotification,
}

/// Load one spec file and turn it into a feed entry.
pub fn process_file(path: &Path, max_size: u64) -> Result<FeedEntry, SpecError> {
    let spec = load_spec(path, max_size)?;
    let priority = spec.priority();
    let notification = NormalizedNotification::from_spec(spec)
        .and_then(|n| n.identify(path))
        .map_err(|kind| SpecError::new(path, kind))?;

    Ok(FeedEntry {
        path: path.to_path_buf(),
        priority,
        notification,
    })
}

/// Result of reading the input directory, before anything is written.
#[derive(Debug, Default)]
pub struct FeedOutcome {
    /// Accepted entries, already ordered.
    pub entries: Vec<FeedEntry>,
    /// Files that were rejected, in discovery order.
    pub skipped: Vec<SpecError>,
}

impl FeedOutcome {
    pub fn notifications(&self) -> impl Iterator<Item = &NormalizedNotification> {
        self.entries.iter().map(|e| &e.notification)
    }
}

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedReport {
    /// Path of the written feed file.
    pub output: PathBuf,
    pub written: usize,
    pub skipped: usize,
    /// Whether a previous output directory was removed.
    pub replaced: bool,
}

/// Drives a feed generation run for one project directory.
#[derive(Debug, Clone)]
pub struct FeedGenerator {
    config: FeedConfig,
    root: PathBuf,
}

impl FeedGenerator {
    pub fn new(config: FeedConfig, root: impl Into<PathBuf>) -> Self {
        Self {
            config,
            root: root.into(),
        }
    }

    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Read, translate and order every spec without touching the output.
    pub fn collect(&self) -> Result<FeedOutcome, FeedError> {
        let input = self.config.input_path(&self.root);
        let span = run_span(&input);
        let _guard = span.enter();
        self.collect_from(&input)
    }

    /// Full run: collect, then replace the output directory with the feed.
    pub fn run(&self) -> Result<FeedReport, FeedError> {
        let input = self.config.input_path(&self.root);
        let span = run_span(&input);
        let _guard = span.enter();
        let timer = Timer::start("feed");

        let outcome = self.collect_from(&input)?;

        info!("Writing notification feed to file...");
        let content = render_feed(outcome.notifications())?;
        let (output, replaced) = write_feed(
            &self.config.output_path(&self.root),
            &self.config.output_file,
            &content,
        )?;
        timer.finish();

        Ok(FeedReport {
            output,
            written: outcome.entries.len(),
            skipped: outcome.skipped.len(),
            replaced,
        })
    }

    fn collect_from(&self, input: &Path) -> Result<FeedOutcome, FeedError> {
        info!("Parsing notification specs...");
        let mut outcome = FeedOutcome::default();

        for entry in discover(input, &self.config.extensions)? {
            let result = entry.and_then(|path| self.process(&path));
            match result {
                Ok(entry) => outcome.entries.push(entry),
                Err(err) => {
                    warn!("Failed to load {}", err);
                    outcome.skipped.push(err);
                }
            }
        }

        order_by(&mut outcome.entries, self.config.ordering, |e| e.priority);
        debug!(
            accepted = outcome.entries.len(),
            skipped = outcome.skipped.len(),
            ordering = %self.config.ordering,
            "collected notifications"
        );
        Ok(outcome)
    }

    fn process(&self, path: &Path) -> Result<FeedEntry, SpecError> {
        let span = spec_span(path);
        let _guard = span.enter();

        process_file(path, self.config.max_file_size).map_err(|err| {
            record_error(&err);
            err
        })
    }
}
