//! Notification spec processing for notifeed.
//!
//! Spec files are small YAML documents written by people. This crate reads
//! them from a directory, rejects the malformed ones without stopping, turns
//! shorthand requirements and inclusive date windows into the explicit form
//! the client expects, and writes the result as a single tagged YAML feed.
//!
//! ```no_run
//! use notifeed_common_config::FeedConfig;
//! use notifeed_spec::FeedGenerator;
//!
//! let report = FeedGenerator::new(FeedConfig::default(), ".").run()?;
//! println!("{} written, {} skipped", report.written, report.skipped);
//! # Ok::<(), notifeed_spec::FeedError>(())
//! ```

pub mod discovery;
pub mod emit;
pub mod error;
pub mod notification;
pub mod ordering;
pub mod parsing;
pub mod pipeline;
pub mod raw;
pub mod requirements;

pub use discovery::discover;
pub use emit::{render_feed, write_feed, NOTIFICATION_TAG};
pub use error::{FeedError, SpecError, SpecErrorKind};
pub use notification::{NormalizedNotification, DEFAULT_ACCEPT_LABEL};
pub use ordering::{compare_priority, order_by};
pub use parsing::{load_spec, parse_spec};
pub use pipeline::{process_file, FeedEntry, FeedGenerator, FeedOutcome, FeedReport};
pub use raw::{Priority, RawSpec, Requirements};
pub use requirements::{
    translate_installed, Operator, RequirementError, RequirementToken, VersionConstraint,
};
