//! Feed serialization and output.

use std::path::{Path, PathBuf};

use serde_yaml::value::{Tag, TaggedValue};
use serde_yaml::Value;
use tracing::debug;

use crate::error::FeedError;
use crate::notification::NormalizedNotification;

/// Tag attached to every record of the feed.
pub const NOTIFICATION_TAG: &str = "Notification";

/// Serialize notifications into a single YAML document.
pub fn render_feed<'a, I>(notifications: I) -> Result<String, FeedError>
where
    I: IntoIterator<Item = &'a NormalizedNotification>,
{
    let records = notifications
        .into_iter()
        .map(|n| {
            Ok(Value::Tagged(Box::new(TaggedValue {
                tag: Tag::new(NOTIFICATION_TAG),
                value: serde_yaml::to_value(n)?,
            })))
        })
        .collect::<Result<Vec<_>, serde_yaml::Error>>()?;

    Ok(serde_yaml::to_string(&records)?)
}

/// Replace `output_dir` with a fresh directory holding only `file_name`.
///
/// Returns the written path and whether an earlier output was removed.
pub fn write_feed(output_dir: &Path, file_name: &str, content: &str) -> Result<(PathBuf, bool), FeedError> {
    let replaced = notifeed_common_fs::recreate_dir(output_dir).map_err(FeedError::OutputDir)?;
    if replaced {
        debug!(dir = %output_dir.display(), "removed previous output");
    }

    let path = output_dir.join(file_name);
    notifeed_common_fs::write_string_atomic(&path, content).map_err(FeedError::Write)?;
    Ok((path, replaced))
}
