//! Spec file discovery.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use tracing::debug;

use crate::error::{FeedError, SpecError, SpecErrorKind};

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// Glob patterns matching spec files directly inside `dir`, one per extension.
pub fn patterns(dir: &Path, extensions: &[String]) -> Vec<String> {
    let base = Pattern::escape(&dir.to_string_lossy());
    extensions
        .iter()
        .map(|ext| format!("{base}/*.{}", Pattern::escape(ext)))
        .collect()
}

/// List the spec files in `dir`.
///
/// Entries come back in the order the patterns yield them: all matches of
/// the first extension, then the second, and so on. Entries that match but
/// cannot be inspected are returned as errors so the caller can report them
/// alongside the other per-file failures.
pub fn discover(dir: &Path, extensions: &[String]) -> Result<Vec<Result<PathBuf, SpecError>>, FeedError> {
    if !notifeed_common_fs::is_dir(dir) {
        return Err(FeedError::InputDirMissing {
            path: dir.to_path_buf(),
        });
    }

    let mut seen = HashSet::new();
    let mut entries = Vec::new();

    for pattern in patterns(dir, extensions) {
        let paths = glob::glob_with(&pattern, MATCH_OPTIONS)
            .map_err(|source| FeedError::Pattern { pattern: pattern.clone(), source })?;

        for entry in paths {
            match entry {
                Ok(path) => {
                    if path.is_dir() {
                        debug!(path = %path.display(), "skipping directory");
                        continue;
                    }
                    if seen.insert(path.clone()) {
                        entries.push(Ok(path));
                    }
                }
                Err(err) => {
                    let path = err.path().to_path_buf();
                    entries.push(Err(SpecError::new(path, SpecErrorKind::Unlisted(err.into()))));
                }
            }
        }
    }

    debug!(count = entries.len(), dir = %dir.display(), "discovered spec files");
    Ok(entries)
}
