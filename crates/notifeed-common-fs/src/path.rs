//! Path manipulation utilities.

use std::path::{Component, Path, PathBuf};

/// Normalize a path by resolving `.` and `..` without hitting the filesystem.
pub fn normalize(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    let mut components = Vec::new();

    for component in path.components() {
        match component {
            Component::Prefix(p) => components.push(Component::Prefix(p)),
            Component::RootDir => {
                components.clear();
                components.push(Component::RootDir);
            }
            Component::CurDir => {}
            Component::ParentDir => match components.last() {
                Some(Component::Normal(_)) => {
                    components.pop();
                }
                Some(Component::ParentDir) | None => components.push(Component::ParentDir),
                _ => {} // Don't pop prefix or root dir
            },
            Component::Normal(c) => components.push(Component::Normal(c)),
        }
    }

    if components.is_empty() {
        PathBuf::from(".")
    } else {
        components.iter().collect()
    }
}

/// Resolve `path` against `base` unless it is already absolute.
pub fn resolve(base: impl AsRef<Path>, path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    if path.is_absolute() {
        normalize(path)
    } else {
        normalize(base.as_ref().join(path))
    }
}

/// Get the file stem (name without directory and extension).
///
/// Hidden files without an extension (`.yml`) have no stem.
pub fn stem(path: impl AsRef<Path>) -> Option<String> {
    let path = path.as_ref();
    let file_name = path.file_name()?.to_str()?;

    if file_name.starts_with('.') && !file_name[1..].contains('.') {
        return None;
    }

    path.file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}
