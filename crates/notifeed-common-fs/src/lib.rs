//! File system utilities for notifeed.

use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub mod path;

/// File system errors.
#[derive(Debug, Error)]
pub enum FsError {
    #[error("file not found: {}", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("permission denied: {}", path.display())]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("file too large: {} ({size} bytes, max: {max})", path.display())]
    TooLarge { path: PathBuf, size: u64, max: u64 },

    #[error("{message}: {}: {source}", path.display())]
    Io {
        message: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FsError {
    fn io(message: &'static str, path: &Path, source: io::Error) -> Self {
        Self::Io {
            message,
            path: path.to_path_buf(),
            source,
        }
    }

    /// Classify a read-side I/O error.
    fn read(message: &'static str, path: &Path, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::NotFound => Self::NotFound {
                path: path.to_path_buf(),
                source,
            },
            io::ErrorKind::PermissionDenied => Self::PermissionDenied {
                path: path.to_path_buf(),
                source,
            },
            _ => Self::io(message, path, source),
        }
    }

    /// The path the failed operation was working on.
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound { path, .. }
            | Self::PermissionDenied { path, .. }
            | Self::TooLarge { path, .. }
            | Self::Io { path, .. } => path,
        }
    }
}

/// Result alias for file system operations.
pub type Result<T> = std::result::Result<T, FsError>;

/// Read a file to string with size limit.
///
/// The file handle is closed before this returns, whatever the outcome.
pub fn read_to_string(path: impl AsRef<Path>, max_size: u64) -> Result<String> {
    let path = path.as_ref();

    let metadata =
        fs::metadata(path).map_err(|e| FsError::read("failed to read metadata", path, e))?;

    if metadata.len() > max_size {
        return Err(FsError::TooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max: max_size,
        });
    }

    let mut file = File::open(path).map_err(|e| FsError::read("failed to open file", path, e))?;
    let mut contents = String::with_capacity(metadata.len() as usize);
    file.read_to_string(&mut contents)
        .map_err(|e| FsError::read("failed to read file", path, e))?;

    Ok(contents)
}

/// Write to a file atomically (write to temp, then rename).
pub fn write_atomic(path: impl AsRef<Path>, contents: &[u8]) -> Result<()> {
    let path = path.as_ref();
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    ensure_dir(parent)?;

    let mut temp_path = path.to_path_buf();
    if let Some(name) = path.file_name() {
        temp_path.set_file_name(format!(".{}.tmp", name.to_string_lossy()));
    } else {
        temp_path.push(".tmp");
    }

    {
        let mut file = File::create(&temp_path)
            .map_err(|e| FsError::io("failed to create temporary file", &temp_path, e))?;

        file.write_all(contents)
            .map_err(|e| FsError::io("failed to write to temporary file", &temp_path, e))?;

        file.sync_all()
            .map_err(|e| FsError::io("failed to sync temporary file", &temp_path, e))?;
    }

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        FsError::io("failed to rename temporary file to target", path, e)
    })
}

/// Write string to file atomically.
pub fn write_string_atomic(path: impl AsRef<Path>, contents: &str) -> Result<()> {
    write_atomic(path, contents.as_bytes())
}

/// Ensure a directory exists.
pub fn ensure_dir(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if !path.is_dir() {
        fs::create_dir_all(path)
            .map_err(|e| FsError::io("failed to create directory", path, e))?;
    }
    Ok(())
}

/// Remove a directory and everything below it, then create it empty.
///
/// Returns `true` when a previous directory was removed.
pub fn recreate_dir(path: impl AsRef<Path>) -> Result<bool> {
    let path = path.as_ref();

    let removed = match fs::symlink_metadata(path) {
        Ok(meta) if meta.is_dir() => {
            fs::remove_dir_all(path)
                .map_err(|e| FsError::io("failed to remove directory", path, e))?;
            true
        }
        Ok(_) => {
            fs::remove_file(path).map_err(|e| FsError::io("failed to remove file", path, e))?;
            true
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => false,
        Err(e) => return Err(FsError::read("failed to read metadata", path, e)),
    };

    fs::create_dir_all(path).map_err(|e| FsError::io("failed to create directory", path, e))?;
    Ok(removed)
}

/// Check if a path exists and is a directory.
pub fn is_dir(path: impl AsRef<Path>) -> bool {
    path.as_ref().is_dir()
}
