//! File I/O for export artifacts with atomic writes.

use std::fs::{self, File};
use std::io::{self, Write as IoWrite};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

/// Errors during file system operations on export artifacts.
#[derive(Debug, Error)]
pub enum FsError {
    #[error("file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("atomic write failed for {path}: {source}")]
    AtomicWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("parent directory does not exist: {path}")]
    ParentNotFound { path: PathBuf },

    #[error("path is not a directory: {path}")]
    NotADirectory { path: PathBuf },
}

impl FsError {
    /// Creates an appropriate FsError from an io::Error.
    fn from_io(path: &Path, error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => FsError::NotFound { path: path.into() },
            io::ErrorKind::PermissionDenied => FsError::PermissionDenied { path: path.into() },
            _ => FsError::Io {
                path: path.into(),
                source: error,
            },
        }
    }

    /// Returns the path the error refers to.
    pub fn path(&self) -> &Path {
        match self {
            FsError::NotFound { path }
            | FsError::PermissionDenied { path }
            | FsError::Io { path, .. }
            | FsError::AtomicWrite { path, .. }
            | FsError::ParentNotFound { path }
            | FsError::NotADirectory { path } => path,
        }
    }
}

/// Creates a directory and all of its parents.
///
/// Succeeds without touching anything if the directory already exists.
///
/// # Errors
///
/// Returns `FsError::NotADirectory` if the path (or an ancestor) exists as a file.
pub fn ensure_dir(path: &Path) -> Result<(), FsError> {
    if path.is_dir() {
        return Ok(());
    }
    if path.exists() {
        return Err(FsError::NotADirectory { path: path.into() });
    }

    fs::create_dir_all(path).map_err(|e| match e.kind() {
        io::ErrorKind::AlreadyExists => FsError::NotADirectory { path: path.into() },
        _ => FsError::from_io(path, e),
    })
}

/// Writes content to a file path atomically.
///
/// Uses a temporary file in the target directory and an atomic rename, so a
/// failed write never leaves a partial file at `path`. The parent directory
/// must exist. An existing file at `path` is replaced.
///
/// # Errors
///
/// Returns `FsError::ParentNotFound` if the parent directory doesn't exist.
/// Returns `FsError::AtomicWrite` if the atomic rename fails.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), FsError> {
    let mut temp = temp_file_for(path)?;

    temp.write_all(contents).map_err(|e| FsError::Io {
        path: path.into(),
        source: e,
    })?;

    persist(temp, path)
}

/// Copies a file to `dest` atomically, byte for byte.
///
/// # Errors
///
/// Returns `FsError::NotFound` if `src` doesn't exist.
/// Returns `FsError::ParentNotFound` if the parent of `dest` doesn't exist.
pub fn copy_atomic(src: &Path, dest: &Path) -> Result<u64, FsError> {
    let mut input = File::open(src).map_err(|e| FsError::from_io(src, e))?;
    let mut temp = temp_file_for(dest)?;

    let copied = io::copy(&mut input, &mut temp).map_err(|e| FsError::Io {
        path: dest.into(),
        source: e,
    })?;

    persist(temp, dest)?;
    Ok(copied)
}

fn temp_file_for(path: &Path) -> Result<NamedTempFile, FsError> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .ok_or_else(|| FsError::ParentNotFound { path: path.into() })?;

    if !parent.is_dir() {
        return Err(FsError::ParentNotFound {
            path: parent.into(),
        });
    }

    NamedTempFile::new_in(parent).map_err(|e| FsError::from_io(parent, e))
}

fn persist(temp: NamedTempFile, path: &Path) -> Result<(), FsError> {
    temp.persist(path).map_err(|e| FsError::AtomicWrite {
        path: path.into(),
        source: e.error,
    })?;
    Ok(())
}
