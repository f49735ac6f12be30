//! Error types for packaging operations.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Result type for packaging operations.
pub type PackageResult<T> = Result<T, PackageError>;

/// Errors that can occur while packaging an addon.
#[derive(Debug)]
pub enum PackageError {
    /// Addon root directory does not exist.
    RootNotFound(PathBuf),

    /// The mandatory `server` directory is missing from the addon root.
    MissingServer(PathBuf),

    /// The `VERSION` file is missing from the addon root.
    MissingVersionFile(PathBuf),

    /// The version string is not a valid semantic version.
    InvalidVersion(String),

    /// The addon name does not match the required grammar.
    InvalidAddonName(String),

    /// Invalid path provided.
    InvalidPath(String),

    /// Failed to create directory.
    CreateDirectoryFailed { path: PathBuf, source: io::Error },

    /// Failed to read file or directory.
    ReadFailed { path: PathBuf, source: io::Error },

    /// Failed to write file.
    WriteFailed { path: PathBuf, source: io::Error },

    /// Failed to remove a previous package output.
    RemoveFailed { path: PathBuf, source: io::Error },

    /// Archive building failed.
    ArchiveFailed(String),

    /// Package manifest is malformed.
    InvalidManifest(String),
}

impl fmt::Display for PackageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackageError::RootNotFound(path) => {
                write!(f, "addon root does not exist: {}", path.display())
            }
            PackageError::MissingServer(path) => {
                write!(
                    f,
                    "missing mandatory 'server' directory in {}",
                    path.display()
                )
            }
            PackageError::MissingVersionFile(path) => {
                write!(f, "no VERSION file found at {}", path.display())
            }
            PackageError::InvalidVersion(msg) => {
                write!(f, "invalid version: {}", msg)
            }
            PackageError::InvalidAddonName(name) => {
                write!(
                    f,
                    "invalid addon name '{}': expected lowercase letters, digits and \
                     underscores, starting with a letter",
                    name
                )
            }
            PackageError::InvalidPath(msg) => {
                write!(f, "invalid path: {}", msg)
            }
            PackageError::CreateDirectoryFailed { path, source } => {
                write!(
                    f,
                    "failed to create directory {}: {}",
                    path.display(),
                    source
                )
            }
            PackageError::ReadFailed { path, source } => {
                write!(f, "failed to read {}: {}", path.display(), source)
            }
            PackageError::WriteFailed { path, source } => {
                write!(f, "failed to write {}: {}", path.display(), source)
            }
            PackageError::RemoveFailed { path, source } => {
                write!(f, "failed to remove {}: {}", path.display(), source)
            }
            PackageError::ArchiveFailed(msg) => {
                write!(f, "archive failed: {}", msg)
            }
            PackageError::InvalidManifest(msg) => {
                write!(f, "invalid manifest: {}", msg)
            }
        }
    }
}

impl std::error::Error for PackageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PackageError::CreateDirectoryFailed { source, .. } => Some(source),
            PackageError::ReadFailed { source, .. } => Some(source),
            PackageError::WriteFailed { source, .. } => Some(source),
            PackageError::RemoveFailed { source, .. } => Some(source),
            _ => None,
        }
    }
}
