//! Reading and writing the addon `VERSION` file.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use semver::Version;

use crate::error::{PackageError, PackageResult};

/// Name of the version file at the addon root.
pub const VERSION_FILENAME: &str = "VERSION";

/// Which part of a version to increment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionBump {
    /// Increment major version (1.2.3 -> 2.0.0)
    Major,
    /// Increment minor version (1.2.3 -> 1.3.0)
    Minor,
    /// Increment patch version (1.2.3 -> 1.2.4)
    Patch,
}

impl fmt::Display for VersionBump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionBump::Major => write!(f, "major"),
            VersionBump::Minor => write!(f, "minor"),
            VersionBump::Patch => write!(f, "patch"),
        }
    }
}

/// Path of the `VERSION` file for an addon root.
pub fn version_file_path(addon_root: &Path) -> PathBuf {
    addon_root.join(VERSION_FILENAME)
}

/// Parse a version string, trimming surrounding whitespace.
///
/// # Errors
///
/// Returns [`PackageError::InvalidVersion`] if the string is not a valid
/// semantic version.
pub fn parse_version(value: &str) -> PackageResult<Version> {
    let trimmed = value.trim();
    Version::parse(trimmed)
        .map_err(|e| PackageError::InvalidVersion(format!("'{}': {}", trimmed, e)))
}

/// Read the addon version from the `VERSION` file.
///
/// The file holds a single semantic version string; surrounding
/// whitespace and the trailing newline are ignored.
///
/// # Errors
///
/// Returns [`PackageError::MissingVersionFile`] if the file does not
/// exist, [`PackageError::ReadFailed`] on I/O errors, and
/// [`PackageError::InvalidVersion`] if the content does not parse.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use addonsmith::version::read_version;
///
/// let version = read_version(Path::new("/addons/my_addon"))?;
/// println!("packaging v{}", version);
/// # Ok::<(), addonsmith::PackageError>(())
/// ```
pub fn read_version(addon_root: &Path) -> PackageResult<Version> {
    let path = version_file_path(addon_root);

    if !path.exists() {
        return Err(PackageError::MissingVersionFile(path));
    }

    let raw = fs::read_to_string(&path).map_err(|source| PackageError::ReadFailed {
        path: path.clone(),
        source,
    })?;

    parse_version(&raw)
}

/// Write the addon version to the `VERSION` file.
///
/// The file is written as the version string plus a trailing newline,
/// the same format [`read_version`] accepts.
///
/// # Errors
///
/// Returns [`PackageError::WriteFailed`] on I/O errors.
pub fn write_version(addon_root: &Path, version: &Version) -> PackageResult<()> {
    let path = version_file_path(addon_root);

    fs::write(&path, format!("{}\n", version)).map_err(|source| PackageError::WriteFailed {
        path: path.clone(),
        source,
    })
}

/// Compute a bumped version.
///
/// Bumping resets the lower components and clears any pre-release or
/// build metadata.
///
/// # Example
///
/// ```
/// use semver::Version;
/// use addonsmith::version::{bump_version, VersionBump};
///
/// let version = Version::new(1, 2, 3);
///
/// assert_eq!(bump_version(&version, VersionBump::Major), Version::new(2, 0, 0));
/// assert_eq!(bump_version(&version, VersionBump::Minor), Version::new(1, 3, 0));
/// assert_eq!(bump_version(&version, VersionBump::Patch), Version::new(1, 2, 4));
/// ```
pub fn bump_version(version: &Version, bump: VersionBump) -> Version {
    match bump {
        VersionBump::Major => Version::new(version.major + 1, 0, 0),
        VersionBump::Minor => Version::new(version.major, version.minor + 1, 0),
        VersionBump::Patch => Version::new(version.major, version.minor, version.patch + 1),
    }
}
