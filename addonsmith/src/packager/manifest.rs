//! Package manifest emission.
//!
//! Every assembled package carries a `manifest.json` at its root
//! describing what was packaged. Upload tooling and the pipeline server
//! read it to register the addon without unpacking anything. The
//! manifest deliberately contains no timestamps; a package rebuilt from
//! unchanged input is byte-identical, manifest included.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::addon::Addon;
use crate::error::{PackageError, PackageResult};

/// Name of the manifest file at the package root.
pub const MANIFEST_FILENAME: &str = "manifest.json";

/// Description of the client archive referenced from the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientArchiveInfo {
    /// Archive filename inside the package's `private/` folder.
    pub filename: String,

    /// Compressed size in bytes.
    pub size: u64,

    /// SHA-256 checksum, lowercase hex.
    pub sha256: String,
}

/// Manifest describing one assembled package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageManifest {
    /// Addon name.
    pub name: String,

    /// Addon version as a semantic version string.
    pub version: String,

    /// Folders present in the package, in packaging order.
    pub folders: Vec<String>,

    /// Client archive details, when one was produced.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_archive: Option<ClientArchiveInfo>,
}

impl PackageManifest {
    /// Create a manifest for an addon.
    pub fn new(addon: &Addon, folders: Vec<String>, client_archive: Option<ClientArchiveInfo>) -> Self {
        Self {
            name: addon.name.clone(),
            version: addon.version.to_string(),
            folders,
            client_archive,
        }
    }

    /// Serialize to pretty-printed JSON with a trailing newline.
    pub fn to_json(&self) -> String {
        // Field order is fixed by the struct, so output is stable
        let mut json = serde_json::to_string_pretty(self).expect("manifest serialization");
        json.push('\n');
        json
    }
}

/// Write the manifest into a package directory.
///
/// # Errors
///
/// Returns [`PackageError::WriteFailed`] on I/O errors.
pub fn write_manifest(package_dir: &Path, manifest: &PackageManifest) -> PackageResult<PathBuf> {
    let path = package_dir.join(MANIFEST_FILENAME);

    fs::write(&path, manifest.to_json()).map_err(|source| PackageError::WriteFailed {
        path: path.clone(),
        source,
    })?;

    Ok(path)
}

/// Read the manifest from a package directory.
///
/// # Errors
///
/// Returns [`PackageError::ReadFailed`] if the file cannot be read and
/// [`PackageError::InvalidManifest`] if it does not parse.
pub fn read_manifest(package_dir: &Path) -> PackageResult<PackageManifest> {
    let path = package_dir.join(MANIFEST_FILENAME);

    let raw = fs::read_to_string(&path).map_err(|source| PackageError::ReadFailed {
        path: path.clone(),
        source,
    })?;

    serde_json::from_str(&raw)
        .map_err(|e| PackageError::InvalidManifest(format!("{}: {}", path.display(), e)))
}
