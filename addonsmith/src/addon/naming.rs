//! Centralized addon naming conventions.
//!
//! This module is the single source of truth for all addon naming:
//! - Package directory names (e.g., `my_addon-1.2.0`)
//! - The client archive filename (`client.tar.gz`)
//! - Server mount paths (e.g., `addons/my_addon/1.2.0`)
//! - Public/private download URL paths
//!
//! All other modules should use these functions rather than constructing
//! names directly. This keeps the packager output consistent with what the
//! pipeline server expects to serve.

use semver::Version;

/// Filename of the compressed client archive placed in the package's
/// `private/` folder.
///
/// The desktop launcher downloads it from the addon's private mount, so
/// the name is fixed rather than versioned; the version lives in the URL.
pub const CLIENT_ARCHIVE_FILENAME: &str = "client.tar.gz";

/// Generate the package directory name for an addon.
///
/// This is the directory name created under the output root, and the
/// name the upload tooling expects.
///
/// # Format
///
/// `{name}-{version}`
///
/// # Examples
///
/// ```
/// use semver::Version;
/// use addonsmith::addon::package_dir_name;
///
/// assert_eq!(package_dir_name("my_addon", &Version::new(1, 2, 0)), "my_addon-1.2.0");
/// assert_eq!(package_dir_name("review", &Version::new(0, 3, 1)), "review-0.3.1");
/// ```
pub fn package_dir_name(name: &str, version: &Version) -> String {
    format!("{}-{}", name.to_lowercase(), version)
}

/// Parse a package directory name back into its addon name and version.
///
/// Returns `None` if the directory name does not follow the
/// `{name}-{version}` convention.
///
/// # Examples
///
/// ```
/// use semver::Version;
/// use addonsmith::addon::parse_package_dir_name;
///
/// let (name, version) = parse_package_dir_name("my_addon-1.2.0").unwrap();
/// assert_eq!(name, "my_addon");
/// assert_eq!(version, Version::new(1, 2, 0));
///
/// assert!(parse_package_dir_name("no_version_here").is_none());
/// ```
pub fn parse_package_dir_name(dir_name: &str) -> Option<(String, Version)> {
    // Addon names may not contain dashes, so everything after the first
    // '-' is the version (which may itself contain dashes, e.g. 1.2.0-rc.1).
    let (name, version_str) = dir_name.split_once('-')?;
    if name.is_empty() {
        return None;
    }
    let version = Version::parse(version_str).ok()?;
    Some((name.to_string(), version))
}

/// Generate the server mount path for an addon.
///
/// Once uploaded, the pipeline server exposes the package under this
/// path relative to the server URL.
///
/// # Format
///
/// `addons/{name}/{version}`
///
/// # Examples
///
/// ```
/// use semver::Version;
/// use addonsmith::addon::addon_mount_path;
///
/// assert_eq!(addon_mount_path("my_addon", &Version::new(1, 2, 0)), "addons/my_addon/1.2.0");
/// ```
pub fn addon_mount_path(name: &str, version: &Version) -> String {
    format!("addons/{}/{}", name.to_lowercase(), version)
}

/// Generate the unauthenticated download path for a file in `public/`.
///
/// # Examples
///
/// ```
/// use semver::Version;
/// use addonsmith::addon::public_url_path;
///
/// assert_eq!(
///     public_url_path("my_addon", &Version::new(1, 2, 0), "icon.png"),
///     "addons/my_addon/1.2.0/public/icon.png"
/// );
/// ```
pub fn public_url_path(name: &str, version: &Version, file: &str) -> String {
    format!("{}/public/{}", addon_mount_path(name, version), file)
}

/// Generate the authenticated download path for a file in `private/`.
///
/// # Examples
///
/// ```
/// use semver::Version;
/// use addonsmith::addon::{private_url_path, CLIENT_ARCHIVE_FILENAME};
///
/// assert_eq!(
///     private_url_path("my_addon", &Version::new(1, 2, 0), CLIENT_ARCHIVE_FILENAME),
///     "addons/my_addon/1.2.0/private/client.tar.gz"
/// );
/// ```
pub fn private_url_path(name: &str, version: &Version, file: &str) -> String {
    format!("{}/private/{}", addon_mount_path(name, version), file)
}
