//! Core addon identity type.
//!
//! The [`Addon`] struct represents the essential identity of an addon,
//! shared across all packaging contexts: layout inspection, assembly,
//! and naming.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use semver::Version;

use super::naming::{addon_mount_path, package_dir_name};

/// Get the addon name regex pattern.
///
/// Addon names appear in server URLs and Python import paths, so the
/// grammar is restricted to lowercase letters, digits and underscores,
/// starting with a letter.
fn name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[a-z][a-z0-9_]*$").unwrap())
}

/// Check whether a string is a valid addon name.
///
/// # Example
///
/// ```
/// use addonsmith::addon::is_valid_name;
///
/// assert!(is_valid_name("my_addon"));
/// assert!(is_valid_name("render2"));
/// assert!(!is_valid_name("My-Addon"));
/// assert!(!is_valid_name("2fast"));
/// assert!(!is_valid_name(""));
/// ```
pub fn is_valid_name(name: &str) -> bool {
    name_pattern().is_match(name)
}

/// Core addon identity.
///
/// This is the base type representing an addon. It contains the
/// identifying information used across all packaging contexts:
/// - **Layout**: locating the source folders
/// - **Packager**: naming the output directory and stamping versions
/// - **Server**: the mount path the package is served from
///
/// # Example
///
/// ```
/// use semver::Version;
/// use addonsmith::addon::Addon;
///
/// let addon = Addon::new("my_addon", Version::new(1, 2, 0));
///
/// assert_eq!(addon.name, "my_addon");
/// assert_eq!(addon.package_dir_name(), "my_addon-1.2.0");
/// assert_eq!(addon.mount_path(), "addons/my_addon/1.2.0");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Addon {
    /// Addon name (e.g., "my_addon").
    ///
    /// Names are always stored in lowercase.
    pub name: String,

    /// Addon version using semantic versioning.
    pub version: Version,
}

impl Addon {
    /// Create a new addon identity.
    ///
    /// The name is normalized to lowercase. Use [`is_valid_name`] to check
    /// the grammar before constructing if the name comes from user input.
    ///
    /// # Example
    ///
    /// ```
    /// use semver::Version;
    /// use addonsmith::addon::Addon;
    ///
    /// let addon = Addon::new("My_Addon", Version::new(1, 0, 0));
    /// assert_eq!(addon.name, "my_addon"); // Normalized to lowercase
    /// ```
    pub fn new(name: impl Into<String>, version: Version) -> Self {
        Self {
            name: name.into().to_lowercase(),
            version,
        }
    }

    /// Get the canonical package directory name for this addon.
    ///
    /// Format: `{name}-{version}`
    ///
    /// # Example
    ///
    /// ```
    /// use semver::Version;
    /// use addonsmith::addon::Addon;
    ///
    /// let addon = Addon::new("my_addon", Version::new(1, 2, 3));
    /// assert_eq!(addon.package_dir_name(), "my_addon-1.2.3");
    /// ```
    pub fn package_dir_name(&self) -> String {
        package_dir_name(&self.name, &self.version)
    }

    /// Get the server mount path for this addon.
    ///
    /// This is where the pipeline server exposes the package once
    /// uploaded: `addons/{name}/{version}`.
    ///
    /// # Example
    ///
    /// ```
    /// use semver::Version;
    /// use addonsmith::addon::Addon;
    ///
    /// let addon = Addon::new("my_addon", Version::new(1, 0, 0));
    /// assert_eq!(addon.mount_path(), "addons/my_addon/1.0.0");
    /// ```
    pub fn mount_path(&self) -> String {
        addon_mount_path(&self.name, &self.version)
    }
}

impl fmt::Display for Addon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} v{}", self.name, self.version)
    }
}
