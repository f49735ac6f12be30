//! Addon identity and naming.
//!
//! This module provides the core data structures for identifying addons
//! and the naming conventions shared between the packager and the pipeline
//! server.
//!
//! # Overview
//!
//! An addon is identified by a name and a semantic version. Everything the
//! packager emits derives its name from these two values:
//!
//! - **Package directory**: `{name}-{version}` under the output root
//! - **Server mount path**: `addons/{name}/{version}`
//! - **Client archive**: `client.tar.gz` inside the package's `private/`
//!   folder, downloaded by the desktop launcher from the private mount
//!
//! Addon names are restricted to `[a-z][a-z0-9_]*` because they appear in
//! URLs and Python import paths on the server side.

mod core;
mod naming;

pub use self::core::{is_valid_name, Addon};
pub use naming::{
    addon_mount_path, package_dir_name, parse_package_dir_name, private_url_path, public_url_path,
    CLIENT_ARCHIVE_FILENAME,
};

// Re-export semver::Version for convenience
pub use semver::Version;
