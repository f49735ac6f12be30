//! Addon version handling.
//!
//! The addon version lives in a single `VERSION` file at the addon root:
//! one semantic version string, maintained by hand or bumped with the
//! `version` command. Packaging reads this file once and stamps the same
//! value into every copy it emits, so the server-side and client-side
//! code of a package can never disagree about their version.

mod file;

pub use file::{
    bump_version, parse_version, read_version, version_file_path, write_version, VersionBump,
    VERSION_FILENAME,
};
