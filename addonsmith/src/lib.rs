//! Addonsmith - addon packaging for pipeline server platforms.
//!
//! This library turns a conventional addon source layout into a distributable
//! package: a versioned directory tree ready for upload to a pipeline server,
//! plus a compressed client archive for desktop distribution.
//!
//! # Overview
//!
//! The packaging workflow:
//! 1. Read the addon version from the `VERSION` file ([`version`])
//! 2. Inspect the source layout and report what is present ([`layout`])
//! 3. Assemble the package directory and client archive ([`packager`])
//!
//! An addon source tree follows a fixed convention:
//!
//! ```text
//! my_addon/
//! ├── VERSION            required, semantic version
//! ├── server/            required, server-side addon code
//! ├── frontend/dist/     optional, built web frontend
//! ├── public/            optional, unauthenticated static files
//! ├── private/           optional, authenticated static files
//! └── client/            optional, desktop client code
//! ```
//!
//! The assembled package mirrors this layout under
//! `package/{name}-{version}/`, with the version stamped into the server and
//! client copies so every copy of the addon reports the same version. The
//! server mounts the package at `addons/{name}/{version}/` and serves the
//! `public/` and `private/` folders over HTTP.

pub mod addon;
pub mod config;
pub mod error;
pub mod layout;
pub mod logging;
pub mod packager;
pub mod version;

pub use error::{PackageError, PackageResult};

/// Library version from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
