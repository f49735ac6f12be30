//! Addon layout conventions and validation.
//!
//! An addon source tree follows a fixed folder convention. This module
//! inspects a root directory against that convention and produces a
//! [`LayoutReport`] the packager consumes:
//!
//! - `server/` is mandatory; its absence fails packaging
//! - `frontend/dist/`, `public/`, `private/` and `client/` are optional
//!   and packaged when present
//!
//! Inspection is read-only and never fails with an I/O error; problems
//! are recorded as issues on the report instead.

mod inspect;

pub use inspect::{
    inspect, AddonFolder, FolderReport, LayoutIssue, LayoutReport, LayoutWarning,
};
