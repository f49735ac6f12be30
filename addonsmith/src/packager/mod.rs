//! Package assembler for creating distributable addon packages.
//!
//! This module turns a validated addon source tree into a package ready
//! for upload to the pipeline server: the source folders copied verbatim
//! (minus build caches), the addon version stamped into the server and
//! client copies, a deterministic `client.tar.gz` for private
//! distribution, and a `manifest.json` describing the result.
//!
//! # Overview
//!
//! The packaging workflow:
//! 1. Resolve the addon name and version (`assemble`)
//! 2. Inspect the layout ([`crate::layout`])
//! 3. Copy folders with the packaging filters (`copy`)
//! 4. Build the client archive when `private/` exists (`archive`)
//! 5. Write the manifest with the archive checksum (`manifest`)
//!
//! # Example
//!
//! ```ignore
//! use addonsmith::packager::{assemble, PackageOptions};
//!
//! let summary = assemble("/addons/my_addon".as_ref(), &PackageOptions::default())?;
//!
//! println!("packaged {} files", summary.file_count);
//! if let Some(archive) = summary.archive {
//!     println!("client archive: {} ({})", archive.path.display(), archive.checksum);
//! }
//! ```

mod archive;
mod assemble;
mod checksum;
mod copy;
mod manifest;

pub use archive::{build_archive, ArchiveBuildResult};
pub use assemble::{assemble, PackageOptions, PackageSummary, DEFAULT_OUTPUT_DIR};
pub use checksum::calculate_sha256;
pub use copy::{copy_dir, is_ignored, CopySummary};
pub use manifest::{
    read_manifest, write_manifest, ClientArchiveInfo, PackageManifest, MANIFEST_FILENAME,
};
