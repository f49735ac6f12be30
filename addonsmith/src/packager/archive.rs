//! Deterministic client archive building.
//!
//! The client archive must be byte-identical across packaging runs of
//! unchanged input, so the gzip and tar headers carry no timestamps,
//! owners or host OS details, and entries are written in sorted path
//! order. Re-running the packager therefore never produces a spurious
//! diff in the archive.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use flate2::{Compression, GzBuilder};
use tar::{Builder, Header};

use super::checksum::calculate_sha256;
use crate::error::{PackageError, PackageResult};

/// Result of building a client archive.
#[derive(Debug, Clone)]
pub struct ArchiveBuildResult {
    /// Path of the written archive.
    pub path: PathBuf,

    /// Number of file entries in the archive.
    pub entry_count: usize,

    /// Compressed size in bytes.
    pub size: u64,

    /// SHA-256 checksum of the archive file.
    pub checksum: String,
}

/// Build a deterministic tar.gz archive of a directory's contents.
///
/// Entry paths are relative to `source_dir`. With `source_dir = None` a
/// valid empty archive is written, which keeps "an archive exists"
/// decoupled from "there was client code to put in it".
///
/// # Errors
///
/// Returns [`PackageError::ReadFailed`] or [`PackageError::WriteFailed`]
/// on I/O failures and [`PackageError::ArchiveFailed`] when the tar or
/// gzip stream cannot be finalized.
pub fn build_archive(
    source_dir: Option<&Path>,
    archive_path: &Path,
) -> PackageResult<ArchiveBuildResult> {
    let file = File::create(archive_path).map_err(|source| PackageError::WriteFailed {
        path: archive_path.to_path_buf(),
        source,
    })?;

    // mtime 0 and OS byte 255 keep the gzip header reproducible
    let encoder = GzBuilder::new()
        .mtime(0)
        .operating_system(255)
        .write(file, Compression::best());
    let mut tar = Builder::new(encoder);
    tar.mode(tar::HeaderMode::Deterministic);

    let mut entry_count = 0;
    if let Some(dir) = source_dir {
        let mut entries = Vec::new();
        collect_files(dir, dir, &mut entries)?;
        entries.sort();

        for (relative, path) in entries {
            append_file(&mut tar, &relative, &path)?;
            entry_count += 1;
        }
    }

    let encoder = tar
        .into_inner()
        .map_err(|e| PackageError::ArchiveFailed(format!("finalizing tar: {}", e)))?;
    encoder
        .finish()
        .map_err(|e| PackageError::ArchiveFailed(format!("compressing gzip stream: {}", e)))?;

    let size = fs::metadata(archive_path)
        .map_err(|source| PackageError::ReadFailed {
            path: archive_path.to_path_buf(),
            source,
        })?
        .len();
    let checksum = calculate_sha256(archive_path)?;

    Ok(ArchiveBuildResult {
        path: archive_path.to_path_buf(),
        entry_count,
        size,
        checksum,
    })
}

/// Collect all files under `dir` as (relative path, absolute path) pairs.
///
/// Relative paths use forward slashes regardless of platform, matching
/// tar entry conventions.
fn collect_files(
    root: &Path,
    dir: &Path,
    entries: &mut Vec<(String, PathBuf)>,
) -> PackageResult<()> {
    let read = fs::read_dir(dir).map_err(|e| PackageError::ReadFailed {
        path: dir.to_path_buf(),
        source: e,
    })?;

    for entry in read {
        let entry = entry.map_err(|e| PackageError::ReadFailed {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();

        if path.is_dir() {
            collect_files(root, &path, entries)?;
        } else {
            let relative = path
                .strip_prefix(root)
                .map_err(|_| {
                    PackageError::InvalidPath(format!(
                        "{} is outside {}",
                        path.display(),
                        root.display()
                    ))
                })?
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/");
            entries.push((relative, path));
        }
    }

    Ok(())
}

/// Append one file entry with a fully pinned header.
fn append_file<W: Write>(tar: &mut Builder<W>, relative: &str, path: &Path) -> PackageResult<()> {
    let data = fs::read(path).map_err(|source| PackageError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })?;

    let mut header = Header::new_gnu();
    header.set_size(data.len() as u64);
    header.set_mode(0o644);
    header.set_uid(0);
    header.set_gid(0);
    header.set_mtime(0);

    // append_data handles long entry names and the header checksum
    tar.append_data(&mut header, relative, data.as_slice())
        .map_err(|e| {
            PackageError::ArchiveFailed(format!("writing entry '{}': {}", relative, e))
        })?;

    Ok(())
}
