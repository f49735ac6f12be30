//! Verbatim directory copying with packaging filters.
//!
//! Source folders are copied into the package as-is, except for build
//! caches and editor droppings that must never ship: `__pycache__/`,
//! compiled Python files, VCS metadata and similar. Entries are visited
//! in sorted name order so repeated runs produce the package in the same
//! order.

use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use glob::Pattern;

use crate::error::{PackageError, PackageResult};

/// Name patterns excluded from every package.
const IGNORE_PATTERNS: [&str; 7] = [
    "__pycache__",
    "*.pyc",
    "*.pyo",
    ".git",
    ".DS_Store",
    "*.swp",
    "Thumbs.db",
];

/// Get the compiled ignore patterns.
fn ignore_patterns() -> &'static Vec<Pattern> {
    static PATTERNS: OnceLock<Vec<Pattern>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        IGNORE_PATTERNS
            .iter()
            .map(|p| Pattern::new(p).unwrap())
            .collect()
    })
}

/// Check whether a file or directory name is excluded from packaging.
///
/// Matches against the entry name only, not the full path, so
/// `__pycache__` is skipped at any depth.
///
/// # Example
///
/// ```
/// use addonsmith::packager::is_ignored;
///
/// assert!(is_ignored("__pycache__"));
/// assert!(is_ignored("module.pyc"));
/// assert!(!is_ignored("module.py"));
/// ```
pub fn is_ignored(name: &str) -> bool {
    ignore_patterns().iter().any(|p| p.matches(name))
}

/// Statistics from copying one source folder.
#[derive(Debug, Clone, Default)]
pub struct CopySummary {
    /// Number of files copied.
    pub files: usize,

    /// Total bytes copied.
    pub bytes: u64,

    /// Number of entries skipped by the ignore filter.
    pub skipped: usize,
}

impl CopySummary {
    /// Fold another summary into this one.
    pub fn merge(&mut self, other: &CopySummary) {
        self.files += other.files;
        self.bytes += other.bytes;
        self.skipped += other.skipped;
    }
}

/// Recursively copy a directory, applying the packaging filters.
///
/// The destination directory is created if needed. Entries are copied in
/// sorted name order; ignored names are skipped together with their
/// subtrees.
///
/// # Errors
///
/// Returns [`PackageError::ReadFailed`], [`PackageError::WriteFailed`] or
/// [`PackageError::CreateDirectoryFailed`] on I/O failures.
pub fn copy_dir(source: &Path, dest: &Path) -> PackageResult<CopySummary> {
    fs::create_dir_all(dest).map_err(|source| PackageError::CreateDirectoryFailed {
        path: dest.to_path_buf(),
        source,
    })?;

    let mut summary = CopySummary::default();
    copy_dir_inner(source, dest, &mut summary)?;
    Ok(summary)
}

fn copy_dir_inner(source: &Path, dest: &Path, summary: &mut CopySummary) -> PackageResult<()> {
    let read = fs::read_dir(source).map_err(|e| PackageError::ReadFailed {
        path: source.to_path_buf(),
        source: e,
    })?;

    let mut entries = Vec::new();
    for entry in read {
        let entry = entry.map_err(|e| PackageError::ReadFailed {
            path: source.to_path_buf(),
            source: e,
        })?;
        entries.push(entry.path());
    }

    // Sorted order keeps repeated runs identical
    entries.sort();

    for path in entries {
        let name = match path.file_name() {
            Some(name) => name.to_string_lossy().to_string(),
            None => continue,
        };

        if is_ignored(&name) {
            summary.skipped += 1;
            continue;
        }

        let target = dest.join(&name);

        if path.is_dir() {
            fs::create_dir_all(&target).map_err(|e| PackageError::CreateDirectoryFailed {
                path: target.clone(),
                source: e,
            })?;
            copy_dir_inner(&path, &target, summary)?;
        } else {
            let copied = fs::copy(&path, &target).map_err(|e| PackageError::WriteFailed {
                path: target.clone(),
                source: e,
            })?;
            summary.files += 1;
            summary.bytes += copied;
        }
    }

    Ok(())
}
