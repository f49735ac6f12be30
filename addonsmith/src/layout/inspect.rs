//! Addon source tree inspection.
//!
//! This module checks an addon root against the documented folder
//! conventions and produces a presence report for the packager.

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::packager::is_ignored;

/// The folders an addon source tree may contain.
///
/// Only `server` is mandatory; the rest are packaged when present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddonFolder {
    /// Server-side addon code. Mandatory.
    Server,
    /// Built web frontend (`frontend/dist`).
    FrontendDist,
    /// Unauthenticated static files.
    Public,
    /// Authenticated static files.
    Private,
    /// Desktop client code.
    Client,
}

impl AddonFolder {
    /// All folders, in the order they are inspected and packaged.
    pub const ALL: [AddonFolder; 5] = [
        AddonFolder::Server,
        AddonFolder::FrontendDist,
        AddonFolder::Public,
        AddonFolder::Private,
        AddonFolder::Client,
    ];

    /// Path of this folder relative to the addon root.
    ///
    /// The same relative path is used in the package output, so the
    /// package mirrors the source layout.
    pub fn source_path(&self) -> &'static str {
        match self {
            AddonFolder::Server => "server",
            AddonFolder::FrontendDist => "frontend/dist",
            AddonFolder::Public => "public",
            AddonFolder::Private => "private",
            AddonFolder::Client => "client",
        }
    }

    /// Whether packaging fails when this folder is absent.
    pub fn is_required(&self) -> bool {
        matches!(self, AddonFolder::Server)
    }
}

impl fmt::Display for AddonFolder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source_path())
    }
}

/// Fatal problems with an addon source layout.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LayoutIssue {
    /// The addon root path doesn't exist.
    #[error("addon root does not exist: {}", .0.display())]
    RootNotFound(PathBuf),

    /// The mandatory `server` directory is missing.
    #[error("missing mandatory 'server' directory")]
    MissingServer,

    /// A conventional folder name is taken by a regular file.
    #[error("'{0}' exists but is not a directory")]
    NotADirectory(String),
}

/// Non-fatal observations about an addon source layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutWarning {
    /// `frontend/` exists but contains no `dist/` build output.
    FrontendNotBuilt,

    /// `private/` is present with no `client/` code to distribute.
    PrivateWithoutClient,
}

impl fmt::Display for LayoutWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutWarning::FrontendNotBuilt => {
                write!(f, "'frontend' exists but has no 'dist' build output")
            }
            LayoutWarning::PrivateWithoutClient => {
                write!(f, "'private' is present but there is no 'client' code")
            }
        }
    }
}

/// Presence report for one addon folder.
#[derive(Debug, Clone)]
pub struct FolderReport {
    /// Which folder this reports on.
    pub folder: AddonFolder,

    /// Whether the folder exists as a directory.
    pub present: bool,

    /// Number of files the packager would copy (recursive, packaging
    /// filters applied). Zero when absent.
    pub file_count: usize,
}

/// Result of inspecting an addon source tree.
#[derive(Debug, Clone)]
pub struct LayoutReport {
    /// The inspected addon root.
    pub root: PathBuf,

    /// Per-folder presence, in [`AddonFolder::ALL`] order.
    pub folders: Vec<FolderReport>,

    /// Whether the layout can be packaged.
    pub is_valid: bool,

    /// Fatal issues found, if any.
    pub issues: Vec<LayoutIssue>,

    /// Non-fatal observations.
    pub warnings: Vec<LayoutWarning>,
}

impl LayoutReport {
    /// Check whether a folder is present.
    pub fn has(&self, folder: AddonFolder) -> bool {
        self.folders
            .iter()
            .any(|entry| entry.folder == folder && entry.present)
    }

    /// Recursive file count for a folder. Zero when absent.
    pub fn file_count(&self, folder: AddonFolder) -> usize {
        self.folders
            .iter()
            .find(|entry| entry.folder == folder)
            .map(|entry| entry.file_count)
            .unwrap_or(0)
    }

    /// The folders that are present, in packaging order.
    pub fn present_folders(&self) -> Vec<AddonFolder> {
        self.folders
            .iter()
            .filter(|entry| entry.present)
            .map(|entry| entry.folder)
            .collect()
    }

    /// Add a fatal issue and mark the layout invalid.
    fn add_issue(&mut self, issue: LayoutIssue) {
        self.is_valid = false;
        self.issues.push(issue);
    }
}

/// Inspect an addon source tree against the layout conventions.
///
/// Checks that the mandatory `server` folder exists, records which
/// optional folders are present, and flags common mistakes. Read-only:
/// nothing on disk is touched.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use addonsmith::layout::{self, AddonFolder};
///
/// let report = layout::inspect(Path::new("/addons/my_addon"));
/// if report.is_valid {
///     println!("server files: {}", report.file_count(AddonFolder::Server));
/// }
/// ```
pub fn inspect(root: &Path) -> LayoutReport {
    let mut report = LayoutReport {
        root: root.to_path_buf(),
        folders: Vec::new(),
        is_valid: true,
        issues: Vec::new(),
        warnings: Vec::new(),
    };

    if !root.is_dir() {
        report.add_issue(LayoutIssue::RootNotFound(root.to_path_buf()));
        for folder in AddonFolder::ALL {
            report.folders.push(FolderReport {
                folder,
                present: false,
                file_count: 0,
            });
        }
        return report;
    }

    for folder in AddonFolder::ALL {
        let path = root.join(folder.source_path());
        let present = path.is_dir();

        if path.exists() && !present {
            report.add_issue(LayoutIssue::NotADirectory(folder.source_path().to_string()));
        }

        let file_count = if present { count_files(&path) } else { 0 };

        report.folders.push(FolderReport {
            folder,
            present,
            file_count,
        });
    }

    if !report.has(AddonFolder::Server) {
        report.add_issue(LayoutIssue::MissingServer);
    }

    if root.join("frontend").is_dir() && !report.has(AddonFolder::FrontendDist) {
        report.warnings.push(LayoutWarning::FrontendNotBuilt);
    }

    if report.has(AddonFolder::Private) && !report.has(AddonFolder::Client) {
        report.warnings.push(LayoutWarning::PrivateWithoutClient);
    }

    report
}

/// Count files recursively, applying the packaging filters.
///
/// Entries the packager skips (`__pycache__`, `*.pyc`, VCS metadata)
/// are not counted, so the report matches what `pack` will copy.
/// Symlinks are not followed; a link cycle inside an addon folder must
/// not hang inspection.
fn count_files(dir: &Path) -> usize {
    let mut count = 0;

    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            if is_ignored(&entry.file_name().to_string_lossy()) {
                continue;
            }
            let file_type = match entry.file_type() {
                Ok(file_type) => file_type,
                Err(_) => continue,
            };
            if file_type.is_symlink() {
                continue;
            }
            if file_type.is_dir() {
                count += count_files(&entry.path());
            } else {
                count += 1;
            }
        }
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_addon_root(temp: &TempDir) -> PathBuf {
        let root = temp.path().join("my_addon");
        std::fs::create_dir_all(root.join("server")).unwrap();
        std::fs::write(root.join("server").join("__init__.py"), b"").unwrap();
        root
    }

    fn add_files(root: &std::path::Path, folder: &str, files: &[&str]) {
        let dir = root.join(folder);
        std::fs::create_dir_all(&dir).unwrap();
        for file in files {
            std::fs::write(dir.join(file), b"content").unwrap();
        }
    }

    #[test]
    fn test_inspect_minimal_valid_layout() {
        let temp = TempDir::new().unwrap();
        let root = create_addon_root(&temp);

        let report = inspect(&root);

        assert!(report.is_valid);
        assert!(report.issues.is_empty());
        assert!(report.warnings.is_empty());
        assert!(report.has(AddonFolder::Server));
        assert!(!report.has(AddonFolder::Client));
        assert_eq!(report.present_folders(), vec![AddonFolder::Server]);
    }

    #[test]
    fn test_inspect_missing_server() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("my_addon");
        std::fs::create_dir_all(root.join("public")).unwrap();

        let report = inspect(&root);

        assert!(!report.is_valid);
        assert!(report
            .issues
            .iter()
            .any(|issue| matches!(issue, LayoutIssue::MissingServer)));
    }

    #[test]
    fn test_inspect_nonexistent_root() {
        let report = inspect(Path::new("/nonexistent/addon"));

        assert!(!report.is_valid);
        assert!(report
            .issues
            .iter()
            .any(|issue| matches!(issue, LayoutIssue::RootNotFound(_))));
        assert!(report.present_folders().is_empty());
    }

    #[test]
    fn test_inspect_server_is_a_file() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("my_addon");
        std::fs::create_dir_all(&root).unwrap();
        std::fs::write(root.join("server"), b"not a directory").unwrap();

        let report = inspect(&root);

        assert!(!report.is_valid);
        assert!(report
            .issues
            .iter()
            .any(|issue| matches!(issue, LayoutIssue::NotADirectory(name) if name == "server")));
        assert!(report
            .issues
            .iter()
            .any(|issue| matches!(issue, LayoutIssue::MissingServer)));
    }

    #[test]
    fn test_inspect_full_layout() {
        let temp = TempDir::new().unwrap();
        let root = create_addon_root(&temp);
        add_files(&root, "frontend/dist", &["index.html"]);
        add_files(&root, "public", &["icon.png"]);
        add_files(&root, "private", &["notes.txt"]);
        add_files(&root, "client", &["__init__.py", "addon.py"]);

        let report = inspect(&root);

        assert!(report.is_valid);
        assert!(report.warnings.is_empty());
        assert_eq!(report.present_folders().len(), 5);
        assert_eq!(report.file_count(AddonFolder::Client), 2);
        assert_eq!(report.file_count(AddonFolder::Server), 1);
    }

    #[test]
    fn test_inspect_counts_files_recursively() {
        let temp = TempDir::new().unwrap();
        let root = create_addon_root(&temp);
        add_files(&root, "server/api", &["handlers.py", "schema.py"]);

        let report = inspect(&root);

        // __init__.py plus the two nested files
        assert_eq!(report.file_count(AddonFolder::Server), 3);
    }

    #[test]
    fn test_inspect_count_matches_packaging_filters() {
        let temp = TempDir::new().unwrap();
        let root = create_addon_root(&temp);
        add_files(&root, "server", &["handler.py", "handler.pyc"]);
        add_files(&root, "server/__pycache__", &["handler.cpython-311.pyc"]);

        let report = inspect(&root);

        // __init__.py + handler.py; compiled files and caches are not
        // packaged, so they are not reported either
        assert_eq!(report.file_count(AddonFolder::Server), 2);
    }

    #[cfg(unix)]
    #[test]
    fn test_inspect_survives_symlink_cycle() {
        let temp = TempDir::new().unwrap();
        let root = create_addon_root(&temp);
        std::os::unix::fs::symlink(root.join("server"), root.join("server").join("loop"))
            .unwrap();

        let report = inspect(&root);

        assert!(report.is_valid);
        assert_eq!(report.file_count(AddonFolder::Server), 1);
    }

    #[test]
    fn test_inspect_warns_frontend_not_built() {
        let temp = TempDir::new().unwrap();
        let root = create_addon_root(&temp);
        // frontend source without a dist build
        add_files(&root, "frontend/src", &["main.ts"]);

        let report = inspect(&root);

        assert!(report.is_valid);
        assert!(report.warnings.contains(&LayoutWarning::FrontendNotBuilt));
        assert!(!report.has(AddonFolder::FrontendDist));
    }

    #[test]
    fn test_inspect_warns_private_without_client() {
        let temp = TempDir::new().unwrap();
        let root = create_addon_root(&temp);
        add_files(&root, "private", &["readme.txt"]);

        let report = inspect(&root);

        assert!(report.is_valid);
        assert!(report
            .warnings
            .contains(&LayoutWarning::PrivateWithoutClient));
    }

    #[test]
    fn test_inspect_no_warning_with_private_and_client() {
        let temp = TempDir::new().unwrap();
        let root = create_addon_root(&temp);
        add_files(&root, "private", &["readme.txt"]);
        add_files(&root, "client", &["__init__.py"]);

        let report = inspect(&root);

        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_folder_ordering_is_stable() {
        let temp = TempDir::new().unwrap();
        let root = create_addon_root(&temp);
        add_files(&root, "client", &["__init__.py"]);
        add_files(&root, "public", &["icon.png"]);

        let report = inspect(&root);

        // Packaging order follows AddonFolder::ALL, not discovery order
        assert_eq!(
            report.present_folders(),
            vec![AddonFolder::Server, AddonFolder::Public, AddonFolder::Client]
        );
    }

    #[test]
    fn test_required_folders() {
        assert!(AddonFolder::Server.is_required());
        assert!(!AddonFolder::Client.is_required());
        assert!(!AddonFolder::FrontendDist.is_required());
    }

    #[test]
    fn test_folder_display() {
        assert_eq!(AddonFolder::Server.to_string(), "server");
        assert_eq!(AddonFolder::FrontendDist.to_string(), "frontend/dist");
    }
}
