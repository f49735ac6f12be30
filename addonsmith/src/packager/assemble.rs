//! Package assembly pipeline.
//!
//! Coordinates the packaging phases:
//! 1. Resolve the addon identity (name from the root, version from `VERSION`)
//! 2. Inspect the source layout
//! 3. Recreate the package directory and copy the present folders
//! 4. Stamp the version into the server and client copies
//! 5. Build the client archive when `private/` is present
//! 6. Write the package manifest
//!
//! Each run rebuilds the package from scratch; there is no incremental
//! update of a previous output.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::archive::{build_archive, ArchiveBuildResult};
use super::copy::{copy_dir, CopySummary};
use super::manifest::{write_manifest, ClientArchiveInfo, PackageManifest};
use crate::addon::{self, Addon, CLIENT_ARCHIVE_FILENAME};
use crate::error::{PackageError, PackageResult};
use crate::layout::{self, AddonFolder, LayoutIssue, LayoutReport, LayoutWarning};
use crate::version::{read_version, write_version};

/// Default output directory name under the addon root.
pub const DEFAULT_OUTPUT_DIR: &str = "package";

/// Options controlling package assembly.
///
/// # Example
///
/// ```
/// use addonsmith::packager::PackageOptions;
///
/// let options = PackageOptions::default()
///     .with_name("my_addon")
///     .with_skip_archive(true);
///
/// assert_eq!(options.name.as_deref(), Some("my_addon"));
/// assert!(options.skip_archive);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PackageOptions {
    /// Override the addon name. Defaults to the root directory name.
    pub name: Option<String>,

    /// Output directory. Defaults to `package/` under the addon root.
    pub output_dir: Option<PathBuf>,

    /// Skip building the client archive even when `private/` is present.
    pub skip_archive: bool,
}

impl PackageOptions {
    /// Set the addon name override.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the output directory.
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(output_dir.into());
        self
    }

    /// Set whether to skip the client archive.
    pub fn with_skip_archive(mut self, skip_archive: bool) -> Self {
        self.skip_archive = skip_archive;
        self
    }
}

/// Summary of an assembled package.
#[derive(Debug, Clone)]
pub struct PackageSummary {
    /// The packaged addon.
    pub addon: Addon,

    /// Package output directory.
    pub package_dir: PathBuf,

    /// Folders included in the package, in packaging order.
    pub folders: Vec<AddonFolder>,

    /// Number of files in the package, version stamps included.
    pub file_count: usize,

    /// Total bytes copied from the source folders.
    pub total_size: u64,

    /// Number of source entries excluded by the packaging filters.
    pub skipped: usize,

    /// Client archive details, when one was built.
    pub archive: Option<ArchiveBuildResult>,

    /// Non-fatal layout observations.
    pub warnings: Vec<LayoutWarning>,
}

/// Assemble a distributable package from an addon source tree.
///
/// Reads the version, validates the layout, copies every present folder
/// into a freshly created `{name}-{version}` directory, stamps the
/// version into the server and client copies, builds the client archive
/// when `private/` is present, and writes the manifest.
///
/// Running twice on unchanged input produces byte-identical output.
///
/// # Errors
///
/// Returns [`PackageError::MissingServer`] when the mandatory `server`
/// folder is absent, [`PackageError::MissingVersionFile`] or
/// [`PackageError::InvalidVersion`] for version problems, and the
/// filesystem variants for I/O failures.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use addonsmith::packager::{assemble, PackageOptions};
///
/// let summary = assemble(Path::new("/addons/my_addon"), &PackageOptions::default())?;
/// println!("packaged {} to {}", summary.addon, summary.package_dir.display());
/// # Ok::<(), addonsmith::PackageError>(())
/// ```
pub fn assemble(root: &Path, options: &PackageOptions) -> PackageResult<PackageSummary> {
    if !root.is_dir() {
        return Err(PackageError::RootNotFound(root.to_path_buf()));
    }

    let addon = resolve_addon(root, options)?;
    info!(addon = %addon, root = %root.display(), "assembling package");

    let report = layout::inspect(root);
    if !report.is_valid {
        return Err(layout_error(&report));
    }
    for warning in &report.warnings {
        warn!("{}", warning);
    }

    let package_dir = prepare_package_dir(root, &addon, options)?;

    // Copy every present folder, mirroring the source layout
    let mut copied = CopySummary::default();
    let folders = report.present_folders();
    for folder in &folders {
        let source = root.join(folder.source_path());
        let dest = package_dir.join(folder.source_path());
        let summary = copy_dir(&source, &dest)?;
        debug!(
            folder = %folder,
            files = summary.files,
            skipped = summary.skipped,
            "copied folder"
        );
        copied.merge(&summary);
    }

    // Stamp the shared version into the server and client copies
    let mut stamped = 1;
    write_version(&package_dir.join(AddonFolder::Server.source_path()), &addon.version)?;
    if report.has(AddonFolder::Client) {
        write_version(&package_dir.join(AddonFolder::Client.source_path()), &addon.version)?;
        stamped += 1;
    }
    debug!(version = %addon.version, copies = stamped, "stamped version");

    // The client archive is produced exactly when `private/` is present
    let archive = if report.has(AddonFolder::Private) && !options.skip_archive {
        let client_copy = package_dir.join(AddonFolder::Client.source_path());
        let client_source = report.has(AddonFolder::Client).then_some(client_copy);
        let archive_path = package_dir
            .join(AddonFolder::Private.source_path())
            .join(CLIENT_ARCHIVE_FILENAME);
        let result = build_archive(client_source.as_deref(), &archive_path)?;
        debug!(
            entries = result.entry_count,
            size = result.size,
            "built client archive"
        );
        Some(result)
    } else {
        None
    };

    let manifest = PackageManifest::new(
        &addon,
        folders.iter().map(|folder| folder.to_string()).collect(),
        archive.as_ref().map(|result| ClientArchiveInfo {
            filename: CLIENT_ARCHIVE_FILENAME.to_string(),
            size: result.size,
            sha256: result.checksum.clone(),
        }),
    );
    write_manifest(&package_dir, &manifest)?;

    info!(
        package = %package_dir.display(),
        files = copied.files + stamped,
        "package assembled"
    );

    Ok(PackageSummary {
        addon,
        package_dir,
        folders,
        file_count: copied.files + stamped,
        total_size: copied.bytes,
        skipped: copied.skipped,
        archive,
        warnings: report.warnings,
    })
}

/// Resolve the addon identity from the root directory and options.
///
/// The root is canonicalized before taking its directory name, so
/// relative roots like `.` resolve to the actual addon directory.
fn resolve_addon(root: &Path, options: &PackageOptions) -> PackageResult<Addon> {
    let name = match &options.name {
        Some(name) => name.to_lowercase(),
        None => root
            .canonicalize()
            .ok()
            .as_deref()
            .unwrap_or(root)
            .file_name()
            .map(|name| name.to_string_lossy().to_lowercase())
            .ok_or_else(|| {
                PackageError::InvalidPath(format!(
                    "cannot derive an addon name from {}",
                    root.display()
                ))
            })?,
    };

    if !addon::is_valid_name(&name) {
        return Err(PackageError::InvalidAddonName(name));
    }

    let version = read_version(root)?;
    Ok(Addon::new(name, version))
}

/// Map a failed layout report to the packaging error.
fn layout_error(report: &LayoutReport) -> PackageError {
    for issue in &report.issues {
        if let LayoutIssue::RootNotFound(path) = issue {
            return PackageError::RootNotFound(path.clone());
        }
    }
    for issue in &report.issues {
        if matches!(issue, LayoutIssue::MissingServer) {
            return PackageError::MissingServer(report.root.clone());
        }
    }
    match report.issues.first() {
        Some(LayoutIssue::NotADirectory(name)) => PackageError::InvalidPath(format!(
            "'{}' in {} is not a directory",
            name,
            report.root.display()
        )),
        _ => PackageError::InvalidPath(format!("invalid layout at {}", report.root.display())),
    }
}

/// Delete any previous output and create a fresh package directory.
fn prepare_package_dir(
    root: &Path,
    addon: &Addon,
    options: &PackageOptions,
) -> PackageResult<PathBuf> {
    let output_root = options
        .output_dir
        .clone()
        .unwrap_or_else(|| root.join(DEFAULT_OUTPUT_DIR));
    let package_dir = output_root.join(addon.package_dir_name());

    if package_dir.exists() {
        debug!(path = %package_dir.display(), "removing previous package output");
        fs::remove_dir_all(&package_dir).map_err(|source| PackageError::RemoveFailed {
            path: package_dir.clone(),
            source,
        })?;
    }

    fs::create_dir_all(&package_dir).map_err(|source| PackageError::CreateDirectoryFailed {
        path: package_dir.clone(),
        source,
    })?;

    Ok(package_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use semver::Version;
    use tempfile::TempDir;

    /// Create a minimal valid addon root: `server/__init__.py` + VERSION.
    fn temp_addon(temp: &TempDir, name: &str, version: &str) -> PathBuf {
        let root = temp.path().join(name);
        fs::create_dir_all(root.join("server")).unwrap();
        fs::write(root.join("server").join("__init__.py"), b"# server\n").unwrap();
        fs::write(root.join("VERSION"), format!("{}\n", version)).unwrap();
        root
    }

    fn add_files(root: &Path, folder: &str, files: &[(&str, &[u8])]) {
        let dir = root.join(folder);
        fs::create_dir_all(&dir).unwrap();
        for (name, content) in files {
            let path = dir.join(name);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(path, content).unwrap();
        }
    }

    fn dir_entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_assemble_minimal_addon() {
        let temp = TempDir::new().unwrap();
        let root = temp_addon(&temp, "my_addon", "1.2.0");

        let summary = assemble(&root, &PackageOptions::default()).unwrap();

        assert_eq!(summary.addon.name, "my_addon");
        assert_eq!(summary.addon.version, Version::new(1, 2, 0));
        assert_eq!(summary.folders, vec![AddonFolder::Server]);
        assert!(summary.archive.is_none());
        assert!(summary.warnings.is_empty());

        // Output contains exactly the server copy plus the manifest
        let package_dir = root.join("package").join("my_addon-1.2.0");
        assert_eq!(summary.package_dir, package_dir);
        assert_eq!(dir_entries(&package_dir), vec!["manifest.json", "server"]);
        assert_eq!(
            fs::read_to_string(package_dir.join("server/VERSION")).unwrap(),
            "1.2.0\n"
        );
        assert!(package_dir.join("server/__init__.py").exists());
    }

    #[test]
    fn test_assemble_missing_server() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("my_addon");
        fs::create_dir_all(root.join("public")).unwrap();
        fs::write(root.join("VERSION"), "1.0.0\n").unwrap();

        let err = assemble(&root, &PackageOptions::default()).unwrap_err();
        assert!(matches!(err, PackageError::MissingServer(_)));
    }

    #[test]
    fn test_assemble_missing_root() {
        let temp = TempDir::new().unwrap();

        let err = assemble(&temp.path().join("nope"), &PackageOptions::default()).unwrap_err();
        assert!(matches!(err, PackageError::RootNotFound(_)));
    }

    #[test]
    fn test_assemble_missing_version_file() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("my_addon");
        fs::create_dir_all(root.join("server")).unwrap();

        let err = assemble(&root, &PackageOptions::default()).unwrap_err();
        assert!(matches!(err, PackageError::MissingVersionFile(_)));
    }

    #[test]
    fn test_assemble_invalid_version() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("my_addon");
        fs::create_dir_all(root.join("server")).unwrap();
        fs::write(root.join("VERSION"), "one.two.three\n").unwrap();

        let err = assemble(&root, &PackageOptions::default()).unwrap_err();
        assert!(matches!(err, PackageError::InvalidVersion(_)));
    }

    #[test]
    fn test_assemble_invalid_directory_name() {
        let temp = TempDir::new().unwrap();
        let root = temp_addon(&temp, "My-Addon", "1.0.0");

        let err = assemble(&root, &PackageOptions::default()).unwrap_err();
        assert!(matches!(err, PackageError::InvalidAddonName(_)));
    }

    #[test]
    fn test_assemble_from_current_dir() {
        let temp = TempDir::new().unwrap();
        let root = temp_addon(&temp, "my_addon", "1.0.0");

        // `addonsmith pack` defaults the root to `.`; the name must come
        // from the resolved directory, not the literal path
        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(&root).unwrap();
        let result = assemble(Path::new("."), &PackageOptions::default());
        std::env::set_current_dir(original).unwrap();

        let summary = result.unwrap();
        assert_eq!(summary.addon.name, "my_addon");
        assert!(root.join("package/my_addon-1.0.0/server/VERSION").exists());
    }

    #[test]
    fn test_assemble_name_override() {
        let temp = TempDir::new().unwrap();
        let root = temp_addon(&temp, "My-Addon", "1.0.0");

        let options = PackageOptions::default().with_name("my_addon");
        let summary = assemble(&root, &options).unwrap();

        assert_eq!(summary.addon.name, "my_addon");
        assert!(root.join("package/my_addon-1.0.0").is_dir());
    }

    #[test]
    fn test_assemble_version_identical_in_both_copies() {
        let temp = TempDir::new().unwrap();
        let root = temp_addon(&temp, "my_addon", "2.5.1");
        add_files(&root, "client", &[("__init__.py", b"# client\n")]);

        let summary = assemble(&root, &PackageOptions::default()).unwrap();

        let server_version =
            fs::read(summary.package_dir.join("server/VERSION")).unwrap();
        let client_version =
            fs::read(summary.package_dir.join("client/VERSION")).unwrap();
        assert_eq!(server_version, client_version);
        assert_eq!(server_version, b"2.5.1\n");
    }

    #[test]
    fn test_assemble_archive_only_with_private() {
        let temp = TempDir::new().unwrap();

        // Without private: no archive anywhere
        let without = temp_addon(&temp, "without_private", "1.0.0");
        add_files(&without, "client", &[("__init__.py", b"code")]);
        let summary = assemble(&without, &PackageOptions::default()).unwrap();
        assert!(summary.archive.is_none());

        // With private: archive in the private folder
        let with = temp_addon(&temp, "with_private", "1.0.0");
        add_files(&with, "client", &[("__init__.py", b"code")]);
        add_files(&with, "private", &[("notes.txt", b"internal")]);
        let summary = assemble(&with, &PackageOptions::default()).unwrap();

        let archive = summary.archive.expect("archive should be built");
        assert_eq!(
            archive.path,
            summary.package_dir.join("private/client.tar.gz")
        );
        assert!(archive.path.exists());
        assert_eq!(archive.entry_count, 2); // __init__.py + stamped VERSION
    }

    #[test]
    fn test_assemble_skip_archive() {
        let temp = TempDir::new().unwrap();
        let root = temp_addon(&temp, "my_addon", "1.0.0");
        add_files(&root, "client", &[("__init__.py", b"code")]);
        add_files(&root, "private", &[("notes.txt", b"internal")]);

        let options = PackageOptions::default().with_skip_archive(true);
        let summary = assemble(&root, &options).unwrap();

        assert!(summary.archive.is_none());
        assert!(!summary
            .package_dir
            .join("private/client.tar.gz")
            .exists());
    }

    #[test]
    fn test_assemble_private_without_client_gets_empty_archive() {
        let temp = TempDir::new().unwrap();
        let root = temp_addon(&temp, "my_addon", "1.0.0");
        add_files(&root, "private", &[("notes.txt", b"internal")]);

        let summary = assemble(&root, &PackageOptions::default()).unwrap();

        let archive = summary.archive.expect("archive should still be built");
        assert_eq!(archive.entry_count, 0);
        assert!(summary
            .warnings
            .contains(&LayoutWarning::PrivateWithoutClient));
    }

    #[test]
    fn test_assemble_full_layout() {
        let temp = TempDir::new().unwrap();
        let root = temp_addon(&temp, "my_addon", "1.4.0");
        add_files(&root, "frontend/dist", &[("index.html", b"<html></html>")]);
        add_files(&root, "public", &[("icon.png", b"png")]);
        add_files(&root, "private", &[("notes.txt", b"internal")]);
        add_files(
            &root,
            "client",
            &[("__init__.py", b"init"), ("api/lib.py", b"lib")],
        );

        let summary = assemble(&root, &PackageOptions::default()).unwrap();

        assert_eq!(summary.folders.len(), 5);
        let package_dir = &summary.package_dir;
        assert!(package_dir.join("server/__init__.py").exists());
        assert!(package_dir.join("frontend/dist/index.html").exists());
        assert!(package_dir.join("public/icon.png").exists());
        assert!(package_dir.join("private/notes.txt").exists());
        assert!(package_dir.join("private/client.tar.gz").exists());
        assert!(package_dir.join("client/api/lib.py").exists());
        assert!(package_dir.join("manifest.json").exists());
    }

    #[test]
    fn test_assemble_manifest_contents() {
        let temp = TempDir::new().unwrap();
        let root = temp_addon(&temp, "my_addon", "1.0.0");
        add_files(&root, "client", &[("__init__.py", b"code")]);
        add_files(&root, "private", &[("k.txt", b"v")]);

        let summary = assemble(&root, &PackageOptions::default()).unwrap();
        let manifest =
            super::super::manifest::read_manifest(&summary.package_dir).unwrap();

        assert_eq!(manifest.name, "my_addon");
        assert_eq!(manifest.version, "1.0.0");
        assert_eq!(manifest.folders, vec!["server", "private", "client"]);

        let info = manifest.client_archive.expect("archive info in manifest");
        let archive = summary.archive.unwrap();
        assert_eq!(info.sha256, archive.checksum);
        assert_eq!(info.size, archive.size);
        assert_eq!(info.filename, "client.tar.gz");
    }

    #[test]
    fn test_assemble_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let root = temp_addon(&temp, "my_addon", "1.0.0");
        add_files(&root, "client", &[("__init__.py", b"code")]);
        add_files(&root, "private", &[("k.txt", b"v")]);

        let first = assemble(&root, &PackageOptions::default()).unwrap();
        let archive_bytes = fs::read(first.package_dir.join("private/client.tar.gz")).unwrap();
        let manifest_bytes = fs::read(first.package_dir.join("manifest.json")).unwrap();

        let second = assemble(&root, &PackageOptions::default()).unwrap();

        assert_eq!(first.package_dir, second.package_dir);
        assert_eq!(
            fs::read(second.package_dir.join("private/client.tar.gz")).unwrap(),
            archive_bytes
        );
        assert_eq!(
            fs::read(second.package_dir.join("manifest.json")).unwrap(),
            manifest_bytes
        );
    }

    #[test]
    fn test_assemble_removes_stale_output() {
        let temp = TempDir::new().unwrap();
        let root = temp_addon(&temp, "my_addon", "1.0.0");

        let summary = assemble(&root, &PackageOptions::default()).unwrap();
        let stale = summary.package_dir.join("stale_leftover.txt");
        fs::write(&stale, b"junk").unwrap();

        assemble(&root, &PackageOptions::default()).unwrap();
        assert!(!stale.exists());
    }

    #[test]
    fn test_assemble_filters_build_caches() {
        let temp = TempDir::new().unwrap();
        let root = temp_addon(&temp, "my_addon", "1.0.0");
        add_files(
            &root,
            "server",
            &[
                ("handler.py", b"code"),
                ("handler.pyc", b"compiled"),
                ("__pycache__/handler.cpython-311.pyc", b"cache"),
            ],
        );

        let summary = assemble(&root, &PackageOptions::default()).unwrap();

        let server_copy = summary.package_dir.join("server");
        assert!(server_copy.join("handler.py").exists());
        assert!(!server_copy.join("handler.pyc").exists());
        assert!(!server_copy.join("__pycache__").exists());
        assert_eq!(summary.skipped, 2);
    }

    #[test]
    fn test_assemble_custom_output_dir() {
        let temp = TempDir::new().unwrap();
        let root = temp_addon(&temp, "my_addon", "1.0.0");
        let output = temp.path().join("builds");

        let options = PackageOptions::default().with_output_dir(&output);
        let summary = assemble(&root, &options).unwrap();

        assert_eq!(summary.package_dir, output.join("my_addon-1.0.0"));
        assert!(!root.join("package").exists());
    }

    #[test]
    fn test_assemble_counts_files() {
        let temp = TempDir::new().unwrap();
        let root = temp_addon(&temp, "my_addon", "1.0.0");
        add_files(&root, "public", &[("a.png", b"a"), ("b.png", b"b")]);

        let summary = assemble(&root, &PackageOptions::default()).unwrap();

        // __init__.py + 2 public files + stamped server VERSION
        assert_eq!(summary.file_count, 4);
        assert_eq!(summary.total_size, 11);
    }
}
