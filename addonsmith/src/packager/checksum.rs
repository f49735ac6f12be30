//! SHA-256 checksums for package artifacts.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::error::{PackageError, PackageResult};

/// Calculate the SHA-256 checksum of a file.
///
/// Returns the checksum as a lowercase hex string. The file is read in
/// chunks, so large archives do not need to fit in memory.
///
/// # Errors
///
/// Returns [`PackageError::ReadFailed`] if the file cannot be opened or
/// read.
pub fn calculate_sha256(path: &Path) -> PackageResult<String> {
    let mut file = File::open(path).map_err(|source| PackageError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })?;

    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];

    loop {
        let read = file
            .read(&mut buffer)
            .map_err(|source| PackageError::ReadFailed {
                path: path.to_path_buf(),
                source,
            })?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }

    let digest = hasher.finalize();
    Ok(digest.iter().map(|byte| format!("{:02x}", byte)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_checksum_known_value() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("hello.txt");
        std::fs::write(&path, b"hello world").unwrap();

        let checksum = calculate_sha256(&path).unwrap();
        assert_eq!(
            checksum,
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn test_checksum_empty_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("empty");
        std::fs::write(&path, b"").unwrap();

        let checksum = calculate_sha256(&path).unwrap();
        assert_eq!(
            checksum,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_checksum_differs_for_different_content() {
        let temp = TempDir::new().unwrap();
        let a = temp.path().join("a");
        let b = temp.path().join("b");
        std::fs::write(&a, b"content a").unwrap();
        std::fs::write(&b, b"content b").unwrap();

        assert_ne!(
            calculate_sha256(&a).unwrap(),
            calculate_sha256(&b).unwrap()
        );
    }

    #[test]
    fn test_checksum_missing_file() {
        let err = calculate_sha256(Path::new("/nonexistent/file")).unwrap_err();
        assert!(matches!(err, PackageError::ReadFailed { .. }));
    }
}
