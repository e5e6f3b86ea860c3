//! Filesystem helpers integrating with the crate's error handling.

use crate::error::CoreError;
use std::fs;
use std::path::Path;

/// Ensures that a directory exists at the given path, creating it (and any
/// missing parents) when absent.
///
/// Fails with [`CoreError::Filesystem`] if the path exists but is not a
/// directory, or if creation fails.
pub fn ensure_dir_exists(path: &Path) -> Result<(), CoreError> {
    if path.exists() {
        if path.is_dir() {
            Ok(())
        } else {
            Err(CoreError::Filesystem {
                message: "Path exists but is not a directory".to_string(),
                path: path.to_path_buf(),
                source: std::io::Error::new(
                    std::io::ErrorKind::AlreadyExists,
                    "path occupied by a non-directory entry",
                ),
            })
        }
    } else {
        fs::create_dir_all(path).map_err(|source| CoreError::Filesystem {
            message: "Failed to create directory".to_string(),
            path: path.to_path_buf(),
            source,
        })
    }
}
