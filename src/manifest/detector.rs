//! SOURCES manifest discovery
//!
//! Walks a directory tree and collects every file whose base name is exactly
//! [`MANIFEST_FILENAME`]. Directory symlinks are not followed, so link
//! cycles cannot make the walk loop.

use crate::error::IoError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// File name that marks a manifest
pub const MANIFEST_FILENAME: &str = "SOURCES";

/// Detect all manifest files under `root`, sorted by path
///
/// A missing root is an error. Subdirectories that cannot be read are
/// logged and skipped so one unreadable directory does not hide the rest.
pub fn discover_manifests(root: &Path) -> Result<Vec<PathBuf>, IoError> {
    let metadata = fs::symlink_metadata(root).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IoError::directory_not_found(root)
        } else {
            IoError::generic(root, e)
        }
    })?;

    let mut manifests = Vec::new();

    if !metadata.is_dir() {
        if is_manifest(root) {
            manifests.push(root.to_path_buf());
        }
        return Ok(manifests);
    }

    let root_entries = fs::read_dir(root).map_err(|e| IoError::generic(root, e))?;
    let mut pending: Vec<fs::ReadDir> = vec![root_entries];

    while let Some(entries) = pending.pop() {
        for entry in entries {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    warn!("skipping unreadable directory entry: {}", e);
                    continue;
                }
            };
            let path = entry.path();
            let file_type = match entry.file_type() {
                Ok(t) => t,
                Err(e) => {
                    warn!("cannot stat {}: {}", path.display(), e);
                    continue;
                }
            };

            if file_type.is_dir() {
                match fs::read_dir(&path) {
                    Ok(children) => pending.push(children),
                    Err(e) => warn!("cannot read directory {}: {}", path.display(), e),
                }
            } else if is_manifest(&path) {
                debug!("found manifest {}", path.display());
                manifests.push(path);
            }
        }
    }

    manifests.sort();
    Ok(manifests)
}

/// Check whether a path's base name is exactly the manifest file name
pub fn is_manifest(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name == MANIFEST_FILENAME)
}
