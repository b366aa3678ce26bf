//! Atomic filesystem operations for scrip.
//!
//! All atomic writes follow this pattern:
//! 1. Write content to a temporary file in the same directory
//! 2. Sync the file to disk (fsync)
//! 3. Atomically replace the original file
//!
//! On POSIX this relies on `rename()` being atomic when source and
//! destination are on the same filesystem. On Windows the rename is retried
//! after removing an existing destination. On crash, a temporary file named
//! `.{filename}.tmp` may remain in the target directory.

use crate::error::{Result, ScripError};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Atomically write bytes to a file.
///
/// The target file is never observed in a partial state: the content is
/// written to a sibling temp file, synced, then renamed over the target.
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &[u8]) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|e| {
            ScripError::StoreError(format!(
                "failed to create parent directory '{}': {}",
                parent.display(),
                e
            ))
        })?;
    }

    let temp_path = temp_path_for(path)?;

    write_and_sync(&temp_path, content)?;

    replace(&temp_path, path)
}

/// Atomically write a string to a file.
pub fn atomic_write_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    atomic_write(path, content.as_bytes())
}

/// Generate the sibling temp path `.{filename}.tmp` for a target file.
fn temp_path_for(path: &Path) -> Result<PathBuf> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            ScripError::StoreError(format!("invalid target path '{}'", path.display()))
        })?;

    let temp_name = format!(".{}.tmp", file_name);
    Ok(match path.parent() {
        Some(parent) => parent.join(temp_name),
        None => PathBuf::from(temp_name),
    })
}

fn write_and_sync(path: &Path, content: &[u8]) -> Result<()> {
    let mut file = File::create(path).map_err(|e| {
        ScripError::StoreError(format!(
            "failed to create temp file '{}': {}",
            path.display(),
            e
        ))
    })?;

    file.write_all(content).map_err(|e| {
        ScripError::StoreError(format!(
            "failed to write temp file '{}': {}",
            path.display(),
            e
        ))
    })?;

    file.sync_all().map_err(|e| {
        ScripError::StoreError(format!(
            "failed to sync temp file '{}': {}",
            path.display(),
            e
        ))
    })
}

fn replace(temp_path: &Path, path: &Path) -> Result<()> {
    match fs::rename(temp_path, path) {
        Ok(()) => Ok(()),
        Err(rename_err) => {
            // Windows cannot rename over an existing file; retry after removal.
            if path.exists() {
                fs::remove_file(path).map_err(|e| {
                    ScripError::StoreError(format!(
                        "failed to replace '{}': {}",
                        path.display(),
                        e
                    ))
                })?;
                fs::rename(temp_path, path).map_err(|e| {
                    ScripError::StoreError(format!(
                        "failed to rename temp file over '{}': {}",
                        path.display(),
                        e
                    ))
                })
            } else {
                Err(ScripError::StoreError(format!(
                    "failed to rename temp file over '{}': {}",
                    path.display(),
                    rename_err
                )))
            }
        }
    }
}
