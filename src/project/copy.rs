//! Recursive template copy

use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use crate::error::CreateError;

/// Copy the whole template tree into `dest`, preserving relative structure
/// and file contents byte-for-byte.
///
/// A failure partway leaves already-copied files in place; the caller's
/// error hint documents that.
pub(crate) fn copy_tree(src: &Path, dest: &Path) -> Result<(), CreateError> {
    for entry in WalkDir::new(src).min_depth(1) {
        let entry = entry.map_err(|e| {
            CreateError::copy_failed(
                format!("Failed to read template directory {}", src.display()),
                Some(e.into()),
            )
        })?;

        let relative = entry.path().strip_prefix(src).map_err(|e| {
            CreateError::copy_failed(
                format!("Failed to relativize {}", entry.path().display()),
                Some(e.into()),
            )
        })?;
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|e| {
                CreateError::copy_failed(
                    format!("Failed to create directory {}", target.display()),
                    Some(e.into()),
                )
            })?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).map_err(|e| {
                    CreateError::copy_failed(
                        format!("Failed to create directory {}", parent.display()),
                        Some(e.into()),
                    )
                })?;
            }
            fs::copy(entry.path(), &target).map_err(|e| {
                CreateError::copy_failed(
                    format!("Failed to copy {}", relative.display()),
                    Some(e.into()),
                )
            })?;
        }
    }
    Ok(())
}
