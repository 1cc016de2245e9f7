//! Atomic write primitives
//!
//! Content is written to a temp file beside the target, flushed to stable
//! storage, then renamed over the target. Readers see either the old file or
//! the new one, never a partial write.

use crate::errors::{io_error, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Temp path used while `target` is being written.
///
/// Lives in the same directory so the final rename never crosses a
/// filesystem boundary.
fn temp_path_for(target: &Path) -> PathBuf {
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    target.with_file_name(format!(".{}.tmp-{}", name, std::process::id()))
}

/// Atomically replace `target` with whatever `fill` writes.
///
/// Creates the parent directory if needed. If `fill` fails the temp file is
/// removed and `target` is left untouched.
///
/// # Errors
///
/// The error returned by `fill`, or an `Io` error from create/sync/rename.
pub fn write_with<T, F>(target: &Path, fill: F) -> Result<T>
where
    F: FnOnce(&mut File) -> Result<T>,
{
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|e| io_error("create_parent_dir", parent, e))?;
    }

    let temp_path = temp_path_for(target);

    let written = (|| -> Result<T> {
        let mut file =
            File::create(&temp_path).map_err(|e| io_error("create_temp", &temp_path, e))?;
        let value = fill(&mut file)?;
        file.flush().map_err(|e| io_error("flush_temp", &temp_path, e))?;
        file.sync_all()
            .map_err(|e| io_error("sync_temp", &temp_path, e))?;
        Ok(value)
    })();

    let value = match written {
        Ok(value) => value,
        Err(e) => {
            let _ = fs::remove_file(&temp_path);
            return Err(e);
        }
    };

    if let Err(e) = fs::rename(&temp_path, target) {
        let _ = fs::remove_file(&temp_path);
        return Err(io_error("rename_temp", target, e));
    }

    sync_parent_dir(target);
    Ok(value)
}

/// Atomically write bytes to a file
pub fn atomic_write(target: &Path, content: &[u8]) -> Result<()> {
    write_with(target, |file| {
        file.write_all(content)
            .map_err(|e| io_error("write_temp", target, e))
    })
}

/// Persist the directory entry created by the rename.
#[cfg(unix)]
fn sync_parent_dir(target: &Path) {
    if let Some(parent) = target.parent() {
        if let Err(e) = File::open(parent).and_then(|dir| dir.sync_all()) {
            tracing::debug!(path = %parent.display(), error = %e, "Directory sync failed");
        }
    }
}

#[cfg(not(unix))]
fn sync_parent_dir(_target: &Path) {}
