//! Working-tree scanner.

use crate::errors::Result;
use crate::ignore::IgnoreList;
use gshot_core::errors::{ExError, ExErrorKind};
use gshot_core::model::file_record::normalize_relative;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Walk `root` depth-first and return every regular file not excluded by
/// `ignore`, as paths relative to `root`.
///
/// Ignored directories are pruned without being descended into. Symlinks
/// are neither followed nor returned. Entries are visited in file-name
/// order within each directory.
///
/// # Errors
///
/// `Io` on the first traversal failure; no partial result is returned.
pub fn scan(root: &Path, ignore: &IgnoreList) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            if e.depth() == 0 || !e.file_type().is_dir() {
                return true;
            }
            let name = e.file_name().to_string_lossy();
            let relative = relative_key(root, e.path());
            !ignore.ignores_dir(&name, &relative)
        });

    for entry in walker {
        let entry = entry.map_err(|e| traversal_error(root, &e))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        let relative = relative_key(root, entry.path());
        if ignore.ignores_file(&name, &relative) {
            tracing::trace!(path = %relative, "Ignored file");
            continue;
        }

        if let Ok(stripped) = entry.path().strip_prefix(root) {
            files.push(stripped.to_path_buf());
        }
    }

    tracing::debug!(root = %root.display(), files = files.len(), "Scanned working tree");
    Ok(files)
}

fn relative_key(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .ok()
        .and_then(normalize_relative)
        .unwrap_or_default()
}

fn traversal_error(root: &Path, err: &walkdir::Error) -> ExError {
    let path = err.path().unwrap_or(root);
    ExError::new(ExErrorKind::Io)
        .with_op("scan")
        .with_path(path.display().to_string())
        .with_message(err.to_string())
}
