//! Restore engine: materialise a commit back into the working tree.

use crate::atomic::write_with;
use crate::blobs::BlobStore;
use crate::commit_log::CommitLog;
use crate::errors::{invalid_input, io_error, Result};
use crate::layout::REPO_DIR;
use gshot_core::errors::ExError;
use gshot_core::model::file_record::normalize_relative;
use gshot_core::model::{CommitId, FileRecord};
use gshot_core::RestoreMode;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// One file that could not be restored
#[derive(Debug, Clone)]
pub struct RestoreFailure {
    pub path: String,
    pub digest: String,
    pub error: ExError,
}

/// Outcome of a restore; files are attempted independently.
#[derive(Debug, Clone)]
pub struct RestoreReport {
    pub commit_id: CommitId,
    pub restored: Vec<String>,
    pub failed: Vec<RestoreFailure>,
}

impl RestoreReport {
    /// Whether every planned file was written
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Writes commit contents from the blob store into the working tree
pub struct RestoreEngine<'a> {
    root: &'a Path,
    log: &'a CommitLog,
    blobs: &'a BlobStore,
}

impl<'a> RestoreEngine<'a> {
    pub fn new(root: &'a Path, log: &'a CommitLog, blobs: &'a BlobStore) -> Self {
        Self { root, log, blobs }
    }

    /// Records that restoring `id` under `mode` would write.
    ///
    /// `CommitOnly` yields exactly the records stored in that commit.
    /// `Replay` overlays commits `1..=id` and yields the last record per
    /// path.
    ///
    /// # Errors
    ///
    /// `NotFound` if `id` is not in the log.
    pub fn plan(&self, id: CommitId, mode: RestoreMode) -> Result<Vec<FileRecord>> {
        match mode {
            RestoreMode::CommitOnly => Ok(self.log.find(id)?.records.clone()),
            RestoreMode::Replay => self.log.history().tree_at(id).map_err(ExError::from),
        }
    }

    /// Restore the working tree to commit `id`.
    ///
    /// Each file is streamed from its blob into a temp file beside the
    /// destination, synced, then renamed into place. A failing file is
    /// logged and reported; the remaining files are still attempted.
    ///
    /// # Errors
    ///
    /// `NotFound` if `id` is not in the log; nothing is written then.
    pub fn restore_to(&self, id: CommitId, mode: RestoreMode) -> Result<RestoreReport> {
        let plan = self.plan(id, mode)?;
        let mut report = RestoreReport {
            commit_id: id,
            restored: Vec::with_capacity(plan.len()),
            failed: Vec::new(),
        };

        for record in plan {
            match self.restore_file(&record) {
                Ok(()) => report.restored.push(record.path),
                Err(error) => {
                    tracing::warn!(
                        commit_id = id,
                        path = %record.path,
                        digest = %record.digest,
                        err_code = error.code(),
                        "Failed to restore file: {}",
                        error
                    );
                    report.failed.push(RestoreFailure {
                        path: record.path,
                        digest: record.digest,
                        error,
                    });
                }
            }
        }

        tracing::info!(
            commit_id = id,
            restored = report.restored.len(),
            failed = report.failed.len(),
            "Restore finished"
        );
        Ok(report)
    }

    fn restore_file(&self, record: &FileRecord) -> Result<()> {
        let destination = self.destination_for(&record.path)?;
        let mut blob = self.blobs.open(&record.digest)?;
        write_with(&destination, |temp| {
            io::copy(&mut blob, temp)
                .map(|_| ())
                .map_err(|e| io_error("restore_copy", &destination, e))
        })
    }

    /// Resolve a recorded path under the project root.
    ///
    /// Refuses anything that is absolute, climbs with `..`, lands inside
    /// the repository directory, or passes through a symlinked directory.
    fn destination_for(&self, recorded: &str) -> Result<PathBuf> {
        let outside = || {
            invalid_input(
                "restore_path",
                format!("Refusing to restore outside the working tree: {:?}", recorded),
            )
            .with_path(recorded)
        };

        let normalized = normalize_relative(Path::new(recorded))
            .filter(|p| p.split('/').next() != Some(REPO_DIR))
            .ok_or_else(outside)?;

        let parts: Vec<&str> = normalized.split('/').collect();
        let mut destination = self.root.to_path_buf();
        for (i, part) in parts.iter().enumerate() {
            destination.push(part);
            // The final component is replaced by rename, never followed
            let is_ancestor = i + 1 < parts.len();
            if is_ancestor
                && fs::symlink_metadata(&destination).is_ok_and(|m| m.file_type().is_symlink())
            {
                return Err(outside());
            }
        }
        Ok(destination)
    }
}
