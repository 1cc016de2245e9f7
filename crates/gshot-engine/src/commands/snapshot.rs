//! Snapshot ("commit") orchestration.
//!
//! ## Pipeline (in order):
//! 1. Reject an empty description (no writes)
//! 2. Scan the working tree, pruning ignored entries
//! 3. Store each file in the blob store and build its record
//! 4. Append the records to the commit log under the novelty policy
//!
//! Blobs are written before the append. A `NoChanges` outcome therefore
//! leaves the blob store as it was only because every digest was already
//! stored.

use gshot_core::model::file_record::normalize_relative;
use gshot_core::model::{Branch, FileRecord};
use gshot_core::{NoveltyPolicy, UnreadablePolicy};
use gshot_store::blobs::is_source_error;
use gshot_store::errors::{invalid_input, Result};
use gshot_store::scan::scan;
use gshot_store::{AppendOutcome, BlobStore, CommitLog, IgnoreList};
use std::path::{Path, PathBuf};

/// Result of a snapshot attempt.
#[derive(Debug, Clone)]
pub struct CommitOutcome {
    pub outcome: AppendOutcome,
    /// Files the scanner yielded
    pub scanned: usize,
    /// Project-relative paths left out because they could not be read
    pub skipped: Vec<String>,
}

/// Inputs of one snapshot, borrowed from the repository.
pub struct SnapshotContext<'a> {
    pub root: &'a Path,
    pub ignore: &'a IgnoreList,
    pub blobs: &'a BlobStore,
    pub novelty: NoveltyPolicy,
    pub unreadable: UnreadablePolicy,
}

/// Scan, store, and record the working tree as a new commit.
///
/// # Errors
///
/// `InvalidInput` for an empty description. `Io` on a traversal failure,
/// on a store write failure, or on an unreadable source file unless the
/// policy is `Skip`. Nothing is appended to the log when an error is
/// returned.
pub fn snapshot_commit(
    ctx: &SnapshotContext<'_>,
    log: &mut CommitLog,
    description: &str,
    branch: Option<Branch>,
) -> Result<CommitOutcome> {
    if description.trim().is_empty() {
        return Err(invalid_input(
            "commit",
            "Commit description must not be empty",
        ));
    }

    let files = scan(ctx.root, ctx.ignore)?;
    let (records, skipped) = store_files(ctx, &files)?;
    let outcome = log.append(description, &records, branch, ctx.novelty)?;

    Ok(CommitOutcome {
        outcome,
        scanned: files.len(),
        skipped,
    })
}

/// Put every scanned file into the blob store.
///
/// Returns the records in scan order plus the paths skipped under
/// `UnreadablePolicy::Skip`.
fn store_files(
    ctx: &SnapshotContext<'_>,
    files: &[PathBuf],
) -> Result<(Vec<FileRecord>, Vec<String>)> {
    let mut records = Vec::with_capacity(files.len());
    let mut skipped = Vec::new();

    for relative in files {
        let Some(path) = normalize_relative(relative) else {
            continue;
        };

        match ctx.blobs.put(&ctx.root.join(relative)) {
            Ok(digest) => records.push(FileRecord::new(path, digest)),
            Err(e) if ctx.unreadable == UnreadablePolicy::Skip && is_source_error(&e) => {
                tracing::warn!(
                    path = %path,
                    err_code = e.code(),
                    "Skipping unreadable file: {}",
                    e
                );
                skipped.push(path);
            }
            Err(e) => return Err(e),
        }
    }

    Ok((records, skipped))
}
