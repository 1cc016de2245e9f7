use serde::{Deserialize, Serialize};

use super::{Branch, FileRecord};
use crate::errors::{GshotError, Result};

/// Commit identifier; assigned as `max(existing) + 1`, starting at 1.
pub type CommitId = u64;

/// An immutable entry of the commit log.
///
/// `records` holds only the file records that passed the novelty filter
/// when the commit was made, in scan order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    pub id: CommitId,
    pub description: String,
    #[serde(rename = "file_hash", default)]
    pub records: Vec<FileRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<Branch>,
    pub timestamp: String,
}

impl Commit {
    /// Digest recorded for `path` in this commit, if any
    pub fn digest_for(&self, path: &str) -> Option<&str> {
        self.records
            .iter()
            .find(|r| r.path == path)
            .map(|r| r.digest.as_str())
    }
}

/// Parse a user-supplied commit identifier.
///
/// # Errors
///
/// `InvalidCommitId` unless the trimmed input is a positive integer.
pub fn parse_commit_id(input: &str) -> Result<CommitId> {
    match input.trim().parse::<CommitId>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(GshotError::InvalidCommitId {
            input: input.to_string(),
        }),
    }
}
