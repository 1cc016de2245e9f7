//! Commit log persistence (`commits/commits.json`).
//!
//! The whole history is loaded once into a [`History`] and kept in memory.
//! An append serialises the full sequence and replaces the file atomically,
//! so a reader sees either the previous history or the new one.
//!
//! There is no inter-process lock. Two writers appending at the same time
//! will each rewrite the file from their own view of history and the last
//! rename wins; callers must serialise appends externally.

use crate::atomic::atomic_write;
use crate::errors::{invalid_input, io_error, serialization_error, Result};
use gshot_core::errors::ExError;
use gshot_core::model::{now_timestamp, Branch, Commit, CommitId, FileRecord};
use gshot_core::{History, NoveltyPolicy};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Result of [`CommitLog::append`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppendOutcome {
    /// A commit was written
    Committed(Commit),
    /// Every candidate record was already known; nothing was written
    NoChanges,
}

impl AppendOutcome {
    pub fn commit(&self) -> Option<&Commit> {
        match self {
            AppendOutcome::Committed(commit) => Some(commit),
            AppendOutcome::NoChanges => None,
        }
    }
}

/// Durable, append-only commit history
pub struct CommitLog {
    path: PathBuf,
    history: History,
}

impl CommitLog {
    /// Load the history persisted at `path`.
    ///
    /// An absent or whitespace-only file is an empty history.
    ///
    /// # Errors
    ///
    /// `Serialization` if the file does not parse or its ids are out of
    /// order. A corrupt history is never treated as empty.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let raw = match fs::read(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(io_error("read_commits", &path, e)),
        };

        let commits: Vec<Commit> = if raw.iter().all(u8::is_ascii_whitespace) {
            Vec::new()
        } else {
            serde_json::from_slice(&raw).map_err(|e| serialization_error("parse_commits", &path, e))?
        };

        let history = History::from_commits(commits)
            .map_err(|e| ExError::from(e).with_path(path.display().to_string()))?;

        tracing::debug!(
            path = %path.display(),
            commits = history.len(),
            "Loaded commit history"
        );
        Ok(Self { path, history })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// All commits in id order
    pub fn commits(&self) -> &[Commit] {
        self.history.commits()
    }

    /// # Errors
    ///
    /// `NotFound` if no commit carries `id`.
    pub fn find(&self, id: CommitId) -> Result<&Commit> {
        self.history.find(id).map_err(ExError::from)
    }

    /// Record the novel subset of `candidates` as a new commit.
    ///
    /// When no candidate is novel under `policy` nothing is written and the
    /// in-memory history is unchanged.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for an empty description; `Io`/`Serialization` if the
    /// history cannot be persisted, in which case memory is left unchanged.
    pub fn append(
        &mut self,
        description: &str,
        candidates: &[FileRecord],
        branch: Option<Branch>,
        policy: NoveltyPolicy,
    ) -> Result<AppendOutcome> {
        if description.trim().is_empty() {
            return Err(invalid_input(
                "append_commit",
                "Commit description must not be empty",
            ));
        }

        let records = self.history.novel_records(candidates, policy);
        if records.is_empty() {
            tracing::debug!(candidates = candidates.len(), "No novel records");
            return Ok(AppendOutcome::NoChanges);
        }

        let commit = Commit {
            id: self.history.next_id(),
            description: description.to_string(),
            records,
            branch,
            timestamp: now_timestamp(),
        };

        let mut next = self.history.commits().to_vec();
        next.push(commit.clone());
        let json = serde_json::to_vec_pretty(&next)
            .map_err(|e| serialization_error("serialize_commits", &self.path, e))?;
        atomic_write(&self.path, &json)?;

        self.history.push(commit.clone()).map_err(ExError::from)?;

        tracing::info!(
            commit_id = commit.id,
            records = commit.records.len(),
            "Appended commit"
        );
        Ok(AppendOutcome::Committed(commit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gshot_core::errors::ExErrorKind;
    use tempfile::TempDir;

    fn log_in(dir: &TempDir) -> CommitLog {
        CommitLog::load(dir.path().join("commits").join("commits.json")).unwrap()
    }

    #[test]
    fn test_absent_file_is_empty_history() {
        let dir = TempDir::new().unwrap();
        let log = log_in(&dir);
        assert!(log.commits().is_empty());
    }

    #[test]
    fn test_whitespace_file_is_empty_history() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("commits.json");
        fs::write(&path, b"  \n").unwrap();

        assert!(CommitLog::load(&path).unwrap().commits().is_empty());
    }

    #[test]
    fn test_corrupt_file_fails_fast() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("commits.json");
        fs::write(&path, b"[{\"id\": ").unwrap();

        let err = CommitLog::load(&path).err().unwrap();
        assert_eq!(err.kind(), ExErrorKind::Serialization);
    }

    #[test]
    fn test_blank_description_rejected() {
        let dir = TempDir::new().unwrap();
        let mut log = log_in(&dir);

        let err = log
            .append(" ", &[FileRecord::new("a", "1")], None, NoveltyPolicy::GlobalDigest)
            .unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidInput);
        assert!(!log.path().exists());
    }

    #[test]
    fn test_append_persists_and_reloads() {
        let dir = TempDir::new().unwrap();
        let mut log = log_in(&dir);

        log.append(
            "init",
            &[FileRecord::new("a.txt", "aa")],
            Some(Branch::head("master")),
            NoveltyPolicy::GlobalDigest,
        )
        .unwrap();

        let reloaded = log_in(&dir);
        assert_eq!(reloaded.commits().len(), 1);
        assert_eq!(reloaded.commits()[0].id, 1);
        assert_eq!(reloaded.commits()[0].branch.as_ref().unwrap().name, "master");
    }
}
