//! In-memory commit history and its lookup index.
//!
//! `History` owns the ordered commit sequence and an index hydrated once
//! when the history is loaded: every digest ever recorded, and the last
//! digest recorded for each path. The index is what the novelty filter and
//! the replay restore consult, so neither has to rescan every commit.
//!
//! ## Novelty policies
//!
//! - **GlobalDigest**: a record is novel when its digest appears in no
//!   record of any earlier commit. Content that moves to another path, or
//!   that returns after a revert, is not recorded again.
//! - **PerPath**: a record is novel when its digest differs from the last
//!   digest recorded for the same path.

use crate::config::NoveltyPolicy;
use crate::errors::{GshotError, Result};
use crate::model::{Commit, CommitId, FileRecord};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Ordered, append-only commit sequence with a digest/path index.
#[derive(Debug, Clone, Default)]
pub struct History {
    commits: Vec<Commit>,
    seen_digests: HashSet<String>,
    last_by_path: HashMap<String, String>,
}

impl History {
    /// Empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Hydrate a history from persisted commits.
    ///
    /// # Errors
    ///
    /// `Serialization` if ids are not strictly increasing; a history in that
    /// state has been edited or corrupted and is not trusted.
    pub fn from_commits(commits: Vec<Commit>) -> Result<Self> {
        let mut history = Self::new();
        for commit in commits {
            history.push(commit)?;
        }
        Ok(history)
    }

    /// All commits in id order
    pub fn commits(&self) -> &[Commit] {
        &self.commits
    }

    pub fn len(&self) -> usize {
        self.commits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }

    /// Highest id in the log, 0 when empty
    pub fn last_id(&self) -> CommitId {
        self.commits.last().map(|c| c.id).unwrap_or(0)
    }

    /// Id the next appended commit receives
    pub fn next_id(&self) -> CommitId {
        self.last_id() + 1
    }

    /// Look up a commit by id.
    ///
    /// # Errors
    ///
    /// `CommitNotFound` if no commit carries `id`.
    pub fn find(&self, id: CommitId) -> Result<&Commit> {
        self.commits
            .binary_search_by_key(&id, |c| c.id)
            .map(|idx| &self.commits[idx])
            .map_err(|_| GshotError::CommitNotFound { id })
    }

    /// Whether any commit has recorded this digest
    pub fn contains_digest(&self, digest: &str) -> bool {
        self.seen_digests.contains(digest)
    }

    /// Digest most recently recorded for `path`
    pub fn last_digest_for(&self, path: &str) -> Option<&str> {
        self.last_by_path.get(path).map(String::as_str)
    }

    /// Filter `candidates` down to the records the next commit should hold.
    ///
    /// Candidate order is preserved. A path listed more than once keeps its
    /// first occurrence.
    pub fn novel_records(&self, candidates: &[FileRecord], policy: NoveltyPolicy) -> Vec<FileRecord> {
        let mut seen_paths = HashSet::new();
        candidates
            .iter()
            .filter(|r| seen_paths.insert(r.path.as_str()))
            .filter(|r| match policy {
                NoveltyPolicy::GlobalDigest => !self.contains_digest(&r.digest),
                NoveltyPolicy::PerPath => self.last_digest_for(&r.path) != Some(r.digest.as_str()),
            })
            .cloned()
            .collect()
    }

    /// Append a commit and fold its records into the index.
    ///
    /// # Errors
    ///
    /// `Serialization` if `commit.id` does not exceed the current last id.
    pub fn push(&mut self, commit: Commit) -> Result<()> {
        if commit.id <= self.last_id() {
            return Err(GshotError::Serialization {
                message: format!(
                    "commit ids must be strictly increasing: {} follows {}",
                    commit.id,
                    self.last_id()
                ),
            });
        }
        for record in &commit.records {
            self.seen_digests.insert(record.digest.clone());
            self.last_by_path
                .insert(record.path.clone(), record.digest.clone());
        }
        self.commits.push(commit);
        Ok(())
    }

    /// Working-tree view as of commit `id`.
    ///
    /// Replays commits `1..=id` in id order and keeps the last record per
    /// path. Output is sorted by path.
    ///
    /// # Errors
    ///
    /// `CommitNotFound` if `id` is not in the log.
    pub fn tree_at(&self, id: CommitId) -> Result<Vec<FileRecord>> {
        self.find(id)?;
        let mut tree: BTreeMap<&str, &str> = BTreeMap::new();
        for commit in self.commits.iter().take_while(|c| c.id <= id) {
            for record in &commit.records {
                tree.insert(&record.path, &record.digest);
            }
        }
        Ok(tree
            .into_iter()
            .map(|(path, digest)| FileRecord::new(path, digest))
            .collect())
    }
}
