//! One working copy and its `.gshot/` repository.

use crate::commands::snapshot::{snapshot_commit, CommitOutcome, SnapshotContext};
use gshot_core::model::{Branch, Commit, CommitId};
use gshot_core::{RepoConfig, RestoreMode};
use gshot_store::errors::Result;
use gshot_store::{
    BlobStore, BranchStore, CommitLog, IgnoreList, InitOutcome, RepoLayout, RestoreEngine,
    RestoreReport,
};
use std::path::{Path, PathBuf};

/// An opened repository.
///
/// Opening loads configuration and the full commit history once; later
/// operations work against that in-memory state and persist through the
/// store.
pub struct Repository {
    layout: RepoLayout,
    config: RepoConfig,
    blobs: BlobStore,
    branches: BranchStore,
    log: CommitLog,
}

impl Repository {
    /// Create the repository layout under `root`, keeping anything already
    /// there.
    ///
    /// # Errors
    ///
    /// `Io` if the layout cannot be created; `InvalidConfig` if an existing
    /// config file is malformed.
    pub fn init(root: impl Into<PathBuf>) -> Result<InitOutcome> {
        RepoLayout::new(root).init()
    }

    /// Open an initialised repository.
    ///
    /// # Errors
    ///
    /// `NotARepository` if `root` has no `.gshot/`; `InvalidConfig` or
    /// `Serialization` if the config or history is unusable.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let layout = RepoLayout::new(root);
        layout.ensure_initialized()?;

        let config = layout.load_config()?;
        let blobs = BlobStore::new(layout.blobs_dir());
        let branches = BranchStore::new(layout.branches_file());
        let log = CommitLog::load(layout.commits_file())?;

        Ok(Self {
            layout,
            config,
            blobs,
            branches,
            log,
        })
    }

    pub fn root(&self) -> &Path {
        self.layout.root()
    }

    pub fn layout(&self) -> &RepoLayout {
        &self.layout
    }

    pub fn config(&self) -> &RepoConfig {
        &self.config
    }

    pub fn blobs(&self) -> &BlobStore {
        &self.blobs
    }

    /// Snapshot the working tree.
    ///
    /// The current branch record, if any, is stamped into the commit.
    ///
    /// # Errors
    ///
    /// See [`snapshot_commit`].
    pub fn commit(&mut self, description: &str) -> Result<CommitOutcome> {
        let ignore = IgnoreList::load(self.layout.root(), &self.config.ignore_file)?;
        let branch = self.branches.current()?;
        let ctx = SnapshotContext {
            root: self.layout.root(),
            ignore: &ignore,
            blobs: &self.blobs,
            novelty: self.config.novelty,
            unreadable: self.config.unreadable_files,
        };
        snapshot_commit(&ctx, &mut self.log, description, branch)
    }

    /// All commits in id order
    pub fn log(&self) -> &[Commit] {
        self.log.commits()
    }

    /// # Errors
    ///
    /// `NotFound` if no commit carries `id`.
    pub fn find(&self, id: CommitId) -> Result<&Commit> {
        self.log.find(id)
    }

    /// Restore the working tree to commit `id`.
    ///
    /// `mode` overrides the configured restore mode.
    ///
    /// # Errors
    ///
    /// `NotFound` if `id` is unknown; the working tree is untouched then.
    /// Per-file failures are reported in the returned report instead.
    pub fn restore(&self, id: CommitId, mode: Option<RestoreMode>) -> Result<RestoreReport> {
        let mode = mode.unwrap_or(self.config.restore);
        RestoreEngine::new(self.layout.root(), &self.log, &self.blobs).restore_to(id, mode)
    }

    /// Replace the branch record.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for a blank name.
    pub fn set_branch(&self, name: &str) -> Result<Branch> {
        self.branches.set(name)
    }

    /// # Errors
    ///
    /// `Serialization` if the branch file is corrupt.
    pub fn current_branch(&self) -> Result<Option<Branch>> {
        self.branches.current()
    }
}
