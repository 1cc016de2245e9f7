//! Repository layout on disk.
//!
//! ```text
//! <root>/
//!   .gshotignore              # ignore list (name configurable)
//!   .gshot/
//!     config.toml             # optional RepoConfig
//!     commits/commits.json    # ordered commit history
//!     blobs/<digest>          # one file per unique content digest
//!     branches/branches.json  # single-element branch record list
//! ```

use crate::branch_store::BranchStore;
use crate::errors::{io_error, not_a_repository, Result};
use gshot_core::errors::ExError;
use gshot_core::model::Branch;
use gshot_core::RepoConfig;
use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

/// Name of the repository directory inside the working copy
pub const REPO_DIR: &str = ".gshot";

/// Whether `init` built a new repository or found one in place
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    Created,
    AlreadyInitialized,
}

/// Paths of every persisted artefact for one working copy
#[derive(Debug, Clone)]
pub struct RepoLayout {
    root: PathBuf,
}

impl RepoLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Project root (the working tree)
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn repo_dir(&self) -> PathBuf {
        self.root.join(REPO_DIR)
    }

    pub fn commits_dir(&self) -> PathBuf {
        self.repo_dir().join("commits")
    }

    pub fn commits_file(&self) -> PathBuf {
        self.commits_dir().join("commits.json")
    }

    pub fn blobs_dir(&self) -> PathBuf {
        self.repo_dir().join("blobs")
    }

    pub fn branches_dir(&self) -> PathBuf {
        self.repo_dir().join("branches")
    }

    pub fn branches_file(&self) -> PathBuf {
        self.branches_dir().join("branches.json")
    }

    pub fn config_file(&self) -> PathBuf {
        self.repo_dir().join(RepoConfig::FILE_NAME)
    }

    /// Ignore list location for a given configuration
    pub fn ignore_file(&self, config: &RepoConfig) -> PathBuf {
        self.root.join(&config.ignore_file)
    }

    pub fn is_initialized(&self) -> bool {
        self.repo_dir().is_dir()
    }

    /// # Errors
    ///
    /// `NotARepository` when `.gshot/` is missing.
    pub fn ensure_initialized(&self) -> Result<()> {
        if self.is_initialized() {
            Ok(())
        } else {
            Err(not_a_repository(&self.root))
        }
    }

    /// Load `.gshot/config.toml`, falling back to defaults when absent.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` when the file exists but does not parse.
    pub fn load_config(&self) -> Result<RepoConfig> {
        let path = self.config_file();
        match fs::read_to_string(&path) {
            Ok(raw) => RepoConfig::from_toml_str(&raw)
                .map_err(|e| ExError::from(e).with_path(path.display().to_string())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(RepoConfig::default()),
            Err(e) => Err(io_error("read_config", &path, e)),
        }
    }

    /// Create the repository layout.
    ///
    /// Idempotent: existing history, blobs, ignore list, and branch record
    /// are left exactly as they are.
    ///
    /// # Errors
    ///
    /// `Io` if a directory or file cannot be created; `InvalidConfig` if an
    /// existing config file is malformed.
    pub fn init(&self) -> Result<InitOutcome> {
        let outcome = if self.is_initialized() {
            InitOutcome::AlreadyInitialized
        } else {
            InitOutcome::Created
        };

        for dir in [self.commits_dir(), self.blobs_dir(), self.branches_dir()] {
            fs::create_dir_all(&dir).map_err(|e| io_error("create_repo_dir", &dir, e))?;
        }

        let config = self.load_config()?;
        let ignore_path = self.ignore_file(&config);
        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&ignore_path)
        {
            Ok(_) => tracing::debug!(path = %ignore_path.display(), "Created ignore list"),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {}
            Err(e) => return Err(io_error("create_ignore_file", &ignore_path, e)),
        }

        let branches = BranchStore::new(self.branches_file());
        if !self.branches_file().exists() {
            branches.set(Branch::DEFAULT_NAME)?;
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gshot_core::errors::ExErrorKind;
    use tempfile::TempDir;

    #[test]
    fn test_init_creates_layout() {
        let dir = TempDir::new().unwrap();
        let layout = RepoLayout::new(dir.path());

        assert_eq!(layout.init().unwrap(), InitOutcome::Created);

        assert!(layout.commits_dir().is_dir());
        assert!(layout.blobs_dir().is_dir());
        assert!(layout.branches_file().is_file());
        assert!(dir.path().join(".gshotignore").is_file());
        assert!(!layout.commits_file().exists());
    }

    #[test]
    fn test_init_twice_preserves_state() {
        let dir = TempDir::new().unwrap();
        let layout = RepoLayout::new(dir.path());
        layout.init().unwrap();
        fs::write(layout.commits_file(), b"[]").unwrap();
        fs::write(dir.path().join(".gshotignore"), b"target\n").unwrap();
        BranchStore::new(layout.branches_file()).set("dev").unwrap();

        assert_eq!(layout.init().unwrap(), InitOutcome::AlreadyInitialized);

        assert_eq!(fs::read(layout.commits_file()).unwrap(), b"[]");
        assert_eq!(
            fs::read_to_string(dir.path().join(".gshotignore")).unwrap(),
            "target\n"
        );
        let branch = BranchStore::new(layout.branches_file())
            .current()
            .unwrap()
            .unwrap();
        assert_eq!(branch.name, "dev");
    }

    #[test]
    fn test_ensure_initialized() {
        let dir = TempDir::new().unwrap();
        let layout = RepoLayout::new(dir.path());

        let err = layout.ensure_initialized().unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::NotARepository);
    }

    #[test]
    fn test_malformed_config_fails() {
        let dir = TempDir::new().unwrap();
        let layout = RepoLayout::new(dir.path());
        layout.init().unwrap();
        fs::write(layout.config_file(), "novelty = 3").unwrap();

        let err = layout.load_config().unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidConfig);
    }
}
