//! Repository configuration.
//!
//! Read from the optional `.gshot/config.toml`. Every key is optional; an
//! empty or absent file means defaults.
//!
//! ```toml
//! novelty = "global-digest"   # or "per-path"
//! restore = "replay"          # or "commit-only"
//! unreadable_files = "abort"  # or "skip"
//! ignore_file = ".gshotignore"
//! ```

use crate::errors::Result;
use serde::{Deserialize, Serialize};

/// Rule deciding which scanned records enter the next commit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NoveltyPolicy {
    /// Digest never recorded by any earlier commit
    #[default]
    GlobalDigest,
    /// Digest differs from the path's last recorded digest
    PerPath,
}

/// How a restore chooses the records to write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RestoreMode {
    /// Only the records stored in the target commit
    CommitOnly,
    /// Commits `1..=id` overlaid by path, last record wins
    #[default]
    Replay,
}

/// What a commit does when a scanned file cannot be read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnreadablePolicy {
    /// Fail the whole commit
    #[default]
    Abort,
    /// Leave the file out, report it, and continue
    Skip,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RepoConfig {
    pub novelty: NoveltyPolicy,
    pub restore: RestoreMode,
    pub unreadable_files: UnreadablePolicy,
    /// Ignore-list file name, relative to the project root
    pub ignore_file: String,
}

impl Default for RepoConfig {
    fn default() -> Self {
        Self {
            novelty: NoveltyPolicy::default(),
            restore: RestoreMode::default(),
            unreadable_files: UnreadablePolicy::default(),
            ignore_file: Self::DEFAULT_IGNORE_FILE.to_string(),
        }
    }
}

impl RepoConfig {
    pub const FILE_NAME: &'static str = "config.toml";
    pub const DEFAULT_IGNORE_FILE: &'static str = ".gshotignore";

    /// Parse a TOML document.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` on malformed TOML, unknown keys, or unknown values.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }
}
