//! Ignore list loaded from the project root.

use crate::errors::{io_error, Result};
use crate::layout::REPO_DIR;
use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::Path;

/// Directory and file names excluded from a scan.
///
/// Entries are matched against the entry name (final path component) or
/// its `/`-separated path relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreList {
    dirs: BTreeSet<String>,
    files: BTreeSet<String>,
}

impl Default for IgnoreList {
    fn default() -> Self {
        Self {
            dirs: BTreeSet::from([REPO_DIR.to_string()]),
            files: BTreeSet::new(),
        }
    }
}

impl IgnoreList {
    /// Read the ignore file `name` under `root`.
    ///
    /// # Errors
    ///
    /// `Io` if the file exists but cannot be read.
    pub fn load(root: &Path, name: &str) -> Result<Self> {
        let path = root.join(name);
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Self::parse(root, &raw)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(io_error("read_ignore_file", &path, e)),
        }
    }

    /// Build a list from ignore-file text.
    ///
    /// A line naming an existing file under `root` ignores files of that
    /// name, and one naming an existing directory ignores that directory's
    /// subtree. A line matching nothing at the root applies to both, so a
    /// name like `target` still prunes nested build directories.
    pub fn parse(root: &Path, raw: &str) -> Self {
        let mut list = Self::default();
        for line in raw.lines() {
            let entry = line.trim();
            if entry.is_empty() || entry.starts_with('#') {
                continue;
            }
            let entry = entry.trim_end_matches('/');
            if entry.is_empty() {
                continue;
            }
            let path = root.join(entry);
            if path.is_file() {
                list.files.insert(entry.to_string());
            } else if path.is_dir() {
                list.dirs.insert(entry.to_string());
            } else {
                list.dirs.insert(entry.to_string());
                list.files.insert(entry.to_string());
            }
        }
        list
    }

    /// Whether the directory `name` at `relative` is skipped with its subtree
    pub fn ignores_dir(&self, name: &str, relative: &str) -> bool {
        self.dirs.contains(name) || self.dirs.contains(relative)
    }

    /// Whether the file `name` at `relative` is left out of the scan
    pub fn ignores_file(&self, name: &str, relative: &str) -> bool {
        self.files.contains(name) || self.files.contains(relative)
    }

    pub fn dirs(&self) -> impl Iterator<Item = &str> {
        self.dirs.iter().map(String::as_str)
    }

    pub fn files(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(String::as_str)
    }
}
