//! Persistence of the single branch record.

use crate::atomic::atomic_write;
use crate::errors::{invalid_input, io_error, serialization_error, Result};
use gshot_core::model::Branch;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Reads and replaces `branches/branches.json`.
///
/// The file holds a list for format compatibility, but only one record is
/// ever kept: setting a branch replaces whatever was there.
pub struct BranchStore {
    path: PathBuf,
}

impl BranchStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The current branch record, if one has been written.
    ///
    /// # Errors
    ///
    /// `Serialization` when the file exists but is not a branch list.
    pub fn current(&self) -> Result<Option<Branch>> {
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(io_error("read_branches", &self.path, e)),
        };
        if raw.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        let branches: Vec<Branch> = serde_json::from_slice(&raw)
            .map_err(|e| serialization_error("parse_branches", &self.path, e))?;

        let head = branches.iter().position(|b| b.is_head).unwrap_or(0);
        Ok(branches.into_iter().nth(head))
    }

    /// Replace the branch record with a head branch called `name`.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for a blank name; `Io` if the file cannot be written.
    pub fn set(&self, name: &str) -> Result<Branch> {
        let name = name.trim();
        if name.is_empty() {
            return Err(invalid_input("set_branch", "Branch name must not be empty"));
        }

        let branch = Branch::head(name);
        let json = serde_json::to_vec_pretty(&[&branch])
            .map_err(|e| serialization_error("serialize_branches", &self.path, e))?;
        atomic_write(&self.path, &json)?;

        tracing::info!(branch = %branch.name, "Branch record replaced");
        Ok(branch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gshot_core::errors::ExErrorKind;
    use tempfile::TempDir;

    #[test]
    fn test_absent_file_is_none() {
        let dir = TempDir::new().unwrap();
        let store = BranchStore::new(dir.path().join("branches.json"));

        assert!(store.current().unwrap().is_none());
    }

    #[test]
    fn test_set_replaces_single_record() {
        let dir = TempDir::new().unwrap();
        let store = BranchStore::new(dir.path().join("branches.json"));

        store.set("master").unwrap();
        store.set("feature").unwrap();

        let raw: Vec<Branch> =
            serde_json::from_slice(&fs::read(store.path()).unwrap()).unwrap();
        assert_eq!(raw.len(), 1);
        assert_eq!(raw[0].name, "feature");
        assert!(raw[0].is_head);
    }

    #[test]
    fn test_blank_name_rejected() {
        let dir = TempDir::new().unwrap();
        let store = BranchStore::new(dir.path().join("branches.json"));

        let err = store.set("   ").unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidInput);
        assert!(!store.path().exists());
    }

    #[test]
    fn test_corrupt_file_is_serialization_error() {
        let dir = TempDir::new().unwrap();
        let store = BranchStore::new(dir.path().join("branches.json"));
        fs::write(store.path(), b"{not json").unwrap();

        let err = store.current().unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::Serialization);
    }
}
