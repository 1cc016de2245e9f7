use serde::{Deserialize, Serialize};
use std::path::{Component, Path};

/// One file's content identity at commit time.
///
/// `path` is relative to the project root and always uses `/` separators so
/// histories are portable across platforms. Serialized as `{path, hash}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileRecord {
    pub path: String,
    #[serde(rename = "hash")]
    pub digest: String,
}

impl FileRecord {
    pub fn new(path: impl Into<String>, digest: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            digest: digest.into(),
        }
    }

    /// Build a record from a path relative to the project root.
    ///
    /// Returns `None` for paths that are absolute, empty, or climb out of
    /// the root with `..`.
    pub fn from_relative(relative: &Path, digest: impl Into<String>) -> Option<Self> {
        normalize_relative(relative).map(|path| Self::new(path, digest))
    }
}

/// Render a project-relative path with `/` separators.
///
/// `.` components are dropped. Anything that could resolve outside the
/// project root yields `None`.
pub fn normalize_relative(relative: &Path) -> Option<String> {
    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}
