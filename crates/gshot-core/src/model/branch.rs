use serde::{Deserialize, Serialize};

/// The single branch record persisted in `branches/branches.json`.
///
/// A branch is only a label stamped onto commits; it does not own a tip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    pub name: String,
    #[serde(default)]
    pub is_head: bool,
    #[serde(default)]
    pub timestamp: String,
}

impl Branch {
    /// Name of the branch `init` creates.
    pub const DEFAULT_NAME: &'static str = "master";

    /// A head branch stamped with the current time.
    pub fn head(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_head: true,
            timestamp: super::now_timestamp(),
        }
    }
}
