//! gshot core - pure domain of the snapshot engine
//!
//! This crate provides the pieces of the engine that never touch the
//! filesystem layout directly:
//! - FileRecord / Commit / Branch data model and its JSON wire shape
//! - Streaming SHA-256 content hasher
//! - In-memory commit history with the novelty filter and replay
//! - Repository configuration model
//! - Error facility (ExError taxonomy) and structured logging facility

pub mod config;
pub mod errors;
pub mod hash;
pub mod history;
pub mod logging_facility;
pub mod model;

// Re-export commonly used types
pub use config::{NoveltyPolicy, RepoConfig, RestoreMode, UnreadablePolicy};
pub use errors::{ExError, ExErrorKind, GshotError, Result};
pub use history::History;
pub use model::{Branch, Commit, CommitId, FileRecord};
