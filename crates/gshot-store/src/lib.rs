//! gshot store - filesystem persistence for the snapshot engine
//!
//! Provides:
//! - Repository layout under `.gshot/` and idempotent initialisation
//! - Atomic temp→fsync→rename writes
//! - Content-addressable blob store (`blobs/<digest>`)
//! - Commit log persistence (`commits/commits.json`)
//! - Single branch record (`branches/branches.json`)
//! - Ignore list and working-tree scanner
//! - Restore engine materialising commits back into the working tree

pub mod atomic;
pub mod blobs;
pub mod branch_store;
pub mod commit_log;
pub mod errors;
pub mod ignore;
pub mod layout;
pub mod restore;
pub mod scan;

// Re-export key types
pub use blobs::BlobStore;
pub use branch_store::BranchStore;
pub use commit_log::{AppendOutcome, CommitLog};
pub use errors::Result;
pub use ignore::IgnoreList;
pub use layout::{InitOutcome, RepoLayout};
pub use restore::{RestoreEngine, RestoreFailure, RestoreReport};
