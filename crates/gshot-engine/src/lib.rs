//! gshot engine - orchestration layer
//!
//! Coordinates the pure domain in `gshot-core` with the filesystem
//! persistence in `gshot-store`: one `Repository` per working copy, and a
//! command surface the CLI dispatches into.

pub mod commands;
pub mod repository;

pub use commands::engine_command::{apply_engine_command, EngineCommand, EngineCommandResult};
pub use commands::snapshot::CommitOutcome;
pub use repository::Repository;
