//! Engine-level commands, one per user-facing action.

use crate::commands::snapshot::CommitOutcome;
use crate::repository::Repository;
use gshot_core::model::commit::parse_commit_id;
use gshot_core::model::{Branch, Commit, CommitId};
use gshot_core::{ExError, RestoreMode};
use gshot_store::errors::Result;
use gshot_store::{AppendOutcome, InitOutcome, RestoreReport};
use std::path::Path;
use std::time::Instant;

/// Commands that act on the repository at a given root.
#[derive(Debug, Clone)]
pub enum EngineCommand {
    /// Create the repository layout (idempotent)
    Init,
    /// Snapshot the working tree
    Commit { description: String },
    /// Read the commit history
    Log,
    /// Restore the working tree to a commit.
    Restore {
        /// Commit id as typed by the user
        id: String,
        /// Overrides the configured restore mode
        mode: Option<RestoreMode>,
    },
    /// Replace the branch record
    Branch { name: String },
}

impl EngineCommand {
    /// Operation name used in log events
    pub fn op(&self) -> &'static str {
        match self {
            EngineCommand::Init => "init",
            EngineCommand::Commit { .. } => "commit",
            EngineCommand::Log => "log",
            EngineCommand::Restore { .. } => "restore",
            EngineCommand::Branch { .. } => "branch",
        }
    }
}

/// Result of applying an engine command.
#[derive(Debug, Clone)]
pub enum EngineCommandResult {
    Initialized(InitOutcome),
    Committed(CommitOutcome),
    Log(Vec<Commit>),
    Restored(RestoreReport),
    BranchSet(Branch),
}

/// Apply `cmd` to the working copy at `root`.
///
/// Emits one start event and one end or end_error event per call.
///
/// # Errors
///
/// Whatever the underlying operation returns; `NotARepository` for any
/// command but `Init` on an uninitialised root.
pub fn apply_engine_command(cmd: EngineCommand, root: &Path) -> Result<EngineCommandResult> {
    let op = cmd.op();
    let start = Instant::now();
    gshot_core::log_op_start!(op, root = %root.display());

    let result = dispatch(cmd, root);
    let duration_ms = start.elapsed().as_millis() as u64;

    match &result {
        Ok(EngineCommandResult::Committed(outcome)) => {
            let commit_id: CommitId = match &outcome.outcome {
                AppendOutcome::Committed(commit) => commit.id,
                AppendOutcome::NoChanges => 0,
            };
            gshot_core::log_op_end!(
                op,
                duration_ms = duration_ms,
                commit_id = commit_id,
                scanned = outcome.scanned as u64,
                skipped = outcome.skipped.len() as u64
            );
        }
        Ok(EngineCommandResult::Restored(report)) => {
            gshot_core::log_op_end!(
                op,
                duration_ms = duration_ms,
                commit_id = report.commit_id,
                restored = report.restored.len() as u64,
                failed = report.failed.len() as u64
            );
        }
        Ok(_) => {
            gshot_core::log_op_end!(op, duration_ms = duration_ms);
        }
        Err(e) => {
            gshot_core::log_op_error!(op, e.clone(), duration_ms = duration_ms);
        }
    }

    result
}

fn dispatch(cmd: EngineCommand, root: &Path) -> Result<EngineCommandResult> {
    match cmd {
        EngineCommand::Init => Repository::init(root).map(EngineCommandResult::Initialized),
        EngineCommand::Commit { description } => Repository::open(root)?
            .commit(&description)
            .map(EngineCommandResult::Committed),
        EngineCommand::Log => Ok(EngineCommandResult::Log(
            Repository::open(root)?.log().to_vec(),
        )),
        EngineCommand::Restore { id, mode } => {
            let id = parse_commit_id(&id).map_err(|e| ExError::from(e).with_op("restore"))?;
            Repository::open(root)?
                .restore(id, mode)
                .map(EngineCommandResult::Restored)
        }
        EngineCommand::Branch { name } => Repository::open(root)?
            .set_branch(&name)
            .map(EngineCommandResult::BranchSet),
    }
}
