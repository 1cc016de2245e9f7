//! `gshot commit <message>`

use clap::Args;
use gshot_engine::{apply_engine_command, EngineCommand, EngineCommandResult};
use gshot_store::AppendOutcome;
use std::path::Path;

#[derive(Debug, Args)]
pub struct CommitArgs {
    /// Commit description
    pub message: String,
}

pub fn execute(args: CommitArgs, root: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let cmd = EngineCommand::Commit {
        description: args.message,
    };
    let EngineCommandResult::Committed(outcome) = apply_engine_command(cmd, root)? else {
        return Err("Unexpected result from commit".into());
    };

    for path in &outcome.skipped {
        eprintln!("warning: skipped unreadable file {}", path);
    }

    match outcome.outcome {
        AppendOutcome::Committed(commit) => {
            println!(
                "[{}] {} ({} of {} files recorded)",
                commit.id,
                commit.description,
                commit.records.len(),
                outcome.scanned
            );
        }
        AppendOutcome::NoChanges => println!("No files changed"),
    }
    Ok(())
}
