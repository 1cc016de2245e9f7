//! `gshot restore <id>`

use clap::Args;
use gshot_core::RestoreMode;
use gshot_engine::{apply_engine_command, EngineCommand, EngineCommandResult};
use std::path::Path;

#[derive(Debug, Args)]
pub struct RestoreArgs {
    /// Commit id to restore
    pub id: String,

    /// Write only the records stored in that commit
    #[arg(long, conflicts_with = "replay")]
    pub naive: bool,

    /// Replay every commit up to the id, last record per path wins
    #[arg(long, conflicts_with = "naive")]
    pub replay: bool,
}

impl RestoreArgs {
    fn mode(&self) -> Option<RestoreMode> {
        if self.naive {
            Some(RestoreMode::CommitOnly)
        } else if self.replay {
            Some(RestoreMode::Replay)
        } else {
            None
        }
    }
}

pub fn execute(args: RestoreArgs, root: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mode = args.mode();
    let cmd = EngineCommand::Restore { id: args.id, mode };
    let EngineCommandResult::Restored(report) = apply_engine_command(cmd, root)? else {
        return Err("Unexpected result from restore".into());
    };

    for failure in &report.failed {
        eprintln!("failed: {} ({})", failure.path, failure.error);
    }
    println!(
        "Restored {} file(s) from commit {}",
        report.restored.len(),
        report.commit_id
    );

    if report.is_complete() {
        Ok(())
    } else {
        Err(format!("{} file(s) could not be restored", report.failed.len()).into())
    }
}
