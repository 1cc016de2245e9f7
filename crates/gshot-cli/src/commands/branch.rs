//! `gshot branch <name>`

use clap::Args;
use gshot_engine::{apply_engine_command, EngineCommand, EngineCommandResult};
use std::path::Path;

#[derive(Debug, Args)]
pub struct BranchArgs {
    /// Branch name
    pub name: String,
}

pub fn execute(args: BranchArgs, root: &Path) -> Result<(), Box<dyn std::error::Error>> {
    match apply_engine_command(EngineCommand::Branch { name: args.name }, root)? {
        EngineCommandResult::BranchSet(branch) => {
            println!("Branch set to '{}'", branch.name);
            Ok(())
        }
        _ => Err("Unexpected result from branch".into()),
    }
}
