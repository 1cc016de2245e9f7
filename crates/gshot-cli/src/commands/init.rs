//! `gshot init`

use gshot_engine::{apply_engine_command, EngineCommand, EngineCommandResult};
use gshot_store::InitOutcome;
use std::path::Path;

pub fn execute(root: &Path) -> Result<(), Box<dyn std::error::Error>> {
    match apply_engine_command(EngineCommand::Init, root)? {
        EngineCommandResult::Initialized(InitOutcome::Created) => {
            println!("Initialized gshot repository in {}", root.join(".gshot").display());
        }
        EngineCommandResult::Initialized(InitOutcome::AlreadyInitialized) => {
            println!(
                "Reinitialized existing gshot repository in {}",
                root.join(".gshot").display()
            );
        }
        _ => return Err("Unexpected result from init".into()),
    }
    Ok(())
}
