//! `gshot log`

use clap::Args;
use gshot_core::model::Commit;
use gshot_engine::{apply_engine_command, EngineCommand, EngineCommandResult};
use std::path::Path;

#[derive(Debug, Args)]
pub struct LogArgs {
    /// Print the history as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn execute(args: LogArgs, root: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let EngineCommandResult::Log(commits) = apply_engine_command(EngineCommand::Log, root)? else {
        return Err("Unexpected result from log".into());
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&commits)?);
        return Ok(());
    }

    if commits.is_empty() {
        println!("No commits found");
        return Ok(());
    }

    // Newest first
    for commit in commits.iter().rev() {
        print_commit(commit);
    }
    Ok(())
}

fn print_commit(commit: &Commit) {
    match &commit.branch {
        Some(branch) => println!("commit {} ({})", commit.id, branch.name),
        None => println!("commit {}", commit.id),
    }
    println!("Date:   {}", commit.timestamp);
    println!();
    println!("    {}", commit.description);
    println!();
    for record in &commit.records {
        let short: String = record.digest.chars().take(12).collect();
        println!("    {}  {}", short, record.path);
    }
    println!();
}
