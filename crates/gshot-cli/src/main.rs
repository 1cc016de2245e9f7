//! gshot CLI
//!
//! Command-line interface for the gshot snapshot engine

use clap::{Parser, Subcommand, ValueEnum};
use gshot_core::logging_facility::{init as init_logging, Profile};
use std::path::PathBuf;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "gshot")]
#[command(about = "gshot - Snapshot a project directory into a local history", long_about = None)]
struct Cli {
    /// Working copy root
    #[arg(long, global = true, default_value = ".")]
    repo: PathBuf,

    /// Log output format on stderr
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create the repository layout (safe to run again)
    Init,
    /// Snapshot the working tree
    Commit(commands::commit::CommitArgs),
    /// Show the commit history
    Log(commands::log::LogArgs),
    /// Restore the working tree to a commit
    Restore(commands::restore::RestoreArgs),
    /// Set the branch label stamped on new commits
    Branch(commands::branch::BranchArgs),
}

fn main() {
    let cli = Cli::parse();

    init_logging(match cli.log_format {
        LogFormat::Pretty => Profile::Cli,
        LogFormat::Json => Profile::Production,
    });

    let root = cli.repo.as_path();
    let result = match cli.command {
        Commands::Init => commands::init::execute(root),
        Commands::Commit(args) => commands::commit::execute(args, root),
        Commands::Log(args) => commands::log::execute(args, root),
        Commands::Restore(args) => commands::restore::execute(args, root),
        Commands::Branch(args) => commands::branch::execute(args, root),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
