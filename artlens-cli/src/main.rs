//! ArtLens CLI - Command-line interface
//!
//! Replays interaction scenarios against the ArtLens core and manages its
//! configuration and POI content.

mod commands;
mod error;

use std::path::PathBuf;
use std::process::ExitCode;

use artlens::logging::{init_logging, LogOptions};
use clap::{Parser, Subcommand};

use crate::commands::config::ConfigCommands;
use crate::error::CliError;

#[derive(Debug, Parser)]
#[command(name = "artlens", version, about = "AR art guide interaction core")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Also write logs to daily files in this directory
    #[arg(long, global = true, value_name = "DIR")]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Replay a scenario script and print the effects of each step
    Replay {
        /// Scenario script
        script: PathBuf,

        /// Config file to use instead of the default location
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// List the points of interest
    Content {
        /// POI content file (INI) to list instead of the configured one
        #[arg(long, value_name = "FILE")]
        file: Option<PathBuf>,
    },

    /// View and edit configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let level = if cli.verbose { "debug" } else { "warn" };
    let mut options = LogOptions::with_level(level);
    if let Some(dir) = cli.log_dir {
        options = options.with_log_dir(dir);
    }
    let _guard = init_logging(&options)?;

    match cli.command {
        Commands::Replay { script, config } => commands::replay::run(&script, config),
        Commands::Content { file } => commands::content::run(file),
        Commands::Config(command) => commands::config::run(command),
    }
}
