//! `replay` command: run a scenario script and print the effects.

use std::path::{Path, PathBuf};

use artlens::config::ConfigFile;
use artlens::script::{load_script, Replay};

use crate::error::CliError;

/// Replay `script` with settings from `config` (or the default config file).
pub fn run(script: &Path, config: Option<PathBuf>) -> Result<(), CliError> {
    let config = match config {
        Some(path) => ConfigFile::load_from(&path)?,
        None => ConfigFile::load()?,
    };
    let catalog = config.load_catalog()?;
    let commands = load_script(script)?;

    tracing::info!(
        script = %script.display(),
        commands = commands.len(),
        "Replaying scenario"
    );

    let mut replay = Replay::new(config.session_config(), catalog);
    replay.run(&commands);

    for step in replay.steps() {
        println!("{}", step);
    }

    let session = replay.session();
    println!();
    println!(
        "final: tracking={} overlay={} armed={}",
        session.tracking_state(),
        session.overlay_state(),
        session.is_armed()
    );

    Ok(())
}
