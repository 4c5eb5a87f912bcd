//! CLI error type.

use artlens::config::ConfigError;
use artlens::content::ContentError;
use artlens::logging::LoggingError;
use artlens::script::ScriptError;
use thiserror::Error;

/// Errors surfaced to the user by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid usage of a config command.
    #[error("{0}")]
    Config(String),

    #[error(transparent)]
    ConfigFile(#[from] ConfigError),

    #[error("Content error: {0}")]
    Content(#[from] ContentError),

    #[error("Script error: {0}")]
    Script(#[from] ScriptError),

    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),
}
