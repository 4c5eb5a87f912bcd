//! CLI subcommands.

pub mod config;
pub mod content;
pub mod replay;
