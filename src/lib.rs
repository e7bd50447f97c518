//! vaultport - export a Joplin note collection as an Obsidian vault

pub mod cli;
pub mod domain;
pub mod export;
pub mod infra;
pub mod source;

use anyhow::Result;
use clap::Parser;

use cli::{
    Cli, Command,
    config::Config,
    handlers::{handle_export, handle_list},
    init_tracing,
};

/// Main entry point for the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = Config::load(cli.config.as_deref())?;

    match &cli.command {
        Command::Export(args) => handle_export(args, &config),
        Command::List(args) => handle_list(args, &config),
    }
}
