//! CLI command definitions and handlers

pub mod config;
pub mod handlers;
pub mod output;

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use output::OutputFormat;

/// vaultport - export a Joplin note collection as an Obsidian vault
#[derive(Parser, Debug)]
#[command(name = "vaultport", version, about, long_about = None)]
pub struct Cli {
    /// Config file (defaults to <config dir>/vaultport/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Export the collection into a vault directory
    Export(ExportArgs),

    /// List the path each note would be written to
    #[command(name = "ls")]
    List(ListArgs),
}

/// Where to read the collection from.
#[derive(Args, Debug, Default)]
pub struct SourceArgs {
    /// Joplin profile directory (contains database.sqlite)
    #[arg(short, long, conflicts_with = "snapshot")]
    pub profile: Option<PathBuf>,

    /// JSON snapshot of a collection
    #[arg(short, long)]
    pub snapshot: Option<PathBuf>,
}

/// Arguments for the `export` command
#[derive(Parser, Debug)]
pub struct ExportArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Destination vault directory
    #[arg(short = 'o', long)]
    pub dest: Option<PathBuf>,

    /// Put attachments under assets/<NAMESPACE>/ instead of assets/
    #[arg(long)]
    pub assets_namespace: Option<String>,

    /// Stop at the first item that fails to export
    #[arg(long)]
    pub fail_fast: bool,

    /// Output format for the run summary
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `ls` command
#[derive(Parser, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Installs the global tracing subscriber, writing to stderr.
///
/// `RUST_LOG` takes precedence over the verbosity count.
pub fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("vaultport={}", level)));

    // A subscriber may already be installed (e.g. in tests).
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
