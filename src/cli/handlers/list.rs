//! Handler for the `ls` command.

use anyhow::{Context, Result};

use crate::cli::ListArgs;
use crate::cli::config::Config;
use crate::cli::output::{NoteListing, Output, OutputFormat};
use crate::export::NoteTarget;

use super::open_source;

/// Prints where each note would be exported, without writing anything.
pub fn handle_list(args: &ListArgs, config: &Config) -> Result<()> {
    let source = open_source(&args.source, config)?;
    let notes = source.notes().context("failed to list notes")?;

    let listings: Vec<NoteListing> = notes
        .into_iter()
        .map(|note| {
            let path = NoteTarget::resolve(&note, source.as_ref()).relative_path();
            NoteListing {
                id: note.id,
                title: note.title,
                path,
            }
        })
        .collect();

    match args.format {
        OutputFormat::Human => {
            for listing in &listings {
                println!("{}", listing.path);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&Output::new(listings))?);
        }
    }
    Ok(())
}
