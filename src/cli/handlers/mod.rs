//! Command handlers for the CLI.

mod export;
mod list;

use anyhow::{Context, Result, bail};

use super::SourceArgs;
use super::config::Config;
use crate::source::{CollectionSource, JoplinProfile, MemorySource};

pub use export::handle_export;
pub use list::handle_list;

/// Opens the collection named on the command line or in the config file.
///
/// A snapshot given on the command line wins over any profile.
pub(crate) fn open_source(args: &SourceArgs, config: &Config) -> Result<Box<dyn CollectionSource>> {
    if let Some(snapshot) = &args.snapshot {
        let source = MemorySource::load_snapshot(snapshot)
            .with_context(|| format!("failed to load snapshot {}", snapshot.display()))?;
        return Ok(Box::new(source));
    }

    match config.profile(args.profile.as_ref()) {
        Some(profile) => {
            let source = JoplinProfile::open(&profile)
                .with_context(|| format!("failed to open profile {}", profile.display()))?;
            Ok(Box::new(source))
        }
        None => bail!("no collection given: pass --profile or --snapshot"),
    }
}
