//! Handler for the `export` command.

use anyhow::{Context, Result, bail};

use crate::cli::ExportArgs;
use crate::cli::config::Config;
use crate::cli::output::{ExportSummary, Output, OutputFormat};
use crate::export::{ExportContext, ExportOptions, export_collection};

use super::open_source;

/// Handle the `export` command.
///
/// Fails if the run aborts or if any item could not be exported.
pub fn handle_export(args: &ExportArgs, config: &Config) -> Result<()> {
    let source = open_source(&args.source, config)?;
    let dest = config.dest(args.dest.as_ref());
    let context = ExportContext::new(&dest)
        .with_assets_namespace(config.assets_namespace(args.assets_namespace.as_ref()));
    let options = ExportOptions {
        fail_fast: args.fail_fast || config.fail_fast,
    };

    let report = export_collection(source.as_ref(), context, options)
        .with_context(|| format!("export to {} failed", dest.display()))?;

    match args.format {
        OutputFormat::Human => {
            println!(
                "Exported {} notes, {} notebooks and {} resources to {}",
                report.notes,
                report.notebooks,
                report.resources,
                dest.display()
            );
            for failure in &report.failures {
                eprintln!("  error: {} {}: {}", failure.kind, failure.id, failure.message);
            }
        }
        OutputFormat::Json => {
            let summary = ExportSummary {
                dest: dest.display().to_string(),
                report: &report,
            };
            println!("{}", serde_json::to_string_pretty(&Output::new(summary))?);
        }
    }

    if !report.is_success() {
        bail!("{} items failed to export", report.failures.len());
    }
    Ok(())
}
