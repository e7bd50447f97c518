//! Runs a whole export from a [`CollectionSource`], playing the host's part.

use serde::Serialize;
use tracing::{error, info};

use super::ExportError;
use super::exporter::{ExportContext, ExportOutcome, Exporter};
use crate::domain::{ExportItem, ItemKind};
use crate::source::CollectionSource;

/// Options for [`export_collection`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ExportOptions {
    /// Abort on the first failed item instead of recording it and moving on.
    pub fail_fast: bool,
}

/// An item that could not be exported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemFailure {
    pub kind: ItemKind,
    pub id: String,
    pub message: String,
}

/// Summary of an export run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExportReport {
    pub notebooks: usize,
    pub notes: usize,
    pub resources: usize,
    pub ignored: usize,
    pub failures: Vec<ItemFailure>,
}

impl ExportReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    fn record(&mut self, outcome: &ExportOutcome) {
        match outcome {
            ExportOutcome::Directory(_) => self.notebooks += 1,
            ExportOutcome::Note(_) => self.notes += 1,
            ExportOutcome::Resource(_) => self.resources += 1,
            ExportOutcome::Ignored(_) => self.ignored += 1,
            ExportOutcome::Initialized | ExportOutcome::Closed => {}
        }
    }

    fn fail(&mut self, kind: ItemKind, id: &str, err: &ExportError) {
        error!(%kind, type_code = kind.code(), id, error = %err, "failed to export item");
        self.failures.push(ItemFailure {
            kind,
            id: id.to_string(),
            message: err.to_string(),
        });
    }
}

/// Exports every notebook, note and resource of `source` into `context`.
///
/// Notebooks are processed before notes and notes before resources, though
/// the exporter does not depend on that order. A failed item is recorded in
/// the report and the run continues unless `options.fail_fast` is set.
///
/// # Errors
///
/// Returns an error if the source cannot be enumerated, the destination
/// cannot be initialized, or (with `fail_fast`) any item fails.
pub fn export_collection<S>(
    source: &S,
    context: ExportContext,
    options: ExportOptions,
) -> Result<ExportReport, ExportError>
where
    S: CollectionSource + ?Sized,
{
    let notebooks = source.notebooks()?;
    let notes = source.notes()?;
    let resources = source.resources()?;

    let mut exporter = Exporter::new(source, context);
    exporter.on_init()?;

    let mut report = ExportReport::default();
    let items = notebooks
        .into_iter()
        .map(ExportItem::from)
        .chain(notes.into_iter().map(ExportItem::from));

    for item in items {
        match exporter.on_process_item(&item) {
            Ok(outcome) => report.record(&outcome),
            Err(err) if options.fail_fast => return Err(err),
            Err(err) => report.fail(item.kind(), item.label(), &err),
        }
    }

    for resource in &resources {
        match exporter.on_process_resource(&resource.record, &resource.path) {
            Ok(materialized) => report.record(&ExportOutcome::Resource(materialized)),
            Err(err) if options.fail_fast => return Err(err),
            Err(err) => report.fail(ItemKind::Resource, &resource.record.id, &err),
        }
    }

    exporter.on_close()?;
    info!(
        notebooks = report.notebooks,
        notes = report.notes,
        resources = report.resources,
        failures = report.failures.len(),
        "export finished"
    );
    Ok(report)
}
