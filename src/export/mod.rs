//! Export of a note collection into a vault directory.
//!
//! [`Exporter`] handles one lifecycle callback at a time;
//! [`export_collection`] drives it over a whole [`CollectionSource`].
//!
//! [`CollectionSource`]: crate::source::CollectionSource

mod driver;
mod exporter;
mod note;
mod path;
mod resource;

pub use driver::{ExportOptions, ExportReport, ItemFailure, export_collection};
pub use exporter::{
    ASSETS_DIR, ExportContext, ExportEvent, ExportOutcome, ExportState, Exporter,
};
pub use note::serialize_note;
pub use path::{NoteTarget, base_name, directory_under, parent_dir, resolve_directory_path};
pub use resource::{METADATA_EXTENSION, MaterializedResource, ResourceMetadata, materialize};

use std::path::PathBuf;
use thiserror::Error;

use crate::infra::FsError;
use crate::source::SourceError;

/// Errors that abort the export of a single item, or of a whole run.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Fs(#[from] FsError),

    #[error(transparent)]
    Source(#[from] SourceError),

    /// A directory or file name was requested for an empty path.
    #[error("cannot derive {what} from an empty path")]
    EmptyPath { what: &'static str },

    #[error("path has no file name: {path}")]
    NoFileName { path: PathBuf },

    #[error("failed to encode resource metadata: {0}")]
    Metadata(#[from] serde_json::Error),

    /// A lifecycle callback arrived in the wrong state.
    #[error("cannot {action} while exporter is {state}")]
    InvalidState {
        action: &'static str,
        state: ExportState,
    },
}
