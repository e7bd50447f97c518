//! Data sources: where notebooks, notes, tags and resources come from.
//!
//! The exporter only needs point lookups ([`DataSource`]); the export driver
//! also enumerates everything ([`CollectionSource`]).

mod joplin;
mod memory;

pub use joplin::JoplinProfile;
pub use memory::{MemorySource, Snapshot, SnapshotNote, SnapshotResource};

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::{ItemKind, NoteRecord, NotebookRecord, ResourceFile, TagRecord};

/// Errors raised while reading from a data source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The requested record does not exist.
    #[error("{kind} not found: {id}")]
    NotFound { kind: ItemKind, id: String },

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// The profile directory has no database.
    #[error("no database found in profile: {path}")]
    MissingDatabase { path: PathBuf },

    /// An I/O error occurred.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A snapshot file could not be parsed.
    #[error("invalid snapshot {path}: {source}")]
    Snapshot {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for data source operations.
pub type SourceResult<T> = Result<T, SourceError>;

/// Point queries the exporter issues while processing a single item.
pub trait DataSource {
    /// Fetches a notebook by id.
    ///
    /// Returns `SourceError::NotFound` if no such notebook exists.
    fn notebook(&self, id: &str) -> SourceResult<NotebookRecord>;

    /// Returns the tags of a note in source order.
    fn note_tags(&self, note_id: &str) -> SourceResult<Vec<TagRecord>>;
}

/// A data source that can enumerate its whole collection.
pub trait CollectionSource: DataSource {
    fn notebooks(&self) -> SourceResult<Vec<NotebookRecord>>;

    fn notes(&self) -> SourceResult<Vec<NoteRecord>>;

    fn resources(&self) -> SourceResult<Vec<ResourceFile>>;
}

impl<T: DataSource + ?Sized> DataSource for &T {
    fn notebook(&self, id: &str) -> SourceResult<NotebookRecord> {
        (**self).notebook(id)
    }

    fn note_tags(&self, note_id: &str) -> SourceResult<Vec<TagRecord>> {
        (**self).note_tags(note_id)
    }
}

impl<T: DataSource + ?Sized> DataSource for Box<T> {
    fn notebook(&self, id: &str) -> SourceResult<NotebookRecord> {
        (**self).notebook(id)
    }

    fn note_tags(&self, note_id: &str) -> SourceResult<Vec<TagRecord>> {
        (**self).note_tags(note_id)
    }
}

impl<T: CollectionSource + ?Sized> CollectionSource for Box<T> {
    fn notebooks(&self) -> SourceResult<Vec<NotebookRecord>> {
        (**self).notebooks()
    }

    fn notes(&self) -> SourceResult<Vec<NoteRecord>> {
        (**self).notes()
    }

    fn resources(&self) -> SourceResult<Vec<ResourceFile>> {
        (**self).resources()
    }
}
