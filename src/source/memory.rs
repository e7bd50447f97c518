//! In-memory data source, loadable from a JSON snapshot.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::{CollectionSource, DataSource, SourceError, SourceResult};
use crate::domain::{
    ItemKind, NoteRecord, NotebookRecord, ResourceFile, ResourceRecord, TagRecord,
};

/// A note collection held in memory.
///
/// Notebooks live in an arena keyed by id; enumeration preserves insertion
/// order.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    notebooks: HashMap<String, NotebookRecord>,
    notebook_order: Vec<String>,
    notes: Vec<NoteRecord>,
    tags: HashMap<String, Vec<TagRecord>>,
    resources: Vec<ResourceFile>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a notebook, replacing any notebook with the same id.
    pub fn insert_notebook(&mut self, notebook: NotebookRecord) -> &mut Self {
        if !self.notebooks.contains_key(&notebook.id) {
            self.notebook_order.push(notebook.id.clone());
        }
        self.notebooks.insert(notebook.id.clone(), notebook);
        self
    }

    /// Adds a note with its tags in source order.
    pub fn insert_note(&mut self, note: NoteRecord, tags: Vec<TagRecord>) -> &mut Self {
        if !tags.is_empty() {
            self.tags.insert(note.id.clone(), tags);
        }
        self.notes.push(note);
        self
    }

    pub fn insert_resource(&mut self, resource: ResourceFile) -> &mut Self {
        self.resources.push(resource);
        self
    }

    /// Loads a snapshot file.
    ///
    /// Relative resource paths are resolved against the snapshot's directory.
    pub fn load_snapshot(path: &Path) -> SourceResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| SourceError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let snapshot: Snapshot =
            serde_json::from_str(&contents).map_err(|e| SourceError::Snapshot {
                path: path.to_path_buf(),
                source: e,
            })?;

        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        Ok(Self::from_snapshot(snapshot, base_dir))
    }

    /// Builds a source from a parsed snapshot.
    pub fn from_snapshot(snapshot: Snapshot, base_dir: &Path) -> Self {
        let mut source = Self::new();
        for notebook in snapshot.notebooks {
            source.insert_notebook(notebook);
        }
        for entry in snapshot.notes {
            source.insert_note(entry.note, entry.tags);
        }
        for entry in snapshot.resources {
            source.insert_resource(ResourceFile::new(entry.record, base_dir.join(entry.path)));
        }
        source
    }
}

impl DataSource for MemorySource {
    fn notebook(&self, id: &str) -> SourceResult<NotebookRecord> {
        self.notebooks
            .get(id)
            .cloned()
            .ok_or_else(|| SourceError::NotFound {
                kind: ItemKind::Notebook,
                id: id.to_string(),
            })
    }

    fn note_tags(&self, note_id: &str) -> SourceResult<Vec<TagRecord>> {
        Ok(self.tags.get(note_id).cloned().unwrap_or_default())
    }
}

impl CollectionSource for MemorySource {
    fn notebooks(&self) -> SourceResult<Vec<NotebookRecord>> {
        Ok(self
            .notebook_order
            .iter()
            .filter_map(|id| self.notebooks.get(id).cloned())
            .collect())
    }

    fn notes(&self) -> SourceResult<Vec<NoteRecord>> {
        Ok(self.notes.clone())
    }

    fn resources(&self) -> SourceResult<Vec<ResourceFile>> {
        Ok(self.resources.clone())
    }
}

/// A JSON dump of a note collection.
///
/// ```json
/// {
///   "notebooks": [{ "id": "f1", "title": "Work" }],
///   "notes": [{ "id": "n1", "title": "Plan", "body": "...",
///               "created_time": 0, "updated_time": 0,
///               "parent_id": "f1", "tags": ["work"] }],
///   "resources": [{ "id": "r1", "title": "photo.png", "path": "blobs/r1.png" }]
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub notebooks: Vec<NotebookRecord>,
    #[serde(default)]
    pub notes: Vec<SnapshotNote>,
    #[serde(default)]
    pub resources: Vec<SnapshotResource>,
}

/// A note entry in a snapshot, with its tags inline.
#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotNote {
    #[serde(flatten)]
    pub note: NoteRecord,
    #[serde(default)]
    pub tags: Vec<TagRecord>,
}

/// A resource entry in a snapshot, with the path of its payload.
#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotResource {
    #[serde(flatten)]
    pub record: ResourceRecord,
    pub path: PathBuf,
}
