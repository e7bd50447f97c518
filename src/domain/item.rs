//! The tagged union of items dispatched to the exporter.

use serde::Serialize;
use std::fmt;

use super::{NoteRecord, NotebookRecord, ResourceRecord, TagRecord};

/// Discriminant of an exported item.
///
/// The numeric codes match the model type codes of the source application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Note,
    Notebook,
    Resource,
    Tag,
    NoteTag,
}

impl ItemKind {
    /// Returns the numeric model type code.
    pub fn code(self) -> i64 {
        match self {
            ItemKind::Note => 1,
            ItemKind::Notebook => 2,
            ItemKind::Resource => 4,
            ItemKind::Tag => 5,
            ItemKind::NoteTag => 6,
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ItemKind::Note => "note",
            ItemKind::Notebook => "notebook",
            ItemKind::Resource => "resource",
            ItemKind::Tag => "tag",
            ItemKind::NoteTag => "note_tag",
        };
        f.write_str(name)
    }
}

/// Association between a note and a tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteTagRecord {
    pub note_id: String,
    pub tag_id: String,
}

/// A single item handed to [`Exporter::on_process_item`](crate::export::Exporter::on_process_item).
///
/// Only notebooks and notes produce output; the other variants exist so a
/// host can forward everything it enumerates and have it ignored.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportItem {
    Notebook(NotebookRecord),
    Note(NoteRecord),
    Resource(ResourceRecord),
    Tag(TagRecord),
    NoteTag(NoteTagRecord),
}

impl ExportItem {
    pub fn kind(&self) -> ItemKind {
        match self {
            ExportItem::Notebook(_) => ItemKind::Notebook,
            ExportItem::Note(_) => ItemKind::Note,
            ExportItem::Resource(_) => ItemKind::Resource,
            ExportItem::Tag(_) => ItemKind::Tag,
            ExportItem::NoteTag(_) => ItemKind::NoteTag,
        }
    }

    /// Returns an identifier suitable for reports and log lines.
    pub fn label(&self) -> &str {
        match self {
            ExportItem::Notebook(notebook) => &notebook.id,
            ExportItem::Note(note) => &note.id,
            ExportItem::Resource(resource) => &resource.id,
            ExportItem::Tag(tag) => &tag.title,
            ExportItem::NoteTag(note_tag) => &note_tag.note_id,
        }
    }

    /// Returns the parent notebook id of a notebook or note.
    pub fn parent(&self) -> Option<&str> {
        match self {
            ExportItem::Notebook(notebook) => notebook.parent(),
            ExportItem::Note(note) => note.parent(),
            _ => None,
        }
    }
}

impl From<NotebookRecord> for ExportItem {
    fn from(notebook: NotebookRecord) -> Self {
        ExportItem::Notebook(notebook)
    }
}

impl From<NoteRecord> for ExportItem {
    fn from(note: NoteRecord) -> Self {
        ExportItem::Note(note)
    }
}
