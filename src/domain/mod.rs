//! Core types: notebooks, notes, tags, resources and the item union

mod item;
mod note;
mod notebook;
mod resource;

pub use item::{ExportItem, ItemKind, NoteTagRecord};
pub use note::{NoteRecord, TagRecord};
pub use notebook::NotebookRecord;
pub use resource::{ResourceFile, ResourceRecord};
