//! Note file content: front matter followed by the raw body.

use crate::domain::{NoteRecord, TagRecord};
use crate::infra::{DELIMITER, FrontMatter};

/// Serializes a note to its exported file content.
///
/// # Format
/// ```text
/// ---
/// updated: 2023-11-15T06:13:20+08:00
/// created: 2023-11-15T06:13:20+08:00
/// tags:
///   - work
/// ---
///
/// Body content here...
/// ```
///
/// The body is written verbatim.
pub fn serialize_note(note: &NoteRecord, tags: &[TagRecord], alias: Option<&str>) -> String {
    let front_matter = FrontMatter::for_note(note, tags, alias).render();
    format!(
        "{delim}\n{front_matter}{delim}\n\n{body}",
        delim = DELIMITER,
        body = note.body
    )
}
