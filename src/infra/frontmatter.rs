//! Front matter rendering for exported notes.
//!
//! The block is rendered by hand rather than through a YAML serializer so the
//! output is byte-stable: fixed key order and two-space indented sequences.
//! Sequence items are written bare unless YAML would read them as something
//! other than a plain string.

use chrono::{DateTime, Duration, Utc};
use tracing::warn;

use crate::domain::{NoteRecord, TagRecord};

/// Offset applied to every exported timestamp, in seconds east of UTC.
const EXPORT_UTC_OFFSET_SECS: i64 = 8 * 3600;

/// Suffix written after every exported timestamp.
const EXPORT_UTC_OFFSET_SUFFIX: &str = "+08:00";

/// The delimiter line that opens and closes a front matter block.
pub const DELIMITER: &str = "---";

/// A front matter value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Written as-is after `key: `.
    Plain(String),
    /// Written inside double quotes.
    Quoted(String),
    /// Written as a block sequence, one `  - item` line per element.
    List(Vec<String>),
}

impl FieldValue {
    fn write(&self, key: &str, out: &mut String) {
        match self {
            FieldValue::Plain(value) => {
                out.push_str(&format!("{}: {}\n", key, value));
            }
            FieldValue::Quoted(value) => {
                out.push_str(&format!("{}: {}\n", key, quote(value)));
            }
            FieldValue::List(items) => {
                out.push_str(&format!("{}:\n", key));
                for item in items {
                    out.push_str(&format!("  - {}\n", list_item(item)));
                }
            }
        }
    }
}

fn quote(value: &str) -> String {
    let escaped = value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n");
    format!("\"{}\"", escaped)
}

/// Quotes a sequence item only when a bare scalar would not read back as the
/// same string.
fn list_item(item: &str) -> String {
    let ambiguous = item.contains(": ")
        || item.contains(" #")
        || item.starts_with('#')
        || item.ends_with(':')
        || item.contains('\n');
    if ambiguous { quote(item) } else { item.to_string() }
}

/// Ordered front matter fields.
///
/// Fields are rendered in the order they were first added. A field whose
/// value is `None` keeps its slot but produces no line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter {
    fields: Vec<(&'static str, Option<FieldValue>)>,
}

impl FrontMatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field, or replaces the value of an existing key in place.
    pub fn field(mut self, key: &'static str, value: Option<FieldValue>) -> Self {
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((key, value)),
        }
        self
    }

    /// Builds the front matter for an exported note.
    ///
    /// Key order: `updated`, `created`, `tags`, `source`, `location`,
    /// `aliases`. Everything after `created` is optional.
    pub fn for_note(note: &NoteRecord, tags: &[TagRecord], alias: Option<&str>) -> Self {
        let tags = (!tags.is_empty())
            .then(|| FieldValue::List(tags.iter().map(|tag| tag.title.clone()).collect()));
        let location = note
            .has_location()
            .then(|| FieldValue::Quoted(format!("{},{}", note.latitude, note.longitude)));

        Self::new()
            .field("updated", Some(FieldValue::Plain(format_timestamp(note.updated_at))))
            .field("created", Some(FieldValue::Plain(format_timestamp(note.created_at))))
            .field("tags", tags)
            .field("source", note.source().map(|url| FieldValue::Plain(url.to_string())))
            .field("location", location)
            .field("aliases", alias.map(|a| FieldValue::List(vec![a.to_string()])))
    }

    /// Renders the lines between the delimiters. Every line ends with `\n`.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (key, value) in &self.fields {
            if let Some(value) = value {
                value.write(key, &mut out);
            }
        }
        out
    }
}

/// Formats a millisecond timestamp as `YYYY-MM-DDTHH:mm:ss+08:00`.
///
/// The calendar fields are those of the instant in the fixed `+08:00`
/// offset; no timezone database is consulted. Timestamps outside chrono's
/// range render as the epoch, `1970-01-01T08:00:00+08:00`.
pub fn format_timestamp(millis: i64) -> String {
    let shifted = millis
        .checked_add(EXPORT_UTC_OFFSET_SECS * 1000)
        .and_then(DateTime::<Utc>::from_timestamp_millis);

    let datetime = match shifted {
        Some(datetime) => datetime,
        None => {
            warn!(millis, "timestamp out of range, using the epoch");
            DateTime::<Utc>::default() + Duration::seconds(EXPORT_UTC_OFFSET_SECS)
        }
    };

    format!(
        "{}{}",
        datetime.format("%Y-%m-%dT%H:%M:%S"),
        EXPORT_UTC_OFFSET_SUFFIX
    )
}
