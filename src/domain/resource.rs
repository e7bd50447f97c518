//! Resource (attachment) records.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::notebook::non_empty;

/// An attachment's metadata as supplied by the data source.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResourceRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "filename", default, skip_serializing_if = "Option::is_none")]
    pub original_filename: Option<String>,
}

impl ResourceRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_original_filename(mut self, filename: impl Into<String>) -> Self {
        self.original_filename = Some(filename.into());
        self
    }

    /// Returns the display title if present and non-empty.
    pub fn display_title(&self) -> Option<&str> {
        non_empty(self.title.as_deref())
    }

    /// Returns the original filename if present and non-empty.
    pub fn filename(&self) -> Option<&str> {
        non_empty(self.original_filename.as_deref())
    }
}

/// A resource together with the file that holds its payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceFile {
    pub record: ResourceRecord,
    pub path: PathBuf,
}

impl ResourceFile {
    pub fn new(record: ResourceRecord, path: impl Into<PathBuf>) -> Self {
        Self {
            record,
            path: path.into(),
        }
    }
}
