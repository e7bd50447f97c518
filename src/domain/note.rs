//! Note and tag records.

use serde::{Deserialize, Serialize};

use super::notebook::non_empty;

/// A note as supplied by the data source.
///
/// Timestamps are milliseconds since the Unix epoch. A latitude and
/// longitude of `0.0` means the note carries no location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteRecord {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: String,
    #[serde(rename = "created_time")]
    pub created_at: i64,
    #[serde(rename = "updated_time")]
    pub updated_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
    #[serde(default)]
    pub parent_id: Option<String>,
}

impl NoteRecord {
    /// Creates a note with a title and body and no optional metadata.
    pub fn new(id: impl Into<String>, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: Some(title.into()),
            body: body.into(),
            created_at: 0,
            updated_at: 0,
            source_url: None,
            latitude: 0.0,
            longitude: 0.0,
            parent_id: None,
        }
    }

    pub fn with_parent(mut self, notebook_id: impl Into<String>) -> Self {
        self.parent_id = Some(notebook_id.into());
        self
    }

    pub fn with_timestamps(mut self, created_at: i64, updated_at: i64) -> Self {
        self.created_at = created_at;
        self.updated_at = updated_at;
        self
    }

    pub fn with_source_url(mut self, url: impl Into<String>) -> Self {
        self.source_url = Some(url.into());
        self
    }

    pub fn with_location(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = latitude;
        self.longitude = longitude;
        self
    }

    /// Returns the containing notebook id, treating an empty id as root level.
    pub fn parent(&self) -> Option<&str> {
        non_empty(self.parent_id.as_deref())
    }

    /// Returns the source URL if one is set and non-empty.
    pub fn source(&self) -> Option<&str> {
        non_empty(self.source_url.as_deref())
    }

    /// Returns true if either coordinate is non-zero.
    pub fn has_location(&self) -> bool {
        self.latitude != 0.0 || self.longitude != 0.0
    }
}

/// A tag attached to a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagRecord {
    pub title: String,
}

impl TagRecord {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

impl From<&str> for TagRecord {
    fn from(title: &str) -> Self {
        Self::new(title)
    }
}
