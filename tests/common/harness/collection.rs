//! Builder for snapshot collections used in tests.

// Allow dead code since this is a test utility with methods for future tests
#![allow(dead_code)]

use serde_json::{Value, json};

/// Fixed timestamp used by default: 2023-11-15T06:13:20+08:00.
pub const DEFAULT_TS: i64 = 1_700_000_000_000;

/// A collection that serializes to the snapshot JSON format.
///
/// Resource payloads are written next to the snapshot by
/// [`TestEnv::write_collection`](super::TestEnv::write_collection).
#[derive(Debug, Default, Clone)]
pub struct TestCollection {
    notebooks: Vec<Value>,
    notes: Vec<Value>,
    resources: Vec<(Value, String, Vec<u8>)>,
}

impl TestCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a notebook, optionally nested under `parent`.
    pub fn notebook(mut self, id: &str, title: &str, parent: Option<&str>) -> Self {
        self.notebooks.push(json!({
            "id": id,
            "title": title,
            "parent_id": parent.unwrap_or(""),
        }));
        self
    }

    /// Adds a note with default timestamps.
    pub fn note(self, id: &str, title: &str, parent: Option<&str>, body: &str) -> Self {
        self.note_with(id, title, parent, body, |_| {})
    }

    /// Adds a note and lets the caller adjust its JSON (tags, source, location).
    pub fn note_with(
        mut self,
        id: &str,
        title: &str,
        parent: Option<&str>,
        body: &str,
        customize: impl FnOnce(&mut Value),
    ) -> Self {
        let mut note = json!({
            "id": id,
            "title": title,
            "body": body,
            "created_time": DEFAULT_TS,
            "updated_time": DEFAULT_TS,
            "parent_id": parent.unwrap_or(""),
        });
        customize(&mut note);
        self.notes.push(note);
        self
    }

    /// Adds a resource whose payload is written to `blobs/<file_name>`.
    pub fn resource(
        mut self,
        id: &str,
        title: Option<&str>,
        filename: Option<&str>,
        file_name: &str,
        payload: &[u8],
    ) -> Self {
        let mut record = json!({ "id": id, "path": format!("blobs/{file_name}") });
        if let Some(title) = title {
            record["title"] = json!(title);
        }
        if let Some(filename) = filename {
            record["filename"] = json!(filename);
        }
        self.resources
            .push((record, file_name.to_string(), payload.to_vec()));
        self
    }

    /// Returns the snapshot JSON.
    pub fn to_json(&self) -> Value {
        json!({
            "notebooks": self.notebooks,
            "notes": self.notes,
            "resources": self.resources.iter().map(|(r, _, _)| r.clone()).collect::<Vec<_>>(),
        })
    }

    /// Returns the resource payloads as `(file_name, bytes)`.
    pub fn payloads(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.resources
            .iter()
            .map(|(_, name, bytes)| (name.as_str(), bytes.as_slice()))
    }
}
