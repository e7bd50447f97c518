//! Notebook records, the folders of the source collection.

use serde::{Deserialize, Serialize};

/// A notebook (folder) as supplied by the data source.
///
/// Notebooks form a tree through `parent_id`. The tree is never walked
/// through live references: ancestors are fetched by id from a
/// [`DataSource`](crate::source::DataSource).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotebookRecord {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

impl NotebookRecord {
    /// Creates a root-level notebook.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            parent_id: None,
        }
    }

    /// Sets the parent notebook id.
    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    /// Returns the parent id, treating an empty id as root level.
    ///
    /// The source application stores root notebooks with `parent_id = ""`.
    pub fn parent(&self) -> Option<&str> {
        non_empty(self.parent_id.as_deref())
    }
}

pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
