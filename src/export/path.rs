//! Directory paths derived from notebook ancestry.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::warn;

use super::ExportError;
use crate::domain::{ExportItem, NoteRecord, NotebookRecord};
use crate::infra::{SanitizedName, sanitize, sanitize_segment};
use crate::source::DataSource;

/// Resolves the slash-delimited directory path of an item.
///
/// A notebook contributes its own title as the last segment; any other item
/// contributes nothing itself. Ancestors are fetched one at a time through
/// `source`. Each segment is followed by `/`, so a notebook `A/B/C` resolves
/// to `"A/B/C/"` and a note at the root resolves to `""`.
///
/// A parent that cannot be fetched, or an id seen twice, ends the walk and
/// the current node is treated as root level.
pub fn resolve_directory_path<S>(item: &ExportItem, source: &S) -> String
where
    S: DataSource + ?Sized,
{
    match item {
        ExportItem::Notebook(notebook) => walk_ancestry(Some(notebook), notebook.parent(), source),
        other => walk_ancestry(None, other.parent(), source),
    }
}

fn walk_ancestry<S>(start: Option<&NotebookRecord>, parent: Option<&str>, source: &S) -> String
where
    S: DataSource + ?Sized,
{
    // Leaf first; reversed on output.
    let mut segments = Vec::new();
    let mut visited = HashSet::new();

    if let Some(notebook) = start {
        segments.push(sanitize_segment(&notebook.title));
        visited.insert(notebook.id.clone());
    }

    let mut next = parent.map(str::to_string);
    while let Some(id) = next.take() {
        if !visited.insert(id.clone()) {
            warn!(notebook = %id, "notebook ancestry loops back on itself, treating as root");
            break;
        }

        match source.notebook(&id) {
            Ok(notebook) => {
                segments.push(sanitize_segment(&notebook.title));
                next = notebook.parent().map(str::to_string);
            }
            Err(err) => {
                warn!(notebook = %id, error = %err, "parent notebook unavailable, treating as root");
            }
        }
    }

    segments.iter().rev().map(|segment| format!("{}/", segment)).collect()
}

/// Joins a slash-delimited relative path onto a root directory.
pub fn directory_under(root: &Path, relative: &str) -> PathBuf {
    relative
        .split('/')
        .filter(|segment| !segment.is_empty())
        .fold(root.to_path_buf(), |path, segment| path.join(segment))
}

/// Returns the directory containing `path`.
///
/// # Errors
///
/// Returns `ExportError::EmptyPath` for an empty path.
pub fn parent_dir(path: &Path) -> Result<&Path, ExportError> {
    if path.as_os_str().is_empty() {
        return Err(ExportError::EmptyPath { what: "a directory name" });
    }
    Ok(match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    })
}

/// Returns the final component of `path`.
///
/// # Errors
///
/// Returns `ExportError::EmptyPath` for an empty path and
/// `ExportError::NoFileName` for paths like `/` or `..`.
pub fn base_name(path: &Path) -> Result<&std::ffi::OsStr, ExportError> {
    if path.as_os_str().is_empty() {
        return Err(ExportError::EmptyPath { what: "a file name" });
    }
    path.file_name().ok_or_else(|| ExportError::NoFileName {
        path: path.to_path_buf(),
    })
}

/// Where a note lands in the vault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteTarget {
    /// The containing notebook's resolved path, e.g. `"Work/Projects/"`.
    pub directory: String,
    pub name: SanitizedName,
}

impl NoteTarget {
    pub fn resolve<S>(note: &NoteRecord, source: &S) -> Self
    where
        S: DataSource + ?Sized,
    {
        Self {
            directory: walk_ancestry(None, note.parent(), source),
            name: sanitize(note.title.as_deref()),
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.md", self.name.filename)
    }

    /// Path relative to the destination root, e.g. `"Work/Plan.md"`.
    pub fn relative_path(&self) -> String {
        format!("{}{}", self.directory, self.file_name())
    }

    pub fn path_under(&self, root: &Path) -> PathBuf {
        directory_under(root, &self.directory).join(self.file_name())
    }
}
