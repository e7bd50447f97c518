//! Data source backed by a Joplin desktop profile directory.

use rusqlite::{Connection, OpenFlags, OptionalExtension, Row};
use std::path::{Path, PathBuf};

use super::{CollectionSource, DataSource, SourceError, SourceResult};
use crate::domain::{
    ItemKind, NoteRecord, NotebookRecord, ResourceFile, ResourceRecord, TagRecord,
};

/// A Joplin profile: `database.sqlite` plus a `resources/` blob directory.
///
/// The database is opened read-only.
pub struct JoplinProfile {
    conn: Connection,
    resource_dir: PathBuf,
}

impl JoplinProfile {
    /// Name of the database file inside a profile directory.
    pub const DATABASE_FILE: &'static str = "database.sqlite";

    /// Name of the blob directory inside a profile directory.
    pub const RESOURCE_DIR: &'static str = "resources";

    /// Opens a profile directory.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::MissingDatabase` if the directory has no
    /// `database.sqlite`.
    pub fn open(profile_dir: &Path) -> SourceResult<Self> {
        let db_path = profile_dir.join(Self::DATABASE_FILE);
        if !db_path.is_file() {
            return Err(SourceError::MissingDatabase { path: db_path });
        }

        let conn = Connection::open_with_flags(
            &db_path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Ok(Self::from_connection(
            conn,
            profile_dir.join(Self::RESOURCE_DIR),
        ))
    }

    /// Wraps an existing connection.
    pub fn from_connection(conn: Connection, resource_dir: PathBuf) -> Self {
        Self { conn, resource_dir }
    }

    /// Returns the `WHERE` fragment excluding trashed rows of `table`.
    ///
    /// Profiles created before the trash feature have no `deleted_time`
    /// column, in which case nothing is filtered.
    fn live_rows(&self, table: &str) -> SourceResult<&'static str> {
        let has_trash = self
            .conn
            .prepare_cached("SELECT 1 FROM pragma_table_info(?1) WHERE name = 'deleted_time'")?
            .exists([table])?;
        Ok(if has_trash { "deleted_time = 0" } else { "1 = 1" })
    }

    /// Returns the path of a resource blob: `resources/<id>[.<ext>]`.
    fn blob_path(&self, id: &str, extension: &str) -> PathBuf {
        if extension.is_empty() {
            self.resource_dir.join(id)
        } else {
            self.resource_dir.join(format!("{}.{}", id, extension))
        }
    }
}

fn notebook_from_row(row: &Row<'_>) -> rusqlite::Result<NotebookRecord> {
    Ok(NotebookRecord {
        id: row.get(0)?,
        title: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
        parent_id: row.get(2)?,
    })
}

fn note_from_row(row: &Row<'_>) -> rusqlite::Result<NoteRecord> {
    Ok(NoteRecord {
        id: row.get(0)?,
        title: row.get(1)?,
        body: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        created_at: row.get(3)?,
        updated_at: row.get(4)?,
        source_url: row.get(5)?,
        latitude: row.get::<_, Option<f64>>(6)?.unwrap_or_default(),
        longitude: row.get::<_, Option<f64>>(7)?.unwrap_or_default(),
        parent_id: row.get(8)?,
    })
}

impl DataSource for JoplinProfile {
    fn notebook(&self, id: &str) -> SourceResult<NotebookRecord> {
        self.conn
            .prepare_cached("SELECT id, title, parent_id FROM folders WHERE id = ?1")?
            .query_row([id], notebook_from_row)
            .optional()?
            .ok_or_else(|| SourceError::NotFound {
                kind: ItemKind::Notebook,
                id: id.to_string(),
            })
    }

    fn note_tags(&self, note_id: &str) -> SourceResult<Vec<TagRecord>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT tags.title FROM note_tags
             INNER JOIN tags ON tags.id = note_tags.tag_id
             WHERE note_tags.note_id = ?1
             ORDER BY note_tags.rowid",
        )?;
        let tags = stmt
            .query_map([note_id], |row| row.get::<_, String>(0))?
            .map(|title| title.map(TagRecord::new))
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(tags)
    }
}

impl CollectionSource for JoplinProfile {
    fn notebooks(&self) -> SourceResult<Vec<NotebookRecord>> {
        let sql = format!(
            "SELECT id, title, parent_id FROM folders WHERE {} ORDER BY rowid",
            self.live_rows("folders")?
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let notebooks = stmt
            .query_map([], notebook_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(notebooks)
    }

    fn notes(&self) -> SourceResult<Vec<NoteRecord>> {
        let sql = format!(
            "SELECT id, title, body, created_time, updated_time, source_url,
                    latitude, longitude, parent_id
             FROM notes
             WHERE is_conflict = 0 AND {}
             ORDER BY rowid",
            self.live_rows("notes")?
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let notes = stmt
            .query_map([], note_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(notes)
    }

    fn resources(&self) -> SourceResult<Vec<ResourceFile>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, filename, file_extension FROM resources ORDER BY rowid",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, Option<String>>(1)?,
                    row.get::<_, Option<String>>(2)?,
                    row.get::<_, Option<String>>(3)?,
                ))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rows
            .into_iter()
            .map(|(id, title, filename, extension)| {
                let path = self.blob_path(&id, extension.as_deref().unwrap_or_default());
                let record = ResourceRecord {
                    id,
                    title,
                    original_filename: filename,
                };
                ResourceFile::new(record, path)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    /// The subset of the Joplin schema the exporter reads.
    const SCHEMA: &str = "
        CREATE TABLE folders (
            id TEXT PRIMARY KEY, title TEXT NOT NULL DEFAULT '',
            parent_id TEXT NOT NULL DEFAULT '', deleted_time INT NOT NULL DEFAULT 0
        );
        CREATE TABLE notes (
            id TEXT PRIMARY KEY, parent_id TEXT NOT NULL DEFAULT '',
            title TEXT NOT NULL DEFAULT '', body TEXT NOT NULL DEFAULT '',
            created_time INT NOT NULL, updated_time INT NOT NULL,
            is_conflict INT NOT NULL DEFAULT 0,
            latitude NUMERIC NOT NULL DEFAULT 0, longitude NUMERIC NOT NULL DEFAULT 0,
            source_url TEXT NOT NULL DEFAULT '', deleted_time INT NOT NULL DEFAULT 0
        );
        CREATE TABLE tags (id TEXT PRIMARY KEY, title TEXT NOT NULL DEFAULT '');
        CREATE TABLE note_tags (
            id TEXT PRIMARY KEY, note_id TEXT NOT NULL, tag_id TEXT NOT NULL
        );
        CREATE TABLE resources (
            id TEXT PRIMARY KEY, title TEXT NOT NULL DEFAULT '',
            filename TEXT NOT NULL DEFAULT '', file_extension TEXT NOT NULL DEFAULT ''
        );
    ";

    fn profile() -> (TempDir, JoplinProfile) {
        let dir = TempDir::new().unwrap();
        let conn = Connection::open(dir.path().join(JoplinProfile::DATABASE_FILE)).unwrap();
        conn.execute_batch(SCHEMA).unwrap();
        conn.execute_batch(
            "INSERT INTO folders (id, title, parent_id) VALUES
                ('f1', 'Work', ''), ('f2', 'Projects', 'f1');
             INSERT INTO notes (id, parent_id, title, body, created_time, updated_time,
                                latitude, longitude, source_url) VALUES
                ('n1', 'f2', 'Plan', 'body', 1700000000000, 1700000060000,
                 '40.7128', '-74.006', 'https://example.com');
             INSERT INTO notes (id, parent_id, title, body, created_time, updated_time,
                                is_conflict) VALUES
                ('n2', 'f2', 'Plan', 'conflicting body', 1, 2, 1);
             INSERT INTO folders (id, title, parent_id, deleted_time) VALUES
                ('f3', 'Old', '', 1700000100000);
             INSERT INTO notes (id, parent_id, title, body, created_time, updated_time,
                                deleted_time) VALUES
                ('n3', 'f1', 'Discarded', 'trashed body', 1, 2, 1700000100000);
             INSERT INTO tags (id, title) VALUES ('t1', 'work'), ('t2', 'urgent');
             INSERT INTO note_tags (id, note_id, tag_id) VALUES
                ('nt2', 'n1', 't2'), ('nt1', 'n1', 't1');
             INSERT INTO resources (id, title, filename, file_extension) VALUES
                ('r1', 'photo.png', '', 'png'), ('r2', '', '', '');",
        )
        .unwrap();
        drop(conn);

        let profile = JoplinProfile::open(dir.path()).unwrap();
        (dir, profile)
    }

    #[test]
    fn open_requires_database() {
        let dir = TempDir::new().unwrap();
        let result = JoplinProfile::open(dir.path());
        assert!(matches!(result, Err(SourceError::MissingDatabase { .. })));
    }

    #[test]
    fn notebook_lookup() {
        let (_dir, profile) = profile();
        let notebook = profile.notebook("f2").unwrap();
        assert_eq!(notebook.title, "Projects");
        assert_eq!(notebook.parent(), Some("f1"));
        assert_eq!(profile.notebook("f1").unwrap().parent(), None);
    }

    #[test]
    fn missing_notebook_is_not_found() {
        let (_dir, profile) = profile();
        let result = profile.notebook("missing");
        assert!(matches!(result, Err(SourceError::NotFound { .. })));
    }

    #[test]
    fn tags_follow_association_order() {
        let (_dir, profile) = profile();
        let tags = profile.note_tags("n1").unwrap();
        assert_eq!(tags, vec![TagRecord::new("urgent"), TagRecord::new("work")]);
        assert!(profile.note_tags("n2").unwrap().is_empty());
    }

    #[test]
    fn notes_skip_conflict_copies() {
        let (_dir, profile) = profile();
        let notes = profile.notes().unwrap();
        assert_eq!(notes.len(), 1);

        let note = &notes[0];
        assert_eq!(note.title.as_deref(), Some("Plan"));
        assert_eq!(note.created_at, 1_700_000_000_000);
        assert_eq!(note.source(), Some("https://example.com"));
        assert_eq!(note.latitude, 40.7128);
        assert_eq!(note.longitude, -74.006);
        assert_eq!(note.parent(), Some("f2"));
    }

    #[test]
    fn notes_skip_trashed() {
        let (_dir, profile) = profile();
        let ids: Vec<_> = profile.notes().unwrap().into_iter().map(|n| n.id).collect();
        assert_eq!(ids, vec!["n1"]);
    }

    #[test]
    fn profile_without_trash_column_exports_everything() {
        let dir = TempDir::new().unwrap();
        let conn = Connection::open(dir.path().join(JoplinProfile::DATABASE_FILE)).unwrap();
        conn.execute_batch(
            "CREATE TABLE folders (id TEXT PRIMARY KEY, title TEXT, parent_id TEXT);
             CREATE TABLE notes (
                 id TEXT PRIMARY KEY, parent_id TEXT, title TEXT, body TEXT,
                 created_time INT, updated_time INT, is_conflict INT DEFAULT 0,
                 latitude NUMERIC DEFAULT 0, longitude NUMERIC DEFAULT 0, source_url TEXT
             );
             INSERT INTO folders VALUES ('f1', 'Inbox', '');
             INSERT INTO notes (id, parent_id, title, body, created_time, updated_time)
                 VALUES ('n1', 'f1', 'Kept', '', 1, 2);",
        )
        .unwrap();
        drop(conn);

        let profile = JoplinProfile::open(dir.path()).unwrap();
        assert_eq!(profile.notebooks().unwrap().len(), 1);
        assert_eq!(profile.notes().unwrap().len(), 1);
    }

    #[test]
    fn notebooks_are_enumerated() {
        let (_dir, profile) = profile();
        let ids: Vec<_> = profile.notebooks().unwrap().into_iter().map(|n| n.id).collect();
        assert_eq!(ids, vec!["f1", "f2"]);
    }

    #[test]
    fn resources_point_into_blob_directory() {
        let (dir, profile) = profile();
        let resources = profile.resources().unwrap();
        assert_eq!(resources.len(), 2);

        assert_eq!(resources[0].path, dir.path().join("resources").join("r1.png"));
        assert_eq!(resources[0].record.display_title(), Some("photo.png"));
        assert_eq!(resources[0].record.filename(), None);

        assert_eq!(resources[1].path, dir.path().join("resources").join("r2"));
        assert_eq!(resources[1].record.display_title(), None);
    }
}
