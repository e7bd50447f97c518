//! The export state machine driven by host lifecycle callbacks.

use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::ExportError;
use super::note::serialize_note;
use super::path::{NoteTarget, directory_under, parent_dir, resolve_directory_path};
use super::resource::{MaterializedResource, materialize};
use crate::domain::{ExportItem, ItemKind, NoteRecord, ResourceFile, ResourceRecord};
use crate::infra::{ensure_dir, write_atomic};
use crate::source::DataSource;

/// Name of the attachments directory under the destination root.
pub const ASSETS_DIR: &str = "assets";

/// Where an export run writes. Immutable for the duration of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportContext {
    destination_root: PathBuf,
    assets_namespace: Option<String>,
}

impl ExportContext {
    pub fn new(destination_root: impl Into<PathBuf>) -> Self {
        Self {
            destination_root: destination_root.into(),
            assets_namespace: None,
        }
    }

    /// Places attachments under `assets/<namespace>/` instead of `assets/`.
    pub fn with_assets_namespace(mut self, namespace: Option<String>) -> Self {
        self.assets_namespace = namespace.filter(|ns| !ns.trim().is_empty());
        self
    }

    pub fn destination_root(&self) -> &Path {
        &self.destination_root
    }

    pub fn assets_dir(&self) -> PathBuf {
        let assets = self.destination_root.join(ASSETS_DIR);
        match &self.assets_namespace {
            Some(namespace) => assets.join(namespace),
            None => assets,
        }
    }
}

/// Lifecycle state of an [`Exporter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportState {
    Uninitialized,
    Initialized,
    Closed,
}

impl fmt::Display for ExportState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExportState::Uninitialized => "uninitialized",
            ExportState::Initialized => "initialized",
            ExportState::Closed => "closed",
        };
        f.write_str(name)
    }
}

/// A lifecycle callback as a message.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportEvent {
    Init,
    Item(ExportItem),
    Resource(ResourceFile),
    Close,
}

/// What handling one event produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Initialized,
    Directory(PathBuf),
    Note(PathBuf),
    Resource(MaterializedResource),
    Ignored(ItemKind),
    Closed,
}

/// Writes a vault one item at a time.
///
/// The host calls [`on_init`](Self::on_init) once, then
/// [`on_process_item`](Self::on_process_item) and
/// [`on_process_resource`](Self::on_process_resource) any number of times in
/// any order, then [`on_close`](Self::on_close). Each item call is
/// independent: it creates whatever directories it needs and a failure
/// affects only that item.
pub struct Exporter<S> {
    source: S,
    context: ExportContext,
    state: ExportState,
}

impl<S: DataSource> Exporter<S> {
    pub fn new(source: S, context: ExportContext) -> Self {
        Self {
            source,
            context,
            state: ExportState::Uninitialized,
        }
    }

    pub fn context(&self) -> &ExportContext {
        &self.context
    }

    pub fn state(&self) -> ExportState {
        self.state
    }

    /// Creates the destination root and the assets directory.
    ///
    /// Existing directories and their contents are left alone, so this may be
    /// called again or run against a populated destination.
    pub fn on_init(&mut self) -> Result<(), ExportError> {
        if self.state == ExportState::Closed {
            return Err(self.invalid_state("initialize"));
        }

        ensure_dir(self.context.destination_root())?;
        ensure_dir(&self.context.assets_dir())?;
        info!(dest = %self.context.destination_root().display(), "export initialized");

        self.state = ExportState::Initialized;
        Ok(())
    }

    /// Exports one notebook or note. Other item kinds are ignored.
    pub fn on_process_item(&mut self, item: &ExportItem) -> Result<ExportOutcome, ExportError> {
        self.require_initialized("process an item")?;

        match item {
            ExportItem::Notebook(notebook) => {
                let relative = resolve_directory_path(item, &self.source);
                let dir = directory_under(self.context.destination_root(), &relative);
                ensure_dir(&dir)?;
                debug!(notebook = %notebook.id, path = %dir.display(), "created notebook directory");
                Ok(ExportOutcome::Directory(dir))
            }
            ExportItem::Note(note) => self.export_note(note).map(ExportOutcome::Note),
            other => {
                debug!(kind = %other.kind(), id = other.label(), "ignoring item");
                Ok(ExportOutcome::Ignored(other.kind()))
            }
        }
    }

    /// Copies one attachment into the assets directory.
    pub fn on_process_resource(
        &mut self,
        resource: &ResourceRecord,
        file_path: &Path,
    ) -> Result<MaterializedResource, ExportError> {
        self.require_initialized("process a resource")?;
        materialize(resource, file_path, &self.context.assets_dir())
    }

    /// Ends the run. Nothing is buffered, so there is nothing to flush.
    pub fn on_close(&mut self) -> Result<(), ExportError> {
        self.require_initialized("close")?;
        self.state = ExportState::Closed;
        info!(dest = %self.context.destination_root().display(), "export closed");
        Ok(())
    }

    /// Dispatches a lifecycle message to the matching callback.
    pub fn handle(&mut self, event: ExportEvent) -> Result<ExportOutcome, ExportError> {
        match event {
            ExportEvent::Init => self.on_init().map(|()| ExportOutcome::Initialized),
            ExportEvent::Item(item) => self.on_process_item(&item),
            ExportEvent::Resource(resource) => self
                .on_process_resource(&resource.record, &resource.path)
                .map(ExportOutcome::Resource),
            ExportEvent::Close => self.on_close().map(|()| ExportOutcome::Closed),
        }
    }

    fn export_note(&self, note: &NoteRecord) -> Result<PathBuf, ExportError> {
        let target = NoteTarget::resolve(note, &self.source);
        let alias = target.name.alias(note.title.as_deref());
        let tags = self.source.note_tags(&note.id)?;

        let path = target.path_under(self.context.destination_root());
        ensure_dir(parent_dir(&path)?)?;
        write_atomic(&path, serialize_note(note, &tags, alias).as_bytes())?;

        debug!(note = %note.id, path = %path.display(), "wrote note");
        Ok(path)
    }

    fn require_initialized(&self, action: &'static str) -> Result<(), ExportError> {
        if self.state == ExportState::Initialized {
            Ok(())
        } else {
            Err(self.invalid_state(action))
        }
    }

    fn invalid_state(&self, action: &'static str) -> ExportError {
        ExportError::InvalidState {
            action,
            state: self.state,
        }
    }
}
