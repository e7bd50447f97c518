//! Attachment export: payload copy plus optional metadata sidecar.

use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::ExportError;
use super::path::base_name;
use crate::domain::ResourceRecord;
use crate::infra::{copy_atomic, write_atomic};

/// Extension appended to a copied resource's path for its sidecar.
pub const METADATA_EXTENSION: &str = "metadata";

/// Contents of a `.metadata` sidecar file.
///
/// Absent fields are omitted rather than written as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceMetadata<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<&'a str>,
}

impl<'a> ResourceMetadata<'a> {
    /// Returns the sidecar for a resource, or `None` if it has nothing to record.
    pub fn for_resource(resource: &'a ResourceRecord) -> Option<Self> {
        let metadata = Self {
            title: resource.display_title(),
            filename: resource.filename(),
        };
        (metadata.title.is_some() || metadata.filename.is_some()).then_some(metadata)
    }
}

/// Files written for one resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterializedResource {
    pub path: PathBuf,
    pub metadata_path: Option<PathBuf>,
    pub bytes: u64,
}

/// Copies a resource payload into `assets_dir`, keeping its base name.
///
/// Writes `<dest>.metadata` when the resource has a title or original
/// filename. The assets directory must exist.
///
/// # Errors
///
/// Returns `ExportError::EmptyPath` if `source_path` is empty, and
/// `ExportError::Fs` if the copy or sidecar write fails.
pub fn materialize(
    resource: &ResourceRecord,
    source_path: &Path,
    assets_dir: &Path,
) -> Result<MaterializedResource, ExportError> {
    let dest = assets_dir.join(base_name(source_path)?);
    let bytes = copy_atomic(source_path, &dest)?;
    debug!(resource = %resource.id, path = %dest.display(), bytes, "copied resource");

    let metadata_path = match ResourceMetadata::for_resource(resource) {
        Some(metadata) => {
            let sidecar = sidecar_path(&dest);
            write_atomic(&sidecar, serde_json::to_string(&metadata)?.as_bytes())?;
            debug!(resource = %resource.id, path = %sidecar.display(), "wrote resource metadata");
            Some(sidecar)
        }
        None => None,
    };

    Ok(MaterializedResource {
        path: dest,
        metadata_path,
        bytes,
    })
}

fn sidecar_path(dest: &Path) -> PathBuf {
    let mut name = dest.as_os_str().to_owned();
    name.push(".");
    name.push(METADATA_EXTENSION);
    PathBuf::from(name)
}
