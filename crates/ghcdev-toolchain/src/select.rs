//! Selection switch and queries.
//!
//! `select` regenerates the launcher before committing the metadata change:
//! a crash between the two steps leaves the launcher pointing at a valid
//! build while `current` still reports the previous value, which the next
//! successful select corrects.

use crate::launcher;
use ghcdev_core::{Error, Result};
use ghcdev_registry::{MetadataStore, RegistryPaths, VersionRegistry};
use std::path::PathBuf;
use tracing::info;

/// The current selection with its optional tag label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentSelection {
    /// Selected build identifier.
    pub id: String,
    /// Tag label, if one was ever resolved for this identifier.
    pub tag: Option<String>,
}

/// Switch the launcher and the `current` pointer to an installed build.
///
/// Fails with NotInstalled (naming the install command) when the build is
/// not Present; the metadata is left untouched in that case.
pub fn select(
    paths: &RegistryPaths,
    registry: &VersionRegistry,
    store: &MetadataStore,
    id: &str,
) -> Result<()> {
    if !registry.is_present(id) {
        return Err(Error::not_installed(id));
    }

    // launcher first, metadata second (see module docs)
    launcher::write_launcher(paths, Some(id))?;
    store.set_current(id)?;

    info!("selected {}", id);
    Ok(())
}

/// Read the current selection, with its tag label if known.
pub fn current(store: &MetadataStore) -> Result<Option<CurrentSelection>> {
    let record = store.read()?;
    Ok(record.current.map(|id| {
        let tag = record.tags.get(&id).cloned();
        CurrentSelection { id, tag }
    }))
}

/// Absolute path to an installed build's marker executable.
///
/// Fails with NotInstalled under the same condition as [`select`]; mutates
/// nothing.
pub fn resolve_marker_path(registry: &VersionRegistry, id: &str) -> Result<PathBuf> {
    if !registry.is_present(id) {
        return Err(Error::not_installed(id));
    }

    let marker = registry.marker_path(id);
    std::path::absolute(&marker).map_err(|e| Error::io("failed to resolve path", &marker, e))
}
