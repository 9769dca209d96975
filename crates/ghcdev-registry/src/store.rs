//! Persisted registry metadata.
//!
//! A single JSON record holds the current selection, resolved tag labels,
//! and build options. Every single-field mutation goes through
//! [`MetadataStore::mutate`]: read the full record, apply one change, replace
//! the file. The replace itself is write-temp-then-rename so a crashed write
//! never leaves a truncated record, but there is no cross-process locking;
//! two concurrent invocations can still interleave read-modify-write cycles.

use crate::paths::RegistryPaths;
use ghcdev_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// The persisted metadata record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryMetadata {
    /// Currently selected build identifier, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<String>,
    /// Resolved tag labels, keyed by build identifier. Additive only;
    /// absence means "no known tag", not "definitely untagged".
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
    /// Build options (see [`crate::options`] for the recognized keys).
    #[serde(default)]
    pub options: BTreeMap<String, String>,
}

/// Reads and writes the metadata record under a registry root.
#[derive(Debug, Clone)]
pub struct MetadataStore {
    paths: RegistryPaths,
}

impl MetadataStore {
    /// Create a store for the given registry root.
    pub fn new(paths: RegistryPaths) -> Self {
        Self { paths }
    }

    /// Load the metadata record.
    ///
    /// A missing or unreadable file yields the empty record and the file is
    /// (re)initialized to it. This is the only place implicit recovery from
    /// a bad metadata file happens; everywhere else a failed read is an error.
    pub fn read(&self) -> Result<RegistryMetadata> {
        let path = self.paths.metadata_file();

        let record = match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<RegistryMetadata>(&content) {
                Ok(record) => return Ok(record),
                Err(e) => {
                    warn!("unreadable metadata at {}: {}", path.display(), e);
                    RegistryMetadata::default()
                }
            },
            Err(_) => {
                debug!("no metadata at {}, starting empty", path.display());
                RegistryMetadata::default()
            }
        };

        self.write(&record)?;
        Ok(record)
    }

    /// Replace the metadata record on disk.
    ///
    /// Written to a temporary file in the same directory, then renamed over
    /// the old record.
    pub fn write(&self, record: &RegistryMetadata) -> Result<()> {
        let path = self.paths.metadata_file();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::io("failed to create registry root", parent, e))?;
        }

        let content = serde_json::to_string_pretty(record)
            .map_err(|e| Error::config(format!("failed to serialize metadata: {e}")))?;

        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, content)
            .map_err(|e| Error::io("failed to write metadata", &tmp, e))?;
        std::fs::rename(&tmp, &path)
            .map_err(|e| Error::io("failed to replace metadata", &path, e))?;

        Ok(())
    }

    /// Read, apply one transformation, write-replace.
    ///
    /// The seam for every targeted mutation; swapping in a locking or
    /// transactional store only has to touch this method.
    pub fn mutate<F>(&self, f: F) -> Result<RegistryMetadata>
    where
        F: FnOnce(&mut RegistryMetadata),
    {
        let mut record = self.read()?;
        f(&mut record);
        self.write(&record)?;
        Ok(record)
    }

    /// Record a resolved tag label for a build identifier.
    pub fn register_tag(&self, id: &str, tag: &str) -> Result<()> {
        debug!("registering tag {} for {}", tag, id);
        self.mutate(|m| {
            m.tags.insert(id.to_string(), tag.to_string());
        })?;
        Ok(())
    }

    /// Set the current selection.
    ///
    /// Presence validation is the caller's responsibility (the selection
    /// switch checks before calling).
    pub fn set_current(&self, id: &str) -> Result<()> {
        debug!("setting current to {}", id);
        self.mutate(|m| {
            m.current = Some(id.to_string());
        })?;
        Ok(())
    }
}
