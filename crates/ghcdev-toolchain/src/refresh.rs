//! Tag metadata refresh.
//!
//! A metadata-only clone of the upstream repository, then one tag lookup
//! per registered build. Discoveries merge additively into the tags map;
//! previously known tags are never removed, even when a lookup fails to
//! reconfirm them.

use crate::git;
use ghcdev_core::{CommandRunner, Error, Result};
use ghcdev_registry::{DEFAULT_REPO_URL, MetadataStore, VersionRegistry};
use tracing::{debug, info};

/// Result of a tag refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshOutcome {
    /// Number of registered builds checked.
    pub checked: usize,
    /// Number of tag labels discovered (including reconfirmations).
    pub discovered: usize,
}

/// Refresh tag labels for every registered build.
pub async fn refresh_tags(
    registry: &VersionRegistry,
    store: &MetadataStore,
) -> Result<RefreshOutcome> {
    let runner = CommandRunner::new();
    let repo_url = store
        .read()?
        .options
        .get("repo-url")
        .cloned()
        .unwrap_or_else(|| DEFAULT_REPO_URL.to_string());

    let scratch = tempfile::Builder::new()
        .prefix("ghcdev-tags-")
        .tempdir()
        .map_err(|e| Error::Io {
            message: "failed to create scratch directory".into(),
            path: None,
            source: e,
        })?;
    let mirror = scratch.path().join("ghc.git");

    git::clone_bare(&runner, &repo_url, &mirror).await?;

    let ids = registry.list()?;
    let mut discovered = 0;
    for id in &ids {
        match git::tag_at(&runner, &mirror, id).await {
            Some(tag) => {
                debug!("{} is tagged {}", id, tag);
                store.register_tag(id, &tag)?;
                discovered += 1;
            }
            // locally built commits may be unknown upstream; keep whatever
            // tag metadata we already have
            None => debug!("no tag found for {}", id),
        }
    }

    info!("refreshed tags: {}/{} builds tagged", discovered, ids.len());
    Ok(RefreshOutcome {
        checked: ids.len(),
        discovered,
    })
}
