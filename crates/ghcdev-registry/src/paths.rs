//! Registry root layout.
//!
//! The registry root holds three things: `bin/` with the launcher script,
//! `versions/` with one directory per installed build, and `registry.json`.
//! The root is threaded explicitly into every component so tests can inject
//! temporary roots.

use ghcdev_core::{EnvVars, Error, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Name of the marker executable inside a build's `bin/`.
pub(crate) fn ghc_binary_name() -> &'static str {
    if cfg!(windows) { "ghc.exe" } else { "ghc" }
}

/// Name of the launcher script (a `.cmd` wrapper on Windows).
fn launcher_file_name() -> &'static str {
    if cfg!(windows) { "ghc.cmd" } else { "ghc" }
}

/// Filesystem layout of a registry root.
#[derive(Debug, Clone)]
pub struct RegistryPaths {
    root: PathBuf,
}

impl RegistryPaths {
    /// Create paths for an explicit root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve the default root: `$GHCDEV_HOME`, or `~/.ghcdev`.
    ///
    /// The `bin/` directory under this root is what users put on PATH, so
    /// the default is a dotted home directory rather than an XDG cache path.
    pub fn resolve_default() -> Result<Self> {
        if let Ok(home) = std::env::var(EnvVars::GHCDEV_HOME) {
            return Ok(Self::new(home));
        }
        let base = directories::BaseDirs::new()
            .ok_or_else(|| Error::config("could not determine home directory"))?;
        Ok(Self::new(base.home_dir().join(".ghcdev")))
    }

    /// The registry root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding the launcher script.
    pub fn bin_dir(&self) -> PathBuf {
        self.root.join("bin")
    }

    /// Directory holding one subdirectory per installed build.
    pub fn versions_dir(&self) -> PathBuf {
        self.root.join("versions")
    }

    /// The persisted metadata record.
    pub fn metadata_file(&self) -> PathBuf {
        self.root.join("registry.json")
    }

    /// The launcher indirection script.
    pub fn launcher_path(&self) -> PathBuf {
        self.bin_dir().join(launcher_file_name())
    }

    /// The directory for one installed build.
    pub fn version_dir(&self, id: &str) -> PathBuf {
        self.versions_dir().join(id)
    }

    /// The marker executable inside one installed build.
    pub fn marker_path(&self, id: &str) -> PathBuf {
        self.version_dir(id).join("bin").join(ghc_binary_name())
    }

    /// Whether the root has been initialized (`ghcdev init`).
    pub fn is_initialized(&self) -> bool {
        self.bin_dir().is_dir() && self.versions_dir().is_dir()
    }

    /// Create the root, bin, and versions directories.
    pub fn ensure_layout(&self) -> Result<()> {
        for dir in [self.root.clone(), self.bin_dir(), self.versions_dir()] {
            if !dir.exists() {
                debug!("creating {}", dir.display());
                std::fs::create_dir_all(&dir)
                    .map_err(|e| Error::io("failed to create directory", &dir, e))?;
            }
        }
        Ok(())
    }
}
