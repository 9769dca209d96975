//! The directory-per-build version store.
//!
//! A build is Present iff its marker executable (`bin/ghc` inside the build
//! directory) exists and is executable. The directory tree is authoritative:
//! nothing is cached, every query re-reads the filesystem, and deleting a
//! build directory out-of-band is always safe.

use crate::paths::RegistryPaths;
use ghcdev_core::{Error, Result};
use std::path::PathBuf;
use tracing::debug;

/// Queries over the installed builds under a registry root.
#[derive(Debug, Clone)]
pub struct VersionRegistry {
    paths: RegistryPaths,
}

impl VersionRegistry {
    /// Create a registry view over the given root.
    pub fn new(paths: RegistryPaths) -> Self {
        Self { paths }
    }

    /// True iff the build's marker executable exists and is executable.
    pub fn is_present(&self, id: &str) -> bool {
        is_executable(&self.paths.marker_path(id))
    }

    /// Enumerate installed build identifiers.
    ///
    /// Order is the underlying directory-listing order; callers needing
    /// determinism must sort.
    pub fn list(&self) -> Result<Vec<String>> {
        let dir = self.paths.versions_dir();
        let entries = std::fs::read_dir(&dir)
            .map_err(|e| Error::io("failed to list versions directory", &dir, e))?;

        let mut ids = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| Error::io("failed to read directory entry", &dir, e))?;
            if entry.path().is_dir() {
                ids.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        debug!("{} installed build(s) under {}", ids.len(), dir.display());
        Ok(ids)
    }

    /// The directory for one installed build.
    pub fn version_dir(&self, id: &str) -> PathBuf {
        self.paths.version_dir(id)
    }

    /// The marker executable for one installed build.
    pub fn marker_path(&self, id: &str) -> PathBuf {
        self.paths.marker_path(id)
    }
}

#[cfg(unix)]
fn is_executable(path: &std::path::Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &std::path::Path) -> bool {
    path.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn registry(root: &std::path::Path) -> VersionRegistry {
        let paths = RegistryPaths::new(root);
        paths.ensure_layout().unwrap();
        VersionRegistry::new(paths)
    }

    fn fake_install(root: &std::path::Path, id: &str) {
        let bin = root.join("versions").join(id).join("bin");
        std::fs::create_dir_all(&bin).unwrap();
        let marker = bin.join(crate::paths::ghc_binary_name());
        std::fs::write(&marker, "#!/bin/sh\nexit 0\n").unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&marker, std::fs::Permissions::from_mode(0o755)).unwrap();
        }
    }

    #[test]
    fn test_is_present_requires_marker() {
        let temp = tempdir().unwrap();
        let registry = registry(temp.path());

        assert!(!registry.is_present("abc123"));

        // a bare directory without the marker is not Present
        std::fs::create_dir_all(temp.path().join("versions/abc123")).unwrap();
        assert!(!registry.is_present("abc123"));

        fake_install(temp.path(), "abc123");
        assert!(registry.is_present("abc123"));
    }

    #[cfg(unix)]
    #[test]
    fn test_is_present_requires_executable_bit() {
        use std::os::unix::fs::PermissionsExt;

        let temp = tempdir().unwrap();
        let registry = registry(temp.path());
        fake_install(temp.path(), "abc123");

        let marker = registry.marker_path("abc123");
        std::fs::set_permissions(&marker, std::fs::Permissions::from_mode(0o644)).unwrap();
        assert!(!registry.is_present("abc123"));
    }

    #[test]
    fn test_list_enumerates_directories() {
        let temp = tempdir().unwrap();
        let registry = registry(temp.path());

        assert!(registry.list().unwrap().is_empty());

        fake_install(temp.path(), "abc123");
        fake_install(temp.path(), "def456");
        // stray files in versions/ are not builds
        std::fs::write(temp.path().join("versions/README"), "x").unwrap();

        let mut ids = registry.list().unwrap();
        ids.sort();
        assert_eq!(ids, vec!["abc123", "def456"]);
    }

    #[test]
    fn test_corruption_of_one_build_does_not_affect_others() {
        let temp = tempdir().unwrap();
        let registry = registry(temp.path());

        fake_install(temp.path(), "abc123");
        fake_install(temp.path(), "def456");
        std::fs::remove_file(registry.marker_path("abc123")).unwrap();

        assert!(!registry.is_present("abc123"));
        assert!(registry.is_present("def456"));
    }
}
