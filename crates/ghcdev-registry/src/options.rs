//! The option store.
//!
//! A fixed set of recognized keys, persisted in the metadata record and
//! consulted when constructing build commands.

use crate::store::MetadataStore;
use ghcdev_core::{Error, Fix, Result};

/// Default build tool when `make-cmd` is not set.
pub const DEFAULT_MAKE_CMD: &str = "make";

/// Default GHC source repository when `repo-url` is not set.
pub const DEFAULT_REPO_URL: &str = "https://gitlab.haskell.org/ghc/ghc.git";

/// Recognized option keys with their descriptions.
pub const OPTION_KEYS: &[(&str, &str)] = &[
    ("make-cmd", "build tool executable (default: make)"),
    ("gmp-dir", "GMP installation prefix, passed as GMP_DIR= to the build"),
    ("repo-url", "GHC source repository URL"),
];

/// Check whether a key is in the recognized set.
pub fn is_recognized(key: &str) -> bool {
    OPTION_KEYS.iter().any(|(k, _)| *k == key)
}

/// Set and list build options on top of the metadata store.
#[derive(Debug, Clone)]
pub struct OptionStore {
    store: MetadataStore,
}

impl OptionStore {
    /// Create an option store over the metadata store.
    pub fn new(store: MetadataStore) -> Self {
        Self { store }
    }

    /// Persist a key/value pair. Unrecognized keys are rejected and leave
    /// the store unchanged.
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        if !is_recognized(key) {
            let known = OPTION_KEYS
                .iter()
                .map(|(k, _)| *k)
                .collect::<Vec<_>>()
                .join(", ");
            return Err(Error::UnknownOptionKey {
                key: key.to_string(),
                fixes: vec![Fix::new(format!("Recognized keys: {known}"))],
            });
        }

        self.store.mutate(|m| {
            m.options.insert(key.to_string(), value.to_string());
        })?;
        Ok(())
    }

    /// Get one option value.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.store.read()?.options.get(key).cloned())
    }

    /// All persisted pairs, sorted by key for deterministic display.
    pub fn list(&self) -> Result<Vec<(String, String)>> {
        // BTreeMap iteration is already key-ordered
        Ok(self.store.read()?.options.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::RegistryPaths;
    use tempfile::tempdir;

    fn options(root: &std::path::Path) -> OptionStore {
        OptionStore::new(MetadataStore::new(RegistryPaths::new(root)))
    }

    #[test]
    fn test_recognized_keys() {
        assert!(is_recognized("make-cmd"));
        assert!(is_recognized("gmp-dir"));
        assert!(is_recognized("repo-url"));
        assert!(!is_recognized("make_cmd"));
        assert!(!is_recognized(""));
    }

    #[test]
    fn test_unknown_key_leaves_store_unchanged() {
        let temp = tempdir().unwrap();
        let options = options(temp.path());

        let err = options.set("frobnicate", "yes").unwrap_err();
        match err {
            Error::UnknownOptionKey { key, fixes } => {
                assert_eq!(key, "frobnicate");
                assert!(fixes[0].description.contains("make-cmd"));
            }
            other => panic!("expected UnknownOptionKey, got {other:?}"),
        }
        assert!(options.list().unwrap().is_empty());
    }

    #[test]
    fn test_set_then_list_sorted() {
        let temp = tempdir().unwrap();
        let options = options(temp.path());

        options.set("repo-url", "file:///src/ghc").unwrap();
        options.set("make-cmd", "gmake").unwrap();

        let listed = options.list().unwrap();
        assert_eq!(
            listed,
            vec![
                ("make-cmd".to_string(), "gmake".to_string()),
                ("repo-url".to_string(), "file:///src/ghc".to_string()),
            ]
        );
    }

    #[test]
    fn test_set_overwrites_without_touching_others() {
        let temp = tempdir().unwrap();
        let options = options(temp.path());

        options.set("make-cmd", "gmake").unwrap();
        options.set("gmp-dir", "/opt/gmp").unwrap();
        options.set("make-cmd", "remake").unwrap();

        assert_eq!(options.get("make-cmd").unwrap().as_deref(), Some("remake"));
        assert_eq!(options.get("gmp-dir").unwrap().as_deref(), Some("/opt/gmp"));
    }
}
