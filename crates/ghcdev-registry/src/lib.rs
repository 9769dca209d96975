//! The ghcdev version registry.
//!
//! This crate owns everything under the registry root: the directory-per-build
//! version store, the persisted metadata record (current selection, resolved
//! tags, build options), and the fixed option key set. The directory tree is
//! the single source of truth for what is installed; the metadata record is
//! always re-derivable by re-scanning it.

pub mod options;
pub mod paths;
pub mod registry;
pub mod store;

pub use options::{DEFAULT_MAKE_CMD, DEFAULT_REPO_URL, OPTION_KEYS, OptionStore};
pub use paths::RegistryPaths;
pub use registry::VersionRegistry;
pub use store::{MetadataStore, RegistryMetadata};
