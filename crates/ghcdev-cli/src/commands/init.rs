//! Init command implementation.

use ghcdev_core::Result;
use ghcdev_registry::{MetadataStore, RegistryPaths};
use ghcdev_toolchain::write_launcher;
use ghcdev_ui::Output;

/// Initialize the registry root. Idempotent: re-running repairs a missing
/// metadata file and regenerates the launcher from the current selection.
pub fn run(output: &Output) -> Result<i32> {
    let paths = RegistryPaths::resolve_default()?;
    paths.ensure_layout()?;

    // read() recovers a missing or unreadable metadata file
    let store = MetadataStore::new(paths.clone());
    let record = store.read()?;

    write_launcher(&paths, record.current.as_deref())?;

    output.status("Initialized", &paths.root().display().to_string());
    output.info(&format!(
        "add {} to your PATH to use the selected ghc",
        paths.bin_dir().display()
    ));
    Ok(0)
}
