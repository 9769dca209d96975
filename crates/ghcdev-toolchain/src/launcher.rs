//! Launcher indirection generation.
//!
//! The launcher is the one fixed-path executable external invocations go
//! through. It is regenerated whole on every selection change and on init,
//! never patched: either a trampoline that execs the selected build's marker
//! executable (arguments and exit code pass through unchanged), or a stub
//! that fails with guidance when nothing is selected.

use ghcdev_core::{Error, Result};
use ghcdev_registry::RegistryPaths;
use std::path::Path;
use tracing::debug;

/// Regenerate the launcher for the given selection (or lack of one).
///
/// The script is written to a temporary file, marked executable, then
/// renamed over the old launcher so a crash mid-write never leaves a
/// half-written script on PATH.
pub fn write_launcher(paths: &RegistryPaths, current: Option<&str>) -> Result<()> {
    let bin_dir = paths.bin_dir();
    std::fs::create_dir_all(&bin_dir)
        .map_err(|e| Error::io("failed to create bin directory", &bin_dir, e))?;

    let content = match current {
        Some(id) => trampoline_script(&paths.marker_path(id)),
        None => stub_script(),
    };

    let target = paths.launcher_path();
    let tmp = bin_dir.join(".ghc.tmp");

    std::fs::write(&tmp, content).map_err(|e| Error::io("failed to write launcher", &tmp, e))?;
    set_executable(&tmp)?;
    std::fs::rename(&tmp, &target)
        .map_err(|e| Error::io("failed to install launcher", &target, e))?;

    debug!(
        "launcher at {} now dispatches to {:?}",
        target.display(),
        current
    );
    Ok(())
}

#[cfg(unix)]
fn set_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
        .map_err(|e| Error::io("failed to mark launcher executable", path, e))
}

#[cfg(not(unix))]
fn set_executable(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(unix)]
fn trampoline_script(marker: &Path) -> String {
    format!(
        "#!/bin/sh\n# generated by ghcdev; do not edit\nexec \"{}\" \"$@\"\n",
        marker.display()
    )
}

#[cfg(unix)]
fn stub_script() -> String {
    "#!/bin/sh\n\
     echo \"ghcdev: no version selected\" >&2\n\
     echo \"run \\`ghcdev select <ref>\\` to choose an installed build\" >&2\n\
     exit 1\n"
        .to_string()
}

#[cfg(not(unix))]
fn trampoline_script(marker: &Path) -> String {
    format!("@echo off\r\n\"{}\" %*\r\n", marker.display())
}

#[cfg(not(unix))]
fn stub_script() -> String {
    "@echo off\r\n\
     echo ghcdev: no version selected 1>&2\r\n\
     echo run `ghcdev select ^<ref^>` to choose an installed build 1>&2\r\n\
     exit /b 1\r\n"
        .to_string()
}
