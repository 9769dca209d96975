//! Select, current, and path command implementations.

use super::open_initialized;
use ghcdev_core::Result;
use ghcdev_toolchain as toolchain;
use ghcdev_ui::Output;

/// Switch the active build.
pub fn run(reference: &str, output: &Output) -> Result<i32> {
    let context = open_initialized()?;

    toolchain::select(&context.paths, &context.registry, &context.store, reference)?;

    output.status("Selected", reference);
    Ok(0)
}

/// Print the currently selected build.
pub fn current(output: &Output) -> Result<i32> {
    let context = open_initialized()?;

    match toolchain::current(&context.store)? {
        Some(selection) => {
            match selection.tag {
                Some(tag) => println!("{} (git tag: {})", selection.id, tag),
                None => println!("{}", selection.id),
            }
            Ok(0)
        }
        None => {
            println!("no version selected");
            output.info("run `ghcdev select <ref>` to choose an installed build");
            Ok(0)
        }
    }
}

/// Print the path to an installed build's ghc, for scripting.
pub fn path(reference: &str) -> Result<i32> {
    let context = open_initialized()?;

    let marker = toolchain::resolve_marker_path(&context.registry, reference)?;
    println!("{}", marker.display());
    Ok(0)
}
