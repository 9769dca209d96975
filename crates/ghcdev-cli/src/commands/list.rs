//! List command implementation.

use super::open_initialized;
use ghcdev_core::Result;
use ghcdev_ui::Output;

/// List installed builds with the current selection marked and tag labels
/// where known.
pub fn run(output: &Output) -> Result<i32> {
    let context = open_initialized()?;

    let mut ids = context.registry.list()?;
    if ids.is_empty() {
        println!("no versions installed yet");
        output.info("run `ghcdev install <ref>` to build one");
        return Ok(0);
    }

    // directory order is arbitrary; sort for stable display
    ids.sort();

    let record = context.store.read()?;
    for id in &ids {
        let marker = if record.current.as_deref() == Some(id.as_str()) {
            "*"
        } else {
            " "
        };
        match record.tags.get(id) {
            Some(tag) => println!("{marker} {id} (git tag: {tag})"),
            None => println!("{marker} {id}"),
        }
    }
    Ok(0)
}
