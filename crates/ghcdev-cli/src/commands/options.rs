//! Set-option and show-options command implementations.

use super::open_initialized;
use ghcdev_core::Result;
use ghcdev_registry::OptionStore;
use ghcdev_ui::Output;

/// Set a build option.
pub fn set(key: &str, value: &str, output: &Output) -> Result<i32> {
    let context = open_initialized()?;

    OptionStore::new(context.store).set(key, value)?;

    output.status("Set", &format!("{key} = {value}"));
    Ok(0)
}

/// Show all build options, column-aligned.
pub fn show(output: &Output) -> Result<i32> {
    let context = open_initialized()?;

    let pairs = OptionStore::new(context.store).list()?;
    if pairs.is_empty() {
        println!("no options set");
        output.info("run `ghcdev set-option <key> <value>` to set one");
        return Ok(0);
    }

    let width = pairs.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    for (key, value) in &pairs {
        println!("{key:<width$}  {value}");
    }
    Ok(0)
}
