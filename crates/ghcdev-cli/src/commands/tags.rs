//! Update-tags command implementation.

use super::open_initialized;
use ghcdev_core::Result;
use ghcdev_toolchain::refresh_tags;
use ghcdev_ui::Output;

/// Refresh tag labels from the upstream repository.
pub async fn run(output: &Output) -> Result<i32> {
    let context = open_initialized()?;

    output.status("Refreshing", "tag metadata");
    let outcome = refresh_tags(&context.registry, &context.store).await?;

    output.status(
        "Done",
        &format!("{}/{} installed builds tagged", outcome.discovered, outcome.checked),
    );
    Ok(0)
}
