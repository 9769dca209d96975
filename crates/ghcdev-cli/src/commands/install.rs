//! Install command implementation.

use super::open_initialized;
use ghcdev_core::Result;
use ghcdev_toolchain::{InstallPipeline, InstallRequest};
use ghcdev_ui::Output;

/// Run the install pipeline for a reference.
pub async fn run(reference: &str, skip_checks: bool, output: &Output) -> Result<i32> {
    let context = open_initialized()?;

    output.status("Installing", reference);

    let pipeline = InstallPipeline::new(context.paths);
    let request = InstallRequest::new(reference).with_skip_checks(skip_checks);
    let outcome = pipeline.run(&request).await?;

    let label = match outcome.tag {
        Some(ref tag) => format!("{} (git tag: {})", outcome.id, tag),
        None => outcome.id.clone(),
    };

    if outcome.already_installed {
        output.status("Unchanged", &format!("{label} is already installed"));
    } else {
        output.status("Installed", &label);
        output.info(&format!("run `ghcdev select {}` to use it", outcome.id));
    }
    Ok(0)
}
