//! Doctor command implementation.

use ghcdev_core::Result;
use ghcdev_preflight::{ProbeStatus, run_probes};
use ghcdev_registry::{DEFAULT_MAKE_CMD, MetadataStore, RegistryPaths};
use ghcdev_ui::{Output, Style};

/// Run the prerequisite probes standalone and print the report.
///
/// Works before `ghcdev init`: with no initialized registry the default
/// build tool is probed.
pub async fn run(output: &Output) -> Result<i32> {
    let make_cmd = configured_make_cmd()?;
    let report = run_probes(&make_cmd).await;

    output.header("Doctor Report");

    for outcome in &report.outcomes {
        match &outcome.status {
            ProbeStatus::Passed { detail } => {
                eprintln!("  {} {}: {}", Style::success("✓"), outcome.name, detail);
            }
            ProbeStatus::Failed(failure) => {
                eprintln!("  {} {}: {}", Style::error("✗"), outcome.name, failure.detail);
                for fix in &failure.fixes {
                    match &fix.command {
                        Some(cmd) => {
                            eprintln!("    {} {}", Style::dim("fix:"), Style::command(cmd))
                        }
                        None => eprintln!("    {} {}", Style::dim("fix:"), fix.description),
                    }
                }
            }
        }
    }

    eprintln!();
    let failures = report.failures();
    if failures.is_empty() {
        eprintln!("{} ready to build GHC", Style::success("✓"));
        Ok(0)
    } else {
        eprintln!(
            "{} {} prerequisite(s) missing",
            Style::error("✗"),
            failures.len()
        );
        Ok(1)
    }
}

/// The make-cmd option when the registry exists, the default otherwise.
fn configured_make_cmd() -> Result<String> {
    let paths = RegistryPaths::resolve_default()?;
    if paths.is_initialized() {
        let record = MetadataStore::new(paths).read()?;
        if let Some(make_cmd) = record.options.get("make-cmd") {
            return Ok(make_cmd.clone());
        }
    }
    Ok(DEFAULT_MAKE_CMD.to_string())
}
