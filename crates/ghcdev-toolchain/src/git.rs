//! Git plumbing for the install pipeline and tag refresh.
//!
//! Every operation shells out to the system git; failures carry the stage
//! label and git's raw error output.

use ghcdev_core::{CommandOutput, CommandRunner, Result};
use std::path::Path;
use tracing::debug;

/// Clone the source repository into an isolated destination.
pub async fn clone_source(runner: &CommandRunner, url: &str, dest: &Path) -> Result<CommandOutput> {
    debug!("cloning {} into {}", url, dest.display());
    let dest = dest.display().to_string();
    runner
        .run_checked("fetch", "git", ["clone", url, dest.as_str()])
        .await
}

/// Metadata-only clone (no working tree) for tag refresh.
pub async fn clone_bare(runner: &CommandRunner, url: &str, dest: &Path) -> Result<CommandOutput> {
    debug!("bare-cloning {} into {}", url, dest.display());
    let dest = dest.display().to_string();
    runner
        .run_checked("fetch", "git", ["clone", "--bare", url, dest.as_str()])
        .await
}

/// Switch a working tree to the requested reference (detached).
pub async fn checkout(
    runner: &CommandRunner,
    worktree: &Path,
    reference: &str,
) -> Result<CommandOutput> {
    debug!("checking out {} in {}", reference, worktree.display());
    runner
        .clone()
        .with_working_dir(worktree)
        .run_checked("checkout", "git", ["checkout", "--detach", reference])
        .await
}

/// Canonicalize the checked-out reference to a commit hash.
pub async fn rev_parse_head(runner: &CommandRunner, worktree: &Path) -> Result<String> {
    let output = runner
        .clone()
        .with_working_dir(worktree)
        .run_checked("resolve-tag", "git", ["rev-parse", "HEAD"])
        .await?;
    Ok(output.stdout.trim().to_string())
}

/// Best-effort lookup of a tag pointing at a commit.
///
/// Absence (or any git failure) is not an error; it just means no tag
/// metadata will be recorded.
pub async fn tag_at(runner: &CommandRunner, repo: &Path, commit: &str) -> Option<String> {
    let output = runner
        .clone()
        .with_working_dir(repo)
        .run("git", ["tag", "--points-at", commit])
        .await
        .ok()?;

    if !output.success() {
        debug!("tag lookup for {} failed: {}", commit, output.stderr.trim());
        return None;
    }

    output
        .stdout
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(String::from)
}
