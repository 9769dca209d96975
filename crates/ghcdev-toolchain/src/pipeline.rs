//! The install pipeline.
//!
//! A linear stage machine per invocation: prerequisite check, fetch,
//! checkout, tag resolution, build, install into the registry, tag
//! registration. Nothing is written under the registry root before the
//! install stage, so only that stage needs rollback: a failed install
//! removes the target directory entirely, because a directory without its
//! marker would be neither Present nor obviously broken.

use crate::git;
use ghcdev_core::{CommandRunner, Error, Result};
use ghcdev_registry::{
    DEFAULT_MAKE_CMD, DEFAULT_REPO_URL, MetadataStore, RegistryMetadata, RegistryPaths,
    VersionRegistry,
};
use ghcdev_ui::Spinner;
use std::path::Path;
use tracing::{info, warn};

/// What to install and how.
#[derive(Debug, Clone)]
pub struct InstallRequest {
    /// User-supplied reference (commit hash or tag).
    pub reference: String,
    /// Bypass the prerequisite check stage.
    pub skip_checks: bool,
}

impl InstallRequest {
    /// Create a request for a reference.
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            skip_checks: false,
        }
    }

    /// Bypass the prerequisite check stage.
    pub fn with_skip_checks(mut self, skip_checks: bool) -> Self {
        self.skip_checks = skip_checks;
        self
    }
}

/// Result of a pipeline run.
#[derive(Debug, Clone)]
pub struct InstallOutcome {
    /// Canonical build identifier (commit hash when resolvable).
    pub id: String,
    /// Tag label, when the reference corresponds to one.
    pub tag: Option<String>,
    /// True when the pipeline short-circuited on an existing install.
    pub already_installed: bool,
}

/// Build options as consulted by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
struct BuildOptions {
    make_cmd: String,
    gmp_dir: Option<String>,
    repo_url: String,
}

impl BuildOptions {
    fn from_metadata(record: &RegistryMetadata) -> Self {
        Self {
            make_cmd: record
                .options
                .get("make-cmd")
                .cloned()
                .unwrap_or_else(|| DEFAULT_MAKE_CMD.to_string()),
            gmp_dir: record.options.get("gmp-dir").cloned(),
            repo_url: record
                .options
                .get("repo-url")
                .cloned()
                .unwrap_or_else(|| DEFAULT_REPO_URL.to_string()),
        }
    }
}

/// Arguments for the build invocation: variable assignments only.
fn build_args(options: &BuildOptions) -> Vec<String> {
    let mut args = Vec::new();
    if let Some(ref gmp) = options.gmp_dir {
        args.push(format!("GMP_DIR={gmp}"));
    }
    args
}

/// Arguments for the install invocation: the install target, the same
/// variables as the build, and the destination prefix.
fn install_args(options: &BuildOptions, dest: &Path) -> Vec<String> {
    let mut args = vec!["install".to_string()];
    args.extend(build_args(options));
    args.push(format!("prefix={}", dest.display()));
    args
}

/// Orchestrates one install run against a registry root.
#[derive(Debug)]
pub struct InstallPipeline {
    paths: RegistryPaths,
    registry: VersionRegistry,
    store: MetadataStore,
    runner: CommandRunner,
}

impl InstallPipeline {
    /// Create a pipeline over the given registry root.
    pub fn new(paths: RegistryPaths) -> Self {
        Self {
            registry: VersionRegistry::new(paths.clone()),
            store: MetadataStore::new(paths.clone()),
            runner: CommandRunner::new(),
            paths,
        }
    }

    /// Run the pipeline for one reference.
    pub async fn run(&self, request: &InstallRequest) -> Result<InstallOutcome> {
        let reference = request.reference.trim();

        // entry guard: installing an installed reference is a no-op
        if self.registry.is_present(reference) {
            info!("{} already installed, nothing to do", reference);
            let tag = self.store.read()?.tags.get(reference).cloned();
            return Ok(InstallOutcome {
                id: reference.to_string(),
                tag,
                already_installed: true,
            });
        }

        let options = BuildOptions::from_metadata(&self.store.read()?);

        if !request.skip_checks {
            let report = ghcdev_preflight::run_probes(&options.make_cmd).await;
            if report.has_failures() {
                return Err(Error::Prerequisites {
                    failures: report.failures(),
                });
            }
        }

        let spinner = Spinner::new(format!("Fetching GHC source for {reference}"));
        let result = self.run_stages(reference, &options, &spinner).await;
        spinner.finish_clear();
        result
    }

    async fn run_stages(
        &self,
        reference: &str,
        options: &BuildOptions,
        spinner: &Spinner,
    ) -> Result<InstallOutcome> {
        // fetch into an isolated temp location, never inside the registry
        let scratch = tempfile::Builder::new()
            .prefix("ghcdev-src-")
            .tempdir()
            .map_err(|e| Error::Io {
                message: "failed to create scratch directory".into(),
                path: None,
                source: e,
            })?;
        let worktree = scratch.path().join("ghc");

        git::clone_source(&self.runner, &options.repo_url, &worktree).await?;

        spinner.set_message(format!("Checking out {reference}"));
        git::checkout(&self.runner, &worktree, reference).await?;

        let id = git::rev_parse_head(&self.runner, &worktree).await?;
        let tag = git::tag_at(&self.runner, &worktree, "HEAD").await;
        info!(id = %id, tag = ?tag, "resolved {}", reference);

        // a tag spelled differently than its commit may already be installed
        if self.registry.is_present(&id) {
            if let Some(ref tag) = tag {
                self.store.register_tag(&id, tag)?;
            }
            return Ok(InstallOutcome {
                id,
                tag,
                already_installed: true,
            });
        }

        spinner.set_message(format!("Building GHC {id}"));
        let build_runner = self.runner.clone().with_working_dir(&worktree);
        build_runner
            .run_checked("build", &options.make_cmd, build_args(options))
            .await?;

        spinner.set_message(format!("Installing GHC {id}"));
        let dest = self.paths.version_dir(&id);
        std::fs::create_dir_all(&dest)
            .map_err(|e| Error::io("failed to create version directory", &dest, e))?;

        let install = build_runner
            .run_checked(
                "install",
                &options.make_cmd,
                install_args(options, &dest),
            )
            .await;

        if let Err(err) = install {
            // never leave a directory that failed installation behind
            if let Err(cleanup) = std::fs::remove_dir_all(&dest) {
                warn!(
                    "failed to remove partial install at {}: {}",
                    dest.display(),
                    cleanup
                );
            }
            return Err(err);
        }

        if let Some(ref tag) = tag {
            self.store.register_tag(&id, tag)?;
        }

        info!("installed {} at {}", id, dest.display());
        Ok(InstallOutcome {
            id,
            tag,
            already_installed: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    fn metadata_with(options: &[(&str, &str)]) -> RegistryMetadata {
        let mut record = RegistryMetadata::default();
        record.options = options
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<BTreeMap<_, _>>();
        record
    }

    #[test]
    fn test_options_defaults() {
        let options = BuildOptions::from_metadata(&RegistryMetadata::default());
        assert_eq!(options.make_cmd, "make");
        assert_eq!(options.repo_url, DEFAULT_REPO_URL);
        assert!(options.gmp_dir.is_none());
    }

    #[test]
    fn test_options_overrides() {
        let record = metadata_with(&[
            ("make-cmd", "gmake"),
            ("gmp-dir", "/opt/gmp"),
            ("repo-url", "file:///src/ghc"),
        ]);
        let options = BuildOptions::from_metadata(&record);
        assert_eq!(options.make_cmd, "gmake");
        assert_eq!(options.gmp_dir.as_deref(), Some("/opt/gmp"));
        assert_eq!(options.repo_url, "file:///src/ghc");
    }

    #[test]
    fn test_build_args_without_gmp() {
        let options = BuildOptions::from_metadata(&RegistryMetadata::default());
        assert!(build_args(&options).is_empty());
    }

    #[test]
    fn test_build_and_install_use_consistent_variables() {
        let record = metadata_with(&[("gmp-dir", "/opt/gmp")]);
        let options = BuildOptions::from_metadata(&record);

        assert_eq!(build_args(&options), vec!["GMP_DIR=/opt/gmp"]);

        let dest = PathBuf::from("/reg/versions/abc123");
        let install = install_args(&options, &dest);
        assert_eq!(install[0], "install");
        assert_eq!(install[1], "GMP_DIR=/opt/gmp");
        assert_eq!(install[2], "prefix=/reg/versions/abc123");
    }

    #[test]
    fn test_install_args_end_with_prefix() {
        let options = BuildOptions::from_metadata(&RegistryMetadata::default());
        let install = install_args(&options, &PathBuf::from("/dest"));
        assert_eq!(install, vec!["install", "prefix=/dest"]);
    }
}
