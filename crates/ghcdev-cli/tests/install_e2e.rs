//! End-to-end install pipeline tests.
//!
//! These drive the real pipeline against a local fixture git repository and
//! a stub build tool, so no network access and no actual GHC build is
//! needed. Skip-checks bypasses the host prerequisite probes.

#![cfg(unix)]
#![allow(deprecated)] // cargo_bin is deprecated but the replacement requires macros

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn ghcdev(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("ghcdev").unwrap();
    cmd.env("GHCDEV_HOME", home);
    cmd.env("NO_COLOR", "1");
    cmd
}

fn git(repo: &Path, args: &[&str]) -> String {
    let out = std::process::Command::new("git")
        .arg("-C")
        .arg(repo)
        .args([
            "-c",
            "user.email=test@example.com",
            "-c",
            "user.name=test",
        ])
        .args(args)
        .output()
        .expect("git runs");
    assert!(
        out.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&out.stderr)
    );
    String::from_utf8_lossy(&out.stdout).trim().to_string()
}

/// Create a fixture "GHC source" repository with one commit; returns its
/// path and the commit hash.
fn fixture_repo(parent: &Path) -> (PathBuf, String) {
    let repo = parent.join("ghc-src");
    fs::create_dir_all(&repo).unwrap();
    git(&repo, &["init", "-q"]);
    fs::write(
        repo.join("Makefile"),
        "all:\n\t@echo building\ninstall:\n\t@echo installing\n",
    )
    .unwrap();
    git(&repo, &["add", "."]);
    git(&repo, &["commit", "-q", "-m", "initial"]);
    let commit = git(&repo, &["rev-parse", "HEAD"]);
    (repo, commit)
}

/// Write a stub build tool that understands `install prefix=<dir>` and
/// drops an executable bin/ghc under the prefix.
fn stub_make(parent: &Path) -> PathBuf {
    let path = parent.join("fake-make");
    fs::write(
        &path,
        r#"#!/bin/sh
prefix=""
for arg in "$@"; do
  case "$arg" in
    prefix=*) prefix="${arg#prefix=}" ;;
  esac
done
if [ "$1" = "install" ]; then
  mkdir -p "$prefix/bin"
  printf '#!/bin/sh\necho "fake ghc 9.13"\n' > "$prefix/bin/ghc"
  chmod +x "$prefix/bin/ghc"
fi
exit 0
"#,
    )
    .unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// A stub build tool whose install step fails.
fn failing_stub_make(parent: &Path) -> PathBuf {
    let path = parent.join("broken-make");
    fs::write(
        &path,
        "#!/bin/sh\nif [ \"$1\" = \"install\" ]; then\n  echo \"install exploded\" >&2\n  exit 2\nfi\nexit 0\n",
    )
    .unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn setup(temp: &TempDir) -> (PathBuf, PathBuf, String) {
    let home = temp.path().join("reg");
    let (repo, commit) = fixture_repo(temp.path());
    let make = stub_make(temp.path());

    ghcdev(&home).arg("init").assert().success();
    ghcdev(&home)
        .args(["set-option", "repo-url"])
        .arg(&repo)
        .assert()
        .success();
    ghcdev(&home)
        .args(["set-option", "make-cmd"])
        .arg(&make)
        .assert()
        .success();

    (home, repo, commit)
}

#[test]
fn test_install_by_commit_then_select() {
    let temp = TempDir::new().unwrap();
    let (home, _repo, commit) = setup(&temp);

    ghcdev(&home)
        .args(["install", &commit, "--skip-checks"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Installed"));

    // the build is Present: directory + executable marker
    let marker = home.join("versions").join(&commit).join("bin/ghc");
    assert!(marker.is_file());

    ghcdev(&home)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains(&commit));

    ghcdev(&home).args(["select", &commit]).assert().success();
    ghcdev(&home)
        .arg("current")
        .assert()
        .success()
        .stdout(predicate::str::contains(&commit));

    // the launcher dispatches to the installed build
    let out = std::process::Command::new(home.join("bin/ghc"))
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&out.stdout).contains("fake ghc 9.13"));
}

#[test]
fn test_second_install_is_a_no_op() {
    let temp = TempDir::new().unwrap();
    let (home, repo, commit) = setup(&temp);

    ghcdev(&home)
        .args(["install", &commit, "--skip-checks"])
        .assert()
        .success();

    // make the source repository unreachable; a second install of the same
    // commit must short-circuit without fetching anything
    fs::rename(&repo, temp.path().join("ghc-src-moved")).unwrap();

    ghcdev(&home)
        .args(["install", &commit, "--skip-checks"])
        .assert()
        .success()
        .stderr(predicate::str::contains("already installed"));
}

#[test]
fn test_install_by_tag_records_label() {
    let temp = TempDir::new().unwrap();
    let (home, repo, commit) = setup(&temp);
    git(&repo, &["tag", "v1.0"]);

    ghcdev(&home)
        .args(["install", "v1.0", "--skip-checks"])
        .assert()
        .success()
        .stderr(predicate::str::contains(&commit));

    // installed under the canonical commit, annotated with the tag
    ghcdev(&home)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "{commit} (git tag: v1.0)"
        )));

    ghcdev(&home).args(["select", &commit]).assert().success();
    ghcdev(&home)
        .arg("current")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "{commit} (git tag: v1.0)"
        )));
}

#[test]
fn test_update_tags_discovers_new_tag() {
    let temp = TempDir::new().unwrap();
    let (home, repo, commit) = setup(&temp);

    // installed before the tag existed: no annotation
    ghcdev(&home)
        .args(["install", &commit, "--skip-checks"])
        .assert()
        .success();
    ghcdev(&home)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("git tag").not());

    git(&repo, &["tag", "v1.0"]);

    ghcdev(&home).arg("update-tags").assert().success();

    ghcdev(&home)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "{commit} (git tag: v1.0)"
        )));
}

#[test]
fn test_failed_install_rolls_back_version_directory() {
    let temp = TempDir::new().unwrap();
    let (home, _repo, commit) = setup(&temp);
    let broken = failing_stub_make(temp.path());

    ghcdev(&home)
        .args(["set-option", "make-cmd"])
        .arg(&broken)
        .assert()
        .success();

    ghcdev(&home)
        .args(["install", &commit, "--skip-checks"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("install"))
        .stderr(predicate::str::contains("install exploded"));

    // no partial directory remains for the failed install
    assert!(!home.join("versions").join(&commit).exists());
    ghcdev(&home)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("no versions installed yet"));
}

#[test]
fn test_failed_checkout_leaves_registry_untouched() {
    let temp = TempDir::new().unwrap();
    let (home, _repo, _commit) = setup(&temp);

    ghcdev(&home)
        .args(["install", "no-such-ref", "--skip-checks"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("checkout"));

    ghcdev(&home)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("no versions installed yet"));
}
