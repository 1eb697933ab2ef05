mod common;

use assert_cmd::prelude::*;
use common::fixtures::{set_failure, set_status_output};
use common::workspace::setup_harness;
use predicates::prelude::*;
use std::process::Command;

/// The binary resolves "svn" through PATH; point PATH at the stub first
/// and keep config/cache writes inside the temp directory.
fn bridge_cmd(harness: &common::workspace::TestHarness) -> Command {
    let mut cmd = Command::cargo_bin("svn-bridge").expect("binary built");
    let path = format!(
        "{}:{}",
        harness.stub_dir.display(),
        std::env::var("PATH").unwrap_or_default()
    );
    cmd.env("PATH", path)
        .env("XDG_CONFIG_HOME", harness.temp_dir.path().join("config"))
        .env("XDG_CACHE_HOME", harness.temp_dir.path().join("cache"))
        .arg("--path")
        .arg(&harness.working_copy);
    cmd
}

#[test]
fn test_status_command_lists_modified_files() {
    let harness = setup_harness();
    set_status_output(&harness.stub_dir, "M       src/engine.rs\n?       notes.txt\n");

    bridge_cmd(&harness)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("modified"))
        .stdout(predicate::str::contains("src/engine.rs"))
        .stdout(predicate::str::contains("unversioned"));
}

#[test]
fn test_status_command_clean_working_copy() {
    let harness = setup_harness();

    bridge_cmd(&harness)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("clean"));
}

#[test]
fn test_delete_without_paths_is_noop_success() {
    let harness = setup_harness();

    bridge_cmd(&harness)
        .args(["delete", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing to delete"));
}

#[test]
fn test_move_command_reports_success() {
    let harness = setup_harness();

    bridge_cmd(&harness)
        .args(["move", "a.txt", "b.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Moved 'a.txt' to 'b.txt'"));
}

#[test]
fn test_commit_failure_surfaces_classified_hint() {
    let harness = setup_harness();
    set_failure(
        &harness.stub_dir,
        "svn: E160028: File '/trunk/a.txt' is out of date",
    );

    bridge_cmd(&harness)
        .args(["commit", "-m", "msg", "a.txt"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("out of date"))
        .stdout(predicate::str::contains("svn-bridge update"));
}

#[test]
fn test_not_a_working_copy_fails_without_snapshot() {
    let harness = setup_harness();
    set_failure(
        &harness.stub_dir,
        "svn: E155007: '/tmp/x' is not a working copy",
    );

    bridge_cmd(&harness)
        .arg("status")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Error"));
}

#[test]
fn test_cleanup_command() {
    let harness = setup_harness();

    bridge_cmd(&harness)
        .arg("cleanup")
        .assert()
        .success()
        .stdout(predicate::str::contains("cleaned up"));
}
