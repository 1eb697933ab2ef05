//! Stub svn client for integration tests
//!
//! Writes a small shell script that stands in for the real `svn` binary.
//! The stub logs every invocation, serves a canned status listing, can be
//! told to fail with scripted stderr or to sleep, and records whenever two
//! instances run at the same time, which is how the mutual-exclusion
//! tests observe the operation lock.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

/// Control files the stub reads, all living in its own directory:
/// - `status_output.txt`: stdout served for `status` invocations
/// - `fail_stderr.txt`: when present, printed to stderr with exit code 1
/// - `sleep_seconds`: when present, the stub sleeps this long first
///
/// Artifacts the stub writes:
/// - `invocations.log`: one line of arguments per run
/// - `overlap.log`: one line per run that found another run in progress
pub fn write_stub_svn(stub_dir: &Path) -> PathBuf {
    let program = stub_dir.join("svn");
    let script = format!(
        r#"#!/bin/sh
STUB_DIR="{stub_dir}"
echo "$@" >> "$STUB_DIR/invocations.log"
if mkdir "$STUB_DIR/running.lock" 2>/dev/null; then
    trap 'rmdir "$STUB_DIR/running.lock"' EXIT
else
    echo overlap >> "$STUB_DIR/overlap.log"
fi
if [ -f "$STUB_DIR/sleep_seconds" ]; then
    sleep "$(cat "$STUB_DIR/sleep_seconds")"
fi
if [ -f "$STUB_DIR/fail_stderr.txt" ]; then
    cat "$STUB_DIR/fail_stderr.txt" >&2
    exit 1
fi
case "$1" in
    status)
        if [ -f "$STUB_DIR/status_output.txt" ]; then
            cat "$STUB_DIR/status_output.txt"
        fi
        ;;
esac
exit 0
"#,
        stub_dir = stub_dir.display()
    );
    fs::write(&program, script).expect("write stub svn script");

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(&program).expect("stat stub").permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&program, perms).expect("chmod stub");
    }

    program
}

/// Set the listing the stub serves for `status` invocations.
pub fn set_status_output(stub_dir: &Path, listing: &str) {
    fs::write(stub_dir.join("status_output.txt"), listing).expect("write status output");
}

/// Make every stub run fail with the given stderr text.
pub fn set_failure(stub_dir: &Path, stderr: &str) {
    fs::write(stub_dir.join("fail_stderr.txt"), stderr).expect("write failure stderr");
}

/// Stop failing; subsequent runs succeed again.
pub fn clear_failure(stub_dir: &Path) {
    let _ = fs::remove_file(stub_dir.join("fail_stderr.txt"));
}

/// Make every stub run sleep before answering.
pub fn set_sleep(stub_dir: &Path, seconds: f64) {
    fs::write(stub_dir.join("sleep_seconds"), format!("{seconds}")).expect("write sleep");
}

/// Every invocation the stub has served, one argument line per run.
pub fn invocations(stub_dir: &Path) -> Vec<String> {
    fs::read_to_string(stub_dir.join("invocations.log"))
        .map(|content| content.lines().map(|l| l.to_string()).collect())
        .unwrap_or_default()
}

/// How many runs found another run already in progress.
pub fn overlap_count(stub_dir: &Path) -> usize {
    fs::read_to_string(stub_dir.join("overlap.log"))
        .map(|content| content.lines().count())
        .unwrap_or(0)
}
