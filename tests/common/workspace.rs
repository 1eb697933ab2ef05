//! Test workspace setup
//!
//! Builds a temporary directory holding a fake working copy plus the stub
//! svn binary, and constructs engine clients wired to both. The TempDir
//! must be kept alive for the duration of the test to prevent cleanup.

#![allow(dead_code)]

use super::fixtures::write_stub_svn;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use svn_bridge::core::{BridgeConfig, SvnClient};
use tempfile::TempDir;

pub struct TestHarness {
    pub temp_dir: TempDir,
    pub stub_dir: PathBuf,
    pub program: PathBuf,
    pub working_copy: PathBuf,
}

/// Create a stub svn and an empty working copy under one temp directory.
pub fn setup_harness() -> TestHarness {
    let temp_dir = TempDir::new().expect("create temp dir");
    let stub_dir = temp_dir.path().join("stub");
    let working_copy = temp_dir.path().join("wc");
    fs::create_dir_all(&stub_dir).expect("create stub dir");
    fs::create_dir_all(&working_copy).expect("create working copy dir");
    let program = write_stub_svn(&stub_dir);

    TestHarness {
        temp_dir,
        stub_dir,
        program,
        working_copy,
    }
}

impl TestHarness {
    /// An engine client whose refresh loop effectively never ticks, so
    /// tests drive cycles deterministically with `refresh_once`.
    pub fn client(&self) -> SvnClient {
        self.client_with_interval(Duration::from_secs(3600))
    }

    /// An engine client with a fast loop for end-to-end cadence tests.
    pub fn client_with_interval(&self, interval: Duration) -> SvnClient {
        SvnClient::new(BridgeConfig {
            svn_program: self.program.to_string_lossy().into_owned(),
            working_copy: self.working_copy.clone(),
            refresh_interval: interval,
        })
    }
}
