//! Domain-specific error types and error handling utilities.
//!
//! This module defines [`SvnBridgeError`] which provides comprehensive error
//! handling for all svn-bridge operations. It uses `thiserror` for ergonomic
//! error definitions and includes specialized constructors for common failure
//! scenarios.
//!
//! # Public API
//! - [`SvnBridgeError`]: Main error enum covering all failure modes
//! - [`Result<T>`]: Type alias for `std::result::Result<T, SvnBridgeError>`
//!
//! # Error Categories
//! - **Classified command failures**: stderr mapped through the
//!   [`classify`](crate::core::classify) table into an [`ErrorKind`]
//! - **Launch failures**: the `svn` binary is missing or misconfigured.
//!   Fatal and distinct, since no process even ran
//! - **Parse failures**: malformed status listings; the cache is left
//!   untouched
//! - **Ambient**: I/O, JSON, configuration directory errors

use crate::core::classify::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

/// Domain-specific error types for svn-bridge
#[derive(Error, Debug)]
pub enum SvnBridgeError {
    // Classified command failures
    #[error("{kind}: {stderr}")]
    CommandFailed { kind: ErrorKind, stderr: String },

    // Environment failures: the process could not even be started
    #[error("Failed to launch '{program}': {source}. Is the svn client installed?")]
    LaunchFailed {
        program: String,
        source: std::io::Error,
    },

    // Status listing parse failures
    #[error("Failed to parse status listing ({reason}): {line:?}")]
    ParseFailed { reason: String, line: String },

    // Working copy errors
    #[error("'{path}' is not inside a working copy")]
    NotInWorkingCopy { path: PathBuf },

    #[error("Invalid target path: {target}")]
    InvalidTarget { target: String },

    // Snapshot errors
    #[error("Could not find cache directory")]
    CacheDirectoryNotFound,

    #[error("Snapshot file does not exist at '{path}'. Run 'svn-bridge status' first.")]
    SnapshotNotFound { path: PathBuf },

    #[error("Failed to read snapshot file '{path}': {source}")]
    SnapshotReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse snapshot file '{path}': {source}")]
    SnapshotParseFailed {
        path: PathBuf,
        source: serde_json::Error,
    },

    // Ambient errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results using SvnBridgeError
pub type Result<T> = std::result::Result<T, SvnBridgeError>;

impl SvnBridgeError {
    /// Classify nonempty stderr into a typed command failure.
    pub fn from_stderr(stderr: impl Into<String>) -> Self {
        let stderr = stderr.into();
        Self::CommandFailed {
            kind: crate::core::classify::classify_stderr(&stderr),
            stderr,
        }
    }

    /// Create a launch failure for a program that could not be started.
    pub fn launch_failed(program: impl Into<String>, source: std::io::Error) -> Self {
        Self::LaunchFailed {
            program: program.into(),
            source,
        }
    }

    /// Create a parse failure for a malformed listing line.
    pub fn parse_failed(reason: impl Into<String>, line: impl Into<String>) -> Self {
        Self::ParseFailed {
            reason: reason.into(),
            line: line.into(),
        }
    }

    /// Create a not-in-working-copy error.
    pub fn not_in_working_copy(path: impl Into<PathBuf>) -> Self {
        Self::NotInWorkingCopy { path: path.into() }
    }

    /// Create an invalid target error.
    pub fn invalid_target(target: impl Into<String>) -> Self {
        Self::InvalidTarget {
            target: target.into(),
        }
    }

    /// Create a snapshot-not-found error.
    pub fn snapshot_not_found(path: impl Into<PathBuf>) -> Self {
        Self::SnapshotNotFound { path: path.into() }
    }

    /// Create a snapshot read error.
    pub fn snapshot_read_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::SnapshotReadFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a snapshot parse error.
    pub fn snapshot_parse_failed(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::SnapshotParseFailed {
            path: path.into(),
            source,
        }
    }

    /// The classified kind, when this is a classified command failure.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::CommandFailed { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_stderr_classifies() {
        let err = SvnBridgeError::from_stderr("svn: E160028: 'a.txt' is out of date");
        assert_eq!(err.kind(), Some(ErrorKind::OutOfDate));
        assert!(err.to_string().contains("out of date"));
    }

    #[test]
    fn test_from_stderr_generic_fallback() {
        let err = SvnBridgeError::from_stderr("svn: something unexpected");
        assert_eq!(err.kind(), Some(ErrorKind::Generic));
    }

    #[test]
    fn test_launch_failed_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "No such file");
        let err = SvnBridgeError::launch_failed("svn", io_err);
        assert!(err.to_string().contains("Failed to launch 'svn'"));
        assert!(err.to_string().contains("Is the svn client installed?"));
        assert_eq!(err.kind(), None);
    }

    #[test]
    fn test_parse_failed_display() {
        let err = SvnBridgeError::parse_failed("line too short", "M");
        assert!(err.to_string().contains("line too short"));
        assert!(err.to_string().contains("\"M\""));
    }

    #[test]
    fn test_not_in_working_copy_display() {
        let err = SvnBridgeError::not_in_working_copy("/tmp/elsewhere");
        assert!(err.to_string().contains("/tmp/elsewhere"));
        assert!(err.to_string().contains("not inside a working copy"));
    }

    #[test]
    fn test_snapshot_not_found_display() {
        let err = SvnBridgeError::snapshot_not_found("/cache/status.json");
        assert!(err.to_string().contains("/cache/status.json"));
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_snapshot_parse_failed_display() {
        let json_err = serde_json::from_str::<serde_json::Value>("{ bad").unwrap_err();
        let err = SvnBridgeError::snapshot_parse_failed("/cache/status.json", json_err);
        assert!(err.to_string().contains("Failed to parse snapshot"));
    }
}
