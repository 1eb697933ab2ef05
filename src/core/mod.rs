//! Core functionality for the svn-bridge engine.
//!
//! This module provides the fundamental building blocks for status
//! synchronization: the cache, the request queue, the command executor,
//! error classification, and the client surface tying them together.

pub mod cache;
pub mod classify;
pub mod client;
pub mod config;
pub mod dirs;
pub mod error;
pub mod executor;
pub mod invocation;
pub mod output;
pub mod parser;
pub mod queue;
pub mod refresh;
pub mod snapshot;
pub mod status;

// === Error handling ===
// Core error types and result type used throughout the application
pub use error::{Result, SvnBridgeError};

// === Error classification ===
// Ordered stderr pattern table and the typed failure taxonomy
pub use classify::{classify_stderr, ErrorKind, STDERR_PATTERNS};

// === Status model ===
// Typed working-copy states and the cache entry record
pub use status::{normalize_path, FileState, LockState, ReflectionLevel, StatusEntry};

// === Engine surface ===
// The client handle plus the operation flag types
pub use client::{OperationMode, ResolvePolicy, SvnClient};

// === Shared state ===
// Thread-safe status cache and pending request queue
pub use cache::StatusCache;
pub use queue::RequestQueue;

// === Command execution ===
// Invocation records and the external process executor
pub use executor::{execute, CommandResult};
pub use invocation::{escape_target, SvnInvocation};

// === Status parsing ===
// Listing text to typed entries
pub use parser::parse_status_listing;

// === Refresh loop ===
// Background cycle mechanics and batching limits
pub use refresh::{split_batches, RefreshLoop, DEFAULT_REFRESH_INTERVAL, MAX_BATCH_SIZE};

// === Configuration ===
// Runtime config and persisted settings
pub use config::{BridgeConfig, BridgeSettings};

// === Snapshots ===
// Persisted per-working-copy status listings
pub use snapshot::{load_snapshot, save_snapshot, StatusSnapshot};

// === Output formatting ===
// Unified output formatting for consistent CLI presentation
pub use output::{
    format_status_line, print_error, print_info, print_section_header, print_status_entries,
    print_success,
};
