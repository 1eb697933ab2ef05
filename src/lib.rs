//! svn-bridge - A background SVN status synchronization engine with a lean CLI.
//!
//! This library provides the core functionality for svn-bridge: a
//! thread-safe status cache, a deduplicating request queue, a background
//! refresh loop over the external `svn` client, typed error classification
//! of client stderr, and the mutating-operation API that keeps the cache
//! consistent. It is designed so any number of callers can ask for asset
//! status cheaply while at most one external command runs at a time.
//!
//! # Public API
//! The main public interface is re-exported from the [`core`] module, which
//! provides:
//! - The [`core::SvnClient`] engine surface (queries, operations, lifecycle)
//! - Status model types and the thread-safe cache
//! - Command execution and stderr classification
//! - Error handling and result types
//! - Configuration, snapshots, and CLI output helpers

pub mod commands;
pub mod core;

// Re-export the core public API for external users
pub use core::{
    classify_stderr,

    escape_target,
    execute,

    format_status_line,
    load_snapshot,
    normalize_path,
    parse_status_listing,
    // Output formatting (core functions)
    print_error,
    print_info,
    print_section_header,
    print_status_entries,
    print_success,
    save_snapshot,
    split_batches,

    // Configuration
    BridgeConfig,
    BridgeSettings,

    // Command execution
    CommandResult,
    // Error classification
    ErrorKind,
    // Status model
    FileState,
    LockState,

    OperationMode,
    ReflectionLevel,
    // Refresh loop
    RefreshLoop,
    // Shared state
    RequestQueue,
    ResolvePolicy,
    // Error handling
    Result,

    StatusCache,
    StatusEntry,
    StatusSnapshot,
    // Engine surface
    SvnClient,

    SvnBridgeError,
    SvnInvocation,

    DEFAULT_REFRESH_INTERVAL,
    MAX_BATCH_SIZE,
    STDERR_PATTERNS,
};
