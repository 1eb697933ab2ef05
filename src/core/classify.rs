//! Classification of `svn` stderr output into a typed failure taxonomy.
//!
//! The command-line client reports failures as unstructured stderr text.
//! Callers need to act differently on "server unreachable" versus "run
//! cleanup first", so this module matches stderr against a fixed, ordered
//! table of known error codes and message fragments.
//!
//! # Public API
//! - [`ErrorKind`]: The failure taxonomy
//! - [`classify_stderr`]: Map stderr text to an [`ErrorKind`]
//! - [`STDERR_PATTERNS`]: The ordered pattern table itself
//!
//! The table is data, not control flow: it is evaluated top to bottom and
//! the first match wins. Order matters: several fragments share the word
//! "locked" and the out-of-date code must win over generic text. Updating
//! the mapping for a new client version means editing the table only.

use std::fmt;

/// Typed failure taxonomy for classified command failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Server unreachable or the connection timed out; transient, retryable
    ConnectionTimeout,
    /// Client/server or client/working-copy version mismatch; user must act
    NewerVersion,
    /// Unrecoverable working-copy state; abort and surface
    Critical,
    /// Local copy is behind the server; update before retrying
    OutOfDate,
    /// The working copy itself is locked; run cleanup
    LocalCopyLocked,
    /// Another user or working copy holds the repository lock
    LockedByOther,
    /// Unclassified failure, surfaced verbatim
    Generic,
}

impl ErrorKind {
    /// Short description used in error messages.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorKind::ConnectionTimeout => "could not connect to the repository",
            ErrorKind::NewerVersion => "client and working copy versions do not match",
            ErrorKind::Critical => "unrecoverable working copy state",
            ErrorKind::OutOfDate => "local copy is out of date; update before retrying",
            ErrorKind::LocalCopyLocked => "working copy is locked; run cleanup",
            ErrorKind::LockedByOther => "item is locked by another user",
            ErrorKind::Generic => "svn command failed",
        }
    }

    /// Whether retrying the same command without user action can succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, ErrorKind::ConnectionTimeout)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Ordered (fragment, kind) table; first match wins.
///
/// Codes and message fragments are those the Subversion 1.x command-line
/// client actually prints. Specific codes come before looser message text,
/// and the working-copy-locked entries come before the lock-holder entries
/// because both mention "locked".
pub const STDERR_PATTERNS: &[(&str, ErrorKind)] = &[
    // Connectivity
    ("E170013", ErrorKind::ConnectionTimeout),
    ("E175012", ErrorKind::ConnectionTimeout),
    ("Connection timed out", ErrorKind::ConnectionTimeout),
    ("Unable to connect to a repository", ErrorKind::ConnectionTimeout),
    // Version mismatches
    ("E155021", ErrorKind::NewerVersion),
    ("E155036", ErrorKind::NewerVersion),
    ("is too old (format", ErrorKind::NewerVersion),
    ("client is too old", ErrorKind::NewerVersion),
    // Unrecoverable working-copy state
    ("E155007", ErrorKind::Critical),
    ("E155016", ErrorKind::Critical),
    ("is not a working copy", ErrorKind::Critical),
    // Behind the server
    ("E160028", ErrorKind::OutOfDate),
    ("E170004", ErrorKind::OutOfDate),
    ("is out of date", ErrorKind::OutOfDate),
    // Working copy locked (needs cleanup), before the lock-holder entries
    ("E155004", ErrorKind::LocalCopyLocked),
    ("E155037", ErrorKind::LocalCopyLocked),
    ("run 'svn cleanup'", ErrorKind::LocalCopyLocked),
    ("working copy locked", ErrorKind::LocalCopyLocked),
    // Repository lock held elsewhere
    ("W160035", ErrorKind::LockedByOther),
    ("E160035", ErrorKind::LockedByOther),
    ("already locked by user", ErrorKind::LockedByOther),
    ("no lock token available", ErrorKind::LockedByOther),
];

/// Classify nonempty stderr text against [`STDERR_PATTERNS`].
///
/// Falls through to [`ErrorKind::Generic`] when nothing matches.
pub fn classify_stderr(stderr: &str) -> ErrorKind {
    for (fragment, kind) in STDERR_PATTERNS {
        if stderr.contains(fragment) {
            return *kind;
        }
    }
    ErrorKind::Generic
}
