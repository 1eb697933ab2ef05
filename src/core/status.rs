//! Type-safe working-copy status model.
//!
//! This module defines the typed status vocabulary used throughout svn-bridge
//! instead of raw `svn status` column characters. Every cache entry, parser
//! result, and notification payload is built from these types.
//!
//! # Public API
//! - [`FileState`]: Closed enumeration of working-copy item states
//! - [`ReflectionLevel`]: How thoroughly an entry's status was last determined
//! - [`LockState`]: Repository lock marker for an item
//! - [`StatusEntry`]: A single cached status record for an asset path
//!
//! # Key Features
//! - **Type safety**: Compile-time checking instead of status-character matching
//! - **svn integration**: Direct conversion from `svn status` item columns
//! - **Display formatting**: Consistent string representation for CLI output
//! - **Well-defined misses**: [`StatusEntry::default_for`] never fails a lookup

use serde::{Deserialize, Serialize};
use std::fmt;

/// Working-copy item state, mapped from the first column of `svn status`.
///
/// The set is closed: every character the client emits has a member here,
/// plus `None` for clean/never-reported items and `Unknown` for entries
/// whose query is still in flight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileState {
    /// Clean, or never reported by the client
    #[default]
    None,
    /// A status query is pending; treat as "not yet known"
    Unknown,
    /// Not under version control (?)
    Unversioned,
    /// Scheduled for addition (A)
    Added,
    /// Scheduled for deletion (D)
    Deleted,
    /// Locally modified (M)
    Modified,
    /// Replaced: deleted then re-added (R)
    Replaced,
    /// In conflict after an update or merge (C)
    Conflicted,
    /// Versioned but missing from disk (!)
    Missing,
    /// Obstructed by an item of a different kind (~)
    Obstructed,
    /// Matched an ignore pattern (I)
    Ignored,
    /// An externals definition (X)
    External,
}

impl FileState {
    /// Convert an `svn status` item column character to a state.
    ///
    /// Returns `None` for characters the closed enumeration does not cover,
    /// which the parser treats as a malformed listing.
    pub fn from_status_char(c: char) -> Option<FileState> {
        match c {
            ' ' => Some(FileState::None),
            '?' => Some(FileState::Unversioned),
            'A' => Some(FileState::Added),
            'D' => Some(FileState::Deleted),
            'M' => Some(FileState::Modified),
            'R' => Some(FileState::Replaced),
            'C' => Some(FileState::Conflicted),
            '!' => Some(FileState::Missing),
            '~' => Some(FileState::Obstructed),
            'I' => Some(FileState::Ignored),
            'X' => Some(FileState::External),
            _ => None,
        }
    }

    /// The `svn status` column character for this state.
    pub fn as_char(&self) -> char {
        match self {
            FileState::None => ' ',
            FileState::Unknown => ' ',
            FileState::Unversioned => '?',
            FileState::Added => 'A',
            FileState::Deleted => 'D',
            FileState::Modified => 'M',
            FileState::Replaced => 'R',
            FileState::Conflicted => 'C',
            FileState::Missing => '!',
            FileState::Obstructed => '~',
            FileState::Ignored => 'I',
            FileState::External => 'X',
        }
    }

    /// Human-readable description for CLI output.
    pub fn description(&self) -> &'static str {
        match self {
            FileState::None => "clean",
            FileState::Unknown => "pending",
            FileState::Unversioned => "unversioned",
            FileState::Added => "added",
            FileState::Deleted => "deleted",
            FileState::Modified => "modified",
            FileState::Replaced => "replaced",
            FileState::Conflicted => "conflicted",
            FileState::Missing => "missing",
            FileState::Obstructed => "obstructed",
            FileState::Ignored => "ignored",
            FileState::External => "external",
        }
    }

    /// Whether the item carries local changes worth committing.
    pub fn has_local_change(&self) -> bool {
        matches!(
            self,
            FileState::Added
                | FileState::Deleted
                | FileState::Modified
                | FileState::Replaced
                | FileState::Conflicted
        )
    }
}

impl fmt::Display for FileState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// How thoroughly an entry's status was last determined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ReflectionLevel {
    /// Never queried
    #[default]
    None,
    /// A query was enqueued but has not completed
    Pending,
    /// Resolved from the local working copy only
    Local,
    /// Resolved including a server round-trip
    Remote,
}

/// Repository lock marker, from the lock column of `svn status`.
///
/// The status listing carries the lock letter but not the owner's name, so
/// this marker is the lock metadata the engine can actually cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LockState {
    /// Not locked
    #[default]
    None,
    /// Locked in this working copy (K)
    LockedHere,
    /// Locked by another user or working copy (O)
    LockedElsewhere,
    /// Locked here, but stolen: the repository lock belongs to someone else (T)
    Stolen,
    /// Locked here, but the repository lock no longer exists (B)
    Broken,
}

impl LockState {
    /// Convert the `svn status` lock column character.
    pub fn from_status_char(c: char) -> Option<LockState> {
        match c {
            ' ' => Some(LockState::None),
            'K' => Some(LockState::LockedHere),
            'O' => Some(LockState::LockedElsewhere),
            'T' => Some(LockState::Stolen),
            'B' => Some(LockState::Broken),
            _ => None,
        }
    }
}

/// A single cached status record for an asset path.
///
/// Paths are stored normalized to forward slashes; see
/// [`normalize_path`]. A lookup miss yields [`StatusEntry::default_for`],
/// so readers never deal with an absent entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusEntry {
    pub path: String,
    pub state: FileState,
    pub reflection: ReflectionLevel,
    pub lock: LockState,
    /// Changelist the item belongs to, from the listing's group headers
    pub changelist: Option<String>,
    /// Set when a remote query reported a newer revision on the server
    pub out_of_date: bool,
}

impl StatusEntry {
    /// The well-defined entry returned for paths that were never queried.
    pub fn default_for(path: &str) -> Self {
        StatusEntry {
            path: normalize_path(path),
            state: FileState::None,
            reflection: ReflectionLevel::None,
            lock: LockState::None,
            changelist: None,
            out_of_date: false,
        }
    }

    /// A clean entry at the given reflection level, for batch paths the
    /// listing did not mention.
    pub fn clean_at(path: &str, reflection: ReflectionLevel) -> Self {
        StatusEntry {
            reflection,
            ..StatusEntry::default_for(path)
        }
    }
}

/// Normalize an asset path to the forward-slash form used as cache key.
pub fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}
