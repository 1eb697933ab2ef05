//! Parser for `svn status` listings.
//!
//! Converts the client's column-oriented status output into
//! [`StatusEntry`] records. The parser is a pure function over the raw
//! text: it holds no locks and touches no cache, so a failed parse can
//! never corrupt previously merged state; the caller merges only after a
//! fully successful parse.
//!
//! # Public API
//! - [`parse_status_listing`]: Raw listing text to status entries
//!
//! # Listing format
//! Seven flag columns, a separator column, then the target path. With
//! `--show-updates` an out-of-date marker `*` and the working revision
//! precede the path, and the listing ends with a `Status against
//! revision:` trailer. Changelist groups are introduced by
//! `--- Changelist 'name':` headers. Any line that fits none of these
//! shapes fails the whole parse.

use crate::core::error::{Result, SvnBridgeError};
use crate::core::status::{normalize_path, FileState, LockState, ReflectionLevel, StatusEntry};

/// Parse a raw status listing into entries at the given reflection level.
///
/// `reflection` should be [`ReflectionLevel::Remote`] when the listing came
/// from a `--show-updates` query; only then is the out-of-date column
/// interpreted.
pub fn parse_status_listing(raw: &str, reflection: ReflectionLevel) -> Result<Vec<StatusEntry>> {
    let remote = reflection == ReflectionLevel::Remote;
    let mut entries = Vec::new();
    let mut current_changelist: Option<String> = None;

    for line in raw.lines() {
        if line.trim().is_empty() {
            continue;
        }
        if let Some(name) = changelist_header(line) {
            current_changelist = Some(name);
            continue;
        }
        if line.starts_with("Status against revision:") {
            continue;
        }
        // Conflict and moved-to annotations are indented continuation lines.
        if line.trim_start().starts_with('>') {
            continue;
        }

        let mut entry = parse_entry_line(line, remote, current_changelist.as_deref())?;
        entry.reflection = reflection;
        entries.push(entry);
    }

    Ok(entries)
}

fn changelist_header(line: &str) -> Option<String> {
    let rest = line.strip_prefix("--- Changelist '")?;
    let end = rest.rfind("':")?;
    Some(rest[..end].to_string())
}

fn parse_entry_line(
    line: &str,
    remote: bool,
    changelist: Option<&str>,
) -> Result<StatusEntry> {
    let columns: Vec<char> = line.chars().take(8).collect();
    if columns.len() < 8 {
        return Err(SvnBridgeError::parse_failed("line too short", line));
    }

    let item = FileState::from_status_char(columns[0])
        .ok_or_else(|| SvnBridgeError::parse_failed("unknown item status", line))?;
    let props = columns[1];
    let lock = LockState::from_status_char(columns[5])
        .ok_or_else(|| SvnBridgeError::parse_failed("unknown lock marker", line))?;
    let tree_conflict = columns[6] == 'C';

    // A property-only change still counts as modified; conflicts anywhere
    // dominate the item state.
    let mut state = item;
    if state == FileState::None && props == 'M' {
        state = FileState::Modified;
    }
    if props == 'C' || tree_conflict {
        state = FileState::Conflicted;
    }

    let rest: &str = &line[line
        .char_indices()
        .nth(8)
        .map(|(i, _)| i)
        .unwrap_or(line.len())..];

    let (out_of_date, path) = if remote {
        split_remote_columns(rest)
    } else {
        (false, rest.trim_start())
    };

    if path.is_empty() {
        return Err(SvnBridgeError::parse_failed("missing target path", line));
    }

    Ok(StatusEntry {
        path: normalize_path(path),
        state,
        reflection: ReflectionLevel::None, // overwritten by the caller
        lock,
        changelist: changelist.map(|s| s.to_string()),
        out_of_date,
    })
}

/// Split the `--show-updates` tail: optional `*`, optional working
/// revision, then the path.
fn split_remote_columns(rest: &str) -> (bool, &str) {
    let mut rest = rest;
    let mut out_of_date = false;
    if let Some(stripped) = rest.strip_prefix('*') {
        out_of_date = true;
        rest = stripped;
    }
    let rest = rest.trim_start();

    // The revision column is digits (or '-' for items without one); an
    // unversioned entry has no revision column at all.
    match rest.split_once(char::is_whitespace) {
        Some((token, tail))
            if token == "-" || (!token.is_empty() && token.chars().all(|c| c.is_ascii_digit())) =>
        {
            (out_of_date, tail.trim_start())
        }
        _ => (out_of_date, rest),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_local_listing() {
        let raw = "M       src/lib.rs\n\
                   A  +    assets/new.png\n\
                   ?       scratch.txt\n\
                   !       gone.rs\n";
        let entries = parse_status_listing(raw, ReflectionLevel::Local).unwrap();
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[0].path, "src/lib.rs");
        assert_eq!(entries[0].state, FileState::Modified);
        assert_eq!(entries[0].reflection, ReflectionLevel::Local);
        assert_eq!(entries[1].state, FileState::Added);
        assert_eq!(entries[2].state, FileState::Unversioned);
        assert_eq!(entries[3].state, FileState::Missing);
    }

    #[test]
    fn test_parse_remote_listing_with_out_of_date_marker() {
        let raw = "M       *      965   src/zig.c\n\
                   M              965   src/bar.c\n\
                   Status against revision:    981\n";
        let entries = parse_status_listing(raw, ReflectionLevel::Remote).unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries[0].out_of_date);
        assert_eq!(entries[0].path, "src/zig.c");
        assert_eq!(entries[0].reflection, ReflectionLevel::Remote);
        assert!(!entries[1].out_of_date);
        assert_eq!(entries[1].path, "src/bar.c");
    }

    #[test]
    fn test_parse_remote_unversioned_entry_without_revision() {
        let raw = "?                    scratch.txt\n\
                   Status against revision:    981\n";
        let entries = parse_status_listing(raw, ReflectionLevel::Remote).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].path, "scratch.txt");
        assert_eq!(entries[0].state, FileState::Unversioned);
    }

    #[test]
    fn test_parse_out_of_date_only_entry() {
        // Clean locally, newer on the server.
        let raw = "        *      965   docs/readme.md\n";
        let entries = parse_status_listing(raw, ReflectionLevel::Remote).unwrap();
        assert_eq!(entries[0].state, FileState::None);
        assert!(entries[0].out_of_date);
        assert_eq!(entries[0].path, "docs/readme.md");
    }

    #[test]
    fn test_parse_lock_markers() {
        let raw = "M    K  locked-here.bin\n     O  locked-elsewhere.bin\n";
        let entries = parse_status_listing(raw, ReflectionLevel::Local).unwrap();
        assert_eq!(entries[0].lock, LockState::LockedHere);
        assert_eq!(entries[1].lock, LockState::LockedElsewhere);
        assert_eq!(entries[1].state, FileState::None);
    }

    #[test]
    fn test_parse_changelist_groups() {
        let raw = "M       outside.rs\n\
                   \n\
                   --- Changelist 'wip':\n\
                   M       inside.rs\n\
                   A       also-inside.rs\n";
        let entries = parse_status_listing(raw, ReflectionLevel::Local).unwrap();
        assert_eq!(entries[0].changelist, None);
        assert_eq!(entries[1].changelist.as_deref(), Some("wip"));
        assert_eq!(entries[2].changelist.as_deref(), Some("wip"));
    }

    #[test]
    fn test_parse_property_conflict_dominates() {
        let raw = " C      props.txt\n";
        let entries = parse_status_listing(raw, ReflectionLevel::Local).unwrap();
        assert_eq!(entries[0].state, FileState::Conflicted);
    }

    #[test]
    fn test_parse_property_only_modification() {
        let raw = " M      props.txt\n";
        let entries = parse_status_listing(raw, ReflectionLevel::Local).unwrap();
        assert_eq!(entries[0].state, FileState::Modified);
    }

    #[test]
    fn test_parse_tree_conflict_column() {
        let raw = "A  +  C moved.rs\n\
                         >   local missing, incoming edit upon update\n";
        let entries = parse_status_listing(raw, ReflectionLevel::Local).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].state, FileState::Conflicted);
    }

    #[test]
    fn test_parse_normalizes_backslash_paths() {
        let raw = "M       assets\\ui\\icon.png\n";
        let entries = parse_status_listing(raw, ReflectionLevel::Local).unwrap();
        assert_eq!(entries[0].path, "assets/ui/icon.png");
    }

    #[test]
    fn test_malformed_short_line_fails_whole_parse() {
        let raw = "M       good.rs\nM\n";
        let err = parse_status_listing(raw, ReflectionLevel::Local).unwrap_err();
        assert!(matches!(err, SvnBridgeError::ParseFailed { .. }));
    }

    #[test]
    fn test_unknown_status_char_fails_whole_parse() {
        let raw = "Z       what.rs\n";
        let err = parse_status_listing(raw, ReflectionLevel::Local).unwrap_err();
        assert!(matches!(err, SvnBridgeError::ParseFailed { .. }));
    }

    #[test]
    fn test_empty_listing_parses_to_no_entries() {
        let entries = parse_status_listing("", ReflectionLevel::Local).unwrap();
        assert!(entries.is_empty());
    }
}
