//! Persisted status snapshots.
//!
//! The CLI saves the last status listing per working copy so a later run
//! can show something immediately while a fresh query is in flight. Each
//! working copy gets its own cache file, keyed by a hash of its path.
//!
//! # Public API
//! - [`StatusSnapshot`]: Entries plus capture metadata
//! - [`save_snapshot`] / [`load_snapshot`]
//!
//! # Cache Strategy
//! - **JSON serialization**: Human-readable cache files for debugging
//! - **Timestamping**: `captured_at` records when the listing was taken
//! - **Working copy isolation**: Separate cache file per working copy path

use crate::core::dirs::get_cache_directory;
use crate::core::error::{Result, SvnBridgeError};
use crate::core::status::StatusEntry;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub working_copy: PathBuf,
    pub entries: Vec<StatusEntry>,
    pub captured_at: chrono::DateTime<chrono::Utc>,
}

impl StatusSnapshot {
    pub fn new(working_copy: PathBuf, entries: Vec<StatusEntry>) -> Self {
        StatusSnapshot {
            working_copy,
            entries,
            captured_at: chrono::Utc::now(),
        }
    }
}

fn snapshot_file(working_copy: &Path) -> Result<PathBuf> {
    let wc_hash = format!(
        "{:x}",
        md5::compute(working_copy.to_string_lossy().as_bytes())
    );
    Ok(get_cache_directory()?.join(wc_hash).join("status.json"))
}

/// Persist a snapshot for its working copy, creating directories as needed.
pub fn save_snapshot(snapshot: &StatusSnapshot) -> Result<()> {
    let file = snapshot_file(&snapshot.working_copy)?;
    log::debug!(
        "saving {} snapshot entries to {}",
        snapshot.entries.len(),
        file.display()
    );
    if let Some(parent) = file.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(&file, json)?;
    Ok(())
}

/// Load the snapshot previously saved for a working copy.
pub fn load_snapshot(working_copy: &Path) -> Result<StatusSnapshot> {
    let file = snapshot_file(working_copy)?;
    if !file.exists() {
        return Err(SvnBridgeError::snapshot_not_found(&file));
    }
    let content =
        fs::read_to_string(&file).map_err(|e| SvnBridgeError::snapshot_read_failed(&file, e))?;
    let snapshot: StatusSnapshot = serde_json::from_str(&content)
        .map_err(|e| SvnBridgeError::snapshot_parse_failed(&file, e))?;
    log::debug!(
        "loaded {} snapshot entries from {}",
        snapshot.entries.len(),
        file.display()
    );
    Ok(snapshot)
}
