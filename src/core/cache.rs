//! Thread-safe status cache.
//!
//! The cache is the read-mostly mapping from normalized asset path to its
//! last-known [`StatusEntry`]. It is written by the refresh loop and by
//! operation post-processing, and read from any thread. All operations are
//! internally synchronized; callers never take an external lock, and no
//! cache lock is ever held across parsing or I/O.
//!
//! # Public API
//! - [`StatusCache`]: The shared mapping
//!
//! Lookups never fail: a path that was never queried yields
//! [`StatusEntry::default_for`]. Entries are only removed by explicit
//! [`StatusCache::remove`]/[`StatusCache::clear`] calls, never implicitly
//! by the refresh loop.

use crate::core::status::{normalize_path, ReflectionLevel, StatusEntry};
use std::collections::HashMap;
use std::sync::Mutex;

/// Shared path → status mapping guarded by its own mutex.
#[derive(Debug, Default)]
pub struct StatusCache {
    entries: Mutex<HashMap<String, StatusEntry>>,
}

impl StatusCache {
    pub fn new() -> Self {
        StatusCache::default()
    }

    /// Look up a path; returns the well-defined default entry on a miss.
    pub fn get(&self, path: &str) -> StatusEntry {
        let key = normalize_path(path);
        let entries = self.entries.lock().expect("status cache poisoned");
        entries
            .get(&key)
            .cloned()
            .unwrap_or_else(|| StatusEntry::default_for(path))
    }

    /// Insert or replace the entry for its path.
    pub fn set(&self, entry: StatusEntry) {
        let mut entries = self.entries.lock().expect("status cache poisoned");
        entries.insert(entry.path.clone(), entry);
    }

    /// Insert or replace a batch of entries under a single lock hold.
    pub fn set_many(&self, batch: Vec<StatusEntry>) {
        if batch.is_empty() {
            return;
        }
        let mut entries = self.entries.lock().expect("status cache poisoned");
        for entry in batch {
            entries.insert(entry.path.clone(), entry);
        }
    }

    /// Mark a path as having a query in flight.
    ///
    /// Keeps the last-known state so readers see "pending refresh of X"
    /// rather than losing the previous answer; a path never seen before
    /// gets the unknown/pending entry.
    pub fn mark_pending(&self, path: &str) {
        let key = normalize_path(path);
        let mut entries = self.entries.lock().expect("status cache poisoned");
        entries
            .entry(key.clone())
            .or_insert_with(|| {
                let mut entry = StatusEntry::default_for(&key);
                entry.state = crate::core::status::FileState::Unknown;
                entry
            })
            .reflection = ReflectionLevel::Pending;
    }

    /// Remove the entries for the given paths.
    pub fn remove<S: AsRef<str>>(&self, paths: &[S]) {
        let mut entries = self.entries.lock().expect("status cache poisoned");
        for path in paths {
            entries.remove(&normalize_path(path.as_ref()));
        }
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.entries.lock().expect("status cache poisoned").clear();
    }

    /// Snapshot of all cached paths.
    pub fn keys(&self) -> Vec<String> {
        let entries = self.entries.lock().expect("status cache poisoned");
        entries.keys().cloned().collect()
    }

    /// Paths whose entries satisfy the predicate.
    ///
    /// The predicate runs on a snapshot taken under the lock, so caller
    /// code never executes inside the critical section.
    pub fn filtered<F>(&self, predicate: F) -> Vec<String>
    where
        F: Fn(&StatusEntry) -> bool,
    {
        let snapshot: Vec<StatusEntry> = {
            let entries = self.entries.lock().expect("status cache poisoned");
            entries.values().cloned().collect()
        };
        snapshot
            .into_iter()
            .filter(|e| predicate(e))
            .map(|e| e.path)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().expect("status cache poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::status::FileState;

    fn modified(path: &str) -> StatusEntry {
        StatusEntry {
            state: FileState::Modified,
            reflection: ReflectionLevel::Local,
            ..StatusEntry::default_for(path)
        }
    }

    #[test]
    fn test_get_miss_returns_default_entry() {
        let cache = StatusCache::new();
        let entry = cache.get("never/queried.txt");
        assert_eq!(entry.state, FileState::None);
        assert_eq!(entry.reflection, ReflectionLevel::None);
        assert_eq!(entry.path, "never/queried.txt");
    }

    #[test]
    fn test_set_then_get() {
        let cache = StatusCache::new();
        cache.set(modified("a.txt"));
        assert_eq!(cache.get("a.txt").state, FileState::Modified);
    }

    #[test]
    fn test_get_normalizes_backslash_lookups() {
        let cache = StatusCache::new();
        cache.set(modified("dir/a.txt"));
        assert_eq!(cache.get("dir\\a.txt").state, FileState::Modified);
    }

    #[test]
    fn test_set_many_is_idempotent() {
        let cache = StatusCache::new();
        let batch = vec![modified("a.txt"), modified("b.txt")];
        cache.set_many(batch.clone());
        let first: Vec<_> = {
            let mut keys = cache.keys();
            keys.sort();
            keys.iter().map(|k| cache.get(k)).collect()
        };
        cache.set_many(batch);
        let second: Vec<_> = {
            let mut keys = cache.keys();
            keys.sort();
            keys.iter().map(|k| cache.get(k)).collect()
        };
        assert_eq!(first, second);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_mark_pending_new_path_is_unknown() {
        let cache = StatusCache::new();
        cache.mark_pending("fresh.txt");
        let entry = cache.get("fresh.txt");
        assert_eq!(entry.state, FileState::Unknown);
        assert_eq!(entry.reflection, ReflectionLevel::Pending);
    }

    #[test]
    fn test_mark_pending_keeps_known_state() {
        let cache = StatusCache::new();
        cache.set(modified("a.txt"));
        cache.mark_pending("a.txt");
        let entry = cache.get("a.txt");
        assert_eq!(entry.state, FileState::Modified);
        assert_eq!(entry.reflection, ReflectionLevel::Pending);
    }

    #[test]
    fn test_remove_and_clear() {
        let cache = StatusCache::new();
        cache.set(modified("a.txt"));
        cache.set(modified("b.txt"));
        cache.remove(&["a.txt"]);
        assert_eq!(cache.get("a.txt").state, FileState::None);
        assert_eq!(cache.len(), 1);
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_filtered_by_state() {
        let cache = StatusCache::new();
        cache.set(modified("a.txt"));
        cache.set(StatusEntry::default_for("clean.txt"));
        let mut hits = cache.filtered(|e| e.state == FileState::Modified);
        hits.sort();
        assert_eq!(hits, vec!["a.txt"]);
    }

    #[test]
    fn test_concurrent_readers_and_writer() {
        use std::sync::Arc;
        let cache = Arc::new(StatusCache::new());
        let writer = {
            let cache = Arc::clone(&cache);
            std::thread::spawn(move || {
                for i in 0..200 {
                    cache.set(modified(&format!("file{i}.txt")));
                }
            })
        };
        let readers: Vec<_> = (0..4)
            .map(|_| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || {
                    for i in 0..200 {
                        let _ = cache.get(&format!("file{i}.txt"));
                    }
                })
            })
            .collect();
        writer.join().unwrap();
        for reader in readers {
            reader.join().unwrap();
        }
        assert_eq!(cache.len(), 200);
    }
}
