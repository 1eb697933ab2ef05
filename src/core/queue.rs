//! Pending status request queue.
//!
//! Interactive callers enqueue asset paths here instead of running status
//! queries themselves; the refresh loop drains the queue on its next cycle.
//! Requests are partitioned into a local and a remote class by the
//! persistent remote rule set, and set semantics make enqueueing
//! idempotent: requesting the same path many times before a flush produces
//! exactly one query.
//!
//! # Public API
//! - [`RequestQueue`]: Pending sets plus the remote rule set
//!
//! The queue has its own mutex, distinct from the cache lock, so draining
//! and batch construction never block status readers.

use std::collections::{BTreeSet, HashSet};
use std::sync::Mutex;

use crate::core::status::normalize_path;

#[derive(Debug, Default)]
struct QueueState {
    local: BTreeSet<String>,
    remote: BTreeSet<String>,
    /// Paths whose status requests should include a server round-trip.
    /// Persists across drains until explicitly changed.
    remote_rules: HashSet<String>,
}

/// Pending local/remote request sets guarded by a queue-private mutex.
#[derive(Debug, Default)]
pub struct RequestQueue {
    state: Mutex<QueueState>,
}

impl RequestQueue {
    pub fn new() -> Self {
        RequestQueue::default()
    }

    /// Queue paths for the next refresh cycle, routed by the rule set.
    ///
    /// Returns the normalized paths that were enqueued, for the caller to
    /// mark pending in the cache (the cache has its own lock; this method
    /// touches only queue state).
    pub fn enqueue<S: AsRef<str>>(&self, paths: &[S]) -> Vec<String> {
        let mut state = self.state.lock().expect("request queue poisoned");
        let mut accepted = Vec::with_capacity(paths.len());
        for path in paths {
            let key = normalize_path(path.as_ref());
            if key.is_empty() {
                continue;
            }
            if state.remote_rules.contains(&key) {
                state.remote.insert(key.clone());
            } else {
                state.local.insert(key.clone());
            }
            accepted.push(key);
        }
        accepted
    }

    /// Toggle the remote rule for the given paths.
    ///
    /// Setting a path local removes it from any future remote default and
    /// reroutes a currently pending remote request.
    pub fn set_remote_rule<S: AsRef<str>>(&self, paths: &[S], is_remote: bool) {
        let mut state = self.state.lock().expect("request queue poisoned");
        for path in paths {
            let key = normalize_path(path.as_ref());
            if is_remote {
                state.remote_rules.insert(key.clone());
                if state.local.remove(&key) {
                    state.remote.insert(key);
                }
            } else {
                state.remote_rules.remove(&key);
                if state.remote.remove(&key) {
                    state.local.insert(key);
                }
            }
        }
    }

    /// Whether a path currently has the remote rule.
    pub fn is_remote(&self, path: &str) -> bool {
        let state = self.state.lock().expect("request queue poisoned");
        state.remote_rules.contains(&normalize_path(path))
    }

    /// Atomically snapshot and clear both pending sets.
    ///
    /// The local batch excludes any path also present in the remote batch:
    /// remote wins, so a path is never queried twice in one flush.
    pub fn drain(&self) -> (Vec<String>, Vec<String>) {
        let mut state = self.state.lock().expect("request queue poisoned");
        let remote: Vec<String> = std::mem::take(&mut state.remote).into_iter().collect();
        let local: Vec<String> = std::mem::take(&mut state.local)
            .into_iter()
            .filter(|p| !remote.contains(p))
            .collect();
        (local, remote)
    }

    /// True when nothing is pending.
    pub fn is_idle(&self) -> bool {
        let state = self.state.lock().expect("request queue poisoned");
        state.local.is_empty() && state.remote.is_empty()
    }
}
