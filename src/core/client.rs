//! The engine surface: status queries, lifecycle, and mutating operations.
//!
//! [`SvnClient`] ties the status cache, the request queue, and the refresh
//! loop together and exposes the API the rest of the system talks to. It
//! wraps the external svn client the way the engine's collaborators expect:
//! cheap non-blocking status reads, queued refresh requests resolved in the
//! background, and blocking mutating operations serialized behind a single
//! process-wide operation lock.
//!
//! # Public API
//! - [`SvnClient`]: The engine handle
//! - [`OperationMode`]: Normal/force flag for delete and lock
//! - [`ResolvePolicy`]: Conflict resolution choice for resolve
//!
//! # Concurrency
//! Three independent locks guard disjoint state: the cache mutex, the
//! queue mutex, and the operation-active mutex. No lock is held across an
//! external process call except the operation lock, whose whole purpose is
//! to serialize those calls. Incremental refresh batches deliberately skip
//! the operation lock so status reads stay live during a long commit; the
//! resulting staleness is repaired by the mutation's own re-request.

use crate::core::cache::StatusCache;
use crate::core::config::BridgeConfig;
use crate::core::error::Result;
use crate::core::executor::{self, CommandResult};
use crate::core::invocation::SvnInvocation;
use crate::core::parser::parse_status_listing;
use crate::core::queue::RequestQueue;
use crate::core::refresh::{split_batches, RefreshLoop};
use crate::core::status::{normalize_path, ReflectionLevel, StatusEntry};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Normal or forced flavor of an operation (delete, lock).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationMode {
    Normal,
    Force,
}

/// Conflict resolution policy for [`SvnClient::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvePolicy {
    /// Keep the local version
    Ours,
    /// Take the incoming version
    Theirs,
    /// Leave the conflict untouched; resolves to a no-op success
    Ignore,
}

type StatusCallback = Box<dyn Fn(&[StatusEntry]) + Send + Sync>;
type ProgressCallback = Box<dyn Fn(&str) + Send + Sync>;

/// Shared engine state; owned behind an `Arc` so the refresh thread and
/// any number of callers see the same cache, queue, and locks.
struct Engine {
    config: BridgeConfig,
    cache: StatusCache,
    queue: RequestQueue,
    /// The process-wide operation-active critical section.
    op_lock: Mutex<()>,
    op_in_flight: AtomicBool,
    active: AtomicBool,
    status_listeners: Mutex<Vec<StatusCallback>>,
    progress_listeners: Mutex<Vec<ProgressCallback>>,
}

impl Engine {
    fn notify_status_completed(&self, entries: &[StatusEntry]) {
        let listeners = self
            .status_listeners
            .lock()
            .expect("status listeners poisoned");
        for listener in listeners.iter() {
            listener(entries);
        }
    }

    fn notify_progress(&self, line: &str) {
        log::trace!("progress: {line}");
        let listeners = self
            .progress_listeners
            .lock()
            .expect("progress listeners poisoned");
        for listener in listeners.iter() {
            listener(line);
        }
    }

    fn status_invocation(&self, targets: Option<&[String]>, level: ReflectionLevel) -> SvnInvocation {
        let mut invocation = SvnInvocation::new(
            &self.config.svn_program,
            "status",
            &self.config.working_copy,
        );
        if level == ReflectionLevel::Remote {
            invocation = invocation.arg("--show-updates");
        }
        if let Some(targets) = targets {
            invocation = invocation.targets(targets);
        }
        invocation
    }

    /// One refresh cycle: drain the queue and resolve both batches.
    ///
    /// Local and remote batches dispatch sequentially, never overlapping.
    fn refresh_once(&self) {
        if !self.active.load(Ordering::SeqCst) {
            return;
        }
        let (local, remote) = self.queue.drain();
        self.run_incremental(&local, ReflectionLevel::Local);
        self.run_incremental(&remote, ReflectionLevel::Remote);
    }

    /// Resolve one drained batch, sub-batch by sub-batch.
    ///
    /// Failures are isolated per sub-batch: a failed command is logged and
    /// the next sub-batch is still attempted; the paths simply stay at
    /// their previous status until a later cycle re-requests them.
    fn run_incremental(&self, paths: &[String], level: ReflectionLevel) {
        for chunk in split_batches(paths) {
            let invocation = self.status_invocation(Some(chunk), level);
            let listing = match executor::execute(&invocation, None) {
                Ok(listing) => listing,
                Err(e) => {
                    // Environment misconfigured; the loop itself survives.
                    log::error!("status batch could not run: {e}");
                    continue;
                }
            };
            if !listing.succeeded() {
                log::warn!(
                    "status batch failed, retrying next cycle: {}",
                    listing.stderr.trim()
                );
                continue;
            }
            match parse_status_listing(&listing.stdout, level) {
                Ok(parsed) => {
                    let merged = merge_batch(chunk, parsed, level);
                    self.cache.set_many(merged.clone());
                    self.notify_status_completed(&merged);
                }
                Err(e) => {
                    // Cache deliberately untouched on a bad listing.
                    log::warn!("discarding unparseable status listing: {e}");
                }
            }
        }
    }
}

/// Merge a parsed listing back over the requested batch.
///
/// Every requested path gets an entry: listed paths as reported, unlisted
/// paths as clean at the achieved reflection level (the client only lists
/// interesting items). Extra listed entries (children of a directory
/// target) are merged as-is. Merging the same listing twice yields the
/// same result.
fn merge_batch(
    batch: &[String],
    parsed: Vec<StatusEntry>,
    level: ReflectionLevel,
) -> Vec<StatusEntry> {
    let mut by_path: HashMap<String, StatusEntry> = parsed
        .into_iter()
        .map(|entry| (entry.path.clone(), entry))
        .collect();
    let mut merged = Vec::with_capacity(batch.len() + by_path.len());
    for path in batch {
        let entry = by_path
            .remove(path)
            .unwrap_or_else(|| StatusEntry::clean_at(path, level));
        merged.push(entry);
    }
    merged.extend(by_path.into_values());
    merged
}

/// Handle to the status synchronization engine.
///
/// The handle owns the background refresh loop; dropping it stops the
/// engine and joins the thread.
pub struct SvnClient {
    engine: Arc<Engine>,
    refresh: RefreshLoop,
}

impl SvnClient {
    pub fn new(config: BridgeConfig) -> Self {
        SvnClient {
            engine: Arc::new(Engine {
                config,
                cache: StatusCache::new(),
                queue: RequestQueue::new(),
                op_lock: Mutex::new(()),
                op_in_flight: AtomicBool::new(false),
                active: AtomicBool::new(false),
                status_listeners: Mutex::new(Vec::new()),
                progress_listeners: Mutex::new(Vec::new()),
            }),
            refresh: RefreshLoop::new(),
        }
    }

    // === Lifecycle ===

    /// Activate the engine and start the background refresh loop.
    pub fn start(&self) {
        self.engine.active.store(true, Ordering::SeqCst);
        let engine = Arc::clone(&self.engine);
        self.refresh
            .start(self.engine.config.refresh_interval, move || {
                engine.refresh_once()
            });
    }

    /// Deactivate the engine and stop the loop.
    ///
    /// An in-flight command is allowed to finish; only teardown (drop)
    /// joins the background thread.
    pub fn stop(&self) {
        self.engine.active.store(false, Ordering::SeqCst);
        self.refresh.stop();
    }

    pub fn is_active(&self) -> bool {
        self.engine.active.load(Ordering::SeqCst)
    }

    /// Working copy root this engine operates on.
    pub fn working_copy(&self) -> &std::path::Path {
        &self.engine.config.working_copy
    }

    /// Active with no operation in flight.
    pub fn is_ready(&self) -> bool {
        self.is_active() && !self.engine.op_in_flight.load(Ordering::SeqCst)
    }

    // === Status query surface ===

    /// Queue status lookups for the next refresh cycle. Cheap; never runs
    /// a command. No-op while inactive.
    pub fn request_status<S: AsRef<str>>(&self, paths: &[S]) {
        if !self.is_active() {
            return;
        }
        let accepted = self.engine.queue.enqueue(paths);
        for path in &accepted {
            self.engine.cache.mark_pending(path);
        }
        log::debug!("queued {} status request(s)", accepted.len());
    }

    /// Last-known status for a path; a well-defined default on a miss.
    pub fn get_asset_status(&self, path: &str) -> StatusEntry {
        self.engine.cache.get(path)
    }

    /// Paths whose cached entries satisfy the predicate.
    pub fn get_filtered_assets<F>(&self, predicate: F) -> Vec<String>
    where
        F: Fn(&StatusEntry) -> bool,
    {
        self.engine.cache.filtered(predicate)
    }

    /// Toggle whether these paths' status requests include a server
    /// round-trip.
    pub fn set_status_request_rule<S: AsRef<str>>(&self, paths: &[S], remote: bool) {
        self.engine.queue.set_remote_rule(paths, remote);
    }

    /// Drop cached entries for paths that no longer exist as assets.
    pub fn forget<S: AsRef<str>>(&self, paths: &[S]) {
        self.engine.cache.remove(paths);
    }

    /// Drop the whole status cache.
    pub fn clear_status_cache(&self) {
        self.engine.cache.clear();
    }

    /// Run one refresh cycle on the calling thread.
    ///
    /// The background loop calls this on its own cadence; it is public so
    /// one-shot callers and tests can advance the engine deterministically.
    pub fn refresh_once(&self) {
        self.engine.refresh_once();
    }

    /// Full-tree status refresh, local or including the server.
    ///
    /// Expensive, so it takes the operation lock like a mutating command.
    pub fn refresh_all(&self, remote: bool) -> Result<bool> {
        if !self.is_active() {
            return Ok(false);
        }
        let level = if remote {
            ReflectionLevel::Remote
        } else {
            ReflectionLevel::Local
        };
        let invocation = self.engine.status_invocation(None, level);
        let listing = self.execute_locked(invocation)?;
        let parsed = parse_status_listing(&listing.stdout, level)?;
        self.engine.cache.set_many(parsed.clone());
        self.engine.notify_status_completed(&parsed);
        Ok(true)
    }

    // === Notifications ===

    /// Register a status-completed observer, fired after each successful
    /// cache merge. At-least-once per real event, no cross-batch ordering.
    pub fn on_status_completed<F>(&self, listener: F)
    where
        F: Fn(&[StatusEntry]) + Send + Sync + 'static,
    {
        self.engine
            .status_listeners
            .lock()
            .expect("status listeners poisoned")
            .push(Box::new(listener));
    }

    /// Register a per-output-line progress observer for long-running
    /// operations.
    pub fn on_progress<F>(&self, listener: F)
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.engine
            .progress_listeners
            .lock()
            .expect("progress listeners poisoned")
            .push(Box::new(listener));
    }

    // === Operation API ===

    /// Bring paths up to date from the server.
    pub fn update<S: AsRef<str>>(&self, paths: &[S]) -> Result<bool> {
        let targets = normalize_targets(paths);
        if targets.is_empty() {
            return Ok(true);
        }
        let invocation = self
            .invocation("update")
            .arg("--accept")
            .arg("postpone")
            .targets(&targets);
        self.run_operation(invocation, &targets)
    }

    /// Commit paths with an optional log message.
    pub fn commit<S: AsRef<str>>(&self, paths: &[S], message: Option<&str>) -> Result<bool> {
        let targets = normalize_targets(paths);
        if targets.is_empty() {
            return Ok(true);
        }
        let invocation = self
            .invocation("commit")
            .arg("--message")
            .arg(message.unwrap_or(""))
            .targets(&targets);
        self.run_operation(invocation, &targets)
    }

    /// Schedule unversioned paths for addition.
    pub fn add<S: AsRef<str>>(&self, paths: &[S]) -> Result<bool> {
        let targets = normalize_targets(paths);
        if targets.is_empty() {
            return Ok(true);
        }
        let invocation = self.invocation("add").targets(&targets);
        self.run_operation(invocation, &targets)
    }

    /// Discard local modifications.
    pub fn revert<S: AsRef<str>>(&self, paths: &[S]) -> Result<bool> {
        let targets = normalize_targets(paths);
        if targets.is_empty() {
            return Ok(true);
        }
        let invocation = self.invocation("revert").targets(&targets);
        self.run_operation(invocation, &targets)
    }

    /// Schedule paths for deletion.
    pub fn delete<S: AsRef<str>>(&self, paths: &[S], mode: OperationMode) -> Result<bool> {
        let targets = normalize_targets(paths);
        if targets.is_empty() {
            return Ok(true);
        }
        let invocation = self
            .invocation("delete")
            .arg_if(mode == OperationMode::Force, "--force")
            .targets(&targets);
        self.run_operation(invocation, &targets)
    }

    /// Acquire repository locks; `Force` steals an existing lock.
    pub fn get_lock<S: AsRef<str>>(&self, paths: &[S], mode: OperationMode) -> Result<bool> {
        let targets = normalize_targets(paths);
        if targets.is_empty() {
            return Ok(true);
        }
        let invocation = self
            .invocation("lock")
            .arg_if(mode == OperationMode::Force, "--force")
            .targets(&targets);
        self.run_operation(invocation, &targets)
    }

    /// Release repository locks held by this working copy.
    pub fn release_lock<S: AsRef<str>>(&self, paths: &[S]) -> Result<bool> {
        let targets = normalize_targets(paths);
        if targets.is_empty() {
            return Ok(true);
        }
        let invocation = self.invocation("unlock").targets(&targets);
        self.run_operation(invocation, &targets)
    }

    /// Put paths into a named changelist.
    pub fn add_to_changelist<S: AsRef<str>>(&self, paths: &[S], name: &str) -> Result<bool> {
        let targets = normalize_targets(paths);
        if targets.is_empty() {
            return Ok(true);
        }
        let invocation = self.invocation("changelist").arg(name).targets(&targets);
        self.run_operation(invocation, &targets)
    }

    /// Remove paths from whatever changelist holds them.
    pub fn remove_from_changelist<S: AsRef<str>>(&self, paths: &[S]) -> Result<bool> {
        let targets = normalize_targets(paths);
        if targets.is_empty() {
            return Ok(true);
        }
        let invocation = self
            .invocation("changelist")
            .arg("--remove")
            .targets(&targets);
        self.run_operation(invocation, &targets)
    }

    /// Check out a repository URL into a directory.
    pub fn checkout(&self, url: &str, directory: &str) -> Result<bool> {
        let target = normalize_path(directory);
        let invocation = self
            .invocation("checkout")
            .arg(url)
            .targets(&[target.as_str()]);
        self.run_operation(invocation, std::slice::from_ref(&target))
    }

    /// Move an asset; re-requests status for both source and destination.
    pub fn move_asset(&self, from: &str, to: &str) -> Result<bool> {
        let from = normalize_path(from);
        let to = normalize_path(to);
        let invocation = self
            .invocation("move")
            .targets(&[from.as_str(), to.as_str()]);
        self.run_operation(invocation, &[from, to])
    }

    /// Resolve conflicted paths by policy; `Ignore` is a no-op success.
    pub fn resolve<S: AsRef<str>>(&self, paths: &[S], policy: ResolvePolicy) -> Result<bool> {
        let targets = normalize_targets(paths);
        if targets.is_empty() || policy == ResolvePolicy::Ignore {
            return Ok(true);
        }
        let accept = match policy {
            ResolvePolicy::Ours => "mine-full",
            ResolvePolicy::Theirs => "theirs-full",
            ResolvePolicy::Ignore => unreachable!(),
        };
        let invocation = self
            .invocation("resolve")
            .arg("--accept")
            .arg(accept)
            .targets(&targets);
        self.run_operation(invocation, &targets)
    }

    /// Release stale working-copy locks after an interrupted operation.
    pub fn cleanup(&self) -> Result<bool> {
        let invocation = self.invocation("cleanup");
        self.run_operation(invocation, &[])
    }

    // === Internals ===

    fn invocation(&self, subcommand: &str) -> SvnInvocation {
        SvnInvocation::new(
            &self.engine.config.svn_program,
            subcommand,
            &self.engine.config.working_copy,
        )
    }

    /// Execute under the operation-active lock, flagging `is_ready`.
    fn execute_locked(&self, invocation: SvnInvocation) -> Result<CommandResult> {
        let _guard = self.engine.op_lock.lock().expect("operation lock poisoned");
        self.engine.op_in_flight.store(true, Ordering::SeqCst);
        let outcome = executor::execute(
            &invocation,
            Some(&|line: &str| self.engine.notify_progress(line)),
        );
        self.engine.op_in_flight.store(false, Ordering::SeqCst);
        outcome?.into_failure_check()
    }

    fn run_operation(&self, invocation: SvnInvocation, affected: &[String]) -> Result<bool> {
        if !self.is_active() {
            log::debug!("engine inactive, skipping {}", invocation.display_line());
            return Ok(false);
        }
        self.execute_locked(invocation)?;
        if !affected.is_empty() {
            self.request_status(affected);
        }
        Ok(true)
    }
}

impl Drop for SvnClient {
    fn drop(&mut self) {
        self.stop();
        self.refresh.join();
    }
}

fn normalize_targets<S: AsRef<str>>(paths: &[S]) -> Vec<String> {
    paths
        .iter()
        .map(|p| normalize_path(p.as_ref()))
        .filter(|p| !p.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::status::FileState;

    fn test_client() -> SvnClient {
        SvnClient::new(BridgeConfig {
            svn_program: "svn-bridge-test-stub".to_string(),
            working_copy: std::path::PathBuf::from("/tmp"),
            refresh_interval: std::time::Duration::from_secs(60),
        })
    }

    fn parsed(path: &str, state: FileState) -> StatusEntry {
        StatusEntry {
            state,
            ..StatusEntry::default_for(path)
        }
    }

    #[test]
    fn test_merge_batch_fills_unlisted_paths_as_clean() {
        let batch = vec!["a.txt".to_string(), "b.txt".to_string()];
        let listing = vec![parsed("a.txt", FileState::Modified)];
        let merged = merge_batch(&batch, listing, ReflectionLevel::Local);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].state, FileState::Modified);
        assert_eq!(merged[1].path, "b.txt");
        assert_eq!(merged[1].state, FileState::None);
        assert_eq!(merged[1].reflection, ReflectionLevel::Local);
    }

    #[test]
    fn test_merge_batch_keeps_extra_listed_entries() {
        let batch = vec!["dir".to_string()];
        let listing = vec![
            parsed("dir", FileState::Modified),
            parsed("dir/child.txt", FileState::Added),
        ];
        let merged = merge_batch(&batch, listing, ReflectionLevel::Local);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_merge_batch_is_idempotent() {
        let batch = vec!["a.txt".to_string(), "b.txt".to_string()];
        let listing = vec![parsed("a.txt", FileState::Modified)];
        let once = merge_batch(&batch, listing.clone(), ReflectionLevel::Local);
        let twice = merge_batch(&batch, listing, ReflectionLevel::Local);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_operations_noop_while_inactive() {
        let client = test_client();
        assert!(!client.is_active());
        // Never launches a process, so a bogus program name is harmless.
        assert!(!client.update(&["a.txt"]).unwrap());
        assert!(!client.cleanup().unwrap());
        assert!(!client.refresh_all(false).unwrap());
    }

    #[test]
    fn test_empty_path_list_is_noop_success() {
        let client = test_client();
        client.engine.active.store(true, Ordering::SeqCst);
        let empty: [&str; 0] = [];
        assert!(client.delete(&empty, OperationMode::Force).unwrap());
        assert!(client.commit(&empty, Some("msg")).unwrap());
        assert!(client.get_lock(&empty, OperationMode::Normal).unwrap());
    }

    #[test]
    fn test_resolve_ignore_short_circuits() {
        let client = test_client();
        client.engine.active.store(true, Ordering::SeqCst);
        // Would fail loudly if it tried to launch the configured program.
        assert!(client
            .resolve(&["conflicted.txt"], ResolvePolicy::Ignore)
            .unwrap());
    }

    #[test]
    fn test_request_status_inactive_is_noop() {
        let client = test_client();
        client.request_status(&["a.txt"]);
        assert!(client.engine.queue.is_idle());
        assert_eq!(client.get_asset_status("a.txt").reflection, ReflectionLevel::None);
    }

    #[test]
    fn test_request_status_marks_pending() {
        let client = test_client();
        client.engine.active.store(true, Ordering::SeqCst);
        client.request_status(&["a.txt"]);
        let entry = client.get_asset_status("a.txt");
        assert_eq!(entry.state, FileState::Unknown);
        assert_eq!(entry.reflection, ReflectionLevel::Pending);
        assert!(!client.engine.queue.is_idle());
    }

    #[test]
    fn test_is_ready_tracks_active_flag() {
        let client = test_client();
        assert!(!client.is_ready());
        client.engine.active.store(true, Ordering::SeqCst);
        assert!(client.is_ready());
        client.engine.op_in_flight.store(true, Ordering::SeqCst);
        assert!(!client.is_ready());
    }
}
