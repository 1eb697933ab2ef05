//! Background refresh loop mechanics.
//!
//! A [`RefreshLoop`] owns one dedicated thread that ticks at a fixed
//! cadence and invokes the engine's refresh callback while running. The
//! loop is a plain state machine {Stopped, Running} with a cooperative
//! stop flag: stopping never cancels an in-flight command, it only
//! prevents further ticks; the thread is joined on teardown.
//!
//! # Public API
//! - [`RefreshLoop`]: Start/stop/join the periodic tick thread
//! - [`MAX_BATCH_SIZE`]: Upper bound on targets per status command
//! - [`split_batches`]: Chunk a drained batch into sub-batches
//!
//! All state transitions are idempotent: calling `start` twice spawns one
//! thread, and `stop`/`join` are safe to repeat.

use std::sync::{Arc, Condvar, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

/// Default cadence between refresh cycles.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_millis(200);

/// Maximum asset paths resolved by one external command invocation.
///
/// Larger drained batches are split into independent sequential
/// sub-batches; a failing sub-batch never blocks the ones after it.
pub const MAX_BATCH_SIZE: usize = 20;

/// Chunk a drained batch into sub-batches of at most [`MAX_BATCH_SIZE`].
pub fn split_batches(paths: &[String]) -> Vec<&[String]> {
    paths.chunks(MAX_BATCH_SIZE).collect()
}

/// Cancellable interval timer: state under a mutex plus a condvar, so a
/// stop request wakes the sleeping thread instead of waiting out the
/// interval. The epoch lets a restarted loop invalidate a stale thread
/// that was stopped but has not observed it yet.
#[derive(Debug, Default)]
struct LoopInner {
    running: bool,
    epoch: u64,
}

#[derive(Debug, Default)]
struct LoopState {
    inner: Mutex<LoopInner>,
    wakeup: Condvar,
}

/// Periodic tick thread with cooperative stop.
#[derive(Debug, Default)]
pub struct RefreshLoop {
    state: Arc<LoopState>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl RefreshLoop {
    pub fn new() -> Self {
        RefreshLoop::default()
    }

    /// Transition Stopped → Running and begin the perpetual cycle.
    ///
    /// Each cycle waits `interval` (or until stopped), re-checks the flag,
    /// then invokes `tick`. A second `start` while running is a no-op.
    pub fn start<F>(&self, interval: Duration, tick: F)
    where
        F: Fn() + Send + 'static,
    {
        let my_epoch = {
            let mut inner = self.state.inner.lock().expect("refresh loop poisoned");
            if inner.running {
                return;
            }
            inner.running = true;
            inner.epoch += 1;
            inner.epoch
        };
        log::debug!("refresh loop starting ({}ms cadence)", interval.as_millis());
        let state = Arc::clone(&self.state);
        let handle = std::thread::spawn(move || {
            loop {
                let guard = state.inner.lock().expect("refresh loop poisoned");
                if !guard.running || guard.epoch != my_epoch {
                    break;
                }
                let (guard, _timeout) = state
                    .wakeup
                    .wait_timeout(guard, interval)
                    .expect("refresh loop poisoned");
                if !guard.running || guard.epoch != my_epoch {
                    break;
                }
                drop(guard);
                tick();
            }
            log::debug!("refresh loop exited");
        });
        // A stale handle here belongs to an epoch that already stopped;
        // dropping it detaches a thread that is on its way out.
        *self.handle.lock().expect("refresh loop handle poisoned") = Some(handle);
    }

    /// Transition Running → Stopped.
    ///
    /// Wakes the sleeping thread but does not cancel a tick already in
    /// progress; the thread exits after finishing it. Safe to call
    /// repeatedly or while stopped.
    pub fn stop(&self) {
        let mut inner = self.state.inner.lock().expect("refresh loop poisoned");
        inner.running = false;
        self.state.wakeup.notify_all();
    }

    pub fn is_running(&self) -> bool {
        self.state.inner.lock().expect("refresh loop poisoned").running
    }

    /// Stop and wait for the current thread incarnation to exit. Idempotent.
    pub fn join(&self) {
        self.stop();
        let handle = self
            .handle
            .lock()
            .expect("refresh loop handle poisoned")
            .take();
        if let Some(handle) = handle {
            let _ = handle.join();
        }
    }
}

impl Drop for RefreshLoop {
    fn drop(&mut self) {
        self.join();
    }
}
