//! Host-driven frame provider
//!
//! For embedding the ticker in an existing event loop: the host decides when
//! a frame happens and calls [`ManualFrameProvider::fire`] with the current
//! time. Also the deterministic driver used throughout the test suite.

use std::sync::{Mutex, PoisonError};

use tracing::debug;

use super::{FrameCallback, FrameHandle, FrameProvider};

/// Internal state protected by mutex
#[derive(Default)]
struct ManualInner {
    pending: Vec<FrameCallback>,
    next_handle: u64,
    scheduled: u64,
}

/// Frame provider driven by explicit [`fire`](ManualFrameProvider::fire) calls.
#[derive(Default)]
pub struct ManualFrameProvider {
    inner: Mutex<ManualInner>,
}

impl ManualFrameProvider {
    /// Create a new provider with no pending callbacks
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_inner(&self) -> std::sync::MutexGuard<'_, ManualInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Total number of `schedule` calls received so far
    pub fn scheduled_count(&self) -> u64 {
        self.lock_inner().scheduled
    }

    /// Number of callbacks waiting for the next `fire`
    pub fn pending_count(&self) -> usize {
        self.lock_inner().pending.len()
    }

    /// Run every pending callback with `time` (milliseconds).
    ///
    /// Callbacks scheduled while firing are queued for the next call, so the
    /// host must keep calling `fire` as long as work keeps being scheduled.
    /// Callers are responsible for passing non-decreasing times.
    pub fn fire(&self, time: f64) {
        let pending = std::mem::take(&mut self.lock_inner().pending);
        debug!(time, count = pending.len(), "ManualFrameProvider::fire: running pending callbacks");
        for on_frame in pending {
            on_frame(time);
        }
    }
}

impl FrameProvider for ManualFrameProvider {
    fn schedule(&self, on_frame: FrameCallback) -> FrameHandle {
        let mut inner = self.lock_inner();
        let handle = FrameHandle::new(inner.next_handle);
        inner.next_handle += 1;
        inner.scheduled += 1;
        inner.pending.push(on_frame);
        debug!(?handle, "ManualFrameProvider::schedule: queued frame callback");
        handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_fire_runs_pending_once() {
        let provider = ManualFrameProvider::new();
        let counter = Arc::new(AtomicU32::new(0));

        let c = counter.clone();
        provider.schedule(Box::new(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        }));
        assert_eq!(provider.pending_count(), 1);

        provider.fire(16.0);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert_eq!(provider.pending_count(), 0);

        // A second fire has nothing left to run.
        provider.fire(32.0);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_schedule_during_fire_waits_for_next_fire() {
        let provider = Arc::new(ManualFrameProvider::new());
        let counter = Arc::new(AtomicU32::new(0));

        let p = provider.clone();
        let c = counter.clone();
        provider.schedule(Box::new(move |_| {
            let c2 = c.clone();
            p.schedule(Box::new(move |_| {
                c2.fetch_add(1, Ordering::SeqCst);
            }));
        }));

        provider.fire(16.0);
        assert_eq!(counter.load(Ordering::SeqCst), 0);
        assert_eq!(provider.pending_count(), 1);

        provider.fire(32.0);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_handles_are_distinct() {
        let provider = ManualFrameProvider::new();
        let a = provider.schedule(Box::new(|_| {}));
        let b = provider.schedule(Box::new(|_| {}));
        assert_ne!(a, b);
        assert_eq!(provider.scheduled_count(), 2);
    }
}
