//! Ticker implementation

use std::mem;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, trace};

use crate::frame::{FrameHandle, FrameProvider};

use super::config::TickerConfig;
use super::error::TickerError;
use super::lane::{Lane, TickCallback, TickKey};

/// Ticker counters
#[derive(Debug, Clone, Default)]
pub struct TickerStats {
    /// Total registrations accepted (including superseded ones)
    pub total_requests: u64,
    /// Total cancellations that removed a live registration
    pub total_cancels: u64,
    /// Total frames flushed (including empty flushes)
    pub total_flushes: u64,
    /// Total callbacks invoked
    pub total_invoked: u64,
}

/// Internal state protected by mutex
struct TickerInner<K> {
    /// Ordered lanes; ascending index is the primary execution order
    lanes: Vec<Lane<K>>,

    /// Handle of the in-flight frame request, if any. Used purely as a dedup
    /// flag so that any number of requests between two flushes schedule
    /// exactly one frame.
    pending_frame: Option<FrameHandle>,

    /// Drain scratch, reused across flushes for its capacity. Only populated
    /// mid-flush; callbacks are invoked from this snapshot, never from live
    /// lane state.
    drained: Vec<(K, TickCallback)>,

    /// Statistics
    stats: TickerStats,
}

/// Per-frame callback coalescing ticker.
///
/// Batches requested callbacks into a fixed set of ordered lanes so that all
/// pending work runs exactly once per animation frame: lanes flush in
/// ascending index order, entries within a lane in registration order, and a
/// later request for the same key silently supersedes the earlier one. The
/// classic use is lane 0 for layout reads and lane 1 for layout writes, which
/// pins all reads before all writes no matter the order callers asked.
///
/// The ticker drives a single outstanding request against its
/// [`FrameProvider`]; when the provider fires, every lane is drained and
/// cleared before any callback runs, so a callback may freely re-register
/// work. Such work lands in a freshly scheduled frame, never the one
/// executing. A panicking callback aborts the rest of its flush; the lanes
/// were already cleared, so nothing double-fires on the next frame.
pub struct Ticker<K> {
    config: TickerConfig,
    provider: Arc<dyn FrameProvider>,
    inner: Mutex<TickerInner<K>>,
}

impl<K: TickKey> Ticker<K> {
    /// Create a new ticker with the given configuration and frame provider
    pub fn new(config: TickerConfig, provider: Arc<dyn FrameProvider>) -> Result<Self, TickerError> {
        config.validate()?;
        debug!(num_lanes = config.num_lanes, "Ticker::new: called");

        let lanes = (0..config.num_lanes).map(|_| Lane::new()).collect();
        Ok(Self {
            config,
            provider,
            inner: Mutex::new(TickerInner {
                lanes,
                pending_frame: None,
                drained: Vec::new(),
                stats: TickerStats::default(),
            }),
        })
    }

    /// Number of lanes, fixed at construction
    pub fn num_lanes(&self) -> usize {
        self.config.num_lanes
    }

    fn lock_inner(&self) -> MutexGuard<'_, TickerInner<K>> {
        // Callbacks never run under the lock, so a poisoned lock cannot
        // expose half-drained state.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check_lane(&self, lane: usize) -> Result<(), TickerError> {
        if lane >= self.config.num_lanes {
            return Err(TickerError::LaneOutOfRange {
                index: lane,
                num_lanes: self.config.num_lanes,
            });
        }
        Ok(())
    }

    /// Register `callback` to run on the next frame, keyed within `lane`.
    ///
    /// Supersedes any pending registration for the same key in that lane,
    /// moving it to the back of the lane. Schedules a frame with the provider
    /// if none is in flight; otherwise the registration rides the frame
    /// already scheduled.
    pub fn request(
        self: &Arc<Self>,
        lane: usize,
        key: K,
        callback: impl FnOnce(f64) + Send + 'static,
    ) -> Result<(), TickerError> {
        self.check_lane(lane)?;
        let mut inner = self.lock_inner();
        debug!(lane, ?key, "Ticker::request: called");

        inner.lanes[lane].add(key, Box::new(callback));
        inner.stats.total_requests += 1;

        if inner.pending_frame.is_none() {
            // Checked and set under the same lock as the add, so concurrent
            // requests cannot schedule a second frame.
            let ticker = Arc::clone(self);
            let handle = self.provider.schedule(Box::new(move |time| ticker.step(time)));
            debug!(?handle, "Ticker::request: scheduled next frame");
            inner.pending_frame = Some(handle);
        }

        Ok(())
    }

    /// Cancel the pending registration for `key` in `lane`.
    ///
    /// Silently succeeds if the key is not registered. An already-scheduled
    /// frame still fires even if this empties every lane; the resulting empty
    /// flush is cheap.
    pub fn cancel(&self, lane: usize, key: &K) -> Result<(), TickerError> {
        self.check_lane(lane)?;
        let mut inner = self.lock_inner();

        let removed = inner.lanes[lane].remove(key);
        if removed {
            inner.stats.total_cancels += 1;
        }
        debug!(lane, ?key, removed, "Ticker::cancel: called");
        Ok(())
    }

    /// Number of live registrations across all lanes
    pub fn pending_count(&self) -> usize {
        self.lock_inner().lanes.iter().map(Lane::len).sum()
    }

    /// Get the ticker statistics
    pub fn stats(&self) -> TickerStats {
        self.lock_inner().stats.clone()
    }

    /// Flush one frame: drain every lane, then run the snapshotted callbacks.
    ///
    /// Invoked by the frame provider. Two phases: under the lock, the
    /// pending-frame flag is cleared *first* and every lane is drained in
    /// ascending index order into the scratch buffer, leaving all lanes
    /// empty; then, with the lock released, the snapshots run in order. A
    /// callback that calls [`Ticker::request`] therefore schedules a
    /// genuinely new frame and is never folded into this one, and a
    /// callback's `cancel` cannot reach entries already snapshotted.
    fn step(&self, time: f64) {
        let mut batch = {
            let mut inner = self.lock_inner();
            inner.pending_frame = None;
            inner.stats.total_flushes += 1;

            let mut batch = mem::take(&mut inner.drained);
            for lane in &mut inner.lanes {
                lane.drain_into(&mut batch);
            }
            batch
        };

        debug!(time, count = batch.len(), "Ticker::step: invoking frame callbacks");
        let invoked = batch.len() as u64;
        for (key, callback) in batch.drain(..) {
            trace!(?key, time, "Ticker::step: invoking callback");
            callback(time);
        }

        let mut inner = self.lock_inner();
        inner.stats.total_invoked += invoked;
        // Hand the (now empty) scratch back so the next flush reuses its
        // capacity.
        inner.drained = batch;
    }
}
