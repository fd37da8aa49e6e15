//! Tokio-backed frame provider
//!
//! Each `schedule` call spawns a task that sleeps until the next frame
//! boundary (a fixed interval, aligned to multiples of that interval since
//! provider creation) and invokes the callback with elapsed milliseconds.
//! Must be used from within a tokio runtime.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use tracing::debug;

use super::{FrameCallback, FrameHandle, FrameProvider};

/// Frame provider that ticks at a fixed interval on the tokio runtime.
pub struct IntervalFrameProvider {
    interval: Duration,
    start: Instant,
    next_handle: AtomicU64,
}

impl IntervalFrameProvider {
    /// 60 frames per second
    pub const DEFAULT_INTERVAL: Duration = Duration::from_nanos(16_666_667);

    /// Create a provider ticking every `interval`
    pub fn new(interval: Duration) -> Self {
        Self {
            // A zero interval would divide by zero when aligning to frame
            // boundaries; clamp to the smallest representable tick.
            interval: interval.max(Duration::from_nanos(1)),
            start: Instant::now(),
            next_handle: AtomicU64::new(0),
        }
    }

    /// Time remaining until the next frame boundary
    fn until_next_frame(&self) -> Duration {
        let interval = self.interval.as_nanos();
        let elapsed = self.start.elapsed().as_nanos();
        let remainder = (interval - elapsed % interval) as u64;
        Duration::from_nanos(remainder)
    }
}

impl Default for IntervalFrameProvider {
    fn default() -> Self {
        Self::new(Self::DEFAULT_INTERVAL)
    }
}

impl FrameProvider for IntervalFrameProvider {
    fn schedule(&self, on_frame: FrameCallback) -> FrameHandle {
        let handle = FrameHandle::new(self.next_handle.fetch_add(1, Ordering::Relaxed));
        let delay = self.until_next_frame();
        let start = self.start;
        debug!(?handle, ?delay, "IntervalFrameProvider::schedule: spawning frame task");

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Instant is monotonic, so timestamps never decrease across frames.
            let time = start.elapsed().as_secs_f64() * 1000.0;
            on_frame(time);
        });

        handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::Mutex;

    #[tokio::test]
    async fn test_callback_runs_with_elapsed_millis() {
        let provider = IntervalFrameProvider::new(Duration::from_millis(5));
        let times = Arc::new(Mutex::new(Vec::new()));

        let t = times.clone();
        provider.schedule(Box::new(move |time| {
            t.lock().unwrap().push(time);
        }));

        tokio::time::sleep(Duration::from_millis(50)).await;

        let times = times.lock().unwrap();
        assert_eq!(times.len(), 1, "callback should run exactly once");
        assert!(times[0] > 0.0);
    }

    #[tokio::test]
    async fn test_timestamps_non_decreasing() {
        let provider = Arc::new(IntervalFrameProvider::new(Duration::from_millis(5)));
        let times = Arc::new(Mutex::new(Vec::new()));

        for _ in 0..3 {
            let t = times.clone();
            provider.schedule(Box::new(move |time| {
                t.lock().unwrap().push(time);
            }));
            tokio::time::sleep(Duration::from_millis(20)).await;
        }

        let times = times.lock().unwrap();
        assert_eq!(times.len(), 3);
        assert!(times.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_zero_interval_clamped() {
        let provider = IntervalFrameProvider::new(Duration::ZERO);
        // Must not divide by zero.
        let _ = provider.until_next_frame();
    }
}
