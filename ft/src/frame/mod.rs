//! Frame scheduling boundary
//!
//! A [`FrameProvider`] wakes the ticker once per display refresh. The ticker
//! treats it as a black box: schedule a wakeup, get an opaque handle back,
//! wait to be called with a timestamp. Scheduled frames are never cancelled;
//! the ticker only deduplicates its own scheduling requests.

mod interval;
mod manual;

pub use interval::IntervalFrameProvider;
pub use manual::ManualFrameProvider;

/// Callback invoked by a [`FrameProvider`] at the next frame, with a
/// monotonically non-decreasing timestamp in milliseconds.
pub type FrameCallback = Box<dyn FnOnce(f64) + Send>;

/// Opaque handle to a scheduled frame request.
///
/// The ticker holds it only as evidence that a frame is in flight; the value
/// is never inspected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

impl FrameHandle {
    /// Create a handle from a provider-chosen identifier
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

/// One-shot asynchronous frame scheduling primitive.
///
/// Contract: `on_frame` is invoked at most once per `schedule` call,
/// asynchronously (never from inside `schedule` itself), with timestamps that
/// never decrease across calls.
pub trait FrameProvider: Send + Sync {
    /// Schedule `on_frame` to run at the next display refresh opportunity.
    fn schedule(&self, on_frame: FrameCallback) -> FrameHandle;
}
