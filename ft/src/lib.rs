//! frametick - per-frame callback coalescing
//!
//! A ticker for batching work (typically: measuring then mutating a layout)
//! so that everything pending runs exactly once per animation frame, in a
//! deterministic order. Callers register callbacks under a caller-chosen key
//! within a numbered lane; repeat registrations for the same key coalesce
//! into the newest one, and all of lane 0 runs before any of lane 1,
//! regardless of the order callers asked.
//!
//! # Data Flow
//!
//! ```text
//! request(lane, key, callback) → Lane (dedup by key, insertion-ordered)
//!                                  ↓ one frame scheduled per pending cycle
//! FrameProvider ── on_frame(time) → drain all lanes → invoke snapshots
//! ```
//!
//! # Core Concepts
//!
//! - **Coalescing**: re-requesting a key replaces its callback and moves it
//!   to the back of its lane; exactly one callback runs per key per frame
//! - **Lane ordering**: lanes flush in ascending index order every frame,
//!   pinning categories of work (e.g. reads before writes)
//! - **Snapshot then invoke**: lanes are drained and cleared before any
//!   callback runs, so callbacks can safely schedule the next frame's work
//! - **Pluggable frames**: any [`FrameProvider`] can drive the ticker; a
//!   tokio interval provider and a manually fired provider ship in-crate
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use frametick::{ManualFrameProvider, Ticker, TickerConfig};
//!
//! let provider = Arc::new(ManualFrameProvider::new());
//! let ticker = Arc::new(
//!     Ticker::new(TickerConfig::default(), provider.clone()).expect("valid config"),
//! );
//!
//! // Lane 0 for reads, lane 1 for writes.
//! ticker.request(1, "apply", |time| println!("write at {time}")).unwrap();
//! ticker.request(0, "measure", |time| println!("read at {time}")).unwrap();
//!
//! // The host drives frames; reads run before writes.
//! provider.fire(16.0);
//! ```
//!
//! # Modules
//!
//! - [`ticker`] - the coalescing scheduler: lanes, config, errors
//! - [`frame`] - the frame-scheduling boundary and bundled providers

pub mod frame;
pub mod ticker;

// Re-export commonly used types
pub use frame::{FrameCallback, FrameHandle, FrameProvider, IntervalFrameProvider, ManualFrameProvider};
pub use ticker::{TickCallback, TickKey, Ticker, TickerConfig, TickerError, TickerStats};
