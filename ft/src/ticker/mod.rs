//! Frame-coalescing ticker
//!
//! Batches requested callbacks into a fixed set of ordered lanes and runs all
//! pending work exactly once per animation frame:
//! - **Dedup:** a later request for the same key in the same lane supersedes
//!   the earlier one, and moves to the position of the *last* registration.
//! - **Ordering:** lanes flush in ascending index order; within a lane,
//!   entries flush in registration order.
//! - **One frame per cycle:** any number of requests between two flushes
//!   schedule exactly one frame with the provider.
//! - **Safe re-entry:** a callback may register more work during its own
//!   flush; that work lands in a freshly scheduled frame, never the current
//!   one, and is never dropped.

mod config;
mod core;
mod error;
mod lane;

pub use config::TickerConfig;
pub use self::core::{Ticker, TickerStats};
pub use error::TickerError;
pub use lane::{TickCallback, TickKey};
