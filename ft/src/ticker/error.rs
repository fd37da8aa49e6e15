//! Ticker error types

use thiserror::Error;

/// Errors surfaced by the ticker
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TickerError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("lane index {index} out of range ({num_lanes} lanes)")]
    LaneOutOfRange { index: usize, num_lanes: usize },
}

impl TickerError {
    /// Check if this is a lane addressing error
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, TickerError::LaneOutOfRange { .. })
    }
}
