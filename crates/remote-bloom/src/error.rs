//! Error types for the remote Bloom filter

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when building or using a filter
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("Bit array too large: {required_bits:.0} bits > {max_bits}")]
    CapacityExceeded { required_bits: f64, max_bits: u32 },

    #[error("Invalid filter parameters: {0}")]
    InvalidParameters(String),

    #[error("Bit store error: {0}")]
    Transport(#[from] StoreError),

    #[error("Filter {identifier} used after release")]
    UseAfterRelease { identifier: String },
}

/// Errors from bit store backends
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("{operation} timed out after {timeout:?}")]
    Timeout {
        operation: &'static str,
        timeout: Duration,
    },

    #[error("Offset {offset} outside addressable range of {len} bits")]
    OutOfRange { offset: u64, len: u64 },

    #[error("Command error: {0}")]
    CommandError(String),

    #[error("Unexpected reply: {0}")]
    UnexpectedReply(String),
}

impl FilterError {
    /// True for failures of the store call itself (including timeouts)
    pub fn is_transport(&self) -> bool {
        matches!(self, FilterError::Transport(_))
    }

    /// True if the store call hit its deadline
    pub fn is_timeout(&self) -> bool {
        matches!(self, FilterError::Transport(StoreError::Timeout { .. }))
    }
}
