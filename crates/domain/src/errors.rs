//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    /// Instant and value columns have different lengths
    #[error("Series length mismatch: {instants} instants but {values} values")]
    LengthMismatch { instants: usize, values: usize },

    /// A sample is earlier than the one before it
    #[error("Series is not ordered by instant: sample {index} precedes its predecessor")]
    UnorderedSeries { index: usize },

    /// A window duration is negative
    #[error("Invalid window: {0}")]
    InvalidWindow(String),

    /// Unknown IANA timezone name
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),
}

impl DomainError {
    /// Create a length mismatch error
    pub const fn length_mismatch(instants: usize, values: usize) -> Self {
        Self::LengthMismatch { instants, values }
    }
}
