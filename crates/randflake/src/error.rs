//! Error types for the generator.

use randflake_core::CoreError;
use thiserror::Error;

/// Errors returned by [`Generator`](crate::Generator) construction,
/// generation and inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RandflakeError {
    /// Node id outside `[0, MAX_NODE]`.
    #[error("randflake: invalid node id, node id must be between 0 and 131071")]
    InvalidNode,

    /// Malformed lease at construction, or current time outside the lease.
    #[error("randflake: invalid lease, lease expired or not started yet")]
    InvalidLease,

    /// Lease end beyond the last representable timestamp.
    #[error("randflake: the randflake id is dead after 34 years of lifetime")]
    RandflakeDead,

    #[error("randflake: invalid secret, secret must be 16 bytes long")]
    InvalidSecret,

    /// Sequence space for the current second is used up. Transient.
    #[error("randflake: resource exhausted (generator can't handle current throughput, try using multiple randflake instances)")]
    ResourceExhausted,

    /// The clock went backwards past the last rollover. Fatal.
    #[error("randflake: timestamp consistency violation, the current time is less than the last time")]
    ConsistencyViolation,

    #[error("randflake: invalid id")]
    InvalidId,
}

impl RandflakeError {
    /// Worth retrying later or on another generator.
    pub fn is_transient(&self) -> bool {
        matches!(self, RandflakeError::ResourceExhausted)
    }

    /// The generator's ordering guarantee no longer holds.
    pub fn is_fatal(&self) -> bool {
        matches!(self, RandflakeError::ConsistencyViolation)
    }
}

impl From<CoreError> for RandflakeError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::InvalidKey { .. }
            | CoreError::InvalidSecret { .. }
            | CoreError::InvalidHex(_) => RandflakeError::InvalidSecret,
            CoreError::InvalidId | CoreError::InvalidBuffer { .. } => RandflakeError::InvalidId,
            CoreError::InvalidNode(_) => RandflakeError::InvalidNode,
            CoreError::TimestampOutOfRange(_) | CoreError::SequenceOutOfRange(_) => {
                RandflakeError::InvalidLease
            }
        }
    }
}

/// Result type for generator operations.
pub type Result<T> = std::result::Result<T, RandflakeError>;
