//! Error types for Randflake Core.

use thiserror::Error;

/// Errors raised by the pure primitives: cipher, layout, codec and secrets.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("sparx64: key must be 16 bytes (128 bits), got {len}")]
    InvalidKey { len: usize },

    #[error("sparx64: block must be {expected} bytes, got {got}")]
    InvalidBuffer { expected: usize, got: usize },

    #[error("invalid secret, secret must be 16 bytes long, got {len}")]
    InvalidSecret { len: usize },

    #[error("invalid hex secret: {0}")]
    InvalidHex(String),

    #[error("invalid id")]
    InvalidId,

    #[error("node id {0} out of range")]
    InvalidNode(i64),

    #[error("timestamp offset {0} does not fit the timestamp field")]
    TimestampOutOfRange(u64),

    #[error("sequence {0} does not fit the sequence field")]
    SequenceOutOfRange(u64),
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
