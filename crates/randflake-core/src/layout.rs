//! Bit layout of the raw (pre-encryption) identifier value.
//!
//! ```text
//!  63                34 33             17 16              0
//! +--------------------+----------------+-----------------+
//! |  timestamp offset  |    node id     |    sequence     |
//! |      30 bits       |    17 bits     |     17 bits     |
//! +--------------------+----------------+-----------------+
//! ```
//!
//! The timestamp offset counts seconds since [`EPOCH_OFFSET`].

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Unix second of the Randflake epoch: Sunday, October 27, 2024 3:33:20 AM UTC.
pub const EPOCH_OFFSET: i64 = 1_730_000_000;

/// 30 bits for timestamp (lifetime of 34 years).
pub const TIMESTAMP_BITS: u32 = 30;
/// 17 bits for node id (max 131072 nodes).
pub const NODE_BITS: u32 = 17;
/// 17 bits for sequence (max 131072 identifiers per second).
pub const SEQUENCE_BITS: u32 = 17;

/// Last representable unix second: Tuesday, November 5, 2058 5:10:23 PM UTC.
pub const MAX_TIMESTAMP: i64 = EPOCH_OFFSET + (1 << TIMESTAMP_BITS) - 1;
/// 131071
pub const MAX_NODE: i64 = (1 << NODE_BITS) - 1;
/// 131071
pub const MAX_SEQUENCE: i64 = (1 << SEQUENCE_BITS) - 1;

pub const TIMESTAMP_SHIFT: u32 = NODE_BITS + SEQUENCE_BITS;
pub const NODE_SHIFT: u32 = SEQUENCE_BITS;

const MAX_TIMESTAMP_OFFSET: u64 = (1 << TIMESTAMP_BITS) - 1;
const NODE_MASK: u64 = MAX_NODE as u64;
const SEQUENCE_MASK: u64 = MAX_SEQUENCE as u64;

/// The unencrypted 64-bit tuple of (timestamp offset, node id, sequence).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawValue(u64);

impl RawValue {
    /// Pack the three fields.
    ///
    /// Every field is checked against its width; nothing is silently truncated.
    pub fn pack(timestamp_offset: u64, node_id: u64, sequence: u64) -> Result<Self> {
        if timestamp_offset > MAX_TIMESTAMP_OFFSET {
            return Err(CoreError::TimestampOutOfRange(timestamp_offset));
        }
        if node_id > NODE_MASK {
            return Err(CoreError::InvalidNode(node_id as i64));
        }
        if sequence > SEQUENCE_MASK {
            return Err(CoreError::SequenceOutOfRange(sequence));
        }
        Ok(Self(
            (timestamp_offset << TIMESTAMP_SHIFT) | (node_id << NODE_SHIFT) | sequence,
        ))
    }

    /// Split into `(timestamp_offset, node_id, sequence)`.
    pub const fn unpack(self) -> (u64, u64, u64) {
        (
            self.0 >> TIMESTAMP_SHIFT,
            (self.0 >> NODE_SHIFT) & NODE_MASK,
            self.0 & SEQUENCE_MASK,
        )
    }

    pub const fn from_u64(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// The signed reinterpretation of the raw bits.
    pub const fn as_i64(self) -> i64 {
        self.0 as i64
    }

    pub const fn timestamp_offset(self) -> u64 {
        self.unpack().0
    }

    pub const fn node_id(self) -> u64 {
        self.unpack().1
    }

    pub const fn sequence(self) -> u64 {
        self.unpack().2
    }
}

impl From<RawValue> for u64 {
    fn from(raw: RawValue) -> u64 {
        raw.0
    }
}

impl From<u64> for RawValue {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}
