//! Strong type for public identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::codec;
use crate::error::CoreError;

/// A public Randflake identifier: the encrypted form of a [`RawValue`].
///
/// Opaque to callers. Renders as base32hex via `Display` and parses back via
/// `FromStr`. Serializes as the signed 64-bit integer.
///
/// [`RawValue`]: crate::layout::RawValue
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RandflakeId(pub i64);

impl RandflakeId {
    pub const fn from_i64(id: i64) -> Self {
        Self(id)
    }

    /// Reinterpret an unsigned bit pattern.
    pub const fn from_u64(id: u64) -> Self {
        Self(id as i64)
    }

    pub const fn as_i64(self) -> i64 {
        self.0
    }

    /// The unsigned reinterpretation of the identifier bits.
    pub const fn as_u64(self) -> u64 {
        self.0 as u64
    }

    /// Base32hex text form.
    pub fn to_base32hex(self) -> String {
        codec::encode_string(self.0)
    }

    /// Parse from base32hex.
    pub fn from_base32hex(s: &str) -> Result<Self, CoreError> {
        codec::decode_string(s).map(Self)
    }
}

impl fmt::Debug for RandflakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RandflakeId({})", self.to_base32hex())
    }
}

impl fmt::Display for RandflakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base32hex())
    }
}

impl FromStr for RandflakeId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_base32hex(s)
    }
}

impl From<i64> for RandflakeId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<RandflakeId> for i64 {
    fn from(id: RandflakeId) -> i64 {
        id.0
    }
}
