//! # Randflake Core
//!
//! Pure primitives for Randflake identifiers: the SPARX-64/128 permutation,
//! the raw-value bit layout, and the base32hex codec.
//!
//! This crate holds no clocks and no shared mutable state. Everything here
//! is deterministic computation over 64-bit values.
//!
//! ## Key Types
//!
//! - [`Sparx64`] - Keyed bijection over 8-byte blocks
//! - [`RawValue`] - Unencrypted (timestamp offset, node id, sequence) tuple
//! - [`RandflakeId`] - Public, encrypted identifier
//! - [`Secret`] - 16-byte key material, zeroed on drop
//!
//! ## Data Flow
//!
//! ```text
//! RawValue --Sparx64::encrypt_block--> RandflakeId --codec::encode_string--> "3vgoe12ccb8gh"
//! ```

pub mod codec;
pub mod error;
pub mod layout;
pub mod secret;
pub mod sparx64;
pub mod types;

pub use codec::{decode_string, encode_string};
pub use error::{CoreError, Result};
pub use layout::{
    RawValue, EPOCH_OFFSET, MAX_NODE, MAX_SEQUENCE, MAX_TIMESTAMP, NODE_BITS, SEQUENCE_BITS,
    TIMESTAMP_BITS,
};
pub use secret::Secret;
pub use sparx64::{Sparx64, BLOCK_SIZE, KEY_SIZE};
pub use types::RandflakeId;
