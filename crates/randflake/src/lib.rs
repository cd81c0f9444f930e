//! # Randflake
//!
//! Globally unique, unpredictable 64-bit identifiers for distributed callers,
//! without central coordination beyond an externally issued node lease.
//!
//! ## Overview
//!
//! Each identifier is a raw `(timestamp, node id, sequence)` tuple pushed
//! through a keyed 64-bit permutation (SPARX-64/128). Identifiers are unique
//! because the raw values are, and opaque because the permutation hides the
//! counter structure. With the secret, [`Generator::inspect`] recovers the
//! fields again.
//!
//! - **Node id**: assigned by a lease authority, unique within the lease window
//! - **Lease**: `[lease_start, lease_end]` in unix seconds; generation outside it fails
//! - **Sequence**: per-second counter, up to 131072 identifiers per second per generator
//!
//! ## Usage
//!
//! ```rust,no_run
//! use randflake::Generator;
//!
//! let now = 1_760_000_000;
//! let secret = [0u8; 16];
//! let generator = Generator::new(1, now - 60, now + 3600, &secret).unwrap();
//!
//! let id = generator.generate().unwrap();
//! let text = generator.generate_string().unwrap();
//!
//! let fields = generator.inspect(id).unwrap();
//! println!("{} {} {} {}", text, fields.timestamp, fields.node_id, fields.sequence);
//!
//! // The lease authority renewed our lease.
//! generator.update_lease(now - 60, now + 7200);
//! ```
//!
//! ## Re-exports
//!
//! `randflake::core` is the primitives crate (cipher, layout, codec).

pub mod clock;
pub mod config;
pub mod error;
pub mod generator;

pub use randflake_core as core;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::GeneratorConfig;
pub use error::{RandflakeError, Result};
pub use generator::{Generator, Inspection};

pub use randflake_core::{
    RandflakeId, RawValue, Secret, Sparx64, EPOCH_OFFSET, MAX_NODE, MAX_SEQUENCE, MAX_TIMESTAMP,
    NODE_BITS, SEQUENCE_BITS, TIMESTAMP_BITS,
};

/// Encode an identifier as base32hex.
pub fn encode_string(id: i64) -> String {
    randflake_core::encode_string(id)
}

/// Decode a base32hex identifier.
pub fn decode_string(s: &str) -> Result<i64> {
    Ok(randflake_core::decode_string(s)?)
}
