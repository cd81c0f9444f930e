//! The lease-bound identifier generator.
//!
//! A [`Generator`] owns a node id, a lease window and a per-second sequence
//! counter. Each call samples the clock, claims a sequence number with an
//! atomic increment, packs `(now - EPOCH_OFFSET, node_id, sequence)` into a
//! [`RawValue`] and encrypts it into the public identifier.
//!
//! All shared state is lock-free:
//!
//! - `sequence` is bumped with `fetch_add`; when it passes `MAX_SEQUENCE` the
//!   caller tries to claim the rollover for the current second by CAS on
//!   `rollover`, and the winner resets the counter.
//! - `lease_end` only grows, through a CAS loop in [`Generator::update_lease`].
//! - The cipher key schedule is read-only after construction.

use std::cmp::Ordering as CmpOrdering;
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};

use randflake_core::{
    codec, RandflakeId, RawValue, Secret, Sparx64, EPOCH_OFFSET, MAX_NODE, MAX_SEQUENCE,
    MAX_TIMESTAMP,
};
use serde::{Deserialize, Serialize};

use crate::clock::{Clock, SystemClock};
use crate::error::{RandflakeError, Result};

/// The fields recovered from an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Inspection {
    /// Unix second the identifier was generated in.
    pub timestamp: i64,
    pub node_id: i64,
    pub sequence: i64,
}

/// Generates unique, encrypted 64-bit identifiers for one node under one lease.
///
/// Share it by reference (or `Arc`) across threads; every method takes `&self`.
pub struct Generator<C: Clock = SystemClock> {
    lease_start: i64,
    lease_end: AtomicI64,
    node_id: i64,
    sequence: AtomicI64,
    rollover: AtomicI64,
    cipher: Sparx64,
    clock: C,
}

/// Check node id and lease bounds, in the order the errors are reported.
pub(crate) fn validate(node_id: i64, lease_start: i64, lease_end: i64) -> Result<()> {
    if lease_end < lease_start {
        return Err(RandflakeError::InvalidLease);
    }
    if !(0..=MAX_NODE).contains(&node_id) {
        return Err(RandflakeError::InvalidNode);
    }
    if lease_start < EPOCH_OFFSET {
        return Err(RandflakeError::InvalidLease);
    }
    if lease_end > MAX_TIMESTAMP {
        return Err(RandflakeError::RandflakeDead);
    }
    Ok(())
}

impl Generator<SystemClock> {
    /// Create a generator driven by the system clock.
    ///
    /// - `node_id` must be unique in the cluster for the lease interval.
    /// - `lease_start`/`lease_end` are unix seconds, inclusive.
    /// - `secret` must be exactly 16 bytes.
    pub fn new(node_id: i64, lease_start: i64, lease_end: i64, secret: &[u8]) -> Result<Self> {
        Self::with_clock(node_id, lease_start, lease_end, secret, SystemClock)
    }
}

impl<C: Clock> Generator<C> {
    /// Create a generator with an injected clock.
    pub fn with_clock(
        node_id: i64,
        lease_start: i64,
        lease_end: i64,
        secret: &[u8],
        clock: C,
    ) -> Result<Self> {
        validate(node_id, lease_start, lease_end)?;
        let secret = Secret::from_slice(secret)?;
        Ok(Self::assemble(node_id, lease_start, lease_end, &secret, clock))
    }

    /// Create a generator from an already validated [`Secret`].
    pub fn with_secret(
        node_id: i64,
        lease_start: i64,
        lease_end: i64,
        secret: &Secret,
        clock: C,
    ) -> Result<Self> {
        validate(node_id, lease_start, lease_end)?;
        Ok(Self::assemble(node_id, lease_start, lease_end, secret, clock))
    }

    fn assemble(node_id: i64, lease_start: i64, lease_end: i64, secret: &Secret, clock: C) -> Self {
        tracing::debug!(node_id, lease_start, lease_end, "randflake generator created");
        Self {
            lease_start,
            lease_end: AtomicI64::new(lease_end),
            node_id,
            sequence: AtomicI64::new(0),
            rollover: AtomicI64::new(lease_start),
            cipher: secret.cipher(),
            clock,
        }
    }

    pub fn node_id(&self) -> i64 {
        self.node_id
    }

    pub fn lease_start(&self) -> i64 {
        self.lease_start
    }

    /// Current lease end. Never decreases.
    pub fn lease_end(&self) -> i64 {
        self.lease_end.load(Ordering::SeqCst)
    }

    /// Extend the lease end. Returns whether the stored end changed.
    ///
    /// `lease_start` must equal the generator's lease start, `lease_end` must
    /// not precede it or exceed [`MAX_TIMESTAMP`], and it must be strictly
    /// greater than the current end. Anything else is a no-op.
    pub fn update_lease(&self, lease_start: i64, lease_end: i64) -> bool {
        if lease_start != self.lease_start {
            return false;
        }
        if lease_end < lease_start || lease_end > MAX_TIMESTAMP {
            return false;
        }

        let mut current = self.lease_end.load(Ordering::SeqCst);
        while current < lease_end {
            match self.lease_end.compare_exchange_weak(
                current,
                lease_end,
                Ordering::SeqCst,
                Ordering::SeqCst,
            ) {
                Ok(_) => {
                    tracing::debug!(node_id = self.node_id, from = current, to = lease_end, "lease extended");
                    return true;
                }
                Err(observed) => current = observed,
            }
        }
        false
    }

    fn next_raw(&self) -> Result<RawValue> {
        loop {
            let now = self.clock.now();

            if now < self.lease_start || now > self.lease_end.load(Ordering::SeqCst) {
                return Err(RandflakeError::InvalidLease);
            }

            let mut sequence = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
            if sequence > MAX_SEQUENCE {
                let last_rollover = self.rollover.load(Ordering::SeqCst);
                match now.cmp(&last_rollover) {
                    CmpOrdering::Greater => {
                        if self
                            .rollover
                            .compare_exchange(last_rollover, now, Ordering::SeqCst, Ordering::SeqCst)
                            .is_err()
                        {
                            tracing::trace!(node_id = self.node_id, now, "lost rollover race, retrying");
                            continue;
                        }
                        self.sequence.store(0, Ordering::SeqCst);
                        sequence = 0;
                        tracing::debug!(node_id = self.node_id, now, "sequence rolled over");
                    }
                    CmpOrdering::Equal => {
                        tracing::debug!(node_id = self.node_id, now, "sequence exhausted for current second");
                        return Err(RandflakeError::ResourceExhausted);
                    }
                    CmpOrdering::Less => {
                        tracing::warn!(
                            node_id = self.node_id,
                            now,
                            last_rollover,
                            "clock moved backwards past last rollover"
                        );
                        return Err(RandflakeError::ConsistencyViolation);
                    }
                }
            }

            let raw = RawValue::pack(
                (now - EPOCH_OFFSET) as u64,
                self.node_id as u64,
                sequence as u64,
            )?;
            return Ok(raw);
        }
    }

    /// Permute a raw value into its public identifier.
    ///
    /// The raw value enters the cipher as little-endian bytes.
    fn encrypt(&self, raw: RawValue) -> RandflakeId {
        let block = self.cipher.encrypt_block(raw.as_u64().to_le_bytes());
        RandflakeId::from_u64(u64::from_le_bytes(block))
    }

    fn decrypt(&self, id: RandflakeId) -> RawValue {
        let block = self.cipher.decrypt_block(id.as_u64().to_le_bytes());
        RawValue::from_u64(u64::from_le_bytes(block))
    }

    /// Generate a unique, encrypted identifier.
    pub fn generate(&self) -> Result<i64> {
        self.generate_id().map(RandflakeId::as_i64)
    }

    /// Like [`Generator::generate`], returning the newtype.
    pub fn generate_id(&self) -> Result<RandflakeId> {
        let raw = self.next_raw()?;
        Ok(self.encrypt(raw))
    }

    /// Generate an identifier in base32hex form.
    pub fn generate_string(&self) -> Result<String> {
        self.generate_id().map(|id| id.to_base32hex())
    }

    /// Recover timestamp, node id and sequence from an identifier.
    ///
    /// Only identifiers whose decrypted raw value is negative as `i64` are
    /// rejected (with [`RandflakeError::InvalidLease`]). Foreign or corrupted
    /// identifiers usually decrypt to a non-negative value and are returned
    /// with meaningless fields: this is not an integrity check.
    pub fn inspect(&self, id: i64) -> Result<Inspection> {
        self.inspect_id(RandflakeId::from_i64(id))
    }

    pub fn inspect_id(&self, id: RandflakeId) -> Result<Inspection> {
        let raw = self.decrypt(id);
        if raw.as_i64() < 0 {
            return Err(RandflakeError::InvalidLease);
        }
        let (timestamp_offset, node_id, sequence) = raw.unpack();
        Ok(Inspection {
            timestamp: timestamp_offset as i64 + EPOCH_OFFSET,
            node_id: node_id as i64,
            sequence: sequence as i64,
        })
    }

    /// Decode a base32hex identifier and inspect it.
    pub fn inspect_string(&self, id: &str) -> Result<Inspection> {
        let id = codec::decode_string(id)?;
        self.inspect(id)
    }
}

impl<C: Clock> fmt::Debug for Generator<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Generator")
            .field("node_id", &self.node_id)
            .field("lease_start", &self.lease_start)
            .field("lease_end", &self.lease_end())
            .field("sequence", &self.sequence.load(Ordering::Relaxed))
            .field("rollover", &self.rollover.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}
