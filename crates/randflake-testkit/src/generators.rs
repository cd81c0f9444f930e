//! Proptest generators for property-based testing.

use proptest::prelude::*;

use randflake::{
    Generator, ManualClock, Secret, EPOCH_OFFSET, MAX_NODE, MAX_SEQUENCE, MAX_TIMESTAMP,
};

/// Generate random 16-byte secret material.
pub fn secret_bytes() -> impl Strategy<Value = [u8; 16]> {
    any::<[u8; 16]>()
}

/// Generate a random [`Secret`].
pub fn secret() -> impl Strategy<Value = Secret> {
    secret_bytes().prop_map(Secret::from_bytes)
}

/// Generate a valid node id.
pub fn node_id() -> impl Strategy<Value = i64> {
    0i64..=MAX_NODE
}

/// Generate a node id outside the valid range.
pub fn invalid_node_id() -> impl Strategy<Value = i64> {
    prop_oneof![i64::MIN..0i64, (MAX_NODE + 1)..=i64::MAX]
}

/// Generate a valid unix-second timestamp.
pub fn timestamp() -> impl Strategy<Value = i64> {
    EPOCH_OFFSET..=MAX_TIMESTAMP
}

/// Generate a valid sequence number.
pub fn sequence() -> impl Strategy<Value = i64> {
    0i64..=MAX_SEQUENCE
}

/// Generate a valid `(lease_start, lease_end)` pair.
pub fn lease() -> impl Strategy<Value = (i64, i64)> {
    timestamp().prop_flat_map(|start| (Just(start), start..=MAX_TIMESTAMP))
}

/// Parameters for a generator with a clock somewhere inside its lease.
#[derive(Debug, Clone)]
pub struct GeneratorParams {
    pub node_id: i64,
    pub lease_start: i64,
    pub lease_end: i64,
    pub now: i64,
    pub secret: [u8; 16],
}

impl GeneratorParams {
    /// Build the generator and the clock handle driving it.
    pub fn build(&self) -> (Generator<ManualClock>, ManualClock) {
        let clock = ManualClock::new(self.now);
        let generator = Generator::with_clock(
            self.node_id,
            self.lease_start,
            self.lease_end,
            &self.secret,
            clock.clone(),
        )
        .unwrap_or_else(|e| panic!("generated params must be valid: {e}"));
        (generator, clock)
    }
}

impl Arbitrary for GeneratorParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (node_id(), lease(), secret_bytes())
            .prop_flat_map(|(node_id, (start, end), secret)| {
                (start..=end).prop_map(move |now| GeneratorParams {
                    node_id,
                    lease_start: start,
                    lease_end: end,
                    now,
                    secret,
                })
            })
            .boxed()
    }
}
