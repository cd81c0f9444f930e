//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use randflake::{Generator, ManualClock, Secret, EPOCH_OFFSET, MAX_SEQUENCE};

/// Lease start used by [`TestFixture::new`].
pub const FIXTURE_LEASE_START: i64 = EPOCH_OFFSET + 1_000_000;

/// Lease length used by [`TestFixture::new`], in seconds.
pub const FIXTURE_LEASE_SECS: i64 = 24 * 3600;

/// A generator on a manual clock, plus the handle to move that clock.
pub struct TestFixture {
    pub generator: Generator<ManualClock>,
    pub clock: ManualClock,
}

impl TestFixture {
    /// Node 1, a one-day lease, random secret, clock one second into the lease.
    pub fn new() -> Self {
        Self::with_node(1, Secret::generate())
    }

    /// Like [`TestFixture::new`] with a chosen node id and secret.
    pub fn with_node(node_id: i64, secret: Secret) -> Self {
        let clock = ManualClock::new(FIXTURE_LEASE_START + 1);
        let generator = Generator::with_secret(
            node_id,
            FIXTURE_LEASE_START,
            FIXTURE_LEASE_START + FIXTURE_LEASE_SECS,
            &secret,
            clock.clone(),
        )
        .unwrap_or_else(|e| panic!("fixture parameters must be valid: {e}"));
        Self { generator, clock }
    }

    /// Current time of the fixture clock.
    pub fn now(&self) -> i64 {
        randflake::Clock::now(&self.clock)
    }

    /// Generate `n` identifiers, panicking on the first failure.
    pub fn generate_n(&self, n: usize) -> Vec<i64> {
        (0..n)
            .map(|i| {
                self.generator
                    .generate()
                    .unwrap_or_else(|e| panic!("generate #{i} failed: {e}"))
            })
            .collect()
    }

    /// Generate until the generator refuses, returning what it produced.
    pub fn drain(&self) -> Vec<i64> {
        let mut ids = Vec::with_capacity(MAX_SEQUENCE as usize + 1);
        while let Ok(id) = self.generator.generate() {
            ids.push(id);
        }
        ids
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Generators for several distinct nodes sharing one secret and one clock.
pub fn multi_node_fixtures(count: usize) -> (Vec<Generator<ManualClock>>, ManualClock) {
    let secret = Secret::generate();
    let clock = ManualClock::new(FIXTURE_LEASE_START + 1);
    let generators = (0..count)
        .map(|node| {
            Generator::with_secret(
                node as i64,
                FIXTURE_LEASE_START,
                FIXTURE_LEASE_START + FIXTURE_LEASE_SECS,
                &secret,
                clock.clone(),
            )
            .unwrap_or_else(|e| panic!("node {node} must be valid: {e}"))
        })
        .collect();
    (generators, clock)
}
