//! Generator configuration.
//!
//! Deserializes from any serde format; the secret is given as hex:
//!
//! ```json
//! {
//!   "node_id": 42,
//!   "lease_start": 1733700000,
//!   "lease_end": 1733703600,
//!   "secret": "dffd6021bb2bd5b0af676290809ec3a5"
//! }
//! ```

use std::fmt;

use randflake_core::Secret;
use serde::{Deserialize, Deserializer};

use crate::clock::{Clock, SystemClock};
use crate::error::Result;
use crate::generator::Generator;

/// Everything needed to construct a [`Generator`].
#[derive(Clone, Deserialize)]
pub struct GeneratorConfig {
    pub node_id: i64,
    pub lease_start: i64,
    pub lease_end: i64,
    #[serde(deserialize_with = "secret_from_hex")]
    pub secret: Secret,
}

impl GeneratorConfig {
    pub fn new(node_id: i64, lease_start: i64, lease_end: i64, secret: Secret) -> Self {
        Self {
            node_id,
            lease_start,
            lease_end,
            secret,
        }
    }

    /// Build a generator on the system clock.
    pub fn build(&self) -> Result<Generator<SystemClock>> {
        self.with_clock(SystemClock)
    }

    /// Build a generator on the given clock.
    pub fn with_clock<C: Clock>(&self, clock: C) -> Result<Generator<C>> {
        Generator::with_secret(
            self.node_id,
            self.lease_start,
            self.lease_end,
            &self.secret,
            clock,
        )
    }
}

impl Generator<SystemClock> {
    pub fn from_config(config: &GeneratorConfig) -> Result<Self> {
        config.build()
    }
}

impl fmt::Debug for GeneratorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratorConfig")
            .field("node_id", &self.node_id)
            .field("lease_start", &self.lease_start)
            .field("lease_end", &self.lease_end)
            .field("secret", &self.secret)
            .finish()
    }
}

fn secret_from_hex<'de, D>(deserializer: D) -> std::result::Result<Secret, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Secret::from_hex(&s).map_err(serde::de::Error::custom)
}
