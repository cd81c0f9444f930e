//! # Randflake Testkit
//!
//! Testing utilities for Randflake.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: SPARX-64/128 known answers and generator outputs that any
//!   implementation must reproduce exactly
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: Generators wired to a [`ManualClock`](randflake::ManualClock)
//!
//! ## Golden Vectors
//!
//! ```rust
//! use randflake_testkit::vectors::verify_cipher_vectors;
//!
//! for (name, passed, actual) in verify_cipher_vectors() {
//!     assert!(passed, "{name}: {actual}");
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use randflake_testkit::generators::GeneratorParams;
//!
//! proptest! {
//!     #[test]
//!     fn generated_ids_inspect(params: GeneratorParams) {
//!         let (generator, _clock) = params.build();
//!         let id = generator.generate().unwrap();
//!         let _ = generator.inspect(id);
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use randflake_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::new();
//! let ids = fixture.generate_n(3);
//! fixture.clock.advance(1);
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{multi_node_fixtures, TestFixture};
pub use generators::GeneratorParams;
pub use vectors::{cipher_vectors, id_vectors, verify_cipher_vectors, CipherVector, IdVector};
