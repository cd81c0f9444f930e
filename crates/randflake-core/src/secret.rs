//! Secret key material for the identifier permutation.

use rand::RngCore;
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{CoreError, Result};
use crate::sparx64::{Sparx64, KEY_SIZE};

/// Domain-separation context used by [`Secret::derive`] when none is given.
pub const DEFAULT_DERIVE_CONTEXT: &str = "randflake 2024-10-27 identifier secret v1";

/// A 16-byte secret. Zeroed on drop; never printed.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Secret([u8; KEY_SIZE]);

impl Secret {
    pub const fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self(bytes)
    }

    /// Fails with [`CoreError::InvalidSecret`] unless `bytes` is exactly 16 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let arr: [u8; KEY_SIZE] = bytes
            .try_into()
            .map_err(|_| CoreError::InvalidSecret { len: bytes.len() })?;
        Ok(Self(arr))
    }

    /// Parse from a 32-character hex string.
    pub fn from_hex(s: &str) -> Result<Self> {
        let mut bytes = hex::decode(s.trim()).map_err(|e| CoreError::InvalidHex(e.to_string()))?;
        let secret = Self::from_slice(&bytes);
        bytes.zeroize();
        secret
    }

    /// Generate a new random secret.
    pub fn generate() -> Self {
        let mut bytes = [0u8; KEY_SIZE];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Derive a secret from master key material.
    ///
    /// BLAKE3 in derive-key mode, truncated to 16 bytes. The same
    /// `(context, material)` pair always yields the same secret.
    pub fn derive(context: &str, material: &[u8]) -> Self {
        let mut out = blake3::derive_key(context, material);
        let mut bytes = [0u8; KEY_SIZE];
        bytes.copy_from_slice(&out[..KEY_SIZE]);
        out.zeroize();
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }

    /// Expand into the cipher key schedule.
    pub fn cipher(&self) -> Sparx64 {
        Sparx64::from_key(&self.0)
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(<redacted>)")
    }
}

impl TryFrom<&[u8]> for Secret {
    type Error = CoreError;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::from_slice(bytes)
    }
}

impl From<[u8; KEY_SIZE]> for Secret {
    fn from(bytes: [u8; KEY_SIZE]) -> Self {
        Self(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_slice_checks_length() {
        assert!(Secret::from_slice(&[0u8; 16]).is_ok());
        assert_eq!(
            Secret::from_slice(&[0u8; 15]).unwrap_err(),
            CoreError::InvalidSecret { len: 15 }
        );
        assert_eq!(
            Secret::from_slice(&[0u8; 32]).unwrap_err(),
            CoreError::InvalidSecret { len: 32 }
        );
    }

    #[test]
    fn test_from_hex() {
        let secret = Secret::from_hex("dffd6021bb2bd5b0af676290809ec3a5").unwrap();
        assert_eq!(secret.as_bytes()[0], 0xdf);
        assert_eq!(secret.as_bytes()[15], 0xa5);

        assert!(matches!(
            Secret::from_hex("zz").unwrap_err(),
            CoreError::InvalidHex(_)
        ));
        assert_eq!(
            Secret::from_hex("0011").unwrap_err(),
            CoreError::InvalidSecret { len: 2 }
        );
    }

    #[test]
    fn test_generate_is_random() {
        assert_ne!(Secret::generate(), Secret::generate());
    }

    #[test]
    fn test_derive_deterministic() {
        let a = Secret::derive(DEFAULT_DERIVE_CONTEXT, b"master");
        let b = Secret::derive(DEFAULT_DERIVE_CONTEXT, b"master");
        assert_eq!(a, b);

        let c = Secret::derive("other context", b"master");
        assert_ne!(a, c);
    }

    #[test]
    fn test_debug_redacted() {
        let secret = Secret::from_bytes([0x42; 16]);
        let debug = format!("{:?}", secret);
        assert!(!debug.contains("42"));
        assert_eq!(debug, "Secret(<redacted>)");
    }

    #[test]
    fn test_cipher_matches_direct_key() {
        let secret = Secret::from_bytes([3u8; 16]);
        let direct = Sparx64::from_key(&[3u8; 16]);
        assert_eq!(
            secret.cipher().encrypt_block([9u8; 8]),
            direct.encrypt_block([9u8; 8])
        );
    }
}
