//! Canonical base32hex text form of identifiers.
//!
//! Lowercase `0-9a-v`, most significant digit first, no padding and no
//! leading zeros. Zero encodes as `"0"`. Decoding accepts either case.

use crate::error::{CoreError, Result};

/// The base32hex alphabet.
pub const ALPHABET: &[u8; 32] = b"0123456789abcdefghijklmnopqrstuv";

/// Longest encoding of a `u64` (`ceil(64 / 5)`).
pub const MAX_ENCODED_LEN: usize = 13;

/// Encode an unsigned value.
pub fn encode_u64(mut num: u64) -> String {
    if num == 0 {
        return "0".to_string();
    }

    let mut buf = [0u8; MAX_ENCODED_LEN];
    let mut idx = MAX_ENCODED_LEN;
    while num > 0 {
        idx -= 1;
        buf[idx] = ALPHABET[(num & 0x1f) as usize];
        num >>= 5;
    }

    buf[idx..].iter().map(|&b| b as char).collect()
}

/// Decode into an unsigned value.
///
/// Rejects the empty string, characters outside the alphabet, and values
/// that do not fit in 64 bits.
pub fn decode_u64(s: &str) -> Result<u64> {
    if s.is_empty() {
        return Err(CoreError::InvalidId);
    }

    s.bytes().try_fold(0u64, |num, c| {
        let digit = digit_value(c).ok_or(CoreError::InvalidId)?;
        num.checked_mul(32)
            .and_then(|n| n.checked_add(u64::from(digit)))
            .ok_or(CoreError::InvalidId)
    })
}

/// Encode a signed identifier by its two's-complement bit pattern.
pub fn encode_string(id: i64) -> String {
    encode_u64(id as u64)
}

/// Decode a signed identifier from its base32hex form.
pub fn decode_string(s: &str) -> Result<i64> {
    decode_u64(s).map(|n| n as i64)
}

fn digit_value(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'v' => Some(c - b'a' + 10),
        b'A'..=b'V' => Some(c - b'A' + 10),
        _ => None,
    }
}
