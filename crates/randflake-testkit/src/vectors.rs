//! Golden test vectors for cross-implementation verification.
//!
//! Every Randflake implementation must reproduce these bit for bit.

use randflake_core::Sparx64;

/// A SPARX-64/128 known-answer vector.
#[derive(Debug, Clone)]
pub struct CipherVector {
    pub name: &'static str,
    /// 16 bytes, hex.
    pub key: &'static str,
    /// 8 bytes, hex.
    pub plaintext: &'static str,
    /// 8 bytes, hex.
    pub ciphertext: &'static str,
}

/// An identifier produced by a generator with a known secret and clock.
#[derive(Debug, Clone)]
pub struct IdVector {
    pub name: &'static str,
    /// 16 bytes, hex.
    pub secret: &'static str,
    pub timestamp: i64,
    pub node_id: i64,
    pub sequence: i64,
    pub id: i64,
    pub encoded: &'static str,
}

/// All cipher vectors.
pub fn cipher_vectors() -> Vec<CipherVector> {
    vec![
        CipherVector {
            name: "reference",
            key: "00112233445566778899aabbccddeeff",
            plaintext: "0123456789abcdef",
            ciphertext: "2bbef15201f55f98",
        },
        CipherVector {
            name: "zero key, zero block",
            key: "00000000000000000000000000000000",
            plaintext: "0000000000000000",
            ciphertext: "23b4b5ae05d40da7",
        },
        CipherVector {
            name: "zero key, ones block",
            key: "00000000000000000000000000000000",
            plaintext: "ffffffffffffffff",
            ciphertext: "e3b9c264e67002e4",
        },
        CipherVector {
            name: "zero key, reference block",
            key: "00000000000000000000000000000000",
            plaintext: "0123456789abcdef",
            ciphertext: "33eb4eb15bb5cf95",
        },
        CipherVector {
            name: "ones key, zero block",
            key: "ffffffffffffffffffffffffffffffff",
            plaintext: "0000000000000000",
            ciphertext: "25be28d76934ab29",
        },
        CipherVector {
            name: "ones key, ones block",
            key: "ffffffffffffffffffffffffffffffff",
            plaintext: "ffffffffffffffff",
            ciphertext: "f1a160154a10d866",
        },
        CipherVector {
            name: "ones key, reference block",
            key: "ffffffffffffffffffffffffffffffff",
            plaintext: "0123456789abcdef",
            ciphertext: "7269aed6b461c0bc",
        },
        CipherVector {
            name: "random key, zero block",
            key: "dffd6021bb2bd5b0af676290809ec3a5",
            plaintext: "0000000000000000",
            ciphertext: "34fa2965f3cf3548",
        },
        CipherVector {
            name: "random key, ones block",
            key: "dffd6021bb2bd5b0af676290809ec3a5",
            plaintext: "ffffffffffffffff",
            ciphertext: "b48b507d96958a14",
        },
        CipherVector {
            name: "random key, reference block",
            key: "dffd6021bb2bd5b0af676290809ec3a5",
            plaintext: "0123456789abcdef",
            ciphertext: "4a069374ff35a371",
        },
    ]
}

/// All identifier vectors.
pub fn id_vectors() -> Vec<IdVector> {
    vec![
        IdVector {
            name: "reference id",
            secret: "dffd6021bb2bd5b0af676290809ec3a5",
            timestamp: 1_733_706_297,
            node_id: 42,
            sequence: 1,
            id: 4_594_531_474_933_654_033,
            encoded: "3vgoe12ccb8gh",
        },
        IdVector {
            name: "zero secret, first sequence",
            secret: "00000000000000000000000000000000",
            timestamp: 1_730_001_000,
            node_id: 1,
            sequence: 1,
            id: 4_918_063_824_308_563_866,
            encoded: "48g3ovmv9orsq",
        },
        IdVector {
            name: "zero secret, negative id",
            secret: "00000000000000000000000000000000",
            timestamp: 1_730_001_000,
            node_id: 1,
            sequence: 2,
            id: -2_575_424_826_174_732_926,
            encoded: "dogi0og5241c2",
        },
        IdVector {
            name: "zero secret, rollover sequence",
            secret: "00000000000000000000000000000000",
            timestamp: 1_730_001_000,
            node_id: 1,
            sequence: 0,
            id: 8_135_437_944_331_638_211,
            encoded: "71pn1mju1u5e3",
        },
        IdVector {
            name: "zero secret, last sequence",
            secret: "00000000000000000000000000000000",
            timestamp: 1_730_001_000,
            node_id: 1,
            sequence: 131_071,
            id: 372_141_814_481_256_688,
            encoded: "aagt08p3j07g",
        },
        IdVector {
            name: "epoch origin",
            secret: "00112233445566778899aabbccddeeff",
            timestamp: 1_730_000_000,
            node_id: 0,
            sequence: 0,
            id: 9_106_106_974_612_709_236,
            encoded: "7snr41ga7unrk",
        },
    ]
}

fn decode_array<const N: usize>(s: &str) -> [u8; N] {
    hex::decode(s)
        .ok()
        .and_then(|v| v.try_into().ok())
        .unwrap_or_else(|| panic!("malformed vector hex {s:?}"))
}

/// Check every cipher vector in both directions.
///
/// Returns `(name, passed, actual_ciphertext_hex)` for each vector.
pub fn verify_cipher_vectors() -> Vec<(String, bool, String)> {
    cipher_vectors()
        .iter()
        .map(|v| {
            let cipher = Sparx64::from_key(&decode_array::<16>(v.key));
            let pt = decode_array::<8>(v.plaintext);
            let ct = cipher.encrypt_block(pt);
            let actual = hex::encode(ct);
            let passed = actual == v.ciphertext && cipher.decrypt_block(ct) == pt;
            (v.name.to_string(), passed, actual)
        })
        .collect()
}

/// Decode a vector's secret into bytes.
pub fn secret_bytes(vector: &IdVector) -> [u8; 16] {
    decode_array::<16>(vector.secret)
}
