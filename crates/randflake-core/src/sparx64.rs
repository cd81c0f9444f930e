//! SPARX-64/128: the keyed permutation that hides identifier structure.
//!
//! 64-bit block, 128-bit key, 8 steps of 3 ARX rounds per branch over two
//! branches of two 16-bit words, with a linear mixing layer between steps.
//! Words are read big-endian from both key and block bytes.
//!
//! This is used as a bijection over `u64`, not for confidentiality against a
//! capable adversary.

use std::fmt;

use zeroize::Zeroize;

use crate::error::{CoreError, Result};

/// Block size in bytes.
pub const BLOCK_SIZE: usize = 8;

/// Key size in bytes.
pub const KEY_SIZE: usize = 16;

const N_STEPS: usize = 8;
const ROUNDS_PER_STEP: usize = 3;
const N_BRANCHES: usize = 2;
const KEY_WORDS: usize = KEY_SIZE / 2;
const BLOCK_WORDS: usize = 2 * N_BRANCHES;
const SUBKEY_WORDS: usize = 2 * ROUNDS_PER_STEP;
const N_SUBKEYS: usize = N_BRANCHES * N_STEPS + 1;

type Subkeys = [[u16; SUBKEY_WORDS]; N_SUBKEYS];

/// One keyless SPECK-32 round.
#[inline(always)]
fn arx(l: u16, r: u16) -> (u16, u16) {
    let l = l.rotate_left(9).wrapping_add(r);
    let r = r.rotate_left(2) ^ l;
    (l, r)
}

#[inline(always)]
fn arx_inv(l: u16, r: u16) -> (u16, u16) {
    let r = (r ^ l).rotate_left(14);
    let l = l.wrapping_sub(r).rotate_left(7);
    (l, r)
}

#[inline(always)]
fn linear(x: &mut [u16; BLOCK_WORDS]) {
    let tmp = (x[0] ^ x[1]).rotate_left(8);
    x[2] ^= x[0] ^ tmp;
    x[3] ^= x[1] ^ tmp;
    x.swap(0, 2);
    x.swap(1, 3);
}

#[inline(always)]
fn linear_inv(x: &mut [u16; BLOCK_WORDS]) {
    x.swap(0, 2);
    x.swap(1, 3);
    let tmp = (x[0] ^ x[1]).rotate_left(8);
    x[2] ^= x[0] ^ tmp;
    x[3] ^= x[1] ^ tmp;
}

/// Key-state permutation applied between subkey extractions.
fn permute_key(k: &mut [u16; KEY_WORDS], c: u16) {
    let (k0, k1) = arx(k[0], k[1]);
    k[0] = k0;
    k[1] = k1;
    k[2] = k[2].wrapping_add(k0);
    k[3] = k[3].wrapping_add(k1);
    k[7] = k[7].wrapping_add(c);
    k.rotate_right(2);
}

fn key_schedule(master: &mut [u16; KEY_WORDS]) -> Subkeys {
    let mut subkeys = [[0u16; SUBKEY_WORDS]; N_SUBKEYS];
    for (c, subkey) in subkeys.iter_mut().enumerate() {
        subkey.copy_from_slice(&master[..SUBKEY_WORDS]);
        permute_key(master, (c + 1) as u16);
    }
    subkeys
}

fn load_words<const N: usize>(bytes: &[u8]) -> [u16; N] {
    let mut words = [0u16; N];
    for (word, pair) in words.iter_mut().zip(bytes.chunks_exact(2)) {
        *word = u16::from_be_bytes([pair[0], pair[1]]);
    }
    words
}

fn store_words(words: &[u16; BLOCK_WORDS]) -> [u8; BLOCK_SIZE] {
    let mut out = [0u8; BLOCK_SIZE];
    for (pair, word) in out.chunks_exact_mut(2).zip(words) {
        pair.copy_from_slice(&word.to_be_bytes());
    }
    out
}

/// An expanded SPARX-64/128 key.
///
/// The subkey schedule is immutable after construction, so a single instance
/// may be shared across threads without synchronization. Subkeys are zeroed
/// when the cipher is dropped.
pub struct Sparx64 {
    subkeys: Subkeys,
}

impl Sparx64 {
    /// Expand a key given as a slice.
    ///
    /// Fails with [`CoreError::InvalidKey`] unless the key is exactly 16 bytes.
    pub fn new(key: &[u8]) -> Result<Self> {
        let key: &[u8; KEY_SIZE] = key
            .try_into()
            .map_err(|_| CoreError::InvalidKey { len: key.len() })?;
        Ok(Self::from_key(key))
    }

    /// Expand a 16-byte key.
    pub fn from_key(key: &[u8; KEY_SIZE]) -> Self {
        let mut master: [u16; KEY_WORDS] = load_words(key);
        let subkeys = key_schedule(&mut master);
        master.zeroize();
        Self { subkeys }
    }

    /// Block size in bytes.
    pub const fn block_size(&self) -> usize {
        BLOCK_SIZE
    }

    /// Encrypt one 8-byte block.
    pub fn encrypt_block(&self, block: [u8; BLOCK_SIZE]) -> [u8; BLOCK_SIZE] {
        let mut x: [u16; BLOCK_WORDS] = load_words(&block);
        let k = &self.subkeys;

        for s in 0..N_STEPS {
            for b in 0..N_BRANCHES {
                let subkey = &k[N_BRANCHES * s + b];
                let (mut l, mut r) = (x[2 * b], x[2 * b + 1]);
                for round in 0..ROUNDS_PER_STEP {
                    (l, r) = arx(l ^ subkey[2 * round], r ^ subkey[2 * round + 1]);
                }
                x[2 * b] = l;
                x[2 * b + 1] = r;
            }
            linear(&mut x);
        }

        let whitening = &k[N_BRANCHES * N_STEPS];
        for (word, key) in x.iter_mut().zip(whitening) {
            *word ^= key;
        }

        store_words(&x)
    }

    /// Decrypt one 8-byte block. Exact inverse of [`Sparx64::encrypt_block`].
    pub fn decrypt_block(&self, block: [u8; BLOCK_SIZE]) -> [u8; BLOCK_SIZE] {
        let mut x: [u16; BLOCK_WORDS] = load_words(&block);
        let k = &self.subkeys;

        let whitening = &k[N_BRANCHES * N_STEPS];
        for (word, key) in x.iter_mut().zip(whitening) {
            *word ^= key;
        }

        for s in (0..N_STEPS).rev() {
            linear_inv(&mut x);
            for b in 0..N_BRANCHES {
                let subkey = &k[N_BRANCHES * s + b];
                let (mut l, mut r) = (x[2 * b], x[2 * b + 1]);
                for round in (0..ROUNDS_PER_STEP).rev() {
                    (l, r) = arx_inv(l, r);
                    l ^= subkey[2 * round];
                    r ^= subkey[2 * round + 1];
                }
                x[2 * b] = l;
                x[2 * b + 1] = r;
            }
        }

        store_words(&x)
    }

    /// Encrypt `src` into `dst`. Both must be exactly one block long.
    pub fn encrypt(&self, dst: &mut [u8], src: &[u8]) -> Result<()> {
        let block = check_block(src)?;
        check_block(dst)?;
        dst.copy_from_slice(&self.encrypt_block(block));
        Ok(())
    }

    /// Decrypt `src` into `dst`. Both must be exactly one block long.
    pub fn decrypt(&self, dst: &mut [u8], src: &[u8]) -> Result<()> {
        let block = check_block(src)?;
        check_block(dst)?;
        dst.copy_from_slice(&self.decrypt_block(block));
        Ok(())
    }

    fn wipe(&mut self) {
        self.subkeys.zeroize();
    }
}

fn check_block(buf: &[u8]) -> Result<[u8; BLOCK_SIZE]> {
    buf.try_into().map_err(|_| CoreError::InvalidBuffer {
        expected: BLOCK_SIZE,
        got: buf.len(),
    })
}

impl Drop for Sparx64 {
    fn drop(&mut self) {
        self.wipe();
    }
}

impl fmt::Debug for Sparx64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sparx64").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn block(s: &str) -> [u8; 8] {
        hex::decode(s).unwrap().try_into().unwrap()
    }

    #[test]
    fn test_known_answer() {
        let cipher = Sparx64::new(&hex::decode("00112233445566778899aabbccddeeff").unwrap()).unwrap();
        let ct = cipher.encrypt_block(block("0123456789abcdef"));
        assert_eq!(hex::encode(ct), "2bbef15201f55f98");
        assert_eq!(cipher.decrypt_block(ct), block("0123456789abcdef"));
    }

    #[test]
    fn test_zero_key_vectors() {
        let cipher = Sparx64::from_key(&[0u8; 16]);
        assert_eq!(
            hex::encode(cipher.encrypt_block([0u8; 8])),
            "23b4b5ae05d40da7"
        );
        assert_eq!(
            hex::encode(cipher.encrypt_block([0xff; 8])),
            "e3b9c264e67002e4"
        );
    }

    #[test]
    fn test_invalid_key_length() {
        assert_eq!(
            Sparx64::new(&[0u8; 15]).unwrap_err(),
            CoreError::InvalidKey { len: 15 }
        );
        assert_eq!(
            Sparx64::new(&[0u8; 17]).unwrap_err(),
            CoreError::InvalidKey { len: 17 }
        );
        assert!(Sparx64::new(&[]).is_err());
    }

    #[test]
    fn test_slice_api_checks_lengths() {
        let cipher = Sparx64::from_key(&[7u8; 16]);
        let mut dst = [0u8; 8];

        assert_eq!(
            cipher.encrypt(&mut dst, &[0u8; 7]).unwrap_err(),
            CoreError::InvalidBuffer { expected: 8, got: 7 }
        );

        let mut short = [0u8; 4];
        assert_eq!(
            cipher.decrypt(&mut short, &[0u8; 8]).unwrap_err(),
            CoreError::InvalidBuffer { expected: 8, got: 4 }
        );

        let src = block("0123456789abcdef");
        cipher.encrypt(&mut dst, &src).unwrap();
        assert_eq!(dst, cipher.encrypt_block(src));

        let mut back = [0u8; 8];
        cipher.decrypt(&mut back, &dst).unwrap();
        assert_eq!(back, src);
    }

    #[test]
    fn test_block_size() {
        assert_eq!(Sparx64::from_key(&[0u8; 16]).block_size(), 8);
    }

    #[test]
    fn test_wipe_zeroes_subkeys() {
        let mut cipher = Sparx64::from_key(&[0xa5; 16]);
        assert!(cipher.subkeys.iter().flatten().any(|w| *w != 0));
        cipher.wipe();
        assert!(cipher.subkeys.iter().flatten().all(|w| *w == 0));
    }

    #[test]
    fn test_debug_hides_subkeys() {
        let cipher = Sparx64::from_key(&[0x11; 16]);
        assert_eq!(format!("{:?}", cipher), "Sparx64 { .. }");
    }

    proptest! {
        #[test]
        fn test_arx_inverse(l in any::<u16>(), r in any::<u16>()) {
            let (l2, r2) = arx(l, r);
            prop_assert_eq!(arx_inv(l2, r2), (l, r));
        }

        #[test]
        fn test_linear_inverse(x in any::<[u16; 4]>()) {
            let mut y = x;
            linear(&mut y);
            linear_inv(&mut y);
            prop_assert_eq!(y, x);
        }

        #[test]
        fn test_decrypt_inverts_encrypt(key in any::<[u8; 16]>(), pt in any::<[u8; 8]>()) {
            let cipher = Sparx64::from_key(&key);
            prop_assert_eq!(cipher.decrypt_block(cipher.encrypt_block(pt)), pt);
        }

        #[test]
        fn test_encrypt_inverts_decrypt(key in any::<[u8; 16]>(), ct in any::<[u8; 8]>()) {
            let cipher = Sparx64::from_key(&key);
            prop_assert_eq!(cipher.encrypt_block(cipher.decrypt_block(ct)), ct);
        }
    }
}
