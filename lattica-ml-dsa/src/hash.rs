//! Seed expansion with SHAKE128 and SHAKE256 (FIPS 202).
//!
//! `G` (SHAKE128) is used only for the public matrix. Everything else,
//! including the key-binding hashes tr and mu, goes through `H` (SHAKE256).

use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::{Shake128, Shake128Reader, Shake256, Shake256Reader};

use crate::params::CRH_BYTES;

/// Streaming SHAKE256 output.
pub struct H {
    reader: Shake256Reader,
}

impl H {
    /// Absorb the concatenation of `parts` and switch to squeezing.
    pub fn absorb(parts: &[&[u8]]) -> Self {
        let mut hasher = Shake256::default();
        for part in parts {
            hasher.update(part);
        }
        Self {
            reader: hasher.finalize_xof(),
        }
    }

    /// Fill `out` with the next bytes of the stream.
    pub fn squeeze(&mut self, out: &mut [u8]) {
        self.reader.read(out);
    }
}

/// Streaming SHAKE128 output for one matrix entry.
pub struct G {
    reader: Shake128Reader,
}

impl G {
    /// Stream for `A[row][col]`, absorbing `rho || col || row`.
    pub fn for_matrix_entry(rho: &[u8; 32], row: u8, col: u8) -> Self {
        let mut hasher = Shake128::default();
        hasher.update(rho);
        hasher.update(&[col, row]);
        Self {
            reader: hasher.finalize_xof(),
        }
    }

    /// Fill `out` with the next bytes of the stream.
    pub fn squeeze(&mut self, out: &mut [u8]) {
        self.reader.read(out);
    }
}

/// One-shot `H(parts..., out.len())`.
pub fn shake256(parts: &[&[u8]], out: &mut [u8]) {
    H::absorb(parts).squeeze(out);
}

/// `tr = H(pk, 64)`.
pub fn public_key_hash(pk: &[u8]) -> [u8; CRH_BYTES] {
    let mut tr = [0u8; CRH_BYTES];
    shake256(&[pk], &mut tr);
    tr
}

/// `mu = H(tr || M', 64)` where `M'` is the concatenation of `m_prime`.
pub fn message_representative(tr: &[u8; CRH_BYTES], m_prime: &[&[u8]]) -> [u8; CRH_BYTES] {
    let mut hasher = Shake256::default();
    hasher.update(tr);
    for part in m_prime {
        hasher.update(part);
    }
    let mut mu = [0u8; CRH_BYTES];
    hasher.finalize_xof().read(&mut mu);
    mu
}

/// `rho'' = H(K || rnd || mu, 64)`, the per-signature mask seed.
pub fn mask_seed(key: &[u8; 32], rnd: &[u8; 32], mu: &[u8; CRH_BYTES]) -> [u8; CRH_BYTES] {
    let mut out = [0u8; CRH_BYTES];
    shake256(&[key, rnd, mu], &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shake256_empty_input_known_prefix() {
        let mut out = [0u8; 8];
        shake256(&[], &mut out);
        assert_eq!(out, [0x46, 0xb9, 0xdd, 0x2b, 0x0b, 0xa8, 0x8d, 0x13]);
    }

    #[test]
    fn shake128_empty_input_known_prefix() {
        let mut reader = Shake128::default().finalize_xof();
        let mut out = [0u8; 8];
        reader.read(&mut out);
        assert_eq!(out, [0x7f, 0x9c, 0x2b, 0xa4, 0xe8, 0x8f, 0x82, 0x7d]);
    }

    #[test]
    fn split_absorb_equals_concatenation() {
        let mut a = [0u8; 40];
        let mut b = [0u8; 40];
        shake256(&[b"lattice", b"-based"], &mut a);
        shake256(&[b"lattice-based"], &mut b);
        assert_eq!(a, b);
    }

    #[test]
    fn matrix_stream_orders_column_before_row() {
        let rho = [9u8; 32];
        let mut by_entry = [0u8; 16];
        G::for_matrix_entry(&rho, 1, 2).squeeze(&mut by_entry);

        let mut manual = Shake128::default();
        manual.update(&rho);
        manual.update(&[2, 1]);
        let mut expected = [0u8; 16];
        manual.finalize_xof().read(&mut expected);
        assert_eq!(by_entry, expected);
    }

    #[test]
    fn squeezing_in_pieces_continues_stream() {
        let mut whole = [0u8; 64];
        shake256(&[b"seed"], &mut whole);

        let mut xof = H::absorb(&[b"seed"]);
        let mut first = [0u8; 24];
        let mut rest = [0u8; 40];
        xof.squeeze(&mut first);
        xof.squeeze(&mut rest);
        assert_eq!(&whole[..24], &first);
        assert_eq!(&whole[24..], &rest);
    }
}
