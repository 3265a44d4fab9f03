//! Rejection samplers and the vector expansions built on them.
//!
//! Each sampler draws from a hash stream and only branches on the value it
//! just drew, so the number of rejections is a function of the stream alone.

use zeroize::Zeroize;

use crate::hash::{G, H};
use crate::packing::unpack_bits;
use crate::params::{ParamSet, CRH_BYTES, SEED_BYTES};
use crate::poly::{Poly, N};
use crate::polyvec::{Matrix, PolyVec};
use crate::reduce::Q;

/// SHAKE128 rate in bytes.
const G_BLOCK: usize = 168;

/// SHAKE256 rate in bytes.
const H_BLOCK: usize = 136;

/// `RejNTTPoly`: uniform coefficients mod q, produced directly in the
/// transform domain.
pub fn sample_uniform(xof: &mut G) -> Poly {
    let mut poly = Poly::zero();
    let mut block = [0u8; G_BLOCK];
    let mut filled = 0;
    while filled < N {
        xof.squeeze(&mut block);
        for chunk in block.chunks_exact(3) {
            let t = u32::from(chunk[0])
                | (u32::from(chunk[1]) << 8)
                | (u32::from(chunk[2] & 0x7F) << 16);
            if t < Q as u32 {
                poly.coeffs[filled] = t as i32;
                filled += 1;
                if filled == N {
                    break;
                }
            }
        }
    }
    poly
}

/// Map a half-byte to `[-eta, eta]`, or `None` if it is rejected.
#[inline]
fn coeff_from_half_byte(b: u8, eta: i32) -> Option<i32> {
    let b = i32::from(b);
    if eta == 2 && b < 15 {
        Some(2 - b % 5)
    } else if eta == 4 && b < 9 {
        Some(4 - b)
    } else {
        None
    }
}

/// `RejBoundedPoly`: coefficients uniform in `[-eta, eta]` from
/// `H(seed || nonce)`.
pub fn sample_bounded(seed: &[u8; CRH_BYTES], nonce: u16, eta: i32) -> Poly {
    let mut xof = H::absorb(&[seed, &nonce.to_le_bytes()]);
    let mut poly = Poly::zero();
    let mut block = [0u8; H_BLOCK];
    let mut filled = 0;
    'outer: while filled < N {
        xof.squeeze(&mut block);
        for &byte in &block {
            for nibble in [byte & 0x0F, byte >> 4] {
                if let Some(c) = coeff_from_half_byte(nibble, eta) {
                    poly.coeffs[filled] = c;
                    filled += 1;
                    if filled == N {
                        break 'outer;
                    }
                }
            }
        }
    }
    block.zeroize();
    poly
}

/// One polynomial of `ExpandMask`: coefficients in `(-gamma1, gamma1]`,
/// read as fixed-width fields from `H(seed || nonce)`.
pub fn sample_mask(p: &ParamSet, seed: &[u8; CRH_BYTES], nonce: u16) -> Poly {
    let bits = p.gamma1_bits();
    let mut buf = [0u8; 640];
    let buf = &mut buf[..N * bits / 8];
    H::absorb(&[seed, &nonce.to_le_bytes()]).squeeze(buf);
    let mut fields = unpack_bits(buf, bits);
    let poly = Poly::from_coeffs(core::array::from_fn(|i| p.gamma1 - fields[i] as i32));
    buf.zeroize();
    fields.zeroize();
    poly
}

/// `SampleInBall`: exactly `tau` coefficients are ±1, the rest 0.
pub fn sample_in_ball(c_tilde: &[u8], tau: usize) -> Poly {
    let mut xof = H::absorb(&[c_tilde]);
    let mut sign_bytes = [0u8; 8];
    xof.squeeze(&mut sign_bytes);
    let mut signs = u64::from_le_bytes(sign_bytes);

    let mut c = Poly::zero();
    let mut byte = [0u8; 1];
    for i in (N - tau)..N {
        let j = loop {
            xof.squeeze(&mut byte);
            let j = usize::from(byte[0]);
            if j <= i {
                break j;
            }
        };
        c.coeffs[i] = c.coeffs[j];
        c.coeffs[j] = 1 - 2 * (signs & 1) as i32;
        signs >>= 1;
    }
    c
}

/// `ExpandA`: the public matrix in the transform domain.
pub fn expand_a<const K: usize, const L: usize>(rho: &[u8; SEED_BYTES]) -> Matrix<K, L> {
    Matrix {
        rows: core::array::from_fn(|i| PolyVec {
            polys: core::array::from_fn(|j| {
                sample_uniform(&mut G::for_matrix_entry(rho, i as u8, j as u8))
            }),
        }),
    }
}

/// `ExpandS`: `s1` from nonces `0..l`, `s2` from nonces `l..l+k`.
pub fn expand_s<const K: usize, const L: usize>(
    p: &ParamSet,
    rho_prime: &[u8; CRH_BYTES],
) -> (PolyVec<L>, PolyVec<K>) {
    let s1 = PolyVec {
        polys: core::array::from_fn(|r| sample_bounded(rho_prime, r as u16, p.eta)),
    };
    let s2 = PolyVec {
        polys: core::array::from_fn(|r| sample_bounded(rho_prime, (L + r) as u16, p.eta)),
    };
    (s1, s2)
}

/// `ExpandMask`: `y[r]` from nonce `kappa + r`.
pub fn expand_mask<const L: usize>(
    p: &ParamSet,
    rho_pp: &[u8; CRH_BYTES],
    kappa: u16,
) -> PolyVec<L> {
    PolyVec {
        polys: core::array::from_fn(|r| sample_mask(p, rho_pp, kappa.wrapping_add(r as u16))),
    }
}
