//! Power2Round, Decompose and the hint mechanism (FIPS 204 §7.4).
//!
//! Inputs are canonical representatives in `[0, q)`. All routines are
//! branch-free in the coefficient value; the only branches are on `gamma2`,
//! which is a public parameter.

use crate::params::D;
use crate::reduce::Q;

/// Split `r` into `(r1, r0)` with `r = r1 * 2^13 + r0`, `r0 ∈ (-2^12, 2^12]`.
#[inline]
pub const fn power2round(r: i32) -> (i32, i32) {
    let r1 = (r + (1 << (D - 1)) - 1) >> D;
    (r1, r - (r1 << D))
}

/// Split `r` into `(r1, r0)` with `r ≡ r1 * 2 gamma2 + r0`, `r0` centered.
///
/// When `r - r0 = q - 1` the high part wraps to 0 and `r0` is decremented,
/// so `r1` always lies in `[0, (q-1)/(2 gamma2))`.
#[inline]
pub const fn decompose(r: i32, gamma2: i32) -> (i32, i32) {
    let mut r1 = (r + 127) >> 7;
    if gamma2 == (Q - 1) / 32 {
        r1 = (r1 * 1025 + (1 << 21)) >> 22;
        r1 &= 15;
    } else {
        r1 = (r1 * 11275 + (1 << 23)) >> 24;
        r1 ^= ((43 - r1) >> 31) & r1;
    }
    let mut r0 = r - r1 * 2 * gamma2;
    r0 -= (((Q - 1) / 2 - r0) >> 31) & Q;
    (r1, r0)
}

/// High-order part of [`decompose`].
#[cfg(test)]
pub const fn high_bits(r: i32, gamma2: i32) -> i32 {
    decompose(r, gamma2).0
}

/// Hint bit for a signer holding `r0 = LowBits(w) - <c s2> + <c t0>` and
/// `r1 = HighBits(w)`: 1 when adding `-<c t0>` back would move the high bits.
///
/// Equivalent to `HighBits(r) != HighBits(r + z)` from FIPS 204 for the
/// values the signer produces, without a second decomposition.
#[inline]
pub const fn make_hint(r0: i32, r1: i32, gamma2: i32) -> i32 {
    let above = (gamma2 - r0) >> 31;
    let below = (r0 + gamma2) >> 31;
    let on_edge = {
        let eq = r0 + gamma2;
        let is_zero = ((eq | -eq) >> 31) + 1;
        let r1_nonzero = -((r1 | -r1) >> 31);
        is_zero & r1_nonzero
    };
    (above | below) & 1 | on_edge
}

/// Recover the high bits of `r + z` from `r` and its hint.
#[inline]
pub const fn use_hint(hint: i32, r: i32, gamma2: i32) -> i32 {
    let (r1, r0) = decompose(r, gamma2);
    let modulus = (Q - 1) / (2 * gamma2);
    let step = if r0 > 0 { 1 } else { -1 };
    let adjusted = r1 + hint * step;
    // Conditional wrap into [0, modulus).
    let wrapped = adjusted + (modulus & (adjusted >> 31));
    wrapped - (modulus & ((modulus - 1 - wrapped) >> 31))
}

#[cfg(test)]
mod tests {
    use super::*;

    const G2_SMALL: i32 = (Q - 1) / 88;
    const G2_LARGE: i32 = (Q - 1) / 32;

    fn decompose_reference(r: i32, gamma2: i32) -> (i32, i32) {
        let alpha = 2 * gamma2;
        let mut r0 = r % alpha;
        if r0 > alpha / 2 {
            r0 -= alpha;
        }
        if r - r0 == Q - 1 {
            (0, r0 - 1)
        } else {
            ((r - r0) / alpha, r0)
        }
    }

    fn high_bits_reference(r: i32, gamma2: i32) -> i32 {
        decompose_reference(r.rem_euclid(Q), gamma2).0
    }

    #[test]
    fn power2round_reconstructs() {
        for r in [0, 1, 4095, 4096, 4097, 8191, 8192, Q / 2, Q - 1] {
            let (r1, r0) = power2round(r);
            assert_eq!(r1 * (1 << D) + r0, r);
            assert!(r0 > -(1 << 12) && r0 <= 1 << 12, "r = {r}, r0 = {r0}");
            assert!((0..1024).contains(&r1));
        }
    }

    #[test]
    fn decompose_matches_definition() {
        for gamma2 in [G2_SMALL, G2_LARGE] {
            let mut r = 0;
            while r < Q {
                assert_eq!(decompose(r, gamma2), decompose_reference(r, gamma2), "r = {r}");
                r += 997;
            }
        }
    }

    #[test]
    fn decompose_wraparound_edge() {
        for gamma2 in [G2_SMALL, G2_LARGE] {
            for r in (Q - gamma2 - 2)..Q {
                let (r1, r0) = decompose(r, gamma2);
                assert_eq!((r1, r0), decompose_reference(r, gamma2), "r = {r}");
            }
            let (r1, r0) = decompose(Q - 1, gamma2);
            assert_eq!(r1, 0);
            assert_eq!(r0, -1);
        }
    }

    #[test]
    fn decompose_boundaries_near_multiples() {
        for gamma2 in [G2_SMALL, G2_LARGE] {
            let alpha = 2 * gamma2;
            for m in 0..((Q - 1) / alpha) {
                for r in [m * alpha + gamma2 - 1, m * alpha + gamma2, m * alpha + gamma2 + 1] {
                    if r < Q {
                        assert_eq!(decompose(r, gamma2), decompose_reference(r, gamma2), "r = {r}");
                    }
                }
            }
        }
    }

    #[test]
    fn hint_recovers_perturbed_high_bits() {
        for gamma2 in [G2_SMALL, G2_LARGE] {
            let mut r = 3;
            while r < Q {
                for z in [-gamma2 + 1, -1000, -1, 0, 1, 1000, gamma2 - 1] {
                    let target = high_bits_reference(r + z, gamma2);
                    let h = i32::from(high_bits(r, gamma2) != target);
                    assert_eq!(use_hint(h, r, gamma2), target, "r = {r}, z = {z}");
                }
                r += 7919;
            }
        }
    }

    #[test]
    fn signer_hint_lets_verifier_recover_w1() {
        // The signer knows w and hints for the verifier's w - c s2 + c t0,
        // where |LowBits(w) - c s2| < gamma2 - beta and |c t0| < gamma2.
        let beta = 200;
        for gamma2 in [G2_SMALL, G2_LARGE] {
            let mut w = 11;
            while w < Q {
                let (w1, w0) = decompose(w, gamma2);
                for cs2 in [-gamma2 / 2, -77, 0, 77, gamma2 / 2] {
                    if (w0 - cs2).abs() >= gamma2 - beta {
                        continue;
                    }
                    for ct0 in [-gamma2 + 1, -4096, 0, 4096, gamma2 - 1] {
                        let r0 = w0 - cs2 + ct0;
                        let verifier_input = (w - cs2 + ct0).rem_euclid(Q);
                        let h = make_hint(r0, w1, gamma2);
                        assert_eq!(use_hint(h, verifier_input, gamma2), w1, "w = {w}");
                    }
                }
                w += 6007;
            }
        }
    }

    #[test]
    fn use_hint_wraps_high_bits() {
        assert_eq!(use_hint(1, Q - 1, G2_LARGE), 15);
        assert_eq!(use_hint(1, Q - 1, G2_SMALL), 43);
        let top = 15 * 2 * G2_LARGE + 10;
        assert_eq!(use_hint(1, top, G2_LARGE), 0);
        assert_eq!(use_hint(0, top, G2_LARGE), 15);
    }
}
