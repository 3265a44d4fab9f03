//! ML-DSA parameter sets.
//!
//! A [`ParamSet`] carries every per-level constant. Matrix dimensions are
//! duplicated as const generics at the call sites so vectors can live on the
//! stack, but all other behaviour is driven by the value passed in.

use crate::reduce::Q;

/// Ring dimension.
pub const N: usize = crate::poly::N;

/// Dropped bits of `t` (Power2Round boundary).
pub const D: u32 = 13;

/// Size of `rho`, `K` and the key-generation seed.
pub const SEED_BYTES: usize = 32;

/// Size of `rho'`, `tr` and `mu`.
pub const CRH_BYTES: usize = 64;

/// Size of the per-signature randomness.
pub const RND_BYTES: usize = 32;

/// Longest accepted context string.
pub const MAX_CONTEXT_BYTES: usize = 255;

/// Safety cap on the signing loop. Each attempt succeeds with probability
/// above 1/8, so reaching this cap means sampling is broken.
pub const MAX_SIGN_ATTEMPTS: u32 = 10_000;

/// Bytes per packed `t1` polynomial (10 bits/coefficient).
pub const T1_PACKED_BYTES: usize = 320;

/// Bytes per packed `t0` polynomial (13 bits/coefficient).
pub const T0_PACKED_BYTES: usize = 416;

/// Configuration of one standard ML-DSA parameter set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParamSet {
    /// Display name, e.g. `"ML-DSA-65"`.
    pub name: &'static str,
    /// Rows of A (length of t, s2, w).
    pub k: usize,
    /// Columns of A (length of s1, y, z).
    pub l: usize,
    /// Bound on secret coefficients.
    pub eta: i32,
    /// Number of nonzero challenge coefficients.
    pub tau: usize,
    /// `tau * eta`.
    pub beta: i32,
    /// Mask range.
    pub gamma1: i32,
    /// Low-order rounding range.
    pub gamma2: i32,
    /// Maximum hint weight.
    pub omega: usize,
    /// Length of the challenge seed `c~`.
    pub c_tilde_bytes: usize,
}

impl ParamSet {
    /// Bits per packed secret coefficient.
    pub const fn eta_bits(&self) -> usize {
        if self.eta == 2 {
            3
        } else {
            4
        }
    }

    /// Bytes per packed `s1`/`s2` polynomial.
    pub const fn eta_packed_bytes(&self) -> usize {
        N * self.eta_bits() / 8
    }

    /// Bits per packed `z` coefficient (18 or 20).
    pub const fn gamma1_bits(&self) -> usize {
        self.gamma1.trailing_zeros() as usize + 1
    }

    /// Bytes per packed `z` polynomial.
    pub const fn z_packed_bytes(&self) -> usize {
        N * self.gamma1_bits() / 8
    }

    /// Bits per `w1` coefficient (6 or 4).
    pub const fn w1_bits(&self) -> usize {
        if self.gamma2 == (Q - 1) / 88 {
            6
        } else {
            4
        }
    }

    /// Bytes per packed `w1` polynomial.
    pub const fn w1_packed_bytes(&self) -> usize {
        N * self.w1_bits() / 8
    }

    /// Number of distinct high-bits values, `(q - 1) / (2 gamma2)`.
    pub const fn w1_modulus(&self) -> i32 {
        (Q - 1) / (2 * self.gamma2)
    }

    /// Encoded public key length.
    pub const fn pk_bytes(&self) -> usize {
        SEED_BYTES + self.k * T1_PACKED_BYTES
    }

    /// Encoded secret key length.
    pub const fn sk_bytes(&self) -> usize {
        2 * SEED_BYTES
            + CRH_BYTES
            + (self.k + self.l) * self.eta_packed_bytes()
            + self.k * T0_PACKED_BYTES
    }

    /// Encoded hint length.
    pub const fn hint_bytes(&self) -> usize {
        self.omega + self.k
    }

    /// Encoded signature length.
    pub const fn sig_bytes(&self) -> usize {
        self.c_tilde_bytes + self.l * self.z_packed_bytes() + self.hint_bytes()
    }
}

/// ML-DSA-44, NIST security category 2.
pub const ML_DSA_44: ParamSet = ParamSet {
    name: "ML-DSA-44",
    k: 4,
    l: 4,
    eta: 2,
    tau: 39,
    beta: 78,
    gamma1: 1 << 17,
    gamma2: (Q - 1) / 88,
    omega: 80,
    c_tilde_bytes: 32,
};

/// ML-DSA-65, NIST security category 3.
pub const ML_DSA_65: ParamSet = ParamSet {
    name: "ML-DSA-65",
    k: 6,
    l: 5,
    eta: 4,
    tau: 49,
    beta: 196,
    gamma1: 1 << 19,
    gamma2: (Q - 1) / 32,
    omega: 55,
    c_tilde_bytes: 48,
};

/// ML-DSA-87, NIST security category 5.
pub const ML_DSA_87: ParamSet = ParamSet {
    name: "ML-DSA-87",
    k: 8,
    l: 7,
    eta: 2,
    tau: 60,
    beta: 120,
    gamma1: 1 << 19,
    gamma2: (Q - 1) / 32,
    omega: 75,
    c_tilde_bytes: 64,
};
