//! `ML-DSA.Verify_internal` (FIPS 204 Algorithm 8).
//!
//! Once the inputs have the right lengths, every check is evaluated and
//! folded into a single `Choice`; the result does not reveal which check
//! failed.

use subtle::{Choice, ConstantTimeEq};

use crate::hash::{message_representative, public_key_hash};
use crate::packing::{unpack_public_key, unpack_signature};
use crate::params::{ParamSet, CRH_BYTES, D};
use crate::poly::N;
use crate::polyvec::{Matrix, PolyVec};
use crate::rounding::use_hint;
use crate::sample::{expand_a, sample_in_ball};
use crate::sign::{challenge_seed, check_context};
use crate::Result;

/// A public key with `A` and `t1 · 2^d` precomputed in the transform domain.
///
/// Useful when many signatures are checked under one key. Building it is
/// explicit; plain verification regenerates everything per call.
#[derive(Clone, Debug)]
pub struct ExpandedVerificationKey<const K: usize, const L: usize> {
    params: ParamSet,
    tr: [u8; CRH_BYTES],
    a: Matrix<K, L>,
    t1_hat: PolyVec<K>,
}

impl<const K: usize, const L: usize> ExpandedVerificationKey<K, L> {
    /// Decode and expand an encoded public key.
    pub fn from_public_key(p: &ParamSet, pk: &[u8]) -> Result<Self> {
        let (rho, mut t1_hat) = unpack_public_key::<K>(p, pk)?;
        t1_hat.shift_left(D);
        t1_hat.ntt();
        Ok(Self {
            params: *p,
            tr: public_key_hash(pk),
            a: expand_a::<K, L>(&rho),
            t1_hat,
        })
    }

    /// `tr = H(pk)` for this key.
    pub fn tr(&self) -> &[u8; CRH_BYTES] {
        &self.tr
    }

    /// Verify against a precomputed `mu`. Wrong signature length is an
    /// error; any other defect is `Ok(false)`.
    pub fn verify_mu(&self, mu: &[u8; CRH_BYTES], sig: &[u8]) -> Result<bool> {
        let p = &self.params;
        let parsed = unpack_signature::<K, L>(p, sig)?;

        let z_ok = parsed.z.check_norm_ct(p.gamma1 - p.beta);

        let mut c_hat = sample_in_ball(parsed.c_tilde, p.tau);
        c_hat.ntt();

        let mut z_hat = parsed.z.clone();
        z_hat.ntt();
        let mut w = self.a.mul_vec(&z_hat);
        let ct1 = self.t1_hat.scale_by(&c_hat);
        w.sub_assign(&ct1);
        w.freeze();
        w.inv_ntt_to_mont();
        w.caddq();

        let mut w1 = PolyVec::<K>::zero();
        for i in 0..K {
            for j in 0..N {
                w1.polys[i][j] = use_hint(parsed.h.polys[i][j], w.polys[i][j], p.gamma2);
            }
        }

        let c_tilde = challenge_seed(p, mu, &w1)?;
        let same_c = c_tilde[..p.c_tilde_bytes].ct_eq(parsed.c_tilde);

        let valid: Choice = parsed.hints_ok & z_ok & same_c;
        Ok(bool::from(valid))
    }

    /// Verify an already formatted `M'`.
    pub fn verify_internal(&self, m_prime: &[&[u8]], sig: &[u8]) -> Result<bool> {
        let mu = message_representative(&self.tr, m_prime);
        self.verify_mu(&mu, sig)
    }

    /// Pure ML-DSA verification with a context string.
    pub fn verify_message(&self, message: &[u8], ctx: &[u8], sig: &[u8]) -> Result<bool> {
        check_context(ctx)?;
        let prefix = [0u8, ctx.len() as u8];
        self.verify_internal(&[&prefix, ctx, message], sig)
    }
}

/// Verify `sig` on `message` under the encoded public key `pk`.
pub fn verify_message<const K: usize, const L: usize>(
    p: &ParamSet,
    pk: &[u8],
    message: &[u8],
    ctx: &[u8],
    sig: &[u8],
) -> Result<bool> {
    check_context(ctx)?;
    ExpandedVerificationKey::<K, L>::from_public_key(p, pk)?.verify_message(message, ctx, sig)
}

/// Verify against an already formatted `M'`.
pub fn verify_internal<const K: usize, const L: usize>(
    p: &ParamSet,
    pk: &[u8],
    m_prime: &[&[u8]],
    sig: &[u8],
) -> Result<bool> {
    ExpandedVerificationKey::<K, L>::from_public_key(p, pk)?.verify_internal(m_prime, sig)
}

/// Verify against a caller-supplied `mu`.
pub fn verify_mu<const K: usize, const L: usize>(
    p: &ParamSet,
    pk: &[u8],
    mu: &[u8; CRH_BYTES],
    sig: &[u8],
) -> Result<bool> {
    ExpandedVerificationKey::<K, L>::from_public_key(p, pk)?.verify_mu(mu, sig)
}
