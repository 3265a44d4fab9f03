//! `ML-DSA.Sign_internal` (FIPS 204 Algorithm 7) and the message-level
//! wrappers around it.

use subtle::{Choice, ConstantTimeGreater};
use zeroize::{Zeroize, Zeroizing};

use crate::hash::{mask_seed, message_representative, shake256};
use crate::packing::{pack_signature, pack_w1, unpack_secret_key, SecretKeyParts};
use crate::params::{ParamSet, CRH_BYTES, MAX_CONTEXT_BYTES, MAX_SIGN_ATTEMPTS, RND_BYTES};
use crate::polyvec::PolyVec;
use crate::rounding::{decompose, make_hint};
use crate::sample::{expand_a, expand_mask, sample_in_ball};
use crate::{Error, Result};

/// Largest `c~` across parameter sets.
pub(crate) const MAX_C_TILDE_BYTES: usize = 64;

/// Largest packed `w1` across parameter sets.
pub(crate) const MAX_W1_BYTES: usize = 8 * 128;

/// Reject contexts longer than 255 bytes.
pub fn check_context(ctx: &[u8]) -> Result<()> {
    if ctx.len() > MAX_CONTEXT_BYTES {
        return Err(Error::ContextTooLong {
            max: MAX_CONTEXT_BYTES,
            actual: ctx.len(),
        });
    }
    Ok(())
}

/// `c~ = H(mu || w1Encode(w1))`.
pub(crate) fn challenge_seed<const K: usize>(
    p: &ParamSet,
    mu: &[u8; CRH_BYTES],
    w1: &PolyVec<K>,
) -> Result<[u8; MAX_C_TILDE_BYTES]> {
    let mut buf = [0u8; MAX_W1_BYTES];
    let packed = pack_w1(p, w1, &mut buf)?;
    let mut c_tilde = [0u8; MAX_C_TILDE_BYTES];
    shake256(&[mu, packed], &mut c_tilde[..p.c_tilde_bytes]);
    Ok(c_tilde)
}

/// Sign a precomputed message representative `mu`.
///
/// `rnd` is all zeros for the deterministic variant.
pub fn sign_mu<const K: usize, const L: usize>(
    p: &ParamSet,
    sk: &[u8],
    mu: &[u8; CRH_BYTES],
    rnd: &[u8; RND_BYTES],
    sig: &mut [u8],
) -> Result<()> {
    let parts = unpack_secret_key::<K, L>(p, sk)?;
    sign_with_parts(p, &parts, mu, rnd, sig)
}

/// Sign an already formatted `M'` (the FIPS 204 internal interface).
pub fn sign_internal<const K: usize, const L: usize>(
    p: &ParamSet,
    sk: &[u8],
    m_prime: &[&[u8]],
    rnd: &[u8; RND_BYTES],
    sig: &mut [u8],
) -> Result<()> {
    let parts = unpack_secret_key::<K, L>(p, sk)?;
    let mu = message_representative(&parts.tr, m_prime);
    sign_with_parts(p, &parts, &mu, rnd, sig)
}

/// Pure ML-DSA signing: `M' = 0 || |ctx| || ctx || message`.
pub fn sign_message<const K: usize, const L: usize>(
    p: &ParamSet,
    sk: &[u8],
    message: &[u8],
    ctx: &[u8],
    rnd: &[u8; RND_BYTES],
    sig: &mut [u8],
) -> Result<()> {
    check_context(ctx)?;
    let prefix = [0u8, ctx.len() as u8];
    sign_internal::<K, L>(p, sk, &[&prefix, ctx, message], rnd, sig)
}

fn sign_with_parts<const K: usize, const L: usize>(
    p: &ParamSet,
    parts: &SecretKeyParts<K, L>,
    mu: &[u8; CRH_BYTES],
    rnd: &[u8; RND_BYTES],
    sig: &mut [u8],
) -> Result<()> {
    if sig.len() != p.sig_bytes() {
        return Err(Error::InvalidSignatureLength {
            expected: p.sig_bytes(),
            actual: sig.len(),
        });
    }

    let rho_pp = Zeroizing::new(mask_seed(&parts.key, rnd, mu));
    let a = expand_a::<K, L>(&parts.rho);

    let mut s1_hat = Zeroizing::new(parts.s1.clone());
    let mut s2_hat = Zeroizing::new(parts.s2.clone());
    let mut t0_hat = Zeroizing::new(parts.t0.clone());
    s1_hat.ntt();
    s2_hat.ntt();
    t0_hat.ntt();

    let z_bound = p.gamma1 - p.beta;
    let r0_bound = p.gamma2 - p.beta;

    for attempt in 0..MAX_SIGN_ATTEMPTS {
        let kappa = (attempt as usize * L) as u16;
        let mut y = Zeroizing::new(expand_mask::<L>(p, &rho_pp, kappa));

        let mut y_hat = Zeroizing::new(y.clone());
        y_hat.ntt();
        let mut w = Zeroizing::new(a.mul_vec(&y_hat));
        w.inv_ntt_to_mont();
        w.caddq();

        let mut w1 = PolyVec::<K>::zero();
        let mut w0 = Zeroizing::new(PolyVec::<K>::zero());
        for i in 0..K {
            for j in 0..crate::poly::N {
                let (hi, lo) = decompose(w.polys[i][j], p.gamma2);
                w1.polys[i][j] = hi;
                w0.polys[i][j] = lo;
            }
        }

        let c_tilde = challenge_seed(p, mu, &w1)?;
        let mut c_hat = sample_in_ball(&c_tilde[..p.c_tilde_bytes], p.tau);
        c_hat.ntt();

        // z = y + c s1
        let mut z = Zeroizing::new(s1_hat.scale_by(&c_hat));
        z.inv_ntt_to_mont();
        z.add_assign(&y);
        z.center();
        let z_ok = z.check_norm_ct(z_bound);

        // r0 = LowBits(w - c s2) = w0 - c s2 when no carry occurs
        let mut r0 = Zeroizing::new(s2_hat.scale_by(&c_hat));
        r0.inv_ntt_to_mont();
        r0.center();
        let mut low = Zeroizing::new((*w0).clone());
        low.sub_assign(&r0);
        let r0_ok = low.check_norm_ct(r0_bound);

        let mut ct0 = Zeroizing::new(t0_hat.scale_by(&c_hat));
        ct0.inv_ntt_to_mont();
        ct0.center();
        let ct0_ok = ct0.check_norm_ct(p.gamma2);

        low.add_assign(&ct0);
        let mut h = PolyVec::<K>::zero();
        let mut weight = 0u32;
        for i in 0..K {
            for j in 0..crate::poly::N {
                let bit = make_hint(low.polys[i][j], w1.polys[i][j], p.gamma2);
                h.polys[i][j] = bit;
                weight += bit as u32;
            }
        }
        let weight_ok = !weight.ct_gt(&(p.omega as u32));

        y.zeroize();
        r0.zeroize();

        let accept: Choice = z_ok & r0_ok & ct0_ok & weight_ok;
        if bool::from(accept) {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                params = p.name,
                attempts = attempt + 1,
                "signature produced"
            );
            return pack_signature::<K, L>(p, &c_tilde[..p.c_tilde_bytes], &z, &h, sig);
        }
    }

    #[cfg(feature = "tracing")]
    tracing::error!(
        params = p.name,
        attempts = MAX_SIGN_ATTEMPTS,
        "signing loop exhausted"
    );
    Err(Error::InternalSamplingExhaustion {
        attempts: MAX_SIGN_ATTEMPTS,
    })
}
