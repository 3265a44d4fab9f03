//! `ML-DSA.KeyGen_internal` (FIPS 204 Algorithm 6) and public-key recovery.

use subtle::{Choice, ConstantTimeEq};
use zeroize::{Zeroize, Zeroizing};

use crate::hash::{public_key_hash, shake256};
use crate::packing::{pack_public_key, pack_secret_key, unpack_secret_key, SecretKeyParts};
use crate::params::{ParamSet, CRH_BYTES, SEED_BYTES};
use crate::polyvec::{Matrix, PolyVec};
use crate::rounding::power2round;
use crate::sample::{expand_a, expand_s};
use crate::{Error, Result};

/// `t = A s1 + s2` with canonical coefficients.
pub(crate) fn compute_t<const K: usize, const L: usize>(
    a: &Matrix<K, L>,
    s1: &PolyVec<L>,
    s2: &PolyVec<K>,
) -> PolyVec<K> {
    let mut s1_hat = Zeroizing::new(s1.clone());
    s1_hat.ntt();
    let mut t = a.mul_vec(&s1_hat);
    t.inv_ntt_to_mont();
    t.add_assign(s2);
    t.freeze();
    t
}

/// Split `t` into `(t1, t0)` coefficient-wise.
pub(crate) fn split_t<const K: usize>(t: &PolyVec<K>) -> (PolyVec<K>, PolyVec<K>) {
    let mut t1 = PolyVec::<K>::zero();
    let mut t0 = PolyVec::<K>::zero();
    for ((hi, lo), src) in t1.polys.iter_mut().zip(&mut t0.polys).zip(&t.polys) {
        for ((h, l), &c) in hi.coeffs.iter_mut().zip(&mut lo.coeffs).zip(&src.coeffs) {
            (*h, *l) = power2round(c);
        }
    }
    (t1, t0)
}

/// Deterministic key generation from the 32-byte seed `xi`.
///
/// Writes `pk_bytes()` bytes to `pk` and `sk_bytes()` bytes to `sk`.
pub fn keygen_internal<const K: usize, const L: usize>(
    p: &ParamSet,
    xi: &[u8; SEED_BYTES],
    pk: &mut [u8],
    sk: &mut [u8],
) -> Result<()> {
    debug_assert_eq!((p.k, p.l), (K, L));

    let mut expanded = Zeroizing::new([0u8; 2 * SEED_BYTES + CRH_BYTES]);
    shake256(&[xi, &[K as u8, L as u8]], &mut expanded[..]);

    let mut rho = [0u8; SEED_BYTES];
    let mut rho_prime = Zeroizing::new([0u8; CRH_BYTES]);
    let mut key = [0u8; SEED_BYTES];
    rho.copy_from_slice(&expanded[..SEED_BYTES]);
    rho_prime.copy_from_slice(&expanded[SEED_BYTES..SEED_BYTES + CRH_BYTES]);
    key.copy_from_slice(&expanded[SEED_BYTES + CRH_BYTES..]);

    let a = expand_a::<K, L>(&rho);
    let (s1, s2) = expand_s::<K, L>(p, &rho_prime);
    let mut t = compute_t(&a, &s1, &s2);
    let (t1, t0) = split_t(&t);
    t.zeroize();

    pack_public_key(p, &rho, &t1, pk)?;
    let parts = SecretKeyParts {
        rho,
        key,
        tr: public_key_hash(pk),
        s1,
        s2,
        t0,
    };
    key.zeroize();
    pack_secret_key(p, &parts, sk)
}

/// Recompute the public key belonging to `sk`.
///
/// Fails with `MalformedEncoding` when the stored `t0` or `tr` do not match
/// what `rho`, `s1` and `s2` imply.
pub fn public_key_from_secret<const K: usize, const L: usize>(
    p: &ParamSet,
    sk: &[u8],
    pk: &mut [u8],
) -> Result<()> {
    let parts = unpack_secret_key::<K, L>(p, sk)?;
    let a = expand_a::<K, L>(&parts.rho);
    let mut t = compute_t(&a, &parts.s1, &parts.s2);
    let (t1, mut t0) = split_t(&t);
    t.zeroize();

    let mut same_t0 = Choice::from(1u8);
    for (x, y) in t0.polys.iter().zip(&parts.t0.polys) {
        for (&u, &v) in x.coeffs.iter().zip(&y.coeffs) {
            same_t0 &= u.ct_eq(&v);
        }
    }
    t0.zeroize();

    pack_public_key(p, &parts.rho, &t1, pk)?;
    let same_tr = public_key_hash(pk)[..].ct_eq(&parts.tr[..]);
    if bool::from(same_t0 & same_tr) {
        Ok(())
    } else {
        pk.fill(0);
        Err(Error::MalformedEncoding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ML_DSA_44;

    #[test]
    fn keygen_is_deterministic() {
        let p = ML_DSA_44;
        let seed = [3u8; 32];
        let (mut pk1, mut sk1) = ([0u8; 1312], [0u8; 2560]);
        let (mut pk2, mut sk2) = ([0u8; 1312], [0u8; 2560]);
        keygen_internal::<4, 4>(&p, &seed, &mut pk1, &mut sk1).unwrap();
        keygen_internal::<4, 4>(&p, &seed, &mut pk2, &mut sk2).unwrap();
        assert_eq!(pk1, pk2);
        assert_eq!(sk1, sk2);
        assert_eq!(&pk1[..32], &sk1[..32]);
        assert_eq!(&sk1[64..128], &public_key_hash(&pk1));
    }

    #[test]
    fn secret_key_decodes_to_small_secrets() {
        let p = ML_DSA_44;
        let (mut pk, mut sk) = ([0u8; 1312], [0u8; 2560]);
        keygen_internal::<4, 4>(&p, &[8u8; 32], &mut pk, &mut sk).unwrap();
        let parts = unpack_secret_key::<4, 4>(&p, &sk).unwrap();
        assert!(parts.s1.polys.iter().all(|s| s.norm_inf() <= p.eta));
        assert!(parts.s2.polys.iter().all(|s| s.norm_inf() <= p.eta));
        assert!(parts.t0.polys.iter().all(|t| t.norm_inf() <= 1 << 12));
    }

    #[test]
    fn public_key_recovered_from_secret() {
        let p = ML_DSA_44;
        let (mut pk, mut sk) = ([0u8; 1312], [0u8; 2560]);
        keygen_internal::<4, 4>(&p, &[1u8; 32], &mut pk, &mut sk).unwrap();
        let mut recovered = [0u8; 1312];
        public_key_from_secret::<4, 4>(&p, &sk, &mut recovered).unwrap();
        assert_eq!(recovered, pk);
    }

    #[test]
    fn inconsistent_secret_key_rejected() {
        let p = ML_DSA_44;
        let (mut pk, mut sk) = ([0u8; 1312], [0u8; 2560]);
        keygen_internal::<4, 4>(&p, &[2u8; 32], &mut pk, &mut sk).unwrap();
        let mut out = [0u8; 1312];

        let mut bad_tr = sk;
        bad_tr[70] ^= 1;
        assert_eq!(
            public_key_from_secret::<4, 4>(&p, &bad_tr, &mut out),
            Err(Error::MalformedEncoding)
        );

        let mut bad_t0 = sk;
        bad_t0[2559] ^= 0x10;
        assert_eq!(
            public_key_from_secret::<4, 4>(&p, &bad_t0, &mut out),
            Err(Error::MalformedEncoding)
        );
    }
}
