//! Byte-level entry points selected by a runtime [`SecurityLevel`].
//!
//! Keys and signatures are plain byte strings with no headers; the caller
//! supplies the level out of band. Requires the `std` feature.

use core::fmt;
use core::str::FromStr;

use lattica_core::TryCryptoRng;
use zeroize::{Zeroize, Zeroizing};

use crate::keygen::{keygen_internal, public_key_from_secret as recover_public_key};
use crate::params::{ParamSet, ML_DSA_44, ML_DSA_65, ML_DSA_87, RND_BYTES, SEED_BYTES};
use crate::sign::{check_context, sign_message};
use crate::verify::verify_message;
use crate::{Error, Result};

/// Run a const-generic engine function at the dimensions of `$level`.
macro_rules! by_level {
    ($level:expr, $f:ident, ($($arg:expr),* $(,)?)) => {
        match $level {
            SecurityLevel::MlDsa44 => $f::<4, 4>($($arg),*),
            SecurityLevel::MlDsa65 => $f::<6, 5>($($arg),*),
            SecurityLevel::MlDsa87 => $f::<8, 7>($($arg),*),
        }
    };
}

/// One of the three standardized ML-DSA parameter sets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SecurityLevel {
    /// ML-DSA-44, category 2.
    MlDsa44,
    /// ML-DSA-65, category 3.
    MlDsa65,
    /// ML-DSA-87, category 5.
    MlDsa87,
}

impl SecurityLevel {
    /// All levels, smallest first.
    pub const ALL: [Self; 3] = [Self::MlDsa44, Self::MlDsa65, Self::MlDsa87];

    /// Map 44, 65 or 87 to a level.
    pub fn from_level(level: u16) -> Result<Self> {
        match level {
            44 => Ok(Self::MlDsa44),
            65 => Ok(Self::MlDsa65),
            87 => Ok(Self::MlDsa87),
            _ => Err(Error::UnsupportedParameterSet),
        }
    }

    /// The parameter set for this level.
    pub const fn params(self) -> ParamSet {
        match self {
            Self::MlDsa44 => ML_DSA_44,
            Self::MlDsa65 => ML_DSA_65,
            Self::MlDsa87 => ML_DSA_87,
        }
    }

    /// Public key length in bytes.
    pub const fn public_key_size(self) -> usize {
        self.params().pk_bytes()
    }

    /// Secret key length in bytes.
    pub const fn secret_key_size(self) -> usize {
        self.params().sk_bytes()
    }

    /// Signature length in bytes.
    pub const fn signature_size(self) -> usize {
        self.params().sig_bytes()
    }
}

impl fmt::Display for SecurityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.params().name)
    }
}

impl FromStr for SecurityLevel {
    type Err = Error;

    /// Accepts `ML-DSA-65`, `mldsa65`, `ml_dsa_65` or `65`, in any case.
    fn from_str(s: &str) -> Result<Self> {
        let digits: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_'))
            .collect::<String>()
            .to_ascii_lowercase();
        let digits = digits.strip_prefix("mldsa").unwrap_or(&digits);
        let level = digits.parse::<u16>().map_err(|_| Error::UnsupportedParameterSet)?;
        Self::from_level(level)
    }
}

/// An encoded key pair. The secret half is wiped on drop.
#[derive(Clone)]
pub struct KeyPair {
    /// Parameter set both keys belong to.
    pub level: SecurityLevel,
    /// Encoded public key.
    pub public_key: Vec<u8>,
    /// Encoded secret key.
    pub secret_key: Zeroizing<Vec<u8>>,
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("level", &self.level)
            .field("public_key_len", &self.public_key.len())
            .finish_non_exhaustive()
    }
}

/// Reject contexts longer than 255 bytes.
pub fn validate_context(ctx: &[u8]) -> Result<()> {
    check_context(ctx)
}

/// Deterministic key generation from a 32-byte seed.
pub fn generate_keypair_from_seed(
    level: SecurityLevel,
    seed: &[u8; SEED_BYTES],
) -> Result<KeyPair> {
    let p = level.params();
    let mut public_key = vec![0u8; p.pk_bytes()];
    let mut secret_key = Zeroizing::new(vec![0u8; p.sk_bytes()]);
    by_level!(level, keygen_internal, (&p, seed, &mut public_key, &mut secret_key))?;
    Ok(KeyPair {
        level,
        public_key,
        secret_key,
    })
}

/// Key generation drawing the 32-byte seed from `rng`.
pub fn generate_keypair<R: TryCryptoRng + ?Sized>(
    level: SecurityLevel,
    rng: &mut R,
) -> Result<KeyPair> {
    let mut seed = Zeroizing::new([0u8; SEED_BYTES]);
    rng.try_fill_bytes(&mut seed[..])
        .map_err(|_| Error::RngFailure)?;
    generate_keypair_from_seed(level, &seed)
}

/// Sign `msg`. A missing context is the empty string; missing randomness
/// selects deterministic signing.
pub fn sign(
    level: SecurityLevel,
    sk: &[u8],
    msg: &[u8],
    ctx: Option<&[u8]>,
    rnd: Option<&[u8; RND_BYTES]>,
) -> Result<Vec<u8>> {
    let p = level.params();
    let ctx = ctx.unwrap_or_default();
    let rnd = Zeroizing::new(rnd.copied().unwrap_or_default());
    let mut sig = vec![0u8; p.sig_bytes()];
    by_level!(
        level,
        sign_message,
        (&p, sk, msg, ctx, &rnd, &mut sig)
    )?;
    Ok(sig)
}

/// Hedged signing with 32 fresh bytes from `rng`.
pub fn sign_with_rng<R: TryCryptoRng + ?Sized>(
    level: SecurityLevel,
    sk: &[u8],
    msg: &[u8],
    ctx: Option<&[u8]>,
    rng: &mut R,
) -> Result<Vec<u8>> {
    let mut rnd = [0u8; RND_BYTES];
    rng.try_fill_bytes(&mut rnd)
        .map_err(|_| Error::RngFailure)?;
    let sig = sign(level, sk, msg, ctx, Some(&rnd));
    rnd.zeroize();
    sig
}

/// Check `sig` on `msg`. Wrong lengths and oversized contexts are errors;
/// everything else is `Ok(true)` or `Ok(false)`.
pub fn verify(
    level: SecurityLevel,
    pk: &[u8],
    msg: &[u8],
    ctx: Option<&[u8]>,
    sig: &[u8],
) -> Result<bool> {
    let p = level.params();
    let ctx = ctx.unwrap_or_default();
    by_level!(
        level,
        verify_message,
        (&p, pk, msg, ctx, sig)
    )
}

/// Recompute the public key from a secret key, validating its consistency.
pub fn public_key_from_secret(level: SecurityLevel, sk: &[u8]) -> Result<Vec<u8>> {
    let p = level.params();
    let mut pk = vec![0u8; p.pk_bytes()];
    by_level!(level, recover_public_key, (&p, sk, &mut pk))?;
    Ok(pk)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[derive(Debug)]
    struct Exhausted;

    impl fmt::Display for Exhausted {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("entropy exhausted")
        }
    }

    impl std::error::Error for Exhausted {}

    struct FailingRng;

    impl rand_core::TryRngCore for FailingRng {
        type Error = Exhausted;

        fn try_next_u32(&mut self) -> core::result::Result<u32, Exhausted> {
            Err(Exhausted)
        }

        fn try_next_u64(&mut self) -> core::result::Result<u64, Exhausted> {
            Err(Exhausted)
        }

        fn try_fill_bytes(&mut self, _dst: &mut [u8]) -> core::result::Result<(), Exhausted> {
            Err(Exhausted)
        }
    }

    impl rand_core::TryCryptoRng for FailingRng {}

    #[test]
    fn level_parsing() {
        assert_eq!(SecurityLevel::from_level(65), Ok(SecurityLevel::MlDsa65));
        assert_eq!(SecurityLevel::from_level(128), Err(Error::UnsupportedParameterSet));
        for s in ["ML-DSA-65", "65", "mldsa65", "ml_dsa_65", "MLDSA65"] {
            assert_eq!(s.parse::<SecurityLevel>(), Ok(SecurityLevel::MlDsa65), "{s}");
        }
        assert!("ML-KEM-768".parse::<SecurityLevel>().is_err());
        assert!("".parse::<SecurityLevel>().is_err());
        for level in SecurityLevel::ALL {
            assert_eq!(level.to_string().parse::<SecurityLevel>(), Ok(level));
        }
    }

    #[test]
    fn size_getters() {
        let sizes: Vec<_> = SecurityLevel::ALL
            .iter()
            .map(|l| (l.public_key_size(), l.secret_key_size(), l.signature_size()))
            .collect();
        assert_eq!(
            sizes,
            [(1312, 2560, 2420), (1952, 4032, 3309), (2592, 4896, 4627)]
        );
    }

    #[test]
    fn sign_and_verify_every_level() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        for level in SecurityLevel::ALL {
            let kp = generate_keypair(level, &mut rng).unwrap();
            assert_eq!(kp.level, level);
            assert_eq!(kp.public_key.len(), level.public_key_size());
            assert_eq!(kp.secret_key.len(), level.secret_key_size());

            let sig = sign(level, &kp.secret_key, b"hello", Some(b"ctx"), None).unwrap();
            assert_eq!(sig.len(), level.signature_size());
            assert_eq!(verify(level, &kp.public_key, b"hello", Some(b"ctx"), &sig), Ok(true));
            assert_eq!(verify(level, &kp.public_key, b"hello", None, &sig), Ok(false));
        }
    }

    #[test]
    fn missing_context_is_empty_context() {
        let kp = generate_keypair_from_seed(SecurityLevel::MlDsa44, &[0u8; 32]).unwrap();
        let a = sign(SecurityLevel::MlDsa44, &kp.secret_key, b"m", None, None).unwrap();
        let b = sign(SecurityLevel::MlDsa44, &kp.secret_key, b"m", Some(b""), Some(&[0u8; 32]))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn hedged_signing_verifies() {
        let kp = generate_keypair_from_seed(SecurityLevel::MlDsa65, &[9u8; 32]).unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(5);
        let sig = sign_with_rng(SecurityLevel::MlDsa65, &kp.secret_key, b"m", None, &mut rng)
            .unwrap();
        let det = sign(SecurityLevel::MlDsa65, &kp.secret_key, b"m", None, None).unwrap();
        assert_ne!(sig, det);
        assert_eq!(verify(SecurityLevel::MlDsa65, &kp.public_key, b"m", None, &sig), Ok(true));
    }

    #[test]
    fn rng_failure_is_reported() {
        assert!(matches!(
            generate_keypair(SecurityLevel::MlDsa44, &mut FailingRng),
            Err(Error::RngFailure)
        ));
        let kp = generate_keypair_from_seed(SecurityLevel::MlDsa44, &[0u8; 32]).unwrap();
        assert!(matches!(
            sign_with_rng(SecurityLevel::MlDsa44, &kp.secret_key, b"m", None, &mut FailingRng),
            Err(Error::RngFailure)
        ));
    }

    #[test]
    fn size_mismatches_are_errors() {
        let kp = generate_keypair_from_seed(SecurityLevel::MlDsa44, &[0u8; 32]).unwrap();
        assert!(matches!(
            sign(SecurityLevel::MlDsa65, &kp.secret_key, b"m", None, None),
            Err(Error::InvalidKeyLength { .. })
        ));
        let sig = sign(SecurityLevel::MlDsa44, &kp.secret_key, b"m", None, None).unwrap();
        assert!(matches!(
            verify(SecurityLevel::MlDsa44, &kp.public_key, b"m", None, &sig[1..]),
            Err(Error::InvalidSignatureLength { .. })
        ));
        assert!(matches!(
            validate_context(&[0u8; 300]),
            Err(Error::ContextTooLong { max: 255, actual: 300 })
        ));
    }

    #[test]
    fn public_key_recovery() {
        let kp = generate_keypair_from_seed(SecurityLevel::MlDsa87, &[4u8; 32]).unwrap();
        assert_eq!(
            public_key_from_secret(SecurityLevel::MlDsa87, &kp.secret_key).unwrap(),
            kp.public_key
        );
    }

    #[test]
    fn key_pair_carries_its_level() {
        for level in SecurityLevel::ALL {
            let kp = generate_keypair_from_seed(level, &[9u8; 32]).unwrap();
            assert_eq!(kp.level, level);
            assert_eq!(kp.public_key.len(), kp.level.public_key_size());

            let shown = format!("{kp:?}");
            assert!(shown.contains(&format!("level: {level:?}")));
            assert!(!shown.contains("secret_key"));
        }
    }
}
