//! Digital signature trait.

use crate::{Error, Result};
use rand_core::TryCryptoRng;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Size of the seed a key pair is derived from.
pub const KEYGEN_SEED_SIZE: usize = 32;

/// Size of the per-signature randomness.
pub const SIGNING_RANDOMNESS_SIZE: usize = 32;

/// Digital signature scheme with FIPS 204 style context strings.
///
/// Signing is exposed in two explicit modes: deterministic (the randomness
/// input is all zeros) and hedged (32 fresh bytes from an RNG). Neither is
/// chosen implicitly; [`Signer::sign`] takes the randomness as an argument.
///
/// # Example
///
/// ```ignore
/// use lattica_core::Signer;
///
/// let (sk, pk) = MySigner::keygen(&mut rng)?;
/// let sig = MySigner::sign_deterministic(&sk, message, b"")?;
/// MySigner::verify(&pk, message, b"", &sig)?;
/// ```
pub trait Signer {
    /// Signing key (private key).
    type SigningKey: Zeroize + ZeroizeOnDrop;

    /// Verification key (public key).
    type VerificationKey: Clone;

    /// Signature produced by signing.
    type Signature: Clone;

    /// Size of the signing key in bytes.
    const SIGNING_KEY_SIZE: usize;

    /// Size of the verification key in bytes.
    const VERIFICATION_KEY_SIZE: usize;

    /// Size of the signature in bytes.
    const SIGNATURE_SIZE: usize;

    /// Derive a key pair from a 32-byte seed.
    ///
    /// The same seed always yields byte-identical keys.
    fn keygen_from_seed(
        seed: &[u8; KEYGEN_SEED_SIZE],
    ) -> Result<(Self::SigningKey, Self::VerificationKey)>;

    /// Generate a new key pair.
    ///
    /// # Arguments
    ///
    /// * `rng` - A cryptographically secure random number generator.
    ///
    /// # Returns
    ///
    /// A tuple of (`signing_key`, `verification_key`), or
    /// [`Error::RngFailure`] if the generator fails.
    fn keygen<R: TryCryptoRng + ?Sized>(
        rng: &mut R,
    ) -> Result<(Self::SigningKey, Self::VerificationKey)> {
        let mut seed = [0u8; KEYGEN_SEED_SIZE];
        rng.try_fill_bytes(&mut seed)
            .map_err(|_| Error::RngFailure)?;
        let keys = Self::keygen_from_seed(&seed);
        seed.zeroize();
        keys
    }

    /// Sign a message under a context string.
    ///
    /// # Arguments
    ///
    /// * `sk` - The signing (private) key.
    /// * `message` - The message to sign.
    /// * `context` - Application context, at most 255 bytes.
    /// * `rnd` - Signing randomness; all zeros gives deterministic signing.
    ///
    /// # Returns
    ///
    /// The signature.
    fn sign(
        sk: &Self::SigningKey,
        message: &[u8],
        context: &[u8],
        rnd: &[u8; SIGNING_RANDOMNESS_SIZE],
    ) -> Result<Self::Signature>;

    /// Deterministic signing: identical inputs give identical signatures.
    fn sign_deterministic(
        sk: &Self::SigningKey,
        message: &[u8],
        context: &[u8],
    ) -> Result<Self::Signature> {
        Self::sign(sk, message, context, &[0u8; SIGNING_RANDOMNESS_SIZE])
    }

    /// Hedged signing with 32 bytes drawn from `rng`.
    fn sign_hedged<R: TryCryptoRng + ?Sized>(
        sk: &Self::SigningKey,
        message: &[u8],
        context: &[u8],
        rng: &mut R,
    ) -> Result<Self::Signature> {
        let mut rnd = [0u8; SIGNING_RANDOMNESS_SIZE];
        rng.try_fill_bytes(&mut rnd)
            .map_err(|_| Error::RngFailure)?;
        let sig = Self::sign(sk, message, context, &rnd);
        rnd.zeroize();
        sig
    }

    /// Verify a signature.
    ///
    /// # Arguments
    ///
    /// * `pk` - The verification (public) key.
    /// * `message` - The message that was signed.
    /// * `context` - The context used when signing.
    /// * `signature` - The signature to verify.
    ///
    /// # Returns
    ///
    /// `Ok(())` if the signature is valid, `Err(Error::VerificationFailed)` otherwise.
    fn verify(
        pk: &Self::VerificationKey,
        message: &[u8],
        context: &[u8],
        signature: &Self::Signature,
    ) -> Result<()>;
}
