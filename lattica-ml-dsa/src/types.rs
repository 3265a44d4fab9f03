//! Typed per-level wrappers.
//!
//! [`define_ml_dsa!`] expands, inside a variant module, to the algorithm
//! marker, the fixed-size key and signature newtypes and the
//! [`Signer`](lattica_core::Signer) implementation for one parameter set.

macro_rules! define_ml_dsa {
    (
        $(#[$meta:meta])*
        $name:ident,
        params: $params:path,
        K: $K:literal,
        L: $L:literal
    ) => {
        const PARAMS: $crate::params::ParamSet = $params;

        /// Signing key length in bytes.
        pub const SK_BYTES: usize = PARAMS.sk_bytes();

        /// Verification key length in bytes.
        pub const PK_BYTES: usize = PARAMS.pk_bytes();

        /// Signature length in bytes.
        pub const SIG_BYTES: usize = PARAMS.sig_bytes();

        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default)]
        pub struct $name;

        /// Signing key (secret key). Wiped on drop.
        #[derive(Clone, zeroize::Zeroize, zeroize::ZeroizeOnDrop)]
        pub struct SigningKey {
            bytes: [u8; SK_BYTES],
        }

        impl SigningKey {
            /// Create from bytes. Only the length is checked here; the
            /// contents are validated when the key is used.
            pub fn from_bytes(bytes: &[u8]) -> $crate::Result<Self> {
                if bytes.len() != SK_BYTES {
                    return Err($crate::Error::InvalidKeyLength {
                        expected: SK_BYTES,
                        actual: bytes.len(),
                    });
                }
                let mut key = [0u8; SK_BYTES];
                key.copy_from_slice(bytes);
                Ok(Self { bytes: key })
            }

            /// Get the raw bytes.
            pub fn as_bytes(&self) -> &[u8; SK_BYTES] {
                &self.bytes
            }
        }

        impl core::fmt::Debug for SigningKey {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str("SigningKey(..)")
            }
        }

        /// Verification key (public key).
        #[derive(Clone, Debug, PartialEq, Eq)]
        pub struct VerificationKey {
            bytes: [u8; PK_BYTES],
        }

        impl VerificationKey {
            /// Create from bytes.
            pub fn from_bytes(bytes: &[u8]) -> $crate::Result<Self> {
                if bytes.len() != PK_BYTES {
                    return Err($crate::Error::InvalidKeyLength {
                        expected: PK_BYTES,
                        actual: bytes.len(),
                    });
                }
                let mut key = [0u8; PK_BYTES];
                key.copy_from_slice(bytes);
                Ok(Self { bytes: key })
            }

            /// Get the raw bytes.
            pub fn as_bytes(&self) -> &[u8; PK_BYTES] {
                &self.bytes
            }

            /// Precompute `A`, `t1 · 2^d` and `H(pk)` for repeated
            /// verification under this key.
            ///
            /// # Example
            ///
            /// ```ignore
            /// let expanded = pk.expand()?;
            /// for (msg, sig) in batch {
            ///     MlDsa65::verify_expanded(&expanded, msg, b"", &sig)?;
            /// }
            /// ```
            pub fn expand(&self) -> $crate::Result<ExpandedVerificationKey> {
                ExpandedVerificationKey::from_public_key(&PARAMS, &self.bytes)
            }
        }

        /// Verification key with the public matrix precomputed.
        pub type ExpandedVerificationKey = $crate::verify::ExpandedVerificationKey<$K, $L>;

        /// Signature.
        #[derive(Clone, Debug, PartialEq, Eq)]
        pub struct Signature {
            bytes: [u8; SIG_BYTES],
        }

        impl Signature {
            /// Create from bytes.
            pub fn from_bytes(bytes: &[u8]) -> $crate::Result<Self> {
                if bytes.len() != SIG_BYTES {
                    return Err($crate::Error::InvalidSignatureLength {
                        expected: SIG_BYTES,
                        actual: bytes.len(),
                    });
                }
                let mut sig = [0u8; SIG_BYTES];
                sig.copy_from_slice(bytes);
                Ok(Self { bytes: sig })
            }

            /// Get the raw bytes.
            pub fn as_bytes(&self) -> &[u8; SIG_BYTES] {
                &self.bytes
            }
        }

        fn accept(valid: bool) -> $crate::Result<()> {
            if valid {
                Ok(())
            } else {
                Err($crate::Error::VerificationFailed)
            }
        }

        impl lattica_core::Signer for $name {
            type SigningKey = SigningKey;
            type VerificationKey = VerificationKey;
            type Signature = Signature;

            const SIGNING_KEY_SIZE: usize = SK_BYTES;
            const VERIFICATION_KEY_SIZE: usize = PK_BYTES;
            const SIGNATURE_SIZE: usize = SIG_BYTES;

            fn keygen_from_seed(
                seed: &[u8; lattica_core::KEYGEN_SEED_SIZE],
            ) -> $crate::Result<(SigningKey, VerificationKey)> {
                let mut sk = SigningKey { bytes: [0u8; SK_BYTES] };
                let mut pk = VerificationKey { bytes: [0u8; PK_BYTES] };
                $crate::keygen::keygen_internal::<$K, $L>(
                    &PARAMS,
                    seed,
                    &mut pk.bytes,
                    &mut sk.bytes,
                )?;
                Ok((sk, pk))
            }

            fn sign(
                sk: &SigningKey,
                message: &[u8],
                context: &[u8],
                rnd: &[u8; lattica_core::SIGNING_RANDOMNESS_SIZE],
            ) -> $crate::Result<Signature> {
                let mut sig = Signature { bytes: [0u8; SIG_BYTES] };
                $crate::sign::sign_message::<$K, $L>(
                    &PARAMS,
                    &sk.bytes,
                    message,
                    context,
                    rnd,
                    &mut sig.bytes,
                )?;
                Ok(sig)
            }

            fn verify(
                pk: &VerificationKey,
                message: &[u8],
                context: &[u8],
                signature: &Signature,
            ) -> $crate::Result<()> {
                accept($crate::verify::verify_message::<$K, $L>(
                    &PARAMS,
                    &pk.bytes,
                    message,
                    context,
                    &signature.bytes,
                )?)
            }
        }

        impl $name {
            /// The parameter set behind this type.
            pub const PARAMS: $crate::params::ParamSet = PARAMS;

            /// Sign an already formatted `M'`, bypassing the context prefix.
            pub fn sign_internal(
                sk: &SigningKey,
                m_prime: &[&[u8]],
                rnd: &[u8; lattica_core::SIGNING_RANDOMNESS_SIZE],
            ) -> $crate::Result<Signature> {
                let mut sig = Signature { bytes: [0u8; SIG_BYTES] };
                $crate::sign::sign_internal::<$K, $L>(
                    &PARAMS,
                    &sk.bytes,
                    m_prime,
                    rnd,
                    &mut sig.bytes,
                )?;
                Ok(sig)
            }

            /// Verify a signature over an already formatted `M'`.
            pub fn verify_internal(
                pk: &VerificationKey,
                m_prime: &[&[u8]],
                signature: &Signature,
            ) -> $crate::Result<()> {
                accept($crate::verify::verify_internal::<$K, $L>(
                    &PARAMS,
                    &pk.bytes,
                    m_prime,
                    &signature.bytes,
                )?)
            }

            /// The 64-byte message representative `mu` for `message` under
            /// `pk` and `context`.
            pub fn compute_mu(
                pk: &VerificationKey,
                message: &[u8],
                context: &[u8],
            ) -> $crate::Result<[u8; $crate::params::CRH_BYTES]> {
                $crate::sign::check_context(context)?;
                let tr = $crate::hash::public_key_hash(&pk.bytes);
                let prefix = [0u8, context.len() as u8];
                Ok($crate::hash::message_representative(&tr, &[&prefix, context, message]))
            }

            /// Sign an externally computed `mu`.
            pub fn sign_mu(
                sk: &SigningKey,
                mu: &[u8; $crate::params::CRH_BYTES],
                rnd: &[u8; lattica_core::SIGNING_RANDOMNESS_SIZE],
            ) -> $crate::Result<Signature> {
                let mut sig = Signature { bytes: [0u8; SIG_BYTES] };
                $crate::sign::sign_mu::<$K, $L>(&PARAMS, &sk.bytes, mu, rnd, &mut sig.bytes)?;
                Ok(sig)
            }

            /// Verify a signature over an externally computed `mu`.
            pub fn verify_mu(
                pk: &VerificationKey,
                mu: &[u8; $crate::params::CRH_BYTES],
                signature: &Signature,
            ) -> $crate::Result<()> {
                accept($crate::verify::verify_mu::<$K, $L>(
                    &PARAMS,
                    &pk.bytes,
                    mu,
                    &signature.bytes,
                )?)
            }

            /// Verify using a key prepared with [`VerificationKey::expand`].
            pub fn verify_expanded(
                expanded: &ExpandedVerificationKey,
                message: &[u8],
                context: &[u8],
                signature: &Signature,
            ) -> $crate::Result<()> {
                accept(expanded.verify_message(message, context, &signature.bytes)?)
            }

            /// Recompute the verification key from a signing key.
            ///
            /// Fails with [`Error::MalformedEncoding`]($crate::Error::MalformedEncoding)
            /// if the signing key is internally inconsistent.
            pub fn verification_key(sk: &SigningKey) -> $crate::Result<VerificationKey> {
                let mut pk = VerificationKey { bytes: [0u8; PK_BYTES] };
                $crate::keygen::public_key_from_secret::<$K, $L>(
                    &PARAMS,
                    &sk.bytes,
                    &mut pk.bytes,
                )?;
                Ok(pk)
            }
        }
    };
}

pub(crate) use define_ml_dsa;
