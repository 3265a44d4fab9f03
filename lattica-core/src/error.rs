//! Error types for Lattica signature operations.

use core::fmt;

/// Result type alias using [`Error`].
pub type Result<T> = core::result::Result<T, Error>;

/// Errors that can occur during key generation, signing and verification.
///
/// A signature that decodes but does not verify is reported as
/// [`Error::VerificationFailed`] by [`Signer::verify`](crate::Signer::verify);
/// byte-level entry points report it as a plain `false` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The entropy source could not supply bytes.
    RngFailure,

    /// A key was not the expected number of bytes.
    InvalidKeyLength {
        /// Expected length in bytes.
        expected: usize,
        /// Actual length provided.
        actual: usize,
    },

    /// A signature was not the expected number of bytes.
    InvalidSignatureLength {
        /// Expected length in bytes.
        expected: usize,
        /// Actual length provided.
        actual: usize,
    },

    /// A packed value was out of range, or a secret key is internally
    /// inconsistent.
    MalformedEncoding,

    /// A value handed to an encoder does not fit its bit width.
    CoefficientOutOfRange,

    /// Context strings are limited to 255 bytes.
    ContextTooLong {
        /// Largest accepted length.
        max: usize,
        /// Actual length provided.
        actual: usize,
    },

    /// Signature verification failed.
    VerificationFailed,

    /// The signing loop ran past its safety cap.
    InternalSamplingExhaustion {
        /// Attempts made before giving up.
        attempts: u32,
    },

    /// Parameter set not supported.
    UnsupportedParameterSet,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::RngFailure => write!(f, "random number generator failure"),
            Error::InvalidKeyLength { expected, actual } => {
                write!(f, "invalid key length: expected {expected}, got {actual}")
            }
            Error::InvalidSignatureLength { expected, actual } => {
                write!(
                    f,
                    "invalid signature length: expected {expected}, got {actual}"
                )
            }
            Error::MalformedEncoding => write!(f, "malformed encoding"),
            Error::CoefficientOutOfRange => write!(f, "coefficient out of range for encoding"),
            Error::ContextTooLong { max, actual } => {
                write!(f, "context too long: at most {max} bytes, got {actual}")
            }
            Error::VerificationFailed => write!(f, "signature verification failed"),
            Error::InternalSamplingExhaustion { attempts } => {
                write!(f, "signing gave up after {attempts} rejected attempts")
            }
            Error::UnsupportedParameterSet => write!(f, "unsupported parameter set"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl Error {
    /// True for the length and decoding errors that mean "bad input bytes".
    pub const fn is_malformed(&self) -> bool {
        matches!(
            self,
            Error::InvalidKeyLength { .. }
                | Error::InvalidSignatureLength { .. }
                | Error::MalformedEncoding
        )
    }
}
