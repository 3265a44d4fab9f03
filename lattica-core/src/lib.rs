//! # Lattica Core
//!
//! Shared vocabulary for the Lattica signature crates:
//! - the [`Error`] taxonomy and [`Result`] alias
//! - the [`Signer`] trait implemented by every parameter set
//! - re-exports of the zeroization and constant-time helpers the engines use

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod error;
mod traits;

pub use error::{Error, Result};
pub use traits::{Signer, KEYGEN_SEED_SIZE, SIGNING_RANDOMNESS_SIZE};

/// Re-export zeroize for convenience.
pub use zeroize::{Zeroize, ZeroizeOnDrop};

/// Re-export subtle for constant-time operations.
pub use subtle;

/// Re-export of the randomness traits accepted by [`Signer`].
pub use rand_core::{CryptoRng, TryCryptoRng};
