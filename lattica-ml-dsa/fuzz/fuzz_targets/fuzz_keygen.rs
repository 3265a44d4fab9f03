//! Fuzz target for ML-DSA key generation.
//!
//! Checks that seeded KeyGen never panics, is deterministic, produces keys
//! of the advertised size, and that the public key can be recomputed from
//! the secret key.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use lattica_ml_dsa::api::{self, SecurityLevel};

#[derive(Debug, Arbitrary)]
struct KeyGenInput {
    seed: [u8; 32],
    variant: u8,
}

fuzz_target!(|input: KeyGenInput| {
    let level = SecurityLevel::ALL[usize::from(input.variant % 3)];

    let kp = api::generate_keypair_from_seed(level, &input.seed).unwrap();
    let again = api::generate_keypair_from_seed(level, &input.seed).unwrap();
    assert_eq!(kp.public_key, again.public_key, "KeyGen should be deterministic");
    assert_eq!(*kp.secret_key, *again.secret_key, "KeyGen should be deterministic");

    assert_eq!(kp.public_key.len(), level.public_key_size());
    assert_eq!(kp.secret_key.len(), level.secret_key_size());
    assert_eq!(&kp.public_key[..32], &kp.secret_key[..32], "rho shared by both keys");

    let recovered = api::public_key_from_secret(level, &kp.secret_key).unwrap();
    assert_eq!(recovered, kp.public_key);
});
