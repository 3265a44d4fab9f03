//! Fuzz target for ML-DSA verification.
//!
//! Verification must never panic. Correctly sized garbage yields
//! `Ok(false)` rather than an error, and a modified message is rejected.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use lattica_ml_dsa::api::{self, SecurityLevel};

#[derive(Debug, Arbitrary)]
struct VerifyInput {
    seed: [u8; 32],
    rnd: [u8; 32],
    message: Vec<u8>,
    corruption: Option<CorruptionType>,
    variant: u8,
}

#[derive(Debug, Arbitrary)]
enum CorruptionType {
    /// Flip bits in one signature byte.
    CorruptSignature { position: usize, xor_value: u8 },
    /// Flip bits in one message byte.
    CorruptMessage { position: usize, xor_value: u8 },
    /// Replace the signature with fuzzer bytes.
    RandomSignature { random_sig: Vec<u8> },
    /// Replace the public key with fuzzer bytes.
    RandomKey { random_pk: Vec<u8> },
}

fuzz_target!(|input: VerifyInput| {
    if input.message.len() > 10000 {
        return;
    }
    let level = SecurityLevel::ALL[usize::from(input.variant % 3)];
    let kp = api::generate_keypair_from_seed(level, &input.seed).unwrap();
    let mut sig = api::sign(level, &kp.secret_key, &input.message, None, Some(&input.rnd)).unwrap();
    let mut msg = input.message.clone();

    match input.corruption {
        None => {
            assert_eq!(api::verify(level, &kp.public_key, &msg, None, &sig), Ok(true));
        }
        Some(CorruptionType::CorruptSignature { position, xor_value }) => {
            if position < sig.len() && xor_value != 0 {
                sig[position] ^= xor_value;
                // The encoding is canonical, hint bytes included.
                assert_eq!(api::verify(level, &kp.public_key, &msg, None, &sig), Ok(false));
            }
        }
        Some(CorruptionType::CorruptMessage { position, xor_value }) => {
            if position < msg.len() && xor_value != 0 {
                msg[position] ^= xor_value;
                assert_eq!(api::verify(level, &kp.public_key, &msg, None, &sig), Ok(false));
            }
        }
        Some(CorruptionType::RandomSignature { mut random_sig }) => {
            random_sig.resize(level.signature_size(), 0);
            assert!(api::verify(level, &kp.public_key, &msg, None, &random_sig).is_ok());
        }
        Some(CorruptionType::RandomKey { mut random_pk }) => {
            random_pk.resize(level.public_key_size(), 0);
            assert!(api::verify(level, &random_pk, &msg, None, &sig).is_ok());
        }
    }
});
