//! Fuzz target for ML-DSA signing.
//!
//! Signing with a well-formed key must succeed deterministically for any
//! message and context up to 255 bytes. Signing with arbitrary key bytes
//! must fail cleanly or succeed, never panic.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use lattica_ml_dsa::api::{self, SecurityLevel};
use lattica_ml_dsa::Error;

#[derive(Debug, Arbitrary)]
struct SignInput {
    seed: [u8; 32],
    rnd: [u8; 32],
    message: Vec<u8>,
    context: Vec<u8>,
    raw_key: Vec<u8>,
    variant: u8,
}

fuzz_target!(|input: SignInput| {
    if input.message.len() > 10000 {
        return;
    }
    let level = SecurityLevel::ALL[usize::from(input.variant % 3)];
    let kp = api::generate_keypair_from_seed(level, &input.seed).unwrap();

    let result = api::sign(
        level,
        &kp.secret_key,
        &input.message,
        Some(&input.context),
        Some(&input.rnd),
    );
    if input.context.len() > 255 {
        assert!(matches!(result, Err(Error::ContextTooLong { .. })));
        return;
    }
    let sig = result.unwrap();
    assert_eq!(sig.len(), level.signature_size());

    let sig2 = api::sign(
        level,
        &kp.secret_key,
        &input.message,
        Some(&input.context),
        Some(&input.rnd),
    )
    .unwrap();
    assert_eq!(sig, sig2, "Sign should be deterministic with same rnd");

    // Arbitrary bytes of the right length: decode may reject, must not panic.
    let mut raw = input.raw_key;
    raw.resize(level.secret_key_size(), 0);
    match api::sign(level, &raw, &input.message, None, None) {
        Ok(s) => assert_eq!(s.len(), level.signature_size()),
        Err(e) => assert!(
            e.is_malformed() || matches!(e, Error::InternalSamplingExhaustion { .. })
        ),
    }
});
