//! Constant-time checks for ML-DSA signing and verification.
//!
//! Signing rejects a data-dependent number of candidates, so end-to-end
//! timing varies by message. The classes below hold the message fixed and
//! vary only secret or validity-related input.
//!
//! Run with: `cargo run --release -p lattica-timing --bin ml_dsa`

use dudect_bencher::rand::Rng;
use dudect_bencher::{ctbench_main, BenchRng, Class, CtRunner};
use lattica_ml_dsa::dsa65::{MlDsa65, Signature, SigningKey, VerificationKey};
use lattica_ml_dsa::Signer;
use once_cell::sync::Lazy;

/// Pre-generated keys and signatures.
struct TestData {
    sk_left: SigningKey,
    sk_right: SigningKey,
    pk: VerificationKey,
    sig_valid: Signature,
    sig_forged: Signature,
}

static TEST_DATA: Lazy<TestData> = Lazy::new(|| {
    let (sk_left, pk) = MlDsa65::keygen(&mut rand::rng()).expect("keygen failed");
    let (sk_right, _) = MlDsa65::keygen(&mut rand::rng()).expect("keygen failed");

    let sig_valid = MlDsa65::sign_deterministic(&sk_left, MESSAGE, CONTEXT).expect("sign failed");
    // Same structure, wrong signer: parses cleanly, fails the final comparison.
    let sig_forged =
        MlDsa65::sign_deterministic(&sk_right, MESSAGE, CONTEXT).expect("sign failed");

    TestData {
        sk_left,
        sk_right,
        pk,
        sig_valid,
        sig_forged,
    }
});

/// Fixed test message.
const MESSAGE: &[u8] = b"constant-time test message for dudect verification";

const CONTEXT: &[u8] = b"dudect";

/// Number of iterations per batch.
const ITERATIONS: usize = 1_000;

fn random_classes(rng: &mut BenchRng) -> Vec<Class> {
    (0..ITERATIONS)
        .map(|_| {
            if rng.gen::<bool>() {
                Class::Left
            } else {
                Class::Right
            }
        })
        .collect()
}

/// Two different secret keys sign the same message with the same randomness.
fn bench_sign_65(runner: &mut CtRunner, rng: &mut BenchRng) {
    let data = &*TEST_DATA;

    for class in random_classes(rng) {
        let sk = match class {
            Class::Left => &data.sk_left,
            Class::Right => &data.sk_right,
        };

        runner.run_one(class, || {
            let _ = MlDsa65::sign(sk, MESSAGE, CONTEXT, &[0u8; 32]);
        });
    }
}

/// A valid signature versus a well-formed signature from another key.
fn bench_verify_65(runner: &mut CtRunner, rng: &mut BenchRng) {
    let data = &*TEST_DATA;

    for class in random_classes(rng) {
        let sig = match class {
            Class::Left => &data.sig_valid,
            Class::Right => &data.sig_forged,
        };

        runner.run_one(class, || {
            let _ = MlDsa65::verify(&data.pk, MESSAGE, CONTEXT, sig);
        });
    }
}

ctbench_main!(bench_sign_65, bench_verify_65);
