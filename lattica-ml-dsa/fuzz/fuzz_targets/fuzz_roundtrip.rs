//! Fuzz target for the typed ML-DSA surface (keygen -> sign -> verify).
//!
//! Exercises the `Signer` implementations, the external-mu path and the
//! expanded verification key against each other.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use lattica_core::Signer;
use lattica_ml_dsa::{MlDsa44, MlDsa65, MlDsa87};

#[derive(Debug, Arbitrary)]
struct RoundtripInput {
    seed: [u8; 32],
    rnd: [u8; 32],
    message: Vec<u8>,
    context: Vec<u8>,
    variant: u8,
}

macro_rules! roundtrip {
    ($alg:ty, $input:expr) => {{
        let input = $input;
        let (sk, pk) = <$alg>::keygen_from_seed(&input.seed).unwrap();
        let sig = <$alg>::sign(&sk, &input.message, &input.context, &input.rnd).unwrap();
        assert!(<$alg>::verify(&pk, &input.message, &input.context, &sig).is_ok());

        let mu = <$alg>::compute_mu(&pk, &input.message, &input.context).unwrap();
        assert_eq!(<$alg>::sign_mu(&sk, &mu, &input.rnd).unwrap(), sig);
        assert!(<$alg>::verify_mu(&pk, &mu, &sig).is_ok());

        let expanded = pk.expand().unwrap();
        assert!(<$alg>::verify_expanded(&expanded, &input.message, &input.context, &sig).is_ok());
        assert_eq!(<$alg>::verification_key(&sk).unwrap(), pk);
    }};
}

fuzz_target!(|input: RoundtripInput| {
    if input.message.len() > 10000 || input.context.len() > 255 {
        return;
    }

    match input.variant % 3 {
        0 => roundtrip!(MlDsa44, &input),
        1 => roundtrip!(MlDsa65, &input),
        _ => roundtrip!(MlDsa87, &input),
    }
});
