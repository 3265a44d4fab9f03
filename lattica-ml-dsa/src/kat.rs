//! Known-answer tests for ML-DSA.
//!
//! Fixed seeds, messages and signing randomness with the expected encodings
//! recorded as 32-byte SHAKE-256 digests, plus the leading bytes of the public
//! key and deterministic signature in full. The answers were produced by an
//! independent implementation of the FIPS 204 pseudocode.

use lattica_core::Signer;

use crate::hash::shake256;

const MESSAGE: &[u8] = b"lattica known-answer message";
const CONTEXT: &[u8] = b"kat-context";

/// Signing randomness for the hedged case: bytes 0x20..0x40.
fn hedged_rnd() -> [u8; 32] {
    core::array::from_fn(|i| 0x20 + i as u8)
}

fn digest(bytes: &[u8]) -> String {
    let mut out = [0u8; 32];
    shake256(&[bytes], &mut out);
    hex::encode(out)
}

struct Answer {
    seed: [u8; 32],
    pk_prefix: &'static str,
    pk: &'static str,
    sk: &'static str,
    sig_prefix: &'static str,
    sig_deterministic: &'static str,
    sig_hedged: &'static str,
}

macro_rules! kat_suite {
    ($mod_name:ident, $variant:ident, $feature:literal, $answer:expr) => {
        #[cfg(feature = $feature)]
        mod $mod_name {
            use super::*;
            use crate::$variant;

            const ANSWER: Answer = $answer;

            #[test]
            fn keygen_matches_known_answer() {
                let (sk, pk) = $variant::keygen_from_seed(&ANSWER.seed).unwrap();
                assert_eq!(hex::encode(&pk.as_bytes()[..16]), ANSWER.pk_prefix);
                assert_eq!(digest(pk.as_bytes()), ANSWER.pk, "pk digest");
                assert_eq!(digest(sk.as_bytes()), ANSWER.sk, "sk digest");
            }

            #[test]
            fn deterministic_signature_matches_known_answer() {
                let (sk, pk) = $variant::keygen_from_seed(&ANSWER.seed).unwrap();
                let sig = $variant::sign_deterministic(&sk, MESSAGE, b"").unwrap();
                assert_eq!(hex::encode(&sig.as_bytes()[..16]), ANSWER.sig_prefix);
                assert_eq!(digest(sig.as_bytes()), ANSWER.sig_deterministic);
                assert!($variant::verify(&pk, MESSAGE, b"", &sig).is_ok());
            }

            #[test]
            fn hedged_signature_with_context_matches_known_answer() {
                let (sk, pk) = $variant::keygen_from_seed(&ANSWER.seed).unwrap();
                let sig = $variant::sign(&sk, MESSAGE, CONTEXT, &hedged_rnd()).unwrap();
                assert_eq!(digest(sig.as_bytes()), ANSWER.sig_hedged);
                assert!($variant::verify(&pk, MESSAGE, CONTEXT, &sig).is_ok());
            }

            #[test]
            fn internal_interface_matches_known_answer() {
                let (sk, pk) = $variant::keygen_from_seed(&ANSWER.seed).unwrap();
                let prefix = [0u8, CONTEXT.len() as u8];
                let m_prime: [&[u8]; 3] = [&prefix, CONTEXT, MESSAGE];
                let sig = $variant::sign_internal(&sk, &m_prime, &hedged_rnd()).unwrap();
                assert_eq!(digest(sig.as_bytes()), ANSWER.sig_hedged);
                assert!($variant::verify_internal(&pk, &m_prime, &sig).is_ok());
            }
        }
    };
}

kat_suite!(
    ml_dsa_44_kat,
    MlDsa44,
    "ml-dsa-44",
    Answer {
        seed: [
            0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d,
            0x0e, 0x0f, 0x10, 0x11, 0x12, 0x13, 0x14, 0x15, 0x16, 0x17, 0x18, 0x19, 0x1a, 0x1b,
            0x1c, 0x1d, 0x1e, 0x1f,
        ],
        pk_prefix: "d7b2b47254aae0db45e7930d4a98d2c9",
        pk: "329a07b1fabb48f52a309f11a1898f848e2322ffe623ec810db3bee33685854a",
        sk: "eaa4bd0a7064e1aef9623bfa4c0209a98884f08558bbe934daefb16a049ba28a",
        sig_prefix: "ca778ec14a33cd9b9dac8d3f2f6a36ec",
        sig_deterministic: "e2af79e330eb656da3cca60993c6bd6bbab9e00c379167f63643f933fd010016",
        sig_hedged: "ea696de9314a7c107bf03f9de7d1a044c528fa3318e94ef73dec08e6563b178e",
    }
);

kat_suite!(
    ml_dsa_65_kat,
    MlDsa65,
    "ml-dsa-65",
    Answer {
        seed: [0x41; 32],
        pk_prefix: "e13cb3a21650260347f87881298bdd58",
        pk: "916c5b4791abe4950ee422e86ed03a17dbef0dc7880866dc6cacd3a14897dd54",
        sk: "b52c2f3e6f494d41539471872b428ca4f599e180e75bc55506be9e428239bb6b",
        sig_prefix: "2f0f988dbc9e158dffc73f7d4092678d",
        sig_deterministic: "6a326f700bec2315a877166e5fb3af8a8323e1279ad83f625e88730936246be2",
        sig_hedged: "e255cfb2f483c1fd8ee5a0e2c7f251afd7334cba2e7cac70145c095fc09dfba6",
    }
);

kat_suite!(
    ml_dsa_87_kat,
    MlDsa87,
    "ml-dsa-87",
    Answer {
        seed: [0x57; 32],
        pk_prefix: "82a9330265d74f1bce30fdd9d3768874",
        pk: "99d41f546b4996b3744b563af420cfd0a9f2a1caba72499fb3e3a23244f55719",
        sk: "7aefbf8042189930592194ed550899687feafdd395a041729fa8d0647b4268a0",
        sig_prefix: "e6eda6df2a9ad86d370cbfeb83584436",
        sig_deterministic: "4c463f0d33dfa5f285f24fe56ab5ae29bcd6f9b1fa75ccb52f685be63650239a",
        sig_hedged: "a9c6f863603dcadd9d977e90696aa77333d3fdf1a7232ac6afa946cf29fa1741",
    }
);
