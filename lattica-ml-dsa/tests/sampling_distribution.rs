//! Statistical checks of the samplers.
//!
//! Each test draws a few thousand coefficients from deterministic seeds and
//! compares the histogram against the target distribution with a chi-square
//! statistic. Bounds sit well above the 99.9th percentile for the relevant
//! degrees of freedom.

use lattica_ml_dsa::hazmat::{self, G, N};
use lattica_ml_dsa::params::{ML_DSA_44, ML_DSA_65};

fn chi_square(observed: &[u64]) -> f64 {
    let total: u64 = observed.iter().sum();
    let expected = total as f64 / observed.len() as f64;
    observed
        .iter()
        .map(|&o| {
            let d = o as f64 - expected;
            d * d / expected
        })
        .sum()
}

fn seed32(i: u32) -> [u8; 32] {
    let mut seed = [0u8; 32];
    seed[..4].copy_from_slice(&i.to_le_bytes());
    seed[31] = 0xA5;
    seed
}

fn seed64(i: u32) -> [u8; 64] {
    let mut seed = [0u8; 64];
    seed[..4].copy_from_slice(&i.to_le_bytes());
    seed[63] = 0x5A;
    seed
}

#[test]
fn uniform_sampler_covers_field_evenly() {
    const BUCKETS: usize = 16;
    let mut hist = [0u64; BUCKETS];
    for i in 0..64u32 {
        let poly = hazmat::sample_uniform(&mut G::for_matrix_entry(&seed32(i), 1, 2));
        for &c in &poly.coeffs {
            assert!((0..hazmat::Q).contains(&c), "coefficient {c} outside [0, q)");
            hist[(i64::from(c) * BUCKETS as i64 / i64::from(hazmat::Q)) as usize] += 1;
        }
    }
    // df = 15, 99.9% quantile is 37.7
    let stat = chi_square(&hist);
    assert!(stat < 50.0, "chi-square {stat:.2} for {hist:?}");
}

fn bounded_histogram(eta: i32) -> Vec<u64> {
    let mut hist = vec![0u64; (2 * eta + 1) as usize];
    for i in 0..64u32 {
        let poly = hazmat::sample_bounded(&seed64(i), i as u16, eta);
        for &c in &poly.coeffs {
            assert!((-eta..=eta).contains(&c), "coefficient {c} outside [-{eta}, {eta}]");
            hist[(c + eta) as usize] += 1;
        }
    }
    hist
}

#[test]
fn bounded_sampler_eta2_is_uniform() {
    let hist = bounded_histogram(2);
    // df = 4, 99.9% quantile is 18.5
    let stat = chi_square(&hist);
    assert!(stat < 25.0, "chi-square {stat:.2} for {hist:?}");
}

#[test]
fn bounded_sampler_eta4_is_uniform() {
    let hist = bounded_histogram(4);
    // df = 8, 99.9% quantile is 26.1
    let stat = chi_square(&hist);
    assert!(stat < 35.0, "chi-square {stat:.2} for {hist:?}");
}

#[test]
fn mask_sampler_stays_in_range_and_is_uniform() {
    const BUCKETS: usize = 16;
    for p in [ML_DSA_44, ML_DSA_65] {
        let shift = p.gamma1_bits() - 4;
        let mut hist = [0u64; BUCKETS];
        let mut sum = 0i64;
        for i in 0..32u32 {
            let poly = hazmat::sample_mask(&p, &seed64(i), i as u16);
            for &c in &poly.coeffs {
                assert!(
                    -p.gamma1 < c && c <= p.gamma1,
                    "{}: coefficient {c} outside (-gamma1, gamma1]",
                    p.name
                );
                hist[((p.gamma1 - c) >> shift) as usize] += 1;
                sum += i64::from(c);
            }
        }
        // df = 15
        let stat = chi_square(&hist);
        assert!(stat < 50.0, "{}: chi-square {stat:.2} for {hist:?}", p.name);

        let mean = sum as f64 / (32 * N) as f64;
        assert!(mean.abs() < f64::from(p.gamma1) / 20.0, "{}: mean {mean:.1}", p.name);
    }
}

#[test]
fn challenge_has_exact_weight_and_balanced_signs() {
    for tau in [39usize, 49, 60] {
        let mut plus = 0u64;
        let trials = 200u32;
        for i in 0..trials {
            let c = hazmat::sample_in_ball(&seed64(i), tau);
            let nonzero: Vec<i32> = c.coeffs.iter().copied().filter(|&x| x != 0).collect();
            assert_eq!(nonzero.len(), tau, "tau={tau}, seed {i}");
            assert!(nonzero.iter().all(|&x| x == 1 || x == -1));
            plus += nonzero.iter().filter(|&&x| x == 1).count() as u64;
        }
        let total = u64::from(trials) * tau as u64;
        let minus = total - plus;
        // df = 1, 99.9% quantile is 10.8
        let stat = chi_square(&[plus, minus]);
        assert!(stat < 15.0, "tau={tau}: {plus} positive vs {minus} negative");
    }
}

#[test]
fn challenge_positions_are_spread_over_the_ring() {
    const TAU: usize = 39;
    let mut hits = [0u64; N];
    for i in 0..512u32 {
        let c = hazmat::sample_in_ball(&seed32(i), TAU);
        for (pos, &x) in c.coeffs.iter().enumerate() {
            if x != 0 {
                hits[pos] += 1;
            }
        }
    }
    // df = 255, 99.9% quantile is about 330
    let stat = chi_square(&hits);
    assert!(stat < 360.0, "chi-square {stat:.2}");
}
