//! Number-theoretic transform over `Z_q[X] / (X^256 + 1)`.
//!
//! The transform fully splits the ring using the primitive 512th root of
//! unity 1753. Twiddle factors are generated at compile time in Montgomery
//! form and bit-reversed order, matching the table layout used by FIPS 204.

use crate::poly::N;
use crate::reduce::{montgomery_mul, Q};

/// Primitive 512th root of unity modulo q.
pub const ZETA: i32 = 1753;

/// `2^64 / 256 mod q`: final scaling of [`inv_ntt_to_mont`], leaves the result
/// multiplied by the Montgomery factor.
const INV_N_MONT: i32 = 41_978;

/// `2^32 / 256 mod q`: final scaling of [`inv_ntt`].
const INV_N_PLAIN: i32 = 16_382;

const fn pow_mod(base: i64, mut exp: u32) -> i64 {
    let q = Q as i64;
    let mut acc = 1i64;
    let mut b = base % q;
    while exp > 0 {
        if exp & 1 == 1 {
            acc = acc * b % q;
        }
        b = b * b % q;
        exp >>= 1;
    }
    acc
}

const fn bit_reverse8(x: usize) -> u32 {
    (x as u8).reverse_bits() as u32
}

const fn build_zetas() -> [i32; N] {
    let q = Q as i64;
    let mont = (1i64 << 32) % q;
    let mut table = [0i32; N];
    let mut i = 1;
    while i < N {
        let z = pow_mod(ZETA as i64, bit_reverse8(i)) * mont % q;
        table[i] = if z > q / 2 { (z - q) as i32 } else { z as i32 };
        i += 1;
    }
    table
}

/// `ZETAS[i] = 1753^brv8(i) · 2^32 mod q`, centered. Entry 0 is unused.
pub const ZETAS: [i32; N] = build_zetas();

/// Forward transform in place.
///
/// Accepts coefficients of magnitude below q; outputs are bounded by `9q`
/// and are not reduced.
pub fn ntt(a: &mut [i32; N]) {
    let mut k = 0;
    let mut len = 128;
    while len > 0 {
        let mut start = 0;
        while start < N {
            k += 1;
            let zeta = ZETAS[k];
            for j in start..start + len {
                let t = montgomery_mul(zeta, a[j + len]);
                a[j + len] = a[j] - t;
                a[j] += t;
            }
            start += 2 * len;
        }
        len >>= 1;
    }
}

fn inv_ntt_layers(a: &mut [i32; N], scale: i32) {
    let mut k = N;
    let mut len = 1;
    while len < N {
        let mut start = 0;
        while start < N {
            k -= 1;
            let zeta = -ZETAS[k];
            for j in start..start + len {
                let t = a[j];
                a[j] = t + a[j + len];
                a[j + len] = montgomery_mul(zeta, t - a[j + len]);
            }
            start += 2 * len;
        }
        len <<= 1;
    }
    for c in a.iter_mut() {
        *c = montgomery_mul(scale, *c);
    }
}

/// Inverse transform in place, output multiplied by `2^32`.
///
/// This is the form wanted after [`pointwise_mul`], whose products carry a
/// factor `2^-32` that cancels here. Outputs satisfy `|c| < q`.
pub fn inv_ntt_to_mont(a: &mut [i32; N]) {
    inv_ntt_layers(a, INV_N_MONT);
}

/// Exact inverse of [`ntt`]: `inv_ntt(ntt(x)) ≡ x (mod q)`.
pub fn inv_ntt(a: &mut [i32; N]) {
    inv_ntt_layers(a, INV_N_PLAIN);
}

/// Coefficient-wise Montgomery product of two transformed polynomials.
pub fn pointwise_mul(r: &mut [i32; N], a: &[i32; N], b: &[i32; N]) {
    for ((r, &x), &y) in r.iter_mut().zip(a).zip(b) {
        *r = montgomery_mul(x, y);
    }
}

/// `r += a ∘ b` in the transform domain.
pub fn pointwise_acc(r: &mut [i32; N], a: &[i32; N], b: &[i32; N]) {
    for ((r, &x), &y) in r.iter_mut().zip(a).zip(b) {
        *r += montgomery_mul(x, y);
    }
}
