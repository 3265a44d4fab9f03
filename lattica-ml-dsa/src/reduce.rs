//! Scalar arithmetic modulo q = 8380417 = 2^23 - 2^13 + 1.
//!
//! Every routine here is branch-free: reductions use multiply/shift and sign
//! masks so that timing never depends on the value being reduced.

/// The prime modulus.
pub const Q: i32 = 8_380_417;

/// q^(-1) mod 2^32.
pub const QINV: i32 = 58_728_449;

/// floor(2^48 / q).
const BARRETT_MUL: i64 = 33_556_102;

/// Montgomery reduction: returns `r ≡ a · 2^-32 (mod q)` with `|r| < q`
/// for `|a| < q · 2^31`.
#[inline]
pub const fn montgomery_reduce(a: i64) -> i32 {
    let t = (a as i32).wrapping_mul(QINV);
    ((a - (t as i64) * (Q as i64)) >> 32) as i32
}

/// `a · b · 2^-32 mod q`.
#[inline]
pub const fn montgomery_mul(a: i32, b: i32) -> i32 {
    montgomery_reduce((a as i64) * (b as i64))
}

/// Barrett step to a representative in `(-q, 2q)` for any `i32` input.
#[inline]
const fn barrett_partial(a: i32) -> i32 {
    let a = a as i64;
    let quot = (a * BARRETT_MUL) >> 48;
    (a - quot * (Q as i64)) as i32
}

/// Conditionally add q to a negative value.
#[inline]
pub const fn caddq(a: i32) -> i32 {
    a + (Q & (a >> 31))
}

/// Canonical representative in `[0, q)`.
#[inline]
pub const fn freeze(a: i32) -> i32 {
    caddq(caddq(barrett_partial(a)) - Q)
}

/// Centered representative in `[-(q-1)/2, (q-1)/2]`.
#[inline]
pub const fn center(a: i32) -> i32 {
    let r = freeze(a);
    r - (Q & (((Q - 1) / 2 - r) >> 31))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// `a · 2^32 mod q`, via 2^64 mod q.
    fn to_mont(a: i32) -> i32 {
        montgomery_reduce(i64::from(a) * 2_365_951)
    }

    #[test]
    fn freeze_covers_full_i32_range() {
        for a in [i32::MIN, i32::MIN + 1, -Q - 1, -Q, -1, 0, 1, Q - 1, Q, 2 * Q + 5, i32::MAX] {
            let expected = (a as i64).rem_euclid(Q as i64) as i32;
            assert_eq!(freeze(a), expected, "a = {a}");
        }
    }

    #[test]
    fn center_is_symmetric() {
        assert_eq!(center(0), 0);
        assert_eq!(center(Q - 1), -1);
        assert_eq!(center((Q - 1) / 2), (Q - 1) / 2);
        assert_eq!(center((Q + 1) / 2), -(Q - 1) / 2);
        assert_eq!(center(-5), -5);
    }

    #[test]
    fn montgomery_matches_plain_product() {
        let pairs = [(12_345, 67_890), (Q - 1, Q - 1), (1, 4_190_208), (-3, 77)];
        for (a, b) in pairs {
            let expected = ((a as i64) * (b as i64)).rem_euclid(Q as i64) as i32;
            let got = freeze(montgomery_mul(to_mont(a), b));
            assert_eq!(got, expected);
        }
    }

    #[test]
    fn montgomery_constant_is_inverse() {
        assert_eq!(Q.wrapping_mul(QINV), 1);
    }
}
