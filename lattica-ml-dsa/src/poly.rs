//! Ring elements of `R_q = Z_q[X] / (X^256 + 1)`.

use subtle::{Choice, ConstantTimeGreater};
use zeroize::Zeroize;

use crate::ntt;
use crate::reduce::{caddq, center, freeze};

/// Number of coefficients per ring element.
pub const N: usize = 256;

/// A polynomial with 256 `i32` coefficients.
///
/// The type does not track whether it is in the normal or the transform
/// domain; callers keep that straight. Range checks and packing only make
/// sense on normal-domain values.
#[derive(Clone, Debug, PartialEq, Eq, Zeroize)]
pub struct Poly {
    /// Coefficients, not necessarily reduced.
    pub coeffs: [i32; N],
}

impl Default for Poly {
    fn default() -> Self {
        Self::zero()
    }
}

impl Poly {
    /// The zero polynomial.
    #[inline]
    pub const fn zero() -> Self {
        Self { coeffs: [0; N] }
    }

    /// Wrap a coefficient array.
    #[inline]
    pub const fn from_coeffs(coeffs: [i32; N]) -> Self {
        Self { coeffs }
    }

    /// Map every coefficient to `[0, q)`.
    pub fn freeze(&mut self) {
        for c in &mut self.coeffs {
            *c = freeze(*c);
        }
    }

    /// Add q to negative coefficients.
    pub fn caddq(&mut self) {
        for c in &mut self.coeffs {
            *c = caddq(*c);
        }
    }

    /// Map every coefficient to its centered representative.
    pub fn center(&mut self) {
        for c in &mut self.coeffs {
            *c = center(*c);
        }
    }

    /// Forward NTT in place.
    pub fn ntt(&mut self) {
        ntt::ntt(&mut self.coeffs);
    }

    /// Inverse NTT in place, keeping the Montgomery factor.
    ///
    /// Inputs must already be reduced below q in magnitude.
    pub fn inv_ntt_to_mont(&mut self) {
        ntt::inv_ntt_to_mont(&mut self.coeffs);
    }

    /// `self += other`, no reduction.
    pub fn add_assign(&mut self, other: &Self) {
        for (a, b) in self.coeffs.iter_mut().zip(&other.coeffs) {
            *a += b;
        }
    }

    /// `self -= other`, no reduction.
    pub fn sub_assign(&mut self, other: &Self) {
        for (a, b) in self.coeffs.iter_mut().zip(&other.coeffs) {
            *a -= b;
        }
    }

    /// Pointwise product of two transform-domain polynomials.
    #[must_use]
    pub fn pointwise(&self, other: &Self) -> Self {
        let mut r = Self::zero();
        ntt::pointwise_mul(&mut r.coeffs, &self.coeffs, &other.coeffs);
        r
    }

    /// `self <<= d` coefficient-wise.
    pub fn shift_left(&mut self, d: u32) {
        for c in &mut self.coeffs {
            *c <<= d;
        }
    }

    /// Constant-time test that every coefficient satisfies `|c mod± q| < bound`.
    ///
    /// Coefficients may be in any representative of their residue class.
    /// The loop visits every coefficient regardless of earlier results.
    pub fn check_norm_ct(&self, bound: i32) -> Choice {
        let bound = bound.max(0) as u32;
        let mut exceeds = Choice::from(0u8);
        for &c in &self.coeffs {
            let v = center(c);
            let mask = v >> 31;
            let abs = ((v ^ mask) - mask) as u32;
            exceeds |= abs.ct_gt(&bound.wrapping_sub(1)) | Choice::from(u8::from(bound == 0));
        }
        !exceeds
    }

    /// [`check_norm_ct`](Self::check_norm_ct) collapsed to `bool`.
    #[cfg(test)]
    pub fn check_norm(&self, bound: i32) -> bool {
        bool::from(self.check_norm_ct(bound))
    }

    /// Largest centered coefficient magnitude. Not constant time.
    #[cfg(test)]
    pub fn norm_inf(&self) -> i32 {
        self.coeffs
            .iter()
            .map(|&c| center(c).abs())
            .max()
            .unwrap_or(0)
    }
}

impl core::ops::Index<usize> for Poly {
    type Output = i32;

    fn index(&self, i: usize) -> &i32 {
        &self.coeffs[i]
    }
}

impl core::ops::IndexMut<usize> for Poly {
    fn index_mut(&mut self, i: usize) -> &mut i32 {
        &mut self.coeffs[i]
    }
}
