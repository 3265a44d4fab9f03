//! Fixed-length vectors of ring elements and the public matrix.

use subtle::Choice;
use zeroize::Zeroize;

use crate::ntt::pointwise_acc;
use crate::poly::Poly;

/// A vector of `M` polynomials.
#[derive(Clone, Debug, PartialEq, Eq, Zeroize)]
pub struct PolyVec<const M: usize> {
    /// Components.
    pub polys: [Poly; M],
}

impl<const M: usize> Default for PolyVec<M> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<const M: usize> PolyVec<M> {
    /// The zero vector.
    pub fn zero() -> Self {
        Self {
            polys: core::array::from_fn(|_| Poly::zero()),
        }
    }

    /// Forward NTT on every component.
    pub fn ntt(&mut self) {
        self.polys.iter_mut().for_each(Poly::ntt);
    }

    /// Inverse NTT (Montgomery-scaled) on every component.
    pub fn inv_ntt_to_mont(&mut self) {
        self.polys.iter_mut().for_each(Poly::inv_ntt_to_mont);
    }

    /// Canonical `[0, q)` coefficients.
    pub fn freeze(&mut self) {
        self.polys.iter_mut().for_each(Poly::freeze);
    }

    /// Add q to negative coefficients.
    pub fn caddq(&mut self) {
        self.polys.iter_mut().for_each(Poly::caddq);
    }

    /// Centered coefficients on every component.
    pub fn center(&mut self) {
        self.polys.iter_mut().for_each(Poly::center);
    }

    /// Component-wise `self += other`.
    pub fn add_assign(&mut self, other: &Self) {
        for (a, b) in self.polys.iter_mut().zip(&other.polys) {
            a.add_assign(b);
        }
    }

    /// Component-wise `self -= other`.
    pub fn sub_assign(&mut self, other: &Self) {
        for (a, b) in self.polys.iter_mut().zip(&other.polys) {
            a.sub_assign(b);
        }
    }

    /// Shift every coefficient left by `d` bits.
    pub fn shift_left(&mut self, d: u32) {
        for p in &mut self.polys {
            p.shift_left(d);
        }
    }

    /// Multiply each component by a transform-domain polynomial `c`.
    #[must_use]
    pub fn scale_by(&self, c: &Poly) -> Self {
        Self {
            polys: core::array::from_fn(|i| c.pointwise(&self.polys[i])),
        }
    }

    /// Transform-domain inner product `sum_i self[i] ∘ other[i]`, frozen.
    pub fn dot(&self, other: &Self) -> Poly {
        let mut acc = Poly::zero();
        for (a, b) in self.polys.iter().zip(&other.polys) {
            pointwise_acc(&mut acc.coeffs, &a.coeffs, &b.coeffs);
        }
        acc.freeze();
        acc
    }

    /// Every coefficient of every component below `bound` in magnitude.
    pub fn check_norm_ct(&self, bound: i32) -> Choice {
        self.polys
            .iter()
            .fold(Choice::from(1u8), |ok, p| ok & p.check_norm_ct(bound))
    }

    /// Boolean form of [`check_norm_ct`](Self::check_norm_ct).
    #[cfg(test)]
    pub fn check_norm(&self, bound: i32) -> bool {
        bool::from(self.check_norm_ct(bound))
    }
}

/// The `K x L` public matrix, kept in the transform domain.
#[derive(Clone, Debug)]
pub struct Matrix<const K: usize, const L: usize> {
    /// Rows of the matrix.
    pub rows: [PolyVec<L>; K],
}

impl<const K: usize, const L: usize> Matrix<K, L> {
    /// Matrix-vector product in the transform domain. `v` must already be
    /// transformed; the result comes out transformed and frozen.
    pub fn mul_vec(&self, v: &PolyVec<L>) -> PolyVec<K> {
        PolyVec {
            polys: core::array::from_fn(|i| self.rows[i].dot(v)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poly::N;
    use crate::reduce::{freeze, Q};

    #[test]
    fn add_sub_componentwise() {
        let mut a = PolyVec::<3>::zero();
        let mut b = PolyVec::<3>::zero();
        for k in 0..3 {
            for i in 0..N {
                a.polys[k][i] = (k * N + i) as i32;
                b.polys[k][i] = 5;
            }
        }
        let before = a.clone();
        a.add_assign(&b);
        assert_eq!(a.polys[2][10], (2 * N + 10) as i32 + 5);
        a.sub_assign(&b);
        assert_eq!(a, before);
    }

    #[test]
    fn norm_fails_if_any_component_fails() {
        let mut v = PolyVec::<4>::zero();
        assert!(v.check_norm(1));
        v.polys[3][200] = Q - 10;
        assert!(v.check_norm(11));
        assert!(!v.check_norm(10));
    }

    #[test]
    fn matrix_times_unit_vector_selects_column() {
        let mut rows: [PolyVec<2>; 2] = core::array::from_fn(|_| PolyVec::zero());
        for (r, row) in rows.iter_mut().enumerate() {
            for (c, p) in row.polys.iter_mut().enumerate() {
                p[0] = (10 * r + c + 1) as i32;
                p.ntt();
            }
        }
        let a = Matrix { rows };

        let mut e1 = PolyVec::<2>::zero();
        e1.polys[1][0] = 1;
        e1.ntt();

        let mut out = a.mul_vec(&e1);
        out.inv_ntt_to_mont();
        assert_eq!(freeze(out.polys[0][0]), 2);
        assert_eq!(freeze(out.polys[1][0]), 12);
        assert_eq!(freeze(out.polys[1][1]), 0);
    }
}
