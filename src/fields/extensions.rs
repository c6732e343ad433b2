//! The generic extension element. An element of a degree `N` extension over `F` is the
//! array of its `N` coefficients, index `i` multiplying the `i`-th power of the adjoined
//! root. Because of the quotienting on the polynomial ring, multiplication and
//! inversion depend on the specific extension and are given per level in `fp2`, `fp4`
//! and `fp12`. What every extension shares is componentwise: addition, subtraction,
//! negation, equality and scaling by a base element.

use crate::fields::FieldElement;
use crypto_bigint::subtle::{Choice, ConstantTimeEq};
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

// the following struct can unfortunately not have much that is const,
// since the underlying Mul, Add, etc., are not, and const traits are in the works
// https://github.com/rust-lang/rust/issues/67792
#[derive(Copy, Clone, Debug)]
pub struct FieldExtension<const N: usize, F: FieldElement>(pub(crate) [F; N]);

impl<const N: usize, F: FieldElement> FieldExtension<N, F> {
    pub fn new(c: &[F; N]) -> Self {
        Self(*c)
    }
    /// Coefficients, lowest power first.
    pub fn coefficients(&self) -> &[F; N] {
        &self.0
    }
    pub fn scale(&self, factor: F) -> Self {
        Self(std::array::from_fn(|i| self.0[i] * factor))
    }
    pub(crate) fn is_zero_coefficients(&self) -> bool {
        self.0.iter().all(|c| c.is_zero())
    }
}
impl<const N: usize, F: FieldElement> ConstantTimeEq for FieldExtension<N, F> {
    #[inline(always)]
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0
            .iter()
            .zip(other.0.iter())
            .fold(Choice::from(1u8), |acc, (a, b)| acc & a.ct_eq(b))
    }
}
impl<const N: usize, F: FieldElement> PartialEq for FieldExtension<N, F> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.ct_eq(other))
    }
}
impl<const N: usize, F: FieldElement> Eq for FieldExtension<N, F> {}
impl<const N: usize, F: FieldElement> Add for FieldExtension<N, F> {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self(std::array::from_fn(|i| self.0[i] + other.0[i]))
    }
}
impl<const N: usize, F: FieldElement> AddAssign for FieldExtension<N, F> {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}
impl<const N: usize, F: FieldElement> Sub for FieldExtension<N, F> {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self(std::array::from_fn(|i| self.0[i] - other.0[i]))
    }
}
impl<const N: usize, F: FieldElement> SubAssign for FieldExtension<N, F> {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}
impl<const N: usize, F: FieldElement> Neg for FieldExtension<N, F> {
    type Output = Self;
    fn neg(self) -> Self {
        Self(std::array::from_fn(|i| -self.0[i]))
    }
}
impl<const N: usize, F: FieldElement> MulAssign for FieldExtension<N, F>
where
    Self: Mul<Output = Self>,
{
    fn mul_assign(&mut self, other: Self) {
        *self = *self * other;
    }
}
