//! The field tower `Fp ⊂ Fp2 ⊂ Fp4 ⊂ Fp12` used by the curve and pairing code.
//!
//! The modulus is only known at run time, so every level is split in two: a small
//! `Copy` element type that carries its own arithmetic through the operator traits,
//! and a configuration object implementing [`Field`] that knows the constants an
//! element cannot carry on its own (identities, Frobenius coefficients, square root
//! data). Curve code is generic over the configuration object.

mod extensions;

pub mod fp;
pub mod fp12;
pub mod fp2;
pub mod fp4;
pub(crate) mod utils;

pub use extensions::FieldExtension;

use crypto_bigint::subtle::ConstantTimeEq;
use crypto_bigint::{Uint, U64};
use num_traits::Inv;
use std::fmt::Debug;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use subtle::CtOption;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("modulus must be an odd prime of at most 256 bits")]
    InvalidModulus,
    #[error("value is not a canonical field element")]
    NonCanonical,
    #[error("expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
    #[error("malformed integer literal")]
    InvalidLiteral,
    #[error("the tower polynomial is reducible for this modulus")]
    ReducibleTower,
    #[error("element has no multiplicative inverse")]
    NotInvertible,
}

/// Arithmetic every element of the tower supports without help from its
/// configuration object.
pub trait FieldElement:
    Sized
    + Copy
    + Clone
    + Debug
    + PartialEq
    + Eq
    + ConstantTimeEq
    + Add<Output = Self>
    + AddAssign
    + Sub<Output = Self>
    + SubAssign
    + Mul<Output = Self>
    + MulAssign
    + Neg<Output = Self>
    + Inv<Output = CtOption<Self>>
    + Send
    + Sync
{
    fn is_zero(&self) -> bool;

    fn square(&self) -> Self {
        *self * *self
    }
    fn double(&self) -> Self {
        *self + *self
    }
    fn invert(&self) -> CtOption<Self> {
        self.inv()
    }
}

/// A configured tower level. Holds whatever a level needs beyond its elements, and is
/// the "field operations provider" that [`crate::EllipticCurve`] is generic over.
pub trait Field: Clone + Debug + Send + Sync {
    type Element: FieldElement;

    fn zero(&self) -> Self::Element;
    fn one(&self) -> Self::Element;
    fn from_u64(&self, value: u64) -> Self::Element;

    /// `x ↦ x^(p^power)`
    fn frobenius(&self, x: &Self::Element, power: usize) -> Self::Element;

    /// Multiplication by a small integer.
    fn smul(&self, k: u64, x: &Self::Element) -> Self::Element {
        self.from_u64(k) * *x
    }

    fn inv(&self, x: &Self::Element) -> Result<Self::Element, FieldError> {
        Option::from(x.invert()).ok_or(FieldError::NotInvertible)
    }

    fn div(&self, x: &Self::Element, y: &Self::Element) -> Result<Self::Element, FieldError> {
        Ok(*x * self.inv(y)?)
    }

    /// Left-to-right square and multiply, `x^0 = 1`.
    fn pow<const L: usize>(&self, x: &Self::Element, exponent: &Uint<L>) -> Self::Element {
        let mut result = self.one();
        for i in (0..exponent.bits()).rev() {
            result = result.square();
            if exponent.bit_vartime(i) {
                result *= *x;
            }
        }
        result
    }

    fn pow_u64(&self, x: &Self::Element, exponent: u64) -> Self::Element {
        self.pow(x, &U64::from_u64(exponent))
    }

    fn is_opposite(&self, x: &Self::Element, y: &Self::Element) -> bool {
        *x == -*y
    }

    fn is_one(&self, x: &Self::Element) -> bool {
        *x == self.one()
    }
}

/// Wraps an `Option` as a `CtOption`, `fallback` standing in for the absent value.
pub(crate) fn ct_option<T>(value: Option<T>, fallback: T) -> CtOption<T> {
    match value {
        Some(v) => CtOption::new(v, 1u8.into()),
        None => CtOption::new(fallback, 0u8.into()),
    }
}

/// Levels with a square root algorithm.
pub trait SquareRoot: Field {
    fn sqrt(&self, x: &Self::Element) -> CtOption<Self::Element>;
    fn is_square(&self, x: &Self::Element) -> bool;
}

/// A level built over a smaller one.
pub trait Extension: Field {
    type Base: Field;

    fn base(&self) -> &Self::Base;
    fn extend(&self, x: &<Self::Base as Field>::Element) -> Self::Element;
}
