//! The quadratic extension `Fp2 = Fp[u] / (u² + 2)`. Elements are `c0 + c1·u`.
//!
//! Parameter sets written in the usual GM/T notation list coefficients high first,
//! `(c1, c0)`; the conversion helpers on [`Fp2Field`] take and return that order.

use crate::fields::fp::{Fp, PrimeField};
use crate::fields::utils::parse_hex_u256;
use crate::fields::{
    ct_option, Extension, Field, FieldElement, FieldError, FieldExtension, SquareRoot,
};
use crypto_bigint::U256;
use num_traits::Inv;
use std::ops::Mul;
use subtle::{Choice, ConstantTimeEq, CtOption};

pub type Fp2 = FieldExtension<2, Fp>;

impl Fp2 {
    /// Multiplication by the adjoined root, `(c0 + c1·u)·u = -2·c1 + c0·u`.
    pub(crate) fn mul_by_u(&self) -> Self {
        Self([-self.0[1].double(), self.0[0]])
    }
    pub fn conjugate(&self) -> Self {
        Self([self.0[0], -self.0[1]])
    }
    /// `c0² + 2·c1²`, the product with the conjugate.
    pub fn norm(&self) -> Fp {
        self.0[0].square() + self.0[1].square().double()
    }
}
impl Mul for Fp2 {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self::Output {
        // Karatsuba, see https://eprint.iacr.org/2006/471.pdf, Sec 3
        let t0 = self.0[0] * rhs.0[0];
        let t1 = self.0[1] * rhs.0[1];
        let c1 = (self.0[0] + self.0[1]) * (rhs.0[0] + rhs.0[1]) - t0 - t1;
        let c0 = t0 - t1.double();
        Self([c0, c1])
    }
}
impl Inv for Fp2 {
    type Output = CtOption<Self>;
    fn inv(self) -> CtOption<Self> {
        let inverse = self
            .norm()
            .invert()
            .into_option()
            .map(|n| Self([self.0[0] * n, -(self.0[1] * n)]));
        ct_option(inverse, self)
    }
}
impl FieldElement for Fp2 {
    fn is_zero(&self) -> bool {
        self.is_zero_coefficients()
    }
}

#[derive(Clone, Debug)]
pub struct Fp2Field {
    base: PrimeField,
}

impl Fp2Field {
    /// Fails when `-2` is a square mod `p`, in which case `u² + 2` splits.
    pub fn new(base: PrimeField) -> Result<Self, FieldError> {
        let minus_two = -base.from_u64(2);
        if base.is_square(&minus_two) {
            return Err(FieldError::ReducibleTower);
        }
        tracing::debug!(modulus = ?base.modulus(), "Fp2Field::new");
        Ok(Self { base })
    }

    pub fn element(&self, c0: Fp, c1: Fp) -> Fp2 {
        Fp2::new(&[c0, c1])
    }

    pub fn u(&self) -> Fp2 {
        self.element(self.base.zero(), self.base.one())
    }

    /// Builds `c0 + c1·u` from canonical integers given as `[c1, c0]`.
    pub fn from_high_first(&self, value: &[U256; 2]) -> Result<Fp2, FieldError> {
        Ok(self.element(
            self.base.checked_element(&value[1])?,
            self.base.checked_element(&value[0])?,
        ))
    }

    pub fn from_hex_high_first(&self, value: [&str; 2]) -> Result<Fp2, FieldError> {
        self.from_high_first(&[parse_hex_u256(value[0])?, parse_hex_u256(value[1])?])
    }

    /// `[c1, c0]` as canonical integers.
    pub fn to_high_first(&self, x: &Fp2) -> [U256; 2] {
        [x.0[1].value(), x.0[0].value()]
    }
}

impl Field for Fp2Field {
    type Element = Fp2;

    fn zero(&self) -> Fp2 {
        self.extend(&self.base.zero())
    }
    fn one(&self) -> Fp2 {
        self.extend(&self.base.one())
    }
    fn from_u64(&self, value: u64) -> Fp2 {
        self.extend(&self.base.from_u64(value))
    }
    /// `u^p = -u` because `-2` is a non-residue, so odd powers conjugate.
    fn frobenius(&self, x: &Fp2, power: usize) -> Fp2 {
        match power % 2 {
            0 => *x,
            _ => x.conjugate(),
        }
    }
    fn smul(&self, k: u64, x: &Fp2) -> Fp2 {
        x.scale(self.base.from_u64(k))
    }
}

impl Extension for Fp2Field {
    type Base = PrimeField;

    fn base(&self) -> &PrimeField {
        &self.base
    }
    fn extend(&self, x: &Fp) -> Fp2 {
        self.element(*x, self.base.zero())
    }
}

impl SquareRoot for Fp2Field {
    /// Complex method: with `λ = sqrt(norm(x))`, one of `(c0 ± λ)/2` is the square of
    /// the real part of the root.
    fn sqrt(&self, x: &Fp2) -> CtOption<Fp2> {
        let base = &self.base;
        let none = CtOption::new(*x, Choice::from(0u8));
        let [c0, c1] = x.0;
        if c1.is_zero() {
            // either sqrt(c0) or sqrt(c0 / -2)·u
            if let Some(r) = base.sqrt(&c0).into_option() {
                return CtOption::new(self.extend(&r), Choice::from(1u8));
            }
            return match (-base.from_u64(2))
                .invert()
                .into_option()
                .and_then(|m| base.sqrt(&(c0 * m)).into_option())
            {
                Some(r) => CtOption::new(self.element(base.zero(), r), Choice::from(1u8)),
                None => none,
            };
        }
        let Some(lambda) = base.sqrt(&x.norm()).into_option() else {
            return none;
        };
        let Some(two_inv) = base.from_u64(2).invert().into_option() else {
            return none;
        };
        let mut delta = (c0 + lambda) * two_inv;
        if !base.is_square(&delta) {
            delta = (c0 - lambda) * two_inv;
        }
        let Some(a0) = base.sqrt(&delta).into_option() else {
            return none;
        };
        let Some(a0_inv) = a0.double().invert().into_option() else {
            return none;
        };
        let root = self.element(a0, c1 * a0_inv);
        CtOption::new(root, root.square().ct_eq(x))
    }
    fn is_square(&self, x: &Fp2) -> bool {
        self.base.is_square(&x.norm())
    }
}
