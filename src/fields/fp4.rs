//! The quartic level `Fp4 = Fp2[v] / (v² - u)`. Elements are `c0 + c1·v`.

use crate::fields::fp::PrimeField;
use crate::fields::fp2::{Fp2, Fp2Field};
use crate::fields::{
    ct_option, Extension, Field, FieldElement, FieldError, FieldExtension, SquareRoot,
};
use crypto_bigint::U256;
use num_traits::Inv;
use std::ops::Mul;
use subtle::CtOption;

pub type Fp4 = FieldExtension<2, Fp2>;

impl Fp4 {
    /// `(c0 + c1·v)·v = c1·u + c0·v`
    pub(crate) fn mul_by_v(&self) -> Self {
        Self([self.0[1].mul_by_u(), self.0[0]])
    }
}
impl Mul for Fp4 {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self::Output {
        let t0 = self.0[0] * rhs.0[0];
        let t1 = self.0[1] * rhs.0[1];
        let c1 = (self.0[0] + self.0[1]) * (rhs.0[0] + rhs.0[1]) - t0 - t1;
        let c0 = t0 + t1.mul_by_u();
        Self([c0, c1])
    }
}
impl Inv for Fp4 {
    type Output = CtOption<Self>;
    fn inv(self) -> CtOption<Self> {
        let norm = self.0[0].square() - self.0[1].square().mul_by_u();
        let inverse = norm
            .invert()
            .into_option()
            .map(|n| Self([self.0[0] * n, -(self.0[1] * n)]));
        ct_option(inverse, self)
    }
}
impl FieldElement for Fp4 {
    fn is_zero(&self) -> bool {
        self.is_zero_coefficients()
    }
}

#[derive(Clone, Debug)]
pub struct Fp4Field {
    fp2: Fp2Field,
    // v^(p-1) = u^((p-1)/2)
    frobenius_coeff: Fp2,
}

impl Fp4Field {
    /// `u` is a square in `Fp2` exactly when its norm `2` is a square in `Fp`.
    pub fn new(fp2: Fp2Field) -> Result<Self, FieldError> {
        let base: &PrimeField = fp2.base();
        if base.is_square(&base.from_u64(2)) {
            return Err(FieldError::ReducibleTower);
        }
        let p_minus_one = base.modulus().wrapping_sub(&U256::ONE);
        let (exponent, _) =
            crate::fields::utils::div_rem_u64(&p_minus_one, 2).ok_or(FieldError::InvalidModulus)?;
        let frobenius_coeff = fp2.pow(&fp2.u(), &exponent);
        tracing::debug!(?frobenius_coeff, "Fp4Field::new");
        Ok(Self {
            fp2,
            frobenius_coeff,
        })
    }

    pub fn element(&self, c0: Fp2, c1: Fp2) -> Fp4 {
        Fp4::new(&[c0, c1])
    }

    pub fn v(&self) -> Fp4 {
        self.element(self.fp2.zero(), self.fp2.one())
    }

    /// Builds `c0 + c1·v` from `[c1, c0]`, each itself high first.
    pub fn from_high_first(&self, value: &[[U256; 2]; 2]) -> Result<Fp4, FieldError> {
        Ok(self.element(
            self.fp2.from_high_first(&value[1])?,
            self.fp2.from_high_first(&value[0])?,
        ))
    }

    pub fn to_high_first(&self, x: &Fp4) -> [[U256; 2]; 2] {
        [self.fp2.to_high_first(&x.0[1]), self.fp2.to_high_first(&x.0[0])]
    }

    fn frobenius_once(&self, x: &Fp4) -> Fp4 {
        self.element(x.0[0].conjugate(), x.0[1].conjugate() * self.frobenius_coeff)
    }
}

impl Field for Fp4Field {
    type Element = Fp4;

    fn zero(&self) -> Fp4 {
        self.extend(&self.fp2.zero())
    }
    fn one(&self) -> Fp4 {
        self.extend(&self.fp2.one())
    }
    fn from_u64(&self, value: u64) -> Fp4 {
        self.extend(&self.fp2.from_u64(value))
    }
    fn frobenius(&self, x: &Fp4, power: usize) -> Fp4 {
        (0..power % 4).fold(*x, |acc, _| self.frobenius_once(&acc))
    }
    fn smul(&self, k: u64, x: &Fp4) -> Fp4 {
        x.scale(self.fp2.from_u64(k))
    }
}

impl Extension for Fp4Field {
    type Base = Fp2Field;

    fn base(&self) -> &Fp2Field {
        &self.fp2
    }
    fn extend(&self, x: &Fp2) -> Fp4 {
        self.element(*x, self.fp2.zero())
    }
}
