//! The dodecic level `Fp12 = Fp4[w] / (w³ - v)`, elements `c0 + c1·w + c2·w²`.
//! This is the target group's ambient field for the pairing.
//!
//! Since `w⁶ = u`, the Frobenius map only needs the two constants `γ = u^((p-1)/6)`
//! and `γ²`, with `w^p = γ·w`. That requires `p ≡ 1 (mod 6)`, which holds for every
//! BN prime.

use crate::fields::fp::{Fp, PrimeField};
use crate::fields::fp2::Fp2;
use crate::fields::fp4::{Fp4, Fp4Field};
use crate::fields::utils::{div_rem_u64, parse_hex_u256};
use crate::fields::{ct_option, Extension, Field, FieldElement, FieldError, FieldExtension};
use crypto_bigint::U256;
use num_traits::Inv;
use std::ops::Mul;
use subtle::CtOption;

pub type Fp12 = FieldExtension<3, Fp4>;

impl Mul for Fp12 {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self::Output {
        let [a0, a1, a2] = self.0;
        let [b0, b1, b2] = rhs.0;
        let c0 = a0 * b0 + (a1 * b2 + a2 * b1).mul_by_v();
        let c1 = a0 * b1 + a1 * b0 + (a2 * b2).mul_by_v();
        let c2 = a0 * b2 + a1 * b1 + a2 * b0;
        Self([c0, c1, c2])
    }
}
impl Inv for Fp12 {
    type Output = CtOption<Self>;
    /// Cubic extension inverse through the adjugate, see
    /// <https://eprint.iacr.org/2010/354.pdf>, Alg. 17.
    fn inv(self) -> CtOption<Self> {
        let [a0, a1, a2] = self.0;
        let t0 = a0.square() - (a1 * a2).mul_by_v();
        let t1 = a2.square().mul_by_v() - a0 * a1;
        let t2 = a1.square() - a0 * a2;
        let denominator = a0 * t0 + (a2 * t1 + a1 * t2).mul_by_v();
        let inverse = denominator
            .invert()
            .into_option()
            .map(|d| Self([t0 * d, t1 * d, t2 * d]));
        ct_option(inverse, self)
    }
}
impl FieldElement for Fp12 {
    fn is_zero(&self) -> bool {
        self.is_zero_coefficients()
    }
}

#[derive(Clone, Debug)]
pub struct Fp12Field {
    fp4: Fp4Field,
    // w^(p-1) and its square
    frobenius_coeff: Fp2,
    frobenius_coeff_sq: Fp2,
}

impl Fp12Field {
    /// Requires `p ≡ 1 (mod 6)` and `v` to be a non-cube in `Fp4`. The latter is
    /// checked through the norm: `v` is a cube iff `N(v)^((p-1)/3) = 1`.
    pub fn new(fp4: Fp4Field) -> Result<Self, FieldError> {
        let fp2 = fp4.base();
        let base: &PrimeField = fp2.base();
        let p_minus_one = base.modulus().wrapping_sub(&U256::ONE);
        let (sixth, rem) = div_rem_u64(&p_minus_one, 6).ok_or(FieldError::InvalidModulus)?;
        if rem != U256::ZERO {
            return Err(FieldError::ReducibleTower);
        }
        let (third, _) = div_rem_u64(&p_minus_one, 3).ok_or(FieldError::InvalidModulus)?;

        let v = fp4.v();
        let norm = (0..4).fold(fp4.one(), |acc, i| acc * fp4.frobenius(&v, i));
        if base.is_one(&base.pow(&norm.0[0].0[0], &third)) {
            return Err(FieldError::ReducibleTower);
        }

        let frobenius_coeff = fp2.pow(&fp2.u(), &sixth);
        let frobenius_coeff_sq = frobenius_coeff.square();
        tracing::debug!(?frobenius_coeff, "Fp12Field::new");
        Ok(Self {
            fp4,
            frobenius_coeff,
            frobenius_coeff_sq,
        })
    }

    /// Builds the whole tower over `Fp`.
    pub fn from_prime_field(base: PrimeField) -> Result<Self, FieldError> {
        let fp2 = crate::fields::fp2::Fp2Field::new(base)?;
        Self::new(Fp4Field::new(fp2)?)
    }

    pub fn element(&self, c0: Fp4, c1: Fp4, c2: Fp4) -> Fp12 {
        Fp12::new(&[c0, c1, c2])
    }

    pub fn w(&self) -> Fp12 {
        self.element(self.fp4.zero(), self.fp4.one(), self.fp4.zero())
    }

    /// Embeds a base field element.
    pub fn from_base(&self, x: &Fp) -> Fp12 {
        let fp2 = self.fp4.base();
        self.extend(&self.fp4.extend(&fp2.extend(x)))
    }

    /// The twelve `Fp` coefficients, highest first: `w²·v·u`, `w²·v`, `w²·u`, `w²`,
    /// `w·v·u`, and so on down to the constant term.
    pub fn to_high_first(&self, x: &Fp12) -> [U256; 12] {
        let mut out = [U256::ZERO; 12];
        for (i, c) in x.0.iter().rev().enumerate() {
            let [hi, lo] = self.fp4.to_high_first(c);
            out[4 * i..4 * i + 2].copy_from_slice(&hi);
            out[4 * i + 2..4 * i + 4].copy_from_slice(&lo);
        }
        out
    }

    /// Inverse of [`Fp12Field::to_high_first`].
    pub fn from_high_first(&self, value: &[U256; 12]) -> Result<Fp12, FieldError> {
        let coefficient = |i: usize| {
            self.fp4.from_high_first(&[
                [value[4 * i], value[4 * i + 1]],
                [value[4 * i + 2], value[4 * i + 3]],
            ])
        };
        Ok(self.element(coefficient(2)?, coefficient(1)?, coefficient(0)?))
    }

    pub fn from_hex_high_first(&self, value: &[&str; 12]) -> Result<Fp12, FieldError> {
        let mut ints = [U256::ZERO; 12];
        for (int, s) in ints.iter_mut().zip(value.iter()) {
            *int = parse_hex_u256(s)?;
        }
        self.from_high_first(&ints)
    }

    fn frobenius_once(&self, x: &Fp12) -> Fp12 {
        let [a0, a1, a2] = x.0;
        self.element(
            self.fp4.frobenius(&a0, 1),
            self.fp4.frobenius(&a1, 1).scale(self.frobenius_coeff),
            self.fp4.frobenius(&a2, 1).scale(self.frobenius_coeff_sq),
        )
    }
}

impl Field for Fp12Field {
    type Element = Fp12;

    fn zero(&self) -> Fp12 {
        self.extend(&self.fp4.zero())
    }
    fn one(&self) -> Fp12 {
        self.extend(&self.fp4.one())
    }
    fn from_u64(&self, value: u64) -> Fp12 {
        self.extend(&self.fp4.from_u64(value))
    }
    fn frobenius(&self, x: &Fp12, power: usize) -> Fp12 {
        (0..power % 12).fold(*x, |acc, _| self.frobenius_once(&acc))
    }
    fn smul(&self, k: u64, x: &Fp12) -> Fp12 {
        x.scale(self.fp4.from_u64(k))
    }
}

impl Extension for Fp12Field {
    type Base = Fp4Field;

    fn base(&self) -> &Fp4Field {
        &self.fp4
    }
    fn extend(&self, x: &Fp4) -> Fp12 {
        self.element(*x, self.fp4.zero(), self.fp4.zero())
    }
}
