//! This module implements the prime field `Fp` for a modulus chosen at run time.
//!
//! Elements are kept in Montgomery form through `crypto_bigint`'s `MontyForm`, which
//! carries the modulus parameters inside every element. Binary operations on two
//! elements therefore need no outside context; only the constants (identities,
//! square root data, encoding width) live in the [`PrimeField`] configuration.
//!
//! The modulus is required to be an odd prime of at most 256 bits. Primality itself
//! is not proven; a composite modulus is only caught indirectly, for instance when no
//! quadratic non-residue can be found for the square root precomputation.
//!
//! References
//! ----------
//! 1. <https://cacr.uwaterloo.ca/hac/about/chap14.pdf>
//! 2. <https://eprint.iacr.org/2012/685.pdf> (Tonelli-Shanks, Alg. 5)

use crate::fields::utils::{div_rem_u64, parse_hex_u256};
use crate::fields::{ct_option, Field, FieldElement, FieldError, SquareRoot};
use crypto_bigint::modular::{MontyForm, MontyParams};
use crypto_bigint::subtle::{Choice, ConstantTimeEq};
use crypto_bigint::{Encoding, Odd, Uint, U256};
use num_traits::Inv;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use subtle::CtOption;

pub(crate) const LIMBS: usize = U256::LIMBS;

// the least quadratic non-residue of any prime is far below this bound
const NON_RESIDUE_SEARCH_LIMIT: u64 = 1 << 16;

/// An element of a prime field. Only elements created by the same [`PrimeField`]
/// may be combined.
#[derive(Clone, Copy, Debug)]
pub struct Fp(pub(crate) MontyForm<LIMBS>);

impl Fp {
    /// The canonical integer representative in `[0, p)`.
    pub fn value(&self) -> U256 {
        self.0.retrieve()
    }
}

/// Configuration of `Z/pZ`: Montgomery parameters plus the constants needed for
/// square roots and fixed-width encoding.
#[derive(Clone, Debug)]
pub struct PrimeField {
    params: MontyParams<LIMBS>,
    modulus: U256,
    byte_len: usize,
    // (p - 1) / 2
    euler_exponent: U256,
    // p - 1 = q * 2^s with q odd
    two_adicity: u32,
    odd_part: U256,
    // (q + 1) / 2
    odd_part_half: U256,
    // z^q for a non-residue z
    root_of_unity: Fp,
}

impl PrimeField {
    pub fn new(modulus: &U256) -> Result<Self, FieldError> {
        let odd: Option<Odd<U256>> = CtOption::from(Odd::new(*modulus)).into();
        let odd = odd.ok_or(FieldError::InvalidModulus)?;
        if *modulus <= U256::from_u64(2) {
            return Err(FieldError::InvalidModulus);
        }
        let params = MontyParams::new(odd);
        let p_minus_one = modulus.wrapping_sub(&U256::ONE);
        let (euler_exponent, _) =
            div_rem_u64(&p_minus_one, 2).ok_or(FieldError::InvalidModulus)?;

        let mut odd_part = p_minus_one;
        let mut two_adicity = 0u32;
        while !odd_part.bit_vartime(0) {
            (odd_part, _) = div_rem_u64(&odd_part, 2).ok_or(FieldError::InvalidModulus)?;
            two_adicity += 1;
        }
        let (odd_part_half, _) = div_rem_u64(&odd_part.wrapping_add(&U256::ONE), 2)
            .ok_or(FieldError::InvalidModulus)?;

        let mut field = Self {
            params,
            modulus: *modulus,
            byte_len: (modulus.bits() as usize).div_ceil(8),
            euler_exponent,
            two_adicity,
            odd_part,
            odd_part_half,
            root_of_unity: Fp(MontyForm::one(params)),
        };
        let non_residue = (2..NON_RESIDUE_SEARCH_LIMIT)
            .map(|z| field.from_u64(z))
            .find(|z| field.legendre(z) == -field.one())
            .ok_or(FieldError::InvalidModulus)?;
        field.root_of_unity = field.pow(&non_residue, &field.odd_part);
        tracing::debug!(modulus = ?field.modulus, two_adicity, "PrimeField::new");
        Ok(field)
    }

    /// Parses a hex modulus, see [`PrimeField::new`].
    pub fn from_modulus_hex(modulus: &str) -> Result<Self, FieldError> {
        Self::new(&parse_hex_u256(modulus)?)
    }

    pub fn modulus(&self) -> &U256 {
        &self.modulus
    }

    /// Width of the fixed-length big-endian encoding, the byte length of `p`.
    pub fn byte_len(&self) -> usize {
        self.byte_len
    }

    /// Reduces an arbitrary integer into the field.
    pub fn element(&self, value: &U256) -> Fp {
        Fp(MontyForm::new(value, self.params))
    }

    /// Like [`PrimeField::element`] but rejects values outside `[0, p)`.
    pub fn checked_element(&self, value: &U256) -> Result<Fp, FieldError> {
        if *value >= self.modulus {
            return Err(FieldError::NonCanonical);
        }
        Ok(self.element(value))
    }

    /// Parses a canonical element from big-endian hex.
    pub fn from_hex(&self, value: &str) -> Result<Fp, FieldError> {
        self.checked_element(&parse_hex_u256(value)?)
    }

    /// Parses a decimal literal of any length, reducing it modulo `p`.
    pub fn from_decimal(&self, value: &str) -> Result<Fp, FieldError> {
        if value.is_empty() {
            return Err(FieldError::InvalidLiteral);
        }
        let ten = self.from_u64(10);
        let mut res = self.zero();
        for c in value.chars() {
            match c.to_digit(10) {
                Some(d) => {
                    res *= ten;
                    res += self.from_u64(d as u64);
                }
                None => return Err(FieldError::InvalidLiteral),
            }
        }
        Ok(res)
    }

    /// Big-endian encoding of exactly [`PrimeField::byte_len`] bytes.
    pub fn field_to_bytes(&self, x: &Fp) -> Vec<u8> {
        let bytes = x.value().to_be_bytes();
        bytes[bytes.len() - self.byte_len..].to_vec()
    }

    /// Inverse of [`PrimeField::field_to_bytes`]; the input must have the exact
    /// width and encode an integer below `p`.
    pub fn bytes_to_field(&self, bytes: &[u8]) -> Result<Fp, FieldError> {
        if bytes.len() != self.byte_len {
            return Err(FieldError::InvalidLength {
                expected: self.byte_len,
                actual: bytes.len(),
            });
        }
        let mut repr = [0u8; U256::BYTES];
        repr[U256::BYTES - self.byte_len..].copy_from_slice(bytes);
        self.checked_element(&U256::from_be_bytes(repr))
    }

    /// `x^((p-1)/2)`, which is `0`, `1` or `-1`.
    pub fn legendre(&self, x: &Fp) -> Fp {
        self.pow(x, &self.euler_exponent)
    }
}

impl Field for PrimeField {
    type Element = Fp;

    fn zero(&self) -> Fp {
        Fp(MontyForm::zero(self.params))
    }
    fn one(&self) -> Fp {
        Fp(MontyForm::one(self.params))
    }
    fn from_u64(&self, value: u64) -> Fp {
        self.element(&U256::from_u64(value))
    }
    fn frobenius(&self, x: &Fp, _power: usize) -> Fp {
        *x
    }
    fn pow<const L: usize>(&self, x: &Fp, exponent: &Uint<L>) -> Fp {
        Fp(x.0.pow(exponent))
    }
}

impl SquareRoot for PrimeField {
    /// Tonelli-Shanks. For `p ≡ 3 (mod 4)` the loop body never runs and this is the
    /// familiar `x^((p+1)/4)`.
    fn sqrt(&self, x: &Fp) -> CtOption<Fp> {
        if x.is_zero() {
            return CtOption::new(*x, Choice::from(1u8));
        }
        let one = self.one();
        let mut m = self.two_adicity;
        let mut c = self.root_of_unity;
        let mut t = self.pow(x, &self.odd_part);
        let mut r = self.pow(x, &self.odd_part_half);
        while t != one {
            let mut i = 0u32;
            let mut t_pow = t;
            while t_pow != one {
                t_pow = t_pow.square();
                i += 1;
                if i == m {
                    // x is not a square
                    return CtOption::new(*x, Choice::from(0u8));
                }
            }
            let mut b = c;
            for _ in 0..(m - i - 1) {
                b = b.square();
            }
            m = i;
            c = b.square();
            t *= c;
            r *= b;
        }
        CtOption::new(r, r.square().ct_eq(x))
    }
    fn is_square(&self, x: &Fp) -> bool {
        let symbol = self.legendre(x);
        symbol.is_zero() || symbol == self.one()
    }
}

impl FieldElement for Fp {
    fn is_zero(&self) -> bool {
        self.value() == U256::ZERO
    }
    fn square(&self) -> Self {
        Self(self.0.square())
    }
}

impl Add for Fp {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}
impl AddAssign for Fp {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}
impl Sub for Fp {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}
impl SubAssign for Fp {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}
impl Mul for Fp {
    type Output = Self;
    fn mul(self, other: Self) -> Self {
        Self(self.0 * other.0)
    }
}
impl MulAssign for Fp {
    fn mul_assign(&mut self, other: Self) {
        *self = *self * other;
    }
}
impl Neg for Fp {
    type Output = Self;
    fn neg(self) -> Self {
        Self(-self.0)
    }
}
/// Equality compares Montgomery representations, which is only meaningful for
/// elements of the same field.
impl ConstantTimeEq for Fp {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.as_montgomery().ct_eq(other.0.as_montgomery())
    }
}
impl PartialEq for Fp {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.ct_eq(other))
    }
}
impl Eq for Fp {}
/// Bernstein-Yang inversion from `crypto_bigint`, see
/// <https://eprint.iacr.org/2019/266.pdf>. Zero has no inverse.
impl Inv for Fp {
    type Output = CtOption<Self>;
    fn inv(self) -> CtOption<Self> {
        let inverse: Option<MontyForm<LIMBS>> = CtOption::from(self.0.inv()).into();
        ct_option(inverse.map(Self), self)
    }
}
