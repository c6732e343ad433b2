//! Affine short Weierstrass curves `y² = x³ + a·x + b` over any level of the tower.
//!
//! The same [`EllipticCurve`] serves the base curve over `Fp`, the sextic twist over
//! `Fp2`, and the untwisted image inside `Fp12`. Points are plain values; the curve
//! object holds the coefficients and the field configuration they belong to.

use crate::fields::{Field, FieldElement, FieldError, SquareRoot};
use crypto_bigint::Uint;
use std::ops::Neg;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GroupError {
    #[error("point is not on the curve")]
    NotOnCurve,
    #[error("points share an x-coordinate but are neither equal nor opposite")]
    InvalidPoint,
    #[error("curve is singular")]
    SingularCurve,
    #[error("point does not have the expected order")]
    NotInSubgroup,
    #[error("cofactor times order lies outside the Hasse interval")]
    InvalidCofactor,
    #[error(transparent)]
    Field(#[from] FieldError),
}

/// A curve point: the identity, or an affine pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EcPoint<E> {
    Infinity,
    Affine { x: E, y: E },
}

impl<E: Copy> EcPoint<E> {
    pub fn is_infinity(&self) -> bool {
        matches!(self, Self::Infinity)
    }
    pub fn x(&self) -> Option<E> {
        match self {
            Self::Infinity => None,
            Self::Affine { x, .. } => Some(*x),
        }
    }
    pub fn y(&self) -> Option<E> {
        match self {
            Self::Infinity => None,
            Self::Affine { y, .. } => Some(*y),
        }
    }
}

impl<E: Neg<Output = E>> Neg for EcPoint<E> {
    type Output = Self;
    fn neg(self) -> Self {
        match self {
            Self::Infinity => Self::Infinity,
            Self::Affine { x, y } => Self::Affine { x, y: -y },
        }
    }
}

#[derive(Clone, Debug)]
pub struct EllipticCurve<K: Field> {
    field: K,
    a: K::Element,
    b: K::Element,
}

impl<K: Field> EllipticCurve<K> {
    /// Rejects singular curves, `4a³ + 27b² = 0`.
    pub fn new(field: K, a: K::Element, b: K::Element) -> Result<Self, GroupError> {
        let discriminant = field.smul(4, &(a.square() * a)) + field.smul(27, &b.square());
        if discriminant.is_zero() {
            return Err(GroupError::SingularCurve);
        }
        Ok(Self { field, a, b })
    }

    pub fn field(&self) -> &K {
        &self.field
    }
    pub fn a(&self) -> &K::Element {
        &self.a
    }
    pub fn b(&self) -> &K::Element {
        &self.b
    }

    /// The right-hand side `x³ + a·x + b`.
    pub fn y_squared(&self, x: &K::Element) -> K::Element {
        x.square() * *x + self.a * *x + self.b
    }

    pub fn is_valid(&self, point: &EcPoint<K::Element>) -> bool {
        match point {
            EcPoint::Infinity => true,
            EcPoint::Affine { x, y } => y.square() == self.y_squared(x),
        }
    }

    /// Checked constructor for an affine point.
    pub fn point(&self, x: K::Element, y: K::Element) -> Result<EcPoint<K::Element>, GroupError> {
        let point = EcPoint::Affine { x, y };
        match self.is_valid(&point) {
            true => Ok(point),
            false => {
                tracing::debug!(?x, ?y, "EllipticCurve::point");
                Err(GroupError::NotOnCurve)
            }
        }
    }

    pub fn negate(&self, point: &EcPoint<K::Element>) -> EcPoint<K::Element> {
        -*point
    }

    /// Affine chord-and-tangent addition. Two points with the same `x` must be equal
    /// or opposite; anything else means an input was not on this curve.
    pub fn add(
        &self,
        p: &EcPoint<K::Element>,
        q: &EcPoint<K::Element>,
    ) -> Result<EcPoint<K::Element>, GroupError> {
        let (x1, y1, x2, y2) = match (p, q) {
            (EcPoint::Infinity, _) => return Ok(*q),
            (_, EcPoint::Infinity) => return Ok(*p),
            (EcPoint::Affine { x: x1, y: y1 }, EcPoint::Affine { x: x2, y: y2 }) => {
                (*x1, *y1, *x2, *y2)
            }
        };
        let lambda = if x1 == x2 {
            // also catches doubling a point with y = 0
            if self.field.is_opposite(&y1, &y2) {
                return Ok(EcPoint::Infinity);
            }
            if y1 != y2 {
                tracing::debug!(?x1, ?y1, ?y2, "EllipticCurve::add");
                return Err(GroupError::InvalidPoint);
            }
            let numerator = self.field.smul(3, &x1.square()) + self.a;
            self.field.div(&numerator, &y1.double())?
        } else {
            self.field.div(&(y2 - y1), &(x2 - x1))?
        };
        let x3 = lambda.square() - x1 - x2;
        let y3 = lambda * (x1 - x3) - y1;
        Ok(EcPoint::Affine { x: x3, y: y3 })
    }

    pub fn double(&self, p: &EcPoint<K::Element>) -> Result<EcPoint<K::Element>, GroupError> {
        self.add(p, p)
    }

    pub fn subtract(
        &self,
        p: &EcPoint<K::Element>,
        q: &EcPoint<K::Element>,
    ) -> Result<EcPoint<K::Element>, GroupError> {
        self.add(p, &self.negate(q))
    }

    /// Left-to-right double-and-add, starting from `p` at the leading bit of `k`.
    /// `0·p` is the point at infinity.
    pub fn scalar_multiply<const L: usize>(
        &self,
        k: &Uint<L>,
        p: &EcPoint<K::Element>,
    ) -> Result<EcPoint<K::Element>, GroupError> {
        let bits = k.bits();
        if bits == 0 {
            return Ok(EcPoint::Infinity);
        }
        let mut result = *p;
        for i in (0..bits - 1).rev() {
            result = self.double(&result)?;
            if k.bit_vartime(i) {
                result = self.add(&result, p)?;
            }
        }
        Ok(result)
    }
}

impl<K: SquareRoot> EllipticCurve<K> {
    /// A `y` with `(x, y)` on the curve, if `x³ + a·x + b` is a square.
    pub fn solve_y(&self, x: &K::Element) -> Option<K::Element> {
        self.field.sqrt(&self.y_squared(x)).into_option()
    }

    /// The point with abscissa `x`, if one exists.
    pub fn lift_x(&self, x: &K::Element) -> Option<EcPoint<K::Element>> {
        self.solve_y(x).map(|y| EcPoint::Affine { x: *x, y })
    }
}
