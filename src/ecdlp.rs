//! Discrete-log parameter sets: a prime field, a curve over it, a base point `G` of
//! prime order `n` and the cofactor `h`.

use crate::fields::fp::{Fp, PrimeField};
use crate::fields::utils::{parse_hex_u256, u256_to_u512};
use crate::fields::FieldError;
use crate::groups::{EcPoint, EllipticCurve, GroupError};
use crate::params::sm2;
use crypto_bigint::{Uint, U256, U512};

#[derive(Clone, Debug)]
pub struct Ecdlp {
    curve: EllipticCurve<PrimeField>,
    generator: EcPoint<Fp>,
    order: U256,
    cofactor: U256,
    scalar_field: PrimeField,
}

/// `|h·n - (p + 1)| ≤ ⌊√(4p)⌋`, computed in 512 bits.
fn check_cofactor(p: &U256, n: &U256, h: &U256) -> Result<(), GroupError> {
    let order = u256_to_u512(h).wrapping_mul(&u256_to_u512(n));
    let p_plus_one = u256_to_u512(p).wrapping_add(&U512::ONE);
    let distance = if order > p_plus_one {
        order.wrapping_sub(&p_plus_one)
    } else {
        p_plus_one.wrapping_sub(&order)
    };
    let bound = u256_to_u512(p).wrapping_mul(&U512::from_u64(4)).sqrt_vartime();
    if *h == U256::ZERO || distance > bound {
        tracing::debug!(?n, ?h, "Ecdlp::new");
        return Err(GroupError::InvalidCofactor);
    }
    Ok(())
}

impl Ecdlp {
    /// Builds the parameter set for `y² = x³ + a·x + b` over `F_p` and checks that
    /// `G = (g[0], g[1])` lies on the curve and that `n·G` is the point at infinity.
    /// The cofactor is only checked for consistency: `h·n` must lie in the Hasse
    /// interval `|h·n - (p + 1)| ≤ 2√p`. The curve is never point-counted.
    pub fn new(
        p: &U256,
        a: &U256,
        b: &U256,
        g: &[U256; 2],
        n: &U256,
        h: &U256,
    ) -> Result<Self, GroupError> {
        let field = PrimeField::new(p)?;
        check_cofactor(p, n, h)?;
        let (a, b) = (field.checked_element(a)?, field.checked_element(b)?);
        let (gx, gy) = (field.checked_element(&g[0])?, field.checked_element(&g[1])?);
        let curve = EllipticCurve::new(field, a, b)?;
        let generator = curve.point(gx, gy)?;
        if !curve.scalar_multiply(n, &generator)?.is_infinity() {
            tracing::debug!(?n, "Ecdlp::new");
            return Err(GroupError::NotInSubgroup);
        }
        let scalar_field = PrimeField::new(n)?;
        tracing::debug!(?p, ?n, ?h, "Ecdlp::new");
        Ok(Self {
            curve,
            generator,
            order: *n,
            cofactor: *h,
            scalar_field,
        })
    }

    /// The GM/T 0003 (SM2) recommended curve.
    pub fn sm2() -> Result<Self, GroupError> {
        Self::new(
            &parse_hex_u256(sm2::P)?,
            &parse_hex_u256(sm2::A)?,
            &parse_hex_u256(sm2::B)?,
            &[parse_hex_u256(sm2::GX)?, parse_hex_u256(sm2::GY)?],
            &parse_hex_u256(sm2::N)?,
            &U256::from_u64(sm2::H),
        )
    }

    /// `k·G`.
    pub fn scalar_mul_base<const L: usize>(&self, k: &Uint<L>) -> Result<EcPoint<Fp>, GroupError> {
        self.curve.scalar_multiply(k, &self.generator)
    }

    /// Fixed-width big-endian encoding, as wide as `p`.
    pub fn field_to_bytes(&self, x: &Fp) -> Vec<u8> {
        self.field().field_to_bytes(x)
    }

    pub fn bytes_to_field(&self, bytes: &[u8]) -> Result<Fp, FieldError> {
        self.field().bytes_to_field(bytes)
    }

    pub fn field(&self) -> &PrimeField {
        self.curve.field()
    }
    pub fn curve(&self) -> &EllipticCurve<PrimeField> {
        &self.curve
    }
    pub fn generator(&self) -> &EcPoint<Fp> {
        &self.generator
    }
    pub fn order(&self) -> &U256 {
        &self.order
    }
    pub fn cofactor(&self) -> &U256 {
        &self.cofactor
    }
    /// `Z/nZ`, the field private scalars live in.
    pub fn scalar_field(&self) -> &PrimeField {
        &self.scalar_field
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{Field, FieldElement};

    fn sm2() -> Ecdlp {
        Ecdlp::sm2().expect("SM2 parameters are valid")
    }

    #[test]
    fn test_known_answer() {
        let ecdlp = sm2();
        let k = U256::from_be_hex("3945208F7B2144B13F36E38AC6D39F95889393692860B51A42FB81EF4DF7C5B8");
        let expected = ecdlp
            .curve()
            .point(
                ecdlp
                    .field()
                    .from_hex("09F9DF311E5421A150DD7D161E4BC5C672179FAD1833FC076BB08FF356F35020")
                    .expect("x"),
                ecdlp
                    .field()
                    .from_hex("CCEA490CE26775A52DC6EA718CC1AA600AED05FBF35E084A6632F6072DA9AD13")
                    .expect("y"),
            )
            .expect("known answer is on the curve");
        assert_eq!(ecdlp.scalar_mul_base(&k), Ok(expected), "k·G mismatch");
    }
    #[test]
    fn test_base_point_order() {
        let ecdlp = sm2();
        let n = *ecdlp.order();
        assert_eq!(ecdlp.scalar_mul_base(&n), Ok(EcPoint::Infinity), "n·G != O");
        assert_eq!(
            ecdlp.scalar_mul_base(&n.wrapping_sub(&U256::ONE)),
            Ok(-*ecdlp.generator()),
            "(n-1)·G != -G"
        );
        assert_eq!(ecdlp.scalar_mul_base(&U256::ZERO), Ok(EcPoint::Infinity));
        assert_eq!(ecdlp.scalar_mul_base(&U256::ONE), Ok(*ecdlp.generator()));
        assert_eq!(*ecdlp.cofactor(), U256::ONE);
    }
    #[test]
    fn test_scalar_field() {
        let ecdlp = sm2();
        let scalars = ecdlp.scalar_field();
        assert_eq!(scalars.modulus(), ecdlp.order());
        let k = scalars.from_u64(12345);
        let k_inv = scalars.inv(&k).expect("non-zero scalar");
        // k·(k⁻¹·G) = G
        let q = ecdlp.scalar_mul_base(&k_inv.value()).expect("mul");
        let g = ecdlp.curve().scalar_multiply(&k.value(), &q).expect("mul");
        assert_eq!(g, *ecdlp.generator());
    }
    #[test]
    fn test_encoding() {
        let ecdlp = sm2();
        let five = ecdlp.field().from_u64(5);
        let bytes = ecdlp.field_to_bytes(&five);
        assert_eq!(bytes.len(), 32, "Encoding is not fixed width");
        assert!(bytes[..31].iter().all(|b| *b == 0) && bytes[31] == 5);
        assert_eq!(ecdlp.bytes_to_field(&bytes), Ok(five));
        let gx = ecdlp.generator().x().expect("affine generator");
        assert_eq!(ecdlp.bytes_to_field(&ecdlp.field_to_bytes(&gx)), Ok(gx));
        assert_eq!(
            ecdlp.bytes_to_field(&[0xff; 32]).err(),
            Some(FieldError::NonCanonical),
            "Integer above p accepted"
        );
    }
    #[test]
    fn test_rejects_bad_parameters() {
        let p = parse_hex_u256(sm2::P).expect("p");
        let a = parse_hex_u256(sm2::A).expect("a");
        let b = parse_hex_u256(sm2::B).expect("b");
        let gx = parse_hex_u256(sm2::GX).expect("gx");
        let gy = parse_hex_u256(sm2::GY).expect("gy");
        let n = parse_hex_u256(sm2::N).expect("n");
        let h = U256::ONE;
        assert_eq!(
            Ecdlp::new(&p, &a, &b, &[gx, gy.wrapping_add(&U256::ONE)], &n, &h).err(),
            Some(GroupError::NotOnCurve)
        );
        assert_eq!(
            Ecdlp::new(&p, &a, &b, &[gx, gy], &n.wrapping_sub(&U256::from_u64(2)), &h).err(),
            Some(GroupError::NotInSubgroup)
        );
        assert_eq!(
            Ecdlp::new(&p.wrapping_add(&U256::ONE), &a, &b, &[gx, gy], &n, &h).err(),
            Some(GroupError::Field(FieldError::InvalidModulus))
        );
    }
    #[test]
    fn test_cofactor_check() {
        let p = parse_hex_u256(sm2::P).expect("p");
        let n = parse_hex_u256(sm2::N).expect("n");
        assert_eq!(check_cofactor(&p, &n, &U256::ONE), Ok(()));
        for h in [U256::ZERO, U256::from_u64(2), U256::MAX] {
            assert_eq!(
                check_cofactor(&p, &n, &h),
                Err(GroupError::InvalidCofactor),
                "Cofactor {} accepted",
                h
            );
        }
        // y² = x³ + x + 1 over F23 has 28 = 4·7 points; 7 = 3·2 + 1 also fits the interval
        let (p, n) = (U256::from_u64(23), U256::from_u64(7));
        assert_eq!(check_cofactor(&p, &n, &U256::from_u64(4)), Ok(()));
        assert_eq!(check_cofactor(&p, &n, &U256::from_u64(1)), Err(GroupError::InvalidCofactor));
    }
    #[test]
    fn test_rejects_zero_cofactor() {
        let ecdlp = sm2();
        let g = ecdlp.generator();
        let (gx, gy) = (g.x().expect("affine").value(), g.y().expect("affine").value());
        let result = Ecdlp::new(
            &parse_hex_u256(sm2::P).expect("p"),
            &parse_hex_u256(sm2::A).expect("a"),
            &parse_hex_u256(sm2::B).expect("b"),
            &[gx, gy],
            ecdlp.order(),
            &U256::ZERO,
        );
        assert_eq!(result.err(), Some(GroupError::InvalidCofactor));
    }
    #[test]
    fn test_generator_is_valid() {
        let ecdlp = sm2();
        let g = ecdlp.generator();
        assert!(ecdlp.curve().is_valid(g));
        let y = ecdlp.curve().solve_y(&g.x().expect("affine")).expect("x has a y");
        assert!(y == g.y().expect("affine") || (y + g.y().expect("affine")).is_zero());
    }
}
