//! The optimal R-ate pairing on BN curves `E: y² = x³ + b` with the sextic twist
//! `E': y² = x³ + b·u` over `Fp2`.
//!
//! Points of the twist are mapped into `E(Fp12)` by the untwisting isomorphism, and
//! Miller's algorithm is run with affine line functions evaluated at the embedded
//! first argument. The loop runs over the bits of `6t + 2` and is closed by two
//! Frobenius-twisted addition lines, after which the final exponentiation by
//! `(p¹² - 1)/n` maps the Miller value into the order `n` subgroup of `Fp12*`.
//!
//! References
//! ----------
//! 1. <https://eprint.iacr.org/2008/096.pdf> (Vercauteren, optimal pairings)
//! 2. <https://eprint.iacr.org/2007/390.pdf> (Devegili et al., BN final exponentiation)
//! 3. GM/T 0044-2016, SM9 identity-based cryptographic algorithms, part 1

use crate::fields::fp::{Fp, PrimeField};
use crate::fields::fp12::{Fp12, Fp12Field};
use crate::fields::fp2::{Fp2, Fp2Field};
use crate::fields::fp4::Fp4;
use crate::fields::utils::{parse_hex_u256, u256_to_u512, u512_to_u256};
use crate::fields::{Extension, Field, FieldElement, FieldError};
use crate::groups::{EcPoint, EllipticCurve, GroupError};
use crate::params::sm9;
use crypto_bigint::{U256, U512};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PairingError {
    #[error("only the twist beta = (1, 0) is supported")]
    UnsupportedTwist,
    #[error("seed is too large for a 256-bit modulus")]
    SeedTooLarge,
    #[error(transparent)]
    Field(#[from] FieldError),
    #[error(transparent)]
    Group(#[from] GroupError),
}

/// A BN pairing engine for one parameter set. Immutable once built.
#[derive(Clone, Debug)]
pub struct BnBidh {
    t: U256,
    p: U256,
    n: U256,
    miller_exponent: U256,
    curve: EllipticCurve<PrimeField>,
    twist: EllipticCurve<Fp2Field>,
    untwisted: EllipticCurve<Fp12Field>,
    g1: EcPoint<Fp>,
    g2: EcPoint<Fp2>,
    neg_two: Fp,
    neg_two_inv: Fp,
}

/// `p = 36t⁴ + 36t³ + 24t² + 6t + 1`, `n = 36t⁴ + 36t³ + 18t² + 6t + 1` and `6t + 2`,
/// computed in 512 bits and narrowed.
fn bn_parameters(t: &U256) -> Result<(U256, U256, U256), PairingError> {
    if t.bits() > 64 {
        return Err(PairingError::SeedTooLarge);
    }
    let t = u256_to_u512(t);
    let t2 = t.wrapping_mul(&t);
    let t3 = t2.wrapping_mul(&t);
    let t4 = t3.wrapping_mul(&t);
    let k = U512::from_u64;
    let six_t = k(6).wrapping_mul(&t);
    let common = k(36)
        .wrapping_mul(&t4)
        .wrapping_add(&k(36).wrapping_mul(&t3))
        .wrapping_add(&six_t)
        .wrapping_add(&U512::ONE);
    let p = common.wrapping_add(&k(24).wrapping_mul(&t2));
    let n = common.wrapping_add(&k(18).wrapping_mul(&t2));
    let narrow = |x: &U512| u512_to_u256(x).ok_or(PairingError::SeedTooLarge);
    Ok((narrow(&p)?, narrow(&n)?, narrow(&six_t.wrapping_add(&k(2)))?))
}

impl BnBidh {
    /// Builds the engine from the seed `t`, the curve constant `b`, the twist element
    /// `beta` (high coefficient first, must be `[1, 0]`, i.e. `u`), and generators
    /// `g1 ∈ E(Fp)`, `g2 ∈ E'(Fp2)` with coordinates high coefficient first.
    pub fn new(
        t: &U256,
        b: &U256,
        beta: &[U256; 2],
        g1: &[U256; 2],
        g2: &[[U256; 2]; 2],
    ) -> Result<Self, PairingError> {
        if *beta != [U256::ONE, U256::ZERO] {
            tracing::debug!(?beta, "BnBidh::new");
            return Err(PairingError::UnsupportedTwist);
        }
        let (p, n, miller_exponent) = bn_parameters(t)?;
        let fp = PrimeField::new(&p)?;
        let gt = Fp12Field::from_prime_field(fp.clone())?;
        let fp2 = gt.base().base().clone();

        let b = fp.checked_element(b)?;
        let curve = EllipticCurve::new(fp.clone(), fp.zero(), b)?;
        let twist = EllipticCurve::new(fp2.clone(), fp2.zero(), fp2.u().scale(b))?;
        let untwisted = EllipticCurve::new(gt.clone(), gt.zero(), gt.from_base(&b))?;

        let g1 = curve.point(fp.checked_element(&g1[0])?, fp.checked_element(&g1[1])?)?;
        let g2 = twist.point(fp2.from_high_first(&g2[0])?, fp2.from_high_first(&g2[1])?)?;
        if !curve.scalar_multiply(&n, &g1)?.is_infinity()
            || !twist.scalar_multiply(&n, &g2)?.is_infinity()
        {
            return Err(GroupError::NotInSubgroup.into());
        }

        let neg_two = -fp.from_u64(2);
        let neg_two_inv = fp.inv(&neg_two)?;
        tracing::debug!(?t, ?p, ?n, ?miller_exponent, "BnBidh::new");
        Ok(Self {
            t: *t,
            p,
            n,
            miller_exponent,
            curve,
            twist,
            untwisted,
            g1,
            g2,
            neg_two,
            neg_two_inv,
        })
    }

    /// The GM/T 0044 (SM9) BN256 parameter set.
    pub fn sm9() -> Result<Self, PairingError> {
        let hex = |s: &str| parse_hex_u256(s);
        Self::new(
            &hex(sm9::T)?,
            &U256::from_u64(sm9::B),
            &[hex(sm9::BETA[0])?, hex(sm9::BETA[1])?],
            &[hex(sm9::P1_X)?, hex(sm9::P1_Y)?],
            &[
                [hex(sm9::P2_X[0])?, hex(sm9::P2_X[1])?],
                [hex(sm9::P2_Y[0])?, hex(sm9::P2_Y[1])?],
            ],
        )
    }

    pub fn t(&self) -> &U256 {
        &self.t
    }
    pub fn p(&self) -> &U256 {
        &self.p
    }
    pub fn n(&self) -> &U256 {
        &self.n
    }
    pub fn g1(&self) -> &EcPoint<Fp> {
        &self.g1
    }
    pub fn g2(&self) -> &EcPoint<Fp2> {
        &self.g2
    }
    /// `E(Fp)`
    pub fn curve(&self) -> &EllipticCurve<PrimeField> {
        &self.curve
    }
    /// `E'(Fp2)`
    pub fn twist(&self) -> &EllipticCurve<Fp2Field> {
        &self.twist
    }
    pub fn gt(&self) -> &Fp12Field {
        self.untwisted.field()
    }
    fn fp2(&self) -> &Fp2Field {
        self.twist.field()
    }

    /// `E(Fp) → E(Fp12)`, coordinate-wise embedding.
    pub fn embed(&self, point: &EcPoint<Fp>) -> EcPoint<Fp12> {
        match point {
            EcPoint::Infinity => EcPoint::Infinity,
            EcPoint::Affine { x, y } => EcPoint::Affine {
                x: self.gt().from_base(x),
                y: self.gt().from_base(y),
            },
        }
    }

    /// The untwisting isomorphism `E'(Fp2) → E(Fp12)`, `(x', y') ↦ (x'·v·w/u, y'·v/u)`.
    /// `x'/u` lands in the `v·w` slot and `y'/u` in the `v` slot; `1/u = u/(-2)`.
    pub fn untwist(&self, point: &EcPoint<Fp2>) -> EcPoint<Fp12> {
        let gt = self.gt();
        let fp4 = gt.base();
        let zero4 = fp4.zero();
        let over_u = |c: &Fp2| self.fp2().element(c.0[1], c.0[0] * self.neg_two_inv);
        match point {
            EcPoint::Infinity => EcPoint::Infinity,
            EcPoint::Affine { x, y } => EcPoint::Affine {
                x: gt.element(zero4, Fp4::new(&[self.fp2().zero(), over_u(x)]), zero4),
                y: gt.element(Fp4::new(&[self.fp2().zero(), over_u(y)]), zero4, zero4),
            },
        }
    }

    /// Left inverse of [`BnBidh::untwist`]: reads the `v·w` and `v` slots back and
    /// multiplies by `u`. Only meaningful on the image of the untwisting map and its
    /// Frobenius conjugates.
    pub fn retwist(&self, point: &EcPoint<Fp12>) -> EcPoint<Fp2> {
        let times_u = |c: &Fp2| self.fp2().element(c.0[1] * self.neg_two, c.0[0]);
        match point {
            EcPoint::Infinity => EcPoint::Infinity,
            EcPoint::Affine { x, y } => EcPoint::Affine {
                x: times_u(&x.0[1].0[1]),
                y: times_u(&y.0[0].0[1]),
            },
        }
    }

    fn frobenius_point(&self, point: &EcPoint<Fp12>) -> EcPoint<Fp12> {
        match point {
            EcPoint::Infinity => EcPoint::Infinity,
            EcPoint::Affine { x, y } => EcPoint::Affine {
                x: self.gt().frobenius(x, 1),
                y: self.gt().frobenius(y, 1),
            },
        }
    }

    /// The line through `u` and `v` (tangent when equal) evaluated at `s`:
    /// `λ·(x_s - x_v) - (y_s - y_v)`, or `x_s - x_v` for a vertical line. Any
    /// point at infinity gives `1`.
    pub fn line_function(
        &self,
        u: &EcPoint<Fp12>,
        v: &EcPoint<Fp12>,
        s: &EcPoint<Fp12>,
    ) -> Result<Fp12, PairingError> {
        let gt = self.gt();
        let (
            EcPoint::Affine { x: xu, y: yu },
            EcPoint::Affine { x: xv, y: yv },
            EcPoint::Affine { x: xs, y: ys },
        ) = (u, v, s)
        else {
            return Ok(gt.one());
        };
        let lambda = if xu == xv {
            if gt.is_opposite(yu, yv) {
                return Ok(*xs - *xv);
            }
            if yu != yv {
                tracing::debug!(?xu, "BnBidh::line_function");
                return Err(GroupError::InvalidPoint.into());
            }
            gt.div(&gt.smul(3, &xv.square()), &yv.double())?
        } else {
            gt.div(&(*yu - *yv), &(*xu - *xv))?
        };
        Ok(lambda * (*xs - *xv) - (*ys - *yv))
    }

    /// Miller's algorithm for the R-ate pairing, without the final exponentiation.
    pub fn miller_loop(&self, p: &EcPoint<Fp>, q: &EcPoint<Fp2>) -> Result<Fp12, PairingError> {
        let gt = self.gt();
        let p_hat = self.embed(p);
        let q_hat = self.untwist(q);
        let mut f = gt.one();
        let mut t = *q;
        let bits = self.miller_exponent.bits();
        for i in (0..bits - 1).rev() {
            let t_hat = self.untwist(&t);
            f = f.square() * self.line_function(&t_hat, &t_hat, &p_hat)?;
            t = self.twist.double(&t)?;
            if self.miller_exponent.bit_vartime(i) {
                f *= self.line_function(&self.untwist(&t), &q_hat, &p_hat)?;
                t = self.twist.add(&t, q)?;
            }
        }
        // Q1 = π(Q), Q2 = -π²(Q)
        let q1 = self.frobenius_point(&q_hat);
        let q2 = -self.frobenius_point(&q1);
        f *= self.line_function(&self.untwist(&t), &q1, &p_hat)?;
        t = self.twist.add(&t, &self.retwist(&q1))?;
        f *= self.line_function(&self.untwist(&t), &q2, &p_hat)?;
        tracing::trace!(?f, "BnBidh::miller_loop");
        Ok(f)
    }

    /// `f^((p¹² - 1)/n)`: the easy part `(p⁶ - 1)(p² + 1)` by Frobenius, then the hard
    /// part `(p⁴ - p² + 1)/n` through the BN addition chain in `t`.
    pub fn final_exponentiation(&self, f: &Fp12) -> Result<Fp12, PairingError> {
        let gt = self.gt();
        let frob = |x: &Fp12, k: usize| gt.frobenius(x, k);

        let f = gt.div(&frob(f, 6), f)?;
        let f = frob(&f, 2) * f;

        let f_t = gt.pow(&f, &self.t);
        let f_t2 = gt.pow(&f_t, &self.t);
        let f_t3 = gt.pow(&f_t2, &self.t);
        let (f_p, f_p2, f_p3) = (frob(&f, 1), frob(&f, 2), frob(&f, 3));
        let (f_t_p, f_t2_p, f_t3_p) = (frob(&f_t, 1), frob(&f_t2, 1), frob(&f_t3, 1));
        let f_t2_p2 = frob(&f_t2, 2);

        let y0 = f_p * f_p2 * f_p3;
        let y1 = f.square();
        let y2 = gt.pow_u64(&f_t2_p2, 6);
        let y3 = gt.pow_u64(&f_t_p, 12);
        let y4 = gt.pow_u64(&(f_t2_p * f_t), 18);
        let y5 = gt.pow_u64(&f_t2, 30);
        let y6 = gt.pow_u64(&(f_t3 * f_t3_p), 36);
        Ok(gt.div(&(y2 * y0), &(y6 * y5 * y4 * y3 * y1))?)
    }

    /// `e(P, Q)` for `P ∈ E(Fp)` and `Q ∈ E'(Fp2)`. Either argument at infinity gives
    /// `1`; arguments off their curves are rejected.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn pairing(&self, p: &EcPoint<Fp>, q: &EcPoint<Fp2>) -> Result<Fp12, PairingError> {
        if !self.curve.is_valid(p) || !self.twist.is_valid(q) {
            return Err(GroupError::NotOnCurve.into());
        }
        if p.is_infinity() || q.is_infinity() {
            return Ok(self.gt().one());
        }
        let f = self.miller_loop(p, q)?;
        self.final_exponentiation(&f)
    }

    /// The pairing value as twelve integers, highest tower coefficient first.
    pub fn gt_to_high_first(&self, x: &Fp12) -> [U256; 12] {
        self.gt().to_high_first(x)
    }
}

/// These tests run full pairings. The small parameter set (`t = 82`, a 31-bit prime)
/// keeps most of them fast; the SM9 known-answer tests take a few seconds in debug.
#[cfg(test)]
mod tests {
    use super::*;
    use crate::groups::reference::*;

    fn small_bn() -> BnBidh {
        let u = U256::from_u64;
        BnBidh::new(
            &u(82),
            &u(11),
            &[U256::ONE, U256::ZERO],
            &[u(1), u(647751750)],
            &[[u(1252236198), u(1086703920)], [u(1078013539), u(1374552020)]],
        )
        .expect("small BN parameters are valid")
    }
    fn sm9_engine() -> BnBidh {
        BnBidh::sm9().expect("SM9 parameters are valid")
    }

    mod construction_tests {
        use super::*;

        #[test]
        fn test_derived_parameters() {
            let bn = small_bn();
            assert_eq!(*bn.p(), U256::from_u64(1647649453));
            assert_eq!(*bn.n(), U256::from_u64(1647609109));
            assert_eq!(bn.miller_exponent, U256::from_u64(494));
            let sm9 = sm9_engine();
            assert_eq!(*sm9.p(), convert_to_u256(crate::params::sm9::P));
            assert_eq!(*sm9.n(), convert_to_u256(crate::params::sm9::N));
            assert_eq!(sm9.miller_exponent, convert_to_u256("2400000000215D93E"));
        }
        #[test]
        fn test_unsupported_twist() {
            let u = U256::from_u64;
            for beta in [[U256::ZERO, U256::ONE], [u(2), U256::ZERO], [U256::ONE, U256::ONE]] {
                assert_eq!(
                    BnBidh::new(&u(82), &u(11), &beta, &[u(1), u(2)], &[[u(1), u(2)], [u(3), u(4)]])
                        .err(),
                    Some(PairingError::UnsupportedTwist),
                    "Twist {:?} accepted",
                    beta
                );
            }
        }
        #[test]
        fn test_rejects_bad_generators() {
            let u = U256::from_u64;
            let g2 = [[u(1252236198), u(1086703920)], [u(1078013539), u(1374552020)]];
            let beta = [U256::ONE, U256::ZERO];
            assert_eq!(
                BnBidh::new(&u(82), &u(11), &beta, &[u(1), u(647751751)], &g2).err(),
                Some(PairingError::Group(GroupError::NotOnCurve))
            );
            assert_eq!(
                BnBidh::new(&U256::MAX, &u(11), &beta, &[u(1), u(647751750)], &g2).err(),
                Some(PairingError::SeedTooLarge)
            );
        }
    }

    mod twist_tests {
        use super::*;

        #[test]
        fn test_untwist_lands_on_curve() {
            let bn = sm9_engine();
            for q in &G2_REFERENCE_DATA.a {
                let image = bn.untwist(q);
                assert!(bn.untwisted.is_valid(&image), "Untwisted point is off E(Fp12)");
                assert_eq!(bn.retwist(&image), *q, "retwist is not a left inverse");
                // Frobenius keeps the slots the retwist reads from
                let conj = bn.frobenius_point(&image);
                assert!(bn.untwisted.is_valid(&conj));
                assert!(bn.twist.is_valid(&bn.retwist(&conj)));
            }
            assert_eq!(bn.untwist(&EcPoint::Infinity), EcPoint::Infinity);
        }
        #[test]
        fn test_untwist_is_a_homomorphism() {
            let bn = small_bn();
            let q = *bn.g2();
            let q2 = bn.twist().double(&q).expect("dbl");
            let q3 = bn.twist().add(&q2, &q).expect("add");
            let lhs = bn.untwist(&q3);
            let rhs = bn
                .untwisted
                .add(&bn.untwist(&q2), &bn.untwist(&q))
                .expect("add");
            assert_eq!(lhs, rhs, "Untwisting does not respect addition");
        }
    }

    mod line_tests {
        use super::*;

        #[test]
        fn test_line_vanishes_on_its_points() {
            let bn = small_bn();
            let q = bn.untwist(bn.g2());
            let r = bn.untwist(&bn.twist().double(bn.g2()).expect("dbl"));
            let gt = bn.gt();
            assert!(bn.line_function(&q, &r, &q).expect("chord").is_zero());
            assert!(bn.line_function(&q, &r, &r).expect("chord").is_zero());
            assert!(bn.line_function(&q, &q, &q).expect("tangent").is_zero());
            assert_eq!(bn.line_function(&EcPoint::Infinity, &q, &r), Ok(gt.one()));
        }
        #[test]
        fn test_vertical_and_invalid_lines() {
            let bn = small_bn();
            let q = bn.untwist(bn.g2());
            let s = bn.embed(bn.g1());
            let (EcPoint::Affine { x: xq, .. }, EcPoint::Affine { x: xs, y: ys }) = (q, s) else {
                panic!("affine points expected");
            };
            assert_eq!(bn.line_function(&q, &-q, &s), Ok(xs - xq), "Vertical line failed");
            let bogus = EcPoint::Affine { x: xq, y: ys };
            assert_eq!(
                bn.line_function(&q, &bogus, &s),
                Err(PairingError::Group(GroupError::InvalidPoint))
            );
        }
    }

    mod small_curve_tests {
        use super::*;

        const EXPECTED: [u64; 12] = [
            198761264, 1276549556, 181977715, 110443094, 735321326, 730126975, 300000017,
            979682444, 578090175, 1215845197, 472021470, 624806230,
        ];

        #[test]
        fn test_known_value() {
            let bn = small_bn();
            let e = bn.pairing(bn.g1(), bn.g2()).expect("pairing");
            assert_eq!(bn.gt_to_high_first(&e), EXPECTED.map(U256::from_u64));
        }
        #[test]
        fn test_non_degeneracy_and_order() {
            let bn = small_bn();
            let gt = bn.gt();
            let e = bn.pairing(bn.g1(), bn.g2()).expect("pairing");
            assert_ne!(e, gt.one(), "Pairing is degenerate");
            assert_eq!(gt.pow(&e, bn.n()), gt.one(), "Pairing value has the wrong order");
        }
        #[test]
        fn test_bilinearity() {
            let bn = small_bn();
            let gt = bn.gt();
            let e = bn.pairing(bn.g1(), bn.g2()).expect("pairing");
            let n_minus_one = bn.n().wrapping_sub(&U256::ONE);
            for (a, b) in [(U256::from_u64(3), U256::from_u64(7)), (U256::from_u64(5), U256::from_u64(11)), (n_minus_one, U256::from_u64(2))] {
                let p = bn.curve().scalar_multiply(&a, bn.g1()).expect("mul");
                let q = bn.twist().scalar_multiply(&b, bn.g2()).expect("mul");
                let lhs = bn.pairing(&p, &q).expect("pairing");
                let rhs = gt.pow(&gt.pow(&e, &a), &b);
                assert_eq!(lhs, rhs, "e(aP, bQ) != e(P, Q)^(ab)");
            }
        }
        #[test]
        fn test_infinity() {
            let bn = small_bn();
            let one = bn.gt().one();
            assert_eq!(bn.pairing(&EcPoint::Infinity, bn.g2()), Ok(one));
            assert_eq!(bn.pairing(bn.g1(), &EcPoint::Infinity), Ok(one));
        }
        #[test]
        fn test_off_curve_argument() {
            let bn = small_bn();
            let fp = bn.curve().field();
            let p = EcPoint::Affine { x: fp.one(), y: fp.one() };
            assert_eq!(
                bn.pairing(&p, bn.g2()),
                Err(PairingError::Group(GroupError::NotOnCurve))
            );
        }
    }

    mod sm9_tests {
        use super::*;

        fn reference_gt(bn: &BnBidh, values: &[String]) -> Fp12 {
            let ints: Vec<U256> = values.iter().map(|s| convert_to_u256(s)).collect();
            let ints: [U256; 12] = ints.try_into().expect("twelve coefficients");
            bn.gt().from_high_first(&ints).expect("canonical coefficients")
        }

        #[test]
        fn test_generator_pairing() {
            let bn = sm9_engine();
            let expected = reference_gt(&bn, &REFERENCE_DATA.pairing.generators);
            assert_eq!(bn.pairing(bn.g1(), bn.g2()), Ok(expected), "e(P1, P2) mismatch");
        }
        #[test]
        fn test_master_public_key_pairing() {
            let bn = sm9_engine();
            let data = &REFERENCE_DATA.pairing;
            let ks = convert_to_u256(&data.master_secret);
            let ppub = bn.twist().scalar_multiply(&ks, bn.g2()).expect("mul");
            assert_eq!(ppub, convert_to_g2(bn.twist(), &data.master_public), "Ppub mismatch");
            let expected = reference_gt(&bn, &data.master_pairing);
            let g = bn.pairing(bn.g1(), &ppub).expect("pairing");
            assert_eq!(g, expected, "e(P1, Ppub) mismatch");
            // the published value, first and last coefficients
            let coefficients = bn.gt_to_high_first(&g);
            assert_eq!(
                coefficients[0],
                convert_to_u256("4E378FB5561CD0668F906B731AC58FEE25738EDF09CADC7A29C0ABC0177AEA6D")
            );
            assert_eq!(
                coefficients[11],
                convert_to_u256("AAB9F06A4EEBA4323A7833DB202E4E35639D93FA3305AF73F0F071D7D284FCFB")
            );
        }
        #[test]
        fn test_bilinearity() {
            let bn = sm9_engine();
            let gt = bn.gt();
            let two = U256::from_u64(2);
            let p2 = bn.curve().scalar_multiply(&two, bn.g1()).expect("mul");
            let q2 = bn.twist().scalar_multiply(&two, bn.g2()).expect("mul");
            let e = bn.pairing(bn.g1(), bn.g2()).expect("pairing");
            let lhs = bn.pairing(&p2, bn.g2()).expect("pairing");
            let rhs = bn.pairing(bn.g1(), &q2).expect("pairing");
            assert_eq!(lhs, rhs, "e(2P, Q) != e(P, 2Q)");
            assert_eq!(lhs, e.square(), "e(2P, Q) != e(P, Q)²");
            assert_ne!(e, gt.one(), "Pairing is degenerate");
        }
    }
}
