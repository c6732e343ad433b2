//! # Bidh: Elliptic Curves and the BN R-ate Pairing
//!
//! Bidh implements elliptic curve arithmetic over prime fields chosen at run time and the
//! optimal R-ate bilinear pairing on Barreto–Naehrig curves `y² = x³ + b`, built on the
//! tower `Fp ⊂ Fp2 ⊂ Fp4 ⊂ Fp12`. The GM/T 0003 (SM2) curve and the GM/T 0044 (SM9)
//! BN256 pairing come ready to use; any other parameter set of up to 256 bits can be
//! supplied.
//!
//! ## Quick Start
//!
//! Add Bidh to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! bidh = "0.1.0"
//! ```
//!
//! ## Key Features
//!
//! - Prime field arithmetic with a run-time modulus, including square roots
//! - The extension tower 𝔽ₚ², 𝔽ₚ⁴, 𝔽ₚ¹² with Frobenius maps
//! - Affine curve arithmetic over every level of the tower
//! - Discrete-log parameter sets with validated base points
//! - The R-ate pairing for any BN seed `t`
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use bidh::{BnBidh, Ecdlp, Field};
//! use crypto_bigint::U256;
//!
//! let sm2 = Ecdlp::sm2().expect("SM2 parameters are valid");
//! let public = sm2.scalar_mul_base(&U256::from_u64(12345)).expect("k·G");
//!
//! let sm9 = BnBidh::sm9().expect("SM9 parameters are valid");
//! let e = sm9.pairing(sm9.g1(), sm9.g2()).expect("pairing");
//! assert!(!sm9.gt().is_one(&e));
//! # let _ = public;
//! ```
//!
//! ## Core Components
//!
//! - [`PrimeField`], [`Fp2Field`], [`Fp4Field`], [`Fp12Field`]: configured tower levels
//! - [`Fp`], [`Fp2`], [`Fp4`], [`Fp12`]: their elements
//! - [`EllipticCurve`], [`EcPoint`]: curve arithmetic
//! - [`Ecdlp`]: a curve with a base point of prime order
//! - [`BnBidh`]: the pairing engine

pub mod ecdlp;
pub mod fields;
pub mod groups;
pub mod pairing;
pub mod params;

pub use crate::ecdlp::Ecdlp;
pub use crate::fields::fp::{Fp, PrimeField};
pub use crate::fields::fp12::{Fp12, Fp12Field};
pub use crate::fields::fp2::{Fp2, Fp2Field};
pub use crate::fields::fp4::{Fp4, Fp4Field};
pub use crate::fields::{Extension, Field, FieldElement, FieldError, FieldExtension, SquareRoot};
pub use crate::groups::{EcPoint, EllipticCurve, GroupError};
pub use crate::pairing::{BnBidh, PairingError};
