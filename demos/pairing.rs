//! # Pairing Example
//!
//! Loads a BN parameter set from `demos/pairing.toml` (written with the SM9 values on
//! first run), computes `e(P1, P2)` and checks bilinearity on a pair of multiples. It
//! finishes with a scalar multiplication on the SM2 curve.

use bidh::params::parse_hex;
use bidh::{BnBidh, Ecdlp, EcPoint, Field, PairingError};
use crypto_bigint::U256;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, error, info};

/// BN parameters as big-endian hex, extension field coordinates high coefficient first
#[derive(Debug, Serialize, Deserialize)]
struct PairingConfig {
    t: String,
    b: String,
    p1: [String; 2],
    p2_x: [String; 2],
    p2_y: [String; 2],
    /// Scalars used for the bilinearity check
    a: u64,
    c: u64,
}

impl Default for PairingConfig {
    fn default() -> Self {
        use bidh::params::sm9;
        let s = |v: &str| v.to_string();
        Self {
            t: s(sm9::T),
            b: format!("{:X}", sm9::B),
            p1: [s(sm9::P1_X), s(sm9::P1_Y)],
            p2_x: sm9::P2_X.map(s),
            p2_y: sm9::P2_Y.map(s),
            a: 3,
            c: 7,
        }
    }
}

fn engine(cfg: &PairingConfig) -> Result<BnBidh, PairingError> {
    let hex = |value: &String| parse_hex(value);
    BnBidh::new(
        &hex(&cfg.t)?,
        &hex(&cfg.b)?,
        &[U256::ONE, U256::ZERO],
        &[hex(&cfg.p1[0])?, hex(&cfg.p1[1])?],
        &[
            [hex(&cfg.p2_x[0])?, hex(&cfg.p2_x[1])?],
            [hex(&cfg.p2_y[0])?, hex(&cfg.p2_y[1])?],
        ],
    )
}

fn print_gt(bn: &BnBidh, label: &str, value: &bidh::Fp12) {
    info!("{label}:");
    for c in bn.gt_to_high_first(value) {
        info!("    {c}");
    }
}

fn run_pairing(cfg: &PairingConfig) -> Result<(), PairingError> {
    let bn = engine(cfg)?;
    info!("p = {}", bn.p());
    info!("n = {}", bn.n());

    let e = bn.pairing(bn.g1(), bn.g2())?;
    print_gt(&bn, "e(P1, P2)", &e);

    let (a, c) = (U256::from_u64(cfg.a), U256::from_u64(cfg.c));
    let p = bn.curve().scalar_multiply(&a, bn.g1())?;
    let q = bn.twist().scalar_multiply(&c, bn.g2())?;
    let lhs = bn.pairing(&p, &q)?;
    let rhs = bn.gt().pow_u64(&e, cfg.a * cfg.c);
    debug!("e(aP1, cP2) = {:?}", lhs);
    if lhs == rhs {
        info!("e({}·P1, {}·P2) = e(P1, P2)^{}", cfg.a, cfg.c, cfg.a * cfg.c);
    } else {
        error!("bilinearity check failed");
    }
    Ok(())
}

fn run_sm2() -> Result<(), bidh::GroupError> {
    let sm2 = Ecdlp::sm2()?;
    let k = U256::from_be_hex("3945208F7B2144B13F36E38AC6D39F95889393692860B51A42FB81EF4DF7C5B8");
    match sm2.scalar_mul_base(&k)? {
        EcPoint::Affine { x, y } => {
            info!("SM2 k·G.x = {:02X?}", sm2.field_to_bytes(&x));
            info!("SM2 k·G.y = {:02X?}", sm2.field_to_bytes(&y));
        }
        EcPoint::Infinity => error!("k·G is the point at infinity"),
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().init();

    let config_path = PathBuf::from("demos/pairing.toml");
    let cfg: PairingConfig = confy::load_path(config_path)?;
    debug!("Loaded config: {:?}", cfg);

    run_pairing(&cfg)?;
    run_sm2()?;
    Ok(())
}
