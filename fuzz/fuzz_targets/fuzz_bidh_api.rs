#![no_main]
use bidh::{BnBidh, EcPoint, Ecdlp, Field, FieldElement, SquareRoot};
use crypto_bigint::U256;
use libfuzzer_sys::fuzz_target;

fn scalar(bytes: &[u8]) -> U256 {
    let mut buf = [0u8; 32];
    buf.copy_from_slice(&bytes[..32]);
    U256::from_be_slice(&buf)
}

fuzz_target!(|data: &[u8]| {
    if data.len() < 64 {
        return;
    }
    let sm2 = Ecdlp::sm2().expect("SM2 parameters");
    let field = sm2.field();

    // decoding accepts exactly the canonical encodings
    if let Ok(x) = sm2.bytes_to_field(&data[..32]) {
        assert_eq!(sm2.field_to_bytes(&x), data[..32].to_vec(), "Encoding is not canonical");
        if let Some(root) = Option::from(field.sqrt(&x)) {
            let root: bidh::Fp = root;
            assert_eq!(root.square(), x, "Square root failed");
        }
        if let Some(point) = sm2.curve().lift_x(&x) {
            assert!(sm2.curve().is_valid(&point), "Lifted point is off the curve");
        }
    }

    // (a + b)·G = a·G + b·G
    let (a, b) = (scalar(&data[..32]), scalar(&data[32..64]));
    let ag = sm2.scalar_mul_base(&a).expect("a·G");
    let bg = sm2.scalar_mul_base(&b).expect("b·G");
    let sum = a.wrapping_add(&b);
    if sum >= a {
        let sum_g = sm2.scalar_mul_base(&sum).expect("(a + b)·G");
        assert_eq!(sm2.curve().add(&ag, &bg), Ok(sum_g), "Scalar multiplication is not linear");
    }

    // e(a·P1, P2) = e(P1, a·P2), on a short scalar to keep iterations fast
    if data.len() >= 72 {
        let bn = BnBidh::sm9().expect("SM9 parameters");
        let k = U256::from_be_slice(&{
            let mut buf = [0u8; 32];
            buf[24..].copy_from_slice(&data[64..72]);
            buf
        });
        let p = bn.curve().scalar_multiply(&k, bn.g1()).expect("k·P1");
        let q = bn.twist().scalar_multiply(&k, bn.g2()).expect("k·P2");
        let lhs = bn.pairing(&p, bn.g2()).expect("pairing");
        let rhs = bn.pairing(bn.g1(), &q).expect("pairing");
        assert_eq!(lhs, rhs, "Pairing is not bilinear");
        if matches!(p, EcPoint::Infinity) {
            assert!(bn.gt().is_one(&lhs));
        }
    }
});
