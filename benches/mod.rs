use criterion::{criterion_group, criterion_main};

use group::ecdlp::*;
use group::twist::*;

use field::fp::*;
use field::fp12::*;
use field::fp2::*;

use pairing::*;

criterion_group!(
    pairing_benches,
    test_pairing,
    test_miller_loop,
    test_final_exponentiation
);

criterion_group!(ecdlp_benches, test_sm2_addition, test_sm2_scalar_mul_base);
criterion_group!(twist_benches, test_twist_addition, test_twist_scalar_multiply);

criterion_group!(
    fp_benches,
    test_fp_multiplication,
    test_fp_addition,
    test_fp_division,
    test_fp_sqrt,
    test_fp_new
);
criterion_group!(
    fp2_benches,
    test_fp2_multiplication,
    test_fp2_division,
    test_fp2_frobenius
);
criterion_group!(
    fp12_benches,
    test_fp12_multiplication,
    test_fp12_square,
    test_fp12_division,
    test_fp12_frobenius
);

criterion_main!(
    ecdlp_benches,
    twist_benches,
    fp_benches,
    fp2_benches,
    fp12_benches,
    pairing_benches
);
