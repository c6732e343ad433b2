//! Integer plumbing shared by the field constructors: hex parsing, widening
//! and narrowing between `U256` and `U512`, and division by small constants.

use crate::fields::FieldError;
use crypto_bigint::{Encoding, NonZero, Uint, U256, U512};
use subtle::CtOption;

/// Copies `smaller_bytes` into the least significant end of a zeroed, wider buffer.
pub(crate) fn to_larger_uint<const N: usize, const M: usize>(smaller_bytes: &[u8; N]) -> [u8; M] {
    let mut larger_bytes = [0u8; M];
    larger_bytes[M - N..].copy_from_slice(smaller_bytes);
    larger_bytes
}

pub(crate) fn u256_to_u512(u256: &U256) -> U512 {
    U512::from_be_bytes(to_larger_uint::<32, 64>(&u256.to_be_bytes()))
}

/// Narrows a `U512` that is known to fit in 256 bits, `None` otherwise.
pub(crate) fn u512_to_u256(u512: &U512) -> Option<U256> {
    let bytes = u512.to_be_bytes();
    if bytes[..32].iter().any(|b| *b != 0) {
        return None;
    }
    Some(U256::from_be_slice(&bytes[32..]))
}

/// Quotient and remainder of `value` by a small non-zero divisor.
pub(crate) fn div_rem_u64<const L: usize>(value: &Uint<L>, divisor: u64) -> Option<(Uint<L>, Uint<L>)> {
    let divisor: Option<NonZero<Uint<L>>> =
        CtOption::from(NonZero::new(Uint::<L>::from_u64(divisor))).into();
    divisor.map(|d| value.div_rem(&d))
}

/// Parses a big-endian hex string of at most 64 digits, with an optional `0x` prefix.
pub fn parse_hex_u256(value: &str) -> Result<U256, FieldError> {
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value);
    if digits.is_empty() || digits.len() > 64 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(FieldError::InvalidLiteral);
    }
    let padded = format!("{:0>64}", digits);
    Ok(U256::from_be_hex(&padded))
}
