//! Standard parameter sets, as big-endian hex. Extension field coordinates are
//! written high coefficient first, `[c1, c0]`, matching the published tables.

/// Parses a big-endian hex literal of at most 64 digits, with an optional `0x` prefix.
/// Malformed input is `FieldError::InvalidLiteral`.
pub use crate::fields::utils::parse_hex_u256 as parse_hex;

/// The recommended 256-bit curve of GM/T 0003 (SM2), `y² = x³ + a·x + b`.
pub mod sm2 {
    pub const P: &str = "FFFFFFFEFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF00000000FFFFFFFFFFFFFFFF";
    pub const A: &str = "FFFFFFFEFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF00000000FFFFFFFFFFFFFFFC";
    pub const B: &str = "28E9FA9E9D9F5E344D5A9E4BCF6509A7F39789F515AB8F92DDBCBD414D940E93";
    pub const N: &str = "FFFFFFFEFFFFFFFFFFFFFFFFFFFFFFFF7203DF6B21C6052B53BBF40939D54123";
    pub const GX: &str = "32C4AE2C1F1981195F9904466A39C9948FE30BBFF2660BE1715A4589334C74C7";
    pub const GY: &str = "BC3736A2F4F6779C59BDCEE36B692153D0A9877CC62A474002DF32E52139F0A0";
    pub const H: u64 = 1;
}

/// The BN256 curve of GM/T 0044 (SM9), `y² = x³ + 5` with the twist `y² = x³ + 5u`.
pub mod sm9 {
    pub const T: &str = "600000000058F98A";
    pub const B: u64 = 5;
    pub const BETA: [&str; 2] = ["01", "00"];
    pub const P1_X: &str = "93DE051D62BF718FF5ED0704487D01D6E1E4086909DC3280E8C4E4817C66DDDD";
    pub const P1_Y: &str = "21FE8DDA4F21E607631065125C395BBC1C1C00CBFA6024350C464CD70A3EA616";
    pub const P2_X: [&str; 2] = [
        "85AEF3D078640C98597B6027B441A01FF1DD2C190F5E93C454806C11D8806141",
        "3722755292130B08D2AAB97FD34EC120EE265948D19C17ABF9B7213BAF82D65B",
    ];
    pub const P2_Y: [&str; 2] = [
        "17509B092E845C1266BA0D262CBEE6ED0736A96FA347C8BD856DC76B84EBEB96",
        "A7CF28D519BE3DA65F3170153D278FF247EFBA98A71A08116215BBA5C999A7C7",
    ];
    /// Derived from `T`, listed for cross-checking.
    pub const P: &str = "B640000002A3A6F1D603AB4FF58EC74521F2934B1A7AEEDBE56F9B27E351457D";
    pub const N: &str = "B640000002A3A6F1D603AB4FF58EC74449F2934B18EA8BEEE56EE19CD69ECF25";
}
