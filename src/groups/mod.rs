pub mod curve;

pub use curve::{EcPoint, EllipticCurve, GroupError};
