//! Elliptic Curve Primitives
//!
//! Constant-time arithmetic on the SM2 recommended curve. The signature and
//! encryption schemes built on it live in `gmcrypt-sign` and `gmcrypt-pke`.

pub mod sm2;

pub use sm2::{Point as Sm2Point, Scalar as Sm2Scalar};
