//! Common implementations shared across the gmcrypt crates
//!
//! Currently this is the fixed-width big-integer layer: a 256-bit unsigned
//! integer and Montgomery arithmetic modulo an odd 256-bit modulus. Both the
//! SM2 base field and the SM2 group order are handled by the same code.

#![forbid(unsafe_code)]

pub mod math_common;

pub use math_common::{mod_inverse, mod_mul, mod_pow, mod_reduce, Modulus, U256};
