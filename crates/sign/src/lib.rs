//! Digital Signature Schemes
//!
//! This crate implements the SM2 identity-bound signature scheme
//! (GB/T 32918.2) on top of the curve arithmetic in `gmcrypt-algorithms`.

#![forbid(unsafe_code)]

pub mod error;
pub mod sm2;

pub use error::{Error, Result};
pub use sm2::{Sm2Dsa, Sm2PublicKey, Sm2SecretKey, Sm2Signature};
