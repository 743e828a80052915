//! Scheme traits

pub mod pke;
pub mod signature;

pub use pke::Pke;
pub use signature::{IdentitySignature, Signature};
