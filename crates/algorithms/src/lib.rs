//! Cryptographic primitives underlying the SM2 schemes
//!
//! - [`hash::Sm3`]: the SM3 hash function (GB/T 32905)
//! - [`kdf::Sm3Kdf`]: the SM3 counter-mode key derivation function
//! - [`ec::sm2`]: field, scalar and point arithmetic on the SM2 curve
//!
//! Secret-dependent paths (scalar multiplication, comparisons of tags and
//! secret scalars) are constant-time; secret values are zeroized on drop.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

// Error module and re-exports
pub mod error;
pub use error::{validate, Error, Result};

// Hash function implementations
pub mod hash;
pub use hash::{HashAlgorithm, HashFunction, Sm3};

// KDF implementations
pub mod kdf;
pub use kdf::{sm3_kdf, CounterKdf, KeyDerivationFunction, Sm3Kdf};

// Elliptic curve primitives
pub mod ec;
pub use ec::{sm2, Sm2Point, Sm2Scalar};

// Type system
pub mod types;
pub use types::Digest;
