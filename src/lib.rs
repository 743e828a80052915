//! # gmcrypt
//!
//! A pure Rust implementation of the SM2 elliptic-curve public-key system
//! (digital signature and public key encryption) and the SM3 hash function.
//!
//! ## Features
//!
//! - `sign` (default): SM2 signatures via [`gmcrypt-sign`]
//! - `pke` (default): SM2 encryption via [`gmcrypt-pke`]
//! - `full`: both
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports functionality from several sub-crates:
//!
//! - [`gmcrypt-api`]: error type and scheme traits
//! - [`gmcrypt-params`]: curve and hash constants
//! - [`gmcrypt-common`]: 256-bit modular arithmetic
//! - [`gmcrypt-algorithms`]: SM3, the SM3 KDF and SM2 curve arithmetic
//! - [`gmcrypt-sign`]: SM2 signatures
//! - [`gmcrypt-pke`]: SM2 encryption
//!
//! The [`engine`] module exposes the whole system as byte-level functions:
//!
//! ```no_run
//! use gmcrypt::engine;
//!
//! let keys = engine::generate_keypair()?;
//! let sig = engine::sign(b"hello", &keys.private_key[..], None)?;
//! assert!(engine::verify(b"hello", &sig, &keys.public_key, None));
//!
//! let ct = engine::encrypt(b"secret", &keys.public_key)?;
//! assert_eq!(engine::decrypt(&ct, &keys.private_key[..])?, b"secret");
//! # Ok::<(), gmcrypt::api::Error>(())
//! ```

#![forbid(unsafe_code)]

// Core re-exports (always available)
pub use gmcrypt_algorithms as algorithms;
pub use gmcrypt_api as api;
pub use gmcrypt_common as common;
pub use gmcrypt_internal as internal;
pub use gmcrypt_params as params;

// Feature-gated re-exports
#[cfg(feature = "sign")]
pub use gmcrypt_sign as sign;

#[cfg(feature = "pke")]
pub use gmcrypt_pke as pke;

pub mod engine;

/// Common imports for gmcrypt users
pub mod prelude {
    // Re-export error types
    pub use crate::api::{Error, Result};

    // Re-export core traits
    pub use crate::algorithms::{HashFunction, KeyDerivationFunction};
    pub use crate::api::{IdentitySignature, Pke, Signature};

    // Primitives
    pub use crate::algorithms::{Sm2Point, Sm2Scalar, Sm3, Sm3Kdf};

    #[cfg(feature = "sign")]
    pub use crate::sign::{Sm2Dsa, Sm2PublicKey, Sm2SecretKey, Sm2Signature};

    #[cfg(feature = "pke")]
    pub use crate::pke::{Sm2Pke, Sm2PkePublicKey, Sm2PkeSecretKey};

    pub use crate::engine::KeyPairBytes;
}
