//! Public Key Encryption (PKE) schemes for the gmcrypt library.
//!
//! Provides SM2 encryption (GB/T 32918.4) with the `C1 ‖ C3 ‖ C2`
//! ciphertext layout.

#![forbid(unsafe_code)]

pub mod error;
pub mod sm2;

// Re-export key items
pub use error::{Error, Result};
pub use sm2::{Sm2Ciphertext, Sm2Pke, Sm2PkePublicKey, Sm2PkeSecretKey};
