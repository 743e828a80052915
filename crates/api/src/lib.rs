//! Public API traits and error types for the gmcrypt library
//!
//! Every scheme crate converts its internal errors into [`Error`] before they
//! reach a caller, and implements the scheme traits defined here.

#![forbid(unsafe_code)]

pub mod error;
pub mod traits;

pub use error::{Error, Result, ResultExt};

pub use traits::{IdentitySignature, Pke, Signature};

pub use traits::{pke, signature};
