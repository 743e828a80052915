//! Hash function implementations
//!
//! Only SM3 is provided. The [`HashFunction`] trait is what the KDF and the
//! SM2 schemes are written against.

use crate::error::Result;

pub mod sm3;

pub use sm3::Sm3;

/// Compile-time description of a hash algorithm
pub trait HashAlgorithm {
    /// Output size in bytes
    const OUTPUT_SIZE: usize;
    /// Block size in bytes
    const BLOCK_SIZE: usize;
    /// Algorithm identifier
    const ALGORITHM_ID: &'static str;
}

/// Streaming hash function
pub trait HashFunction: Sized + Clone {
    /// Marker type carrying the algorithm constants
    type Algorithm: HashAlgorithm;

    /// Digest type
    type Output: AsRef<[u8]> + Clone;

    /// Fresh hash state
    fn new() -> Self;

    /// Absorb more input
    fn update(&mut self, data: &[u8]) -> Result<&mut Self>;

    /// Pad, process the final block(s) and return the digest
    ///
    /// The state is wiped afterwards; call [`HashFunction::new`] to reuse it.
    fn finalize(&mut self) -> Result<Self::Output>;

    /// Output size in bytes
    fn output_size() -> usize {
        Self::Algorithm::OUTPUT_SIZE
    }

    /// Block size in bytes
    fn block_size() -> usize {
        Self::Algorithm::BLOCK_SIZE
    }

    /// Algorithm name
    fn name() -> String {
        Self::Algorithm::ALGORITHM_ID.to_string()
    }

    /// One-shot hash of `data`
    fn digest(data: &[u8]) -> Result<Self::Output> {
        let mut h = Self::new();
        h.update(data)?;
        h.finalize()
    }
}
