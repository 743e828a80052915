//! Key Derivation Functions
//!
//! The only KDF needed by SM2 is the counter-mode construction of
//! GB/T 32918.4 §5.4.3, exposed generically over the hash in [`counter`].
//!
//! ## Example usage
//!
//! ```
//! use gmcrypt_algorithms::kdf::{KeyDerivationFunction, KdfOperation, Sm3Kdf};
//!
//! let kdf = Sm3Kdf::new();
//! let key1 = kdf.derive_key(b"shared secret", 48).unwrap();
//!
//! let key2 = kdf
//!     .builder()
//!     .with_input(b"shared secret")
//!     .with_output_length(48)
//!     .derive()
//!     .unwrap();
//!
//! assert_eq!(&*key1, &*key2);
//! ```

use zeroize::Zeroizing;

use crate::error::Result;

pub mod counter;

pub use counter::{sm3_kdf, CounterKdf, Sm3Kdf};

/// Marker trait for KDF algorithms
pub trait KdfAlgorithm {
    /// Static algorithm identifier
    const ALGORITHM_ID: &'static str;

    /// Returns the KDF algorithm name
    fn name() -> String {
        Self::ALGORITHM_ID.to_string()
    }
}

/// Builder-style operation for a single derivation
pub trait KdfOperation<'a>: Sized {
    /// Set the input keying material
    fn with_input(self, input: &'a [u8]) -> Self;

    /// Set the desired output length in bytes
    fn with_output_length(self, length: usize) -> Self;

    /// Run the derivation
    fn derive(self) -> Result<Zeroizing<Vec<u8>>>;
}

/// Common interface for key derivation functions
pub trait KeyDerivationFunction {
    /// The algorithm this KDF implements
    type Algorithm: KdfAlgorithm;

    /// Creates a new instance of the KDF
    fn new() -> Self;

    /// Derives `length` bytes from `input`
    ///
    /// A zero `length` yields an empty output.
    fn derive_key(&self, input: &[u8], length: usize) -> Result<Zeroizing<Vec<u8>>>;

    /// Creates a builder for fluent API usage
    fn builder(&self) -> impl KdfOperation<'_>
    where
        Self: Sized;
}
