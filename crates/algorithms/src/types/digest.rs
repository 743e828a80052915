//! Fixed-size hash output
//!
//! `Digest<N>` is what every [`HashFunction`](crate::hash::HashFunction)
//! returns. Equality is constant-time, so a digest can be compared against an
//! attacker-supplied tag directly.

use core::fmt;
use core::ops::Deref;
use zeroize::Zeroize;

use crate::error::{validate, Result};

/// A cryptographic digest of exactly `N` bytes
#[derive(Clone, Copy, Zeroize)]
pub struct Digest<const N: usize> {
    data: [u8; N],
}

impl<const N: usize> Digest<N> {
    /// Wrap an existing array
    pub fn new(data: [u8; N]) -> Self {
        Self { data }
    }

    /// Copy from a slice of exactly `N` bytes
    pub fn from_slice(slice: &[u8]) -> Result<Self> {
        validate::length("Digest::from_slice", slice.len(), N)?;
        let mut data = [0u8; N];
        data.copy_from_slice(slice);
        Ok(Self { data })
    }

    /// Number of bytes in the digest
    pub const fn len(&self) -> usize {
        N
    }

    /// Always false for a non-zero `N`
    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// The digest bytes as an array
    pub fn to_bytes(&self) -> [u8; N] {
        self.data
    }

    /// Lower-case hexadecimal encoding
    pub fn to_hex(&self) -> String {
        hex::encode(self.data)
    }
}

impl<const N: usize> AsRef<[u8]> for Digest<N> {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl<const N: usize> Deref for Digest<N> {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl<const N: usize> PartialEq for Digest<N> {
    fn eq(&self, other: &Self) -> bool {
        gmcrypt_internal::constant_time::ct_eq(self.data, other.data)
    }
}

impl<const N: usize> Eq for Digest<N> {}

impl<const N: usize> fmt::Debug for Digest<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest<{}>({})", N, self.to_hex())
    }
}

impl<const N: usize> fmt::Display for Digest<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
