//! SM2 scalar arithmetic operations

use crate::ec::sm2::constants::{ORDER, SM2_SCALAR_SIZE};
use crate::ec::sm2::field::FieldElement;
use crate::error::{validate, Error, Result};
use gmcrypt_common::U256;
use gmcrypt_params::traditional::sm2::SM2_MAX_RETRIES;
use rand::{CryptoRng, RngCore};
use subtle::{Choice, ConstantTimeEq};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// SM2 scalar: integers mod n, where
/// n = FFFFFFFE FFFFFFFF FFFFFFFF FFFFFFFF 7203DF6B 21C6052B 53BBF409 39D54123.
///
/// Values are kept reduced below n and wiped on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Scalar(U256);

impl core::fmt::Debug for Scalar {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("Scalar(..)")
    }
}

impl Scalar {
    /// Create a scalar from raw bytes with reduction mod n.
    /// Errors if the result is zero.
    pub fn new(data: [u8; SM2_SCALAR_SIZE]) -> Result<Self> {
        let s = Self::from_bytes_reduced(&data);
        if s.is_zero() {
            return Err(Error::param("SM2 Scalar", "scalar reduces to zero"));
        }
        Ok(s)
    }

    /// Reduce an arbitrary 256-bit big-endian integer mod n (zero allowed)
    pub fn from_bytes_reduced(bytes: &[u8; SM2_SCALAR_SIZE]) -> Self {
        Scalar(ORDER.reduce(&U256::from_be_bytes(bytes)))
    }

    /// Parse a big-endian integer that must already be in [0, n)
    pub fn from_canonical_bytes(bytes: &[u8; SM2_SCALAR_SIZE]) -> Result<Self> {
        let v = U256::from_be_bytes(bytes);
        if v >= *ORDER.modulus() {
            return Err(Error::param("SM2 Scalar", "value not below group order"));
        }
        Ok(Scalar(v))
    }

    /// Deserialize a private scalar: exactly 32 bytes, in [1, n−1]
    pub fn deserialize(bytes: &[u8]) -> Result<Self> {
        validate::length("SM2 Scalar", bytes.len(), SM2_SCALAR_SIZE)?;
        let mut tmp = [0u8; SM2_SCALAR_SIZE];
        tmp.copy_from_slice(bytes);
        let s = Self::from_canonical_bytes(&tmp);
        tmp.zeroize();
        let s = s?;
        if s.is_zero() {
            return Err(Error::param("SM2 Scalar", "scalar is zero"));
        }
        Ok(s)
    }

    /// Serialize to big‐endian bytes
    pub fn serialize(&self) -> [u8; SM2_SCALAR_SIZE] {
        self.0.to_be_bytes()
    }

    /// Build from an integer already known to be below n
    pub(crate) fn from_u256_unchecked(v: U256) -> Self {
        Scalar(v)
    }

    /// Underlying integer
    pub(crate) fn as_u256(&self) -> &U256 {
        &self.0
    }

    /// Reduce a field element (e.g. a point coordinate) mod n
    pub fn from_field(fe: &FieldElement) -> Self {
        Scalar(ORDER.reduce(&fe.to_u256()))
    }

    /// The scalar 0
    pub fn zero() -> Self {
        Scalar(U256::ZERO)
    }

    /// The scalar 1
    pub fn one() -> Self {
        Scalar(U256::ONE)
    }

    /// The scalar n − 1
    pub fn max() -> Self {
        Scalar(ORDER.modulus().wrapping_sub(&U256::ONE))
    }

    /// Is this scalar zero?
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Add two scalars mod n
    pub fn add_mod_n(&self, other: &Self) -> Self {
        Scalar(ORDER.add(&self.0, &other.0))
    }

    /// Subtract two scalars mod n
    pub fn sub_mod_n(&self, other: &Self) -> Self {
        Scalar(ORDER.sub(&self.0, &other.0))
    }

    /// Multiply two scalars mod n
    pub fn mul_mod_n(&self, other: &Self) -> Self {
        Scalar(ORDER.mul(&self.0, &other.0))
    }

    /// Inverse mod n via Fermat (n − 2)
    pub fn inv_mod_n(&self) -> Result<Self> {
        ORDER
            .invert(&self.0)
            .map(Scalar)
            .ok_or(Error::param("SM2 Scalar", "inverse of zero"))
    }

    /// Negate mod n
    pub fn negate(&self) -> Self {
        Scalar(ORDER.neg(&self.0))
    }

    /// Uniformly random scalar in [1, n−1] by rejection sampling
    pub fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Result<Self> {
        let mut bytes = [0u8; SM2_SCALAR_SIZE];
        for _ in 0..SM2_MAX_RETRIES {
            rng.try_fill_bytes(&mut bytes)
                .map_err(|_| Error::Processing {
                    operation: "SM2 Scalar::random",
                    details: "random source failed",
                })?;
            let v = U256::from_be_bytes(&bytes);
            if !v.is_zero() && v < *ORDER.modulus() {
                bytes.zeroize();
                return Ok(Scalar(v));
            }
        }
        bytes.zeroize();
        Err(Error::Processing {
            operation: "SM2 Scalar::random",
            details: "rejection sampling exhausted",
        })
    }
}

impl ConstantTimeEq for Scalar {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for Scalar {}
