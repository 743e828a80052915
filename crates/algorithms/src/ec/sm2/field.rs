//! SM2 base-field arithmetic
//!
//! Elements of 𝔽ₚ with p = 2²⁵⁶ − 2²²⁴ − 2⁹⁶ + 2⁶⁴ − 1, kept in canonical
//! form and multiplied through the shared Montgomery context.

use crate::ec::sm2::constants::{FIELD, SM2_FIELD_ELEMENT_SIZE, SQRT_EXP};
use crate::error::{Error, Result};
use gmcrypt_common::U256;
use gmcrypt_params::traditional::sm2::SM2_CURVE;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
use zeroize::Zeroize;

/// SM2 field element, always reduced below p
#[derive(Clone, Copy, Debug, PartialEq, Eq, Zeroize)]
pub struct FieldElement(pub(crate) U256);

impl FieldElement {
    /// The additive identity: 0
    #[inline]
    pub fn zero() -> Self {
        FieldElement(U256::ZERO)
    }

    /// The multiplicative identity: 1
    #[inline]
    pub fn one() -> Self {
        FieldElement(U256::ONE)
    }

    /// Build a field element from a small literal
    #[inline]
    pub fn from_u64(n: u64) -> Self {
        FieldElement(U256::from_u64(n))
    }

    /// Curve coefficient a = p − 3
    pub fn a() -> Self {
        FieldElement(U256::from_be_bytes(&SM2_CURVE.a))
    }

    /// Curve coefficient b
    pub fn b() -> Self {
        FieldElement(U256::from_be_bytes(&SM2_CURVE.b))
    }

    /// Create a field element from big‐endian bytes, rejecting values ≥ p
    pub fn from_bytes(bytes: &[u8; SM2_FIELD_ELEMENT_SIZE]) -> Result<Self> {
        let v = U256::from_be_bytes(bytes);
        if v >= *FIELD.modulus() {
            return Err(Error::param("SM2 FieldElement", "value not below field prime"));
        }
        Ok(FieldElement(v))
    }

    /// Big‐endian encoding
    pub fn to_bytes(&self) -> [u8; SM2_FIELD_ELEMENT_SIZE] {
        self.0.to_be_bytes()
    }

    /// Underlying integer
    pub fn to_u256(&self) -> U256 {
        self.0
    }

    /// Is this element zero?
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Parity of the canonical representative
    pub fn is_odd(&self) -> bool {
        self.0.is_odd()
    }

    /// a + b mod p
    pub fn add(&self, other: &Self) -> Self {
        FieldElement(FIELD.add(&self.0, &other.0))
    }

    /// a − b mod p
    pub fn sub(&self, other: &Self) -> Self {
        FieldElement(FIELD.sub(&self.0, &other.0))
    }

    /// a · b mod p
    pub fn mul(&self, other: &Self) -> Self {
        FieldElement(FIELD.mul(&self.0, &other.0))
    }

    /// a² mod p
    pub fn square(&self) -> Self {
        FieldElement(FIELD.square(&self.0))
    }

    /// −a mod p
    pub fn negate(&self) -> Self {
        FieldElement(FIELD.neg(&self.0))
    }

    /// 2a mod p
    pub fn double(&self) -> Self {
        self.add(self)
    }

    /// a^e mod p
    pub fn pow(&self, exp: &U256) -> Self {
        FieldElement(FIELD.pow(&self.0, exp))
    }

    /// Multiplicative inverse
    pub fn invert(&self) -> Result<Self> {
        FIELD
            .invert(&self.0)
            .map(FieldElement)
            .ok_or(Error::param("SM2 FieldElement", "inverse of zero"))
    }

    /// Square root, if one exists
    ///
    /// Since p ≡ 3 (mod 4) the candidate is a^((p+1)/4); it is checked by
    /// squaring.
    pub fn sqrt(&self) -> Option<Self> {
        if self.is_zero() {
            return Some(FieldElement::zero());
        }
        let root = self.pow(&SQRT_EXP);
        if root.square() == *self {
            Some(root)
        } else {
            None
        }
    }
}

impl ConditionallySelectable for FieldElement {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        FieldElement(U256::conditional_select(&a.0, &b.0, choice))
    }
}

impl ConstantTimeEq for FieldElement {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.ct_eq(&other.0)
    }
}
