//! Moduli and encoding sizes for SM2 arithmetic

use gmcrypt_common::{Modulus, U256};
use gmcrypt_params::traditional::sm2::SM2_CURVE;
use once_cell::sync::Lazy;

pub use gmcrypt_params::traditional::sm2::{
    SM2_FIELD_ELEMENT_SIZE, SM2_POINT_COMPRESSED_SIZE, SM2_POINT_UNCOMPRESSED_SIZE,
    SM2_SCALAR_SIZE,
};

/// Montgomery context for the base field 𝔽ₚ
pub(crate) static FIELD: Lazy<Modulus> = Lazy::new(|| {
    Modulus::new(U256::from_be_bytes(&SM2_CURVE.p)).expect("SM2 field prime is odd")
});

/// Montgomery context for the group order n
pub(crate) static ORDER: Lazy<Modulus> = Lazy::new(|| {
    Modulus::new(U256::from_be_bytes(&SM2_CURVE.n)).expect("SM2 group order is odd")
});

/// (p + 1) / 4, the square-root exponent (p ≡ 3 mod 4)
pub(crate) static SQRT_EXP: Lazy<U256> = Lazy::new(|| {
    let (p_plus_1, _) = FIELD.modulus().overflowing_add(&U256::ONE);
    p_plus_1.shr1().shr1()
});
