//! SM2 Elliptic Curve Primitives
//!
//! The recommended 256-bit curve of GB/T 32918.5:
//! y² = x³ + ax + b over 𝔽ₚ with a = p − 3, prime order n and cofactor 1.
//!
//! Implements:
//! - 𝔽ₚ and ℤₙ arithmetic through Montgomery multiplication,
//! - the affine group law (add, double, negate) with explicit identity handling,
//! - Montgomery-ladder scalar multiplication in Jacobian coordinates,
//! - compressed and uncompressed SEC1-style encodings,
//! - key generation.

mod constants;
mod field;
mod point;
mod scalar;

pub use constants::{
    SM2_FIELD_ELEMENT_SIZE, SM2_POINT_COMPRESSED_SIZE, SM2_POINT_UNCOMPRESSED_SIZE,
    SM2_SCALAR_SIZE,
};
pub use field::FieldElement;
pub use point::{Point, PointFormat};
pub use scalar::Scalar;

use crate::error::{Error, Result};
use constants::ORDER;
use gmcrypt_common::{mod_reduce, U256};
use gmcrypt_params::traditional::sm2::SM2_CURVE;
use rand::{CryptoRng, RngCore};
use subtle::Choice;
use zeroize::Zeroize;

/// Get the standard base point G of the SM2 curve
pub fn base_point_g() -> Point {
    Point {
        is_identity: Choice::from(0),
        x: FieldElement(U256::from_be_bytes(&SM2_CURVE.g_x)),
        y: FieldElement(U256::from_be_bytes(&SM2_CURVE.g_y)),
    }
}

/// Scalar multiplication with the base point: scalar · G
pub fn scalar_mult_base_g(scalar: &Scalar) -> Point {
    base_point_g().mul(scalar)
}

/// General scalar multiplication: scalar · P
pub fn scalar_mult(scalar: &Scalar, point: &Point) -> Point {
    if point.is_identity() {
        Point::identity()
    } else {
        point.mul(scalar)
    }
}

/// Generate a key pair `(d, d·G)`
///
/// `d = (t mod (n − 2)) + 1` for a random 256-bit `t`, which places `d` in
/// `[1, n − 2]`. Excluding `n − 1` keeps `1 + d` invertible for signing.
pub fn generate_keypair<R: CryptoRng + RngCore>(rng: &mut R) -> Result<(Scalar, Point)> {
    let mut t_bytes = [0u8; SM2_SCALAR_SIZE];
    rng.try_fill_bytes(&mut t_bytes).map_err(|_| Error::Processing {
        operation: "SM2 key generation",
        details: "random source failed",
    })?;
    let mut t = U256::from_be_bytes(&t_bytes);
    t_bytes.zeroize();

    let n_minus_2 = ORDER.modulus().wrapping_sub(&U256::from_u64(2));
    let mut reduced = mod_reduce(&t, &n_minus_2).ok_or(Error::Processing {
        operation: "SM2 key generation",
        details: "zero modulus",
    })?;
    t.zeroize();

    // reduced < n − 2, so adding one cannot wrap
    let (d, _) = reduced.overflowing_add(&U256::ONE);
    reduced.zeroize();

    let private = Scalar::from_u256_unchecked(d);
    let public = scalar_mult_base_g(&private);
    Ok((private, public))
}

/// Derive the public point `d·G` for a private scalar
pub fn public_key_from_private(private: &Scalar) -> Result<Point> {
    if private.is_zero() {
        return Err(Error::param("SM2 private key", "scalar is zero"));
    }
    Ok(scalar_mult_base_g(private))
}
