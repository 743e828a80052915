//! SM2 digital signature (GB/T 32918.2)
//!
//! The signed digest is `e = SM3(ZA ‖ M)`, where
//! `ZA = SM3(ENTL ‖ ID ‖ a ‖ b ‖ Gx ‖ Gy ‖ Qx ‖ Qy)` binds the signer identity
//! and public key into every signature.
//!
//! Signing:
//! 1. `k ← [1, n-1]`, `(x₁, y₁) = k·G`
//! 2. `r = (e + x₁) mod n`; retry if `r = 0` or `r + k = n`
//! 3. `s = (1 + d)⁻¹ · (k − r·d) mod n`; retry if `s = 0`
//!
//! Verification recomputes `(x₁, y₁) = s·G + (r + s)·Q` and accepts iff
//! `(e + x₁) mod n = r`.

mod signature;

pub use signature::Sm2Signature;

use crate::error::{Error, Result};
use gmcrypt_algorithms::ec::sm2::{self as ec, Point, Scalar};
use gmcrypt_algorithms::hash::{HashFunction, Sm3};
use gmcrypt_api::{
    error::Error as ApiError, IdentitySignature, Result as ApiResult,
    Signature as SignatureTrait,
};
use gmcrypt_params::traditional::sm2::{
    SM2_CURVE, SM2_DEFAULT_USER_ID, SM2_FIELD_ELEMENT_SIZE, SM2_MAX_RETRIES,
    SM2_MAX_USER_ID_SIZE, SM2_POINT_UNCOMPRESSED_SIZE, SM2_SCALAR_SIZE,
};
use rand::{rngs::OsRng, CryptoRng, RngCore};
use subtle::ConstantTimeEq;
use tracing::debug;
use zeroize::{Zeroize, Zeroizing};

/// SM2 signature scheme on the recommended 256-bit curve
pub struct Sm2Dsa;

/// SM2 public key, stored in uncompressed form (0x04 ‖ X ‖ Y)
///
/// Construction validates that the encoding is a curve point other than the
/// identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sm2PublicKey([u8; SM2_POINT_UNCOMPRESSED_SIZE]);

impl Sm2PublicKey {
    /// Parse and validate an uncompressed public key
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != SM2_POINT_UNCOMPRESSED_SIZE {
            return Err(Error::InvalidKeySize {
                expected: SM2_POINT_UNCOMPRESSED_SIZE,
                actual: bytes.len(),
            });
        }
        let point = Point::deserialize_uncompressed(bytes)?;
        Ok(Self::from_point(&point))
    }

    /// Wrap an already validated point
    pub fn from_point(point: &Point) -> Self {
        Sm2PublicKey(point.serialize_uncompressed())
    }

    /// The curve point
    pub fn to_point(&self) -> Result<Point> {
        Ok(Point::deserialize_uncompressed(&self.0)?)
    }

    /// Encoded bytes
    pub fn to_bytes(&self) -> [u8; SM2_POINT_UNCOMPRESSED_SIZE] {
        self.0
    }

    fn x_bytes(&self) -> &[u8] {
        &self.0[1..1 + SM2_FIELD_ELEMENT_SIZE]
    }

    fn y_bytes(&self) -> &[u8] {
        &self.0[1 + SM2_FIELD_ELEMENT_SIZE..]
    }
}

impl AsRef<[u8]> for Sm2PublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// SM2 secret key
///
/// The scalar d satisfies 1 ≤ d ≤ n-1. Keys with d = n-1 parse but cannot
/// sign, since 1 + d has no inverse mod n.
#[derive(Clone)]
pub struct Sm2SecretKey {
    raw: Scalar,
    bytes: [u8; SM2_SCALAR_SIZE],
}

impl Sm2SecretKey {
    /// Parse a 32-byte big-endian scalar in [1, n-1]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != SM2_SCALAR_SIZE {
            return Err(Error::InvalidKeySize {
                expected: SM2_SCALAR_SIZE,
                actual: bytes.len(),
            });
        }
        let raw = Scalar::deserialize(bytes)
            .map_err(|_| Error::InvalidKey("secret scalar not in [1, n-1]".to_string()))?;
        Ok(Self::from_scalar(raw))
    }

    fn from_scalar(raw: Scalar) -> Self {
        let bytes = raw.serialize();
        Sm2SecretKey { raw, bytes }
    }

    /// Big-endian encoding of d
    pub fn to_bytes(&self) -> Zeroizing<[u8; SM2_SCALAR_SIZE]> {
        Zeroizing::new(self.bytes)
    }

    /// The secret scalar
    pub fn scalar(&self) -> &Scalar {
        &self.raw
    }
}

impl Zeroize for Sm2SecretKey {
    fn zeroize(&mut self) {
        self.raw.zeroize();
        self.bytes.zeroize();
    }
}

impl Drop for Sm2SecretKey {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl core::fmt::Debug for Sm2SecretKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("Sm2SecretKey(..)")
    }
}

impl Sm2Dsa {
    /// ZA = SM3(ENTL ‖ ID ‖ a ‖ b ‖ Gx ‖ Gy ‖ Qx ‖ Qy)
    ///
    /// ENTL is the bit length of `user_id` as a 16-bit big-endian integer,
    /// so identities longer than 8191 bytes are rejected.
    pub fn compute_za(public_key: &Sm2PublicKey, user_id: &[u8]) -> Result<[u8; 32]> {
        if user_id.len() > SM2_MAX_USER_ID_SIZE {
            return Err(Error::InvalidParameter(format!(
                "user id of {} bytes exceeds {} bytes",
                user_id.len(),
                SM2_MAX_USER_ID_SIZE
            )));
        }
        let entl = (user_id.len() * 8) as u16;

        let mut h = Sm3::new();
        h.update(&entl.to_be_bytes())?
            .update(user_id)?
            .update(&SM2_CURVE.a)?
            .update(&SM2_CURVE.b)?
            .update(&SM2_CURVE.g_x)?
            .update(&SM2_CURVE.g_y)?
            .update(public_key.x_bytes())?
            .update(public_key.y_bytes())?;
        Ok(h.finalize()?.to_bytes())
    }

    /// e = SM3(ZA ‖ M)
    pub fn message_digest(
        public_key: &Sm2PublicKey,
        user_id: &[u8],
        message: &[u8],
    ) -> Result<[u8; 32]> {
        let za = Self::compute_za(public_key, user_id)?;
        let mut h = Sm3::new();
        h.update(&za)?.update(message)?;
        Ok(h.finalize()?.to_bytes())
    }
}

/// (1 + d)⁻¹ mod n
fn signing_factor(d: &Scalar) -> Result<Scalar> {
    d.add_mod_n(&Scalar::one())
        .inv_mod_n()
        .map_err(|_| Error::InvalidKey("d = n-1 cannot sign".to_string()))
}

/// One signing attempt with nonce `k`; `None` asks the caller for a new nonce
fn sign_with_nonce(e: &Scalar, d: &Scalar, d1_inv: &Scalar, k: &Scalar) -> Option<Sm2Signature> {
    let kg = ec::scalar_mult_base_g(k);
    let r = e.add_mod_n(&Scalar::from_field(kg.x()));
    if r.is_zero() || r.add_mod_n(k).is_zero() {
        debug!(reason = "r == 0 or r + k == n", "SM2 sign: nonce rejected");
        return None;
    }

    let s = d1_inv.mul_mod_n(&k.sub_mod_n(&r.mul_mod_n(d)));
    if s.is_zero() {
        debug!(reason = "s == 0", "SM2 sign: nonce rejected");
        return None;
    }

    Some(Sm2Signature::new(r.serialize(), s.serialize()))
}

/// Sign a precomputed digest `e` with an explicit nonce
///
/// Fails if the nonce would have to be regenerated.
#[cfg(test)]
pub(crate) fn sign_digest_with_nonce(
    digest: &[u8; 32],
    secret_key: &Sm2SecretKey,
    k: &Scalar,
) -> Result<Sm2Signature> {
    let e = Scalar::from_bytes_reduced(digest);
    let d1_inv = signing_factor(&secret_key.raw)?;
    sign_with_nonce(&e, &secret_key.raw, &d1_inv, k).ok_or(Error::SignatureGeneration {
        algorithm: "SM2 sign",
        details: "nonce rejected".to_string(),
    })
}

fn sign_digest<R: CryptoRng + RngCore>(
    digest: &[u8; 32],
    secret_key: &Sm2SecretKey,
    rng: &mut R,
) -> Result<Sm2Signature> {
    let e = Scalar::from_bytes_reduced(digest);
    let d1_inv = signing_factor(&secret_key.raw)?;

    for attempt in 0..SM2_MAX_RETRIES {
        let k = Scalar::random(rng)?;
        if let Some(sig) = sign_with_nonce(&e, &secret_key.raw, &d1_inv, &k) {
            return Ok(sig);
        }
        debug!(attempt, "SM2 sign: retrying with a fresh nonce");
    }

    Err(Error::SignatureGeneration {
        algorithm: "SM2 sign",
        details: format!("no usable nonce after {} attempts", SM2_MAX_RETRIES),
    })
}

/// Check `(r, s)` against digest `e` and public point `Q`
fn verify_digest(
    digest: &[u8; 32],
    signature: &Sm2Signature,
    q: &Point,
) -> core::result::Result<(), &'static str> {
    let r = Scalar::deserialize(signature.r()).map_err(|_| "r not in [1, n-1]")?;
    let s = Scalar::deserialize(signature.s()).map_err(|_| "s not in [1, n-1]")?;

    let t = r.add_mod_n(&s);
    if t.is_zero() {
        return Err("r + s == n");
    }

    let point = ec::scalar_mult_base_g(&s).add(&ec::scalar_mult(&t, q));
    if point.is_identity() {
        return Err("s·G + t·Q is the identity");
    }

    let e = Scalar::from_bytes_reduced(digest);
    let expected = e.add_mod_n(&Scalar::from_field(point.x()));
    if bool::from(expected.ct_eq(&r)) {
        Ok(())
    } else {
        Err("R != r")
    }
}

impl SignatureTrait for Sm2Dsa {
    type PublicKey = Sm2PublicKey;
    type SecretKey = Sm2SecretKey;
    type SignatureData = Sm2Signature;
    type KeyPair = (Self::PublicKey, Self::SecretKey);

    fn name() -> &'static str {
        "SM2"
    }

    /// Generate an SM2 key pair
    ///
    /// d = (t mod (n − 2)) + 1 for 32 random bytes t, and Q = d·G.
    fn keypair<R: CryptoRng + RngCore>(rng: &mut R) -> ApiResult<Self::KeyPair> {
        let (d, q) = ec::generate_keypair(rng).map_err(ApiError::from)?;
        Ok((Sm2PublicKey::from_point(&q), Sm2SecretKey::from_scalar(d)))
    }

    fn public_key(keypair: &Self::KeyPair) -> Self::PublicKey {
        keypair.0
    }

    fn secret_key(keypair: &Self::KeyPair) -> Self::SecretKey {
        keypair.1.clone()
    }

    /// Sign with the default identity
    fn sign(message: &[u8], secret_key: &Self::SecretKey) -> ApiResult<Self::SignatureData> {
        Self::sign_with_id(message, SM2_DEFAULT_USER_ID, secret_key, &mut OsRng)
    }

    /// Verify with the default identity
    fn verify(
        message: &[u8],
        signature: &Self::SignatureData,
        public_key: &Self::PublicKey,
    ) -> ApiResult<()> {
        Self::verify_with_id(message, SM2_DEFAULT_USER_ID, signature, public_key)
    }
}

impl IdentitySignature for Sm2Dsa {
    const DEFAULT_ID: &'static [u8] = SM2_DEFAULT_USER_ID;

    fn sign_with_id<R: CryptoRng + RngCore>(
        message: &[u8],
        user_id: &[u8],
        secret_key: &Self::SecretKey,
        rng: &mut R,
    ) -> ApiResult<Self::SignatureData> {
        // ZA is bound to the signer's own public key
        let public_key = Self::derive_public_key(secret_key)?;
        let digest = Self::message_digest(&public_key, user_id, message)?;
        Ok(sign_digest(&digest, secret_key, rng)?)
    }

    fn verify_with_id(
        message: &[u8],
        user_id: &[u8],
        signature: &Self::SignatureData,
        public_key: &Self::PublicKey,
    ) -> ApiResult<()> {
        let q = public_key.to_point()?;
        let digest = Self::message_digest(public_key, user_id, message)?;

        verify_digest(&digest, signature, &q).map_err(|reason| {
            debug!(reason, "SM2 verify: signature rejected");
            ApiError::from(Error::Verification {
                algorithm: "SM2 verify",
                details: reason,
            })
        })
    }

    fn derive_public_key(secret_key: &Self::SecretKey) -> ApiResult<Self::PublicKey> {
        let q = ec::public_key_from_private(&secret_key.raw).map_err(ApiError::from)?;
        Ok(Sm2PublicKey::from_point(&q))
    }
}

#[cfg(test)]
mod tests;
