//! SM2 public key encryption (GB/T 32918.4)
//!
//! Encryption with ephemeral scalar k and recipient key Q = d·G:
//! - `C1 = k·G`, `(x₂, y₂) = k·Q`
//! - `t = KDF(x₂ ‖ y₂, |M|)`; k is redrawn while t is all zero
//! - `C2 = M ⊕ t`, `C3 = SM3(x₂ ‖ M ‖ y₂)`
//!
//! Decryption recovers `(x₂, y₂) = d·C1` and checks C3 in constant time
//! before releasing any plaintext.

mod ciphertext;

pub use ciphertext::Sm2Ciphertext;

use crate::error::{Error as PkeError, Result};
use gmcrypt_algorithms::ec::sm2::{self as ec, Point, Scalar};
use gmcrypt_algorithms::hash::{HashFunction, Sm3};
use gmcrypt_algorithms::kdf::sm3_kdf;
use gmcrypt_api::error::{Error as ApiError, Result as ApiResult};
use gmcrypt_api::Pke;
use gmcrypt_internal::constant_time::{ct_eq, ct_is_zero, xor_in_place, xor_to_vec};
use gmcrypt_params::traditional::sm2::{
    SM2_CIPHERTEXT_TAG_SIZE, SM2_FIELD_ELEMENT_SIZE, SM2_MAX_RETRIES,
    SM2_POINT_UNCOMPRESSED_SIZE, SM2_SCALAR_SIZE,
};
use rand::{CryptoRng, RngCore};
use tracing::debug;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Public key for SM2 encryption. Stores the serialized uncompressed point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sm2PkePublicKey([u8; SM2_POINT_UNCOMPRESSED_SIZE]);

impl Sm2PkePublicKey {
    /// Parse and validate `0x04 ‖ X ‖ Y`
    ///
    /// A wrong length, marker byte or off-curve point is a format error.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let point = parse_public_point(bytes)?;
        Ok(Sm2PkePublicKey(point.serialize_uncompressed()))
    }

    /// Encoded bytes
    pub fn to_bytes(&self) -> [u8; SM2_POINT_UNCOMPRESSED_SIZE] {
        self.0
    }
}

impl AsRef<[u8]> for Sm2PkePublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

fn parse_public_point(bytes: &[u8]) -> Result<Point> {
    Point::deserialize_uncompressed(bytes).map_err(|e| {
        debug!(len = bytes.len(), "SM2 public key rejected");
        PkeError::InvalidPublicKeyFormat(e.to_string())
    })
}

/// Secret key for SM2 encryption. Stores the serialized scalar d ∈ [1, n-1].
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Sm2PkeSecretKey([u8; SM2_SCALAR_SIZE]);

impl Sm2PkeSecretKey {
    /// Parse a 32-byte big-endian scalar in [1, n-1]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let d = Scalar::deserialize(bytes)?;
        Ok(Sm2PkeSecretKey(d.serialize()))
    }

    /// Big-endian encoding of d
    pub fn to_bytes(&self) -> Zeroizing<[u8; SM2_SCALAR_SIZE]> {
        Zeroizing::new(self.0)
    }
}

impl core::fmt::Debug for Sm2PkeSecretKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("Sm2PkeSecretKey(..)")
    }
}

/// SM2 encryption scheme on the recommended 256-bit curve
pub struct Sm2Pke;

/// `x₂ ‖ y₂` of the shared point, the KDF input
fn shared_secret(shared: &Point) -> Zeroizing<[u8; 2 * SM2_FIELD_ELEMENT_SIZE]> {
    let mut z = Zeroizing::new([0u8; 2 * SM2_FIELD_ELEMENT_SIZE]);
    z[..SM2_FIELD_ELEMENT_SIZE].copy_from_slice(&shared.x_coordinate_bytes());
    z[SM2_FIELD_ELEMENT_SIZE..].copy_from_slice(&shared.y_coordinate_bytes());
    z
}

/// KDF mask for a message of `len` bytes
///
/// `None` when the mask is all zero, which would leave the message in clear.
/// An empty mask is never rejected.
fn derive_mask(z: &[u8], len: usize) -> Result<Option<Zeroizing<Vec<u8>>>> {
    let t = sm3_kdf(z, len)
        .map_err(|_| PkeError::KeyDerivationFailed("KDF-SM3 expansion failed"))?;
    if len > 0 && ct_is_zero(&t) {
        return Ok(None);
    }
    Ok(Some(t))
}

/// C3 = SM3(x₂ ‖ M ‖ y₂)
fn integrity_tag(z: &[u8], message: &[u8]) -> Result<[u8; SM2_CIPHERTEXT_TAG_SIZE]> {
    let mut h = Sm3::new();
    h.update(&z[..SM2_FIELD_ELEMENT_SIZE])?
        .update(message)?
        .update(&z[SM2_FIELD_ELEMENT_SIZE..])?;
    Ok(h.finalize()?.to_bytes())
}

/// Encrypt with a caller-chosen ephemeral scalar
///
/// Returns `Ok(None)` when `k` yields an all-zero KDF mask and must be
/// replaced.
pub(crate) fn encrypt_with_ephemeral(
    q: &Point,
    plaintext: &[u8],
    k: &Scalar,
) -> Result<Option<Sm2Ciphertext>> {
    let c1 = ec::scalar_mult_base_g(k);
    let shared = ec::scalar_mult(k, q);
    if shared.is_identity() {
        return Err(PkeError::EncryptionFailed("k·Q is the point at infinity"));
    }
    let z = shared_secret(&shared);

    let t = match derive_mask(&z[..], plaintext.len())? {
        Some(t) => t,
        None => return Ok(None),
    };
    let c2 = xor_to_vec(plaintext, &t);
    let c3 = integrity_tag(&z[..], plaintext)?;

    Ok(Some(Sm2Ciphertext::new(c1.serialize_uncompressed(), c3, c2)))
}

fn encrypt_point<R: RngCore + CryptoRng>(
    q: &Point,
    plaintext: &[u8],
    rng: &mut R,
) -> Result<Sm2Ciphertext> {
    for attempt in 0..SM2_MAX_RETRIES {
        let k = Scalar::random(rng)?;
        if let Some(ct) = encrypt_with_ephemeral(q, plaintext, &k)? {
            return Ok(ct);
        }
        debug!(attempt, len = plaintext.len(), "SM2 encrypt: KDF output all zero, redrawing k");
    }
    Err(PkeError::EncryptionFailed("no usable ephemeral key"))
}

fn decrypt_parsed(d: &Scalar, ct: &Sm2Ciphertext) -> Result<Vec<u8>> {
    let c1 = Point::deserialize_uncompressed(ct.c1()).map_err(|_| {
        debug!("SM2 decrypt: C1 is not a curve point");
        PkeError::InvalidCiphertextFormat("C1 is not a valid curve point")
    })?;

    let shared = ec::scalar_mult(d, &c1);
    if shared.is_identity() {
        return Err(PkeError::InvalidCiphertextFormat("d·C1 is the point at infinity"));
    }
    let z = shared_secret(&shared);

    // no valid ciphertext has an all-zero mask, so treat it like a bad tag
    let t = derive_mask(&z[..], ct.plaintext_len())?.ok_or_else(|| {
        debug!("SM2 decrypt: KDF output all zero");
        PkeError::IntegrityCheckFailed
    })?;

    let mut message = ct.c2().to_vec();
    xor_in_place(&mut message, &t);

    let mut expected = integrity_tag(&z[..], &message)?;
    let tag_ok = ct_eq(expected, ct.c3());
    expected.zeroize();
    if !tag_ok {
        message.zeroize();
        debug!(len = ct.plaintext_len(), "SM2 decrypt: C3 mismatch");
        return Err(PkeError::IntegrityCheckFailed);
    }

    Ok(message)
}

impl Sm2Pke {
    /// Encrypt and return the parsed ciphertext
    pub fn encrypt_to_parts<R: RngCore + CryptoRng>(
        pk_recipient: &Sm2PkePublicKey,
        plaintext: &[u8],
        rng: &mut R,
    ) -> Result<Sm2Ciphertext> {
        let q = parse_public_point(&pk_recipient.0)?;
        encrypt_point(&q, plaintext, rng)
    }

    /// Decrypt an already parsed ciphertext
    pub fn decrypt_parts(
        sk_recipient: &Sm2PkeSecretKey,
        ciphertext: &Sm2Ciphertext,
    ) -> Result<Vec<u8>> {
        let d = Scalar::deserialize(&sk_recipient.0)?;
        decrypt_parsed(&d, ciphertext)
    }
}

impl Pke for Sm2Pke {
    type PublicKey = Sm2PkePublicKey;
    type SecretKey = Sm2PkeSecretKey;
    type Ciphertext = Vec<u8>;

    fn name() -> &'static str {
        "SM2-PKE"
    }

    fn keypair<R: RngCore + CryptoRng>(
        rng: &mut R,
    ) -> ApiResult<(Self::PublicKey, Self::SecretKey)> {
        let (d, q) = ec::generate_keypair(rng).map_err(|e| ApiError::from(PkeError::from(e)))?;
        Ok((
            Sm2PkePublicKey(q.serialize_uncompressed()),
            Sm2PkeSecretKey(d.serialize()),
        ))
    }

    fn encrypt<R: RngCore + CryptoRng>(
        pk_recipient: &Self::PublicKey,
        plaintext: &[u8],
        rng: &mut R,
    ) -> ApiResult<Self::Ciphertext> {
        let ct = Self::encrypt_to_parts(pk_recipient, plaintext, rng).map_err(ApiError::from)?;
        Ok(ct.to_bytes())
    }

    fn decrypt(sk_recipient: &Self::SecretKey, ciphertext: &[u8]) -> ApiResult<Vec<u8>> {
        let ct = Sm2Ciphertext::from_bytes(ciphertext).map_err(|e| {
            debug!(len = ciphertext.len(), "SM2 decrypt: malformed ciphertext");
            ApiError::from(e)
        })?;
        Self::decrypt_parts(sk_recipient, &ct).map_err(ApiError::from)
    }
}
