//! Byte-level SM2 operations
//!
//! Keys, signatures and ciphertexts cross this boundary as plain byte
//! strings:
//!
//! | value | encoding |
//! |---|---|
//! | private key | 32-byte big-endian scalar |
//! | public key | `0x04 ‖ X ‖ Y` (65 bytes) |
//! | signature | `r ‖ s` (64 bytes) |
//! | ciphertext | `0x04 ‖ X1 ‖ Y1 ‖ C3 ‖ C2` (97 + plaintext bytes) |
//!
//! Every function without an explicit RNG draws from the operating system.
//! All of them are stateless and safe to call concurrently.

use crate::algorithms::ec::sm2 as ec;
use crate::api::{Error, Result, ResultExt};
use crate::params::traditional::sm2::{SM2_POINT_UNCOMPRESSED_SIZE, SM2_SCALAR_SIZE};
use rand::{rngs::OsRng, CryptoRng, RngCore};
use zeroize::Zeroizing;

#[cfg(feature = "sign")]
use crate::params::traditional::sm2::{SM2_DEFAULT_USER_ID, SM2_SIGNATURE_SIZE};
#[cfg(feature = "sign")]
use crate::sign::{Sm2Dsa, Sm2PublicKey, Sm2SecretKey, Sm2Signature};
#[cfg(feature = "sign")]
use gmcrypt_api::IdentitySignature;

#[cfg(feature = "pke")]
use crate::pke::{Sm2Pke, Sm2PkePublicKey, Sm2PkeSecretKey};
#[cfg(feature = "pke")]
use gmcrypt_api::Pke;

/// A freshly generated key pair in wire encoding
pub struct KeyPairBytes {
    /// d, big-endian; wiped on drop
    pub private_key: Zeroizing<[u8; SM2_SCALAR_SIZE]>,
    /// Q = d·G, uncompressed
    pub public_key: [u8; SM2_POINT_UNCOMPRESSED_SIZE],
}

impl core::fmt::Debug for KeyPairBytes {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("KeyPairBytes")
            .field("private_key", &"..")
            .field("public_key", &self.public_key)
            .finish()
    }
}

/// Generate a key pair from the OS random source
pub fn generate_keypair() -> Result<KeyPairBytes> {
    generate_keypair_with_rng(&mut OsRng)
}

/// Generate a key pair with `d = (t mod (n − 2)) + 1`
pub fn generate_keypair_with_rng<R: CryptoRng + RngCore>(rng: &mut R) -> Result<KeyPairBytes> {
    let (d, q) = ec::generate_keypair(rng)?;
    Ok(KeyPairBytes {
        private_key: Zeroizing::new(d.serialize()),
        public_key: q.serialize_uncompressed(),
    })
}

/// Recompute the public key for a private key
pub fn public_key_from_private(private_key: &[u8]) -> Result<[u8; SM2_POINT_UNCOMPRESSED_SIZE]> {
    let d = ec::Scalar::deserialize(private_key).with_context("SM2 private key")?;
    Ok(ec::public_key_from_private(&d)?.serialize_uncompressed())
}

/// Encrypt `plaintext` for `public_key`
///
/// A public key that is not a valid `0x04 ‖ X ‖ Y` point fails with
/// [`Error::InvalidPublicKeyFormat`].
#[cfg(feature = "pke")]
pub fn encrypt(plaintext: &[u8], public_key: &[u8]) -> Result<Vec<u8>> {
    encrypt_with_rng(plaintext, public_key, &mut OsRng)
}

/// Encrypt with a caller-supplied random source
#[cfg(feature = "pke")]
pub fn encrypt_with_rng<R: CryptoRng + RngCore>(
    plaintext: &[u8],
    public_key: &[u8],
    rng: &mut R,
) -> Result<Vec<u8>> {
    let pk = Sm2PkePublicKey::from_bytes(public_key).with_context("SM2 public key")?;
    Sm2Pke::encrypt(&pk, plaintext, rng)
}

/// Decrypt a `C1 ‖ C3 ‖ C2` ciphertext
///
/// Fails with [`Error::InvalidCiphertext`] for a malformed layout and with
/// [`Error::IntegrityCheckFailed`] when the tag does not verify.
#[cfg(feature = "pke")]
pub fn decrypt(ciphertext: &[u8], private_key: &[u8]) -> Result<Vec<u8>> {
    let sk = Sm2PkeSecretKey::from_bytes(private_key).with_context("SM2 private key")?;
    Sm2Pke::decrypt(&sk, ciphertext)
}

/// Sign `message`; `user_id` defaults to `"1234567812345678"`
#[cfg(feature = "sign")]
pub fn sign(
    message: &[u8],
    private_key: &[u8],
    user_id: Option<&[u8]>,
) -> Result<[u8; SM2_SIGNATURE_SIZE]> {
    sign_with_rng(message, private_key, user_id, &mut OsRng)
}

/// Sign with a caller-supplied nonce source
#[cfg(feature = "sign")]
pub fn sign_with_rng<R: CryptoRng + RngCore>(
    message: &[u8],
    private_key: &[u8],
    user_id: Option<&[u8]>,
    rng: &mut R,
) -> Result<[u8; SM2_SIGNATURE_SIZE]> {
    let sk = Sm2SecretKey::from_bytes(private_key)?;
    let sig = Sm2Dsa::sign_with_id(message, user_id.unwrap_or(SM2_DEFAULT_USER_ID), &sk, rng)?;
    Ok(sig.to_bytes())
}

/// Verify an `r ‖ s` signature
///
/// Never fails: malformed keys, signatures or identities simply yield
/// `false`.
#[cfg(feature = "sign")]
pub fn verify(
    message: &[u8],
    signature: &[u8],
    public_key: &[u8],
    user_id: Option<&[u8]>,
) -> bool {
    let checked = Sm2PublicKey::from_bytes(public_key)
        .map_err(Error::from)
        .and_then(|pk| {
            let sig = Sm2Signature::from_bytes(signature)?;
            Sm2Dsa::verify_with_id(message, user_id.unwrap_or(SM2_DEFAULT_USER_ID), &sig, &pk)
        });

    match checked {
        Ok(()) => true,
        Err(err) => {
            tracing::debug!(error = %err, "SM2 verify returned false");
            false
        }
    }
}
