//! Digital signature traits for gmcrypt
//!
//! Secret keys are opaque: implementations expose explicit byte conversions
//! instead of `AsRef<[u8]>` / `AsMut<[u8]>`.

use crate::Result;
use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

/// Core trait for digital signature algorithms
pub trait Signature {
    /// Public key type for this algorithm
    type PublicKey: Clone;

    /// Secret key type - must be zeroizable but not byte-accessible
    type SecretKey: Zeroize + Clone;

    /// Signature data type
    type SignatureData: Clone;

    /// Key pair type (typically a tuple of public and secret keys)
    type KeyPair;

    /// Returns the name of this signature algorithm
    fn name() -> &'static str;

    /// Generate a new key pair using the provided RNG
    fn keypair<R: CryptoRng + RngCore>(rng: &mut R) -> Result<Self::KeyPair>;

    /// Extract the public key from a key pair
    fn public_key(keypair: &Self::KeyPair) -> Self::PublicKey;

    /// Extract the secret key from a key pair
    fn secret_key(keypair: &Self::KeyPair) -> Self::SecretKey;

    /// Sign a message with the given secret key, drawing nonces from the OS RNG
    fn sign(message: &[u8], secret_key: &Self::SecretKey) -> Result<Self::SignatureData>;

    /// Verify a signature against a message and public key
    ///
    /// Any mismatch or malformed input yields an error.
    fn verify(
        message: &[u8],
        signature: &Self::SignatureData,
        public_key: &Self::PublicKey,
    ) -> Result<()>;
}

/// Signature algorithms that bind a signer identity into the signed digest
///
/// [`Signature::sign`] and [`Signature::verify`] use the algorithm's default
/// identity; these methods let the caller supply one explicitly.
pub trait IdentitySignature: Signature {
    /// Identity used when none is supplied
    const DEFAULT_ID: &'static [u8];

    /// Sign `message` on behalf of `user_id`
    fn sign_with_id<R: CryptoRng + RngCore>(
        message: &[u8],
        user_id: &[u8],
        secret_key: &Self::SecretKey,
        rng: &mut R,
    ) -> Result<Self::SignatureData>;

    /// Verify a signature produced by `user_id`
    fn verify_with_id(
        message: &[u8],
        user_id: &[u8],
        signature: &Self::SignatureData,
        public_key: &Self::PublicKey,
    ) -> Result<()>;

    /// Recompute the public key belonging to a secret key
    fn derive_public_key(secret_key: &Self::SecretKey) -> Result<Self::PublicKey>;
}
