//! Trait definition for Public Key Encryption (PKE) schemes.

use crate::error::Result;
use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

/// Trait for Public Key Encryption schemes.
pub trait Pke {
    /// Public key type, with a canonical byte encoding.
    type PublicKey: AsRef<[u8]> + Clone;

    /// Secret key type.
    type SecretKey: Zeroize + Clone;

    /// Ciphertext type, typically the serialized ciphertext bytes.
    type Ciphertext: AsRef<[u8]> + Clone;

    /// Returns the PKE algorithm name.
    fn name() -> &'static str;

    /// Generates a new key pair.
    fn keypair<R: CryptoRng + RngCore>(rng: &mut R) -> Result<(Self::PublicKey, Self::SecretKey)>;

    /// Encrypts `plaintext` for the holder of `pk_recipient`.
    fn encrypt<R: RngCore + CryptoRng>(
        pk_recipient: &Self::PublicKey,
        plaintext: &[u8],
        rng: &mut R,
    ) -> Result<Self::Ciphertext>;

    /// Decrypts a ciphertext with the recipient's secret key.
    ///
    /// Fails without returning any partial plaintext when the ciphertext is
    /// malformed or its integrity tag does not verify.
    fn decrypt(sk_recipient: &Self::SecretKey, ciphertext: &[u8]) -> Result<Vec<u8>>;
}
