//! SM2 ciphertext layout
//!
//! Wire format: `0x04 ‖ X1 ‖ Y1 ‖ C3 ‖ C2`, where `(X1, Y1) = C1 = k·G`,
//! `C3` is the 32-byte SM3 tag and `C2` is as long as the plaintext.

use crate::error::{Error, Result};
use gmcrypt_params::traditional::sm2::{
    SM2_CIPHERTEXT_OVERHEAD, SM2_CIPHERTEXT_TAG_SIZE, SM2_POINT_UNCOMPRESSED_SIZE,
};

/// Parsed SM2 ciphertext
///
/// Parsing checks the layout only. The embedded point is validated during
/// decryption.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sm2Ciphertext {
    c1: [u8; SM2_POINT_UNCOMPRESSED_SIZE],
    c3: [u8; SM2_CIPHERTEXT_TAG_SIZE],
    c2: Vec<u8>,
}

impl Sm2Ciphertext {
    pub(crate) fn new(
        c1: [u8; SM2_POINT_UNCOMPRESSED_SIZE],
        c3: [u8; SM2_CIPHERTEXT_TAG_SIZE],
        c2: Vec<u8>,
    ) -> Self {
        Self { c1, c3, c2 }
    }

    /// The ephemeral point, uncompressed
    pub fn c1(&self) -> &[u8; SM2_POINT_UNCOMPRESSED_SIZE] {
        &self.c1
    }

    /// The integrity tag
    pub fn c3(&self) -> &[u8; SM2_CIPHERTEXT_TAG_SIZE] {
        &self.c3
    }

    /// The masked message
    pub fn c2(&self) -> &[u8] {
        &self.c2
    }

    /// Length of the plaintext this ciphertext carries
    pub fn plaintext_len(&self) -> usize {
        self.c2.len()
    }

    /// Serialize as `C1 ‖ C3 ‖ C2`
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(SM2_CIPHERTEXT_OVERHEAD + self.c2.len());
        out.extend_from_slice(&self.c1);
        out.extend_from_slice(&self.c3);
        out.extend_from_slice(&self.c2);
        out
    }

    /// Parse `C1 ‖ C3 ‖ C2`
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < SM2_CIPHERTEXT_OVERHEAD {
            return Err(Error::InvalidCiphertextFormat("ciphertext shorter than 97 bytes"));
        }
        if bytes[0] != 0x04 {
            return Err(Error::InvalidCiphertextFormat("missing 0x04 point marker"));
        }

        let mut c1 = [0u8; SM2_POINT_UNCOMPRESSED_SIZE];
        c1.copy_from_slice(&bytes[..SM2_POINT_UNCOMPRESSED_SIZE]);
        let mut c3 = [0u8; SM2_CIPHERTEXT_TAG_SIZE];
        c3.copy_from_slice(&bytes[SM2_POINT_UNCOMPRESSED_SIZE..SM2_CIPHERTEXT_OVERHEAD]);
        let c2 = bytes[SM2_CIPHERTEXT_OVERHEAD..].to_vec();

        Ok(Self { c1, c3, c2 })
    }
}
