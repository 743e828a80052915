//! Error handling for PKE operations.

use gmcrypt_algorithms::error::Error as PrimitiveError;
use gmcrypt_api::error::Error as CoreError;
use thiserror::Error as ThisError;

/// Error type for PKE operations.
#[derive(ThisError, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An error from the underlying primitives
    #[error("PKE primitive error: {0}")]
    Primitive(#[from] PrimitiveError),

    /// An error already expressed in API terms
    #[error("PKE API error: {0}")]
    Api(#[from] CoreError),

    /// The recipient public key is not a valid uncompressed curve point
    #[error("Invalid PKE public key encoding: {0}")]
    InvalidPublicKeyFormat(String),

    /// Marker byte, length or embedded point is wrong
    #[error("Invalid PKE ciphertext format: {0}")]
    InvalidCiphertextFormat(&'static str),

    /// C3 does not match the recomputed tag
    #[error("PKE integrity check failed")]
    IntegrityCheckFailed,

    /// The KDF could not produce the mask
    #[error("PKE key derivation failed: {0}")]
    KeyDerivationFailed(&'static str),

    /// Encryption could not complete
    #[error("PKE encryption failed: {0}")]
    EncryptionFailed(&'static str),
}

// Conversion from PKE Error to API Error
impl From<Error> for CoreError {
    fn from(err: Error) -> Self {
        match err {
            Error::Primitive(e) => e.into(),
            Error::Api(e) => e,
            Error::InvalidPublicKeyFormat(message) => CoreError::InvalidPublicKeyFormat {
                context: "SM2 public key",
                message,
            },
            Error::InvalidCiphertextFormat(reason) => CoreError::InvalidCiphertext {
                context: "SM2 decrypt",
                message: reason.to_string(),
            },
            Error::IntegrityCheckFailed => CoreError::IntegrityCheckFailed {
                context: "SM2 decrypt",
            },
            Error::KeyDerivationFailed(reason) => CoreError::Other {
                context: "SM2 KDF",
                message: reason.to_string(),
            },
            Error::EncryptionFailed(reason) => CoreError::Other {
                context: "SM2 encrypt",
                message: reason.to_string(),
            },
        }
    }
}

/// Result type for PKE operations.
pub type Result<T> = core::result::Result<T, Error>;
