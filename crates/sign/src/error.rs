//! Error types for the signature crate

use gmcrypt_api::Error as ApiError;
use thiserror::Error as ThisError;

/// Errors that can occur during signature operations
#[derive(ThisError, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Invalid key size
    #[error("Invalid key size: expected {expected}, got {actual}")]
    InvalidKeySize { expected: usize, actual: usize },

    /// Invalid signature size
    #[error("Invalid signature size: expected {expected}, got {actual}")]
    InvalidSignatureSize { expected: usize, actual: usize },

    /// Invalid parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Invalid key
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Signature generation failed
    #[error("{algorithm} signature generation failed: {details}")]
    SignatureGeneration {
        algorithm: &'static str,
        details: String,
    },

    /// Verification failed
    #[error("{algorithm} verification failed: {details}")]
    Verification {
        algorithm: &'static str,
        details: &'static str,
    },

    /// Encoding error
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// RNG error
    #[error("RNG error: {0}")]
    Rng(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<gmcrypt_algorithms::Error> for Error {
    fn from(err: gmcrypt_algorithms::Error) -> Self {
        use gmcrypt_algorithms::Error as AlgoError;

        match err {
            AlgoError::Parameter { name, reason } => {
                Error::InvalidParameter(format!("{}: {}", name, reason))
            }
            AlgoError::Point { context, reason } => {
                Error::InvalidKey(format!("{}: {}", context, reason))
            }
            AlgoError::Length {
                expected, actual, ..
            } => Error::InvalidKeySize { expected, actual },
            AlgoError::Processing { operation, details } if details.contains("random") => {
                Error::Rng(format!("{}: {}", operation, details))
            }
            _ => Error::Internal(format!("Algorithm error: {}", err)),
        }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::InvalidKeySize { expected, actual } => ApiError::InvalidLength {
                context: "SM2 key",
                expected,
                actual,
            },
            Error::InvalidSignatureSize { expected, actual } => ApiError::InvalidSignature {
                context: "SM2 signature",
                message: format!("expected {} bytes, got {}", expected, actual),
            },
            Error::InvalidParameter(message) => ApiError::InvalidParameter {
                context: "sign",
                message,
            },
            Error::InvalidKey(message) => ApiError::InvalidKey {
                context: "sign",
                message,
            },
            Error::SignatureGeneration { algorithm, details } => ApiError::Other {
                context: algorithm,
                message: details,
            },
            Error::Verification { algorithm, details } => ApiError::InvalidSignature {
                context: algorithm,
                message: details.to_string(),
            },
            Error::Encoding(message) => ApiError::InvalidSignature {
                context: "SM2 signature encoding",
                message,
            },
            Error::Rng(message) => ApiError::RandomGenerationError {
                context: "sign",
                message,
            },
            Error::Internal(message) => ApiError::Other {
                context: "sign",
                message,
            },
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;
