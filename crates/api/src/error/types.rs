//! Error type definitions

use thiserror::Error as ThisError;

/// Primary error type returned by every public gmcrypt operation
///
/// `context` names the operation that failed. `message` is free text for
/// diagnostics and never contains key material, plaintext or digests.
#[derive(ThisError, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A private or public key is malformed or out of range
    #[error("Invalid key: {context}: {message}")]
    InvalidKey {
        context: &'static str,
        message: String,
    },

    /// A public key is not a valid `0x04 ‖ X ‖ Y` curve point encoding
    #[error("Invalid public key encoding: {context}: {message}")]
    InvalidPublicKeyFormat {
        context: &'static str,
        message: String,
    },

    /// A signature could not be parsed
    #[error("Invalid signature: {context}: {message}")]
    InvalidSignature {
        context: &'static str,
        message: String,
    },

    /// Ciphertext layout is wrong (marker byte, length, embedded point)
    #[error("Invalid ciphertext: {context}: {message}")]
    InvalidCiphertext {
        context: &'static str,
        message: String,
    },

    /// Recomputed integrity tag does not match the supplied one
    #[error("Integrity check failed: {context}")]
    IntegrityCheckFailed { context: &'static str },

    /// Input has the wrong length
    #[error("{context}: invalid length (expected {expected}, got {actual})")]
    InvalidLength {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A parameter is outside its accepted domain
    #[error("{context}: {message}")]
    InvalidParameter {
        context: &'static str,
        message: String,
    },

    /// The random source failed
    #[error("Random generation error: {context}: {message}")]
    RandomGenerationError {
        context: &'static str,
        message: String,
    },

    /// Anything else
    #[error("{context}: {message}")]
    Other {
        context: &'static str,
        message: String,
    },
}

/// Result type for gmcrypt operations
pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    /// Replace the context of an existing error, keeping its other fields
    pub fn with_context(self, context: &'static str) -> Self {
        match self {
            Self::InvalidKey { message, .. } => Self::InvalidKey { context, message },
            Self::InvalidPublicKeyFormat { message, .. } => {
                Self::InvalidPublicKeyFormat { context, message }
            }
            Self::InvalidSignature { message, .. } => Self::InvalidSignature { context, message },
            Self::InvalidCiphertext { message, .. } => Self::InvalidCiphertext { context, message },
            Self::IntegrityCheckFailed { .. } => Self::IntegrityCheckFailed { context },
            Self::InvalidLength {
                expected, actual, ..
            } => Self::InvalidLength {
                context,
                expected,
                actual,
            },
            Self::InvalidParameter { message, .. } => Self::InvalidParameter { context, message },
            Self::RandomGenerationError { message, .. } => {
                Self::RandomGenerationError { context, message }
            }
            Self::Other { message, .. } => Self::Other { context, message },
        }
    }

    /// Replace the message of an existing error
    ///
    /// Variants without a message field are returned unchanged.
    pub fn with_message(self, message: impl Into<String>) -> Self {
        let message = message.into();
        match self {
            Self::InvalidKey { context, .. } => Self::InvalidKey { context, message },
            Self::InvalidPublicKeyFormat { context, .. } => {
                Self::InvalidPublicKeyFormat { context, message }
            }
            Self::InvalidSignature { context, .. } => Self::InvalidSignature { context, message },
            Self::InvalidCiphertext { context, .. } => Self::InvalidCiphertext { context, message },
            Self::InvalidParameter { context, .. } => Self::InvalidParameter { context, message },
            Self::RandomGenerationError { context, .. } => {
                Self::RandomGenerationError { context, message }
            }
            Self::Other { context, .. } => Self::Other { context, message },
            other @ (Self::IntegrityCheckFailed { .. } | Self::InvalidLength { .. }) => other,
        }
    }

    /// Whether this error is a format failure: a malformed ciphertext or a
    /// malformed public key encoding
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidCiphertext { .. } | Self::InvalidPublicKeyFormat { .. }
        )
    }

    /// Whether this error is an integrity-tag mismatch
    pub fn is_integrity_error(&self) -> bool {
        matches!(self, Self::IntegrityCheckFailed { .. })
    }
}

impl From<rand::Error> for Error {
    fn from(e: rand::Error) -> Self {
        Self::RandomGenerationError {
            context: "random source",
            message: e.to_string(),
        }
    }
}
