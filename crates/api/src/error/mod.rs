//! Error handling for gmcrypt

pub mod types;

pub use types::{Error, Result};

/// Extension trait for `Result` values on their way to the public API
pub trait ResultExt<T, E>: Sized {
    /// Convert the error into [`Error`] and set its context
    fn with_context(self, context: &'static str) -> Result<T>
    where
        E: Into<Error>;
}

impl<T, E> ResultExt<T, E> for core::result::Result<T, E> {
    fn with_context(self, context: &'static str) -> Result<T>
    where
        E: Into<Error>,
    {
        self.map_err(|e| e.into().with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_has_no_secret_fields() {
        let err = Error::InvalidLength {
            context: "SM2 private key",
            expected: 32,
            actual: 31,
        };
        assert_eq!(
            err.to_string(),
            "SM2 private key: invalid length (expected 32, got 31)"
        );

        let err = Error::IntegrityCheckFailed {
            context: "SM2 decrypt",
        };
        assert_eq!(err.to_string(), "Integrity check failed: SM2 decrypt");
        assert!(err.is_integrity_error());
        assert!(!err.is_format_error());
    }

    #[test]
    fn test_with_context_keeps_variant() {
        let r: core::result::Result<(), Error> = Err(Error::InvalidCiphertext {
            context: "inner",
            message: "missing 0x04 marker".into(),
        });
        let err = r.with_context("SM2 decrypt").unwrap_err();
        assert!(err.is_format_error());
        assert_eq!(
            err.to_string(),
            "Invalid ciphertext: SM2 decrypt: missing 0x04 marker"
        );
    }

    #[test]
    fn test_with_message() {
        let err = Error::Other {
            context: "x",
            message: String::new(),
        }
        .with_message("retry limit reached");
        assert_eq!(err.to_string(), "x: retry limit reached");

        let untouched = Error::IntegrityCheckFailed { context: "y" }.with_message("ignored");
        assert_eq!(untouched, Error::IntegrityCheckFailed { context: "y" });
    }

    #[test]
    fn test_public_key_format_is_format_error() {
        let err = Error::InvalidPublicKeyFormat {
            context: "inner",
            message: "point not on curve".into(),
        }
        .with_context("SM2 public key");
        assert!(err.is_format_error());
        assert!(!err.is_integrity_error());
        assert_eq!(
            err.to_string(),
            "Invalid public key encoding: SM2 public key: point not on curve"
        );
    }
}
