//! Domain-specific error types and error handling.

use thiserror::Error;

/// Failures reported by an expiring key-value store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store could not be reached (connection refused, timeout, ...)
    #[error("Store unavailable: {message}")]
    Unavailable { message: String },

    /// The store was reached but the command failed
    #[error("Store operation failed: {message}")]
    Operation { message: String },
}

/// Errors surfaced by the OTP manager
#[derive(Error, Debug)]
pub enum OtpError {
    #[error("Invalid OTP configuration: {message}")]
    Config { message: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl OtpError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        OtpError::Config {
            message: message.into(),
        }
    }

    /// True when the error came from the backing store rather than from this crate
    pub fn is_store_error(&self) -> bool {
        matches!(self, OtpError::Store(_))
    }
}

pub type OtpResult<T> = Result<T, OtpError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_message() {
        let error = OtpError::config("alphabet must not be empty");
        assert_eq!(
            error.to_string(),
            "Invalid OTP configuration: alphabet must not be empty"
        );
        assert!(!error.is_store_error());
    }

    #[test]
    fn test_store_error_is_transparent() {
        let error: OtpError = StoreError::Unavailable {
            message: "connection refused".to_string(),
        }
        .into();
        assert!(error.is_store_error());
        assert_eq!(error.to_string(), "Store unavailable: connection refused");
    }
}
