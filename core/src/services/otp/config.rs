//! Configuration for the OTP manager

use std::collections::HashSet;
use std::time::Duration;

use crate::errors::{OtpError, OtpResult};

/// Characters OTPs are drawn from by default: `A`-`Z` and `1`-`9`
pub const DEFAULT_ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ123456789";

/// Default OTP length in characters
pub const DEFAULT_CODE_LENGTH: usize = 10;

/// Default OTP validity (5 minutes)
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// Window at the start of an OTP's life during which resend is blocked
pub const RESEND_WINDOW: Duration = Duration::from_secs(60);

/// Longest accepted TTL; Redis `SET EX` takes a signed 64-bit second count
pub const MAX_TTL: Duration = Duration::from_secs(i64::MAX as u64);

/// Configuration for the OTP manager
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpConfig {
    /// Character set codes are drawn from
    pub alphabet: String,
    /// Number of characters per code
    pub length: usize,
    /// How long a code stays valid in the store
    pub ttl: Duration,
    /// Delete the code after its first successful validation
    pub consume_on_success: bool,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            alphabet: DEFAULT_ALPHABET.to_string(),
            length: DEFAULT_CODE_LENGTH,
            ttl: DEFAULT_TTL,
            consume_on_success: false,
        }
    }
}

impl OtpConfig {
    pub fn with_alphabet(mut self, alphabet: impl Into<String>) -> Self {
        self.alphabet = alphabet.into();
        self
    }

    pub fn with_length(mut self, length: usize) -> Self {
        self.length = length;
        self
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_consume_on_success(mut self, consume: bool) -> Self {
        self.consume_on_success = consume;
        self
    }

    /// Remaining TTL above which an OTP is still fresh and resend is blocked
    ///
    /// Saturates at zero for TTLs shorter than the resend window, in which
    /// case resend stays blocked for the whole life of the code.
    pub fn fresh_threshold(&self) -> Duration {
        self.ttl.saturating_sub(RESEND_WINDOW)
    }

    /// Reject configurations that would yield empty or degenerate codes
    pub fn validate(&self) -> OtpResult<()> {
        if self.alphabet.is_empty() {
            return Err(OtpError::config("alphabet must not be empty"));
        }

        let mut seen = HashSet::new();
        if let Some(duplicate) = self.alphabet.chars().find(|c| !seen.insert(*c)) {
            return Err(OtpError::config(format!(
                "alphabet contains duplicate character '{}'",
                duplicate
            )));
        }

        if self.length == 0 {
            return Err(OtpError::config("length must be positive"));
        }

        // Redis expiries are whole seconds
        if self.ttl.as_secs() == 0 || self.ttl.subsec_nanos() != 0 {
            return Err(OtpError::config(format!(
                "ttl must be a positive whole number of seconds, got {:?}",
                self.ttl
            )));
        }

        if self.ttl > MAX_TTL {
            return Err(OtpError::config(format!(
                "ttl must not exceed {} seconds, got {}",
                MAX_TTL.as_secs(),
                self.ttl.as_secs()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = OtpConfig::default();
        assert_eq!(config.alphabet.chars().count(), 35);
        assert_eq!(config.length, 10);
        assert_eq!(config.ttl, Duration::from_secs(300));
        assert!(!config.consume_on_success);
        assert_eq!(config.fresh_threshold(), Duration::from_secs(240));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_alphabet_excludes_zero() {
        assert!(!DEFAULT_ALPHABET.contains('0'));
        assert!(DEFAULT_ALPHABET.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_rejects_empty_alphabet() {
        let err = OtpConfig::default().with_alphabet("").validate().unwrap_err();
        assert!(matches!(err, OtpError::Config { .. }));
    }

    #[test]
    fn test_rejects_duplicate_characters() {
        let err = OtpConfig::default().with_alphabet("ABCA").validate().unwrap_err();
        assert!(err.to_string().contains("'A'"));
    }

    #[test]
    fn test_rejects_zero_length() {
        assert!(OtpConfig::default().with_length(0).validate().is_err());
    }

    #[test]
    fn test_rejects_bad_ttl() {
        assert!(OtpConfig::default().with_ttl(Duration::ZERO).validate().is_err());
        assert!(OtpConfig::default()
            .with_ttl(Duration::from_millis(1500))
            .validate()
            .is_err());
    }

    #[test]
    fn test_rejects_ttl_beyond_redis_range() {
        let err = OtpConfig::default()
            .with_ttl(Duration::from_secs(u64::MAX))
            .validate()
            .unwrap_err();
        assert!(matches!(err, OtpError::Config { .. }));

        assert!(OtpConfig::default().with_ttl(MAX_TTL).validate().is_ok());
    }

    #[test]
    fn test_short_ttl_saturates_threshold() {
        let config = OtpConfig::default().with_ttl(Duration::from_secs(30));
        assert!(config.validate().is_ok());
        assert_eq!(config.fresh_threshold(), Duration::ZERO);
    }
}
