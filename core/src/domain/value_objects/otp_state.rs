//! Lifecycle state of a subject's OTP.

use std::time::Duration;

/// State of a subject's OTP, derived from the remaining TTL in the store
///
/// ```text
/// Absent --generate--> Fresh --(ttl - window elapsed)--> Stale --(ttl elapsed)--> Absent
/// ```
///
/// Generating moves any state to `Fresh`; deleting moves any state to `Absent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpState {
    /// No OTP stored: never issued, expired or deleted
    Absent,
    /// Issued less than the resend window ago; resend is blocked
    Fresh,
    /// Past the resend window but not yet expired
    Stale,
}

impl OtpState {
    /// Classify a remaining TTL against the fresh threshold (`ttl - resend window`).
    ///
    /// `None` means the store reported no key or no expiry. A zero TTL still
    /// names a live key: Redis rounds down to whole seconds.
    pub fn from_remaining_ttl(remaining: Option<Duration>, fresh_threshold: Duration) -> Self {
        match remaining {
            None => OtpState::Absent,
            Some(ttl) if ttl > fresh_threshold => OtpState::Fresh,
            Some(_) => OtpState::Stale,
        }
    }

    /// Whether a new OTP may be requested in this state
    pub fn allows_resend(&self) -> bool {
        !matches!(self, OtpState::Fresh)
    }
}
