//! Store key for a subject's OTP.

use std::fmt;

/// Prefix shared by every OTP key in the store
pub const OTP_KEY_PREFIX: &str = "otp:";

/// Key under which the live OTP of a subject is stored
///
/// Renders as `otp:{subject_id}` with the id in decimal. Existing stored
/// state depends on this exact format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OtpKey(i64);

impl OtpKey {
    pub fn new(subject_id: i64) -> Self {
        Self(subject_id)
    }

    pub fn subject_id(&self) -> i64 {
        self.0
    }
}

impl From<i64> for OtpKey {
    fn from(subject_id: i64) -> Self {
        Self::new(subject_id)
    }
}

impl fmt::Display for OtpKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", OTP_KEY_PREFIX, self.0)
    }
}
