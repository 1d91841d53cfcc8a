//! Value objects describing an OTP as seen through the store.

pub mod otp_key;
pub mod otp_state;

pub use otp_key::{OtpKey, OTP_KEY_PREFIX};
pub use otp_state::OtpState;
