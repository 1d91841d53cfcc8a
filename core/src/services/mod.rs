//! Business services containing domain logic.

pub mod otp;

// Re-export commonly used types
pub use otp::{
    Clock, ExpiringStore, InMemoryStore, ManualClock, OtpConfig, OtpManager, OsRandom,
    RandomSource, SystemClock,
};
