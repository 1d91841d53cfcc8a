//! Capabilities the OTP manager depends on

use std::time::{Duration, Instant};

use async_trait::async_trait;

use crate::errors::StoreError;

/// Expiring key-value store holding one OTP per key
///
/// Each method is a single atomic store operation. Failures are returned as
/// they occur; implementations must not retry.
#[async_trait]
pub trait ExpiringStore: Send + Sync {
    /// Store `value` under `key`, replacing any previous value and expiry
    async fn set_with_expiry(&self, key: &str, value: &str, ttl: Duration) -> Result<(), StoreError>;
    /// Current value of `key`, `None` if missing or expired
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    /// Time left before `key` expires, `None` if the key is missing or has no expiry
    async fn remaining_ttl(&self, key: &str) -> Result<Option<Duration>, StoreError>;
    /// Remove `key`; succeeds whether or not it existed
    async fn delete(&self, key: &str) -> Result<(), StoreError>;
}

/// Source of uniformly distributed, unpredictable indices
pub trait RandomSource: Send + Sync {
    /// Uniform integer in `[0, upper)`. `upper` is always non-zero.
    fn uniform_index(&self, upper: usize) -> usize;
}

/// Monotonic time source
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}
