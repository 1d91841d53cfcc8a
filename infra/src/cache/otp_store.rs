//! Redis-backed OTP store
//!
//! Adapts [`RedisClient`] to the `ExpiringStore` capability the OTP manager
//! depends on. Keys are passed through untouched, so codes live under
//! `otp:{subject_id}` exactly as the manager names them.

use async_trait::async_trait;
use std::time::Duration;

use otp_core::errors::StoreError;
use otp_core::services::otp::ExpiringStore;

use crate::cache::redis_client::is_unavailable_error;
use crate::cache::RedisClient;
use crate::InfrastructureError;

/// [`ExpiringStore`] over Redis `SET EX`, `GET`, `TTL` and `DEL`
#[derive(Clone)]
pub struct RedisOtpStore {
    redis_client: RedisClient,
}

impl RedisOtpStore {
    pub fn new(redis_client: RedisClient) -> Self {
        Self { redis_client }
    }

    pub fn client(&self) -> &RedisClient {
        &self.redis_client
    }
}

impl From<InfrastructureError> for StoreError {
    fn from(error: InfrastructureError) -> Self {
        match error {
            InfrastructureError::Cache(e) if is_unavailable_error(&e) => StoreError::Unavailable {
                message: e.to_string(),
            },
            other => StoreError::Operation {
                message: other.to_string(),
            },
        }
    }
}

/// Whole seconds for `SET EX`; Redis rejects an expiry of zero
pub(crate) fn expiry_seconds(ttl: Duration) -> Result<u64, StoreError> {
    match ttl.as_secs() {
        0 => Err(StoreError::Operation {
            message: format!("expiry must be at least one second, got {:?}", ttl),
        }),
        secs => Ok(secs),
    }
}

#[async_trait]
impl ExpiringStore for RedisOtpStore {
    async fn set_with_expiry(&self, key: &str, value: &str, ttl: Duration) -> Result<(), StoreError> {
        let seconds = expiry_seconds(ttl)?;
        self.redis_client
            .set_with_expiry(key, value, seconds)
            .await
            .map_err(StoreError::from)
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.redis_client.get(key).await.map_err(StoreError::from)
    }

    async fn remaining_ttl(&self, key: &str) -> Result<Option<Duration>, StoreError> {
        let ttl = self.redis_client.ttl(key).await?;
        Ok(ttl.map(|secs| Duration::from_secs(secs.unsigned_abs())))
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.redis_client.delete(key).await?;
        Ok(())
    }
}
