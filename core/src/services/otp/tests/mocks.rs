//! Mock implementations for testing the OTP manager

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::errors::StoreError;
use crate::services::otp::{ExpiringStore, InMemoryStore, ManualClock, OtpConfig, OtpManager, RandomSource};

/// Random source replaying a fixed sequence of indices (wrapped into range)
pub struct SequenceRandom {
    indices: Vec<usize>,
    position: AtomicUsize,
}

impl SequenceRandom {
    pub fn new(indices: Vec<usize>) -> Self {
        Self {
            indices,
            position: AtomicUsize::new(0),
        }
    }
}

impl RandomSource for SequenceRandom {
    fn uniform_index(&self, upper: usize) -> usize {
        let i = self.position.fetch_add(1, Ordering::SeqCst);
        self.indices[i % self.indices.len()] % upper
    }
}

/// Random source recording every `upper` bound it was asked for
pub struct RecordingRandom {
    pub bounds: Mutex<Vec<usize>>,
}

impl RecordingRandom {
    pub fn new() -> Self {
        Self {
            bounds: Mutex::new(Vec::new()),
        }
    }
}

impl RandomSource for RecordingRandom {
    fn uniform_index(&self, upper: usize) -> usize {
        self.bounds.lock().unwrap().push(upper);
        upper - 1
    }
}

/// Store whose every operation fails
pub struct FailingStore;

#[async_trait]
impl ExpiringStore for FailingStore {
    async fn set_with_expiry(&self, _key: &str, _value: &str, _ttl: Duration) -> Result<(), StoreError> {
        Err(unavailable())
    }

    async fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(unavailable())
    }

    async fn remaining_ttl(&self, _key: &str) -> Result<Option<Duration>, StoreError> {
        Err(unavailable())
    }

    async fn delete(&self, _key: &str) -> Result<(), StoreError> {
        Err(unavailable())
    }
}

fn unavailable() -> StoreError {
    StoreError::Unavailable {
        message: "connection refused".to_string(),
    }
}

/// Store that records the keys it was called with and delegates to memory
pub struct RecordingStore {
    pub inner: InMemoryStore,
    pub keys: Mutex<Vec<String>>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self {
            inner: InMemoryStore::new(),
            keys: Mutex::new(Vec::new()),
        }
    }

    fn record(&self, key: &str) {
        self.keys.lock().unwrap().push(key.to_string());
    }
}

#[async_trait]
impl ExpiringStore for RecordingStore {
    async fn set_with_expiry(&self, key: &str, value: &str, ttl: Duration) -> Result<(), StoreError> {
        self.record(key);
        self.inner.set_with_expiry(key, value, ttl).await
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.record(key);
        self.inner.get(key).await
    }

    async fn remaining_ttl(&self, key: &str) -> Result<Option<Duration>, StoreError> {
        self.record(key);
        self.inner.remaining_ttl(key).await
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.record(key);
        self.inner.delete(key).await
    }
}

/// Manager over an in-memory store driven by a manual clock
pub fn manager_with_clock(config: OtpConfig) -> (OtpManager<InMemoryStore>, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new());
    let store = Arc::new(InMemoryStore::with_clock(clock.clone()));
    let manager = OtpManager::new(store, config).unwrap();
    (manager, clock)
}
