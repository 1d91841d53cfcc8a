//! In-process expiring store for development and tests

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tracing::debug;

use crate::errors::StoreError;

use super::traits::{Clock, ExpiringStore};

/// Wall-clock time from the OS monotonic clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to
#[derive(Debug)]
pub struct ManualClock {
    origin: Instant,
    elapsed: Mutex<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            elapsed: Mutex::new(Duration::ZERO),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut elapsed = self.elapsed.lock().unwrap_or_else(|e| e.into_inner());
        *elapsed += by;
    }

    pub fn elapsed(&self) -> Duration {
        *self.elapsed.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.elapsed()
    }
}

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Instant,
}

/// `HashMap`-backed [`ExpiringStore`] with lazily enforced expiry
///
/// An entry is gone once the clock reaches its deadline. Expired entries are
/// dropped when read and swept on every write. Remaining TTLs are reported at
/// full precision.
pub struct InMemoryStore {
    entries: Mutex<HashMap<String, Entry>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            clock,
        }
    }

    /// Number of entries held, expired ones included until pruned
    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, Entry>>, StoreError> {
        self.entries.lock().map_err(|_| StoreError::Operation {
            message: "in-memory store lock poisoned".to_string(),
        })
    }

    /// Live entry for `key`, pruning it if expired
    fn live_entry(
        entries: &mut HashMap<String, Entry>,
        key: &str,
        now: Instant,
    ) -> Option<Entry> {
        let entry = entries.get(key)?;
        if entry.expires_at > now {
            return Some(entry.clone());
        }

        debug!("Key '{}' expired, pruning", key);
        entries.remove(key);
        None
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ExpiringStore for InMemoryStore {
    async fn set_with_expiry(&self, key: &str, value: &str, ttl: Duration) -> Result<(), StoreError> {
        let now = self.clock.now();
        let expires_at = now.checked_add(ttl).ok_or_else(|| StoreError::Operation {
            message: format!("expiry {:?} is out of range", ttl),
        })?;

        let mut entries = self.lock()?;
        entries.retain(|_, entry| entry.expires_at > now);
        entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at,
            },
        );
        debug!("Set key '{}' with expiry {:?}", key, ttl);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let now = self.clock.now();
        let mut entries = self.lock()?;
        Ok(Self::live_entry(&mut entries, key, now).map(|entry| entry.value))
    }

    async fn remaining_ttl(&self, key: &str) -> Result<Option<Duration>, StoreError> {
        let now = self.clock.now();
        let mut entries = self.lock()?;
        Ok(Self::live_entry(&mut entries, key, now).map(|entry| entry.expires_at - now))
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        if self.lock()?.remove(key).is_some() {
            debug!("Deleted key '{}'", key);
        }
        Ok(())
    }
}
