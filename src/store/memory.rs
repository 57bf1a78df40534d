//! In-Process Store Backend
//!
//! HashMap-backed implementation of the key-value store contract with
//! absolute-expiry bookkeeping. Used by the test suite and as the default
//! backend when no Redis is configured. Expired entries are dropped lazily
//! on read and swept by the background cleanup task.

use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{glob_match, KeyTtl, KeyValueStore, StoreError};

// == Stored Entry ==
/// A single stored value with its expiry metadata.
#[derive(Debug, Clone)]
struct StoredEntry {
    /// Opaque payload bytes
    payload: Vec<u8>,
    /// Expiration timestamp (Unix milliseconds)
    expires_at: u64,
}

impl StoredEntry {
    fn new(payload: Vec<u8>, ttl_seconds: u64) -> Self {
        Self {
            payload,
            expires_at: current_timestamp_ms() + ttl_seconds * 1000,
        }
    }

    /// An entry is expired once the current time reaches its expiry.
    fn is_expired(&self) -> bool {
        current_timestamp_ms() >= self.expires_at
    }

    fn ttl_remaining_secs(&self) -> u64 {
        let now = current_timestamp_ms();
        if self.expires_at > now {
            (self.expires_at - now) / 1000
        } else {
            0
        }
    }
}

/// Returns current Unix timestamp in milliseconds.
fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64
}

// == Memory Store ==
/// In-process key-value store with per-entry TTL.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, StoredEntry>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes all expired entries, returning how many were dropped.
    ///
    /// Called periodically by the background cleanup task; Redis does the
    /// equivalent server-side.
    pub async fn purge_expired(&self) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired());
        before - entries.len()
    }

    /// Current number of live (non-purged) entries.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let mut entries = self.entries.write().await;
        match entries.get(key) {
            Some(entry) if entry.is_expired() => {
                entries.remove(key);
                Ok(None)
            }
            Some(entry) => Ok(Some(entry.payload.clone())),
            None => Ok(None),
        }
    }

    async fn set_ex(&self, key: &str, value: &[u8], ttl_seconds: u64) -> Result<(), StoreError> {
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), StoredEntry::new(value.to_vec(), ttl_seconds));
        Ok(())
    }

    async fn keys(&self, pattern: &str) -> Result<Vec<String>, StoreError> {
        let entries = self.entries.read().await;
        let mut matching: Vec<String> = entries
            .iter()
            .filter(|(key, entry)| !entry.is_expired() && glob_match(pattern, key))
            .map(|(key, _)| key.clone())
            .collect();
        matching.sort();
        Ok(matching)
    }

    async fn delete(&self, keys: &[String]) -> Result<u64, StoreError> {
        let mut entries = self.entries.write().await;
        let mut removed = 0;
        for key in keys {
            if entries.remove(key).is_some() {
                removed += 1;
            }
        }
        Ok(removed)
    }

    async fn ttl(&self, key: &str) -> Result<KeyTtl, StoreError> {
        let entries = self.entries.read().await;
        match entries.get(key) {
            Some(entry) if entry.is_expired() => Ok(KeyTtl::Missing),
            Some(entry) => Ok(KeyTtl::Remaining(entry.ttl_remaining_secs())),
            None => Ok(KeyTtl::Missing),
        }
    }

    async fn delete_matching(&self, pattern: &str) -> Result<u64, StoreError> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|key, _| !glob_match(pattern, key));
        Ok((before - entries.len()) as u64)
    }
}
