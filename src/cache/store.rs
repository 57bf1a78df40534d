//! Cache Entry Store
//!
//! Typed wrapper over the key-value store: every operation is bounded by a
//! short deadline, and a deadline overrun is reported as its own error so
//! callers can treat it exactly like an unreachable store.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::cache::CacheKey;
use crate::store::{KeyTtl, KeyValueStore, StoreError};

// == Entry Info ==
/// Diagnostic view of one stored entry.
#[derive(Debug, Clone)]
pub struct EntryInfo {
    pub key: String,
    pub payload: Vec<u8>,
    /// Remaining TTL in the Redis sentinel convention (-1 = no expiry)
    pub ttl_seconds: i64,
    pub size_bytes: usize,
}

// == Cache Entry Store ==
/// Deadline-bounded entry operations over an injected store client.
#[derive(Clone)]
pub struct CacheEntryStore {
    store: Arc<dyn KeyValueStore>,
    op_timeout: Duration,
}

impl CacheEntryStore {
    /// Wraps a store client with the given per-operation deadline.
    pub fn new(store: Arc<dyn KeyValueStore>, op_timeout: Duration) -> Self {
        Self { store, op_timeout }
    }

    /// Runs one store operation under the configured deadline.
    async fn bounded<T, F>(&self, op: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        tokio::time::timeout(self.op_timeout, op)
            .await
            .map_err(|_| StoreError::Timeout)?
    }

    /// Fetches the payload for a key; absent and expired entries are `None`.
    pub async fn get(&self, key: &CacheKey) -> Result<Option<Vec<u8>>, StoreError> {
        self.bounded(self.store.get(key.as_str())).await
    }

    /// Stores a payload, replacing any existing entry and resetting its TTL.
    pub async fn put(
        &self,
        key: &CacheKey,
        payload: &[u8],
        ttl_seconds: u64,
    ) -> Result<(), StoreError> {
        self.bounded(self.store.set_ex(key.as_str(), payload, ttl_seconds))
            .await
    }

    /// Deletes every entry matching the glob pattern, returning the count.
    pub async fn delete_matching(&self, pattern: &str) -> Result<u64, StoreError> {
        self.bounded(self.store.delete_matching(pattern)).await
    }

    /// Enumerates every entry with its payload, remaining TTL and size.
    ///
    /// O(n) in the total key count; meant for the diagnostic surface, not
    /// for any request path. Keys that vanish between enumeration and
    /// fetch are skipped.
    pub async fn list_all(&self) -> Result<Vec<EntryInfo>, StoreError> {
        let keys = self.bounded(self.store.keys("*")).await?;

        let mut entries = Vec::with_capacity(keys.len());
        for key in keys {
            let payload = match self.bounded(self.store.get(&key)).await? {
                Some(payload) => payload,
                None => continue,
            };
            let ttl = self.bounded(self.store.ttl(&key)).await?;
            if ttl == KeyTtl::Missing {
                continue;
            }

            let size_bytes = payload.len();
            entries.push(EntryInfo {
                key,
                payload,
                ttl_seconds: ttl.as_seconds(),
                size_bytes,
            });
        }

        Ok(entries)
    }
}
