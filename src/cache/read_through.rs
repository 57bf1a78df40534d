//! Read-Through Interceptor
//!
//! Wraps a downstream producer behind the cache: serve the stored response
//! on a hit, otherwise invoke the producer, populate the cache best-effort,
//! and hand the produced value back. The cache is never allowed to fail a
//! request: store outages degrade to recomputing, and a failed population
//! degrades to "this response simply is not cached this time".

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::cache::{CacheEntryStore, CacheKey, CacheStats};

// == Response Cache ==
/// Read-through facade handed to the request handlers.
#[derive(Clone)]
pub struct ResponseCache {
    entries: CacheEntryStore,
    stats: Arc<CacheStats>,
}

impl ResponseCache {
    pub fn new(entries: CacheEntryStore, stats: Arc<CacheStats>) -> Self {
        Self { entries, stats }
    }

    /// The entry store, for the diagnostic surface.
    pub fn entries(&self) -> &CacheEntryStore {
        &self.entries
    }

    /// Current counter values.
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Serves `key` from the cache, or produces and caches the response.
    ///
    /// Behavior per step:
    /// 1. Store lookup. An unreachable store or a timeout is treated as a
    ///    miss (fail-open) rather than surfaced to the caller.
    /// 2. On a hit, the stored payload is returned without invoking
    ///    `produce`. A payload that no longer decodes is discarded as a
    ///    miss and recomputed.
    /// 3. On a miss, `produce` runs; its error propagates unchanged and
    ///    nothing is cached.
    /// 4. A produced value is written back with `ttl_seconds`; a failed
    ///    write is logged and the value returned anyway.
    ///
    /// Concurrent misses on the same key each invoke `produce` and race
    /// their writes, last one wins. All of them computed the same answer
    /// at nearly the same time, so no cross-request coordination is done;
    /// the cost is a thundering herd against the producer on a popular
    /// cold key.
    pub async fn read_through<T, E, F, Fut>(
        &self,
        key: &CacheKey,
        ttl_seconds: u64,
        produce: F,
    ) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let started = Instant::now();
        debug!(key = %key, "checking cache");

        match self.entries.get(key).await {
            Ok(Some(payload)) => match serde_json::from_slice::<T>(&payload) {
                Ok(value) => {
                    self.stats.record_hit();
                    info!(
                        key = %key,
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "cache hit"
                    );
                    return Ok(value);
                }
                Err(err) => {
                    warn!(key = %key, error = %err, "stored entry is unreadable, recomputing");
                }
            },
            Ok(None) => {}
            Err(err) => {
                warn!(key = %key, error = %err, "cache read failed, falling back to producer");
            }
        }

        self.stats.record_miss();
        info!(key = %key, "cache miss, invoking producer");

        let value = produce().await?;

        match serde_json::to_vec(&value) {
            Ok(payload) => match self.entries.put(key, &payload, ttl_seconds).await {
                Ok(()) => {
                    self.stats.record_write();
                    info!(
                        key = %key,
                        ttl_seconds,
                        size_bytes = payload.len(),
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "cache miss populated"
                    );
                }
                Err(err) => {
                    self.stats.record_write_failure();
                    warn!(key = %key, error = %err, "cache write failed, response not cached");
                }
            },
            Err(err) => {
                self.stats.record_write_failure();
                warn!(key = %key, error = %err, "response not serializable, not cached");
            }
        }

        Ok(value)
    }
}
