//! Invalidator
//!
//! Clears every cached view of a resource family after a mutation. Called
//! synchronously by the mutating handlers once the write of record has
//! succeeded; a store failure here is logged and swallowed, because the
//! mutation must not be rolled back for the sake of the cache and TTL
//! expiry bounds any staleness left behind.

use std::sync::Arc;

use tracing::{info, warn};

use crate::cache::{CacheEntryStore, CacheStats};

// == Invalidator ==
/// Prefix-scoped bulk deletion of cached responses.
#[derive(Clone)]
pub struct Invalidator {
    entries: CacheEntryStore,
    stats: Arc<CacheStats>,
}

impl Invalidator {
    pub fn new(entries: CacheEntryStore, stats: Arc<CacheStats>) -> Self {
        Self { entries, stats }
    }

    /// Deletes every entry whose key starts with `prefix`.
    ///
    /// Returns how many entries were removed; 0 covers both "nothing was
    /// cached" and "the store was unreachable".
    pub async fn invalidate(&self, prefix: &str) -> u64 {
        self.stats.record_invalidation();
        let pattern = format!("{}*", prefix);

        match self.entries.delete_matching(&pattern).await {
            Ok(0) => {
                info!(pattern = %pattern, "no cache entries to invalidate");
                0
            }
            Ok(removed) => {
                info!(pattern = %pattern, removed, "invalidated cache entries");
                removed
            }
            Err(err) => {
                warn!(
                    pattern = %pattern,
                    error = %err,
                    "cache invalidation failed, relying on TTL expiry"
                );
                0
            }
        }
    }
}
