//! Response DTOs for the catalog API
//!
//! Defines the structure of outgoing HTTP response bodies for the
//! operational endpoints; product payloads are served straight from the
//! catalog types.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::cache::{EntryInfo, StatsSnapshot};

/// Response body for DELETE /products/:id
#[derive(Debug, Clone, Serialize)]
pub struct DeleteProductResponse {
    /// Success message
    pub message: String,
    /// The id that was deleted
    pub id: u64,
}

impl DeleteProductResponse {
    pub fn new(id: u64) -> Self {
        Self {
            message: format!("Product {} deleted successfully", id),
            id,
        }
    }
}

/// One entry in the cache diagnostic listing
#[derive(Debug, Clone, Serialize)]
pub struct CacheEntrySummary {
    /// Cached payload decoded as JSON, or null if it does not decode
    pub value: Value,
    /// Remaining TTL in seconds (-1 = no expiry)
    pub ttl: i64,
    /// Payload size in bytes
    pub size: usize,
}

/// Response body for the diagnostic endpoint (GET /debug/cache)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheDebugResponse {
    /// Number of cached keys
    pub total_keys: usize,
    /// Every cached key
    pub keys: Vec<String>,
    /// Per-key value, TTL and size
    pub cache_data: BTreeMap<String, CacheEntrySummary>,
}

impl CacheDebugResponse {
    /// Builds the listing from the entry store's diagnostic enumeration.
    pub fn from_entries(entries: Vec<EntryInfo>) -> Self {
        let keys: Vec<String> = entries.iter().map(|e| e.key.clone()).collect();
        let cache_data = entries
            .into_iter()
            .map(|entry| {
                let value = serde_json::from_slice(&entry.payload).unwrap_or(Value::Null);
                (
                    entry.key,
                    CacheEntrySummary {
                        value,
                        ttl: entry.ttl_seconds,
                        size: entry.size_bytes,
                    },
                )
            })
            .collect();

        Self {
            total_keys: keys.len(),
            keys,
            cache_data,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Reads served from the cache
    pub hits: u64,
    /// Reads that fell through to the catalog
    pub misses: u64,
    /// Successful cache populations
    pub writes: u64,
    /// Populations skipped because the store write failed
    pub write_failures: u64,
    /// Invalidation calls issued by mutations
    pub invalidations: u64,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<StatsSnapshot> for StatsResponse {
    fn from(snapshot: StatsSnapshot) -> Self {
        Self {
            hits: snapshot.hits,
            misses: snapshot.misses,
            writes: snapshot.writes,
            write_failures: snapshot.write_failures,
            invalidations: snapshot.invalidations,
            hit_rate: snapshot.hit_rate,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
