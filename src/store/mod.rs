//! Key-Value Store Clients
//!
//! Backends implementing the wire contract the response cache is built on:
//! get, set-with-expiry, key enumeration by glob pattern, bulk delete and
//! TTL inspection. Redis is the production backend; the in-process memory
//! store serves tests and Redis-less development.

mod memory;
mod redis;

pub use memory::MemoryStore;
pub use redis::RedisStore;

use async_trait::async_trait;
use thiserror::Error;

// == Store Error Enum ==
/// Errors surfaced by key-value store backends.
///
/// Every variant is transient from the caller's point of view: the cache
/// layer treats all of them as "the store is unavailable right now" and
/// falls back to the downstream producer.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Redis connection or protocol error
    #[error("store connection error: {0}")]
    Connection(#[from] ::redis::RedisError),

    /// Backend cannot be reached
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Operation exceeded the configured deadline
    #[error("store operation timed out")]
    Timeout,
}

// == Key TTL ==
/// Remaining lifetime of a key, as reported by the backend.
///
/// Lifts Redis's TTL sentinel convention (-2 = missing, -1 = no expiry,
/// n = seconds remaining) into a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyTtl {
    /// Key does not exist
    Missing,
    /// Key exists but carries no expiry
    NoExpiry,
    /// Key expires in this many seconds
    Remaining(u64),
}

impl KeyTtl {
    /// Converts back to the Redis sentinel convention for wire responses.
    pub fn as_seconds(&self) -> i64 {
        match self {
            KeyTtl::Missing => -2,
            KeyTtl::NoExpiry => -1,
            KeyTtl::Remaining(secs) => *secs as i64,
        }
    }

    fn from_sentinel(raw: i64) -> Self {
        match raw {
            -2 => KeyTtl::Missing,
            -1 => KeyTtl::NoExpiry,
            secs => KeyTtl::Remaining(secs.max(0) as u64),
        }
    }
}

// == Key-Value Store Trait ==
/// Contract every cache backend implements.
///
/// Payloads are opaque bytes; keys are strings; patterns are globs where
/// `*` matches any run of characters.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Fetches a value. Missing keys are `None`, never an error.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Stores a value, unconditionally replacing any existing one, with
    /// expiry `ttl_seconds` from now.
    async fn set_ex(&self, key: &str, value: &[u8], ttl_seconds: u64) -> Result<(), StoreError>;

    /// Enumerates all keys matching the glob pattern.
    async fn keys(&self, pattern: &str) -> Result<Vec<String>, StoreError>;

    /// Deletes the given keys, returning how many existed.
    async fn delete(&self, keys: &[String]) -> Result<u64, StoreError>;

    /// Reports the remaining lifetime of a key.
    async fn ttl(&self, key: &str) -> Result<KeyTtl, StoreError>;

    /// Deletes every key matching the glob pattern, returning the count.
    ///
    /// Backend-owned so that implementations with incremental scanning
    /// (Redis SCAN) never materialize the whole key space.
    async fn delete_matching(&self, pattern: &str) -> Result<u64, StoreError>;
}

// == Glob Matching ==
/// Matches a key against a glob pattern where `*` matches any run of
/// characters and every other character matches literally.
pub(crate) fn glob_match(pattern: &str, key: &str) -> bool {
    let p: Vec<char> = pattern.chars().collect();
    let k: Vec<char> = key.chars().collect();

    let (mut pi, mut ki) = (0usize, 0usize);
    let mut backtrack: Option<(usize, usize)> = None;

    while ki < k.len() {
        if pi < p.len() && p[pi] == '*' {
            // Tentatively match zero characters; remember where to resume
            backtrack = Some((pi, ki));
            pi += 1;
        } else if pi < p.len() && p[pi] == k[ki] {
            pi += 1;
            ki += 1;
        } else if let Some((star_pi, star_ki)) = backtrack {
            // Extend the last `*` by one more character
            backtrack = Some((star_pi, star_ki + 1));
            pi = star_pi + 1;
            ki = star_ki + 1;
        } else {
            return false;
        }
    }

    // Trailing stars match the empty suffix
    while pi < p.len() && p[pi] == '*' {
        pi += 1;
    }
    pi == p.len()
}
