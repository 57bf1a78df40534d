//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;

/// Which key-value store backend the cache runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheBackend {
    /// In-process store; no external dependency
    Memory,
    /// Redis server at `redis_url`
    Redis,
}

impl CacheBackend {
    /// Parses the env-var form; anything but "redis" is the memory backend.
    fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "redis" => CacheBackend::Redis,
            _ => CacheBackend::Memory,
        }
    }
}

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Store backend the cache runs on
    pub backend: CacheBackend,
    /// Redis connection URL (redis backend only)
    pub redis_url: String,
    /// Per-operation store deadline in milliseconds
    pub store_timeout_ms: u64,
    /// Background cleanup sweep interval in seconds (memory backend only)
    pub cleanup_interval: u64,
    /// Number of products seeded into the catalog at startup
    pub seed_products: usize,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CACHE_BACKEND` - "memory" or "redis" (default: memory)
    /// - `REDIS_URL` - Redis connection URL (default: redis://127.0.0.1:6379)
    /// - `STORE_TIMEOUT_MS` - Store operation deadline (default: 250)
    /// - `CLEANUP_INTERVAL` - Sweep frequency in seconds (default: 1)
    /// - `SEED_PRODUCTS` - Catalog size at startup (default: 100)
    pub fn from_env() -> Self {
        Self {
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            backend: env::var("CACHE_BACKEND")
                .ok()
                .map(|v| CacheBackend::parse(&v))
                .unwrap_or(CacheBackend::Memory),
            redis_url: env::var("REDIS_URL")
                .ok()
                .unwrap_or_else(|| "redis://127.0.0.1:6379".to_string()),
            store_timeout_ms: env::var("STORE_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(250),
            cleanup_interval: env::var("CLEANUP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1),
            seed_products: env::var("SEED_PRODUCTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(100),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            backend: CacheBackend::Memory,
            redis_url: "redis://127.0.0.1:6379".to_string(),
            store_timeout_ms: 250,
            cleanup_interval: 1,
            seed_products: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.backend, CacheBackend::Memory);
        assert_eq!(config.store_timeout_ms, 250);
        assert_eq!(config.cleanup_interval, 1);
        assert_eq!(config.seed_products, 100);
    }

    #[test]
    fn test_backend_parsing() {
        assert_eq!(CacheBackend::parse("redis"), CacheBackend::Redis);
        assert_eq!(CacheBackend::parse("Redis"), CacheBackend::Redis);
        assert_eq!(CacheBackend::parse("memory"), CacheBackend::Memory);
        assert_eq!(CacheBackend::parse("anything"), CacheBackend::Memory);
    }
}
