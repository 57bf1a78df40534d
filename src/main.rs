//! Catalog Cache - a product catalog service with a read-through response cache
//!
//! Read endpoints are served cache-aside from a pluggable key-value store;
//! mutations invalidate the affected cache families by prefix.

mod api;
mod cache;
mod catalog;
mod config;
mod error;
mod models;
mod store;
mod tasks;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api::{create_router, AppState};
use catalog::{generate_products, ProductCatalog};
use config::{CacheBackend, Config};
use store::{KeyValueStore, MemoryStore, RedisStore};
use tasks::spawn_cleanup_task;

/// Main entry point for the catalog cache server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Open the configured store client (Redis or in-process)
/// 4. Seed the catalog
/// 5. Start the background TTL sweep (memory backend only)
/// 6. Create Axum router with all endpoints
/// 7. Start HTTP server on configured port
/// 8. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "catalog_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Catalog Cache Server");

    // Load configuration from environment variables
    let config = Config::from_env();
    info!(
        "Configuration loaded: backend={:?}, port={}, store_timeout={}ms, seed_products={}",
        config.backend, config.server_port, config.store_timeout_ms, config.seed_products
    );

    // Open the store client once; everything downstream gets it injected
    let mut cleanup_handle = None;
    let kv_store: Arc<dyn KeyValueStore> = match config.backend {
        CacheBackend::Redis => {
            let redis = RedisStore::connect(&config.redis_url)
                .await
                .with_context(|| format!("connecting to Redis at {}", config.redis_url))?;
            Arc::new(redis)
        }
        CacheBackend::Memory => {
            let memory = Arc::new(MemoryStore::new());
            cleanup_handle = Some(spawn_cleanup_task(memory.clone(), config.cleanup_interval));
            info!("Background cleanup task started");
            memory
        }
    };

    // Seed the in-process catalog
    let product_catalog = ProductCatalog::new();
    let seeded = product_catalog
        .insert_many(generate_products(config.seed_products))
        .await;
    info!("Catalog seeded with {} products", seeded);

    // Create application state with the injected store client
    let state = AppState::from_config(&config, kv_store, product_catalog);

    // Create router with all endpoints
    let app = create_router(state);

    // Bind to configured port
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding to {}", addr))?;
    info!("Server listening on http://{}", addr);

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cleanup_handle))
        .await
        .context("serving HTTP")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the cleanup task (if one is running) and
/// allows graceful shutdown.
async fn shutdown_signal(cleanup_handle: Option<tokio::task::JoinHandle<()>>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    if let Some(handle) = cleanup_handle {
        handle.abort();
        warn!("Cleanup task aborted");
    }
}
