//! API Handlers
//!
//! HTTP request handlers for the catalog endpoints. Read handlers go
//! through the response cache; mutating handlers write to the catalog and
//! then invalidate the affected cache family before responding.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::{debug, info};

use crate::cache::{CacheEntryStore, CacheKey, CacheStats, Invalidator, ResponseCache};
use crate::catalog::{Product, ProductCatalog, ProductPage, ProductView};
use crate::error::{ApiError, Result};
use crate::models::{
    CacheDebugResponse, CreateProductRequest, DeleteProductResponse, HealthResponse,
    PaginationParams, StatsResponse, UpdateProductRequest,
};
use crate::store::KeyValueStore;

// == Cache Families ==
// Resource prefixes and TTLs per cached view. The collection views share
// the "products" prefix so one invalidation clears them together; the
// single-item view sits under "product", whose glob also reaches the
// collection keys when an existing item changes.
pub const PRODUCTS_PREFIX: &str = "products";
pub const PRODUCTS_PAGINATED_PREFIX: &str = "products_paginated";
pub const PRODUCT_PREFIX: &str = "product";

const PRODUCTS_TTL: u64 = 600;
const PAGINATED_TTL: u64 = 300;
const PRODUCT_TTL: u64 = 300;

// == App State ==
/// Application state shared across all handlers.
///
/// Every collaborator is constructed at startup and injected; nothing in
/// here reaches for a global connection handle.
#[derive(Clone)]
pub struct AppState {
    /// Read-through response cache
    pub cache: ResponseCache,
    /// Prefix invalidation for mutations
    pub invalidator: Invalidator,
    /// The product data behind the cache
    pub catalog: ProductCatalog,
}

impl AppState {
    /// Wires the cache components over an injected store client.
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        op_timeout: Duration,
        catalog: ProductCatalog,
    ) -> Self {
        let stats = Arc::new(CacheStats::new());
        let entries = CacheEntryStore::new(store, op_timeout);
        Self {
            cache: ResponseCache::new(entries.clone(), stats.clone()),
            invalidator: Invalidator::new(entries, stats),
            catalog,
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(
        config: &crate::config::Config,
        store: Arc<dyn KeyValueStore>,
        catalog: ProductCatalog,
    ) -> Self {
        Self::new(
            store,
            Duration::from_millis(config.store_timeout_ms),
            catalog,
        )
    }
}

/// Handler for GET /products
///
/// Full enriched listing, cached for 10 minutes.
pub async fn list_products_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductView>>> {
    let key = CacheKey::build(PRODUCTS_PREFIX, &[]);
    let catalog = state.catalog.clone();

    let views = state
        .cache
        .read_through(&key, PRODUCTS_TTL, || async move {
            debug!("querying catalog for all products");
            Ok::<_, ApiError>(catalog.list_enriched().await)
        })
        .await?;

    Ok(Json(views))
}

/// Handler for GET /products/paginated
///
/// Filtered, sorted page of products. The cache key is built from the
/// normalized parameters, so requests that differ only in query order or
/// omitted defaults share an entry.
pub async fn paginated_products_handler(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ProductPage>> {
    let query = params.normalize();
    let key = CacheKey::build(
        PRODUCTS_PAGINATED_PREFIX,
        &[
            ("page", query.page.to_string()),
            ("limit", query.limit.to_string()),
            ("search", query.search.clone()),
            ("sort", query.sort.as_str().to_string()),
            ("order", query.order.as_str().to_string()),
        ],
    );

    let catalog = state.catalog.clone();
    let producer_query = query.clone();
    let page = state
        .cache
        .read_through(&key, PAGINATED_TTL, || async move {
            debug!(page = producer_query.page, limit = producer_query.limit, "querying catalog for paginated products");
            Ok::<_, ApiError>(catalog.paginated(&producer_query).await)
        })
        .await?;

    Ok(Json(page))
}

/// Handler for GET /products/:id
///
/// Single product, cached per id. A missing id propagates as 404 and is
/// never cached.
pub async fn get_product_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Product>> {
    let key = CacheKey::build(PRODUCT_PREFIX, &[("id", id.to_string())]);
    let catalog = state.catalog.clone();

    let product = state
        .cache
        .read_through(&key, PRODUCT_TTL, || async move {
            debug!(id, "querying catalog for product");
            catalog.find(id).await.ok_or(ApiError::NotFound(id))
        })
        .await?;

    Ok(Json(product))
}

/// Handler for POST /products
///
/// Creates a product, then clears the collection views. The write of
/// record happens first; the invalidation completes before the response
/// is returned.
pub async fn create_product_handler(
    State(state): State<AppState>,
    Json(req): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<Product>)> {
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    let product = state.catalog.create(req.into_new_product()).await;
    info!(id = product.id, name = %product.name, "product created");

    state.invalidator.invalidate(PRODUCTS_PREFIX).await;

    Ok((StatusCode::CREATED, Json(product)))
}

/// Handler for PUT /products/:id
///
/// Updates a product, then clears every cached view that could contain
/// it, collection and single-item alike.
pub async fn update_product_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(req): Json<UpdateProductRequest>,
) -> Result<Json<Product>> {
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    let product = state
        .catalog
        .update(id, req.into_changes())
        .await
        .ok_or(ApiError::NotFound(id))?;
    info!(id, "product updated");

    state.invalidator.invalidate(PRODUCT_PREFIX).await;

    Ok(Json(product))
}

/// Handler for DELETE /products/:id
pub async fn delete_product_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<DeleteProductResponse>> {
    if !state.catalog.delete(id).await {
        return Err(ApiError::NotFound(id));
    }
    info!(id, "product deleted");

    state.invalidator.invalidate(PRODUCT_PREFIX).await;

    Ok(Json(DeleteProductResponse::new(id)))
}

/// Handler for GET /debug/cache
///
/// Operational view of every cached entry with value, TTL and size.
pub async fn cache_debug_handler(State(state): State<AppState>) -> Result<Json<CacheDebugResponse>> {
    let entries = state.cache.entries().list_all().await?;
    Ok(Json(CacheDebugResponse::from_entries(entries)))
}

/// Handler for GET /stats
///
/// Returns the read-through and invalidation counters.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.cache.stats().snapshot().into())
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
