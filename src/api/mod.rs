//! API Module
//!
//! HTTP handlers and routing for the catalog REST API.
//!
//! # Endpoints
//! - `GET /products` - Enriched product listing (cached)
//! - `GET /products/paginated` - Filtered, sorted page (cached)
//! - `GET /products/:id` - Single product (cached)
//! - `POST /products` - Create a product (invalidates cache)
//! - `PUT /products/:id` - Update a product (invalidates cache)
//! - `DELETE /products/:id` - Delete a product (invalidates cache)
//! - `GET /debug/cache` - Cache diagnostic listing
//! - `GET /stats` - Cache counters
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
