//! Catalog Cache - a product catalog service with a read-through response cache
//!
//! Read endpoints are served cache-aside from a pluggable key-value store;
//! mutations invalidate the affected cache families by prefix.

pub mod api;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use tasks::spawn_cleanup_task;
