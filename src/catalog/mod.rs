//! Catalog Module
//!
//! The product data the service serves and mutates: model types, the
//! in-process repository acting as the downstream producer behind the
//! cache, and startup seed generation.

mod product;
mod repository;
mod seed;

// Re-export public types
pub use product::{CategoryInfo, PriceCategory, Product, ProductView};
pub use repository::{
    CatalogQuery, NewProduct, Pagination, ProductCatalog, ProductChanges, ProductPage, SortField,
    SortOrder,
};
pub use seed::generate_products;
