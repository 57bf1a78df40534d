//! Request DTOs for the catalog API
//!
//! Defines the structure of incoming HTTP request bodies and query
//! parameters.

use serde::Deserialize;

use crate::catalog::{CatalogQuery, NewProduct, ProductChanges, SortField, SortOrder};

/// Request body for creating a product (POST /products)
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProductRequest {
    /// Product name
    pub name: String,
    /// Unit price
    pub price: f64,
    /// Optional category; defaults to "Misc"
    #[serde(default)]
    pub category: Option<String>,
}

impl CreateProductRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.name.trim().is_empty() {
            return Some("Product name cannot be empty".to_string());
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Some("Product price must be a non-negative number".to_string());
        }
        None
    }

    pub fn into_new_product(self) -> NewProduct {
        NewProduct {
            name: self.name,
            price: self.price,
            category: self.category.unwrap_or_else(|| "Misc".to_string()),
        }
    }
}

/// Request body for updating a product (PUT /products/:id)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProductRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub category: Option<String>,
}

impl UpdateProductRequest {
    /// Validates the request data
    pub fn validate(&self) -> Option<String> {
        if self.name.is_none() && self.price.is_none() && self.category.is_none() {
            return Some("Update must change at least one field".to_string());
        }
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Some("Product name cannot be empty".to_string());
            }
        }
        if let Some(price) = self.price {
            if !price.is_finite() || price < 0.0 {
                return Some("Product price must be a non-negative number".to_string());
            }
        }
        None
    }

    pub fn into_changes(self) -> ProductChanges {
        ProductChanges {
            name: self.name,
            price: self.price,
            category: self.category,
        }
    }
}

/// Query parameters for GET /products/paginated
///
/// Raw, optional form straight from the query string; `normalize` applies
/// the documented defaults so equivalent requests collapse onto one shape.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaginationParams {
    #[serde(default)]
    pub page: Option<usize>,
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub sort: Option<String>,
    #[serde(default)]
    pub order: Option<String>,
}

impl PaginationParams {
    /// Applies defaults: page 1, limit 15, no search, name ascending.
    pub fn normalize(&self) -> CatalogQuery {
        CatalogQuery {
            page: self.page.unwrap_or(1).max(1),
            limit: self.limit.unwrap_or(15).max(1),
            search: self.search.clone().unwrap_or_default(),
            sort: SortField::parse(self.sort.as_deref().unwrap_or("name")),
            order: SortOrder::parse(self.order.as_deref().unwrap_or("asc")),
        }
    }
}
