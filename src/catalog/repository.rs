//! Product Catalog
//!
//! In-process repository standing in for the persistent store. The cache
//! layer treats these queries as an opaque producer; their enrichment and
//! pagination semantics mirror the public API contract.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use super::product::{CategoryInfo, PriceCategory, Product, ProductView};

// == New Product ==
/// Attributes of a product to be inserted.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub category: String,
}

// == Product Changes ==
/// Partial update applied to an existing product.
#[derive(Debug, Clone, Default)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
}

// == Sorting ==
/// Fields a paginated query can sort by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Name,
    Price,
    CreatedAt,
}

impl SortField {
    /// Parses the query-string form; unknown fields fall back to name.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "price" => SortField::Price,
            "createdAt" => SortField::CreatedAt,
            _ => SortField::Name,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::Price => "price",
            SortField::CreatedAt => "createdAt",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// Parses the query-string form; anything but "desc" is ascending.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "desc" => SortOrder::Desc,
            _ => SortOrder::Asc,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

// == Catalog Query ==
/// Normalized paginated query with every default applied.
#[derive(Debug, Clone)]
pub struct CatalogQuery {
    pub page: usize,
    pub limit: usize,
    pub search: String,
    pub sort: SortField,
    pub order: SortOrder,
}

// == Pagination Envelope ==
/// Page bookkeeping returned alongside the results.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub items_per_page: usize,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

/// One page of enriched products.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ProductPage {
    pub products: Vec<ProductView>,
    pub pagination: Pagination,
}

// == Product Catalog ==
/// Shared in-process product repository.
#[derive(Clone, Default)]
pub struct ProductCatalog {
    inner: Arc<RwLock<CatalogInner>>,
}

#[derive(Default)]
struct CatalogInner {
    products: Vec<Product>,
    next_id: u64,
}

impl ProductCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a batch of products, returning how many were added.
    pub async fn insert_many(&self, batch: Vec<NewProduct>) -> usize {
        let mut inner = self.inner.write().await;
        let count = batch.len();
        for new in batch {
            let product = inner.materialize(new);
            inner.products.push(product);
        }
        count
    }

    /// Number of products currently in the catalog.
    pub async fn len(&self) -> usize {
        self.inner.read().await.products.len()
    }

    /// Full enriched listing: price-with-tax descending, then name length
    /// ascending.
    pub async fn list_enriched(&self) -> Vec<ProductView> {
        let inner = self.inner.read().await;
        let mut views = enrich(&inner.products);
        views.sort_by(|a, b| {
            b.price_with_tax
                .total_cmp(&a.price_with_tax)
                .then_with(|| a.name_length.cmp(&b.name_length))
        });
        views
    }

    /// Filtered, sorted, paginated listing with its envelope.
    pub async fn paginated(&self, query: &CatalogQuery) -> ProductPage {
        let inner = self.inner.read().await;

        let needle = query.search.to_lowercase();
        let filtered: Vec<Product> = inner
            .products
            .iter()
            .filter(|p| needle.is_empty() || p.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();

        let mut views = enrich(&filtered);
        views.sort_by(|a, b| {
            let ordering = match query.sort {
                SortField::Name => a.name.cmp(&b.name),
                SortField::Price => a.price.total_cmp(&b.price),
                SortField::CreatedAt => a.created_at.cmp(&b.created_at),
            };
            match query.order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });

        let total_items = views.len();
        let limit = query.limit.max(1);
        let total_pages = total_items.div_ceil(limit);
        let page = query.page.max(1);
        let skip = (page - 1) * limit;

        let products: Vec<ProductView> = views.into_iter().skip(skip).take(limit).collect();

        ProductPage {
            products,
            pagination: Pagination {
                current_page: page,
                total_pages,
                total_items,
                items_per_page: limit,
                has_next_page: page < total_pages,
                has_prev_page: page > 1,
            },
        }
    }

    /// Looks up a single product by id.
    pub async fn find(&self, id: u64) -> Option<Product> {
        let inner = self.inner.read().await;
        inner.products.iter().find(|p| p.id == id).cloned()
    }

    /// Inserts one product and returns it with its assigned id.
    pub async fn create(&self, new: NewProduct) -> Product {
        let mut inner = self.inner.write().await;
        let product = inner.materialize(new);
        inner.products.push(product.clone());
        product
    }

    /// Applies a partial update, returning the updated product if it exists.
    pub async fn update(&self, id: u64, changes: ProductChanges) -> Option<Product> {
        let mut inner = self.inner.write().await;
        let product = inner.products.iter_mut().find(|p| p.id == id)?;

        if let Some(name) = changes.name {
            product.name = name;
        }
        if let Some(price) = changes.price {
            product.price = price;
        }
        if let Some(category) = changes.category {
            product.category = category;
        }
        product.updated_at = Utc::now();

        Some(product.clone())
    }

    /// Removes a product, reporting whether it existed.
    pub async fn delete(&self, id: u64) -> bool {
        let mut inner = self.inner.write().await;
        let before = inner.products.len();
        inner.products.retain(|p| p.id != id);
        inner.products.len() < before
    }
}

impl CatalogInner {
    fn materialize(&mut self, new: NewProduct) -> Product {
        self.next_id += 1;
        let now = Utc::now();
        Product {
            id: self.next_id,
            name: new.name,
            price: new.price,
            category: new.category,
            created_at: now,
            updated_at: now,
        }
    }
}

// == Enrichment ==
/// Projects products into views, with aggregate stats grouped by price band.
fn enrich(products: &[Product]) -> Vec<ProductView> {
    let mut sums: HashMap<PriceCategory, (f64, usize)> = HashMap::new();
    for product in products {
        let entry = sums
            .entry(PriceCategory::for_price(product.price))
            .or_insert((0.0, 0));
        entry.0 += product.price;
        entry.1 += 1;
    }

    products
        .iter()
        .map(|product| {
            let band = PriceCategory::for_price(product.price);
            let (sum, count) = sums[&band];
            ProductView::project(
                product,
                CategoryInfo {
                    category: band,
                    avg_price: sum / count as f64,
                    category_count: count,
                },
            )
        })
        .collect()
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn new_product(name: &str, price: f64) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            price,
            category: "Electronics".to_string(),
        }
    }

    async fn seeded_catalog() -> ProductCatalog {
        let catalog = ProductCatalog::new();
        catalog
            .insert_many(vec![
                new_product("Basic Pen", 5.0),
                new_product("Smart Watch", 45.0),
                new_product("Premium Laptop", 95.0),
                new_product("Deluxe Camera", 450.0),
            ])
            .await;
        catalog
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let catalog = ProductCatalog::new();
        let first = catalog.create(new_product("Pen", 2.0)).await;
        let second = catalog.create(new_product("Cup", 3.0)).await;

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(catalog.len().await, 2);
    }

    #[tokio::test]
    async fn test_list_enriched_sorts_by_taxed_price_desc() {
        let catalog = seeded_catalog().await;
        let views = catalog.list_enriched().await;

        assert_eq!(views.len(), 4);
        assert_eq!(views[0].name, "Deluxe Camera");
        assert_eq!(views[3].name, "Basic Pen");
        for pair in views.windows(2) {
            assert!(pair[0].price_with_tax >= pair[1].price_with_tax);
        }
    }

    #[tokio::test]
    async fn test_enrichment_groups_by_price_band() {
        let catalog = ProductCatalog::new();
        catalog
            .insert_many(vec![
                new_product("Cheap Pen", 4.0),
                new_product("Cheaper Pen", 6.0),
                new_product("Premium Desk", 80.0),
            ])
            .await;

        let views = catalog.list_enriched().await;
        let pen = views.iter().find(|v| v.name == "Cheap Pen").unwrap();

        assert_eq!(pen.category_info.category, PriceCategory::Budget);
        assert_eq!(pen.category_info.category_count, 2);
        assert!((pen.category_info.avg_price - 5.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_paginated_search_is_case_insensitive() {
        let catalog = seeded_catalog().await;
        let page = catalog
            .paginated(&CatalogQuery {
                page: 1,
                limit: 15,
                search: "pReMiUm".to_string(),
                sort: SortField::Name,
                order: SortOrder::Asc,
            })
            .await;

        assert_eq!(page.pagination.total_items, 1);
        assert_eq!(page.products[0].name, "Premium Laptop");
    }

    #[tokio::test]
    async fn test_paginated_envelope_math() {
        let catalog = seeded_catalog().await;
        let page = catalog
            .paginated(&CatalogQuery {
                page: 2,
                limit: 3,
                search: String::new(),
                sort: SortField::Price,
                order: SortOrder::Asc,
            })
            .await;

        assert_eq!(page.pagination.current_page, 2);
        assert_eq!(page.pagination.total_pages, 2);
        assert_eq!(page.pagination.total_items, 4);
        assert_eq!(page.pagination.items_per_page, 3);
        assert!(!page.pagination.has_next_page);
        assert!(page.pagination.has_prev_page);
        // Page 2 of an ascending price sort holds the most expensive item
        assert_eq!(page.products.len(), 1);
        assert_eq!(page.products[0].name, "Deluxe Camera");
    }

    #[tokio::test]
    async fn test_paginated_sort_desc() {
        let catalog = seeded_catalog().await;
        let page = catalog
            .paginated(&CatalogQuery {
                page: 1,
                limit: 15,
                search: String::new(),
                sort: SortField::Price,
                order: SortOrder::Desc,
            })
            .await;

        assert_eq!(page.products[0].name, "Deluxe Camera");
        assert_eq!(page.products[3].name, "Basic Pen");
    }

    #[tokio::test]
    async fn test_update_changes_only_given_fields() {
        let catalog = seeded_catalog().await;
        let updated = catalog
            .update(
                1,
                ProductChanges {
                    price: Some(7.5),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Basic Pen");
        assert!((updated.price - 7.5).abs() < 1e-9);
        assert!(updated.updated_at >= updated.created_at);
    }

    #[tokio::test]
    async fn test_update_missing_product_is_none() {
        let catalog = seeded_catalog().await;
        assert!(catalog.update(999, ProductChanges::default()).await.is_none());
    }

    #[tokio::test]
    async fn test_delete_reports_existence() {
        let catalog = seeded_catalog().await;
        assert!(catalog.delete(2).await);
        assert!(!catalog.delete(2).await);
        assert_eq!(catalog.len().await, 3);
        assert!(catalog.find(2).await.is_none());
    }

    #[test]
    fn test_sort_field_parsing() {
        assert_eq!(SortField::parse("price"), SortField::Price);
        assert_eq!(SortField::parse("createdAt"), SortField::CreatedAt);
        assert_eq!(SortField::parse("name"), SortField::Name);
        assert_eq!(SortField::parse("bogus"), SortField::Name);
        assert_eq!(SortOrder::parse("desc"), SortOrder::Desc);
        assert_eq!(SortOrder::parse("asc"), SortOrder::Asc);
        assert_eq!(SortOrder::parse("sideways"), SortOrder::Asc);
    }
}
