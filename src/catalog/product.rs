//! Product Model
//!
//! Catalog records and the enriched read view the list endpoints serve.
//! Wire shape is camelCase to match the public API contract.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// == Product ==
/// A catalog record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub price: f64,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// == Price Category ==
/// Price band a product falls into, derived from its price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceCategory {
    Budget,
    #[serde(rename = "Mid-range")]
    MidRange,
    Premium,
    Luxury,
}

impl PriceCategory {
    /// Band boundaries: Budget < 10 <= Mid-range < 50 <= Premium < 100 <= Luxury.
    pub fn for_price(price: f64) -> Self {
        if price < 10.0 {
            PriceCategory::Budget
        } else if price < 50.0 {
            PriceCategory::MidRange
        } else if price < 100.0 {
            PriceCategory::Premium
        } else {
            PriceCategory::Luxury
        }
    }
}

// == Category Info ==
/// Aggregate statistics over the products sharing one price band.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInfo {
    pub category: PriceCategory,
    pub avg_price: f64,
    pub category_count: usize,
}

// == Product View ==
/// Enriched projection of a product for the list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    pub id: u64,
    pub name: String,
    pub price: f64,
    pub category: String,
    pub price_with_tax: f64,
    pub name_length: usize,
    pub price_category: PriceCategory,
    pub computed_field: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub category_info: CategoryInfo,
}

impl ProductView {
    /// Projects one product into its enriched view, given the aggregate
    /// stats of its price band.
    pub fn project(product: &Product, category_info: CategoryInfo) -> Self {
        let name_length = product.name.chars().count();
        Self {
            id: product.id,
            name: product.name.clone(),
            price: product.price,
            category: product.category.clone(),
            price_with_tax: product.price * 1.2,
            name_length,
            price_category: PriceCategory::for_price(product.price),
            computed_field: product.price * 0.1 + (name_length % 10) as f64,
            created_at: product.created_at,
            updated_at: product.updated_at,
            category_info,
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str, price: f64) -> Product {
        let now = Utc::now();
        Product {
            id: 1,
            name: name.to_string(),
            price,
            category: "Electronics".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_price_category_bands() {
        assert_eq!(PriceCategory::for_price(0.0), PriceCategory::Budget);
        assert_eq!(PriceCategory::for_price(9.99), PriceCategory::Budget);
        assert_eq!(PriceCategory::for_price(10.0), PriceCategory::MidRange);
        assert_eq!(PriceCategory::for_price(49.99), PriceCategory::MidRange);
        assert_eq!(PriceCategory::for_price(50.0), PriceCategory::Premium);
        assert_eq!(PriceCategory::for_price(99.99), PriceCategory::Premium);
        assert_eq!(PriceCategory::for_price(100.0), PriceCategory::Luxury);
    }

    #[test]
    fn test_mid_range_serializes_with_hyphen() {
        let json = serde_json::to_string(&PriceCategory::MidRange).unwrap();
        assert_eq!(json, r#""Mid-range""#);
    }

    #[test]
    fn test_projection_fields() {
        let p = product("Smart Watch", 50.0);
        let info = CategoryInfo {
            category: PriceCategory::Premium,
            avg_price: 75.0,
            category_count: 2,
        };

        let view = ProductView::project(&p, info);

        assert!((view.price_with_tax - 60.0).abs() < 1e-9);
        assert_eq!(view.name_length, 11);
        assert_eq!(view.price_category, PriceCategory::Premium);
        // 50 * 0.1 + (11 % 10)
        assert!((view.computed_field - 6.0).abs() < 1e-9);
        assert_eq!(view.category_info.category_count, 2);
    }

    #[test]
    fn test_view_wire_shape_is_camel_case() {
        let p = product("Pen", 5.0);
        let info = CategoryInfo {
            category: PriceCategory::Budget,
            avg_price: 5.0,
            category_count: 1,
        };

        let json = serde_json::to_value(ProductView::project(&p, info)).unwrap();

        assert!(json.get("priceWithTax").is_some());
        assert!(json.get("nameLength").is_some());
        assert!(json.get("priceCategory").is_some());
        assert!(json.get("computedField").is_some());
        assert!(json.get("categoryInfo").is_some());
        assert!(json["categoryInfo"].get("avgPrice").is_some());
    }
}
