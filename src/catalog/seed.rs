//! Seed Data Generation
//!
//! Fills the in-process catalog with randomized products at startup so the
//! cached endpoints have something to serve.

use rand::Rng;

use super::repository::NewProduct;

const ADJECTIVES: &[&str] = &[
    "Premium", "Deluxe", "Basic", "Professional", "Smart", "Classic", "Modern", "Vintage",
];

const ITEMS: &[&str] = &[
    "Laptop", "Phone", "Tablet", "Watch", "Headphones", "Camera", "Speaker", "Mouse", "Keyboard",
    "Monitor", "Chair", "Desk", "Book", "Shirt", "Pants", "Shoes", "Bag", "Bottle", "Cup", "Pen",
    "Notebook", "Lamp", "Clock", "Mirror", "Ball", "Bat", "Racket", "Gloves", "Helmet", "Bike",
    "Skateboard", "Game",
];

/// Catalog category an item belongs to.
fn category_for(item: &str) -> &'static str {
    match item {
        "Laptop" | "Phone" | "Tablet" | "Watch" | "Headphones" | "Camera" | "Speaker" | "Mouse"
        | "Keyboard" | "Monitor" => "Electronics",
        "Chair" | "Desk" | "Bottle" | "Cup" | "Lamp" | "Clock" | "Mirror" => "Home",
        "Book" | "Pen" | "Notebook" => "Books",
        "Shirt" | "Pants" | "Shoes" | "Bag" => "Clothing",
        "Ball" | "Bat" | "Racket" | "Gloves" | "Helmet" | "Bike" | "Skateboard" => "Sports",
        "Game" => "Toys",
        _ => "Misc",
    }
}

/// Generates `count` random adjective+item products with prices in 10..910.
pub fn generate_products(count: usize) -> Vec<NewProduct> {
    let mut rng = rand::rng();

    (0..count)
        .map(|_| {
            let adjective = ADJECTIVES[rng.random_range(0..ADJECTIVES.len())];
            let item = ITEMS[rng.random_range(0..ITEMS.len())];
            let price = rng.random_range(10..910) as f64;

            NewProduct {
                name: format!("{} {}", adjective, item),
                price,
                category: category_for(item).to_string(),
            }
        })
        .collect()
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generates_requested_count() {
        assert_eq!(generate_products(100).len(), 100);
        assert!(generate_products(0).is_empty());
    }

    #[test]
    fn test_prices_in_range() {
        for product in generate_products(200) {
            assert!(product.price >= 10.0 && product.price < 910.0);
        }
    }

    #[test]
    fn test_names_are_adjective_item_pairs() {
        for product in generate_products(50) {
            let mut words = product.name.split(' ');
            let adjective = words.next().unwrap();
            let item = words.next().unwrap();
            assert!(words.next().is_none());
            assert!(ADJECTIVES.contains(&adjective));
            assert!(ITEMS.contains(&item));
        }
    }

    #[test]
    fn test_every_item_maps_to_a_category() {
        for item in ITEMS {
            assert_ne!(category_for(item), "Misc");
        }
    }
}
