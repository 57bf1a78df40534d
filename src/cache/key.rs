//! Cache Key Builder
//!
//! Deterministic mapping from a resource prefix and the request attributes
//! that can change a response to a single store key. Signature parts are
//! sorted by parameter name, so two requests that differ only in query
//! parameter order always land on the same key.

use std::fmt;

// == Cache Key ==
/// A store key identifying one cached response.
///
/// Layout is `prefix:signature`, where the signature is the canonical
/// `name=value` join of every response-relevant request attribute. Keys in
/// the same resource family share the prefix, which is what makes
/// prefix-glob invalidation work.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Builds a key from a resource prefix and unordered signature parts.
    ///
    /// Pure function: same prefix and same parts (in any order) always
    /// produce the same key, and distinct part sets always produce
    /// distinct keys (separator characters inside values are escaped so
    /// they cannot forge a part boundary).
    pub fn build(prefix: &str, parts: &[(&str, String)]) -> Self {
        let mut parts: Vec<&(&str, String)> = parts.iter().collect();
        parts.sort();

        let signature = parts
            .iter()
            .map(|(name, value)| format!("{}={}", escape_part(name), escape_part(value)))
            .collect::<Vec<_>>()
            .join("&");

        CacheKey(format!("{}:{}", prefix, signature))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Escapes the signature separator characters inside a part, keeping the
/// part-name/part-value structure unambiguous.
fn escape_part(raw: &str) -> String {
    raw.replace('%', "%25").replace('&', "%26").replace('=', "%3D")
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_layout() {
        let key = CacheKey::build("products", &[]);
        assert_eq!(key.as_str(), "products:");

        let key = CacheKey::build("product", &[("id", "42".to_string())]);
        assert_eq!(key.as_str(), "product:id=42");
    }

    #[test]
    fn test_parts_are_canonicalized_by_name() {
        let forward = CacheKey::build(
            "products_paginated",
            &[("page", "2".to_string()), ("limit", "5".to_string())],
        );
        let reversed = CacheKey::build(
            "products_paginated",
            &[("limit", "5".to_string()), ("page", "2".to_string())],
        );

        assert_eq!(forward, reversed);
        assert_eq!(forward.as_str(), "products_paginated:limit=5&page=2");
    }

    #[test]
    fn test_differing_values_produce_distinct_keys() {
        let page_one = CacheKey::build("products_paginated", &[("page", "1".to_string())]);
        let page_two = CacheKey::build("products_paginated", &[("page", "2".to_string())]);
        assert_ne!(page_one, page_two);
    }

    #[test]
    fn test_differing_prefixes_produce_distinct_keys() {
        let list = CacheKey::build("products", &[]);
        let single = CacheKey::build("product", &[]);
        assert_ne!(list, single);
    }

    #[test]
    fn test_separator_values_cannot_forge_parts() {
        let smuggled = CacheKey::build("products_paginated", &[("search", "1&page=2".to_string())]);
        let honest = CacheKey::build(
            "products_paginated",
            &[("search", "1".to_string()), ("page", "2".to_string())],
        );
        assert_ne!(smuggled, honest);
    }

    #[test]
    fn test_family_prefix_globs() {
        let list = CacheKey::build("products", &[]);
        let paginated = CacheKey::build("products_paginated", &[("page", "1".to_string())]);
        let single = CacheKey::build("product", &[("id", "7".to_string())]);

        // "products*" covers the collection views but not single items
        assert!(list.as_str().starts_with("products"));
        assert!(paginated.as_str().starts_with("products"));
        assert!(!single.as_str().starts_with("products"));

        // "product*" covers all three
        assert!(single.as_str().starts_with("product"));
        assert!(list.as_str().starts_with("product"));
    }
}
