//! Live catalog filtering.
//!
//! A product is visible when its title or description contains the query as
//! a case-insensitive substring. No ranking: the visible set keeps catalog
//! order.

use std::borrow::Cow;

use pocket_shop_core::Product;

/// Whether `query` counts as "no filter" (empty or whitespace only).
#[must_use]
pub fn is_blank(query: &str) -> bool {
    query.trim().is_empty()
}

/// Filter `catalog` by `query`.
///
/// A blank query borrows the catalog unchanged. Otherwise returns the
/// matching subsequence. The query itself is matched as typed, surrounding
/// spaces included.
#[must_use]
pub fn filter_products<'a>(catalog: &'a [Product], query: &str) -> Cow<'a, [Product]> {
    if is_blank(query) {
        return Cow::Borrowed(catalog);
    }

    let needle = query.to_lowercase();
    Cow::Owned(
        catalog
            .iter()
            .filter(|p| matches_lowered(p, &needle))
            .cloned()
            .collect(),
    )
}

fn matches_lowered(product: &Product, needle: &str) -> bool {
    product.title.to_lowercase().contains(needle)
        || product.description.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(product: &Product, query: &str) -> bool {
        is_blank(query) || matches_lowered(product, &query.to_lowercase())
    }

    fn catalog() -> Vec<Product> {
        vec![
            Product::new(1, "Phone X").with_description("Flagship handset"),
            Product::new(2, "Phone Y").with_description("Budget handset"),
            Product::new(3, "Tablet Z").with_description("Large screen, pairs with any PHONE"),
            Product::new(4, "Desk Lamp").with_description("Warm light"),
        ]
    }

    fn ids(products: &[Product]) -> Vec<i64> {
        products.iter().map(|p| p.id.as_i64()).collect()
    }

    #[test]
    fn test_title_match_case_insensitive() {
        let catalog = vec![
            Product::new(1, "Phone X"),
            Product::new(2, "Phone Y"),
            Product::new(3, "Tablet Z"),
        ];
        assert_eq!(ids(&filter_products(&catalog, "phone")), vec![1, 2]);
    }

    #[test]
    fn test_description_match_keeps_catalog_order() {
        let catalog = catalog();
        assert_eq!(ids(&filter_products(&catalog, "PHONE")), vec![1, 2, 3]);
        assert_eq!(ids(&filter_products(&catalog, "handset")), vec![1, 2]);
    }

    #[test]
    fn test_substring_not_word_match() {
        let catalog = catalog();
        assert_eq!(ids(&filter_products(&catalog, "ablet")), vec![3]);
        assert_eq!(ids(&filter_products(&catalog, "arm li")), vec![4]);
    }

    #[test]
    fn test_blank_query_borrows_catalog() {
        let catalog = catalog();
        for query in ["", "   ", "\t\n"] {
            let result = filter_products(&catalog, query);
            assert!(matches!(result, Cow::Borrowed(_)));
            assert!(std::ptr::eq(result.as_ptr(), catalog.as_ptr()));
            assert_eq!(result.len(), catalog.len());
        }
    }

    #[test]
    fn test_no_match_is_empty() {
        assert!(filter_products(&catalog(), "refrigerator").is_empty());
        assert!(filter_products(&[], "phone").is_empty());
    }

    #[test]
    fn test_query_spaces_are_significant() {
        let catalog = catalog();
        assert_eq!(ids(&filter_products(&catalog, "phone ")), vec![1, 2]);
        assert!(filter_products(&catalog, " desk lamp ").is_empty());
    }

    #[test]
    fn test_unicode_case_folding() {
        let catalog = vec![Product::new(1, "ÉCLAIR Box")];
        assert_eq!(ids(&filter_products(&catalog, "éclair")), vec![1]);
    }

    #[test]
    fn test_filtered_is_subsequence_of_catalog() {
        let catalog = catalog();
        for query in ["a", "e", "phone", "light", "z"] {
            let filtered = filter_products(&catalog, query);
            let mut source = catalog.iter();
            for item in filtered.iter() {
                assert!(source.any(|p| p == item), "order broken for {query:?}");
            }
            let expected = catalog.iter().filter(|p| matches(p, query)).count();
            assert_eq!(filtered.len(), expected);
        }
    }
}
