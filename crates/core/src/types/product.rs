//! Catalog products and the JSON envelope they are served in.

use serde::{Deserialize, Deserializer, Serialize};

use super::{Price, ProductId};

/// A product as served by the catalog API.
///
/// Only `id` is required. Every other field falls back to its default when
/// absent or `null`, so a sparse entry still decodes (some catalog items have
/// no brand).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: Price,
    /// Discount in percent, 0 to 100.
    #[serde(default, deserialize_with = "null_as_default")]
    pub discount_percentage: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rating: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub stock: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub brand: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    /// Image URIs in display order. May be empty.
    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<String>,
}

impl Product {
    /// Create a product with the given id and title, everything else empty.
    #[must_use]
    pub fn new(id: impl Into<ProductId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            price: Price::default(),
            discount_percentage: 0.0,
            rating: 0.0,
            stock: 0,
            brand: String::new(),
            category: String::new(),
            images: Vec::new(),
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the price.
    #[must_use]
    pub const fn with_price(mut self, price: Price) -> Self {
        self.price = price;
        self
    }

    /// Append an image URI.
    #[must_use]
    pub fn with_image(mut self, uri: impl Into<String>) -> Self {
        self.images.push(uri.into());
        self
    }

    /// The first image, used as the card's lead image.
    #[must_use]
    pub fn lead_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

/// One page of the catalog listing: `{ products, total, skip, limit }`.
///
/// Consumers only read `products`; the paging fields are kept for logging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogPage {
    pub products: Vec<Product>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub skip: u64,
    #[serde(default)]
    pub limit: u64,
}

/// Decode `null` as the type's default, like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_decode_full_product() {
        let value = json!({
            "id": 1,
            "title": "Essence Mascara Lash Princess",
            "description": "A popular mascara.",
            "category": "beauty",
            "price": 9.99,
            "discountPercentage": 7.17,
            "rating": 4.94,
            "stock": 5,
            "tags": ["beauty", "mascara"],
            "brand": "Essence",
            "images": ["https://cdn.example.com/1/1.png"],
            "thumbnail": "https://cdn.example.com/1/thumbnail.png"
        });

        let product: Product = serde_json::from_value(value).unwrap();
        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.brand, "Essence");
        assert_eq!(product.price.amount(), Decimal::new(999, 2));
        assert!((product.discount_percentage - 7.17).abs() < f64::EPSILON);
        assert_eq!(product.stock, 5);
        assert_eq!(product.lead_image(), Some("https://cdn.example.com/1/1.png"));
    }

    #[test]
    fn test_decode_sparse_product() {
        let product: Product = serde_json::from_value(json!({"id": 3, "title": "Tablet Z"})).unwrap();
        assert_eq!(product.title, "Tablet Z");
        assert!(product.brand.is_empty());
        assert!(product.images.is_empty());
        assert_eq!(product.lead_image(), None);
    }

    #[test]
    fn test_decode_null_fields_as_defaults() {
        let product: Product = serde_json::from_value(json!({
            "id": 4,
            "title": "Desk Lamp",
            "description": null,
            "price": null,
            "discountPercentage": null,
            "rating": null,
            "stock": null,
            "brand": null,
            "category": null,
            "images": null
        }))
        .unwrap();

        assert_eq!(product, Product::new(4, "Desk Lamp"));
    }

    #[test]
    fn test_null_field_does_not_reject_page() {
        let page: CatalogPage = serde_json::from_str(
            r#"{"products":[{"id":1,"title":"A"},{"id":2,"title":"B","brand":null}]}"#,
        )
        .unwrap();

        let titles: Vec<&str> = page.products.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B"]);
        assert!(page.products.iter().all(|p| p.brand.is_empty()));
    }

    #[test]
    fn test_decode_rejects_missing_id() {
        let result = serde_json::from_value::<Product>(json!({"title": "No id"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_catalog_page() {
        let page: CatalogPage = serde_json::from_value(json!({
            "products": [{"id": 1, "title": "Phone X"}, {"id": 2, "title": "Phone Y"}],
            "total": 194,
            "skip": 0,
            "limit": 30
        }))
        .unwrap();

        assert_eq!(page.products.len(), 2);
        assert_eq!(page.total, 194);
        assert_eq!(page.limit, 30);
    }

    #[test]
    fn test_decode_catalog_page_without_paging_fields() {
        let page: CatalogPage = serde_json::from_value(json!({"products": []})).unwrap();
        assert!(page.products.is_empty());
        assert_eq!(page.total, 0);
    }
}
