//! Searchable catalog view.
//!
//! Holds the search query (local to the view, gone when the view is dropped)
//! and turns the store's catalog into numbered product cards. The visible set
//! is recomputed only when the query or the store revision changes.

use std::borrow::Cow;
use std::sync::Arc;

use askama::Template;
use pocket_shop_core::Product;
use tracing::{debug, instrument};

use crate::error::add_breadcrumb;
use crate::notify::{Notification, Notifier};
use crate::search::{filter_products, is_blank};
use crate::store::Store;

/// Display data for one product card.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductCard {
    /// 1-based position in the visible set (not in the catalog).
    pub position: usize,
    pub title: String,
    pub description: String,
    /// Price with two decimals, e.g. `$9.99`.
    pub price: String,
    /// Discount percentage without the `%` sign.
    pub discount: String,
    pub rating: String,
    pub stock: u32,
    pub brand: String,
    pub category: String,
    pub lead_image: Option<String>,
}

impl ProductCard {
    /// Build the card for `product` shown at `position`.
    #[must_use]
    pub fn new(position: usize, product: &Product) -> Self {
        Self {
            position,
            title: product.title.clone(),
            description: product.description.clone(),
            price: product.price.to_string(),
            discount: product.discount_percentage.to_string(),
            rating: product.rating.to_string(),
            stock: product.stock,
            brand: product.brand.clone(),
            category: product.category.clone(),
            lead_image: product.lead_image().map(String::from),
        }
    }

    /// The lead image URI, or an empty string when there is none.
    #[must_use]
    pub fn image_uri(&self) -> &str {
        self.lead_image.as_deref().unwrap_or_default()
    }
}

#[derive(Template)]
#[template(path = "catalog.txt")]
struct CatalogTemplate<'a> {
    query: &'a str,
    cards: &'a [ProductCard],
}

struct Memo {
    revision: u64,
    query: String,
    visible: Arc<[Product]>,
}

/// The catalog list with its search field.
pub struct CatalogView {
    store: Store,
    notifier: Arc<dyn Notifier>,
    query: String,
    memo: Option<Memo>,
}

impl CatalogView {
    /// Create a view over `store` with an empty query.
    #[must_use]
    pub fn new(store: Store, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            store,
            notifier,
            query: String::new(),
            memo: None,
        }
    }

    /// The current search query.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Replace the search query.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Products matching the current query, in catalog order.
    ///
    /// With a blank query this is the store's catalog itself, not a copy.
    pub fn visible(&mut self) -> Arc<[Product]> {
        let (revision, catalog) = self.store.catalog_snapshot();
        if is_blank(&self.query) {
            return catalog;
        }

        if let Some(memo) = &self.memo
            && memo.revision == revision
            && memo.query == self.query
        {
            return Arc::clone(&memo.visible);
        }

        let visible: Arc<[Product]> = match filter_products(&catalog, &self.query) {
            Cow::Borrowed(_) => Arc::clone(&catalog),
            Cow::Owned(matched) => Arc::from(matched),
        };
        debug!(
            query = %self.query,
            revision,
            visible = visible.len(),
            catalog = catalog.len(),
            "Recomputed visible products"
        );

        self.memo = Some(Memo {
            revision,
            query: self.query.clone(),
            visible: Arc::clone(&visible),
        });
        visible
    }

    /// Cards for the visible products, numbered from 1.
    pub fn cards(&mut self) -> Vec<ProductCard> {
        self.visible()
            .iter()
            .enumerate()
            .map(|(i, product)| ProductCard::new(i + 1, product))
            .collect()
    }

    /// Render the header, search line and product list as text.
    ///
    /// # Errors
    ///
    /// Returns an error if the template fails to render.
    pub fn render(&mut self) -> Result<String, askama::Error> {
        let cards = self.cards();
        CatalogTemplate {
            query: &self.query,
            cards: &cards,
        }
        .render()
    }

    /// "Add to Cart" on the card at `position` (1-based, as displayed).
    ///
    /// Adding a product already in the cart still confirms; the store keeps
    /// the first copy. Returns `None` if no card is shown at `position`.
    #[instrument(skip(self), fields(query = %self.query))]
    pub fn add_to_cart(&mut self, position: usize) -> Option<Notification> {
        let visible = self.visible();
        let product = visible.get(position.checked_sub(1)?)?;

        let added = self.store.add_to_cart(product.clone());
        debug!(product_id = %product.id, added, "Add to cart");
        let product_id = product.id.to_string();
        add_breadcrumb(
            "cart",
            "Added product to cart",
            Some(&[("product_id", product_id.as_str())]),
        );

        let notification = Notification::added_to_cart(&product.title);
        self.notifier.notify(&notification);
        Some(notification)
    }
}
