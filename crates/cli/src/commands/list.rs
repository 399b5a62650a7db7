//! One-shot catalog listing.
//!
//! # Usage
//!
//! ```bash
//! pocket-shop list
//! pocket-shop list --query "phone"
//! ```
//!
//! Unlike `browse`, a failed fetch is reported as an error and the process
//! exits non-zero.

use std::sync::Arc;

use pocket_shop_storefront::catalog::CatalogClient;
use pocket_shop_storefront::config::StorefrontConfig;
use pocket_shop_storefront::error::Result;
use pocket_shop_storefront::notify::TracingNotifier;
use pocket_shop_storefront::store::Store;
use pocket_shop_storefront::view::CatalogView;
use tracing::info;

use crate::terminal;

/// Fetch the catalog once and print it, filtered by `query` if given.
///
/// # Errors
///
/// Returns an error if the fetch fails or the list cannot be rendered.
pub async fn run(config: &StorefrontConfig, query: Option<&str>) -> Result<()> {
    let client = CatalogClient::new(&config.catalog)?;
    let page = client.get_products().await?;
    info!(
        count = page.products.len(),
        total = page.total,
        "Catalog fetched"
    );

    let store = Store::new();
    store.replace_catalog(page.products);

    let mut view = CatalogView::new(store, Arc::new(TracingNotifier));
    if let Some(query) = query {
        view.set_query(query);
    }

    terminal::print(&view.render()?);
    Ok(())
}
