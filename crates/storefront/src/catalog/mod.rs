//! Remote product catalog access.
//!
//! # Architecture
//!
//! - The catalog API is the source of truth - NO local persistence
//! - One HTTP GET returns `{ products, total, skip, limit }`; only `products`
//!   is consumed downstream
//! - [`CatalogSource`] is the seam between the screen controller and the
//!   network, so the controller can be driven by any source
//!
//! # Example
//!
//! ```rust,ignore
//! use pocket_shop_storefront::catalog::{CatalogClient, CatalogSource};
//!
//! let client = CatalogClient::new(&config.catalog)?;
//! let page = client.fetch_catalog().await?;
//! println!("{} of {} products", page.products.len(), page.total);
//! ```

mod client;

use std::future::Future;

use pocket_shop_core::CatalogPage;
use thiserror::Error;

pub use client::CatalogClient;

/// Errors that can occur when fetching the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed (connection, TLS, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("Catalog API returned HTTP {0}")]
    Status(u16),

    /// The body was not a valid catalog envelope.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Anything that can produce a page of the product catalog.
pub trait CatalogSource: Send + Sync {
    /// Fetch the catalog.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` on transport failure, non-success status or a
    /// malformed body.
    fn fetch_catalog(&self) -> impl Future<Output = Result<CatalogPage, CatalogError>> + Send;
}
