//! HTTP client for the catalog API.

use std::sync::Arc;

use pocket_shop_core::CatalogPage;
use reqwest::StatusCode;
use tracing::{debug, error, instrument};
use url::Url;

use super::{CatalogError, CatalogSource};
use crate::config::CatalogConfig;

/// User agent sent with every catalog request.
const USER_AGENT: &str = concat!("pocket-shop/", env!("CARGO_PKG_VERSION"));

/// How much of a bad body is echoed into the logs.
const LOG_BODY_LIMIT: usize = 500;

/// Client for the catalog API.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    endpoint: Url,
}

impl std::fmt::Debug for CatalogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogClient")
            .field("endpoint", &self.inner.endpoint.as_str())
            .finish_non_exhaustive()
    }
}

impl CatalogClient {
    /// Create a new catalog client.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Http` if the HTTP client cannot be built.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                client: builder.build()?,
                endpoint: config.url.clone(),
            }),
        })
    }

    /// The endpoint this client fetches from.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.inner.endpoint
    }

    /// Fetch one page of the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the status is not 2xx, or the
    /// body is not a catalog envelope.
    #[instrument(skip(self), fields(endpoint = %self.inner.endpoint))]
    pub async fn get_products(&self) -> Result<CatalogPage, CatalogError> {
        let response = self
            .inner
            .client
            .get(self.inner.endpoint.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();

        // Get response body as text first for better error diagnostics
        let body = response.text().await?;

        let page = decode_page(status, &body)?;
        debug!(
            count = page.products.len(),
            total = page.total,
            skip = page.skip,
            limit = page.limit,
            "Fetched catalog page"
        );
        Ok(page)
    }
}

impl CatalogSource for CatalogClient {
    async fn fetch_catalog(&self) -> Result<CatalogPage, CatalogError> {
        self.get_products().await
    }
}

/// Turn a status and body into a catalog page.
fn decode_page(status: StatusCode, body: &str) -> Result<CatalogPage, CatalogError> {
    if !status.is_success() {
        error!(
            status = %status,
            body = %truncate(body),
            "Catalog API returned non-success status"
        );
        return Err(CatalogError::Status(status.as_u16()));
    }

    serde_json::from_str(body).map_err(|e| {
        error!(
            error = %e,
            body = %truncate(body),
            "Failed to parse catalog response"
        );
        CatalogError::Parse(e)
    })
}

fn truncate(body: &str) -> String {
    body.chars().take(LOG_BODY_LIMIT).collect()
}
