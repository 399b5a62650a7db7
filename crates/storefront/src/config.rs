//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `POCKET_SHOP_CATALOG_URL` - Catalog endpoint (default: <https://dummyjson.com/products>)
//! - `POCKET_SHOP_FETCH_TIMEOUT_SECS` - Request timeout in seconds (default: transport default)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Catalog endpoint used when `POCKET_SHOP_CATALOG_URL` is not set.
pub const DEFAULT_CATALOG_URL: &str = "https://dummyjson.com/products";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Catalog API configuration
    pub catalog: CatalogConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name (e.g. "production")
    pub sentry_environment: Option<String>,
}

/// Catalog API configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Endpoint returning `{ products, total, skip, limit }`
    pub url: Url,
    /// Request timeout. `None` leaves it to the HTTP client's defaults.
    pub timeout: Option<Duration>,
}

impl CatalogConfig {
    /// Configuration for the given endpoint with no explicit timeout.
    #[must_use]
    pub const fn new(url: Url) -> Self {
        Self { url, timeout: None }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let catalog = CatalogConfig::from_lookup(&lookup)?;

        Ok(Self {
            catalog,
            sentry_dsn: get_optional(&lookup, "SENTRY_DSN"),
            sentry_environment: get_optional(&lookup, "SENTRY_ENVIRONMENT"),
        })
    }
}

impl CatalogConfig {
    fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_url = get_or_default(lookup, "POCKET_SHOP_CATALOG_URL", DEFAULT_CATALOG_URL);
        let url = parse_catalog_url(&raw_url).map_err(|e| {
            ConfigError::InvalidEnvVar("POCKET_SHOP_CATALOG_URL".to_string(), e)
        })?;

        let timeout = get_optional(lookup, "POCKET_SHOP_FETCH_TIMEOUT_SECS")
            .map(|raw| parse_timeout_secs(&raw))
            .transpose()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("POCKET_SHOP_FETCH_TIMEOUT_SECS".to_string(), e)
            })?;

        Ok(Self { url, timeout })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional variable, treating blank values as unset.
fn get_optional<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).filter(|v| !v.trim().is_empty())
}

/// Get a variable with a default value.
fn get_or_default<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    get_optional(lookup, key).unwrap_or_else(|| default.to_string())
}

/// Parse a catalog endpoint. Only http and https are accepted.
///
/// # Errors
///
/// Returns a description of the problem if the URL is malformed or not HTTP.
pub fn parse_catalog_url(raw: &str) -> Result<Url, String> {
    let url = Url::parse(raw.trim()).map_err(|e| e.to_string())?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(format!("unsupported scheme '{other}', expected http or https")),
    }
}

fn parse_timeout_secs(raw: &str) -> Result<Duration, String> {
    let secs = raw.trim().parse::<u64>().map_err(|e| e.to_string())?;
    if secs == 0 {
        return Err("timeout must be at least 1 second".to_string());
    }
    Ok(Duration::from_secs(secs))
}
