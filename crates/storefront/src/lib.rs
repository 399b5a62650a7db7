//! Pocket Shop Storefront library.
//!
//! Everything behind the storefront screen, independent of how it is drawn:
//!
//! - [`store`] - Shared catalog and cart state
//! - [`search`] - Case-insensitive catalog filtering
//! - [`view`] - Searchable, numbered product list
//! - [`screen`] - Catalog fetch lifecycle and order placement
//! - [`catalog`] - HTTP catalog client
//! - [`notify`] - User-facing notifications
//!
//! # Example
//!
//! ```rust,ignore
//! let config = StorefrontConfig::from_env()?;
//! let store = Store::new();
//! let notifier: Arc<dyn Notifier> = Arc::new(TracingNotifier);
//! let screen = ScreenController::new(CatalogClient::new(&config.catalog)?, store.clone(), notifier.clone());
//! let mut view = CatalogView::new(store, notifier);
//!
//! screen.mount().await;
//! view.set_query("phone");
//! println!("{}", view.render()?);
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod notify;
pub mod screen;
pub mod search;
pub mod store;
pub mod view;

pub use catalog::{CatalogClient, CatalogError, CatalogSource};
pub use config::{CatalogConfig, StorefrontConfig};
pub use notify::{MemoryNotifier, Notification, NotificationKind, Notifier, TracingNotifier};
pub use screen::{FetchOutcome, OrderOutcome, ScreenController};
pub use store::Store;
pub use view::{CatalogView, ProductCard};
