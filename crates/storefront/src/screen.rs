//! Screen controller: catalog fetch lifecycle and order placement.
//!
//! # Fetch lifecycle
//!
//! Every fetch takes a generation number when it starts. When it completes,
//! its products are applied only if no newer fetch has been applied already,
//! so a slow response can never overwrite fresher data after a rapid
//! double reload. Failures are logged and leave the catalog as it was.
//!
//! After [`ScreenController::unmount`], completions of outstanding fetches
//! are dropped.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use tokio::task::JoinHandle;
use tracing::{error, info, instrument, warn};

use crate::catalog::CatalogSource;
use crate::error::add_breadcrumb;
use crate::notify::{Notification, Notifier};
use crate::store::Store;

/// What happened to one fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The catalog was replaced with `product_count` products.
    Applied { product_count: usize },
    /// A newer fetch had already been applied; this result was dropped.
    Stale,
    /// The screen was unmounted before the fetch completed.
    Discarded,
    /// The fetch failed; the catalog is unchanged.
    Failed,
    /// `mount` was called on an already mounted screen.
    AlreadyMounted,
}

/// Result of a "place order" action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderOutcome {
    /// The cart was empty; nothing happened besides the advisory.
    CartEmpty,
    /// The order was confirmed and the cart emptied.
    Placed { item_count: usize },
}

/// Controller for the storefront screen.
///
/// Cheap to clone; clones drive the same screen.
pub struct ScreenController<S> {
    inner: Arc<ControllerInner<S>>,
}

impl<S> Clone for ScreenController<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct ControllerInner<S> {
    source: S,
    store: Store,
    notifier: Arc<dyn Notifier>,
    mounted: AtomicBool,
    unmounted: AtomicBool,
    /// Generation handed to the most recently started fetch.
    generation: AtomicU64,
}

impl<S: CatalogSource> ScreenController<S> {
    /// Create a controller that loads from `source` into `store`.
    #[must_use]
    pub fn new(source: S, store: Store, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            inner: Arc::new(ControllerInner {
                source,
                store,
                notifier,
                mounted: AtomicBool::new(false),
                unmounted: AtomicBool::new(false),
                generation: AtomicU64::new(0),
            }),
        }
    }

    /// The store this screen writes to.
    #[must_use]
    pub fn store(&self) -> &Store {
        &self.inner.store
    }

    /// First mount: fetch the catalog once. Later calls do nothing.
    pub async fn mount(&self) -> FetchOutcome {
        if self.inner.mounted.swap(true, Ordering::SeqCst) {
            return FetchOutcome::AlreadyMounted;
        }
        info!("Screen mounted, loading catalog");
        self.reload().await
    }

    /// Fetch the catalog and replace the store's copy.
    ///
    /// Never fails: errors are logged and reported as [`FetchOutcome::Failed`].
    #[instrument(skip(self))]
    pub async fn reload(&self) -> FetchOutcome {
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let result = self.inner.source.fetch_catalog().await;

        if self.inner.unmounted.load(Ordering::SeqCst) {
            warn!(generation, "Screen unmounted, dropping fetch result");
            return FetchOutcome::Discarded;
        }

        match result {
            Ok(page) => {
                let product_count = page.products.len();
                if self.inner.store.replace_catalog_if_newer(generation, page.products) {
                    info!(generation, product_count, "Catalog loaded");
                    FetchOutcome::Applied { product_count }
                } else {
                    FetchOutcome::Stale
                }
            }
            Err(e) => {
                error!(generation, error = %e, "Failed to fetch products");
                FetchOutcome::Failed
            }
        }
    }

    /// "Place order": confirm and empty the cart, or advise the user to add
    /// products first. No order is sent anywhere.
    ///
    /// The confirmation goes out while the cart still holds the order.
    #[instrument(skip(self))]
    pub fn place_order(&self) -> OrderOutcome {
        let item_count = self.inner.store.cart_len();

        if item_count == 0 {
            self.inner.notifier.notify(&Notification::cart_empty());
            return OrderOutcome::CartEmpty;
        }

        let count = item_count.to_string();
        add_breadcrumb("order", "Placed order", Some(&[("item_count", count.as_str())]));
        info!(item_count, "Order placed");

        self.inner
            .notifier
            .notify(&Notification::order_placed(item_count));
        self.inner.store.clear_cart();
        OrderOutcome::Placed { item_count }
    }

    /// Clear the cart on explicit user request.
    pub fn clear_cart(&self) {
        self.inner.store.clear_cart();
    }

    /// Stop applying fetch results. Outstanding fetches still run to
    /// completion but change nothing.
    pub fn unmount(&self) {
        if !self.inner.unmounted.swap(true, Ordering::SeqCst) {
            info!("Screen unmounted");
        }
    }

    /// Whether [`unmount`](Self::unmount) has been called.
    #[must_use]
    pub fn is_unmounted(&self) -> bool {
        self.inner.unmounted.load(Ordering::SeqCst)
    }

    /// The footer buttons, e.g. `[Reload Data]  [Place Order (2)]`.
    #[must_use]
    pub fn footer(&self) -> String {
        format!(
            "[Reload Data]  [Place Order ({})]",
            self.inner.store.cart_len()
        )
    }
}

impl<S: CatalogSource + 'static> ScreenController<S> {
    /// Start a reload in the background and return immediately.
    ///
    /// Concurrent reloads are not cancelled; the newest one to start wins.
    pub fn spawn_reload(&self) -> JoinHandle<FetchOutcome> {
        let controller = self.clone();
        tokio::spawn(async move { controller.reload().await })
    }
}
