//! Shared catalog and cart state.
//!
//! The [`Store`] is the single owner of the catalog and the cart. It is built
//! once at startup and handed by clone to every component that needs it;
//! clones share the same state.
//!
//! Every mutation is a single step under one write lock (whole-catalog swap,
//! one append, or one clear), so readers never observe a half-applied change.
//! Subscribers are told about changes through a `watch` channel carrying the
//! store revision.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use pocket_shop_core::{Product, ProductId};
use tokio::sync::watch;
use tracing::debug;

/// Shared state store for the catalog and the cart.
#[derive(Clone)]
pub struct Store {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    state: RwLock<StoreState>,
    changes: watch::Sender<u64>,
}

struct StoreState {
    /// Bumped on every change; used as a cache key by views.
    revision: u64,
    catalog: Arc<[Product]>,
    cart: Vec<Product>,
    /// Generation of the newest fetch result applied so far.
    applied_generation: u64,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.read();
        f.debug_struct("Store")
            .field("revision", &state.revision)
            .field("catalog_len", &state.catalog.len())
            .field("cart_len", &state.cart.len())
            .finish()
    }
}

impl Store {
    /// Create a store with an empty catalog and an empty cart.
    #[must_use]
    pub fn new() -> Self {
        let (changes, _) = watch::channel(0);
        Self {
            inner: Arc::new(StoreInner {
                state: RwLock::new(StoreState {
                    revision: 0,
                    catalog: Arc::from(Vec::new()),
                    cart: Vec::new(),
                    applied_generation: 0,
                }),
                changes,
            }),
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// The current catalog. Cheap: shares the stored slice.
    #[must_use]
    pub fn catalog(&self) -> Arc<[Product]> {
        Arc::clone(&self.read().catalog)
    }

    /// The current revision together with the catalog it belongs to.
    #[must_use]
    pub fn catalog_snapshot(&self) -> (u64, Arc<[Product]>) {
        let state = self.read();
        (state.revision, Arc::clone(&state.catalog))
    }

    /// A copy of the cart in insertion order.
    #[must_use]
    pub fn cart(&self) -> Vec<Product> {
        self.read().cart.clone()
    }

    /// Number of products in the cart.
    #[must_use]
    pub fn cart_len(&self) -> usize {
        self.read().cart.len()
    }

    /// Whether a product with this id is in the cart.
    #[must_use]
    pub fn cart_contains(&self, id: ProductId) -> bool {
        self.read().cart.iter().any(|p| p.id == id)
    }

    /// The current revision.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.read().revision
    }

    /// Subscribe to change notifications. The value is the new revision.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.inner.changes.subscribe()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Overwrite the catalog. Entries are stored as given.
    pub fn replace_catalog(&self, products: Vec<Product>) {
        let revision = {
            let mut state = self.write();
            state.catalog = Arc::from(products);
            state.revision += 1;
            debug!(count = state.catalog.len(), "Catalog replaced");
            state.revision
        };
        self.notify(revision);
    }

    /// Overwrite the catalog with the result of fetch number `generation`,
    /// unless a newer fetch has already been applied.
    ///
    /// Returns `true` if the catalog was replaced.
    pub fn replace_catalog_if_newer(&self, generation: u64, products: Vec<Product>) -> bool {
        let revision = {
            let mut state = self.write();
            if generation <= state.applied_generation {
                debug!(
                    generation,
                    applied = state.applied_generation,
                    "Discarding stale catalog"
                );
                return false;
            }
            state.applied_generation = generation;
            state.catalog = Arc::from(products);
            state.revision += 1;
            debug!(generation, count = state.catalog.len(), "Catalog replaced");
            state.revision
        };
        self.notify(revision);
        true
    }

    /// Append `product` to the cart unless one with the same id is already
    /// there. The first value added for an id is the one kept.
    ///
    /// Returns `true` if the cart changed.
    pub fn add_to_cart(&self, product: Product) -> bool {
        let revision = {
            let mut state = self.write();
            if state.cart.iter().any(|p| p.id == product.id) {
                debug!(product_id = %product.id, "Product already in cart");
                return false;
            }
            debug!(product_id = %product.id, "Product added to cart");
            state.cart.push(product);
            state.revision += 1;
            state.revision
        };
        self.notify(revision);
        true
    }

    /// Empty the cart. Clearing an empty cart changes nothing.
    pub fn clear_cart(&self) {
        let _ = self.take_cart();
    }

    /// Empty the cart and return what it held, in insertion order.
    pub fn take_cart(&self) -> Vec<Product> {
        let (taken, revision) = {
            let mut state = self.write();
            if state.cart.is_empty() {
                return Vec::new();
            }
            let taken = std::mem::take(&mut state.cart);
            state.revision += 1;
            (taken, state.revision)
        };
        debug!(count = taken.len(), "Cart cleared");
        self.notify(revision);
        taken
    }

    // =========================================================================
    // Internals
    // =========================================================================

    // Writers never panic while holding the lock, so a poisoned lock still
    // guards consistent state.
    fn read(&self) -> RwLockReadGuard<'_, StoreState> {
        self.inner
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreState> {
        self.inner
            .state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn notify(&self, revision: u64) {
        self.inner.changes.send_modify(|current| {
            *current = (*current).max(revision);
        });
    }
}
