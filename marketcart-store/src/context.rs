//! Scoped access to a shared cart.
//!
//! A [`CartProvider`] installs a [`CartStore`] for the duration of a future;
//! code running inside reaches it through [`use_cart`] instead of having the
//! store threaded through every call.
//!
//! ```ignore
//! let provider = CartProvider::new(CartStore::open(storage, DEFAULT_STORAGE_KEY));
//! provider
//!     .scope(async {
//!         let cart = use_cart()?;
//!         cart.add_to_cart(product).await?;
//!         Ok::<_, StoreError>(())
//!     })
//!     .await?;
//! ```
//!
//! The scope is task-local: work handed to `tokio::spawn` does not inherit
//! it and must enter its own scope.

use std::future::Future;
use tracing::error;

use crate::cart_store::CartStore;
use crate::error::StoreError;

tokio::task_local! {
    static CURRENT_CART: CartStore;
}

/// Makes a cart available to everything running inside its scope.
#[derive(Debug, Clone)]
pub struct CartProvider {
    store: CartStore,
}

impl CartProvider {
    /// Wraps a store.
    pub fn new(store: CartStore) -> Self {
        Self { store }
    }

    /// Returns the provided store.
    pub fn store(&self) -> &CartStore {
        &self.store
    }

    /// Runs `future` with this provider's cart in scope.
    pub async fn scope<F>(&self, future: F) -> F::Output
    where
        F: Future,
    {
        CURRENT_CART.scope(self.store.clone(), future).await
    }

    /// Runs `f` synchronously with this provider's cart in scope.
    pub fn sync_scope<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        CURRENT_CART.sync_scope(self.store.clone(), f)
    }
}

/// Returns the cart of the enclosing [`CartProvider`].
///
/// # Errors
///
/// Returns [`StoreError::MissingProvider`] when called outside any provider
/// scope. That is a wiring bug in the caller, not a runtime condition.
pub fn use_cart() -> Result<CartStore, StoreError> {
    CURRENT_CART.try_with(CartStore::clone).map_err(|_| {
        error!("use_cart called outside of a CartProvider");
        StoreError::MissingProvider
    })
}
