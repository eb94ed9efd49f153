//! The cart state store.
//!
//! Holds the cart in memory, publishes every change to subscribers, and
//! mirrors each change into a [`CartStorage`] backend in the background.

use marketcart_core::{CartState, CartStorage, DEFAULT_STORAGE_KEY, ProductInput};
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{RwLock, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::CartConfig;
use crate::error::StoreError;

// ============================================================================
// Inner State
// ============================================================================

/// Internal state for the cart store.
#[derive(Default)]
struct CartInner {
    /// Current cart contents.
    state: Arc<CartState>,
    /// Bumped on every state change, hydration included.
    version: u64,
    /// Set once hydration has run, whether or not it applied a snapshot.
    hydrated: bool,
}

// ============================================================================
// Write Tracking
// ============================================================================

/// Background persistence writes.
#[derive(Default)]
struct WriteTracker {
    /// Highest state version a write has been attempted for.
    ///
    /// Held across the storage call, so writes never overlap and an older
    /// snapshot can never land after a newer one.
    latest: tokio::sync::Mutex<u64>,
    /// Handles of spawned tasks not yet reaped.
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl WriteTracker {
    fn track(&self, handle: JoinHandle<()>) {
        let mut tasks = self.tasks.lock().unwrap_or_else(PoisonError::into_inner);
        tasks.retain(|h| !h.is_finished());
        tasks.push(handle);
    }

    fn take(&self) -> Vec<JoinHandle<()>> {
        std::mem::take(&mut *self.tasks.lock().unwrap_or_else(PoisonError::into_inner))
    }

    async fn write(&self, storage: &dyn CartStorage, key: &str, state: &CartState, version: u64) {
        let mut latest = self.latest.lock().await;
        if *latest >= version {
            debug!(key, version, latest = *latest, "Snapshot superseded, skipping write");
            return;
        }
        *latest = version;

        let json = match state.to_json() {
            Ok(json) => json,
            Err(e) => {
                warn!(key, version, error = %e, "Failed to serialize cart");
                return;
            }
        };

        match storage.set(key, json).await {
            Ok(()) => debug!(
                key,
                version,
                entries = state.len(),
                backend = storage.name(),
                "Cart snapshot written"
            ),
            Err(e) => warn!(key, version, error = %e, "Failed to persist cart"),
        }
    }
}

// ============================================================================
// Cart Store
// ============================================================================

/// Shared shopping-cart state.
///
/// All clones share one cart. Mutations take effect in memory before they
/// return; the matching storage write runs on a spawned task and is never
/// awaited by the caller. Mutating methods must be called from within a
/// Tokio runtime.
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<RwLock<CartInner>>,
    storage: Arc<dyn CartStorage>,
    key: Arc<str>,
    notify: Arc<watch::Sender<Arc<CartState>>>,
    writes: Arc<WriteTracker>,
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("key", &self.key)
            .field("backend", &self.storage.name())
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Creates an empty store using the default storage key.
    ///
    /// Nothing is read from storage; see [`CartStore::open`] and
    /// [`CartStore::load`] for hydrating constructors.
    pub fn new(storage: Arc<dyn CartStorage>) -> Self {
        Self::with_key(storage, DEFAULT_STORAGE_KEY)
    }

    /// Creates an empty store persisting under `key`.
    pub fn with_key(storage: Arc<dyn CartStorage>, key: impl Into<String>) -> Self {
        let key: String = key.into();
        let (notify, _) = watch::channel(Arc::new(CartState::new()));
        Self {
            inner: Arc::new(RwLock::new(CartInner::default())),
            storage,
            key: Arc::from(key),
            notify: Arc::new(notify),
            writes: Arc::new(WriteTracker::default()),
        }
    }

    /// Creates an empty store using the configured storage key.
    pub fn from_config(storage: Arc<dyn CartStorage>, config: &CartConfig) -> Self {
        Self::with_key(storage, config.storage_key.clone())
    }

    /// Creates a store and starts hydrating it in the background.
    ///
    /// Returns immediately with an empty cart; subscribers see the saved
    /// cart once the read completes.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn open(storage: Arc<dyn CartStorage>, key: impl Into<String>) -> Self {
        let store = Self::with_key(storage, key);
        let hydrating = store.clone();
        store.writes.track(tokio::spawn(async move {
            hydrating.hydrate().await;
        }));
        store
    }

    /// Creates a store and waits for hydration to finish.
    pub async fn load(storage: Arc<dyn CartStorage>, key: impl Into<String>) -> Self {
        let store = Self::with_key(storage, key);
        store.hydrate().await;
        store
    }

    /// Returns the storage key for the snapshot.
    pub fn storage_key(&self) -> &str {
        &self.key
    }

    // ========================================================================
    // Read Access
    // ========================================================================

    /// Returns the current cart.
    pub async fn products(&self) -> Arc<CartState> {
        Arc::clone(&self.inner.read().await.state)
    }

    /// Subscribes to cart changes.
    ///
    /// The receiver always holds the latest snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Arc<CartState>> {
        self.notify.subscribe()
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Adds one unit of `product`, merging with an existing line.
    ///
    /// Returns the line's quantity after the add.
    ///
    /// # Errors
    ///
    /// Returns an invalid-cart error, leaving the cart untouched, if the
    /// product's price is not finite.
    pub async fn add_to_cart(&self, product: ProductInput) -> Result<u32, StoreError> {
        let id = product.id.clone();
        match self.commit(|state| state.add(product)).await {
            Ok(quantity) => {
                debug!(id = %id, quantity, "Added to cart");
                Ok(quantity)
            }
            Err(e) => {
                warn!(id = %id, error = %e, "Rejected product");
                Err(e.into())
            }
        }
    }

    /// Increments the quantity of line `id`.
    ///
    /// Returns false, without publishing or writing, if no such line exists
    /// or it is already at `u32::MAX`.
    pub async fn increment(&self, id: &str) -> bool {
        let changed = self.commit(|state| state.increment(id)).await;
        debug!(id, changed, "Increment");
        changed
    }

    /// Decrements the quantity of line `id`, never going below 1.
    ///
    /// Returns false, without publishing or writing, if the line is absent
    /// or already at 1.
    pub async fn decrement(&self, id: &str) -> bool {
        let changed = self.commit(|state| state.decrement(id)).await;
        debug!(id, changed, "Decrement");
        changed
    }

    /// Empties the cart. The empty snapshot is persisted like any change.
    pub async fn clear(&self) {
        let mut inner = self.inner.write().await;
        self.replace(&mut inner, CartState::new());
        info!(key = %self.key, "Cart cleared");
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    /// Loads the saved cart from storage.
    ///
    /// A missing, unreadable, or malformed snapshot leaves the cart empty.
    /// The result is written back either way, so storage always holds a
    /// valid snapshot afterwards. Hydration runs at most once, and is
    /// skipped if the cart was already changed. Returns true if a saved
    /// cart was applied.
    pub async fn hydrate(&self) -> bool {
        let saved = self.read_snapshot().await;

        let mut inner = self.inner.write().await;
        if inner.hydrated {
            debug!(key = %self.key, "Already hydrated");
            return false;
        }
        inner.hydrated = true;
        if inner.version > 0 {
            warn!(
                key = %self.key,
                version = inner.version,
                "Cart changed before hydration finished, keeping in-memory cart"
            );
            return false;
        }

        let applied = saved.is_some();
        if let Some(state) = saved {
            info!(key = %self.key, entries = state.len(), "Cart hydrated");
            inner.state = Arc::new(state);
        }
        inner.version += 1;
        self.publish(&inner);
        applied
    }

    /// Waits until every write spawned so far has finished.
    pub async fn flush(&self) {
        loop {
            let pending = self.writes.take();
            if pending.is_empty() {
                break;
            }
            debug!(count = pending.len(), "Flushing cart writes");
            for handle in pending {
                if let Err(e) = handle.await {
                    warn!(error = %e, "Cart write task failed");
                }
            }
        }
    }

    async fn read_snapshot(&self) -> Option<CartState> {
        match self.storage.get(&self.key).await {
            Ok(Some(raw)) => match CartState::from_json(&raw) {
                Ok(state) => Some(state),
                Err(e) => {
                    warn!(key = %self.key, error = %e, "Saved cart is malformed, starting empty");
                    None
                }
            },
            Ok(None) => {
                info!(key = %self.key, "No saved cart");
                None
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to read saved cart, starting empty");
                None
            }
        }
    }

    /// Applies `f` to a copy of the cart under the write lock.
    ///
    /// The copy replaces the cart only if it differs; otherwise there is no
    /// version bump, no publish, and no write.
    async fn commit<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut CartState) -> R,
    {
        let mut inner = self.inner.write().await;
        let mut next = CartState::clone(&inner.state);
        let result = f(&mut next);
        if next != *inner.state {
            self.replace(&mut inner, next);
        }
        result
    }

    /// Installs `next` as a new version and publishes it.
    fn replace(&self, inner: &mut CartInner, next: CartState) {
        inner.state = Arc::new(next);
        inner.version += 1;
        self.publish(inner);
    }

    /// Notifies subscribers and spawns the storage write for the current
    /// version. Called with the write lock held so writes spawn in order.
    fn publish(&self, inner: &CartInner) {
        let state = Arc::clone(&inner.state);
        let version = inner.version;
        self.notify.send_replace(Arc::clone(&state));

        let storage = Arc::clone(&self.storage);
        let key = Arc::clone(&self.key);
        let writes = Arc::clone(&self.writes);
        self.writes.track(tokio::spawn(async move {
            writes.write(storage.as_ref(), &key, &state, version).await;
        }));
    }
}

// ============================================================================
// Tests
// ============================================================================
