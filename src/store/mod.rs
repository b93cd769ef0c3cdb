//! The authoritative in-process product collection.
//!
//! Provides thread-safe shared state for all views: the confirmed product
//! records keyed by id, a loading flag, and the last error message. Every
//! CRUD operation delegates to the gateway, reconciles local state only
//! after the remote system confirms, and broadcasts a change event so
//! subscribed views can re-render.
//!
//! Gateway failures never cross into view code: each operation records a
//! human-readable message in `last_error` and returns a sentinel
//! (`None`/`false`) instead of propagating.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tokio::sync::broadcast;

use crate::config::ApiConfig;
use crate::gateway::{HttpGateway, ProductGateway};
use crate::model::{Product, ProductDraft};

/// Capacity of the change-event channel; a lagging subscriber misses
/// events but can always recover from a fresh snapshot.
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Change notification emitted by the store.
///
/// Each operation emits exactly one completion event, success or failure.
/// `RefreshStarted` is the one extra signal, emitted when the loading flag
/// flips on so views can render a spinner.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    /// A refresh began; `is_loading` is now true.
    RefreshStarted,
    /// A refresh completed (the collection was replaced, or emptied on
    /// failure with `last_error` set).
    Refreshed,
    /// A product was created and inserted.
    Created { id: String },
    /// A product was updated in place.
    Updated { id: String },
    /// A product was deleted and removed.
    Deleted { id: String },
    /// An operation failed; `last_error` holds the message.
    Failed,
}

/// Owned copy of the store state at one point in time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreSnapshot {
    /// The confirmed records, in no particular order.
    pub products: Vec<Product>,
    pub is_loading: bool,
    pub last_error: Option<String>,
}

struct StoreInner {
    /// Keyed by id; the type guarantees no duplicate ids.
    products: HashMap<String, Product>,
    is_loading: bool,
    last_error: Option<String>,
}

/// Thread-safe product store, generic over the gateway seam.
///
/// Cloning is cheap; every clone shares the same state and event channel.
/// State is only mutated under the lock and never across an await, so
/// concurrent operations on different ids cannot corrupt each other.
/// Two concurrent operations on the *same* id race: the last completed
/// write wins. There is no cancellation; a completed gateway call always
/// reconciles local state.
pub struct ProductStore<G> {
    inner: Arc<RwLock<StoreInner>>,
    events: broadcast::Sender<StoreEvent>,
    gateway: Arc<G>,
}

impl<G> Clone for ProductStore<G> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            events: self.events.clone(),
            gateway: self.gateway.clone(),
        }
    }
}

impl ProductStore<HttpGateway> {
    /// Store wired to the remote API from configuration, with the initial
    /// refresh performed.
    pub async fn open(config: &ApiConfig) -> Self {
        Self::with_gateway(HttpGateway::new(config)).await
    }
}

impl<G: ProductGateway> ProductStore<G> {
    /// Empty store over the given gateway. No refresh is performed;
    /// prefer [`ProductStore::with_gateway`] outside of tests.
    pub fn new(gateway: G) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            inner: Arc::new(RwLock::new(StoreInner {
                products: HashMap::new(),
                is_loading: false,
                last_error: None,
            })),
            events,
            gateway: Arc::new(gateway),
        }
    }

    /// New store with the initial refresh performed.
    pub async fn with_gateway(gateway: G) -> Self {
        let store = Self::new(gateway);
        store.refresh().await;
        store
    }

    /// Subscribe to change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    /// Owned copy of the current state.
    pub fn snapshot(&self) -> StoreSnapshot {
        let state = self.inner.read().expect("product store lock poisoned");
        StoreSnapshot {
            products: state.products.values().cloned().collect(),
            is_loading: state.is_loading,
            last_error: state.last_error.clone(),
        }
    }

    /// The confirmed records, in no particular order.
    pub fn products(&self) -> Vec<Product> {
        self.inner
            .read()
            .expect("product store lock poisoned")
            .products
            .values()
            .cloned()
            .collect()
    }

    /// Look up one record in the local collection.
    pub fn get(&self, id: &str) -> Option<Product> {
        self.inner
            .read()
            .expect("product store lock poisoned")
            .products
            .get(id)
            .cloned()
    }

    pub fn is_loading(&self) -> bool {
        self.inner
            .read()
            .expect("product store lock poisoned")
            .is_loading
    }

    pub fn last_error(&self) -> Option<String> {
        self.inner
            .read()
            .expect("product store lock poisoned")
            .last_error
            .clone()
    }

    /// Replace the collection wholesale from the remote API.
    ///
    /// A failure empties the collection and records the error rather than
    /// propagating, so a broken backend degrades to an empty list view.
    pub async fn refresh(&self) {
        {
            let mut state = self.inner.write().expect("product store lock poisoned");
            state.is_loading = true;
        }
        self.notify(StoreEvent::RefreshStarted);

        let result = self.gateway.list_all().await;

        {
            let mut state = self.inner.write().expect("product store lock poisoned");
            match result {
                Ok(products) => {
                    tracing::info!(count = products.len(), "Product collection refreshed");
                    state.products = products.into_iter().map(|p| (p.id.clone(), p)).collect();
                    state.last_error = None;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Refresh failed, collection emptied");
                    state.products.clear();
                    state.last_error = Some(format!("Failed to fetch products: {}", e));
                }
            }
            state.is_loading = false;
        }
        self.notify(StoreEvent::Refreshed);
    }

    /// Fetch one product from the remote API without touching the local
    /// collection.
    ///
    /// `None` means "not found or unreachable, navigate away"; the reason
    /// is recorded in `last_error`.
    pub async fn fetch_one(&self, id: &str) -> Option<Product> {
        match self.gateway.get_by_id(id).await {
            Ok(product) => Some(product),
            Err(e) => {
                tracing::warn!(id, error = %e, "Failed to fetch product");
                self.record_error(format!("Failed to fetch product with ID {}", id));
                self.notify(StoreEvent::Failed);
                None
            }
        }
    }

    /// Create a product from a draft.
    ///
    /// The record is inserted only after the gateway confirms the creation
    /// and returns it with an assigned id.
    pub async fn create(&self, draft: &ProductDraft) -> Option<Product> {
        match self.gateway.create(draft).await {
            Ok(product) => {
                {
                    let mut state = self.inner.write().expect("product store lock poisoned");
                    state.products.insert(product.id.clone(), product.clone());
                }
                tracing::info!(id = %product.id, name = %product.name, "Product created");
                self.notify(StoreEvent::Created {
                    id: product.id.clone(),
                });
                Some(product)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to create product");
                self.record_error("Failed to add product".to_string());
                self.notify(StoreEvent::Failed);
                None
            }
        }
    }

    /// Replace the fields of an existing product.
    pub async fn update(&self, id: &str, draft: &ProductDraft) -> Option<Product> {
        match self.gateway.update(id, draft).await {
            Ok(product) => {
                {
                    let mut state = self.inner.write().expect("product store lock poisoned");
                    state.products.insert(product.id.clone(), product.clone());
                }
                tracing::info!(id = %product.id, "Product updated");
                self.notify(StoreEvent::Updated {
                    id: product.id.clone(),
                });
                Some(product)
            }
            Err(e) => {
                tracing::warn!(id, error = %e, "Failed to update product");
                self.record_error("Failed to update product".to_string());
                self.notify(StoreEvent::Failed);
                None
            }
        }
    }

    /// Delete a product.
    ///
    /// Returns the gateway's outcome. An id the local collection never
    /// held is a local no-op; the remote outcome is still reported.
    pub async fn delete(&self, id: &str) -> bool {
        match self.gateway.delete(id).await {
            Ok(deleted) => {
                if deleted {
                    let removed = {
                        let mut state = self.inner.write().expect("product store lock poisoned");
                        state.products.remove(id).is_some()
                    };
                    if !removed {
                        tracing::debug!(id, "Deleted product was not in the local collection");
                    }
                    tracing::info!(id, "Product deleted");
                    self.notify(StoreEvent::Deleted { id: id.to_string() });
                }
                deleted
            }
            Err(e) => {
                tracing::warn!(id, error = %e, "Failed to delete product");
                self.record_error("Failed to delete product".to_string());
                self.notify(StoreEvent::Failed);
                false
            }
        }
    }

    fn record_error(&self, message: String) {
        let mut state = self.inner.write().expect("product store lock poisoned");
        state.last_error = Some(message);
    }

    fn notify(&self, event: StoreEvent) {
        // No subscribers is fine; views come and go.
        let _ = self.events.send(event);
    }
}
