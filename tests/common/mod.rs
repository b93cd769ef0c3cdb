//! Shared test utilities: an in-process mock of the remote product API.
//!
//! Serves the same `/products` REST surface the real backend exposes,
//! over real HTTP on a loopback port, backed by a HashMap.

#![allow(dead_code)]

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio::sync::watch;
use uuid::Uuid;

use product_console::config::ApiConfig;
use product_console::model::{Product, ProductDraft};

/// Headers captured from a request, for assertions.
#[derive(Debug, Clone, Default)]
pub struct CapturedHeaders {
    pub accept: Option<String>,
    pub content_type: Option<String>,
}

#[derive(Clone, Default)]
struct MockApi {
    products: Arc<Mutex<HashMap<String, Product>>>,
    failing: Arc<AtomicBool>,
    last_headers: Arc<Mutex<CapturedHeaders>>,
}

impl MockApi {
    fn guard(&self) -> Result<(), StatusCode> {
        if self.failing.load(Ordering::SeqCst) {
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        } else {
            Ok(())
        }
    }

    fn capture(&self, headers: &HeaderMap) {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(String::from)
        };
        *self.last_headers.lock().unwrap() = CapturedHeaders {
            accept: header("accept"),
            content_type: header("content-type"),
        };
    }
}

/// In-process mock product API server.
///
/// Shuts down when dropped.
pub struct MockServer {
    pub addr: SocketAddr,
    api: MockApi,
    shutdown: watch::Sender<bool>,
}

impl MockServer {
    pub async fn start() -> Self {
        let api = MockApi::default();
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock server");
        let addr = listener.local_addr().expect("Failed to read local addr");

        let router = Router::new()
            .route("/api/products", get(list_products).post(create_product))
            .route(
                "/api/products/{id}",
                get(get_product).put(update_product).delete(delete_product),
            )
            .with_state(api.clone());

        let (shutdown, mut rx) = watch::channel(false);
        tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async move {
                    let _ = rx.changed().await;
                })
                .await
                .expect("Mock server failed");
        });

        Self {
            addr,
            api,
            shutdown,
        }
    }

    /// Base URL including the `/api` prefix, as the real backend uses.
    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    /// Gateway configuration pointing at this server.
    pub fn config(&self) -> ApiConfig {
        ApiConfig {
            base_url: self.base_url(),
            timeout_seconds: 5,
            ..ApiConfig::default()
        }
    }

    /// Insert a product directly into the remote state.
    pub fn seed(&self, name: &str, price: f64, stock: i64) -> Product {
        let product = Product {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            description: format!("{} description", name),
            price,
            stock_quantity: stock,
            created_at: Some(Utc::now()),
            updated_at: None,
        };
        self.api
            .products
            .lock()
            .unwrap()
            .insert(product.id.clone(), product.clone());
        product
    }

    /// Remote state keyed by id.
    pub fn remote_products(&self) -> HashMap<String, Product> {
        self.api.products.lock().unwrap().clone()
    }

    /// When set, every request answers 500.
    pub fn set_failing(&self, failing: bool) {
        self.api.failing.store(failing, Ordering::SeqCst);
    }

    /// Headers captured from the most recent request.
    pub fn last_headers(&self) -> CapturedHeaders {
        self.api.last_headers.lock().unwrap().clone()
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        let _ = self.shutdown.send(true);
    }
}

/// A loopback URL nothing listens on, for transport-failure tests.
pub fn unreachable_base_url() -> String {
    let listener =
        std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind to free port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/api", port)
}

async fn list_products(
    State(api): State<MockApi>,
    headers: HeaderMap,
) -> Result<Json<Vec<Product>>, StatusCode> {
    api.guard()?;
    api.capture(&headers);
    Ok(Json(api.products.lock().unwrap().values().cloned().collect()))
}

async fn get_product(
    State(api): State<MockApi>,
    Path(id): Path<String>,
) -> Result<Json<Product>, StatusCode> {
    api.guard()?;
    api.products
        .lock()
        .unwrap()
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn create_product(
    State(api): State<MockApi>,
    headers: HeaderMap,
    Json(draft): Json<ProductDraft>,
) -> Result<Json<Product>, StatusCode> {
    api.guard()?;
    api.capture(&headers);
    let product = Product {
        id: Uuid::new_v4().to_string(),
        name: draft.name,
        description: draft.description,
        price: draft.price,
        stock_quantity: draft.stock_quantity,
        created_at: Some(Utc::now()),
        updated_at: None,
    };
    api.products
        .lock()
        .unwrap()
        .insert(product.id.clone(), product.clone());
    Ok(Json(product))
}

async fn update_product(
    State(api): State<MockApi>,
    Path(id): Path<String>,
    Json(draft): Json<ProductDraft>,
) -> Result<Json<Product>, StatusCode> {
    api.guard()?;
    let mut products = api.products.lock().unwrap();
    let existing = products.get(&id).cloned().ok_or(StatusCode::NOT_FOUND)?;
    let product = Product {
        id: id.clone(),
        name: draft.name,
        description: draft.description,
        price: draft.price,
        stock_quantity: draft.stock_quantity,
        created_at: existing.created_at,
        updated_at: Some(Utc::now()),
    };
    products.insert(id, product.clone());
    Ok(Json(product))
}

async fn delete_product(
    State(api): State<MockApi>,
    Path(id): Path<String>,
) -> Result<StatusCode, StatusCode> {
    api.guard()?;
    if api.products.lock().unwrap().remove(&id).is_none() {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(StatusCode::NO_CONTENT)
}
