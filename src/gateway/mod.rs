//! Remote product gateway.
//!
//! Translates CRUD intents into single HTTP calls against the configured
//! `/products` endpoint and maps responses into typed outcomes. One call
//! per operation: no retry, no timeout beyond the client default.

pub mod error;

pub use error::GatewayError;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;

use crate::config::ApiConfig;
use crate::model::{Product, ProductDraft};

/// Boundary seam for the remote product API.
///
/// The store is generic over this trait so tests can drive it with an
/// in-memory fake instead of a live endpoint.
#[allow(async_fn_in_trait)]
pub trait ProductGateway {
    /// Fetch every product.
    async fn list_all(&self) -> Result<Vec<Product>, GatewayError>;

    /// Fetch one product by id. `NotFound` when the remote has no record.
    async fn get_by_id(&self, id: &str) -> Result<Product, GatewayError>;

    /// Create a product from a draft (sent without an id); returns the
    /// identified record the remote system created.
    async fn create(&self, draft: &ProductDraft) -> Result<Product, GatewayError>;

    /// Replace the fields of an existing product; returns the updated
    /// record.
    async fn update(&self, id: &str, draft: &ProductDraft) -> Result<Product, GatewayError>;

    /// Delete a product. A 2xx response means success.
    async fn delete(&self, id: &str) -> Result<bool, GatewayError>;
}

/// HTTP implementation of [`ProductGateway`] backed by reqwest.
#[derive(Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: String,
}

impl HttpGateway {
    /// Build a gateway from API configuration.
    pub fn new(config: &ApiConfig) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .build()
            .expect("Failed to build gateway client");

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/products", self.base_url)
    }

    fn item_url(&self, id: &str) -> String {
        format!("{}/products/{}", self.base_url, id)
    }

    /// Map a non-success response to the gateway taxonomy.
    fn check_status(response: Response, id: Option<&str>) -> Result<Response, GatewayError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::NOT_FOUND {
            if let Some(id) = id {
                return Err(GatewayError::NotFound { id: id.to_string() });
            }
        }
        Err(GatewayError::Status {
            status: status.as_u16(),
        })
    }
}

impl ProductGateway for HttpGateway {
    async fn list_all(&self) -> Result<Vec<Product>, GatewayError> {
        let url = self.collection_url();
        tracing::debug!(%url, "GET product list");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| GatewayError::Connection { source: e })?;

        Self::check_status(response, None)?
            .json::<Vec<Product>>()
            .await
            .map_err(|e| GatewayError::Decode { source: e })
    }

    async fn get_by_id(&self, id: &str) -> Result<Product, GatewayError> {
        let url = self.item_url(id);
        tracing::debug!(%url, "GET product");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| GatewayError::Connection { source: e })?;

        Self::check_status(response, Some(id))?
            .json::<Product>()
            .await
            .map_err(|e| GatewayError::Decode { source: e })
    }

    async fn create(&self, draft: &ProductDraft) -> Result<Product, GatewayError> {
        let url = self.collection_url();
        tracing::debug!(%url, name = %draft.name, "POST new product");

        let response = self
            .client
            .post(&url)
            .json(draft)
            .send()
            .await
            .map_err(|e| GatewayError::Connection { source: e })?;

        Self::check_status(response, None)?
            .json::<Product>()
            .await
            .map_err(|e| GatewayError::Decode { source: e })
    }

    async fn update(&self, id: &str, draft: &ProductDraft) -> Result<Product, GatewayError> {
        let url = self.item_url(id);
        tracing::debug!(%url, "PUT product update");

        let response = self
            .client
            .put(&url)
            .json(draft)
            .send()
            .await
            .map_err(|e| GatewayError::Connection { source: e })?;

        Self::check_status(response, Some(id))?
            .json::<Product>()
            .await
            .map_err(|e| GatewayError::Decode { source: e })
    }

    async fn delete(&self, id: &str) -> Result<bool, GatewayError> {
        let url = self.item_url(id);
        tracing::debug!(%url, "DELETE product");

        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(|e| GatewayError::Connection { source: e })?;

        Self::check_status(response, Some(id))?;
        Ok(true)
    }
}
