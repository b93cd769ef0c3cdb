//! Product value types and their wire representation.
//!
//! The remote API speaks camelCase JSON. Payloads are deserialized into
//! these typed values at the gateway boundary; a record arriving without
//! an `id` is a decode error there, so everything past the gateway can
//! rely on confirmed products being identified.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A product confirmed by the remote system.
///
/// Always carries an `id`; unsaved drafts are a separate type
/// ([`ProductDraft`]) and never enter the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock_quantity: i64,
    /// Set by the remote system; read-only to the client.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Set by the remote system; read-only to the client.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// The editable fields of a product, before the remote system has
/// confirmed them.
///
/// `id` is `None` for a brand-new product and `Some` when editing an
/// existing one. Serialization skips a `None` id entirely so create
/// requests carry no id field at all.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock_quantity: i64,
}

impl ProductDraft {
    /// Draft with the same editable fields as an existing product,
    /// keyed to it for an update.
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: Some(product.id.clone()),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            stock_quantity: product.stock_quantity,
        }
    }
}
