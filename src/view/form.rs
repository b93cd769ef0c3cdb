//! Form view model: a mutable draft of a product's editable fields.
//!
//! Numeric fields hold the raw text exactly as typed; validation parses
//! them and collects every violation before submission, so the form can
//! surface all field messages at once instead of stopping at the first.

use std::collections::BTreeMap;

use crate::gateway::ProductGateway;
use crate::model::{Product, ProductDraft};
use crate::store::ProductStore;

/// Field keys used in the violation map.
pub mod field {
    pub const NAME: &str = "name";
    pub const DESCRIPTION: &str = "description";
    pub const PRICE: &str = "price";
    pub const STOCK_QUANTITY: &str = "stock_quantity";
}

/// Editable form state for creating or editing one product.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormModel {
    /// `Some` when editing an existing product, `None` for a new one.
    pub id: Option<String>,
    pub name: String,
    pub description: String,
    /// Raw price input as typed.
    pub price: String,
    /// Raw stock quantity input as typed.
    pub stock_quantity: String,
    pub is_submitting: bool,
    violations: BTreeMap<&'static str, String>,
}

impl FormModel {
    /// Empty form for a new product.
    pub fn new() -> Self {
        Self::default()
    }

    /// Form pre-filled from an existing product for editing.
    pub fn edit(product: &Product) -> Self {
        Self {
            id: Some(product.id.clone()),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.to_string(),
            stock_quantity: product.stock_quantity.to_string(),
            is_submitting: false,
            violations: BTreeMap::new(),
        }
    }

    /// Fetch an existing product and open it for editing.
    ///
    /// `None` means the product could not be fetched; the caller should
    /// navigate back to the list.
    pub async fn load<G: ProductGateway>(store: &ProductStore<G>, id: &str) -> Option<Self> {
        store.fetch_one(id).await.map(|product| Self::edit(&product))
    }

    /// Current field violations, keyed by field name.
    pub fn violations(&self) -> &BTreeMap<&'static str, String> {
        &self.violations
    }

    /// Violation message for one field, if any.
    pub fn violation(&self, field: &str) -> Option<&str> {
        self.violations.get(field).map(String::as_str)
    }

    /// Run all validation rules, recording every violation.
    ///
    /// Returns true when the draft is valid.
    pub fn validate(&mut self) -> bool {
        match self.check() {
            Ok(_) => {
                self.violations.clear();
                true
            }
            Err(violations) => {
                self.violations = violations;
                false
            }
        }
    }

    /// Submit the draft through the store.
    ///
    /// Aborts without any store call when validation fails. Otherwise
    /// creates or updates depending on whether the form carries an id;
    /// `is_submitting` is cleared regardless of outcome, and `None` on a
    /// valid draft means the store recorded the failure in `last_error`.
    pub async fn submit<G: ProductGateway>(&mut self, store: &ProductStore<G>) -> Option<Product> {
        let draft = match self.check() {
            Ok(draft) => {
                self.violations.clear();
                draft
            }
            Err(violations) => {
                self.violations = violations;
                return None;
            }
        };

        self.is_submitting = true;
        let result = match &self.id {
            Some(id) => store.update(id, &draft).await,
            None => store.create(&draft).await,
        };
        self.is_submitting = false;
        result
    }

    /// Parse and validate every field, building the typed draft on
    /// success or the full violation map on failure.
    fn check(&self) -> Result<ProductDraft, BTreeMap<&'static str, String>> {
        let mut violations = BTreeMap::new();

        if self.name.trim().is_empty() {
            violations.insert(field::NAME, "Name is required".to_string());
        }

        if self.description.trim().is_empty() {
            violations.insert(field::DESCRIPTION, "Description is required".to_string());
        }

        let price = match self.price.trim().parse::<f64>() {
            Ok(price) if price > 0.0 => Some(price),
            Ok(_) => {
                violations.insert(field::PRICE, "Price must be greater than zero".to_string());
                None
            }
            Err(_) => {
                violations.insert(field::PRICE, "Price must be a number".to_string());
                None
            }
        };

        let stock_quantity = match self.stock_quantity.trim().parse::<i64>() {
            Ok(stock) if stock >= 0 => Some(stock),
            Ok(_) => {
                violations.insert(
                    field::STOCK_QUANTITY,
                    "Stock quantity cannot be negative".to_string(),
                );
                None
            }
            Err(_) => {
                violations.insert(
                    field::STOCK_QUANTITY,
                    "Stock quantity must be a whole number".to_string(),
                );
                None
            }
        };

        if !violations.is_empty() {
            return Err(violations);
        }

        Ok(ProductDraft {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            // Both parses succeeded or violations would be non-empty.
            price: price.unwrap_or_default(),
            stock_quantity: stock_quantity.unwrap_or_default(),
        })
    }
}
