//! List view model: filtered, sorted projection of the product
//! collection.

use std::cmp::Ordering;

use crate::model::Product;

/// Field the list is sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Name,
    Price,
    StockQuantity,
}

/// Direction of the sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// UI inputs driving the list projection.
///
/// Holds no product data. [`ListModel::project`] recomputes a fresh
/// ordered sequence from the store's collection on every call; the order
/// is never persisted anywhere.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListModel {
    /// Free-text filter, matched case-insensitively against name and
    /// description.
    pub search_term: String,
    pub sort_field: SortField,
    pub sort_direction: SortDirection,
}

impl ListModel {
    /// Select a sort field. Selecting the field already active toggles
    /// the direction instead.
    pub fn sort_by(&mut self, field: SortField) {
        if self.sort_field == field {
            self.toggle_direction();
        } else {
            self.sort_field = field;
            self.sort_direction = SortDirection::Ascending;
        }
    }

    pub fn toggle_direction(&mut self) {
        self.sort_direction = match self.sort_direction {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        };
    }

    /// Filter and stable-sort the collection for display.
    pub fn project(&self, products: &[Product]) -> Vec<Product> {
        let needle = self.search_term.trim().to_lowercase();

        let mut rows: Vec<Product> = products
            .iter()
            .filter(|p| {
                needle.is_empty()
                    || p.name.to_lowercase().contains(&needle)
                    || p.description.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect();

        rows.sort_by(|a, b| {
            let ordering = match self.sort_field {
                SortField::Name => a.name.cmp(&b.name),
                SortField::Price => a.price.partial_cmp(&b.price).unwrap_or(Ordering::Equal),
                SortField::StockQuantity => a.stock_quantity.cmp(&b.stock_quantity),
            };
            match self.sort_direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });

        rows
    }
}
