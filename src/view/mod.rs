//! View models: read-mostly projections of store state, one per
//! presentation surface.
//!
//! These hold UI inputs only (search text, sort selection, form fields)
//! and never keep an independent copy of the collection; the store stays
//! the sole owner of truth.

pub mod form;
pub mod list;

pub use form::FormModel;
pub use list::{ListModel, SortDirection, SortField};
