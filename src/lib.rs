//! Core state and API client for a product management console.
//!
//! The presentation layer (routing, rendering) lives elsewhere; this crate
//! provides the pieces it consumes:
//!
//! - [`gateway`]: thin async HTTP client over the remote `/products` API
//! - [`store`]: the authoritative in-process product collection with
//!   change notifications
//! - [`view`]: pure projections of store state for the list and form
//!   surfaces
//!
//! # Architecture
//!
//! ```text
//! Gateway ──→ Store ──→ View Models ──→ presentation
//!    ↑          ↑
//!    └── writes ┘ (form submit / delete)
//! ```
//!
//! Reads flow one way from the remote API down to the view models; writes
//! flow back up through the store, which is the only owner of mutable
//! state.

pub mod config;
pub mod gateway;
pub mod model;
pub mod store;
pub mod view;

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// Respects `RUST_LOG`; defaults to `info` when unset.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();
}
