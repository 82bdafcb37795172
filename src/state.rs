//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::domain::store::RedirectionStore;

/// State cloned into each request.
///
/// The store is built once in [`crate::server::run`] and shared by
/// reference count, so every handler sees the same table.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RedirectionStore>,
    /// Answer lookup misses with 404 instead of the legacy 200.
    pub strict_not_found: bool,
}

impl AppState {
    pub fn new(store: Arc<dyn RedirectionStore>, strict_not_found: bool) -> Self {
        Self {
            store,
            strict_not_found,
        }
    }
}
