//! Top-level router.
//!
//! # Route Structure
//!
//! - `POST /api/new` - Register a redirection
//! - `*` - Every other path is looked up as a short key
//!
//! Paths are matched exactly; no trailing-slash normalization is applied
//! because the path itself is the lookup key.

use crate::api;
use crate::api::handlers::redirect_handler;
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .merge(api::routes::api_routes())
        .fallback(redirect_handler)
        .with_state(state)
        .layer(tracing::layer())
}
