//! API route configuration.

use crate::api::handlers::{create_redirection_handler, method_not_allowed_handler};
use crate::state::AppState;
use axum::{Router, routing::post};

/// Routes under `/api`.
///
/// # Endpoints
///
/// - `POST /api/new` - Register a redirection
/// - any other method on `/api/new` - 400 "Not allowed"
pub fn api_routes() -> Router<AppState> {
    Router::new().route(
        "/api/new",
        post(create_redirection_handler).fallback(method_not_allowed_handler),
    )
}
