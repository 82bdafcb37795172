//! Handlers for the redirection creation endpoint.

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, header},
};
use tracing::{debug, info};

use crate::api::dto::decode_new_redirection;
use crate::error::AppError;
use crate::state::AppState;

const APPLICATION_JSON: &str = "application/json";

/// Registers a redirection from a JSON body.
///
/// # Endpoint
///
/// `POST /api/new`
///
/// # Request Body
///
/// ```json
/// { "ShortKey": "/docs", "Resource": "https://example.com/docs" }
/// ```
///
/// `Content-Type` must be exactly `application/json`. An existing entry for
/// the same key is overwritten.
///
/// # Response
///
/// 200 with an empty body.
///
/// # Errors
///
/// - 400 for a missing or wrong `Content-Type`, or any body the decoder
///   rejects (see [`crate::api::dto::DecodeError`])
/// - 500 if the store fails
pub async fn create_redirection_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(), AppError> {
    let is_json = headers
        .get(header::CONTENT_TYPE)
        .is_some_and(|value| value.as_bytes() == APPLICATION_JSON.as_bytes());
    if !is_json {
        return Err(AppError::UnsupportedContentType);
    }

    let redirection = decode_new_redirection(&body).inspect_err(|err| {
        if err.is_client_error() {
            debug!("Rejected creation body: {}", err);
        }
    })?;

    state
        .store
        .put(&redirection.short_key, &redirection.resource)
        .await?;

    info!(
        short_key = %redirection.short_key,
        resource = %redirection.resource,
        "Registered redirection"
    );

    Ok(())
}

/// Rejects every method other than POST on `/api/new`.
pub async fn method_not_allowed_handler() -> AppError {
    AppError::MethodNotAllowed
}
