//! Handler for short key redirects.

use std::borrow::Cow;

use axum::{
    extract::State,
    http::{HeaderValue, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use percent_encoding::percent_decode_str;
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;

const NOT_FOUND_BODY: &str = "Not found";

/// Redirects a registered short key to its resource.
///
/// # Endpoint
///
/// Any method on any path not claimed by another route.
///
/// The lookup key is the percent-decoded request path, leading slash
/// included and query string excluded.
///
/// # Responses
///
/// - 303 See Other with `Location` set to the stored resource
/// - `Not found` on a miss, with status 200 by default or 404 when
///   [`AppState::strict_not_found`] is set
///
/// # Errors
///
/// Returns 500 if the store fails or the stored resource cannot be sent as
/// a `Location` header.
pub async fn redirect_handler(
    State(state): State<AppState>,
    uri: Uri,
) -> Result<Response, AppError> {
    let short_key = lookup_key(uri.path());

    let Some(resource) = state.store.get(&short_key).await? else {
        debug!("Lookup MISS for {}", short_key);
        let status = if state.strict_not_found {
            StatusCode::NOT_FOUND
        } else {
            StatusCode::OK
        };
        return Ok((status, NOT_FOUND_BODY).into_response());
    };

    debug!("Lookup HIT for {} -> {}", short_key, resource);

    let location = HeaderValue::try_from(resource).map_err(|e| {
        AppError::Internal(format!(
            "Resource for {} is not a valid Location header: {}",
            short_key, e
        ))
    })?;

    Ok((StatusCode::SEE_OTHER, [(header::LOCATION, location)]).into_response())
}

/// Percent-decodes a request path into a short key.
///
/// Paths that do not decode to UTF-8 are looked up as sent.
fn lookup_key(path: &str) -> Cow<'_, str> {
    percent_decode_str(path)
        .decode_utf8()
        .unwrap_or(Cow::Borrowed(path))
}
