//! HTTP error responses.
//!
//! Every error is rendered as a short plain-text body terminated by a
//! newline, with `X-Content-Type-Options: nosniff`. Server-side failures
//! never leak their cause to the client.

use axum::{
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::api::dto::DecodeError;
use crate::domain::store::StoreError;

const PLAIN_TEXT_UTF8: &str = "text/plain; charset=utf-8";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not allowed")]
    MethodNotAllowed,

    #[error("Content-Type must be set to application/json")]
    UnsupportedContentType,

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed | Self::UnsupportedContentType => StatusCode::BAD_REQUEST,
            Self::Decode(err) if err.is_client_error() => StatusCode::BAD_REQUEST,
            Self::Decode(_) | Self::Store(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = if status.is_server_error() {
            tracing::error!("{}", self);
            status
                .canonical_reason()
                .unwrap_or("Internal Server Error")
                .to_string()
        } else {
            self.to_string()
        };

        (
            status,
            [
                (header::CONTENT_TYPE, HeaderValue::from_static(PLAIN_TEXT_UTF8)),
                (
                    header::X_CONTENT_TYPE_OPTIONS,
                    HeaderValue::from_static("nosniff"),
                ),
            ],
            format!("{message}\n"),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use axum::http::HeaderMap;

    async fn render(err: AppError) -> (StatusCode, HeaderMap, String) {
        let (parts, body) = err.into_response().into_parts();
        let bytes = to_bytes(body, usize::MAX).await.unwrap();
        (
            parts.status,
            parts.headers,
            String::from_utf8(bytes.to_vec()).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_client_error_body_is_plain_text() {
        let (status, headers, text) = render(AppError::UnsupportedContentType).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(text, "Content-Type must be set to application/json\n");
        assert_eq!(
            headers[header::CONTENT_TYPE],
            "text/plain; charset=utf-8"
        );
        assert_eq!(headers[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
    }

    #[tokio::test]
    async fn test_decode_error_keeps_message() {
        let (status, _, text) = render(DecodeError::Empty.into()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(text, "Request body must not be empty\n");
    }

    #[tokio::test]
    async fn test_store_error_hides_cause() {
        let err = StoreError::Operation("READONLY You can't write against a replica".into());
        let (status, _, text) = render(err.into()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(text, "Internal Server Error\n");
    }

    #[tokio::test]
    async fn test_unexpected_decode_error_is_server_error() {
        let cause = serde_json::from_str::<u8>("\"x\"").unwrap_err();
        let (status, _, text) = render(DecodeError::Unexpected(cause).into()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(text, "Internal Server Error\n");
    }

    #[test]
    fn test_method_not_allowed_is_bad_request() {
        assert_eq!(AppError::MethodNotAllowed.status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::MethodNotAllowed.to_string(), "Not allowed");
    }
}
