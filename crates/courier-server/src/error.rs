//! Error types for the Courier service.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Result type alias for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

/// Errors that can occur in the Courier service.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Failed to bind to the specified address.
    #[error("failed to bind to {0}: {1}")]
    BindFailed(std::net::SocketAddr, std::io::Error),

    /// The ingestion body was not a well-formed alert payload.
    #[error("malformed alert payload: {0}")]
    MalformedPayload(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

// The upstream monitoring system only distinguishes accepted (200) from
// rejected (500, plain "Error: ..." body), so every error renders that way.
impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, format!("Error: {self}")).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[tokio::test]
    async fn test_malformed_payload_response() {
        let err = ServerError::MalformedPayload("expected an object".to_string());
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = String::from_utf8(bytes.to_vec()).unwrap();

        assert!(body.starts_with("Error:"));
        assert!(body.contains("expected an object"));
    }

    #[tokio::test]
    async fn test_internal_error_response() {
        let err = ServerError::Internal("something broke".to_string());
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_display() {
        let err = ServerError::MalformedPayload("bad json".to_string());
        assert_eq!(err.to_string(), "malformed alert payload: bad json");

        let err = ServerError::Internal("oops".to_string());
        assert_eq!(err.to_string(), "internal error: oops");
    }
}
