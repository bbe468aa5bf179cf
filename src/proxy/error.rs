// Request-level errors and their JSON responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::proxy::upstream::UpstreamError;

/// Errors the gateway handler can produce.
/// Display strings are the exact `error` field returned to callers.
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Missing or invalid authorization header")]
    MissingAuthorization,

    #[error("Invalid authentication token")]
    InvalidToken,

    #[error("Invalid request body")]
    InvalidBody(#[source] axum::Error),

    #[error("Server misconfiguration: missing Flutterwave secret key")]
    MissingUpstreamSecret,

    #[error("Proxy server error")]
    Upstream(#[from] UpstreamError),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::MissingAuthorization => StatusCode::UNAUTHORIZED,
            Self::InvalidToken => StatusCode::FORBIDDEN,
            Self::InvalidBody(_) => StatusCode::BAD_REQUEST,
            Self::MissingUpstreamSecret | Self::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn body(&self) -> ErrorBody {
        let message = match self {
            // Upstream failure text goes back to the caller verbatim
            Self::Upstream(e) => Some(e.to_string()),
            _ => None,
        };
        ErrorBody {
            error: self.to_string(),
            message,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        match &self {
            Self::MethodNotAllowed => tracing::debug!(error = %self, "Rejected request"),
            Self::InvalidBody(source) => {
                tracing::error!(error = %source, "Error reading request body")
            }
            Self::Upstream(source) => tracing::error!(error = %source, "Proxy error"),
            _ => tracing::error!(error = %self, "Rejected request"),
        }

        (self.status(), Json(self.body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::{json, Value};

    async fn render(err: ProxyError) -> (StatusCode, Value) {
        let resp = err.into_response();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn caller_errors_map_to_4xx() {
        assert_eq!(
            render(ProxyError::MethodNotAllowed).await,
            (StatusCode::METHOD_NOT_ALLOWED, json!({"error": "Method not allowed"}))
        );
        assert_eq!(
            render(ProxyError::MissingAuthorization).await,
            (
                StatusCode::UNAUTHORIZED,
                json!({"error": "Missing or invalid authorization header"})
            )
        );
        assert_eq!(
            render(ProxyError::InvalidToken).await,
            (StatusCode::FORBIDDEN, json!({"error": "Invalid authentication token"}))
        );
        assert_eq!(
            render(ProxyError::InvalidBody(axum::Error::new("connection reset"))).await,
            (StatusCode::BAD_REQUEST, json!({"error": "Invalid request body"}))
        );
    }

    #[tokio::test]
    async fn misconfiguration_maps_to_500() {
        assert_eq!(
            render(ProxyError::MissingUpstreamSecret).await,
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({"error": "Server misconfiguration: missing Flutterwave secret key"})
            )
        );
    }

    #[test]
    fn message_is_only_set_for_upstream_failures() {
        let body = ProxyError::InvalidToken.body();
        assert!(body.message.is_none());
        let rendered = serde_json::to_string(&body).unwrap();
        assert_eq!(rendered, r#"{"error":"Invalid authentication token"}"#);
    }
}
