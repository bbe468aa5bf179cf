// Upstream client implementation
// Relays transfer payloads to Flutterwave with the gateway-held secret

use axum::http::StatusCode;
use bytes::Bytes;
use reqwest::{header, Client};
use thiserror::Error;

/// Status and body exactly as Flutterwave returned them
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

#[derive(Debug, Error)]
pub enum UpstreamError {
    /// DNS, connect, TLS, timeout or body-read failure
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// The secret contains bytes that cannot go into a header.
    /// Display text must never include the secret.
    #[error("upstream credential is not a valid header value")]
    InvalidCredential(#[from] header::InvalidHeaderValue),
}

pub struct UpstreamClient {
    http_client: Client,
    transfers_url: String,
}

impl UpstreamClient {
    pub fn new(http_client: Client, transfers_url: impl Into<String>) -> Self {
        Self {
            http_client,
            transfers_url: transfers_url.into(),
        }
    }

    pub fn transfers_url(&self) -> &str {
        &self.transfers_url
    }

    /// POST `body` to the transfers endpoint as-is.
    ///
    /// The body is never parsed or re-encoded. Any upstream status, 4xx and
    /// 5xx included, is a successful relay; only transport failures are errors.
    pub async fn forward_transfer(
        &self,
        secret: &str,
        body: Bytes,
    ) -> Result<UpstreamResponse, UpstreamError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        let mut credential = header::HeaderValue::from_str(&format!("Bearer {}", secret))?;
        credential.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, credential);

        let response = self
            .http_client
            .post(&self.transfers_url)
            .headers(headers)
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        Ok(UpstreamResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_bytes, header as header_eq, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn forwards_body_and_injects_secret() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v3/transfers"))
            .and(header_eq("authorization", "Bearer FLWSECK_TEST-secret"))
            .and(header_eq("content-type", "application/json"))
            .and(body_bytes(br#"{"amount":500}"#.to_vec()))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(r#"{"status":"success"}"#, "application/json"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = UpstreamClient::new(Client::new(), format!("{}/v3/transfers", server.uri()));
        let resp = client
            .forward_transfer("FLWSECK_TEST-secret", Bytes::from_static(br#"{"amount":500}"#))
            .await
            .unwrap();

        assert_eq!(resp.status, StatusCode::OK);
        assert_eq!(&resp.body[..], br#"{"status":"success"}"#);
    }

    #[tokio::test]
    async fn upstream_error_status_is_not_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_raw(r#"{"status":"error","message":"Invalid account"}"#, "application/json"),
            )
            .mount(&server)
            .await;

        let client = UpstreamClient::new(Client::new(), format!("{}/v3/transfers", server.uri()));
        let resp = client
            .forward_transfer("sk", Bytes::from_static(b"{}"))
            .await
            .unwrap();

        assert_eq!(resp.status, StatusCode::BAD_REQUEST);
        assert_eq!(&resp.body[..], br#"{"status":"error","message":"Invalid account"}"#);
    }

    #[tokio::test]
    async fn connection_failure_is_transport_error() {
        // Port 1 is reserved and closed on test hosts
        let client = UpstreamClient::new(Client::new(), "http://127.0.0.1:1/v3/transfers");
        let err = client
            .forward_transfer("sk", Bytes::from_static(b"{}"))
            .await
            .unwrap_err();

        assert!(matches!(err, UpstreamError::Transport(_)));
        assert!(!err.to_string().is_empty());
    }

    #[tokio::test]
    async fn invalid_secret_does_not_leak() {
        let client = UpstreamClient::new(Client::new(), "http://127.0.0.1:1/v3/transfers");
        let err = client
            .forward_transfer("bad\nsecret", Bytes::new())
            .await
            .unwrap_err();

        assert!(matches!(err, UpstreamError::InvalidCredential(_)));
        assert!(!err.to_string().contains("bad"));
    }
}
