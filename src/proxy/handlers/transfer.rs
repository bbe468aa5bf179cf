// Transfer gateway handler
use axum::{
    body::{to_bytes, Body},
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue, Method},
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use tracing::{debug, info};

use crate::proxy::common::{auth, cors};
use crate::proxy::error::ProxyError;
use crate::proxy::server::AppState;

const LOG_PREVIEW_CHARS: usize = 200;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
}

/// Single entry point for every path.
///
/// OPTIONS answers the preflight, GET is the liveness probe, POST relays a
/// transfer and anything else is 405.
pub async fn handle_request(State(state): State<AppState>, request: Request) -> Response {
    let origin = request
        .headers()
        .get(header::ORIGIN)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    match *request.method() {
        Method::OPTIONS => {
            return cors::preflight_response(&state.config.allowed_origins, origin.as_deref())
        }
        Method::GET => return Json(HealthStatus { status: "ok" }).into_response(),
        Method::POST => {}
        _ => return ProxyError::MethodNotAllowed.into_response(),
    }

    match relay_transfer(&state, request, origin.as_deref()).await {
        Ok(response) => response,
        Err(e) => e.into_response(),
    }
}

async fn relay_transfer(
    state: &AppState,
    request: Request,
    origin: Option<&str>,
) -> Result<Response, ProxyError> {
    let config = &state.config;

    auth::verify_bearer(request.headers(), config.auth_token.as_deref())?;
    info!("Authentication successful");

    let body = to_bytes(request.into_body(), config.max_body_bytes)
        .await
        .map_err(ProxyError::InvalidBody)?;
    debug!(bytes = body.len(), preview = %preview(&body), "Received request body");

    let secret = config
        .flutterwave_secret_key
        .as_deref()
        .ok_or(ProxyError::MissingUpstreamSecret)?;

    info!(url = %state.upstream.transfers_url(), "Forwarding request to Flutterwave API");
    let upstream = state.upstream.forward_transfer(secret, body).await?;

    info!(status = upstream.status.as_u16(), "Flutterwave response received");
    debug!(preview = %preview(&upstream.body), "Flutterwave response body");

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    cors::insert_allow_origin(&mut headers, &config.allowed_origins, origin);

    Ok((upstream.status, headers, Body::from(upstream.body)).into_response())
}

/// First few characters of a payload for debug logs
fn preview(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    let mut out: String = text.chars().take(LOG_PREVIEW_CHARS).collect();
    if text.chars().nth(LOG_PREVIEW_CHARS).is_some() {
        out.push_str("...");
    }
    out
}
