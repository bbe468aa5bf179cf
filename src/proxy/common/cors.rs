// CORS origin resolution and preflight responses

use axum::{
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

pub const ALLOW_METHODS: &str = "POST, OPTIONS";
pub const ALLOW_HEADERS: &str = "Content-Type, Authorization";
pub const MAX_AGE_SECS: &str = "86400";

const WILDCARD: &str = "*";

/// Pick the `Access-Control-Allow-Origin` value for a request.
///
/// - `*` configured: `*`
/// - request origin configured: that origin
/// - otherwise: the first configured origin, even though it will not match
///   the caller (browsers then block the response)
pub fn resolve_allow_origin<'a>(allowed: &'a [String], origin: Option<&str>) -> Option<&'a str> {
    if allowed.iter().any(|o| o == WILDCARD) {
        return Some(WILDCARD);
    }
    if let Some(origin) = origin {
        if let Some(matched) = allowed.iter().find(|o| o.as_str() == origin) {
            return Some(matched.as_str());
        }
    }
    allowed.first().map(String::as_str)
}

/// Insert `Access-Control-Allow-Origin` when a usable value resolves
pub fn insert_allow_origin(headers: &mut HeaderMap, allowed: &[String], origin: Option<&str>) {
    let value = resolve_allow_origin(allowed, origin).and_then(|v| HeaderValue::from_str(v).ok());
    if let Some(value) = value {
        headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, value);
    }
}

/// Answer a preflight: 204, no body, no authentication
pub fn preflight_response(allowed: &[String], origin: Option<&str>) -> Response {
    let mut headers = HeaderMap::new();
    insert_allow_origin(&mut headers, allowed, origin);
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOW_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOW_HEADERS),
    );
    headers.insert(
        header::ACCESS_CONTROL_MAX_AGE,
        HeaderValue::from_static(MAX_AGE_SECS),
    );

    (StatusCode::NO_CONTENT, headers).into_response()
}
