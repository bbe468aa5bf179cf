// Bearer token check for inbound transfer requests

use axum::http::{header, HeaderMap};
use subtle::ConstantTimeEq;

use crate::proxy::error::ProxyError;

const BEARER_PREFIX: &str = "Bearer ";

/// Token following a case-sensitive `Bearer ` prefix, if any
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix(BEARER_PREFIX))
}

/// Verify the caller's proxy token.
///
/// No header or a non-bearer scheme is 401, a wrong token is 403. When no
/// token is configured every caller gets 403.
pub fn verify_bearer(headers: &HeaderMap, expected: Option<&str>) -> Result<(), ProxyError> {
    let provided = bearer_token(headers).ok_or(ProxyError::MissingAuthorization)?;

    match expected {
        Some(expected) if tokens_match(provided, expected) => Ok(()),
        _ => Err(ProxyError::InvalidToken),
    }
}

fn tokens_match(provided: &str, expected: &str) -> bool {
    bool::from(provided.as_bytes().ct_eq(expected.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn with_auth(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn missing_header_is_unauthorized() {
        let err = verify_bearer(&HeaderMap::new(), Some("tok")).unwrap_err();
        assert!(matches!(err, ProxyError::MissingAuthorization));
    }

    #[test]
    fn non_bearer_scheme_is_unauthorized() {
        for value in ["Basic xyz", "bearer tok", "Bearertok", "tok"] {
            let err = verify_bearer(&with_auth(value), Some("tok")).unwrap_err();
            assert!(matches!(err, ProxyError::MissingAuthorization), "{}", value);
        }
    }

    #[test]
    fn wrong_token_is_forbidden() {
        for value in ["Bearer wrong", "Bearer tok2", "Bearer to", "Bearer  tok", "Bearer "] {
            let err = verify_bearer(&with_auth(value), Some("tok")).unwrap_err();
            assert!(matches!(err, ProxyError::InvalidToken), "{}", value);
        }
    }

    #[test]
    fn unset_token_matches_nothing() {
        let err = verify_bearer(&with_auth("Bearer "), None).unwrap_err();
        assert!(matches!(err, ProxyError::InvalidToken));
        let err = verify_bearer(&with_auth("Bearer anything"), None).unwrap_err();
        assert!(matches!(err, ProxyError::InvalidToken));
    }

    #[test]
    fn correct_token_passes() {
        assert!(verify_bearer(&with_auth("Bearer tok"), Some("tok")).is_ok());
    }

    #[test]
    fn bearer_token_extraction() {
        assert_eq!(bearer_token(&with_auth("Bearer abc def")), Some("abc def"));
        assert_eq!(bearer_token(&with_auth("Basic abc")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }
}
