//! Bearer-token guard for protected routes

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::{AccessClaims, AuthFailure};

/// Extractor that requires a valid access token in `Authorization: Bearer <token>`.
///
/// Every refusal is a uniform 401; the failure kind only reaches the logs.
#[derive(Debug, Clone)]
pub struct RequireSession(pub AccessClaims);

impl FromRequestParts<AppState> for RequireSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let authorization = authorization_header(&parts.headers)?;
        let claims = state.sessions.authorize(authorization)?;

        Ok(RequireSession(claims))
    }
}

/// The raw `Authorization` value, if any. Non-ASCII values are malformed.
pub fn authorization_header(headers: &HeaderMap) -> Result<Option<&str>, AuthFailure> {
    headers
        .get(header::AUTHORIZATION)
        .map(|value| value.to_str().map_err(|_| AuthFailure::MalformedHeader))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_authorization_header_present() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc"));

        assert_eq!(authorization_header(&headers).unwrap(), Some("Bearer abc"));
    }

    #[test]
    fn test_authorization_header_absent() {
        assert_eq!(authorization_header(&HeaderMap::new()).unwrap(), None);
    }

    #[test]
    fn test_authorization_header_not_visible_ascii() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_bytes(b"Bearer \xfftoken").unwrap(),
        );

        assert_eq!(
            authorization_header(&headers).unwrap_err(),
            AuthFailure::MalformedHeader
        );
    }
}
