//! Session endpoints: login, refresh rotation, logout and the session probe

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};

use crate::api::middleware::{vary_authorization_middleware, RequireSession};
use crate::api::state::AppState;
use crate::api::types::{ApiError, JsonBody};
use crate::domain::{AuthFailure, ClaimSet, TokenPair};
use crate::infrastructure::session::{CookieDescriptor, RefreshCookieManager};

/// Routes for the session lifecycle
pub fn create_auth_router() -> Router<AppState> {
    let protected = Router::new()
        .route("/session", get(session_info))
        .route_layer(middleware::from_fn(vary_authorization_middleware));

    Router::new()
        .route("/authenticate", post(authenticate))
        .route("/refresh", get(refresh))
        .route("/logout", get(logout))
        .merge(protected)
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// What `/session` reveals about the bearer's token
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub subject: String,
    pub name: String,
    pub expires_at: String,
}

/// POST /authenticate
///
/// 202 with the token pair in the body and the refresh token in a cookie.
pub async fn authenticate(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let session = state
        .sessions
        .login(state.directory.as_ref(), &request.email, &request.password)
        .await?;

    with_cookie(StatusCode::ACCEPTED, session.tokens, session.cookie)
}

/// GET /refresh
///
/// Trades the refresh cookie for a brand-new pair.
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let token = refresh_cookie(&headers, state.sessions.cookies()).ok_or(AuthFailure::MissingAuth)?;

    let session = state
        .sessions
        .rotate(state.directory.as_ref(), token)
        .await?;

    with_cookie(StatusCode::OK, session.tokens, session.cookie)
}

/// GET /logout
///
/// Always succeeds; the client is told to drop its refresh cookie.
pub async fn logout(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let cookie = set_cookie_header(&state.sessions.logout())?;

    Ok((StatusCode::ACCEPTED, [(header::SET_COOKIE, cookie)]))
}

/// GET /session
pub async fn session_info(RequireSession(claims): RequireSession) -> Json<SessionResponse> {
    Json(SessionResponse {
        expires_at: claims.expires_at().to_rfc3339_opts(SecondsFormat::Secs, true),
        subject: claims.sub,
        name: claims.name,
    })
}

fn with_cookie(
    status: StatusCode,
    tokens: TokenPair,
    cookie: CookieDescriptor,
) -> Result<impl IntoResponse, ApiError> {
    let cookie = set_cookie_header(&cookie)?;

    Ok((status, [(header::SET_COOKIE, cookie)], Json(tokens)))
}

fn set_cookie_header(cookie: &CookieDescriptor) -> Result<HeaderValue, ApiError> {
    HeaderValue::from_str(&cookie.to_header_value()).map_err(|e| {
        tracing::error!(error = %e, "Cookie is not a valid header value");
        ApiError::internal()
    })
}

/// First cookie named like the refresh cookie, across all `Cookie` headers
fn refresh_cookie<'a>(headers: &'a HeaderMap, cookies: &RefreshCookieManager) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|value| cookies.cookie_value(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionSettings;
    use crate::infrastructure::session::SessionConfig;
    use std::sync::Arc;

    fn cookies() -> RefreshCookieManager {
        let settings = SessionSettings {
            secret: "test-secret-key-12345".to_string(),
            ..SessionSettings::default()
        };
        RefreshCookieManager::new(Arc::new(SessionConfig::from_settings(&settings).unwrap()))
    }

    #[test]
    fn test_refresh_cookie_found_among_others() {
        let mut headers = HeaderMap::new();
        headers.append(header::COOKIE, HeaderValue::from_static("theme=dark"));
        headers.append(
            header::COOKIE,
            HeaderValue::from_static("lang=en; refresh_token=abc.def.ghi"),
        );

        assert_eq!(refresh_cookie(&headers, &cookies()), Some("abc.def.ghi"));
    }

    #[test]
    fn test_refresh_cookie_absent() {
        let mut headers = HeaderMap::new();
        headers.append(header::COOKIE, HeaderValue::from_static("theme=dark"));

        assert_eq!(refresh_cookie(&headers, &cookies()), None);
        assert_eq!(refresh_cookie(&HeaderMap::new(), &cookies()), None);
    }

    #[test]
    fn test_set_cookie_header() {
        let cookie = cookies().expired_cookie();
        let value = set_cookie_header(&cookie).unwrap();

        assert!(value.to_str().unwrap().starts_with("refresh_token=; "));
    }
}
