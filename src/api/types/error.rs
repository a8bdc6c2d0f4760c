//! API error responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::domain::AuthFailure;

/// Message returned for every refused credential, whatever the reason
pub const UNAUTHORIZED_MESSAGE: &str = "unauthorized";

/// Message returned for every server-side failure
pub const INTERNAL_MESSAGE: &str = "internal server error";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorType {
    InvalidRequestError,
    AuthenticationError,
    ServerError,
}

impl std::fmt::Display for ApiErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRequestError => write!(f, "invalid_request_error"),
            Self::AuthenticationError => write!(f, "authentication_error"),
            Self::ServerError => write!(f, "server_error"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: ApiErrorType,
}

/// API error with status code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub response: ApiErrorResponse,
}

impl ApiError {
    pub fn new(status: StatusCode, error_type: ApiErrorType, message: impl Into<String>) -> Self {
        Self {
            status,
            response: ApiErrorResponse {
                error: ApiErrorDetail {
                    message: message.into(),
                    error_type,
                },
            },
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, ApiErrorType::InvalidRequestError, message)
    }

    /// Uniform 401; the cause is never put in the body
    pub fn unauthorized() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            ApiErrorType::AuthenticationError,
            UNAUTHORIZED_MESSAGE,
        )
    }

    /// Uniform 500
    pub fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            ApiErrorType::ServerError,
            INTERNAL_MESSAGE,
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.response)).into_response()
    }
}

impl From<AuthFailure> for ApiError {
    fn from(failure: AuthFailure) -> Self {
        if failure.is_client_error() {
            warn!(kind = failure.kind(), "Request not authorized");
            Self::unauthorized()
        } else {
            error!(kind = failure.kind(), error = %failure, "Session failure");
            Self::internal()
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}",
            self.response.error.error_type, self.response.error.message
        )
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_failures_are_indistinguishable() {
        let failures = [
            AuthFailure::MissingAuth,
            AuthFailure::MalformedHeader,
            AuthFailure::BadSignature,
            AuthFailure::Expired,
            AuthFailure::WrongIssuer,
            AuthFailure::WrongAudience,
            AuthFailure::UnknownSubject,
            AuthFailure::InvalidCredentials,
        ];

        let bodies: Vec<String> = failures
            .into_iter()
            .map(|failure| {
                let err = ApiError::from(failure);
                assert_eq!(err.status, StatusCode::UNAUTHORIZED);
                serde_json::to_string(&err.response).unwrap()
            })
            .collect();

        assert!(bodies.windows(2).all(|pair| pair[0] == pair[1]));
        assert!(bodies[0].contains("authentication_error"));
        assert!(bodies[0].contains(UNAUTHORIZED_MESSAGE));
    }

    #[test]
    fn test_signing_failure_hides_detail() {
        let err = ApiError::from(AuthFailure::SigningFailure("key rejected: abc".to_string()));

        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.response.error.message, INTERNAL_MESSAGE);
        assert_eq!(err.response.error.error_type, ApiErrorType::ServerError);
    }
}
