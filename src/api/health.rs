//! Health check endpoints for liveness and readiness probes

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use tracing::error;

use super::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

impl HealthResponse {
    fn new(status: HealthStatus) -> Self {
        Self {
            status,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Returns 200 while the process is serving
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(HealthResponse::new(HealthStatus::Healthy)))
}

/// Returns 503 when a freshly signed token no longer verifies
pub async fn ready_check(State(state): State<AppState>) -> impl IntoResponse {
    match state.sessions.self_check() {
        Ok(()) => (StatusCode::OK, Json(HealthResponse::new(HealthStatus::Healthy))),
        Err(e) => {
            error!(kind = e.kind(), error = %e, "Readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse::new(HealthStatus::Unhealthy)),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_status_serialization() {
        assert_eq!(
            serde_json::to_string(&HealthStatus::Healthy).unwrap(),
            "\"healthy\""
        );
        assert_eq!(
            serde_json::to_string(&HealthStatus::Unhealthy).unwrap(),
            "\"unhealthy\""
        );
    }

    #[test]
    fn test_health_response_serialization() {
        let json = serde_json::to_string(&HealthResponse::new(HealthStatus::Healthy)).unwrap();

        assert!(json.contains("\"status\":\"healthy\""));
        assert!(json.contains(&format!("\"version\":\"{}\"", env!("CARGO_PKG_VERSION"))));
    }
}
