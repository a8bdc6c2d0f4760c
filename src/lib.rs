//! Movies session service
//!
//! Token-based sessions for the movies API:
//! - Short-lived HS256 access tokens verified from `Authorization: Bearer`
//! - Longer-lived refresh tokens carried in a hardened cookie
//! - Refresh rotation against an identity directory

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use infrastructure::{
    identity::InMemoryIdentityDirectory,
    session::{SessionConfig, SessionService},
};
use tracing::info;

/// Build the session service, failing when its key cannot sign and verify
pub fn create_session_service(config: &AppConfig) -> anyhow::Result<SessionService> {
    let session_config = SessionConfig::from_settings(&config.session)?;
    let sessions = SessionService::new(session_config);

    sessions
        .self_check()
        .map_err(|e| anyhow::anyhow!("session signing self-check failed: {}", e))?;

    Ok(sessions)
}

/// Create the application state from configuration
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let sessions = create_session_service(config)?;
    let directory = InMemoryIdentityDirectory::from_seed(&config.directory.users).await?;

    info!(
        users = directory.len().await,
        issuer = sessions.config().issuer(),
        "Application state initialized"
    );

    Ok(AppState::new(sessions, Arc::new(directory)))
}
