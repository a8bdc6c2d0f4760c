//! Session flows: login, bearer authorization, refresh rotation and logout

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use super::config::SessionConfig;
use super::cookie::{CookieDescriptor, RefreshCookieManager};
use super::issuer::TokenIssuer;
use super::verifier::TokenVerifier;
use crate::domain::{
    AccessClaims, AuthFailure, ClaimSet, Identity, IdentityDirectory, TokenPair,
};

/// A token pair plus the cookie that carries its refresh half
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub tokens: TokenPair,
    pub cookie: CookieDescriptor,
}

/// Composes issuer, verifier and cookie manager over one shared configuration
#[derive(Debug, Clone)]
pub struct SessionService {
    config: Arc<SessionConfig>,
    issuer: TokenIssuer,
    verifier: TokenVerifier,
    cookies: RefreshCookieManager,
}

impl SessionService {
    pub fn new(config: SessionConfig) -> Self {
        let config = Arc::new(config);

        Self {
            issuer: TokenIssuer::new(config.clone()),
            verifier: TokenVerifier::new(config.clone()),
            cookies: RefreshCookieManager::new(config.clone()),
            config,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn issuer(&self) -> &TokenIssuer {
        &self.issuer
    }

    pub fn verifier(&self) -> &TokenVerifier {
        &self.verifier
    }

    pub fn cookies(&self) -> &RefreshCookieManager {
        &self.cookies
    }

    /// Sign and verify a throwaway pair so a broken key fails at startup
    pub fn self_check(&self) -> Result<(), AuthFailure> {
        let now = Utc::now();
        let probe = Identity::new(0, "self", "check");
        let pair = self.issuer.issue_at(&probe, now)?;

        let header = format!("Bearer {}", pair.access_token());
        self.verifier.verify_at(Some(&header), now).map_err(|e| {
            AuthFailure::SigningFailure(format!("issued access token failed verification: {}", e.kind()))
        })?;
        self.verifier
            .verify_refresh_at(pair.refresh_token(), now)
            .map_err(|e| {
                AuthFailure::SigningFailure(format!(
                    "issued refresh token failed verification: {}",
                    e.kind()
                ))
            })?;

        Ok(())
    }

    /// Issue a pair and its refresh cookie for an already verified identity
    pub fn start(&self, identity: &Identity) -> Result<IssuedSession, AuthFailure> {
        self.start_at(identity, Utc::now())
    }

    pub fn start_at(&self, identity: &Identity, now: DateTime<Utc>) -> Result<IssuedSession, AuthFailure> {
        let tokens = self.issuer.issue_at(identity, now)?;
        let cookie = self.cookies.live_cookie_at(tokens.refresh_token(), now);

        Ok(IssuedSession { tokens, cookie })
    }

    /// Check credentials with the directory, then start a session
    pub async fn login(
        &self,
        directory: &dyn IdentityDirectory,
        email: &str,
        password: &str,
    ) -> Result<IssuedSession, AuthFailure> {
        let identity = directory
            .authenticate(email, password)
            .await
            .map_err(|e| AuthFailure::Directory(e.to_string()))?
            .ok_or(AuthFailure::InvalidCredentials)?;

        let session = self.start(&identity)?;
        info!(subject = %identity.id(), "Session started");

        Ok(session)
    }

    /// Verify a protected request's `Authorization` header
    pub fn authorize(&self, authorization: Option<&str>) -> Result<AccessClaims, AuthFailure> {
        self.verifier
            .verify(authorization)
            .map(|(_, claims)| claims)
    }

    /// Exchange a live refresh token for a brand-new pair.
    ///
    /// The presented token is not revoked; it stays valid until its own
    /// expiry because no server-side store is kept.
    pub async fn rotate(
        &self,
        directory: &dyn IdentityDirectory,
        refresh_token: &str,
    ) -> Result<IssuedSession, AuthFailure> {
        self.rotate_at(directory, refresh_token, Utc::now()).await
    }

    pub async fn rotate_at(
        &self,
        directory: &dyn IdentityDirectory,
        refresh_token: &str,
        now: DateTime<Utc>,
    ) -> Result<IssuedSession, AuthFailure> {
        let claims = self.verifier.verify_refresh_at(refresh_token, now)?;
        let id = claims.subject_id().ok_or(AuthFailure::BadSignature)?;

        let identity = directory
            .find_by_id(id)
            .await
            .map_err(|e| AuthFailure::Directory(e.to_string()))?
            .ok_or_else(|| {
                warn!(subject = %id, "Refresh token subject no longer resolves");
                AuthFailure::UnknownSubject
            })?;

        let session = self.start_at(&identity, now)?;
        info!(subject = %id, "Session rotated");

        Ok(session)
    }

    /// Cookie that clears the refresh credential; needs no verification
    pub fn logout(&self) -> CookieDescriptor {
        self.cookies.expired_cookie()
    }
}
