//! Bearer and refresh token verification

use std::fmt::Debug;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::config::SessionConfig;
use super::issuer::SIGNING_ALGORITHM;
use crate::domain::{AccessClaims, AuthFailure, ClaimSet, RefreshClaims, TOKEN_TYPE};

/// Authorization scheme accepted on protected requests (case-sensitive)
pub const BEARER_SCHEME: &str = "Bearer";

/// Validates signed tokens against the session configuration
#[derive(Clone)]
pub struct TokenVerifier {
    config: Arc<SessionConfig>,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("issuer", &self.config.issuer())
            .field("audience", &self.config.audience())
            .field("decoding_key", &"[hidden]")
            .finish()
    }
}

impl TokenVerifier {
    pub fn new(config: Arc<SessionConfig>) -> Self {
        let decoding_key = DecodingKey::from_secret(config.secret().as_bytes());

        // Pinned to HS256: any other `alg` in the header fails before the
        // signature is even looked at. Time and issuer checks run here after
        // decoding so each maps to its own failure kind.
        let mut validation = Validation::new(SIGNING_ALGORITHM);
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;

        Self {
            config,
            decoding_key,
            validation,
        }
    }

    /// Verify an `Authorization` header value at the current time
    pub fn verify(&self, authorization: Option<&str>) -> Result<(String, AccessClaims), AuthFailure> {
        self.verify_at(authorization, Utc::now())
    }

    /// Verify an `Authorization` header value as if the clock read `now`.
    ///
    /// Returns the raw token alongside its claims.
    pub fn verify_at(
        &self,
        authorization: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<(String, AccessClaims), AuthFailure> {
        let header = authorization
            .filter(|value| !value.is_empty())
            .ok_or(AuthFailure::MissingAuth)?;

        let token = bearer_token(header)?;
        let claims: AccessClaims = self.decode(token, now)?;

        if claims.typ != TOKEN_TYPE {
            debug!("Access token carries an unexpected typ claim");
            return Err(AuthFailure::BadSignature);
        }

        if claims.iss != self.config.issuer() {
            return Err(AuthFailure::WrongIssuer);
        }

        if claims.aud != self.config.audience() {
            return Err(AuthFailure::WrongAudience);
        }

        Ok((token.to_string(), claims))
    }

    /// Verify a refresh token taken from the refresh cookie
    pub fn verify_refresh(&self, token: &str) -> Result<RefreshClaims, AuthFailure> {
        self.verify_refresh_at(token, Utc::now())
    }

    pub fn verify_refresh_at(&self, token: &str, now: DateTime<Utc>) -> Result<RefreshClaims, AuthFailure> {
        if token.is_empty() {
            return Err(AuthFailure::MissingAuth);
        }

        self.decode(token, now)
    }

    fn decode<C>(&self, token: &str, now: DateTime<Utc>) -> Result<C, AuthFailure>
    where
        C: ClaimSet + DeserializeOwned,
    {
        let claims = decode::<C>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                debug!(error_kind = ?e.kind(), "Token failed signature or structure checks");
                AuthFailure::BadSignature
            })?
            .claims;

        if claims.subject_id().is_none() {
            debug!("Token subject is not a decimal identity id");
            return Err(AuthFailure::BadSignature);
        }

        if claims.expires_at_secs() <= claims.issued_at_secs() {
            debug!("Token expires before it was issued");
            return Err(AuthFailure::BadSignature);
        }

        if claims.is_expired_at(now) {
            return Err(AuthFailure::Expired);
        }

        Ok(claims)
    }
}

/// Split `Bearer <token>` into its token, requiring exactly two fields
fn bearer_token(header: &str) -> Result<&str, AuthFailure> {
    let mut fields = header.split_whitespace();

    match (fields.next(), fields.next(), fields.next()) {
        (Some(BEARER_SCHEME), Some(token), None) => Ok(token),
        _ => Err(AuthFailure::MalformedHeader),
    }
}
