//! Access/refresh token issuance

use std::fmt::Debug;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::Serialize;
use tracing::{debug, error};

use super::config::SessionConfig;
use crate::domain::{AccessClaims, AuthFailure, Identity, RefreshClaims, TokenPair};

/// The only algorithm tokens are signed with or accepted under
pub const SIGNING_ALGORITHM: Algorithm = Algorithm::HS256;

/// Builds and signs token pairs for verified identities
#[derive(Clone)]
pub struct TokenIssuer {
    config: Arc<SessionConfig>,
    encoding_key: EncodingKey,
}

impl Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("issuer", &self.config.issuer())
            .field("audience", &self.config.audience())
            .field("encoding_key", &"[hidden]")
            .finish()
    }
}

impl TokenIssuer {
    pub fn new(config: Arc<SessionConfig>) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret().as_bytes());

        Self {
            config,
            encoding_key,
        }
    }

    /// Issue a pair stamped with the current UTC time
    pub fn issue(&self, identity: &Identity) -> Result<TokenPair, AuthFailure> {
        self.issue_at(identity, Utc::now())
    }

    /// Issue a pair as if the clock read `now`
    pub fn issue_at(&self, identity: &Identity, now: DateTime<Utc>) -> Result<TokenPair, AuthFailure> {
        let access = AccessClaims::new(
            identity,
            self.config.issuer(),
            self.config.audience(),
            now,
            expiry(now, self.config.access_ttl())?,
        );
        let access_token = self.sign(&access)?;

        let refresh = RefreshClaims::new(identity, now, expiry(now, self.config.refresh_ttl())?);
        let refresh_token = self.sign(&refresh)?;

        debug!(subject = %identity.id(), exp = access.exp, "Issued token pair");

        Ok(TokenPair::new(access_token, refresh_token))
    }

    fn sign<C: Serialize>(&self, claims: &C) -> Result<String, AuthFailure> {
        encode(&Header::new(SIGNING_ALGORITHM), claims, &self.encoding_key).map_err(|e| {
            error!(error = %e, "Failed to sign token");
            AuthFailure::SigningFailure(e.to_string())
        })
    }
}

fn expiry(now: DateTime<Utc>, ttl: Duration) -> Result<DateTime<Utc>, AuthFailure> {
    now.checked_add_signed(ttl)
        .ok_or_else(|| AuthFailure::SigningFailure("token expiry out of range".to_string()))
}
