//! Typed claim sets carried inside signed tokens

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::identity::{Identity, IdentityId};

/// Token-type tag stored in the `typ` claim of access tokens
pub const TOKEN_TYPE: &str = "JWT";

/// Fields shared by every claim set the verifier accepts
pub trait ClaimSet {
    fn subject(&self) -> &str;
    fn issued_at_secs(&self) -> i64;
    fn expires_at_secs(&self) -> i64;

    /// Subject parsed back into an identity id
    fn subject_id(&self) -> Option<IdentityId> {
        IdentityId::from_subject(self.subject())
    }

    fn issued_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.issued_at_secs(), 0).unwrap_or_default()
    }

    fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.expires_at_secs(), 0).unwrap_or_default()
    }

    /// A token is dead at its expiry instant, not one second after
    fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at_secs() <= now.timestamp()
    }
}

/// Claims of a resource-access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    pub iss: String,
    pub aud: String,
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    pub typ: String,
    /// First and last name, for client-side display only
    pub name: String,
}

impl AccessClaims {
    pub fn new(
        identity: &Identity,
        issuer: &str,
        audience: &str,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            iss: issuer.to_string(),
            aud: audience.to_string(),
            sub: identity.id().to_subject(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            typ: TOKEN_TYPE.to_string(),
            name: identity.display_name(),
        }
    }
}

impl ClaimSet for AccessClaims {
    fn subject(&self) -> &str {
        &self.sub
    }

    fn issued_at_secs(&self) -> i64 {
        self.iat
    }

    fn expires_at_secs(&self) -> i64 {
        self.exp
    }
}

/// Claims of a refresh token: subject and validity window only.
///
/// Unknown fields are rejected so an access token never decodes as a
/// refresh credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RefreshClaims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

impl RefreshClaims {
    pub fn new(identity: &Identity, issued_at: DateTime<Utc>, expires_at: DateTime<Utc>) -> Self {
        Self {
            sub: identity.id().to_subject(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        }
    }
}

impl ClaimSet for RefreshClaims {
    fn subject(&self) -> &str {
        &self.sub
    }

    fn issued_at_secs(&self) -> i64 {
        self.iat
    }

    fn expires_at_secs(&self) -> i64 {
        self.exp
    }
}
