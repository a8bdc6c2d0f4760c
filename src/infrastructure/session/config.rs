//! Immutable session configuration

use chrono::Duration;

use crate::config::SessionSettings;
use crate::domain::DomainError;

/// HMAC key material. Never printed.
#[derive(Clone)]
pub struct SigningSecret(Vec<u8>);

impl SigningSecret {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SigningSecret([hidden])")
    }
}

/// Process-wide token and cookie settings.
///
/// Built once from [`SessionSettings`], then shared read-only behind an `Arc`
/// by the issuer, the verifier and the cookie manager. There are no setters.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    issuer: String,
    audience: String,
    secret: SigningSecret,
    access_ttl: Duration,
    refresh_ttl: Duration,
    cookie_name: String,
    cookie_path: String,
    cookie_domain: String,
}

impl SessionConfig {
    /// Validate raw settings into a usable configuration
    pub fn from_settings(settings: &SessionSettings) -> Result<Self, DomainError> {
        if settings.secret.is_empty() {
            return Err(DomainError::configuration(
                "session.secret must not be empty",
            ));
        }

        require_non_empty("session.issuer", &settings.issuer)?;
        require_non_empty("session.audience", &settings.audience)?;
        require_non_empty("session.cookie_name", &settings.cookie_name)?;
        validate_cookie_token("session.cookie_name", &settings.cookie_name)?;
        validate_attribute_value("session.cookie_path", &settings.cookie_path)?;
        validate_attribute_value("session.cookie_domain", &settings.cookie_domain)?;

        let access_ttl = ttl("session.access_token_ttl_secs", settings.access_token_ttl_secs)?;
        let refresh_ttl = ttl("session.refresh_token_ttl_secs", settings.refresh_token_ttl_secs)?;

        Ok(Self {
            issuer: settings.issuer.clone(),
            audience: settings.audience.clone(),
            secret: SigningSecret::new(settings.secret.as_bytes()),
            access_ttl,
            refresh_ttl,
            cookie_name: settings.cookie_name.clone(),
            cookie_path: settings.cookie_path.clone(),
            cookie_domain: settings.cookie_domain.clone(),
        })
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn audience(&self) -> &str {
        &self.audience
    }

    pub(crate) fn secret(&self) -> &SigningSecret {
        &self.secret
    }

    pub fn access_ttl(&self) -> Duration {
        self.access_ttl
    }

    pub fn refresh_ttl(&self) -> Duration {
        self.refresh_ttl
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    pub fn cookie_path(&self) -> &str {
        &self.cookie_path
    }

    pub fn cookie_domain(&self) -> &str {
        &self.cookie_domain
    }
}

fn require_non_empty(key: &str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::configuration(format!("{} must not be empty", key)));
    }
    Ok(())
}

// RFC 6265 cookie-name token: visible ASCII minus separators
fn validate_cookie_token(key: &str, value: &str) -> Result<(), DomainError> {
    let invalid = value.bytes().any(|b| {
        !b.is_ascii_graphic() || b"()<>@,;:\\\"/[]?={}".contains(&b)
    });

    if invalid {
        return Err(DomainError::configuration(format!(
            "{} contains characters not allowed in a cookie name",
            key
        )));
    }
    Ok(())
}

// Path and Domain values: printable ASCII without `;`
fn validate_attribute_value(key: &str, value: &str) -> Result<(), DomainError> {
    let invalid = value
        .bytes()
        .any(|b| !(b' '..=b'~').contains(&b) || b == b';');

    if invalid {
        return Err(DomainError::configuration(format!(
            "{} contains characters not allowed in a cookie attribute",
            key
        )));
    }
    Ok(())
}

fn ttl(key: &str, secs: u64) -> Result<Duration, DomainError> {
    if secs == 0 {
        return Err(DomainError::configuration(format!("{} must be positive", key)));
    }

    i64::try_from(secs)
        .ok()
        .and_then(Duration::try_seconds)
        .ok_or_else(|| DomainError::configuration(format!("{} is out of range", key)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> SessionSettings {
        SessionSettings {
            secret: "test-secret-key-12345".to_string(),
            ..SessionSettings::default()
        }
    }

    #[test]
    fn test_from_settings() {
        let config = SessionConfig::from_settings(&settings()).unwrap();

        assert_eq!(config.issuer(), "example.com");
        assert_eq!(config.audience(), "example.com");
        assert_eq!(config.access_ttl(), Duration::minutes(15));
        assert_eq!(config.refresh_ttl(), Duration::hours(24));
        assert_eq!(config.cookie_name(), "refresh_token");
        assert_eq!(config.secret().as_bytes(), b"test-secret-key-12345");
    }

    #[test]
    fn test_empty_secret_rejected() {
        let result = SessionConfig::from_settings(&SessionSettings::default());
        assert!(matches!(result, Err(DomainError::Configuration { .. })));
    }

    #[test]
    fn test_zero_ttl_rejected() {
        let result = SessionConfig::from_settings(&SessionSettings {
            access_token_ttl_secs: 0,
            ..settings()
        });
        assert!(result.is_err());

        let result = SessionConfig::from_settings(&SessionSettings {
            refresh_token_ttl_secs: u64::MAX,
            ..settings()
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_blank_issuer_rejected() {
        let result = SessionConfig::from_settings(&SessionSettings {
            issuer: "  ".to_string(),
            ..settings()
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_cookie_name_must_be_token() {
        let result = SessionConfig::from_settings(&SessionSettings {
            cookie_name: "refresh token".to_string(),
            ..settings()
        });
        assert!(result.is_err());

        let result = SessionConfig::from_settings(&SessionSettings {
            cookie_name: "a=b".to_string(),
            ..settings()
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_cookie_attributes_cannot_inject() {
        let result = SessionConfig::from_settings(&SessionSettings {
            cookie_path: "/; SameSite=None".to_string(),
            ..settings()
        });
        assert!(matches!(result, Err(DomainError::Configuration { .. })));

        let result = SessionConfig::from_settings(&SessionSettings {
            cookie_domain: "example.com; Secure=false".to_string(),
            ..settings()
        });
        assert!(matches!(result, Err(DomainError::Configuration { .. })));

        let result = SessionConfig::from_settings(&SessionSettings {
            cookie_domain: "example.com\r\nX-Injected: 1".to_string(),
            ..settings()
        });
        assert!(matches!(result, Err(DomainError::Configuration { .. })));

        let config = SessionConfig::from_settings(&SessionSettings {
            cookie_path: "/api/auth".to_string(),
            cookie_domain: String::new(),
            ..settings()
        })
        .unwrap();
        assert_eq!(config.cookie_path(), "/api/auth");
    }

    #[test]
    fn test_debug_never_prints_secret() {
        let config = SessionConfig::from_settings(&settings()).unwrap();
        let rendered = format!("{:?}", config);

        assert!(!rendered.contains("test-secret-key-12345"));
        assert!(rendered.contains("[hidden]"));
    }
}
