//! Refresh-token cookie construction
//!
//! The refresh cookie is the only refresh credential, so its flags are fixed
//! to `Secure; HttpOnly; SameSite=Strict` and its `Max-Age` is always derived
//! from the refresh lifetime.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::config::SessionConfig;

/// SameSite cookie attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

impl std::fmt::Display for SameSite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SameSite::Strict => write!(f, "Strict"),
            SameSite::Lax => write!(f, "Lax"),
            SameSite::None => write!(f, "None"),
        }
    }
}

/// A fully described `Set-Cookie` value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieDescriptor {
    name: String,
    value: String,
    domain: String,
    path: String,
    expires: DateTime<Utc>,
    max_age: i64,
    secure: bool,
    http_only: bool,
    same_site: SameSite,
}

impl CookieDescriptor {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn expires(&self) -> DateTime<Utc> {
        self.expires
    }

    /// Seconds until expiry; negative means "delete now"
    pub fn max_age(&self) -> i64 {
        self.max_age
    }

    pub fn secure(&self) -> bool {
        self.secure
    }

    pub fn http_only(&self) -> bool {
        self.http_only
    }

    pub fn same_site(&self) -> SameSite {
        self.same_site
    }

    /// Render as a `Set-Cookie` header value.
    ///
    /// A non-positive max-age is written as `Max-Age=0`, which user agents
    /// treat as immediate deletion.
    pub fn to_header_value(&self) -> String {
        let mut out = format!("{}={}", self.name, self.value);

        if !self.path.is_empty() {
            out.push_str("; Path=");
            out.push_str(&self.path);
        }

        if !self.domain.is_empty() {
            out.push_str("; Domain=");
            out.push_str(&self.domain);
        }

        out.push_str("; Expires=");
        out.push_str(&self.expires.format("%a, %d %b %Y %H:%M:%S GMT").to_string());
        out.push_str(&format!("; Max-Age={}", self.max_age.max(0)));

        if self.http_only {
            out.push_str("; HttpOnly");
        }

        if self.secure {
            out.push_str("; Secure");
        }

        out.push_str(&format!("; SameSite={}", self.same_site));
        out
    }
}

impl std::fmt::Display for CookieDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_header_value())
    }
}

/// Produces live and expired refresh cookies from the session configuration
#[derive(Debug, Clone)]
pub struct RefreshCookieManager {
    config: Arc<SessionConfig>,
}

impl RefreshCookieManager {
    pub fn new(config: Arc<SessionConfig>) -> Self {
        Self { config }
    }

    /// Cookie carrying a freshly issued refresh token
    pub fn live_cookie(&self, refresh_token: &str) -> CookieDescriptor {
        self.live_cookie_at(refresh_token, Utc::now())
    }

    pub fn live_cookie_at(&self, refresh_token: &str, now: DateTime<Utc>) -> CookieDescriptor {
        let lifetime = self.config.refresh_ttl();

        self.descriptor(
            refresh_token.to_string(),
            now.checked_add_signed(lifetime).unwrap_or(DateTime::<Utc>::MAX_UTC),
            lifetime.num_seconds(),
        )
    }

    /// Logout cookie: same name/domain/path, empty value, already expired
    pub fn expired_cookie(&self) -> CookieDescriptor {
        // Default is the Unix epoch
        self.descriptor(String::new(), DateTime::<Utc>::default(), -1)
    }

    /// Find the refresh cookie's value in a request `Cookie` header
    pub fn cookie_value<'a>(&self, cookie_header: &'a str) -> Option<&'a str> {
        cookie_header
            .split(';')
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == self.config.cookie_name())
            .map(|(_, value)| value.trim_matches('"'))
    }

    fn descriptor(&self, value: String, expires: DateTime<Utc>, max_age: i64) -> CookieDescriptor {
        CookieDescriptor {
            name: self.config.cookie_name().to_string(),
            value,
            domain: self.config.cookie_domain().to_string(),
            path: self.config.cookie_path().to_string(),
            expires,
            max_age,
            secure: true,
            http_only: true,
            same_site: SameSite::Strict,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionSettings;
    use chrono::Duration;

    fn manager() -> RefreshCookieManager {
        let settings = SessionSettings {
            secret: "test-secret-key-12345".to_string(),
            cookie_name: "refresh_token".to_string(),
            cookie_domain: "movies.example".to_string(),
            cookie_path: "/".to_string(),
            ..SessionSettings::default()
        };
        RefreshCookieManager::new(Arc::new(SessionConfig::from_settings(&settings).unwrap()))
    }

    #[test]
    fn test_live_cookie_lifetime() {
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let cookie = manager().live_cookie_at("r.t.k", now);

        assert_eq!(cookie.value(), "r.t.k");
        assert_eq!(cookie.max_age(), 86_400);
        assert_eq!(cookie.expires(), now + Duration::seconds(86_400));
        assert!(cookie.secure());
        assert!(cookie.http_only());
        assert_eq!(cookie.same_site(), SameSite::Strict);
    }

    #[test]
    fn test_live_cookie_tracks_clock() {
        let before = Utc::now();
        let cookie = manager().live_cookie("r.t.k");
        let after = Utc::now();

        let lifetime = Duration::seconds(cookie.max_age());
        assert!(cookie.expires() >= before + lifetime);
        assert!(cookie.expires() <= after + lifetime);
    }

    #[test]
    fn test_expired_cookie_matches_live_scope() {
        let manager = manager();
        let live = manager.live_cookie("r.t.k");
        let expired = manager.expired_cookie();

        assert_eq!(expired.value(), "");
        assert!(expired.max_age() < 0);
        assert_eq!(expired.expires().timestamp(), 0);
        assert_eq!(expired.name(), live.name());
        assert_eq!(expired.domain(), live.domain());
        assert_eq!(expired.path(), live.path());
        assert!(expired.secure() && expired.http_only());
    }

    #[test]
    fn test_live_header_value() {
        let now = DateTime::from_timestamp(0, 0).unwrap();
        let header = manager().live_cookie_at("abc", now).to_header_value();

        assert_eq!(
            header,
            "refresh_token=abc; Path=/; Domain=movies.example; \
             Expires=Fri, 02 Jan 1970 00:00:00 GMT; Max-Age=86400; HttpOnly; Secure; SameSite=Strict"
        );
    }

    #[test]
    fn test_expired_header_value() {
        let header = manager().expired_cookie().to_string();

        assert_eq!(
            header,
            "refresh_token=; Path=/; Domain=movies.example; \
             Expires=Thu, 01 Jan 1970 00:00:00 GMT; Max-Age=0; HttpOnly; Secure; SameSite=Strict"
        );
    }

    #[test]
    fn test_cookie_value_lookup() {
        let manager = manager();

        assert_eq!(manager.cookie_value("refresh_token=abc"), Some("abc"));
        assert_eq!(
            manager.cookie_value("theme=dark; refresh_token=a.b.c; lang=en"),
            Some("a.b.c")
        );
        assert_eq!(manager.cookie_value("xrefresh_token=abc"), None);
        assert_eq!(manager.cookie_value("theme=dark"), None);
        assert_eq!(manager.cookie_value(""), None);
        assert_eq!(manager.cookie_value("refresh_token="), Some(""));
    }
}
