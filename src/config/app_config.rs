use serde::Deserialize;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub session: SessionSettings,
    pub directory: DirectorySettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Raw token/cookie settings as read from configuration sources.
///
/// Validated into an immutable `SessionConfig` at startup.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    pub issuer: String,
    pub audience: String,
    pub secret: String,
    pub access_token_ttl_secs: u64,
    pub refresh_token_ttl_secs: u64,
    pub cookie_name: String,
    pub cookie_path: String,
    pub cookie_domain: String,
}

impl std::fmt::Debug for SessionSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionSettings")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("secret", &"[hidden]")
            .field("access_token_ttl_secs", &self.access_token_ttl_secs)
            .field("refresh_token_ttl_secs", &self.refresh_token_ttl_secs)
            .field("cookie_name", &self.cookie_name)
            .field("cookie_path", &self.cookie_path)
            .field("cookie_domain", &self.cookie_domain)
            .finish()
    }
}

/// Users seeded into the in-memory identity directory
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DirectorySettings {
    pub users: Vec<SeedUser>,
}

/// One seeded user; the password is stored as an Argon2 PHC string
#[derive(Clone, Deserialize)]
pub struct SeedUser {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
}

impl std::fmt::Debug for SeedUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeedUser")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password_hash", &"[hidden]")
            .finish()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            issuer: "example.com".to_string(),
            audience: "example.com".to_string(),
            // No usable default: startup refuses an empty secret
            secret: String::new(),
            access_token_ttl_secs: 15 * 60,
            refresh_token_ttl_secs: 24 * 60 * 60,
            cookie_name: "refresh_token".to_string(),
            cookie_path: "/".to_string(),
            cookie_domain: "localhost".to_string(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_defaults() {
        let settings = SessionSettings::default();
        assert_eq!(settings.access_token_ttl_secs, 900);
        assert_eq!(settings.refresh_token_ttl_secs, 86_400);
        assert_eq!(settings.cookie_path, "/");
        assert!(settings.secret.is_empty());
    }

    #[test]
    fn test_debug_hides_secret() {
        let settings = SessionSettings {
            secret: "very-secret-value".to_string(),
            ..SessionSettings::default()
        };

        let rendered = format!("{:?}", settings);
        assert!(!rendered.contains("very-secret-value"));
        assert!(rendered.contains("[hidden]"));
    }

    #[test]
    fn test_deserialize_partial_session() {
        let json = r#"{"session": {"secret": "s3cret", "issuer": "movies.example"}}"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.session.issuer, "movies.example");
        assert_eq!(config.session.audience, "example.com");
        assert_eq!(config.server.port, 8080);
        assert!(config.directory.users.is_empty());
    }
}
