//! Application configuration loaded once at startup

mod app_config;

pub use app_config::{
    AppConfig, DirectorySettings, LogFormat, LoggingConfig, SeedUser, ServerConfig,
    SessionSettings,
};
