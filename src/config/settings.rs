//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub auth: AuthConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Redis configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RedisConfig {
    pub url: String,
    pub prefix: String,
    pub ttl_seconds: u64,
}

/// Authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub session_ttl_seconds: u64,
    /// Failed attempts allowed per window before the cooldown kicks in
    pub max_attempts: u32,
    pub attempt_window_seconds: u64,
    pub cooldown_seconds: u64,
    pub reset_token_ttl_seconds: u64,
}

/// Object storage configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Base URL of the object store's upload API
    pub endpoint: String,
    /// Base URL objects are publicly served from
    pub public_base_url: String,
    pub api_key: String,
    pub bucket: String,
    pub max_width: u32,
    pub max_height: u32,
    pub jpeg_quality: u8,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: String,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("GATHERLY").separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::GatherlyError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3001,
            },
            database: DatabaseConfig {
                url: "postgresql://localhost/gatherly".to_string(),
                max_connections: 10,
                min_connections: 1,
            },
            redis: RedisConfig {
                url: "redis://localhost:6379".to_string(),
                prefix: "gatherly:".to_string(),
                ttl_seconds: 3600,
            },
            auth: AuthConfig {
                jwt_secret: String::new(),
                session_ttl_seconds: 86400,
                max_attempts: 5,
                attempt_window_seconds: 300,
                cooldown_seconds: 60,
                reset_token_ttl_seconds: 3600,
            },
            storage: StorageConfig {
                endpoint: "http://localhost:9000".to_string(),
                public_base_url: "http://localhost:9000".to_string(),
                api_key: String::new(),
                bucket: "event-images".to_string(),
                max_width: 1200,
                max_height: 1200,
                jpeg_quality: 80,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: "/var/log/gatherly".to_string(),
            },
        }
    }
}
