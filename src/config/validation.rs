//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use super::Settings;
use crate::utils::errors::{GatherlyError, Result};

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_server_config(&settings.server)?;
    validate_database_config(&settings.database)?;
    validate_redis_config(&settings.redis)?;
    validate_auth_config(&settings.auth)?;
    validate_storage_config(&settings.storage)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate server configuration
fn validate_server_config(config: &super::ServerConfig) -> Result<()> {
    if config.host.is_empty() {
        return Err(GatherlyError::Config("Server host is required".to_string()));
    }

    if config.port == 0 {
        return Err(GatherlyError::Config(
            "Server port must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(GatherlyError::Config("Database URL is required".to_string()));
    }

    if config.max_connections == 0 {
        return Err(GatherlyError::Config(
            "Max connections must be greater than 0".to_string(),
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(GatherlyError::Config(
            "Min connections cannot be greater than max connections".to_string(),
        ));
    }

    Ok(())
}

/// Validate Redis configuration
fn validate_redis_config(config: &super::RedisConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(GatherlyError::Config("Redis URL is required".to_string()));
    }

    Ok(())
}

/// Validate authentication configuration
fn validate_auth_config(config: &super::AuthConfig) -> Result<()> {
    if config.jwt_secret.is_empty() {
        return Err(GatherlyError::Config("JWT secret is required".to_string()));
    }

    if config.jwt_secret.len() < 32 {
        return Err(GatherlyError::Config(
            "JWT secret must be at least 32 bytes".to_string(),
        ));
    }

    if config.session_ttl_seconds == 0 {
        return Err(GatherlyError::Config(
            "Session TTL must be greater than 0".to_string(),
        ));
    }

    if config.max_attempts == 0 {
        return Err(GatherlyError::Config(
            "Auth attempt budget must be greater than 0".to_string(),
        ));
    }

    if config.cooldown_seconds == 0 {
        return Err(GatherlyError::Config(
            "Auth cooldown must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

/// Validate object storage configuration
fn validate_storage_config(config: &super::StorageConfig) -> Result<()> {
    if config.endpoint.is_empty() {
        return Err(GatherlyError::Config(
            "Storage endpoint is required".to_string(),
        ));
    }

    if config.public_base_url.is_empty() {
        return Err(GatherlyError::Config(
            "Storage public base URL is required".to_string(),
        ));
    }

    if config.bucket.is_empty() {
        return Err(GatherlyError::Config(
            "Storage bucket is required".to_string(),
        ));
    }

    if config.max_width == 0 || config.max_height == 0 {
        return Err(GatherlyError::Config(
            "Image bounds must be greater than 0".to_string(),
        ));
    }

    if config.jpeg_quality == 0 || config.jpeg_quality > 100 {
        return Err(GatherlyError::Config(
            "JPEG quality must be between 1 and 100".to_string(),
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(GatherlyError::Config("Log level is required".to_string()));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(GatherlyError::Config(format!(
            "Invalid log level: {}. Valid levels: {:?}",
            config.level, valid_levels
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_settings() -> Settings {
        let mut settings = Settings::default();
        settings.auth.jwt_secret = "0123456789abcdef0123456789abcdef".to_string();
        settings
    }

    #[test]
    fn test_default_settings_with_secret_are_valid() {
        assert!(validate_settings(&valid_settings()).is_ok());
    }

    #[test]
    fn test_missing_jwt_secret_is_rejected() {
        let settings = Settings::default();
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_invalid_log_level_is_rejected() {
        let mut settings = valid_settings();
        settings.logging.level = "verbose".to_string();
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_zero_jpeg_quality_is_rejected() {
        let mut settings = valid_settings();
        settings.storage.jpeg_quality = 0;
        assert!(validate_settings(&settings).is_err());
    }
}
