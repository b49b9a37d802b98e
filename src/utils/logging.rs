//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the Gatherly application.

use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use crate::config::LoggingConfig;
use crate::utils::errors::Result;

/// Initialize logging based on configuration.
///
/// Returns the appender guard; dropping it stops the background writer, so the
/// caller must hold it for the lifetime of the process.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    let file_appender = tracing_appender::rolling::daily(&config.file_path, "gatherly.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking))
        .init();

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log authentication flow events
pub fn log_auth_event(email: &str, action: &str, success: bool) {
    if success {
        info!(email = email, action = action, "Auth event");
    } else {
        warn!(email = email, action = action, "Auth event failed");
    }
}

/// Log event management actions
pub fn log_event_action(event_id: Uuid, action: &str, user_id: Uuid) {
    info!(
        event_id = %event_id,
        action = action,
        user_id = %user_id,
        "Event action performed"
    );
}

/// Log object storage operations
pub fn log_storage_operation(operation: &str, object_path: &str, success: bool) {
    if success {
        info!(operation = operation, object_path = object_path, "Storage operation completed");
    } else {
        warn!(operation = operation, object_path = object_path, "Storage operation failed");
    }
}
