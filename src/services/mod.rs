//! Services module
//!
//! This module contains business logic services

pub mod auth;
pub mod event;
pub mod notification;
pub mod profile;
pub mod redis;
pub mod schedule;
pub mod search;
pub mod storage;

// Re-export commonly used services
pub use auth::{AuthContext, AuthService, AuthSession};
pub use event::EventService;
pub use notification::{NotificationService, NOTIFICATION_FEED_LIMIT};
pub use profile::{ProfileService, ProfileView};
pub use redis::RedisService;
pub use schedule::{ScheduleService, UserSchedule};
pub use search::{SearchRequest, SearchService, SEARCH_RESULT_LIMIT};
pub use storage::StorageService;

use crate::config::settings::Settings;
use crate::database::DatabaseService;
use crate::middleware::rate_limit::{AuthRateLimiter, CooldownConfig};
use crate::utils::errors::Result;

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub auth_service: AuthService,
    pub profile_service: ProfileService,
    pub event_service: EventService,
    pub schedule_service: ScheduleService,
    pub search_service: SearchService,
    pub notification_service: NotificationService,
    pub storage_service: StorageService,
    pub redis_service: RedisService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(
        settings: Settings,
        database: DatabaseService,
        redis_service: RedisService,
    ) -> Result<Self> {
        let limiter = AuthRateLimiter::new(CooldownConfig::from(&settings.auth));

        let auth_service = AuthService::new(
            database.accounts.clone(),
            database.profiles.clone(),
            redis_service.clone(),
            limiter,
            settings.clone(),
        );

        let schedule_service =
            ScheduleService::new(database.events.clone(), database.attendance.clone());

        let profile_service =
            ProfileService::new(database.profiles.clone(), schedule_service.clone());

        let notification_service =
            NotificationService::new(database.notifications.clone(), database.attendance.clone());

        let event_service = EventService::new(
            database.events.clone(),
            database.attendance.clone(),
            database.profiles.clone(),
            database.comments.clone(),
            notification_service.clone(),
        );

        let search_service = SearchService::new(database.events.clone());

        let storage_service = StorageService::new(settings.storage.clone());

        Ok(Self {
            auth_service,
            profile_service,
            event_service,
            schedule_service,
            search_service,
            notification_service,
            storage_service,
            redis_service,
        })
    }

    /// Health check for the services that hold external connections
    pub async fn health_check(&self) -> ServiceHealthStatus {
        let redis_healthy = self.redis_service.health_check().await.unwrap_or(false);

        ServiceHealthStatus { redis_healthy }
    }
}

/// Health status for the service layer
#[derive(Debug, Clone)]
pub struct ServiceHealthStatus {
    pub redis_healthy: bool,
}
