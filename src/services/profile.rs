//! Profile service implementation
//!
//! This service handles public profile views, profile updates and account
//! deletion.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::database::repositories::ProfileRepository;
use crate::models::event::EventWithStats;
use crate::models::profile::{Profile, UpdateProfileRequest};
use crate::services::schedule::ScheduleService;
use crate::utils::errors::{GatherlyError, Result};

const MIN_USERNAME_LENGTH: usize = 3;

/// Profile together with the upcoming events the user organizes and attends
#[derive(Debug, Clone, Serialize)]
pub struct ProfileView {
    #[serde(flatten)]
    pub profile: Profile,
    pub organized_events: Vec<EventWithStats>,
    pub attended_events: Vec<EventWithStats>,
}

/// Profile service
#[derive(Clone)]
pub struct ProfileService {
    profiles: ProfileRepository,
    schedule: ScheduleService,
}

impl ProfileService {
    /// Create a new ProfileService instance
    pub fn new(profiles: ProfileRepository, schedule: ScheduleService) -> Self {
        Self { profiles, schedule }
    }

    /// Get a profile by ID
    pub async fn get_profile(&self, profile_id: Uuid) -> Result<Profile> {
        self.profiles
            .find_by_id(profile_id)
            .await?
            .ok_or(GatherlyError::ProfileNotFound { profile_id })
    }

    /// Public profile view with the upcoming halves of the user's schedule
    pub async fn get_profile_view(
        &self,
        profile_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<ProfileView> {
        let profile = self.get_profile(profile_id).await?;
        let schedule = self.schedule.user_schedule(profile_id, now).await?;

        Ok(ProfileView {
            profile,
            organized_events: schedule.organizing,
            attended_events: schedule.attending,
        })
    }

    /// Update the user's own profile
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        request: UpdateProfileRequest,
    ) -> Result<Profile> {
        if let Some(ref username) = request.username {
            let username = username.trim();
            if username.chars().count() < MIN_USERNAME_LENGTH {
                return Err(GatherlyError::Validation(format!(
                    "Username must be at least {} characters",
                    MIN_USERNAME_LENGTH
                )));
            }

            if let Some(existing) = self.profiles.find_by_username(username).await? {
                if existing.id != user_id {
                    return Err(GatherlyError::Validation(
                        "Username is already taken".to_string(),
                    ));
                }
            }
        }

        let profile = self.profiles.update(user_id, request).await?;
        info!(user_id = %user_id, "Profile updated");

        Ok(profile)
    }

    /// Delete the user's account.
    ///
    /// Removing the profile row cascades to the account, organized events,
    /// attendance rows and notifications.
    pub async fn delete_account(&self, user_id: Uuid) -> Result<()> {
        // Ensure the profile exists so deletion of an unknown id is a 404
        self.get_profile(user_id).await?;

        self.profiles.delete(user_id).await?;
        info!(user_id = %user_id, "Account deleted");

        Ok(())
    }
}
