//! Profile repository implementation

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::profile::{CreateProfileRequest, Profile, UpdateProfileRequest};
use crate::utils::errors::GatherlyError;

#[derive(Debug, Clone)]
pub struct ProfileRepository {
    pool: PgPool,
}

impl ProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new profile
    pub async fn create(&self, request: CreateProfileRequest) -> Result<Profile, GatherlyError> {
        let profile = sqlx::query_as::<_, Profile>(
            r#"
            INSERT INTO profiles (id, username, full_name, avatar_url, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, username, full_name, avatar_url, location, bio, created_at, updated_at
            "#,
        )
        .bind(request.id)
        .bind(request.username)
        .bind(request.full_name)
        .bind(request.avatar_url)
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(profile)
    }

    /// Find profile by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Profile>, GatherlyError> {
        let profile = sqlx::query_as::<_, Profile>(
            "SELECT id, username, full_name, avatar_url, location, bio, created_at, updated_at FROM profiles WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(profile)
    }

    /// Find profile by username
    pub async fn find_by_username(&self, username: &str) -> Result<Option<Profile>, GatherlyError> {
        let profile = sqlx::query_as::<_, Profile>(
            "SELECT id, username, full_name, avatar_url, location, bio, created_at, updated_at FROM profiles WHERE username = $1"
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(profile)
    }

    /// Update profile
    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateProfileRequest,
    ) -> Result<Profile, GatherlyError> {
        let profile = sqlx::query_as::<_, Profile>(
            r#"
            UPDATE profiles
            SET username = COALESCE($2, username),
                full_name = COALESCE($3, full_name),
                avatar_url = COALESCE($4, avatar_url),
                location = COALESCE($5, location),
                bio = COALESCE($6, bio),
                updated_at = $7
            WHERE id = $1
            RETURNING id, username, full_name, avatar_url, location, bio, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(request.username)
        .bind(request.full_name)
        .bind(request.avatar_url)
        .bind(request.location)
        .bind(request.bio)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(profile)
    }

    /// Delete profile (cascades to the account, events and attendance rows)
    pub async fn delete(&self, id: Uuid) -> Result<(), GatherlyError> {
        sqlx::query("DELETE FROM profiles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Count total profiles
    pub async fn count(&self) -> Result<i64, GatherlyError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM profiles")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
