//! Attendance repository implementation

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::models::attendance::{Attendance, AttendanceStatus};
use crate::models::event::EventAttendeeEntry;
use crate::models::profile::Profile;
use crate::utils::errors::GatherlyError;

#[derive(Debug, Clone, FromRow)]
struct AttendeeRow {
    user_id: Uuid,
    joined_at: DateTime<Utc>,
    #[sqlx(flatten)]
    profile: Profile,
}

#[derive(Debug, Clone)]
pub struct AttendanceRepository {
    pool: PgPool,
}

impl AttendanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert or replace the attendance row for (event, user)
    pub async fn upsert(
        &self,
        event_id: Uuid,
        user_id: Uuid,
        status: AttendanceStatus,
    ) -> Result<Attendance, GatherlyError> {
        let attendance = sqlx::query_as::<_, Attendance>(
            r#"
            INSERT INTO event_attendees (event_id, user_id, status, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (event_id, user_id) DO UPDATE SET status = EXCLUDED.status
            RETURNING event_id, user_id, status, created_at
            "#,
        )
        .bind(event_id)
        .bind(user_id)
        .bind(status)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(attendance)
    }

    /// Remove the attendance row for (event, user)
    pub async fn remove(&self, event_id: Uuid, user_id: Uuid) -> Result<(), GatherlyError> {
        sqlx::query("DELETE FROM event_attendees WHERE event_id = $1 AND user_id = $2")
            .bind(event_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Find the attendance row for (event, user)
    pub async fn find(
        &self,
        event_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Attendance>, GatherlyError> {
        let attendance = sqlx::query_as::<_, Attendance>(
            "SELECT event_id, user_id, status, created_at FROM event_attendees WHERE event_id = $1 AND user_id = $2"
        )
        .bind(event_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(attendance)
    }

    /// Count attending rows for an event
    pub async fn count_attending(&self, event_id: Uuid) -> Result<i64, GatherlyError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM event_attendees WHERE event_id = $1 AND status = 'attending'",
        )
        .bind(event_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }

    /// IDs of events the user attends (status = attending)
    pub async fn attending_event_ids(&self, user_id: Uuid) -> Result<Vec<Uuid>, GatherlyError> {
        let rows: Vec<(Uuid,)> = sqlx::query_as(
            "SELECT event_id FROM event_attendees WHERE user_id = $1 AND status = 'attending'",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// IDs of users attending an event (status = attending)
    pub async fn attending_user_ids(&self, event_id: Uuid) -> Result<Vec<Uuid>, GatherlyError> {
        let rows: Vec<(Uuid,)> = sqlx::query_as(
            "SELECT user_id FROM event_attendees WHERE event_id = $1 AND status = 'attending'",
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Attending profiles for an event, in join order
    pub async fn list_attendees(
        &self,
        event_id: Uuid,
    ) -> Result<Vec<EventAttendeeEntry>, GatherlyError> {
        let rows = sqlx::query_as::<_, AttendeeRow>(
            r#"
            SELECT a.user_id AS user_id, a.created_at AS joined_at,
                   p.id, p.username, p.full_name, p.avatar_url, p.location, p.bio, p.created_at, p.updated_at
            FROM event_attendees a
            INNER JOIN profiles p ON p.id = a.user_id
            WHERE a.event_id = $1 AND a.status = 'attending'
            ORDER BY a.created_at ASC
            "#,
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| EventAttendeeEntry {
                user_id: row.user_id,
                created_at: row.joined_at,
                profile: row.profile,
            })
            .collect())
    }
}
