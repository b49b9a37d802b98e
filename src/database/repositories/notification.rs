//! Notification repository implementation

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::notification::{CreateNotificationRequest, Notification, NotificationFeedRow};
use crate::utils::errors::GatherlyError;

#[derive(Debug, Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new notification
    pub async fn create(
        &self,
        request: CreateNotificationRequest,
    ) -> Result<Notification, GatherlyError> {
        let notification = sqlx::query_as::<_, Notification>(
            r#"
            INSERT INTO notifications (user_id, type, title, message, event_id, sender_id, read, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, false, $7)
            RETURNING id, user_id, type, title, message, event_id, sender_id, read, created_at
            "#,
        )
        .bind(request.user_id)
        .bind(request.kind)
        .bind(request.title)
        .bind(request.message)
        .bind(request.event_id)
        .bind(request.sender_id)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(notification)
    }

    /// Most recent notifications for a user with event and sender previews
    pub async fn list_recent(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<NotificationFeedRow>, GatherlyError> {
        let rows = sqlx::query_as::<_, NotificationFeedRow>(
            r#"
            SELECT n.id, n.user_id, n.type, n.title, n.message, n.event_id, n.sender_id, n.read, n.created_at,
                   e.title AS event_title, e.start_time AS event_start_time, e.location AS event_location, e.image_url AS event_image_url,
                   s.username AS sender_username, s.avatar_url AS sender_avatar_url
            FROM notifications n
            INNER JOIN events e ON e.id = n.event_id
            LEFT JOIN profiles s ON s.id = n.sender_id
            WHERE n.user_id = $1
            ORDER BY n.created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Mark the given notifications read, scoped to the owning user
    pub async fn mark_read(&self, user_id: Uuid, ids: &[Uuid]) -> Result<u64, GatherlyError> {
        let result =
            sqlx::query("UPDATE notifications SET read = true WHERE user_id = $1 AND id = ANY($2)")
                .bind(user_id)
                .bind(ids)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected())
    }

    /// Mark every unread notification of the user read.
    ///
    /// Other users' rows are untouched by construction of the WHERE clause.
    pub async fn mark_all_read(&self, user_id: Uuid) -> Result<u64, GatherlyError> {
        let result =
            sqlx::query("UPDATE notifications SET read = true WHERE user_id = $1 AND read = false")
                .bind(user_id)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected())
    }

    /// Unread notification count for a user
    pub async fn unread_count(&self, user_id: Uuid) -> Result<i64, GatherlyError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM notifications WHERE user_id = $1 AND read = false",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }
}
