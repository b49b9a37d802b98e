//! Event comment repository implementation

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::comment::{CommentView, CreateCommentRequest, EventComment};
use crate::utils::errors::GatherlyError;

#[derive(Debug, Clone)]
pub struct CommentRepository {
    pool: PgPool,
}

impl CommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new comment
    pub async fn create(&self, request: CreateCommentRequest) -> Result<EventComment, GatherlyError> {
        let comment = sqlx::query_as::<_, EventComment>(
            r#"
            INSERT INTO event_comments (event_id, user_id, content, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, event_id, user_id, content, created_at, updated_at
            "#,
        )
        .bind(request.event_id)
        .bind(request.user_id)
        .bind(request.content)
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(comment)
    }

    /// Comments on an event with author fields, oldest first
    pub async fn list_for_event(&self, event_id: Uuid) -> Result<Vec<CommentView>, GatherlyError> {
        let comments = sqlx::query_as::<_, CommentView>(
            r#"
            SELECT c.id, c.event_id, c.user_id, c.content, c.created_at, c.updated_at,
                   p.username AS author_username, p.avatar_url AS author_avatar_url
            FROM event_comments c
            INNER JOIN profiles p ON p.id = c.user_id
            WHERE c.event_id = $1
            ORDER BY c.created_at ASC
            "#,
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }

    /// Delete a comment if it belongs to the user
    pub async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<bool, GatherlyError> {
        let result = sqlx::query("DELETE FROM event_comments WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
