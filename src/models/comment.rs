//! Event comment model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EventComment {
    pub id: Uuid,
    pub event_id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateCommentRequest {
    pub event_id: Uuid,
    pub user_id: Uuid,
    pub content: String,
}

/// Comment together with its author's public fields
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CommentView {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub comment: EventComment,
    pub author_username: String,
    pub author_avatar_url: Option<String>,
}
