//! Notification model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "notification_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    EventInvite,
    EventUpdate,
    EventReminder,
    EventCancelled,
    NewAttendee,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub event_id: Uuid,
    pub sender_id: Option<Uuid>,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateNotificationRequest {
    pub user_id: Uuid,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub event_id: Uuid,
    pub sender_id: Option<Uuid>,
}

/// Compact event fields shown alongside a notification
#[derive(Debug, Clone, Serialize)]
pub struct NotificationEventPreview {
    pub title: String,
    pub start_time: DateTime<Utc>,
    pub location: String,
    pub image_url: Option<String>,
}

/// Compact sender fields shown alongside a notification
#[derive(Debug, Clone, Serialize)]
pub struct NotificationSenderPreview {
    pub username: String,
    pub avatar_url: Option<String>,
}

/// Notification enriched with its event and sender previews
#[derive(Debug, Clone, Serialize)]
pub struct NotificationView {
    #[serde(flatten)]
    pub notification: Notification,
    pub event: NotificationEventPreview,
    pub sender: Option<NotificationSenderPreview>,
}

/// Flat row returned by the feed query; folded into `NotificationView`.
#[derive(Debug, Clone, FromRow)]
pub struct NotificationFeedRow {
    #[sqlx(flatten)]
    pub notification: Notification,
    pub event_title: String,
    pub event_start_time: DateTime<Utc>,
    pub event_location: String,
    pub event_image_url: Option<String>,
    pub sender_username: Option<String>,
    pub sender_avatar_url: Option<String>,
}

impl From<NotificationFeedRow> for NotificationView {
    fn from(row: NotificationFeedRow) -> Self {
        let sender = row.sender_username.map(|username| NotificationSenderPreview {
            username,
            avatar_url: row.sender_avatar_url,
        });

        NotificationView {
            notification: row.notification,
            event: NotificationEventPreview {
                title: row.event_title,
                start_time: row.event_start_time,
                location: row.event_location,
                image_url: row.event_image_url,
            },
            sender,
        }
    }
}
