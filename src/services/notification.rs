//! Notification service implementation
//!
//! This service handles the notification feed, read tracking, and fan-out
//! creation when events change or gain attendees.

use tracing::{debug, info};
use uuid::Uuid;

use crate::database::repositories::{AttendanceRepository, NotificationRepository};
use crate::models::event::Event;
use crate::models::notification::{CreateNotificationRequest, NotificationKind, NotificationView};
use crate::models::profile::Profile;
use crate::utils::errors::Result;

/// Maximum notifications returned by the feed
pub const NOTIFICATION_FEED_LIMIT: i64 = 50;

/// Notification service
#[derive(Clone)]
pub struct NotificationService {
    notifications: NotificationRepository,
    attendance: AttendanceRepository,
}

impl NotificationService {
    /// Create a new NotificationService instance
    pub fn new(notifications: NotificationRepository, attendance: AttendanceRepository) -> Self {
        Self {
            notifications,
            attendance,
        }
    }

    /// The user's most recent notifications with event and sender previews
    pub async fn list_feed(&self, user_id: Uuid) -> Result<Vec<NotificationView>> {
        let rows = self
            .notifications
            .list_recent(user_id, NOTIFICATION_FEED_LIMIT)
            .await?;

        Ok(rows.into_iter().map(NotificationView::from).collect())
    }

    /// Mark specific notifications read; only the user's own rows change
    pub async fn mark_read(&self, user_id: Uuid, ids: &[Uuid]) -> Result<u64> {
        if ids.is_empty() {
            return Ok(0);
        }

        let updated = self.notifications.mark_read(user_id, ids).await?;
        debug!(user_id = %user_id, updated = updated, "Notifications marked read");
        Ok(updated)
    }

    /// Mark every unread notification of the user read
    pub async fn mark_all_read(&self, user_id: Uuid) -> Result<u64> {
        let updated = self.notifications.mark_all_read(user_id).await?;
        debug!(user_id = %user_id, updated = updated, "All notifications marked read");
        Ok(updated)
    }

    /// Unread count for badge display
    pub async fn unread_count(&self, user_id: Uuid) -> Result<i64> {
        self.notifications.unread_count(user_id).await
    }

    /// Notify every attendee of an event that it was updated.
    ///
    /// Inserts run one after another; the first failure aborts the fan-out.
    /// The acting organizer is not notified about their own change.
    pub async fn notify_event_updated(&self, event: &Event, actor_id: Uuid) -> Result<u64> {
        let recipients = self.attendance.attending_user_ids(event.id).await?;
        let mut sent = 0;

        for recipient in recipients {
            if recipient == actor_id {
                continue;
            }

            self.notifications
                .create(CreateNotificationRequest {
                    user_id: recipient,
                    kind: NotificationKind::EventUpdate,
                    title: "Event updated".to_string(),
                    message: format!("{} has been updated by the organizer", event.title),
                    event_id: event.id,
                    sender_id: Some(actor_id),
                })
                .await?;
            sent += 1;
        }

        info!(event_id = %event.id, sent = sent, "Event update notifications sent");
        Ok(sent)
    }

    /// Notify the organizer that someone joined their event
    pub async fn notify_new_attendee(&self, event: &Event, attendee: &Profile) -> Result<()> {
        self.notifications
            .create(CreateNotificationRequest {
                user_id: event.organizer_id,
                kind: NotificationKind::NewAttendee,
                title: "New attendee".to_string(),
                message: format!("{} is attending {}", attendee.username, event.title),
                event_id: event.id,
                sender_id: Some(attendee.id),
            })
            .await?;

        info!(event_id = %event.id, attendee_id = %attendee.id, "New attendee notification sent");
        Ok(())
    }
}
