//! Event service implementation
//!
//! This service handles event lifecycle (create, update, delete), attendance
//! changes with capacity handling, and event comments.

use chrono::{DateTime, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use crate::database::repositories::{
    AttendanceRepository, CommentRepository, EventRepository, ProfileRepository,
};
use crate::models::attendance::{Attendance, AttendanceStatus};
use crate::models::comment::{CommentView, CreateCommentRequest, EventComment};
use crate::models::event::{
    CreateEventRequest, Event, EventDetail, UpdateEventRequest, MAX_EVENT_CATEGORIES,
};
use crate::services::notification::NotificationService;
use crate::utils::errors::{GatherlyError, Result};
use crate::utils::logging::log_event_action;

/// Event service
#[derive(Clone)]
pub struct EventService {
    events: EventRepository,
    attendance: AttendanceRepository,
    profiles: ProfileRepository,
    comments: CommentRepository,
    notifications: NotificationService,
}

impl EventService {
    /// Create a new EventService instance
    pub fn new(
        events: EventRepository,
        attendance: AttendanceRepository,
        profiles: ProfileRepository,
        comments: CommentRepository,
        notifications: NotificationService,
    ) -> Self {
        Self {
            events,
            attendance,
            profiles,
            comments,
            notifications,
        }
    }

    /// Create a new event after validating the request
    pub async fn create_event(
        &self,
        organizer_id: Uuid,
        request: CreateEventRequest,
    ) -> Result<Event> {
        validate_event_fields(
            &request.title,
            &request.location,
            request.start_time,
            request.end_time,
            request.capacity,
        )?;
        validate_categories(request.categories.len())?;

        let event = self.events.create(organizer_id, request).await?;
        log_event_action(event.id, "create", organizer_id);

        Ok(event)
    }

    /// Full event detail: organizer, headcount and attending profiles
    pub async fn get_event(&self, event_id: Uuid) -> Result<EventDetail> {
        let with_stats = self
            .events
            .find_with_stats(event_id)
            .await?
            .ok_or(GatherlyError::EventNotFound { event_id })?;

        let organizer = self
            .profiles
            .find_by_id(with_stats.event.organizer_id)
            .await?
            .ok_or(GatherlyError::ProfileNotFound {
                profile_id: with_stats.event.organizer_id,
            })?;

        let attendees = self.attendance.list_attendees(event_id).await?;

        Ok(EventDetail {
            event: with_stats.event,
            organizer,
            attendees_count: with_stats.attendees_count,
            attendees,
        })
    }

    /// Update an event; only the organizer may do this.
    ///
    /// Attendees are notified after a successful update.
    pub async fn update_event(
        &self,
        user_id: Uuid,
        event_id: Uuid,
        request: UpdateEventRequest,
    ) -> Result<Event> {
        let existing = self
            .events
            .find_by_id(event_id)
            .await?
            .ok_or(GatherlyError::EventNotFound { event_id })?;

        if existing.organizer_id != user_id {
            return Err(GatherlyError::PermissionDenied(
                "Only the organizer can edit this event".to_string(),
            ));
        }

        // Validate the fields as they will be after the partial update
        let title = request.title.as_deref().unwrap_or(&existing.title);
        let location = request.location.as_deref().unwrap_or(&existing.location);
        let start_time = request.start_time.unwrap_or(existing.start_time);
        let end_time = request.end_time.unwrap_or(existing.end_time);
        let capacity = request.capacity.or(existing.capacity);
        validate_event_fields(title, location, start_time, end_time, capacity)?;

        if let Some(ref categories) = request.categories {
            validate_categories(categories.len())?;
        }

        let updated = self.events.update(event_id, request).await?;
        log_event_action(event_id, "update", user_id);

        self.notifications
            .notify_event_updated(&updated, user_id)
            .await?;

        Ok(updated)
    }

    /// Delete an event; only the organizer may do this
    pub async fn delete_event(&self, user_id: Uuid, event_id: Uuid) -> Result<()> {
        let existing = self
            .events
            .find_by_id(event_id)
            .await?
            .ok_or(GatherlyError::EventNotFound { event_id })?;

        if existing.organizer_id != user_id {
            return Err(GatherlyError::PermissionDenied(
                "Only the organizer can delete this event".to_string(),
            ));
        }

        self.events.delete(event_id).await?;
        log_event_action(event_id, "delete", user_id);

        Ok(())
    }

    /// Set or clear the user's attendance on an event.
    ///
    /// `None` clears the row. A request to attend a full event is stored as
    /// waitlist. Joining as attending notifies the organizer.
    pub async fn set_attendance(
        &self,
        user_id: Uuid,
        event_id: Uuid,
        status: Option<AttendanceStatus>,
    ) -> Result<Option<Attendance>> {
        let event = self
            .events
            .find_by_id(event_id)
            .await?
            .ok_or(GatherlyError::EventNotFound { event_id })?;

        if event.organizer_id == user_id {
            return Err(GatherlyError::PermissionDenied(
                "Organizers cannot change attendance on their own event".to_string(),
            ));
        }

        let requested = match status {
            None => {
                self.attendance.remove(event_id, user_id).await?;
                debug!(event_id = %event_id, user_id = %user_id, "Attendance cleared");
                return Ok(None);
            }
            Some(requested) => requested,
        };

        let effective = if requested == AttendanceStatus::Attending {
            self.resolve_capacity(&event, user_id).await?
        } else {
            requested
        };

        let attendance = self.attendance.upsert(event_id, user_id, effective).await?;
        info!(event_id = %event_id, user_id = %user_id, status = %effective, "Attendance updated");

        if effective == AttendanceStatus::Attending {
            let profile = self
                .profiles
                .find_by_id(user_id)
                .await?
                .ok_or(GatherlyError::ProfileNotFound {
                    profile_id: user_id,
                })?;
            self.notifications
                .notify_new_attendee(&event, &profile)
                .await?;
        }

        Ok(Some(attendance))
    }

    /// Downgrade an attending request to waitlist when the event is full.
    ///
    /// Users already attending keep their spot when re-submitting.
    async fn resolve_capacity(&self, event: &Event, user_id: Uuid) -> Result<AttendanceStatus> {
        let capacity = match event.capacity {
            Some(capacity) => capacity as i64,
            None => return Ok(AttendanceStatus::Attending),
        };

        let already_attending = self
            .attendance
            .find(event.id, user_id)
            .await?
            .map(|a| a.status == AttendanceStatus::Attending)
            .unwrap_or(false);

        if already_attending {
            return Ok(AttendanceStatus::Attending);
        }

        let attending = self.attendance.count_attending(event.id).await?;
        if attending >= capacity {
            debug!(event_id = %event.id, capacity = capacity, "Event full, waitlisting");
            return Ok(AttendanceStatus::Waitlist);
        }

        Ok(AttendanceStatus::Attending)
    }

    /// Add a comment to an event
    pub async fn add_comment(
        &self,
        user_id: Uuid,
        event_id: Uuid,
        content: &str,
    ) -> Result<EventComment> {
        let content = content.trim();
        if content.is_empty() {
            return Err(GatherlyError::Validation(
                "Comment cannot be empty".to_string(),
            ));
        }

        if self.events.find_by_id(event_id).await?.is_none() {
            return Err(GatherlyError::EventNotFound { event_id });
        }

        self.comments
            .create(CreateCommentRequest {
                event_id,
                user_id,
                content: content.to_string(),
            })
            .await
    }

    /// Comments on an event, oldest first
    pub async fn list_comments(&self, event_id: Uuid) -> Result<Vec<CommentView>> {
        self.comments.list_for_event(event_id).await
    }

    /// Delete a comment; only its author may do this
    pub async fn delete_comment(&self, user_id: Uuid, comment_id: Uuid) -> Result<()> {
        let deleted = self.comments.delete(comment_id, user_id).await?;
        if !deleted {
            return Err(GatherlyError::PermissionDenied(
                "You can only delete your own comments".to_string(),
            ));
        }

        Ok(())
    }
}

/// Validate the shared event fields
fn validate_event_fields(
    title: &str,
    location: &str,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    capacity: Option<i32>,
) -> Result<()> {
    if title.trim().is_empty() || location.trim().is_empty() {
        return Err(GatherlyError::Validation(
            "Please fill in all required fields".to_string(),
        ));
    }

    if end_time <= start_time {
        return Err(GatherlyError::Validation(
            "End time must be after start time".to_string(),
        ));
    }

    if let Some(capacity) = capacity {
        if capacity <= 0 {
            return Err(GatherlyError::Validation(
                "Capacity must be greater than 0".to_string(),
            ));
        }
    }

    Ok(())
}

/// Validate the category count
fn validate_categories(count: usize) -> Result<()> {
    if count == 0 {
        return Err(GatherlyError::Validation(
            "Please select at least one category".to_string(),
        ));
    }

    if count > MAX_EVENT_CATEGORIES {
        return Err(GatherlyError::Validation(format!(
            "You can select up to {} categories",
            MAX_EVENT_CATEGORIES
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_end_before_start_is_rejected() {
        let start = Utc.with_ymd_and_hms(2024, 1, 10, 10, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 1, 10, 9, 0, 0).unwrap();

        let err = validate_event_fields("Morning run", "Park", start, end, None).unwrap_err();
        assert_eq!(err.to_string(), "End time must be after start time");
    }

    #[test]
    fn test_end_equal_to_start_is_rejected() {
        let start = Utc.with_ymd_and_hms(2024, 1, 10, 10, 0, 0).unwrap();

        assert!(validate_event_fields("Morning run", "Park", start, start, None).is_err());
    }

    #[test]
    fn test_missing_required_fields_are_rejected() {
        let start = Utc.with_ymd_and_hms(2024, 1, 10, 10, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap();

        let err = validate_event_fields("", "Park", start, end, None).unwrap_err();
        assert_eq!(err.to_string(), "Please fill in all required fields");

        let err = validate_event_fields("Morning run", "   ", start, end, None).unwrap_err();
        assert_eq!(err.to_string(), "Please fill in all required fields");
    }

    #[test]
    fn test_capacity_must_be_positive() {
        let start = Utc.with_ymd_and_hms(2024, 1, 10, 10, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap();

        let err = validate_event_fields("Morning run", "Park", start, end, Some(0)).unwrap_err();
        assert_eq!(err.to_string(), "Capacity must be greater than 0");

        assert!(validate_event_fields("Morning run", "Park", start, end, Some(25)).is_ok());
    }

    #[test]
    fn test_category_count_bounds() {
        assert!(validate_categories(0).is_err());
        assert!(validate_categories(1).is_ok());
        assert!(validate_categories(3).is_ok());
        assert!(validate_categories(4).is_err());
    }
}
