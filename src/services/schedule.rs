//! Schedule aggregation service
//!
//! Builds the per-user event schedule: events the user organizes and events
//! the user attends, each split into upcoming and past. The attending half
//! excludes organizer-owned events so an event never appears in both lists.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::database::repositories::{AttendanceRepository, EventRepository};
use crate::models::event::EventWithStats;
use crate::utils::errors::Result;

/// The four schedule sections for one user
#[derive(Debug, Clone, Serialize)]
pub struct UserSchedule {
    /// Upcoming events the user organizes, soonest first
    pub organizing: Vec<EventWithStats>,
    /// Upcoming events the user attends, soonest first
    pub attending: Vec<EventWithStats>,
    /// Past events the user organized, most recent first
    pub organized_past: Vec<EventWithStats>,
    /// Past events the user attended, most recent first
    pub attended_past: Vec<EventWithStats>,
}

/// Schedule aggregation service
#[derive(Clone)]
pub struct ScheduleService {
    events: EventRepository,
    attendance: AttendanceRepository,
}

impl ScheduleService {
    /// Create a new ScheduleService instance
    pub fn new(events: EventRepository, attendance: AttendanceRepository) -> Self {
        Self { events, attendance }
    }

    /// Build the four-section schedule for a user.
    ///
    /// Fetches run one after another; the first failure aborts the whole
    /// aggregation and no partial schedule is returned.
    pub async fn user_schedule(&self, user_id: Uuid, now: DateTime<Utc>) -> Result<UserSchedule> {
        let organized = self.events.list_by_organizer(user_id).await?;

        let attending_ids = self.attendance.attending_event_ids(user_id).await?;
        let attended = self
            .events
            .list_by_ids_excluding_organizer(&attending_ids, user_id)
            .await?;

        let (organizing, organized_past) = split_upcoming(organized, now);
        let (attending, attended_past) = split_upcoming(attended, now);

        debug!(
            user_id = %user_id,
            organizing = organizing.len(),
            attending = attending.len(),
            organized_past = organized_past.len(),
            attended_past = attended_past.len(),
            "User schedule assembled"
        );

        Ok(UserSchedule {
            organizing,
            attending,
            organized_past,
            attended_past,
        })
    }

    /// Discovery feed: every event that has not ended yet, soonest first
    pub async fn discovery_feed(
        &self,
        now: DateTime<Utc>,
        limit: Option<i64>,
    ) -> Result<Vec<EventWithStats>> {
        self.events.list_upcoming(now, limit).await
    }
}

/// Split events into (upcoming, past) and order each half.
///
/// An event still counts as upcoming at the instant its end time passes
/// (`end_time >= now`). Upcoming events are ordered soonest first, past
/// events most recent first.
pub fn split_upcoming(
    events: Vec<EventWithStats>,
    now: DateTime<Utc>,
) -> (Vec<EventWithStats>, Vec<EventWithStats>) {
    let (mut upcoming, mut past): (Vec<_>, Vec<_>) = events
        .into_iter()
        .partition(|entry| entry.event.is_upcoming(now));

    upcoming.sort_by_key(|entry| entry.event.start_time);
    past.sort_by(|a, b| b.event.start_time.cmp(&a.event.start_time));

    (upcoming, past)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::event::{Event, EventCategory};
    use chrono::Duration;

    fn event_with_times(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        attendees_count: i64,
    ) -> EventWithStats {
        EventWithStats {
            event: Event {
                id: Uuid::new_v4(),
                title: "Test event".to_string(),
                description: None,
                location: "Somewhere".to_string(),
                start_time: start,
                end_time: end,
                image_url: None,
                capacity: None,
                organizer_id: Uuid::new_v4(),
                categories: vec![EventCategory::Other],
                created_at: start,
                updated_at: start,
            },
            attendees_count,
        }
    }

    #[test]
    fn test_split_partitions_on_end_time() {
        let now = Utc::now();
        let upcoming_event = event_with_times(now + Duration::hours(1), now + Duration::hours(2), 0);
        let past_event = event_with_times(now - Duration::hours(3), now - Duration::hours(2), 5);

        let (upcoming, past) = split_upcoming(vec![upcoming_event, past_event], now);

        assert_eq!(upcoming.len(), 1);
        assert_eq!(past.len(), 1);
        assert_eq!(past[0].attendees_count, 5);
    }

    #[test]
    fn test_event_ending_exactly_now_is_upcoming() {
        let now = Utc::now();
        let boundary = event_with_times(now - Duration::hours(1), now, 0);

        let (upcoming, past) = split_upcoming(vec![boundary], now);

        assert_eq!(upcoming.len(), 1);
        assert!(past.is_empty());
    }

    #[test]
    fn test_upcoming_sorted_soonest_first() {
        let now = Utc::now();
        let later = event_with_times(now + Duration::hours(5), now + Duration::hours(6), 0);
        let sooner = event_with_times(now + Duration::hours(1), now + Duration::hours(2), 0);
        let middle = event_with_times(now + Duration::hours(3), now + Duration::hours(4), 0);

        let (upcoming, _) = split_upcoming(vec![later, sooner, middle], now);

        let starts: Vec<_> = upcoming.iter().map(|e| e.event.start_time).collect();
        assert!(starts.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_past_sorted_most_recent_first() {
        let now = Utc::now();
        let oldest = event_with_times(now - Duration::days(10), now - Duration::days(9), 0);
        let recent = event_with_times(now - Duration::days(1), now - Duration::hours(20), 0);
        let older = event_with_times(now - Duration::days(5), now - Duration::days(4), 0);

        let (_, past) = split_upcoming(vec![oldest, recent, older], now);

        let starts: Vec<_> = past.iter().map(|e| e.event.start_time).collect();
        assert!(starts.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_empty_input_yields_empty_sections() {
        let (upcoming, past) = split_upcoming(Vec::new(), Utc::now());
        assert!(upcoming.is_empty());
        assert!(past.is_empty());
    }
}
