//! Event model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::profile::Profile;

/// Maximum number of categories an event may carry
pub const MAX_EVENT_CATEGORIES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "event_category", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    Tech,
    Business,
    Arts,
    Sports,
    Music,
    Food,
    Education,
    Social,
    Charity,
    Other,
}

impl EventCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventCategory::Tech => "tech",
            EventCategory::Business => "business",
            EventCategory::Arts => "arts",
            EventCategory::Sports => "sports",
            EventCategory::Music => "music",
            EventCategory::Food => "food",
            EventCategory::Education => "education",
            EventCategory::Social => "social",
            EventCategory::Charity => "charity",
            EventCategory::Other => "other",
        }
    }
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl sqlx::postgres::PgHasArrayType for EventCategory {
    fn array_type_info() -> sqlx::postgres::PgTypeInfo {
        sqlx::postgres::PgTypeInfo::with_name("_event_category")
    }
}

/// Category selection with a bounded number of picks.
///
/// Selecting an already-selected category deselects it; selecting a new one
/// past the limit is a no-op.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategorySelection {
    selected: Vec<EventCategory>,
}

impl CategorySelection {
    pub fn new(selected: Vec<EventCategory>) -> Self {
        Self { selected }
    }

    pub fn toggle(&mut self, category: EventCategory) {
        if let Some(pos) = self.selected.iter().position(|c| *c == category) {
            self.selected.remove(pos);
        } else if self.selected.len() < MAX_EVENT_CATEGORIES {
            self.selected.push(category);
        }
    }

    pub fn is_selected(&self, category: EventCategory) -> bool {
        self.selected.contains(&category)
    }

    pub fn selected(&self) -> &[EventCategory] {
        &self.selected
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub location: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub image_url: Option<String>,
    pub capacity: Option<i32>,
    pub organizer_id: Uuid,
    pub categories: Vec<EventCategory>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// An event is upcoming while it has not ended yet.
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.end_time >= now
    }
}

/// Event together with its attending headcount, as computed by the store.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct EventWithStats {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub event: Event,
    pub attendees_count: i64,
}

/// Attendee entry on the event detail view
#[derive(Debug, Clone, Serialize)]
pub struct EventAttendeeEntry {
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub profile: Profile,
}

/// Full event detail: organizer, headcount and the attending profiles
#[derive(Debug, Clone, Serialize)]
pub struct EventDetail {
    #[serde(flatten)]
    pub event: Event,
    pub organizer: Profile,
    pub attendees_count: i64,
    pub attendees: Vec<EventAttendeeEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    pub description: Option<String>,
    pub location: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub image_url: Option<String>,
    pub capacity: Option<i32>,
    pub categories: Vec<EventCategory>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub image_url: Option<String>,
    pub capacity: Option<i32>,
    pub categories: Option<Vec<EventCategory>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_respects_limit() {
        let mut selection = CategorySelection::new(vec![
            EventCategory::Tech,
            EventCategory::Music,
            EventCategory::Food,
        ]);

        // A 4th selection is a no-op
        selection.toggle(EventCategory::Arts);
        assert_eq!(selection.selected().len(), 3);
        assert!(!selection.is_selected(EventCategory::Arts));

        // Deselection always succeeds
        selection.toggle(EventCategory::Music);
        assert_eq!(selection.selected().len(), 2);
        assert!(!selection.is_selected(EventCategory::Music));

        // With room again, selection succeeds
        selection.toggle(EventCategory::Arts);
        assert!(selection.is_selected(EventCategory::Arts));
    }

    #[test]
    fn test_toggle_from_empty() {
        let mut selection = CategorySelection::default();
        selection.toggle(EventCategory::Social);
        assert!(selection.is_selected(EventCategory::Social));
        selection.toggle(EventCategory::Social);
        assert!(!selection.is_selected(EventCategory::Social));
    }
}
