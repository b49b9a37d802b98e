//! Test data helpers for creating model objects
//!
//! This module provides helper functions for building events, profiles and
//! related records used across the integration tests.

use chrono::{DateTime, Duration, Utc};
use fake::faker::address::en::CityName;
use fake::faker::lorem::en::Sentence;
use fake::Fake;
use uuid::Uuid;

use gatherly::models::event::{Event, EventCategory, EventWithStats};
use gatherly::models::profile::Profile;

/// Build a profile with generated fields
pub fn create_test_profile(username: &str) -> Profile {
    let now = Utc::now();
    Profile {
        id: Uuid::new_v4(),
        username: username.to_string(),
        full_name: None,
        avatar_url: None,
        location: Some(CityName().fake()),
        bio: None,
        created_at: now,
        updated_at: now,
    }
}

/// Build an event running over the given window relative to now
pub fn create_test_event(
    organizer_id: Uuid,
    start_offset: Duration,
    end_offset: Duration,
) -> Event {
    let now = Utc::now();
    create_test_event_at(organizer_id, now + start_offset, now + end_offset)
}

/// Build an event with explicit timestamps
pub fn create_test_event_at(
    organizer_id: Uuid,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
) -> Event {
    let now = Utc::now();
    Event {
        id: Uuid::new_v4(),
        title: Sentence(2..5).fake(),
        description: Some(Sentence(5..10).fake()),
        location: CityName().fake(),
        start_time,
        end_time,
        image_url: None,
        capacity: None,
        organizer_id,
        categories: vec![EventCategory::Social],
        created_at: now,
        updated_at: now,
    }
}

/// Attach an attending headcount to an event
pub fn with_stats(event: Event, attendees_count: i64) -> EventWithStats {
    EventWithStats {
        event,
        attendees_count,
    }
}
