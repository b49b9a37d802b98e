//! Schedule aggregation properties
//!
//! Exercises the partition and ordering rules of the schedule pipeline over
//! generated event sets.

mod helpers;

use chrono::{Duration, Utc};
use uuid::Uuid;

use gatherly::models::event::{CategorySelection, EventCategory};
use gatherly::services::schedule::split_upcoming;

use helpers::test_data::{
    create_test_event, create_test_event_at, create_test_profile, with_stats,
};

#[test]
fn every_event_lands_in_exactly_one_section() {
    let now = Utc::now();
    let organizer = create_test_profile("organizer").id;

    let mut events = Vec::new();
    for i in 0..10i64 {
        // Half upcoming, half past
        let offset = Duration::hours(i - 5);
        events.push(with_stats(
            create_test_event(organizer, offset, offset + Duration::minutes(30)),
            i,
        ));
    }

    let total = events.len();
    let ids: Vec<Uuid> = events.iter().map(|e| e.event.id).collect();

    let (upcoming, past) = split_upcoming(events, now);

    assert_eq!(upcoming.len() + past.len(), total);
    for id in ids {
        let in_upcoming = upcoming.iter().any(|e| e.event.id == id);
        let in_past = past.iter().any(|e| e.event.id == id);
        assert!(in_upcoming != in_past, "event must be in exactly one section");
    }
}

#[test]
fn upcoming_is_sorted_ascending_and_past_descending() {
    let now = Utc::now();
    let organizer = Uuid::new_v4();

    let offsets = [-50, 7, -3, 22, -18, 1, 100, -72];
    let events = offsets
        .iter()
        .map(|&h| {
            with_stats(
                create_test_event(
                    organizer,
                    Duration::hours(h),
                    Duration::hours(h) + Duration::minutes(45),
                ),
                0,
            )
        })
        .collect();

    let (upcoming, past) = split_upcoming(events, now);

    let upcoming_starts: Vec<_> = upcoming.iter().map(|e| e.event.start_time).collect();
    assert!(upcoming_starts.windows(2).all(|w| w[0] <= w[1]));

    let past_starts: Vec<_> = past.iter().map(|e| e.event.start_time).collect();
    assert!(past_starts.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn zero_attendees_is_zero_not_missing() {
    let now = Utc::now();
    let organizer = Uuid::new_v4();

    let event = with_stats(
        create_test_event(organizer, Duration::hours(1), Duration::hours(2)),
        0,
    );

    let (upcoming, _) = split_upcoming(vec![event], now);
    assert_eq!(upcoming[0].attendees_count, 0);
}

#[test]
fn event_ending_exactly_now_counts_as_upcoming() {
    let now = Utc::now();
    let organizer = Uuid::new_v4();

    let boundary = with_stats(
        create_test_event_at(organizer, now - Duration::hours(2), now),
        3,
    );

    let (upcoming, past) = split_upcoming(vec![boundary], now);
    assert_eq!(upcoming.len(), 1);
    assert!(past.is_empty());
}

#[test]
fn empty_schedule_is_valid() {
    let (upcoming, past) = split_upcoming(Vec::new(), Utc::now());
    assert!(upcoming.is_empty());
    assert!(past.is_empty());
}

#[test]
fn fourth_category_selection_is_a_noop() {
    let mut selection = CategorySelection::new(vec![
        EventCategory::Tech,
        EventCategory::Arts,
        EventCategory::Food,
    ]);

    selection.toggle(EventCategory::Charity);
    assert!(!selection.is_selected(EventCategory::Charity));
    assert_eq!(selection.selected().len(), 3);

    selection.toggle(EventCategory::Arts);
    assert!(!selection.is_selected(EventCategory::Arts));
    assert_eq!(selection.selected().len(), 2);
}
