//! Data models
//!
//! This module contains the data structures backing the Gatherly schema.

pub mod account;
pub mod attendance;
pub mod comment;
pub mod event;
pub mod notification;
pub mod profile;

pub use account::{Account, CreateAccountRequest};
pub use attendance::{Attendance, AttendanceStatus};
pub use comment::{CommentView, CreateCommentRequest, EventComment};
pub use event::{
    CategorySelection, CreateEventRequest, Event, EventAttendeeEntry, EventCategory, EventDetail,
    EventWithStats, UpdateEventRequest, MAX_EVENT_CATEGORIES,
};
pub use notification::{
    CreateNotificationRequest, Notification, NotificationFeedRow, NotificationKind,
    NotificationView,
};
pub use profile::{CreateProfileRequest, Profile, UpdateProfileRequest};
