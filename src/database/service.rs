//! Database service layer
//!
//! This module bundles the repositories behind a single handle.

use crate::database::{
    AccountRepository, AttendanceRepository, CommentRepository, DatabasePool, EventRepository,
    NotificationRepository, ProfileRepository,
};

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pub profiles: ProfileRepository,
    pub accounts: AccountRepository,
    pub events: EventRepository,
    pub attendance: AttendanceRepository,
    pub comments: CommentRepository,
    pub notifications: NotificationRepository,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            profiles: ProfileRepository::new(pool.clone()),
            accounts: AccountRepository::new(pool.clone()),
            events: EventRepository::new(pool.clone()),
            attendance: AttendanceRepository::new(pool.clone()),
            comments: CommentRepository::new(pool.clone()),
            notifications: NotificationRepository::new(pool),
        }
    }
}
