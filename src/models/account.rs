//! Account model
//!
//! Credentials live apart from the public profile; the password hash never
//! leaves this type.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateAccountRequest {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
}
