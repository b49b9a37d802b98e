//! Account repository implementation

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::account::{Account, CreateAccountRequest};
use crate::models::profile::{CreateProfileRequest, Profile};
use crate::utils::errors::GatherlyError;

#[derive(Debug, Clone)]
pub struct AccountRepository {
    pool: PgPool,
}

impl AccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create profile and account in one transaction.
    ///
    /// The profile row is the root of the identity; the account row carries
    /// the credentials and must not exist without it.
    pub async fn create_with_profile(
        &self,
        profile_request: CreateProfileRequest,
        account_request: CreateAccountRequest,
    ) -> Result<(Profile, Account), GatherlyError> {
        let mut tx = self.pool.begin().await?;

        let profile = sqlx::query_as::<_, Profile>(
            r#"
            INSERT INTO profiles (id, username, full_name, avatar_url, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, username, full_name, avatar_url, location, bio, created_at, updated_at
            "#,
        )
        .bind(profile_request.id)
        .bind(profile_request.username)
        .bind(profile_request.full_name)
        .bind(profile_request.avatar_url)
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        let account = sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO accounts (id, email, password_hash, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, email, password_hash, created_at
            "#,
        )
        .bind(account_request.id)
        .bind(account_request.email)
        .bind(account_request.password_hash)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok((profile, account))
    }

    /// Find account by email
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Account>, GatherlyError> {
        let account = sqlx::query_as::<_, Account>(
            "SELECT id, email, password_hash, created_at FROM accounts WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    /// Find account by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, GatherlyError> {
        let account = sqlx::query_as::<_, Account>(
            "SELECT id, email, password_hash, created_at FROM accounts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    /// Replace the stored password hash
    pub async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<(), GatherlyError> {
        sqlx::query("UPDATE accounts SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
