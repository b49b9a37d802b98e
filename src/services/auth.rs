//! Authentication service implementation
//!
//! This service handles sign-up, sign-in, session tokens, password changes
//! and the password-reset flow, with a timed cooldown on repeated attempts.

use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::settings::Settings;
use crate::database::repositories::{AccountRepository, ProfileRepository};
use crate::middleware::rate_limit::AuthRateLimiter;
use crate::models::account::CreateAccountRequest;
use crate::models::profile::{CreateProfileRequest, Profile};
use crate::services::redis::RedisService;
use crate::utils::errors::{GatherlyError, Result};
use crate::utils::helpers;
use crate::utils::logging::log_auth_event;

const MIN_PASSWORD_LENGTH: usize = 8;
const MIN_USERNAME_LENGTH: usize = 3;
const RESET_TOKEN_LENGTH: usize = 48;

/// JWT payload for a session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: Uuid,
    pub jti: Uuid,
    pub exp: i64,
}

/// Resolved identity of an authenticated request
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: Uuid,
    pub session_id: Uuid,
}

/// Session record persisted in Redis so tokens can be revoked
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SessionRecord {
    user_id: Uuid,
    created_at: chrono::DateTime<Utc>,
}

/// Successful sign-in/sign-up outcome
#[derive(Debug, Clone, Serialize)]
pub struct AuthSession {
    pub token: String,
    pub profile: Profile,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub username: String,
    pub full_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResetRequest {
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub new_password: String,
}

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    accounts: AccountRepository,
    profiles: ProfileRepository,
    redis: RedisService,
    limiter: AuthRateLimiter,
    settings: Settings,
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(
        accounts: AccountRepository,
        profiles: ProfileRepository,
        redis: RedisService,
        limiter: AuthRateLimiter,
        settings: Settings,
    ) -> Self {
        Self {
            accounts,
            profiles,
            redis,
            limiter,
            settings,
        }
    }

    /// Register a new account with its profile
    pub async fn sign_up(&self, request: SignUpRequest) -> Result<AuthSession> {
        let email = request.email.trim().to_lowercase();
        let username = request.username.trim().to_string();

        if email.is_empty() || request.password.is_empty() || username.is_empty() {
            return Err(GatherlyError::Validation(
                "Please fill in all fields".to_string(),
            ));
        }

        if !helpers::is_valid_email(&email) {
            return Err(GatherlyError::Validation(
                "Please enter a valid email address".to_string(),
            ));
        }

        if request.password.len() < MIN_PASSWORD_LENGTH {
            return Err(GatherlyError::Validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }

        if username.chars().count() < MIN_USERNAME_LENGTH {
            return Err(GatherlyError::Validation(format!(
                "Username must be at least {} characters",
                MIN_USERNAME_LENGTH
            )));
        }

        self.limiter.check(&email)?;

        if self.accounts.find_by_email(&email).await?.is_some() {
            return Err(GatherlyError::Validation(
                "An account with this email already exists".to_string(),
            ));
        }

        if self.profiles.find_by_username(&username).await?.is_some() {
            return Err(GatherlyError::Validation(
                "Username is already taken".to_string(),
            ));
        }

        let user_id = helpers::generate_uuid();
        let password_hash = hash_password(&request.password)?;

        let (profile, _account) = self
            .accounts
            .create_with_profile(
                CreateProfileRequest {
                    id: user_id,
                    username: username.clone(),
                    full_name: request.full_name,
                    avatar_url: Some(helpers::default_avatar_url(&username)),
                },
                CreateAccountRequest {
                    id: user_id,
                    email: email.clone(),
                    password_hash,
                },
            )
            .await?;

        self.limiter.clear(&email);
        log_auth_event(&email, "sign_up", true);
        info!(user_id = %profile.id, "New account registered");

        let token = self.issue_session(profile.id).await?;
        Ok(AuthSession { token, profile })
    }

    /// Sign in with email and password
    pub async fn sign_in(&self, request: SignInRequest) -> Result<AuthSession> {
        let email = request.email.trim().to_lowercase();

        if email.is_empty() || request.password.is_empty() {
            return Err(GatherlyError::Validation(
                "Please fill in all fields".to_string(),
            ));
        }

        if !helpers::is_valid_email(&email) {
            return Err(GatherlyError::Validation(
                "Please enter a valid email address".to_string(),
            ));
        }

        self.limiter.check(&email)?;

        let account = match self.accounts.find_by_email(&email).await? {
            Some(account) => account,
            None => {
                self.limiter.record_failure(&email);
                log_auth_event(&email, "sign_in", false);
                return Err(GatherlyError::Authentication(
                    "Invalid email or password".to_string(),
                ));
            }
        };

        if !verify_password(&request.password, &account.password_hash)? {
            self.limiter.record_failure(&email);
            log_auth_event(&email, "sign_in", false);
            return Err(GatherlyError::Authentication(
                "Invalid email or password".to_string(),
            ));
        }

        self.limiter.clear(&email);

        let profile = self
            .profiles
            .find_by_id(account.id)
            .await?
            .ok_or(GatherlyError::ProfileNotFound {
                profile_id: account.id,
            })?;

        log_auth_event(&email, "sign_in", true);

        let token = self.issue_session(profile.id).await?;
        Ok(AuthSession { token, profile })
    }

    /// Revoke the session behind a context
    pub async fn sign_out(&self, context: &AuthContext) -> Result<()> {
        let key = session_key(context.user_id, context.session_id);
        self.redis.delete(&key).await?;
        debug!(user_id = %context.user_id, "Session revoked");
        Ok(())
    }

    /// Verify a bearer token and resolve it to an identity.
    ///
    /// The token must decode against the configured secret and its session
    /// must still exist in Redis (sign-out removes it).
    pub async fn verify_token(&self, token: &str) -> Result<AuthContext> {
        let data = jsonwebtoken::decode::<SessionClaims>(
            token,
            &DecodingKey::from_secret(self.settings.auth.jwt_secret.as_bytes()),
            &Validation::default(),
        )?;

        let claims = data.claims;
        let key = session_key(claims.sub, claims.jti);
        if !self.redis.exists(&key).await? {
            return Err(GatherlyError::Authentication(
                "Session expired or revoked".to_string(),
            ));
        }

        Ok(AuthContext {
            user_id: claims.sub,
            session_id: claims.jti,
        })
    }

    /// Change the password of an authenticated user
    pub async fn change_password(
        &self,
        user_id: Uuid,
        request: ChangePasswordRequest,
    ) -> Result<()> {
        if request.new_password.len() < MIN_PASSWORD_LENGTH {
            return Err(GatherlyError::Validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }

        let account = self
            .accounts
            .find_by_id(user_id)
            .await?
            .ok_or(GatherlyError::ProfileNotFound {
                profile_id: user_id,
            })?;

        if !verify_password(&request.current_password, &account.password_hash)? {
            log_auth_event(&account.email, "change_password", false);
            return Err(GatherlyError::Authentication(
                "Current password is incorrect".to_string(),
            ));
        }

        let new_hash = hash_password(&request.new_password)?;
        self.accounts.update_password(user_id, &new_hash).await?;
        log_auth_event(&account.email, "change_password", true);

        Ok(())
    }

    /// Issue a password-reset token.
    ///
    /// Every request is throttled per email regardless of outcome, and the
    /// response does not reveal whether the account exists. There is no
    /// mailer; the token is written to the log for the operator to deliver.
    pub async fn request_password_reset(&self, request: ResetRequest) -> Result<()> {
        let email = request.email.trim().to_lowercase();

        if !helpers::is_valid_email(&email) {
            return Err(GatherlyError::Validation(
                "Please enter a valid email address".to_string(),
            ));
        }

        self.limiter.enforce_request_cooldown(&email)?;

        if let Some(account) = self.accounts.find_by_email(&email).await? {
            let token: String = rand::thread_rng()
                .sample_iter(&Alphanumeric)
                .take(RESET_TOKEN_LENGTH)
                .map(char::from)
                .collect();

            self.redis
                .set(
                    &reset_key(&token),
                    &account.id,
                    Some(self.settings.auth.reset_token_ttl_seconds),
                )
                .await?;

            info!(user_id = %account.id, token = %token, "Password reset token issued");
        } else {
            warn!(email = %email, "Password reset requested for unknown email");
        }

        Ok(())
    }

    /// Redeem a password-reset token
    pub async fn reset_password(&self, request: ResetPasswordRequest) -> Result<()> {
        if request.new_password.len() < MIN_PASSWORD_LENGTH {
            return Err(GatherlyError::Validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }

        let key = reset_key(&request.token);
        let user_id: Uuid = self.redis.get(&key).await?.ok_or_else(|| {
            GatherlyError::Authentication("Invalid or expired reset token".to_string())
        })?;

        let new_hash = hash_password(&request.new_password)?;
        self.accounts.update_password(user_id, &new_hash).await?;
        self.redis.delete(&key).await?;

        info!(user_id = %user_id, "Password reset completed");
        Ok(())
    }

    /// Mint a session token and record it in Redis
    async fn issue_session(&self, user_id: Uuid) -> Result<String> {
        let jti = helpers::generate_uuid();
        let ttl = self.settings.auth.session_ttl_seconds;
        let exp = Utc::now().timestamp() + ttl as i64;

        let claims = SessionClaims {
            sub: user_id,
            jti,
            exp,
        };

        let token = jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.settings.auth.jwt_secret.as_bytes()),
        )?;

        let record = SessionRecord {
            user_id,
            created_at: Utc::now(),
        };
        self.redis
            .set(&session_key(user_id, jti), &record, Some(ttl))
            .await?;

        Ok(token)
    }
}

fn session_key(user_id: Uuid, session_id: Uuid) -> String {
    format!("session:{}:{}", user_id, session_id)
}

fn reset_key(token: &str) -> String {
    format!("reset:{}", token)
}

/// Hash a password with Argon2id and a fresh salt
fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| GatherlyError::PasswordHash(e.to_string()))?;

    Ok(hash.to_string())
}

/// Verify a password against a stored hash
fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| GatherlyError::PasswordHash(e.to_string()))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_roundtrip() {
        let hash = hash_password("correct horse battery").unwrap();
        assert!(verify_password("correct horse battery", &hash).unwrap());
        assert!(!verify_password("wrong password", &hash).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = hash_password("same password").unwrap();
        let second = hash_password("same password").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_session_claims_roundtrip() {
        let secret = b"0123456789abcdef0123456789abcdef";
        let claims = SessionClaims {
            sub: Uuid::new_v4(),
            jti: Uuid::new_v4(),
            exp: Utc::now().timestamp() + 3600,
        };

        let token = jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret),
        )
        .unwrap();

        let decoded = jsonwebtoken::decode::<SessionClaims>(
            &token,
            &DecodingKey::from_secret(secret),
            &Validation::default(),
        )
        .unwrap();

        assert_eq!(decoded.claims.sub, claims.sub);
        assert_eq!(decoded.claims.jti, claims.jti);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let secret = b"0123456789abcdef0123456789abcdef";
        let claims = SessionClaims {
            sub: Uuid::new_v4(),
            jti: Uuid::new_v4(),
            exp: Utc::now().timestamp() - 120,
        };

        let token = jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret),
        )
        .unwrap();

        let result = jsonwebtoken::decode::<SessionClaims>(
            &token,
            &DecodingKey::from_secret(secret),
            &Validation::default(),
        );
        assert!(result.is_err());
    }
}
