//! Auth flow rate limiting
//!
//! Repeated attempts against the auth endpoints trigger a timed cooldown
//! before a retry is allowed. The limiter is keyed by normalized email so an
//! attacker cannot dodge it by rotating sessions.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::config::AuthConfig;
use crate::utils::errors::{GatherlyError, Result};

/// Cooldown configuration
#[derive(Debug, Clone)]
pub struct CooldownConfig {
    /// Failed attempts allowed per window
    pub max_attempts: u32,
    /// Window the attempts are counted over
    pub window: Duration,
    /// Cooldown applied once the budget is spent
    pub cooldown: Duration,
}

impl Default for CooldownConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            window: Duration::from_secs(300),
            cooldown: Duration::from_secs(60),
        }
    }
}

impl From<&AuthConfig> for CooldownConfig {
    fn from(config: &AuthConfig) -> Self {
        Self {
            max_attempts: config.max_attempts,
            window: Duration::from_secs(config.attempt_window_seconds),
            cooldown: Duration::from_secs(config.cooldown_seconds),
        }
    }
}

/// Tracking entry for one key
#[derive(Debug, Clone, Default)]
struct AttemptEntry {
    failures: Vec<Instant>,
    cooldown_until: Option<Instant>,
    last_request: Option<Instant>,
}

impl AttemptEntry {
    /// Drop failures that fell out of the window and expired cooldowns
    fn cleanup(&mut self, window: Duration) {
        let cutoff = Instant::now() - window;
        self.failures.retain(|&t| t > cutoff);

        if let Some(until) = self.cooldown_until {
            if until <= Instant::now() {
                self.cooldown_until = None;
            }
        }
    }

    fn remaining_cooldown(&self) -> Option<Duration> {
        self.cooldown_until
            .map(|until| until.saturating_duration_since(Instant::now()))
            .filter(|d| !d.is_zero())
    }
}

/// Rate limiter for authentication flows
#[derive(Clone)]
pub struct AuthRateLimiter {
    config: CooldownConfig,
    entries: Arc<Mutex<HashMap<String, AttemptEntry>>>,
}

impl AuthRateLimiter {
    /// Create a new AuthRateLimiter instance
    pub fn new(config: CooldownConfig) -> Self {
        Self {
            config,
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn normalize(key: &str) -> String {
        key.trim().to_lowercase()
    }

    /// Check whether the key is currently in cooldown
    pub fn check(&self, key: &str) -> Result<()> {
        let key = Self::normalize(key);
        let mut entries = self.entries.lock().unwrap();

        if let Some(entry) = entries.get_mut(&key) {
            entry.cleanup(self.config.window);
            if let Some(remaining) = entry.remaining_cooldown() {
                warn!(key = %key, remaining_secs = remaining.as_secs(), "Auth attempt during cooldown");
                return Err(GatherlyError::RateLimitExceeded {
                    retry_after_seconds: remaining.as_secs().max(1),
                });
            }
        }

        Ok(())
    }

    /// Record a failed attempt; starts the cooldown once the budget is spent
    pub fn record_failure(&self, key: &str) {
        let key = Self::normalize(key);
        let mut entries = self.entries.lock().unwrap();
        let entry = entries.entry(key.clone()).or_default();

        entry.cleanup(self.config.window);
        entry.failures.push(Instant::now());

        if entry.failures.len() as u32 >= self.config.max_attempts {
            entry.cooldown_until = Some(Instant::now() + self.config.cooldown);
            entry.failures.clear();
            warn!(key = %key, cooldown_secs = self.config.cooldown.as_secs(), "Auth cooldown started");
        } else {
            debug!(key = %key, failures = entry.failures.len(), "Auth failure recorded");
        }
    }

    /// Clear tracking for a key after a successful attempt
    pub fn clear(&self, key: &str) {
        let key = Self::normalize(key);
        let mut entries = self.entries.lock().unwrap();
        entries.remove(&key);
    }

    /// Enforce a flat cooldown between requests for a key.
    ///
    /// Used by the password-reset flow, where every request counts, not just
    /// failures.
    pub fn enforce_request_cooldown(&self, key: &str) -> Result<()> {
        let key = Self::normalize(key);
        let mut entries = self.entries.lock().unwrap();
        let entry = entries.entry(key.clone()).or_default();

        if let Some(last) = entry.last_request {
            let elapsed = last.elapsed();
            if elapsed < self.config.cooldown {
                let remaining = self.config.cooldown - elapsed;
                warn!(key = %key, remaining_secs = remaining.as_secs(), "Reset request during cooldown");
                return Err(GatherlyError::RateLimitExceeded {
                    retry_after_seconds: remaining.as_secs().max(1),
                });
            }
        }

        entry.last_request = Some(Instant::now());
        Ok(())
    }

    /// Cleanup stale entries (should be called periodically)
    pub fn cleanup_old_entries(&self) {
        let mut entries = self.entries.lock().unwrap();
        let window = self.config.window;
        let cooldown = self.config.cooldown;

        entries.retain(|_, entry| {
            entry.cleanup(window);
            let last_request_recent = entry
                .last_request
                .map(|t| t.elapsed() < cooldown)
                .unwrap_or(false);
            !entry.failures.is_empty() || entry.cooldown_until.is_some() || last_request_recent
        });

        debug!(remaining_entries = entries.len(), "Cleaned up stale rate limit entries");
    }
}

impl Default for AuthRateLimiter {
    fn default() -> Self {
        Self::new(CooldownConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter(max_attempts: u32, cooldown: Duration) -> AuthRateLimiter {
        AuthRateLimiter::new(CooldownConfig {
            max_attempts,
            window: Duration::from_secs(60),
            cooldown,
        })
    }

    #[test]
    fn test_cooldown_after_budget_spent() {
        let limiter = limiter(3, Duration::from_secs(60));

        for _ in 0..2 {
            limiter.record_failure("user@example.com");
            assert!(limiter.check("user@example.com").is_ok());
        }

        // Third failure spends the budget and starts the cooldown
        limiter.record_failure("user@example.com");
        let err = limiter.check("user@example.com").unwrap_err();
        match err {
            GatherlyError::RateLimitExceeded {
                retry_after_seconds,
            } => assert!(retry_after_seconds >= 1 && retry_after_seconds <= 60),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_keys_are_normalized() {
        let limiter = limiter(1, Duration::from_secs(60));

        limiter.record_failure("  User@Example.COM ");
        assert!(limiter.check("user@example.com").is_err());
    }

    #[test]
    fn test_clear_lifts_cooldown() {
        let limiter = limiter(1, Duration::from_secs(60));

        limiter.record_failure("user@example.com");
        assert!(limiter.check("user@example.com").is_err());

        limiter.clear("user@example.com");
        assert!(limiter.check("user@example.com").is_ok());
    }

    #[test]
    fn test_cooldown_expires() {
        let limiter = limiter(1, Duration::from_millis(10));

        limiter.record_failure("user@example.com");
        assert!(limiter.check("user@example.com").is_err());

        std::thread::sleep(Duration::from_millis(20));
        assert!(limiter.check("user@example.com").is_ok());
    }

    #[test]
    fn test_request_cooldown_counts_every_request() {
        let limiter = limiter(5, Duration::from_secs(60));

        assert!(limiter.enforce_request_cooldown("user@example.com").is_ok());
        assert!(limiter.enforce_request_cooldown("user@example.com").is_err());
        // Other keys are unaffected
        assert!(limiter.enforce_request_cooldown("other@example.com").is_ok());
    }

    #[test]
    fn test_cleanup_keeps_active_entries() {
        let limiter = limiter(3, Duration::from_secs(60));

        limiter.record_failure("user@example.com");
        limiter.cleanup_old_entries();
        limiter.record_failure("user@example.com");
        limiter.record_failure("user@example.com");

        assert!(limiter.check("user@example.com").is_err());
    }
}
