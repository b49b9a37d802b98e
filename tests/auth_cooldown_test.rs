//! Auth cooldown behavior across sign-in and reset flows

use std::time::Duration;

use assert_matches::assert_matches;
use tokio_test::assert_err;

use gatherly::middleware::rate_limit::{AuthRateLimiter, CooldownConfig};
use gatherly::GatherlyError;

fn limiter(max_attempts: u32, cooldown_ms: u64) -> AuthRateLimiter {
    AuthRateLimiter::new(CooldownConfig {
        max_attempts,
        window: Duration::from_secs(60),
        cooldown: Duration::from_millis(cooldown_ms),
    })
}

#[test]
fn spent_budget_starts_a_timed_cooldown() {
    let limiter = limiter(3, 60_000);

    for _ in 0..3 {
        limiter.record_failure("dancer@example.com");
    }

    let err = limiter.check("dancer@example.com").unwrap_err();
    assert_matches!(
        err,
        GatherlyError::RateLimitExceeded { retry_after_seconds } if retry_after_seconds >= 1
    );
}

#[test]
fn cooldown_lifts_after_it_elapses() {
    let limiter = limiter(1, 30);

    limiter.record_failure("dancer@example.com");
    assert!(limiter.check("dancer@example.com").is_err());

    std::thread::sleep(Duration::from_millis(60));
    assert!(limiter.check("dancer@example.com").is_ok());
}

#[test]
fn reset_requests_are_throttled_per_email() {
    let limiter = limiter(5, 60_000);

    assert!(limiter.enforce_request_cooldown("dancer@example.com").is_ok());
    tokio_test::assert_err!(limiter.enforce_request_cooldown("dancer@example.com"));

    // A different email is not affected
    assert!(limiter.enforce_request_cooldown("organizer@example.com").is_ok());
}

#[test]
fn failures_on_one_email_do_not_lock_another() {
    let limiter = limiter(1, 60_000);

    limiter.record_failure("dancer@example.com");
    assert!(limiter.check("dancer@example.com").is_err());
    assert!(limiter.check("organizer@example.com").is_ok());
}
