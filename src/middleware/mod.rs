//! Middleware components
//!
//! This module contains authentication extraction, request logging and
//! auth-flow rate limiting.

pub mod auth;
pub mod logging;
pub mod rate_limit;

pub use auth::CurrentUser;
pub use logging::track_requests;
pub use rate_limit::{AuthRateLimiter, CooldownConfig};
