//! Rate limiter types and data structures

use std::time::Instant;

/// Outcome of one admission check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitResult {
    /// Whether the request is allowed
    pub allowed: bool,
    /// Requests counted in the current window, this one included if allowed
    pub current_count: u32,
    /// Maximum requests allowed
    pub limit: u32,
    /// Remaining requests in the window
    pub remaining: u32,
    /// Time until the window resets (in seconds)
    pub reset_after_secs: u64,
    /// Retry after (in seconds, only set when not allowed)
    pub retry_after_secs: Option<u64>,
}

impl RateLimitResult {
    pub(super) fn unlimited(limit: u32) -> Self {
        Self {
            allowed: true,
            current_count: 0,
            limit,
            remaining: limit,
            reset_after_secs: 0,
            retry_after_secs: None,
        }
    }
}

/// Counter and start of the current window for one client
#[derive(Debug, Clone, Copy)]
pub(super) struct RateWindow {
    pub(super) count: u32,
    pub(super) started_at: Instant,
}

impl RateWindow {
    pub(super) fn starting_at(now: Instant) -> Self {
        Self {
            count: 0,
            started_at: now,
        }
    }
}
