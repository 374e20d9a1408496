//! Fixed-window admission limiter

use super::types::{RateLimitResult, RateWindow};
use crate::config::RateLimitConfig;
use crate::utils::error::{GatewayError, Result};
use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// How often elapsed windows are pruned
const CLEANUP_INTERVAL: Duration = Duration::from_secs(60);

/// Per-client fixed-window limiter
///
/// Each key's window is updated while holding its map shard lock, so
/// concurrent bursts from one client cannot undercount.
#[derive(Debug)]
pub struct AdmissionLimiter {
    windows: DashMap<String, RateWindow>,
    enabled: bool,
    max_requests: u32,
    window: Duration,
}

impl AdmissionLimiter {
    /// Create a limiter from configuration
    pub fn new(config: &RateLimitConfig) -> Self {
        Self::with_window(config.max_requests, config.window()).enabled(config.enabled)
    }

    /// Create an enabled limiter with an explicit window
    pub fn with_window(max_requests: u32, window: Duration) -> Self {
        Self {
            windows: DashMap::new(),
            enabled: true,
            max_requests,
            window,
        }
    }

    fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Admit or reject one request from `client_key`
    pub fn admit(&self, client_key: &str) -> Result<RateLimitResult> {
        let result = self.check(client_key);
        if result.allowed {
            Ok(result)
        } else {
            Err(self.rejection(client_key))
        }
    }

    /// Count one request from `client_key` and report the window state
    pub fn check(&self, client_key: &str) -> RateLimitResult {
        self.check_at(client_key, Instant::now())
    }

    /// Error reported for a rejected request
    pub fn rejection(&self, client_key: &str) -> GatewayError {
        GatewayError::rate_limit(format!(
            "client {} exceeded {} requests per {}s",
            client_key,
            self.max_requests,
            self.window.as_secs()
        ))
    }

    /// Count a request at `now` and report the window state
    ///
    /// The window restarts once `now - started_at >= window`.
    pub fn check_at(&self, client_key: &str, now: Instant) -> RateLimitResult {
        if !self.enabled {
            return RateLimitResult::unlimited(self.max_requests);
        }

        let mut entry = match self.windows.get_mut(client_key) {
            Some(entry) => entry,
            None => self
                .windows
                .entry(client_key.to_string())
                .or_insert_with(|| RateWindow::starting_at(now)),
        };
        let window = entry.value_mut();

        let elapsed = now.saturating_duration_since(window.started_at);
        if elapsed >= self.window {
            *window = RateWindow::starting_at(now);
        }

        let elapsed = now.saturating_duration_since(window.started_at);
        let reset_after_secs = self.window.saturating_sub(elapsed).as_secs();
        let allowed = window.count < self.max_requests;

        if allowed {
            window.count += 1;
        } else {
            debug!("Admission rejected for {} ({} in window)", client_key, window.count);
        }

        RateLimitResult {
            allowed,
            current_count: window.count,
            limit: self.max_requests,
            remaining: self.max_requests.saturating_sub(window.count),
            reset_after_secs,
            retry_after_secs: (!allowed).then(|| reset_after_secs.max(1)),
        }
    }

    /// Drop windows that have fully elapsed
    pub fn cleanup(&self) {
        self.cleanup_at(Instant::now());
    }

    pub(crate) fn cleanup_at(&self, now: Instant) {
        let before = self.windows.len();
        self.windows
            .retain(|_, window| now.saturating_duration_since(window.started_at) < self.window);
        let removed = before.saturating_sub(self.windows.len());
        if removed > 0 {
            debug!("Pruned {} elapsed rate windows", removed);
        }
    }

    /// Start background cleanup task
    pub fn start_cleanup_task(self: &Arc<Self>) -> tokio::task::JoinHandle<()> {
        let limiter = Arc::clone(self);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(CLEANUP_INTERVAL);
            loop {
                interval.tick().await;
                limiter.cleanup();
            }
        })
    }

    /// Check if rate limiting is enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Get the configured limit
    pub fn limit(&self) -> u32 {
        self.max_requests
    }

    /// Number of clients with a live window
    pub fn tracked_clients(&self) -> usize {
        self.windows.len()
    }
}
