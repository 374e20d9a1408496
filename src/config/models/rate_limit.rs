//! Rate limiting configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Admission control configuration (fixed window per client)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Enable rate limiting
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Requests admitted per client per window
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,
    /// Window length in seconds
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_requests: default_max_requests(),
            window_secs: default_window_secs(),
        }
    }
}

impl RateLimitConfig {
    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.max_requests == 0 {
            return Err("Rate limit max_requests cannot be 0".to_string());
        }
        if self.window_secs == 0 {
            return Err("Rate limit window cannot be 0".to_string());
        }
        Ok(())
    }
}
