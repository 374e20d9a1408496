//! Outbound call configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Forwarding settings shared by every backend call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyConfig {
    /// Whole-request timeout for a single forwarding attempt, in seconds
    #[serde(default = "default_proxy_timeout")]
    pub timeout_secs: u64,
    /// TCP connect timeout, in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_proxy_timeout(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

impl ProxyConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.timeout_secs == 0 {
            return Err("Proxy timeout cannot be 0".to_string());
        }
        if self.connect_timeout_secs == 0 || self.connect_timeout_secs > self.timeout_secs {
            return Err("Proxy connect timeout must be between 1 and timeout_secs".to_string());
        }
        Ok(())
    }
}
