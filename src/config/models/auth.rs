//! Authentication configuration

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Authentication configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Shared HMAC secret the auth service signs tokens with
    #[serde(default)]
    pub jwt_secret: String,
    /// Clock skew tolerated on `exp`, in seconds
    #[serde(default)]
    pub leeway_secs: u64,
}

impl AuthConfig {
    /// Validate authentication configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.jwt_secret.is_empty() {
            return Err("JWT secret is required (set JWT_SECRET)".to_string());
        }

        if self.leeway_secs > 300 {
            return Err("JWT leeway should not exceed 5 minutes".to_string());
        }

        Ok(())
    }
}

/// Warn about weak settings that are still accepted
pub fn warn_insecure_config(config: &AuthConfig) {
    if !config.jwt_secret.is_empty() && config.jwt_secret.len() < 32 {
        warn!("JWT secret is shorter than 32 characters; use a longer shared secret in production");
    }
}
