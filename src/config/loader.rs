//! Environment variable overrides
//!
//! Variable names follow the deployment the gateway replaces, so existing
//! `.env` files keep working.

use super::models::*;
use crate::utils::error::{GatewayError, Result};
use std::env;
use std::str::FromStr;
use tracing::debug;

/// Service URL variables, in `ServicesConfig::NAMES` order
const SERVICE_URL_VARS: [(&str, &[&str]); 8] = [
    ("auth", &["AUTH_SERVICE_URL", "AUTH_USER_SERVICE_URL"]),
    ("states", &["STATES_SERVICE_URL"]),
    ("kitchens", &["KITCHENS_SERVICE_URL"]),
    ("inventory", &["INVENTORY_SERVICE_URL"]),
    ("notifications", &["NOTIFICATIONS_SERVICE_URL"]),
    ("chef", &["CHEF_SERVICE_URL"]),
    ("events", &["EVENTS_SERVICE_URL"]),
    ("payments", &["PAYMENTS_SERVICE_URL"]),
];

impl GatewayConfig {
    /// Defaults overlaid with the process environment
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        Ok(config)
    }

    /// Overlay the process environment onto this configuration
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_overrides(|key| env::var(key).ok())
    }

    /// Overlay values returned by `lookup` onto this configuration
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        // Server
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = parse_var("PORT", &port)?;
        }
        if let Some(workers) = lookup("GATEWAY_WORKERS") {
            self.server.workers = Some(parse_var("GATEWAY_WORKERS", &workers)?);
        }
        if let Some(environment) = lookup("GATEWAY_ENV").or_else(|| lookup("NODE_ENV")) {
            self.server.dev_mode = environment.eq_ignore_ascii_case("development");
        }
        if let Some(trust) = lookup("TRUST_PROXY") {
            self.server.trust_proxy_headers = parse_flag("TRUST_PROXY", &trust)?;
        }
        if let Some(origins) = lookup("ALLOWED_ORIGINS") {
            self.server.cors.allowed_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(str::to_string)
                .collect();
        }

        // Auth
        if let Some(secret) = lookup("JWT_SECRET") {
            self.auth.jwt_secret = secret;
        }

        // Admission control
        if let Some(max) = lookup("RATE_LIMIT_MAX") {
            self.rate_limit.max_requests = parse_var("RATE_LIMIT_MAX", &max)?;
        }
        if let Some(window_ms) = lookup("RATE_LIMIT_WINDOW_MS") {
            let window_ms: u64 = parse_var("RATE_LIMIT_WINDOW_MS", &window_ms)?;
            self.rate_limit.window_secs = millis_to_secs(window_ms);
        }

        // Outbound calls
        if let Some(timeout_ms) = lookup("PROXY_TIMEOUT_MS") {
            let timeout_ms: u64 = parse_var("PROXY_TIMEOUT_MS", &timeout_ms)?;
            self.proxy.timeout_secs = millis_to_secs(timeout_ms);
            self.proxy.connect_timeout_secs =
                self.proxy.connect_timeout_secs.min(self.proxy.timeout_secs);
        }

        for (service, keys) in SERVICE_URL_VARS {
            if let Some(url) = keys.iter().find_map(|key| lookup(key)) {
                if let Some(slot) = self.services.url_for_mut(service) {
                    debug!("Service '{}' overridden from environment: {}", service, url);
                    *slot = url.trim_end_matches('/').to_string();
                }
            }
        }

        Ok(())
    }
}

fn parse_var<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| GatewayError::Config(format!("Invalid {}: {}", key, e)))
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(GatewayError::Config(format!(
            "Invalid {}: expected a boolean, got '{}'",
            key, other
        ))),
    }
}

/// Round up so a sub-second window never becomes zero
fn millis_to_secs(millis: u64) -> u64 {
    millis.div_ceil(1000)
}
