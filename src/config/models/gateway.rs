//! Top-level gateway configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Everything the gateway needs at startup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    #[serde(default)]
    pub services: ServicesConfig,
    #[serde(default)]
    pub proxy: ProxyConfig,
    /// Ordered route table; first match wins
    #[serde(default = "default_routes")]
    pub routes: Vec<RouteConfig>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            auth: AuthConfig::default(),
            rate_limit: RateLimitConfig::default(),
            services: ServicesConfig::default(),
            proxy: ProxyConfig::default(),
            routes: default_routes(),
        }
    }
}

impl GatewayConfig {
    /// Check that every route points at a configured service
    pub fn validate_routes(&self) -> Result<(), String> {
        if self.routes.is_empty() {
            return Err("Route table is empty".to_string());
        }
        for route in &self.routes {
            route.validate()?;
            if self.services.url_for(&route.service).is_none() {
                return Err(format!(
                    "Route '{}' targets unknown service '{}'",
                    route.prefix, route.service
                ));
            }
        }
        Ok(())
    }
}
