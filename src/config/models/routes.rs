//! Route table configuration

use serde::{Deserialize, Serialize};

/// How the inbound path is turned into the path sent to the backend
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RewriteConfig {
    /// Forward the original path unchanged
    #[default]
    Identity,
    /// Replace the matched prefix with a fixed string
    Substitute { replacement: String },
    /// Remove the matched prefix
    Strip,
}

/// One entry of the ordered route table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteConfig {
    /// Path prefix matched against the inbound path (query excluded)
    pub prefix: String,
    /// Name of the backend in [`super::ServicesConfig`]
    pub service: String,
    #[serde(default)]
    pub rewrite: RewriteConfig,
    /// Require a valid bearer token
    #[serde(default)]
    pub auth: bool,
    /// Caller needs at least one of these roles
    #[serde(default)]
    pub roles: Vec<String>,
    /// Enrich the query with the caller's location before forwarding
    #[serde(default)]
    pub resolve_location: bool,
}

impl RouteConfig {
    /// Public route through `service` with an identity rewrite
    pub fn new(prefix: impl Into<String>, service: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            service: service.into(),
            rewrite: RewriteConfig::Identity,
            auth: false,
            roles: Vec::new(),
            resolve_location: false,
        }
    }

    pub fn with_rewrite(mut self, rewrite: RewriteConfig) -> Self {
        self.rewrite = rewrite;
        self
    }

    pub fn authenticated(mut self) -> Self {
        self.auth = true;
        self
    }

    pub fn with_roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roles = roles.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_location(mut self) -> Self {
        self.resolve_location = true;
        self
    }

    /// Whether the token validator must run for this route
    ///
    /// Role checks and location enrichment both need claims, so either one
    /// turns authentication on.
    pub fn requires_auth(&self) -> bool {
        self.auth || !self.roles.is_empty() || self.resolve_location
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.prefix.starts_with('/') {
            return Err(format!("Route prefix '{}' must start with '/'", self.prefix));
        }
        if let RewriteConfig::Substitute { replacement } = &self.rewrite {
            if !replacement.is_empty() && !replacement.starts_with('/') {
                return Err(format!(
                    "Rewrite replacement '{}' for '{}' must start with '/'",
                    replacement, self.prefix
                ));
            }
        }
        if self.roles.iter().any(|role| role.trim().is_empty()) {
            return Err(format!("Route '{}' lists an empty role", self.prefix));
        }
        Ok(())
    }
}

/// Route table used when the configuration does not list one
pub fn default_routes() -> Vec<RouteConfig> {
    vec![
        RouteConfig::new("/api/v1/auth", "auth"),
        RouteConfig::new("/api/v1/users", "auth").authenticated(),
        RouteConfig::new("/api/v1/states", "states").with_rewrite(RewriteConfig::Substitute {
            replacement: "/api/states".to_string(),
        }),
        RouteConfig::new("/api/v1/kitchens/nearby", "kitchens")
            .authenticated()
            .with_location(),
        RouteConfig::new("/api/v1/kitchens", "kitchens").authenticated(),
        RouteConfig::new("/api/v1/inventory", "inventory")
            .authenticated()
            .with_roles(["Admin_cocina", "Volunteer"]),
        RouteConfig::new("/api/v1/notifications", "notifications").authenticated(),
        RouteConfig::new("/api/v1/chef", "chef")
            .with_rewrite(RewriteConfig::Strip)
            .authenticated()
            .with_roles(["Admin_cocina"]),
        RouteConfig::new("/api/v1/events", "events").authenticated(),
        RouteConfig::new("/api/v1/payments", "payments").authenticated(),
        RouteConfig::new("/api/v1/admin", "auth")
            .authenticated()
            .with_roles(["Super_admin"]),
    ]
}
