//! Backend service locations

use serde::{Deserialize, Serialize};

/// Base URLs of the backend services the gateway fronts
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServicesConfig {
    /// Auth and user profile service
    pub auth: String,
    pub states: String,
    pub kitchens: String,
    pub inventory: String,
    pub notifications: String,
    pub chef: String,
    pub events: String,
    pub payments: String,
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            auth: "http://localhost:3002".to_string(),
            states: "http://localhost:3001".to_string(),
            kitchens: "http://localhost:3004".to_string(),
            inventory: "http://localhost:3005".to_string(),
            notifications: "http://localhost:3006".to_string(),
            chef: "http://localhost:3007".to_string(),
            events: "http://localhost:3008".to_string(),
            payments: "http://localhost:3009".to_string(),
        }
    }
}

impl ServicesConfig {
    /// Service names accepted in route definitions
    pub const NAMES: [&'static str; 8] = [
        "auth",
        "states",
        "kitchens",
        "inventory",
        "notifications",
        "chef",
        "events",
        "payments",
    ];

    /// Base URL for a named service
    pub fn url_for(&self, name: &str) -> Option<&str> {
        let url = match name {
            "auth" => &self.auth,
            "states" => &self.states,
            "kitchens" => &self.kitchens,
            "inventory" => &self.inventory,
            "notifications" => &self.notifications,
            "chef" => &self.chef,
            "events" => &self.events,
            "payments" => &self.payments,
            _ => return None,
        };
        Some(url.as_str())
    }

    /// Mutable slot for a named service
    pub fn url_for_mut(&mut self, name: &str) -> Option<&mut String> {
        match name {
            "auth" => Some(&mut self.auth),
            "states" => Some(&mut self.states),
            "kitchens" => Some(&mut self.kitchens),
            "inventory" => Some(&mut self.inventory),
            "notifications" => Some(&mut self.notifications),
            "chef" => Some(&mut self.chef),
            "events" => Some(&mut self.events),
            "payments" => Some(&mut self.payments),
            _ => None,
        }
    }

    /// `(name, url)` pairs in declaration order
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        Self::NAMES
            .iter()
            .filter_map(|name| self.url_for(name).map(|url| (*name, url)))
            .collect()
    }

    /// Validate that every base URL is an absolute http(s) URL
    pub fn validate(&self) -> Result<(), String> {
        for (name, raw) in self.entries() {
            let parsed = url::Url::parse(raw)
                .map_err(|e| format!("Invalid URL for service '{}': {}", name, e))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(format!(
                    "Service '{}' must use http or https, got '{}'",
                    name,
                    parsed.scheme()
                ));
            }
        }
        Ok(())
    }
}
