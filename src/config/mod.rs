//! Configuration management for the Gateway
//!
//! This module handles loading, validation, and management of all gateway configuration.

mod loader;
pub mod models;

pub use models::*;

use crate::utils::error::{GatewayError, Result};
use std::path::Path;
use tracing::{debug, info, warn};

/// Main configuration struct for the Gateway
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Gateway configuration
    pub gateway: GatewayConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Self {
            gateway: read_gateway_file(path.as_ref()).await?,
        };
        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let gateway = GatewayConfig::from_env()?;
        let config = Self { gateway };

        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when given, otherwise from the environment
    ///
    /// Environment variables override values read from the file.
    ///
    /// A `.env` file in the working directory is read first in both cases.
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        match dotenvy::dotenv() {
            Ok(file) => debug!("Loaded environment from {:?}", file),
            Err(e) if e.not_found() => {}
            Err(e) => warn!("Ignoring unreadable .env file: {}", e),
        }

        let Some(path) = path else {
            return Self::from_env();
        };

        let mut gateway = read_gateway_file(path).await?;
        gateway.apply_env()?;

        let config = Self { gateway };
        config.validate()?;
        Ok(config)
    }

    /// Get server configuration
    pub fn server(&self) -> &ServerConfig {
        &self.gateway.server
    }

    /// Get auth configuration
    pub fn auth(&self) -> &AuthConfig {
        &self.gateway.auth
    }

    pub fn rate_limit(&self) -> &RateLimitConfig {
        &self.gateway.rate_limit
    }

    pub fn services(&self) -> &ServicesConfig {
        &self.gateway.services
    }

    pub fn proxy(&self) -> &ProxyConfig {
        &self.gateway.proxy
    }

    /// Ordered route table
    pub fn routes(&self) -> &[RouteConfig] {
        &self.gateway.routes
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.gateway
            .server
            .validate()
            .map_err(|e| GatewayError::Config(format!("Server config error: {}", e)))?;

        self.gateway
            .server
            .cors
            .validate()
            .map_err(|e| GatewayError::Config(format!("CORS config error: {}", e)))?;

        self.gateway
            .auth
            .validate()
            .map_err(|e| GatewayError::Config(format!("Auth config error: {}", e)))?;

        self.gateway
            .rate_limit
            .validate()
            .map_err(|e| GatewayError::Config(format!("Rate limit config error: {}", e)))?;

        self.gateway
            .proxy
            .validate()
            .map_err(|e| GatewayError::Config(format!("Proxy config error: {}", e)))?;

        self.gateway
            .services
            .validate()
            .map_err(|e| GatewayError::Config(format!("Services config error: {}", e)))?;

        self.gateway
            .validate_routes()
            .map_err(|e| GatewayError::Config(format!("Route config error: {}", e)))?;

        // Warn about insecure configurations
        crate::config::models::auth::warn_insecure_config(&self.gateway.auth);

        debug!("Configuration validation completed");
        Ok(())
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(&self.gateway)?)
    }
}

async fn read_gateway_file(path: &Path) -> Result<GatewayConfig> {
    info!("Loading configuration from: {:?}", path);

    let content = tokio::fs::read_to_string(path).await?;
    Ok(serde_yaml::from_str(&content)?)
}
