//! Application state shared across HTTP handlers

use crate::config::Config;
use crate::core::GatewayPipeline;
use crate::utils::error::Result;
use crate::utils::net::{HttpClientPoolConfig, build_client};
use std::sync::Arc;
use std::time::Instant;

/// HTTP server state shared across handlers
///
/// Cloned into every worker; all fields are `Arc`s or `Copy`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Gateway configuration (shared read-only)
    pub config: Arc<Config>,
    /// Admission, routing, access control and forwarding
    pub pipeline: Arc<GatewayPipeline>,
    /// Process start, reported as uptime by `/health`
    pub started_at: Instant,
}

impl AppState {
    /// Build the pipeline and its shared HTTP client from configuration
    pub fn new(config: Config) -> Result<Self> {
        let client = build_client(&HttpClientPoolConfig::from(config.proxy()))?;
        let pipeline = GatewayPipeline::new(&config, client)?;
        Ok(Self::with_pipeline(config, pipeline))
    }

    /// Use an already assembled pipeline
    pub fn with_pipeline(config: Config, pipeline: GatewayPipeline) -> Self {
        Self {
            config: Arc::new(config),
            pipeline: Arc::new(pipeline),
            started_at: Instant::now(),
        }
    }

    /// Get gateway configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Whether error bodies may carry internal detail
    pub fn expose_details(&self) -> bool {
        self.config.server().dev_mode
    }
}
