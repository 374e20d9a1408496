//! Shared HTTP client for backend calls
//!
//! One pooled client is built at startup and cloned into the forwarder and
//! the location resolver. Cloning a `reqwest::Client` shares its pool.

use crate::config::ProxyConfig;
use crate::utils::error::Result;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use tracing::debug;

/// Configuration for the HTTP client pool
#[derive(Debug, Clone)]
pub struct HttpClientPoolConfig {
    /// Maximum idle connections per host
    pub pool_max_idle_per_host: usize,
    /// Idle connection timeout
    pub pool_idle_timeout: Duration,
    /// Whole-request timeout for a single attempt
    pub timeout: Duration,
    /// Connection timeout
    pub connect_timeout: Duration,
    /// TCP keepalive interval
    pub tcp_keepalive: Duration,
    /// User agent string
    pub user_agent: &'static str,
}

impl Default for HttpClientPoolConfig {
    fn default() -> Self {
        Self::from(&ProxyConfig::default())
    }
}

impl From<&ProxyConfig> for HttpClientPoolConfig {
    fn from(proxy: &ProxyConfig) -> Self {
        Self {
            pool_max_idle_per_host: 32,
            pool_idle_timeout: Duration::from_secs(90),
            timeout: proxy.timeout(),
            connect_timeout: proxy.connect_timeout(),
            tcp_keepalive: Duration::from_secs(60),
            user_agent: concat!("kitchen-gateway/", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Build the pooled client used for outbound calls
///
/// Redirects are not followed; a backend's 3xx is relayed to the client as is.
pub fn build_client(config: &HttpClientPoolConfig) -> Result<Client> {
    debug!(
        timeout_ms = config.timeout.as_millis() as u64,
        "Building outbound HTTP client"
    );

    Ok(ClientBuilder::new()
        .pool_max_idle_per_host(config.pool_max_idle_per_host)
        .pool_idle_timeout(config.pool_idle_timeout)
        .timeout(config.timeout)
        .connect_timeout(config.connect_timeout)
        .tcp_keepalive(config.tcp_keepalive)
        .tcp_nodelay(true)
        .redirect(reqwest::redirect::Policy::none())
        .user_agent(config.user_agent)
        .build()?)
}
