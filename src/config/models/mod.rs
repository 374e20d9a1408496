//! Configuration data models
//!
//! This module defines all configuration structures used throughout the gateway.

pub mod auth;
pub mod gateway;
pub mod proxy;
pub mod rate_limit;
pub mod routes;
pub mod server;
pub mod services;

// Re-export all configuration types
pub use auth::*;
pub use gateway::*;
pub use proxy::*;
pub use rate_limit::*;
pub use routes::*;
pub use server::*;
pub use services::*;

/// Default values for configuration
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    3000
}

/// Default maximum body size in bytes
pub fn default_max_body_size() -> usize {
    10 * 1024 * 1024 // 10MB
}

/// Default requests admitted per window
pub fn default_max_requests() -> u32 {
    100
}

/// Default admission window in seconds
pub fn default_window_secs() -> u64 {
    60
}

/// Default outbound call timeout in seconds
pub fn default_proxy_timeout() -> u64 {
    15
}

pub fn default_connect_timeout() -> u64 {
    5
}

pub fn default_service_name() -> String {
    "API Gateway".to_string()
}

pub(crate) fn default_true() -> bool {
    true
}
