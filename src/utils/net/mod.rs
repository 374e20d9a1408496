//! Network utilities
//!
//! Outbound HTTP client shared by every backend call.

pub mod http;

pub use http::{HttpClientPoolConfig, build_client};
