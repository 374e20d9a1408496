//! Utility modules for the gateway
//!
//! - **error**: error taxonomy and HTTP rendering
//! - **logging**: tracing subscriber setup
//! - **net**: outbound HTTP client construction

pub mod error;
pub mod logging;
pub mod net;
