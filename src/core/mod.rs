//! Core functionality for the Gateway
//!
//! Route resolution, admission control, location enrichment and forwarding,
//! plus the pipeline that composes them per request.

pub mod location;
pub mod models;
pub mod pipeline;
pub mod proxy;
pub mod rate_limiter;
pub mod router;

pub use models::RequestContext;
pub use pipeline::GatewayPipeline;
