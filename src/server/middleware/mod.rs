//! HTTP middleware implementations
//!
//! - Request ID tracking
//! - Admission control (per-client rate limiting)

mod helpers;
mod rate_limit;
mod request_id;


pub use helpers::{REQUEST_ID_HEADER, client_key, get_request_context, request_id};
pub use rate_limit::{RateLimitMiddleware, RateLimitMiddlewareService};
pub use request_id::{RequestIdMiddleware, RequestIdMiddlewareService};
