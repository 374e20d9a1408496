//! Admission control
//!
//! Fixed-window request counting per client key. Counters live inside the
//! limiter and are only reachable through [`AdmissionLimiter::admit`].

mod limiter;
mod types;


pub use limiter::AdmissionLimiter;
pub use types::RateLimitResult;
