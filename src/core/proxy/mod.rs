//! Request forwarding and response relay
//!
//! The forwarder makes exactly one outbound call per inbound request and
//! never returns an error: transport failures become a 503 result.

mod forwarder;
pub mod headers;
mod types;


pub use forwarder::Forwarder;
pub use types::{ForwardRequest, ForwardResult};
