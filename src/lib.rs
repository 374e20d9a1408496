//! # Kitchen Gateway
//!
//! HTTP API gateway for the community kitchens platform. A single public
//! entry point in front of independently deployed backend services.
//!
//! ## Features
//!
//! - **Prefix routing**: ordered route table, first match wins
//! - **Path rewriting**: identity, substitution or prefix stripping per route
//! - **Admission control**: fixed-window request limit per client
//! - **Authentication**: HMAC-signed JWT bearer tokens
//! - **Role gating**: at-least-one-of role checks per route
//! - **Location enrichment**: caller's state and municipality added to the
//!   query of location-scoped routes
//!
//! ## Running
//!
//! ```rust,no_run
//! use kitchen_gateway::{Config, server};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load(None).await?;
//!     server::run_server(config).await?;
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod auth;
pub mod config;
pub mod core;
pub mod server;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use core::{GatewayPipeline, RequestContext};
pub use utils::error::{AuthFailure, GatewayError, Result};

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
