//! HTTP route modules
//!
//! `/health` is served by the gateway itself; every other path goes through
//! the catch-all gateway handler.

pub mod gateway;
pub mod health;

use actix_web::web;

/// Register the gateway's own routes and the catch-all proxy handler
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure_routes)
        .default_service(web::to(gateway::proxy_request));
}
