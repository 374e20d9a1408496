//! Health check endpoint

use crate::server::state::AppState;
use actix_web::{HttpResponse, web};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Configure health check routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));
}

/// Health check body
#[derive(Debug, Serialize)]
pub struct HealthResponse<'a> {
    pub success: bool,
    pub service: &'a str,
    pub version: &'static str,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    /// Seconds since the server started
    pub uptime: f64,
    /// Configured backend base URLs by service name
    pub services: BTreeMap<&'static str, &'a str>,
}

/// Basic health check endpoint
///
/// Reports identity, uptime and the configured backends. Does not contact
/// any backend.
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    debug!("Health check requested");

    let config = state.config();
    let body = HealthResponse {
        success: true,
        service: &config.server().service_name,
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now(),
        uptime: state.started_at.elapsed().as_secs_f64(),
        services: config.services().entries().into_iter().collect(),
    };

    HttpResponse::Ok().json(body)
}
