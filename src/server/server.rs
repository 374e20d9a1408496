//! HTTP server core implementation
//!
//! This module provides the HttpServer struct and its core methods.

use crate::config::{Config, CorsConfig, ServerConfig};
use crate::server::middleware::{RateLimitMiddleware, RequestIdMiddleware};
use crate::server::routes;
use crate::server::state::AppState;
use crate::utils::error::{GatewayError, Result};
use actix_cors::Cors;
use actix_web::{
    App, HttpServer as ActixHttpServer,
    middleware::{Condition, DefaultHeaders},
    web,
};
use tracing::{info, warn};
use tracing_actix_web::TracingLogger;

/// Seconds workers get to finish in-flight requests on shutdown
const SHUTDOWN_TIMEOUT_SECS: u64 = 30;

/// HTTP server
pub struct HttpServer {
    /// Server configuration
    config: ServerConfig,
    /// Application state
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server
    pub fn new(config: &Config) -> Result<Self> {
        info!("Creating HTTP server");

        let state = AppState::new(config.clone())?;
        info!(
            "Route table loaded with {} entries",
            state.pipeline.routes().len()
        );

        Ok(Self {
            config: config.gateway.server.clone(),
            state,
        })
    }

    /// Create the Actix-web application
    pub fn create_app(
        state: web::Data<AppState>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let server_config = state.config.server();
        let cors_enabled = server_config.cors.enabled;
        let cors = build_cors(&server_config.cors);

        App::new()
            .app_data(state)
            .wrap(RateLimitMiddleware)
            .wrap(RequestIdMiddleware)
            .wrap(
                DefaultHeaders::new()
                    .add(("X-Content-Type-Options", "nosniff"))
                    .add(("X-Frame-Options", "DENY"))
                    .add(("Referrer-Policy", "strict-origin-when-cross-origin")),
            )
            .wrap(Condition::new(cors_enabled, cors))
            .wrap(TracingLogger::default())
            .configure(routes::configure_routes)
    }

    /// Start the HTTP server
    pub async fn start(self) -> Result<()> {
        let bind_addr = self.config.address();
        let port = self.config.port;
        let workers = self.config.worker_count();

        info!("Starting HTTP server on {} with {} workers", bind_addr, workers);

        let limiter = self.state.pipeline.limiter().clone();
        let cleanup = limiter.start_cleanup_task();

        let state = web::Data::new(self.state);

        let server = ActixHttpServer::new(move || Self::create_app(state.clone()))
            .workers(workers)
            .shutdown_timeout(SHUTDOWN_TIMEOUT_SECS)
            .bind(&bind_addr)
            .map_err(|e| Self::format_bind_error(e, &bind_addr, port))?
            .run();

        info!("HTTP server listening on {}", bind_addr);

        let outcome = server
            .await
            .map_err(|e| GatewayError::internal(format!("Server error: {}", e)));

        cleanup.abort();
        info!("HTTP server stopped");
        outcome
    }

    /// Get server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get application state
    pub fn state(&self) -> &AppState {
        &self.state
    }
}

/// CORS policy from configuration
fn build_cors(config: &CorsConfig) -> Cors {
    let mut cors = Cors::default();

    if config.allows_all_origins() {
        cors = cors.allow_any_origin();
        if let Err(e) = config.validate() {
            warn!(error = %e, "CORS Configuration Warning");
        }
    } else {
        for origin in &config.allowed_origins {
            cors = cors.allowed_origin(origin);
        }
    }

    let methods: Vec<actix_web::http::Method> = config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    if !methods.is_empty() {
        cors = cors.allowed_methods(methods);
    }

    let headers: Vec<actix_web::http::header::HeaderName> = config
        .allowed_headers
        .iter()
        .filter_map(|h| h.parse().ok())
        .collect();
    if !headers.is_empty() {
        cors = cors.allowed_headers(headers);
    }

    cors = cors.max_age(config.max_age as usize);

    if config.allow_credentials {
        cors = cors.supports_credentials();
    }

    cors
}
