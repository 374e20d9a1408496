//! Server entry point
//!
//! Wraps HttpServer construction and startup behind a single call for the
//! binary.

use crate::config::Config;
use crate::server::server::HttpServer;
use crate::utils::error::Result;
use tracing::info;

/// Build and run the gateway until shutdown
pub async fn run_server(config: Config) -> Result<()> {
    info!("Starting kitchen gateway");

    let server = HttpServer::new(&config)?;
    info!(
        "Server starting at: http://{}:{}",
        config.server().host,
        config.server().port
    );
    info!("API Endpoints:");
    info!("   GET  /health - Health check");
    for entry in server.state().pipeline.routes().entries() {
        info!(
            "   *    {} -> {} ({})",
            entry.prefix,
            entry.target_base_url,
            if entry.is_public() { "public" } else { "protected" }
        );
    }

    server.start().await
}
