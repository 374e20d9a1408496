//! HTTP server utility methods

use crate::server::server::HttpServer;
use crate::utils::error::GatewayError;
use std::io::ErrorKind;

impl HttpServer {
    /// Format a readable error for port binding failures
    pub(crate) fn format_bind_error(
        error: std::io::Error,
        bind_addr: &str,
        port: u16,
    ) -> GatewayError {
        let error_str = error.to_string();

        if error.kind() == ErrorKind::AddrInUse
            || error_str.contains("os error 48")
            || error_str.contains("os error 98")
        {
            GatewayError::internal(format!(
                "Port {} is already in use; stop the other process or set PORT={}",
                port,
                port.saturating_add(1)
            ))
        } else if error.kind() == ErrorKind::PermissionDenied
            || error_str.contains("os error 13")
        {
            GatewayError::internal(format!(
                "Permission denied for port {}; use a port >= 1024",
                port
            ))
        } else {
            GatewayError::internal(format!("Failed to bind to {}: {}", bind_addr, error))
        }
    }
}
