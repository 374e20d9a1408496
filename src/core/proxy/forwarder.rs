//! Outbound call execution

use super::headers::{sanitize_request_headers, sanitize_response_headers};
use super::types::{ForwardRequest, ForwardResult};
use crate::config::ProxyConfig;
use crate::utils::error::GatewayError;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{error, info};

/// Executes the single outbound attempt for a resolved route
#[derive(Debug, Clone)]
pub struct Forwarder {
    client: Client,
    timeout: Duration,
    expose_details: bool,
}

impl Forwarder {
    pub fn new(client: Client, config: &ProxyConfig, expose_details: bool) -> Self {
        Self::with_timeout(client, config.timeout(), expose_details)
    }

    pub fn with_timeout(client: Client, timeout: Duration, expose_details: bool) -> Self {
        Self {
            client,
            timeout,
            expose_details,
        }
    }

    /// Forward `request` and relay the backend's answer
    ///
    /// Backend 4xx/5xx pass through untouched. Failure to reach the backend,
    /// including timeout and a body cut off mid-read, becomes a 503.
    /// Dropping the returned future abandons the outbound call.
    pub async fn forward(&self, request: ForwardRequest) -> ForwardResult {
        let started = Instant::now();
        let url = request.full_url();
        let service = request.service.clone();
        let method = request.method.clone();

        match self.execute(request, &url).await {
            Ok(result) => {
                info!(
                    service = %service,
                    method = %method,
                    url = %url,
                    status = result.status.as_u16(),
                    latency_ms = started.elapsed().as_millis() as u64,
                    "Forwarded request"
                );
                result
            }
            Err(e) => {
                error!(
                    service = %service,
                    method = %method,
                    url = %url,
                    latency_ms = started.elapsed().as_millis() as u64,
                    error = %e,
                    "Backend unreachable"
                );
                let failure = GatewayError::backend_unavailable(service, describe(&e));
                ForwardResult::from_error(&failure, self.expose_details)
            }
        }
    }

    async fn execute(
        &self,
        request: ForwardRequest,
        url: &str,
    ) -> std::result::Result<ForwardResult, reqwest::Error> {
        let mut outbound = self
            .client
            .request(request.method, url)
            .headers(sanitize_request_headers(&request.headers))
            .timeout(self.timeout);

        if !request.body.is_empty() {
            outbound = outbound.body(request.body);
        }

        let response = outbound.send().await?;
        let status = response.status();
        let headers = sanitize_response_headers(response.headers());
        let body = response.bytes().await?;

        Ok(ForwardResult::relayed(status, headers, body))
    }
}

fn describe(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        "timeout exceeded".to_string()
    } else if error.is_connect() {
        format!("connection failed: {}", error)
    } else {
        error.to_string()
    }
}
