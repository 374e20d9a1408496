//! Catch-all handler that runs the gateway pipeline

use crate::core::proxy::headers;
use crate::server::middleware::get_request_context;
use crate::server::state::AppState;
use crate::utils::error::{GatewayError, Result};
use actix_web::http::header::CONTENT_LENGTH;
use actix_web::{HttpRequest, HttpResponse, web};
use futures::StreamExt;
use tracing::{debug, error};

/// Route, authorize and forward one request
///
/// Gate failures are rendered here with the configured detail posture; a
/// forwarded request always relays whatever the forwarder produced.
pub async fn proxy_request(
    req: HttpRequest,
    payload: web::Payload,
    state: web::Data<AppState>,
) -> HttpResponse {
    let Some(ctx) = get_request_context(&req) else {
        error!("Request context missing; admission middleware did not run");
        return GatewayError::internal("request context missing")
            .to_response(state.expose_details());
    };

    let body = match read_body(&req, payload, state.config().server().max_body_size).await {
        Ok(body) => body,
        Err(e) => return e.to_response(state.expose_details()),
    };

    let inbound = headers::collect(
        req.headers()
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_bytes())),
    );

    match state.pipeline.dispatch(ctx, inbound, body).await {
        Ok(result) => result.into_response(),
        Err(e) => e.to_response(state.expose_details()),
    }
}

/// Buffer the request body, refusing anything over `limit` bytes
async fn read_body(
    req: &HttpRequest,
    mut payload: web::Payload,
    limit: usize,
) -> Result<web::Bytes> {
    let declared = req
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<usize>().ok());
    if declared.is_some_and(|len| len > limit) {
        debug!("Declared body length {:?} over limit {}", declared, limit);
        return Err(GatewayError::payload_too_large(limit));
    }

    let mut body = web::BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let chunk = chunk
            .map_err(|e| GatewayError::internal(format!("Failed to read request body: {}", e)))?;
        if body.len() + chunk.len() > limit {
            return Err(GatewayError::payload_too_large(limit));
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body.freeze())
}
