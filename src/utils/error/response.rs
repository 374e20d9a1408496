//! HTTP response handling for errors

use super::types::GatewayError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use serde_json::{Map, Value};

/// Standard error body: `{ success: false, message, ...extra }`
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ErrorResponse {
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            success: false,
            message: message.into(),
            extra: Map::new(),
        }
    }

    /// Attach an extra top-level field
    pub fn with<K: Into<String>, V: Into<Value>>(mut self, key: K, value: V) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

impl GatewayError {
    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::RouteNotFound { .. } => StatusCode::NOT_FOUND,
            GatewayError::RateLimit(_) => StatusCode::TOO_MANY_REQUESTS,
            GatewayError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            GatewayError::Forbidden(_) => StatusCode::FORBIDDEN,
            GatewayError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            GatewayError::MissingProfile(_) => StatusCode::BAD_REQUEST,
            GatewayError::UpstreamUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
            GatewayError::BackendUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Build the client-facing body
    ///
    /// `expose_details` adds the underlying cause as `error` on 5xx bodies;
    /// it is only set in development mode.
    pub fn to_body(&self, expose_details: bool) -> ErrorResponse {
        match self {
            GatewayError::RouteNotFound { method, path } => {
                ErrorResponse::new("Endpoint not found")
                    .with("path", path.as_str())
                    .with("method", method.as_str())
            }
            GatewayError::RateLimit(_) => {
                ErrorResponse::new("Too many requests, please try again later")
            }
            GatewayError::Unauthenticated(failure) => ErrorResponse::new(failure.message()),
            GatewayError::Forbidden(_) => {
                ErrorResponse::new("Forbidden: insufficient role permissions")
            }
            GatewayError::PayloadTooLarge { limit } => {
                ErrorResponse::new("Request body too large").with("limit", *limit)
            }
            GatewayError::MissingProfile(message) => ErrorResponse::new(message.as_str()),
            GatewayError::UpstreamUnavailable(cause) => {
                with_detail(ErrorResponse::new("Error resolving user location"), cause, expose_details)
            }
            GatewayError::BackendUnavailable { service, message } => with_detail(
                ErrorResponse::new("Service unavailable").with("service", service.as_str()),
                message,
                expose_details,
            ),
            other => with_detail(
                ErrorResponse::new("Internal server error"),
                &other.to_string(),
                expose_details,
            ),
        }
    }

    /// Render as an HTTP response
    pub fn to_response(&self, expose_details: bool) -> HttpResponse {
        HttpResponse::build(self.status()).json(self.to_body(expose_details))
    }
}

fn with_detail(body: ErrorResponse, detail: &str, expose_details: bool) -> ErrorResponse {
    if expose_details {
        body.with("error", detail)
    } else {
        body
    }
}

impl ResponseError for GatewayError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        self.to_response(false)
    }
}
