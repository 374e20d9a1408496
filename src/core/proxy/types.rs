//! Forwarding request and result types

use crate::utils::error::GatewayError;
use actix_web::HttpResponse;
use actix_web::http::StatusCode as ActixStatus;
use actix_web::http::header::{HeaderName as ActixName, HeaderValue as ActixValue};
use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};

/// One outbound call, fully resolved
#[derive(Debug, Clone)]
pub struct ForwardRequest {
    /// Service name, for logs and failure bodies
    pub service: String,
    pub method: Method,
    /// Backend base URL plus the rewritten path, no query
    pub url: String,
    /// Raw query string without the leading `?`
    pub query: Option<String>,
    /// Inbound headers, sanitized by the forwarder before sending
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl ForwardRequest {
    pub fn new(service: impl Into<String>, method: Method, url: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            method,
            url: url.into(),
            query: None,
            headers: HeaderMap::new(),
            body: Bytes::new(),
        }
    }

    pub fn with_query(mut self, query: Option<String>) -> Self {
        self.query = query.filter(|q| !q.is_empty());
        self
    }

    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    pub fn with_body(mut self, body: Bytes) -> Self {
        self.body = body;
        self
    }

    /// URL including the query string
    pub fn full_url(&self) -> String {
        match &self.query {
            Some(query) => format!("{}?{}", self.url, query),
            None => self.url.clone(),
        }
    }
}

/// What gets relayed back to the client
#[derive(Debug, Clone)]
pub struct ForwardResult {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
    /// Set when the gateway produced this result instead of the backend
    pub gateway_failure: bool,
}

impl ForwardResult {
    /// Backend response, headers already sanitized
    pub fn relayed(status: StatusCode, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
            gateway_failure: false,
        }
    }

    /// Gateway-generated failure carrying the standard error body
    pub fn from_error(error: &GatewayError, expose_details: bool) -> Self {
        let body = serde_json::to_vec(&error.to_body(expose_details))
            .map(Bytes::from)
            .unwrap_or_else(|_| Bytes::from_static(br#"{"success":false}"#));

        let mut headers = HeaderMap::new();
        headers.insert(
            reqwest::header::CONTENT_TYPE,
            reqwest::header::HeaderValue::from_static("application/json"),
        );

        Self {
            status: StatusCode::from_u16(error.status().as_u16())
                .unwrap_or(StatusCode::SERVICE_UNAVAILABLE),
            headers,
            body,
            gateway_failure: true,
        }
    }

    /// Build the actix response
    pub fn into_response(self) -> HttpResponse {
        let status =
            ActixStatus::from_u16(self.status.as_u16()).unwrap_or(ActixStatus::BAD_GATEWAY);
        let mut builder = HttpResponse::build(status);

        for (name, value) in self.headers.iter() {
            if let (Ok(name), Ok(value)) = (
                ActixName::from_bytes(name.as_str().as_bytes()),
                ActixValue::from_bytes(value.as_bytes()),
            ) {
                builder.append_header((name, value));
            }
        }

        builder.body(self.body)
    }
}
