//! Request-scoped data threaded through the pipeline

use crate::auth::Claims;
use reqwest::Method;
use uuid::Uuid;

/// Per-request context
///
/// Built once per inbound request and passed by value through admission,
/// authentication, role check, location enrichment, routing and forwarding.
/// Never shared between requests.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Request ID
    pub request_id: String,
    /// Key the admission limiter counts against
    pub client_key: String,
    pub method: Method,
    /// Path component only
    pub path: String,
    /// Raw query string without the leading `?`
    pub query: Option<String>,
    /// Set once the token validator has run
    pub claims: Option<Claims>,
    /// Request timestamp
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl RequestContext {
    /// Create a context for `method path?query`
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
            client_key: "unknown".to_string(),
            method,
            path: path.into(),
            query: None,
            claims: None,
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = request_id.into();
        self
    }

    pub fn with_client_key(mut self, client_key: impl Into<String>) -> Self {
        self.client_key = client_key.into();
        self
    }

    pub fn with_query(mut self, query: Option<&str>) -> Self {
        self.query = query.filter(|q| !q.is_empty()).map(str::to_string);
        self
    }

    /// Subject of the validated token, if any
    pub fn subject(&self) -> Option<&str> {
        self.claims.as_ref().map(|claims| claims.subject.as_str())
    }
}
