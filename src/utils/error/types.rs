//! Error types for the Gateway

use thiserror::Error;

/// Result type alias for the Gateway
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Why a request failed authentication
///
/// Every variant maps to the same HTTP status; the message is what lets a
/// client tell a missing credential apart from a rejected one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    /// No `Authorization` header at all
    MissingHeader,
    /// Header present but no token after the scheme
    MissingToken,
    /// Signature, expiry or structure check failed
    InvalidToken,
    /// A role check ran without validated claims
    MissingClaims,
}

impl AuthFailure {
    /// Client-facing message for this failure
    pub fn message(&self) -> &'static str {
        match self {
            AuthFailure::MissingHeader => "Missing Authorization header",
            AuthFailure::MissingToken => "Missing Bearer token",
            AuthFailure::InvalidToken => "Invalid or expired token",
            AuthFailure::MissingClaims => "User not authenticated",
        }
    }

    /// Whether the caller presented no credential at all
    pub fn is_missing_credential(&self) -> bool {
        matches!(self, AuthFailure::MissingHeader | AuthFailure::MissingToken)
    }
}

impl std::fmt::Display for AuthFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Main error type for the Gateway
#[derive(Error, Debug)]
pub enum GatewayError {
    /// No route table entry matched the inbound path
    #[error("No route for {method} {path}")]
    RouteNotFound { method: String, path: String },

    /// Admission limiter rejected the request
    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),

    /// Missing or invalid bearer credential
    #[error("Authentication error: {0}")]
    Unauthenticated(AuthFailure),

    /// Authenticated caller lacks every required role
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Request body exceeds the configured size limit
    #[error("Request body exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },

    /// Caller profile has no location to enrich the query with
    #[error("Missing profile data: {0}")]
    MissingProfile(String),

    /// Dependent call made before the main backend could not complete
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// The resolved backend could not be reached
    #[error("Service unavailable: {service}: {message}")]
    BackendUnavailable { service: String, message: String },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal server errors
    #[error("Internal server error: {0}")]
    Internal(String),
}
