//! Helper functions for creating specific error types

use super::types::{AuthFailure, GatewayError};

/// Helper functions for creating specific errors
impl GatewayError {
    pub fn route_not_found<M: Into<String>, P: Into<String>>(method: M, path: P) -> Self {
        Self::RouteNotFound {
            method: method.into(),
            path: path.into(),
        }
    }

    pub fn rate_limit<S: Into<String>>(message: S) -> Self {
        Self::RateLimit(message.into())
    }

    pub fn unauthenticated(failure: AuthFailure) -> Self {
        Self::Unauthenticated(failure)
    }

    pub fn forbidden<S: Into<String>>(message: S) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn payload_too_large(limit: usize) -> Self {
        Self::PayloadTooLarge { limit }
    }

    pub fn missing_profile<S: Into<String>>(message: S) -> Self {
        Self::MissingProfile(message.into())
    }

    pub fn upstream_unavailable<S: Into<String>>(message: S) -> Self {
        Self::UpstreamUnavailable(message.into())
    }

    pub fn backend_unavailable<S: Into<String>, M: Into<String>>(service: S, message: M) -> Self {
        Self::BackendUnavailable {
            service: service.into(),
            message: message.into(),
        }
    }

    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }
}
