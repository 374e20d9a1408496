//! Authentication and authorization
//!
//! Token validation and role gating for routes that require them. Both steps
//! are stateless; the route table decides whether they run.

pub mod jwt;
pub mod rbac;
pub mod types;

pub use jwt::JwtValidator;
pub use rbac::RoleGate;
pub use types::Claims;

use crate::config::AuthConfig;
use crate::utils::error::Result;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Token validator and role gate used together by the pipeline
#[derive(Debug, Clone)]
pub struct AuthSystem {
    jwt: Arc<JwtValidator>,
    gate: RoleGate,
}

impl AuthSystem {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            jwt: Arc::new(JwtValidator::new(config)),
            gate: RoleGate,
        }
    }

    /// Validate the raw `Authorization` header value
    pub fn authenticate(&self, authorization: Option<&str>) -> Result<Claims> {
        self.jwt.validate(authorization)
    }

    /// Check that `claims` carries at least one of `required`
    pub fn authorize(&self, claims: Option<&Claims>, required: &BTreeSet<String>) -> Result<()> {
        self.gate.authorize(claims, required)
    }
}
