//! At-least-one-of role check

use crate::auth::types::Claims;
use crate::utils::error::{AuthFailure, GatewayError, Result};
use std::collections::BTreeSet;
use tracing::{debug, error};

/// Allows a caller holding any one of the required roles
#[derive(Debug, Clone, Copy, Default)]
pub struct RoleGate;

impl RoleGate {
    /// Authorize validated claims against a non-empty required set
    ///
    /// Absent claims mean the token validator did not run first; that is a
    /// wiring fault and is reported as unauthenticated, never allowed.
    pub fn authorize(&self, claims: Option<&Claims>, required: &BTreeSet<String>) -> Result<()> {
        let Some(claims) = claims else {
            error!("Role check reached without validated claims");
            return Err(GatewayError::unauthenticated(AuthFailure::MissingClaims));
        };

        if required.is_empty() || claims.has_any_role(required) {
            return Ok(());
        }

        debug!(
            "Subject {} lacks required roles {:?} (has {:?})",
            claims.subject, required, claims.roles
        );
        Err(GatewayError::forbidden(format!(
            "requires one of {}",
            required.iter().cloned().collect::<Vec<_>>().join(", ")
        )))
    }
}
