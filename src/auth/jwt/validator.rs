//! HMAC-signed JWT verification

use crate::auth::types::Claims;
use crate::config::AuthConfig;
use crate::utils::error::{AuthFailure, GatewayError, Result};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde_json::{Map, Value};
use std::collections::HashSet;
use tracing::debug;

/// Verifies bearer tokens against the shared secret
#[derive(Clone)]
pub struct JwtValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtValidator")
            .field("algorithms", &self.validation.algorithms)
            .field("leeway", &self.validation.leeway)
            .finish()
    }
}

impl JwtValidator {
    /// Create a validator for tokens signed with `config.jwt_secret`
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        // `exp` is enforced when present but tokens without it are accepted
        validation.required_spec_claims = HashSet::new();
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.validate_aud = false;
        validation.leeway = config.leeway_secs;

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Validate a raw `Authorization` header value
    ///
    /// A missing header or token fails before any signature work is done.
    pub fn validate(&self, authorization: Option<&str>) -> Result<Claims> {
        let token = extract_bearer(authorization)?;
        self.verify_token(token)
    }

    /// Verify signature and expiry of a bare token
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let data = decode::<Map<String, Value>>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                debug!("JWT verification failed: {}", e);
                GatewayError::unauthenticated(AuthFailure::InvalidToken)
            })?;

        let claims = Claims::from_payload(data.claims);
        debug!("Token verified for subject: {}", claims.subject);
        Ok(claims)
    }
}

/// Pull the token out of a `Bearer <token>` header value
pub fn extract_bearer(authorization: Option<&str>) -> Result<&str> {
    let header = authorization
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or(GatewayError::unauthenticated(AuthFailure::MissingHeader))?;

    let mut parts = header.splitn(2, char::is_whitespace);
    let scheme = parts.next().unwrap_or_default();
    let token = parts.next().map(str::trim).unwrap_or_default();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return Err(GatewayError::unauthenticated(AuthFailure::MissingToken));
    }

    Ok(token)
}
