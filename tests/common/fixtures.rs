//! Test fixtures and data factories

use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use kitchen_gateway::config::{Config, ServicesConfig};
use serde_json::{Map, Value, json};

/// Secret shared by test configs and the token factory
pub const TEST_SECRET: &str = "integration-test-secret-0123456789";

/// Default config with every backend at `base_url`
pub fn config_for(base_url: &str) -> Config {
    let mut config = Config::default();
    config.gateway.auth.jwt_secret = TEST_SECRET.to_string();
    config.gateway.server.cors.enabled = false;
    for name in ServicesConfig::NAMES {
        if let Some(url) = config.gateway.services.url_for_mut(name) {
            *url = base_url.to_string();
        }
    }
    config
}

/// Same as [`config_for`] with a tighter admission limit
pub fn config_with_limit(base_url: &str, max_requests: u32) -> Config {
    let mut config = config_for(base_url);
    config.gateway.rate_limit.max_requests = max_requests;
    config
}

/// Builds signed bearer tokens
#[derive(Debug, Clone)]
pub struct TokenFactory {
    claims: Map<String, Value>,
    secret: String,
    algorithm: Algorithm,
}

impl Default for TokenFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenFactory {
    /// Subject `user-1`, no roles, valid for an hour
    pub fn new() -> Self {
        let mut claims = Map::new();
        claims.insert("sub".to_string(), json!("user-1"));
        claims.insert(
            "exp".to_string(),
            json!(chrono::Utc::now().timestamp() + 3600),
        );
        Self {
            claims,
            secret: TEST_SECRET.to_string(),
            algorithm: Algorithm::HS256,
        }
    }

    pub fn subject(mut self, subject: &str) -> Self {
        self.claims.insert("sub".to_string(), json!(subject));
        self
    }

    pub fn roles(mut self, roles: &[&str]) -> Self {
        self.claims.insert("roles".to_string(), json!(roles));
        self
    }

    /// Expiry `secs_ago` seconds in the past
    pub fn expired(mut self, secs_ago: i64) -> Self {
        self.claims.insert(
            "exp".to_string(),
            json!(chrono::Utc::now().timestamp() - secs_ago),
        );
        self
    }

    pub fn secret(mut self, secret: &str) -> Self {
        self.secret = secret.to_string();
        self
    }

    pub fn algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn sign(&self) -> String {
        encode(
            &Header::new(self.algorithm),
            &self.claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .expect("token should encode")
    }

    /// `Authorization` header value
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.sign())
    }
}

/// Profile body the auth service returns
pub fn profile_body(state_id: Value, municipality_id: Value) -> Value {
    json!({
        "success": true,
        "data": {
            "user": {
                "id": "user-1",
                "stateId": state_id,
                "municipalityId": municipality_id
            }
        }
    })
}
