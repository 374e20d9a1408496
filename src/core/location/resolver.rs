//! Profile lookup and query rewriting

use crate::utils::error::{AuthFailure, GatewayError, Result};
use reqwest::Client;
use reqwest::header::AUTHORIZATION;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error};
use url::form_urlencoded;

/// Profile endpoint on the auth service
pub const PROFILE_PATH: &str = "/api/v1/users/profile";

const STATE_PARAM: &str = "stateId";
const MUNICIPALITY_PARAM: &str = "municipalityId";

/// Location assigned to a caller's profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub state_id: String,
    pub municipality_id: String,
}

impl Location {
    /// Set `stateId` and `municipalityId` on `query`, replacing any value the
    /// client sent
    pub fn apply_to_query(&self, query: Option<&str>) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());

        for (key, value) in form_urlencoded::parse(query.unwrap_or_default().as_bytes()) {
            if key != STATE_PARAM && key != MUNICIPALITY_PARAM {
                serializer.append_pair(&key, &value);
            }
        }

        serializer
            .append_pair(STATE_PARAM, &self.state_id)
            .append_pair(MUNICIPALITY_PARAM, &self.municipality_id);
        serializer.finish()
    }

    /// Read the location from a profile response body
    ///
    /// `Ok(None)` means the profile exists but has no location assigned.
    fn from_profile(body: &Value) -> std::result::Result<Option<Self>, String> {
        let user = body
            .get("data")
            .and_then(|data| data.get("user"))
            .filter(|user| user.is_object())
            .ok_or_else(|| "profile response has no data.user object".to_string())?;

        let state_id = user.get(STATE_PARAM).and_then(id_value);
        let municipality_id = user.get(MUNICIPALITY_PARAM).and_then(id_value);

        Ok(match (state_id, municipality_id) {
            (Some(state_id), Some(municipality_id)) => Some(Self {
                state_id,
                municipality_id,
            }),
            _ => None,
        })
    }
}

/// Null, empty, zero and `false` all count as unassigned
fn id_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    }
}

/// Looks up the caller's location on the auth service
#[derive(Debug, Clone)]
pub struct LocationResolver {
    client: Client,
    profile_url: String,
    timeout: Duration,
}

impl LocationResolver {
    pub fn new(client: Client, auth_base_url: &str, timeout: Duration) -> Self {
        Self {
            client,
            profile_url: format!("{}{}", auth_base_url.trim_end_matches('/'), PROFILE_PATH),
            timeout,
        }
    }

    pub fn profile_url(&self) -> &str {
        &self.profile_url
    }

    /// Fetch the caller's location, forwarding their `Authorization` header
    ///
    /// Failing to complete the profile call is `UpstreamUnavailable`; a
    /// profile without a location is `MissingProfile`.
    pub async fn resolve(&self, authorization: Option<&str>) -> Result<Location> {
        let authorization = authorization
            .ok_or(GatewayError::unauthenticated(AuthFailure::MissingHeader))?;

        let body = self.fetch_profile(authorization).await.map_err(|e| {
            error!(url = %self.profile_url, error = %e, "Location lookup failed");
            GatewayError::upstream_unavailable(e)
        })?;

        match Location::from_profile(&body) {
            Ok(Some(location)) => {
                debug!(
                    state_id = %location.state_id,
                    municipality_id = %location.municipality_id,
                    "Resolved caller location"
                );
                Ok(location)
            }
            Ok(None) => Err(GatewayError::missing_profile(
                "User does not have stateId or municipalityId assigned",
            )),
            Err(e) => {
                error!(url = %self.profile_url, error = %e, "Unexpected profile response");
                Err(GatewayError::upstream_unavailable(e))
            }
        }
    }

    /// Resolve the location and return `query` with it applied
    pub async fn enrich(&self, authorization: Option<&str>, query: Option<&str>) -> Result<String> {
        let location = self.resolve(authorization).await?;
        Ok(location.apply_to_query(query))
    }

    async fn fetch_profile(&self, authorization: &str) -> std::result::Result<Value, String> {
        let response = self
            .client
            .get(&self.profile_url)
            .header(AUTHORIZATION, authorization)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("profile request returned {}", status));
        }

        response.json::<Value>().await.map_err(|e| e.to_string())
    }
}
