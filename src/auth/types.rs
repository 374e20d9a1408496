//! Authentication and authorization types

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Identity decoded from a verified bearer token
///
/// Lives for one request only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Claims {
    /// Caller identity (`sub`, falling back to `id` or `userId`)
    pub subject: String,
    /// Role names granted to the caller
    pub roles: BTreeSet<String>,
    /// Every decoded claim, untouched
    pub raw: Map<String, Value>,
}

impl Claims {
    /// Build claims from a decoded token payload
    ///
    /// Roles are read from a `roles` array; a single `role` string is accepted
    /// as well. Non-string entries are ignored.
    pub fn from_payload(raw: Map<String, Value>) -> Self {
        let subject = ["sub", "id", "userId"]
            .iter()
            .find_map(|key| raw.get(*key).and_then(claim_as_string))
            .unwrap_or_default();

        let mut roles: BTreeSet<String> = raw
            .get("roles")
            .and_then(Value::as_array)
            .map(|values| {
                values
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        if let Some(role) = raw.get("role").and_then(Value::as_str) {
            roles.insert(role.to_string());
        }

        Self {
            subject,
            roles,
            raw,
        }
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }

    /// Whether any of `required` is granted
    pub fn has_any_role(&self, required: &BTreeSet<String>) -> bool {
        !self.roles.is_disjoint(required)
    }
}

fn claim_as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
