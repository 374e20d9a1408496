//! Route table construction and resolution

use super::rewrite::PathRewrite;
use crate::config::{GatewayConfig, RouteConfig, ServicesConfig};
use crate::utils::error::{GatewayError, Result};
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// One immutable entry of the route table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    pub prefix: String,
    /// Service name, used in logs and 503 bodies
    pub service: String,
    /// Backend base URL without a trailing slash
    pub target_base_url: String,
    pub rewrite: PathRewrite,
    pub requires_auth: bool,
    /// Empty means any authenticated caller
    pub allowed_roles: BTreeSet<String>,
    /// Enrich the query with the caller's location first
    pub resolve_location: bool,
}

impl RouteEntry {
    /// Public, identity-rewrite entry
    pub fn new(
        prefix: impl Into<String>,
        service: impl Into<String>,
        target_base_url: impl Into<String>,
    ) -> Self {
        Self {
            prefix: prefix.into(),
            service: service.into(),
            target_base_url: target_base_url.into().trim_end_matches('/').to_string(),
            rewrite: PathRewrite::Identity,
            requires_auth: false,
            allowed_roles: BTreeSet::new(),
            resolve_location: false,
        }
    }

    pub fn with_rewrite(mut self, rewrite: PathRewrite) -> Self {
        self.rewrite = rewrite;
        self
    }

    pub fn with_auth(mut self) -> Self {
        self.requires_auth = true;
        self
    }

    /// Restrict to callers holding any of `roles`; implies authentication
    pub fn with_roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_roles = roles.into_iter().map(Into::into).collect();
        self.requires_auth |= !self.allowed_roles.is_empty();
        self
    }

    pub fn with_location(mut self) -> Self {
        self.resolve_location = true;
        self.requires_auth = true;
        self
    }

    /// Build an entry from configuration
    pub fn from_config(route: &RouteConfig, services: &ServicesConfig) -> Result<Self> {
        let base_url = services.url_for(&route.service).ok_or_else(|| {
            GatewayError::config(format!(
                "Route '{}' targets unknown service '{}'",
                route.prefix, route.service
            ))
        })?;

        let mut entry = Self::new(&route.prefix, &route.service, base_url)
            .with_rewrite(PathRewrite::from(&route.rewrite))
            .with_roles(route.roles.iter().cloned());
        entry.requires_auth |= route.requires_auth();
        entry.resolve_location = route.resolve_location;
        Ok(entry)
    }

    /// No token check and no role check
    pub fn is_public(&self) -> bool {
        !self.requires_auth && self.allowed_roles.is_empty()
    }

    pub fn matches(&self, path: &str) -> bool {
        path.starts_with(&self.prefix)
    }

    /// Absolute outbound URL for an already rewritten path
    pub fn target_url(&self, outbound_path: &str) -> String {
        format!("{}{}", self.target_base_url, outbound_path)
    }
}

/// Result of a successful lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoute<'a> {
    pub entry: &'a RouteEntry,
    pub outbound_path: String,
}

impl ResolvedRoute<'_> {
    pub fn target_url(&self) -> String {
        self.entry.target_url(&self.outbound_path)
    }
}

/// Ordered, read-only route table
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    /// Build a table, keeping `entries` in the given order
    pub fn new(entries: Vec<RouteEntry>) -> Self {
        let table = Self { entries };
        for (earlier, later) in table.shadowed() {
            warn!(
                "Route '{}' is shadowed by earlier route '{}' and can never match",
                later.prefix, earlier.prefix
            );
        }
        table
    }

    /// Build the table from the configured routes and services
    pub fn from_config(config: &GatewayConfig) -> Result<Self> {
        let entries = config
            .routes
            .iter()
            .map(|route| RouteEntry::from_config(route, &config.services))
            .collect::<Result<Vec<_>>>()?;
        debug!("Route table built with {} entries", entries.len());
        Ok(Self::new(entries))
    }

    /// Find the first entry whose prefix starts `path` and rewrite the path
    ///
    /// `path` must not include the query string.
    pub fn resolve(&self, path: &str) -> Option<ResolvedRoute<'_>> {
        self.entries
            .iter()
            .find(|entry| entry.matches(path))
            .map(|entry| ResolvedRoute {
                outbound_path: entry.rewrite.apply(path, &entry.prefix),
                entry,
            })
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(earlier, later)` pairs where `later` can never be selected
    pub fn shadowed(&self) -> Vec<(&RouteEntry, &RouteEntry)> {
        let mut pairs = Vec::new();
        for (i, later) in self.entries.iter().enumerate() {
            if let Some(earlier) = self.entries[..i]
                .iter()
                .find(|earlier| later.prefix.starts_with(&earlier.prefix))
            {
                pairs.push((earlier, later));
            }
        }
        pairs
    }
}
