//! Per-route composition of the gateway stages
//!
//! Order per request: admission, route lookup, token validation, role
//! check, location enrichment, forward. Token validation and the role check
//! only run when the matched entry asks for them.

use crate::auth::AuthSystem;
use crate::config::Config;
use crate::core::location::LocationResolver;
use crate::core::models::RequestContext;
use crate::core::proxy::{ForwardRequest, ForwardResult, Forwarder};
use crate::core::rate_limiter::{AdmissionLimiter, RateLimitResult};
use crate::core::router::RouteTable;
use crate::utils::error::{GatewayError, Result};
use bytes::Bytes;
use reqwest::Client;
use reqwest::header::{AUTHORIZATION, HeaderMap};
use std::sync::Arc;
use tracing::debug;

/// Everything needed to take a request from admission to the backend
#[derive(Debug, Clone)]
pub struct GatewayPipeline {
    limiter: Arc<AdmissionLimiter>,
    routes: Arc<RouteTable>,
    auth: AuthSystem,
    location: LocationResolver,
    forwarder: Forwarder,
}

impl GatewayPipeline {
    /// Build every stage from configuration, sharing one HTTP client
    pub fn new(config: &Config, client: Client) -> Result<Self> {
        let expose_details = config.server().dev_mode;
        Ok(Self {
            limiter: Arc::new(AdmissionLimiter::new(config.rate_limit())),
            routes: Arc::new(RouteTable::from_config(&config.gateway)?),
            auth: AuthSystem::new(config.auth()),
            location: LocationResolver::new(
                client.clone(),
                &config.services().auth,
                config.proxy().timeout(),
            ),
            forwarder: Forwarder::new(client, config.proxy(), expose_details),
        })
    }

    /// Assemble a pipeline from already built stages
    pub fn from_parts(
        limiter: Arc<AdmissionLimiter>,
        routes: RouteTable,
        auth: AuthSystem,
        location: LocationResolver,
        forwarder: Forwarder,
    ) -> Self {
        Self {
            limiter,
            routes: Arc::new(routes),
            auth,
            location,
            forwarder,
        }
    }

    pub fn limiter(&self) -> &Arc<AdmissionLimiter> {
        &self.limiter
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Admission stage; runs before anything else
    pub fn admit(&self, ctx: &RequestContext) -> Result<RateLimitResult> {
        let result = self.check_admission(ctx);
        if result.allowed {
            Ok(result)
        } else {
            Err(self.limiter.rejection(&ctx.client_key))
        }
    }

    /// Admission stage returning the full window state either way
    pub fn check_admission(&self, ctx: &RequestContext) -> RateLimitResult {
        let result = self.limiter.check(&ctx.client_key);
        if !result.allowed {
            debug!(
                request_id = %ctx.request_id,
                client = %ctx.client_key,
                "Rejected by admission limiter"
            );
        }
        result
    }

    /// Every stage after admission
    ///
    /// Gate failures are returned as errors. Once the forwarder is reached
    /// the result is always `Ok`, backend failures included.
    pub async fn dispatch(
        &self,
        mut ctx: RequestContext,
        headers: HeaderMap,
        body: Bytes,
    ) -> Result<ForwardResult> {
        let route = self.routes.resolve(&ctx.path).ok_or_else(|| {
            debug!(request_id = %ctx.request_id, path = %ctx.path, "No route matched");
            GatewayError::route_not_found(ctx.method.as_str(), ctx.path.as_str())
        })?;
        let entry = route.entry;

        let authorization = headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok());

        if !entry.is_public() {
            let claims = self.auth.authenticate(authorization).inspect_err(|e| {
                debug!(request_id = %ctx.request_id, route = %entry.prefix, "{}", e);
            })?;
            ctx.claims = Some(claims);

            if !entry.allowed_roles.is_empty() {
                self.auth
                    .authorize(ctx.claims.as_ref(), &entry.allowed_roles)
                    .inspect_err(|e| {
                        debug!(request_id = %ctx.request_id, route = %entry.prefix, "{}", e);
                    })?;
            }
        }

        if entry.resolve_location {
            let query = self
                .location
                .enrich(authorization, ctx.query.as_deref())
                .await?;
            ctx.query = Some(query);
        }

        debug!(
            request_id = %ctx.request_id,
            subject = ctx.subject().unwrap_or("-"),
            service = %entry.service,
            outbound_path = %route.outbound_path,
            "Route resolved"
        );

        let request = ForwardRequest::new(entry.service.as_str(), ctx.method.clone(), route.target_url())
            .with_query(ctx.query)
            .with_headers(headers)
            .with_body(body);

        Ok(self.forwarder.forward(request).await)
    }

    /// Admission followed by dispatch
    pub async fn process(
        &self,
        ctx: RequestContext,
        headers: HeaderMap,
        body: Bytes,
    ) -> Result<ForwardResult> {
        self.admit(&ctx)?;
        self.dispatch(ctx, headers, body).await
    }
}
