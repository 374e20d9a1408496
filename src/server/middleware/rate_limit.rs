//! Admission control middleware

use super::helpers::{client_key, request_id};
use crate::core::RequestContext;
use crate::core::rate_limiter::RateLimitResult;
use crate::server::state::AppState;
use crate::utils::error::GatewayError;
use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::http::header::{HeaderMap, HeaderName, HeaderValue, RETRY_AFTER};
use actix_web::{HttpMessage, web};
use futures::future::{Ready, ready};
use std::future::Future;
use std::pin::Pin;
use tracing::{error, warn};

/// Admits or rejects each request before any routing happens
///
/// Builds the [`RequestContext`] for the request and stores it in the
/// request extensions for the gateway handler.
pub struct RateLimitMiddleware;

impl<S, B> Transform<S, ServiceRequest> for RateLimitMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = RateLimitMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddlewareService { service }))
    }
}

/// Service implementation for rate limit middleware
pub struct RateLimitMiddlewareService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let Some(state) = req.app_data::<web::Data<AppState>>().cloned() else {
            error!("Application state missing; admission check cannot run");
            let response = GatewayError::internal("application state missing").to_response(false);
            return Box::pin(async move { Ok(req.into_response(response).map_into_right_body()) });
        };

        let ctx = match build_context(&req, &state) {
            Ok(ctx) => ctx,
            Err(e) => {
                let response = e.to_response(state.expose_details());
                return Box::pin(async move { Ok(req.into_response(response).map_into_right_body()) });
            }
        };

        let result = state.pipeline.check_admission(&ctx);

        if !result.allowed {
            warn!(client = %ctx.client_key, path = %ctx.path, "Too many requests");
            let error = state.pipeline.limiter().rejection(&ctx.client_key);
            let mut response = error.to_response(state.expose_details());
            insert_limit_headers(response.headers_mut(), &result);
            return Box::pin(async move { Ok(req.into_response(response).map_into_right_body()) });
        }

        req.extensions_mut().insert(ctx);
        let fut = self.service.call(req);
        Box::pin(async move {
            let mut res = fut.await?;
            if state.pipeline.limiter().is_enabled() {
                insert_limit_headers(res.headers_mut(), &result);
            }
            Ok(res.map_into_left_body())
        })
    }
}

fn build_context(req: &ServiceRequest, state: &AppState) -> Result<RequestContext, GatewayError> {
    let method = reqwest::Method::from_bytes(req.method().as_str().as_bytes())
        .map_err(|e| GatewayError::internal(format!("Unsupported method: {}", e)))?;

    let mut ctx = RequestContext::new(method, req.path())
        .with_query(Some(req.query_string()))
        .with_client_key(client_key(req, state.config.server().trust_proxy_headers));
    if let Some(id) = request_id(req.headers()) {
        ctx = ctx.with_request_id(id);
    }
    Ok(ctx)
}

fn insert_limit_headers(headers: &mut HeaderMap, result: &RateLimitResult) {
    headers.insert(
        HeaderName::from_static("x-ratelimit-limit"),
        HeaderValue::from(result.limit),
    );
    headers.insert(
        HeaderName::from_static("x-ratelimit-remaining"),
        HeaderValue::from(result.remaining),
    );
    if let Some(secs) = result.retry_after_secs {
        headers.insert(RETRY_AFTER, HeaderValue::from(secs));
    }
}
