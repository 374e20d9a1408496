//! Forwarding integration tests
//!
//! Relay of status, headers and body in both directions.

#[cfg(test)]
mod tests {
    use crate::common::assertions::assert_error_body;
    use crate::common::fixtures::config_for;
    use crate::common::TokenFactory;
    use crate::{assert_status, call_json, gateway_app};
    use actix_web::test::{TestRequest, call_service};
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Backend error statuses pass through with their bodies
    #[actix_web::test]
    async fn test_backend_error_relayed_verbatim() {
        let backend = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/events/404"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({ "error": "event not found" })),
            )
            .mount(&backend)
            .await;

        let app = gateway_app!(config_for(&backend.uri()));
        let req = TestRequest::get()
            .uri("/api/v1/events/404")
            .insert_header(("Authorization", TokenFactory::new().bearer()))
            .to_request();
        let (status, body) = call_json!(app, req);

        assert_status!(status, body, 404);
        assert_eq!(body, json!({ "error": "event not found" }));
    }

    /// Method, body and caller headers reach the backend
    #[actix_web::test]
    async fn test_request_relayed_to_backend() {
        let backend = MockServer::start().await;
        let bearer = TokenFactory::new().bearer();
        Mock::given(method("PUT"))
            .and(path("/api/v1/payments/55"))
            .and(header("authorization", bearer.as_str()))
            .and(header("x-request-id", "req-abc"))
            .and(header("x-custom", "kept"))
            .and(body_json(json!({ "amount": 120 })))
            .respond_with(ResponseTemplate::new(202).set_body_json(json!({ "queued": true })))
            .expect(1)
            .mount(&backend)
            .await;

        let app = gateway_app!(config_for(&backend.uri()));
        let req = TestRequest::put()
            .uri("/api/v1/payments/55")
            .insert_header(("Authorization", bearer.as_str()))
            .insert_header(("x-request-id", "req-abc"))
            .insert_header(("x-custom", "kept"))
            .set_json(json!({ "amount": 120 }))
            .to_request();
        let (status, body) = call_json!(app, req);

        assert_status!(status, body, 202);
        assert_eq!(body["queued"], true);
    }

    /// The inbound Host header is not forwarded
    #[actix_web::test]
    async fn test_host_header_not_forwarded() {
        let backend = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/auth/status"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&backend)
            .await;

        let app = gateway_app!(config_for(&backend.uri()));
        let req = TestRequest::get()
            .uri("/api/v1/auth/status")
            .insert_header(("host", "gateway.example.org"))
            .to_request();
        let resp = call_service(&app, req).await;
        assert!(resp.status().is_success());

        let received = backend.received_requests().await.unwrap();
        assert_eq!(received.len(), 1);
        let host = received[0]
            .headers
            .get("host")
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();
        assert_ne!(host, "gateway.example.org");
    }

    /// Backend headers are relayed except framing and CORS headers
    #[actix_web::test]
    async fn test_response_header_denylist() {
        let backend = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/auth/me"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("x-backend", "auth")
                    .insert_header("access-control-allow-origin", "https://evil.example")
                    .set_body_json(json!({ "id": 1 })),
            )
            .mount(&backend)
            .await;

        let app = gateway_app!(config_for(&backend.uri()));
        let resp = call_service(&app, TestRequest::get().uri("/api/v1/auth/me").to_request()).await;

        assert_eq!(resp.status().as_u16(), 200);
        assert_eq!(resp.headers().get("x-backend").unwrap(), "auth");
        assert!(resp.headers().get("access-control-allow-origin").is_none());
    }

    /// Framing and CORS headers are dropped; the backend's request id survives
    #[actix_web::test]
    async fn test_backend_request_id_relayed_with_denylist_applied() {
        let backend = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/auth/me"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("x-request-id", "backend-1")
                    .insert_header("access-control-allow-origin", "*")
                    .set_body_json(json!({ "id": 1 })),
            )
            .mount(&backend)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/auth/stream"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("x-request-id", "backend-2")
                    .insert_header("transfer-encoding", "chunked")
                    .set_body_string("chunked body"),
            )
            .mount(&backend)
            .await;

        let app = gateway_app!(config_for(&backend.uri()));

        let resp = call_service(&app, TestRequest::get().uri("/api/v1/auth/me").to_request()).await;
        assert_eq!(resp.status().as_u16(), 200);
        assert_eq!(resp.headers().get("x-request-id").unwrap(), "backend-1");
        assert!(resp.headers().get("content-length").is_none());
        assert!(resp.headers().get("access-control-allow-origin").is_none());

        let req = TestRequest::get()
            .uri("/api/v1/auth/stream")
            .insert_header(("x-request-id", "client-9"))
            .to_request();
        let resp = call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 200);
        assert_eq!(resp.headers().get("x-request-id").unwrap(), "backend-2");
        assert!(resp.headers().get("transfer-encoding").is_none());
        assert!(resp.headers().get("content-length").is_none());
    }

    /// An unreachable backend becomes a 503 naming the service
    #[actix_web::test]
    async fn test_unreachable_backend_is_service_unavailable() {
        let backend = MockServer::start().await;
        let mut config = config_for(&backend.uri());
        config.gateway.services.notifications = "http://127.0.0.1:1".to_string();

        let app = gateway_app!(config);
        let req = TestRequest::get()
            .uri("/api/v1/notifications")
            .insert_header(("Authorization", TokenFactory::new().bearer()))
            .to_request();
        let (status, body) = call_json!(app, req);

        assert_status!(status, body, 503);
        assert_error_body(&body, "Service unavailable");
        assert_eq!(body["service"], "notifications");
        assert!(body.get("error").is_none());
    }

    /// Development mode adds the transport detail
    #[actix_web::test]
    async fn test_timeout_detail_in_development() {
        let backend = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/inventory/items"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
            .mount(&backend)
            .await;

        let mut config = config_for(&backend.uri());
        config.gateway.server.dev_mode = true;
        config.gateway.proxy.timeout_secs = 1;

        let app = gateway_app!(config);
        let req = TestRequest::get()
            .uri("/api/v1/inventory/items")
            .insert_header(("Authorization", TokenFactory::new().roles(&["Volunteer"]).bearer()))
            .to_request();
        let (status, body) = call_json!(app, req);

        assert_status!(status, body, 503);
        assert_eq!(body["service"], "inventory");
        assert_eq!(body["error"], "timeout exceeded");
    }
}
