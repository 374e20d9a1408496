//! Routing integration tests
//!
//! Route table order, path rewriting, not-found handling and health.

#[cfg(test)]
mod tests {
    use crate::common::assertions::assert_error_body;
    use crate::common::fixtures::config_for;
    use crate::common::TokenFactory;
    use crate::{assert_status, call_json, gateway_app};
    use actix_web::test::TestRequest;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Unknown prefixes answer 404 with the path and method echoed back
    #[actix_web::test]
    async fn test_unmatched_path_not_found() {
        let backend = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&backend)
            .await;

        let app = gateway_app!(config_for(&backend.uri()));
        let (status, body) = call_json!(app, TestRequest::delete().uri("/api/v1/unknown/7").to_request());

        assert_status!(status, body, 404);
        assert_error_body(&body, "Endpoint not found");
        assert_eq!(body["path"], "/api/v1/unknown/7");
        assert_eq!(body["method"], "DELETE");
    }

    /// The states prefix is rewritten to the legacy backend path
    #[actix_web::test]
    async fn test_states_prefix_substituted() {
        let backend = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/states/9/municipalities"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
            .expect(1)
            .mount(&backend)
            .await;

        let app = gateway_app!(config_for(&backend.uri()));
        let req = TestRequest::get()
            .uri("/api/v1/states/9/municipalities?page=2")
            .to_request();
        let (status, body) = call_json!(app, req);

        assert_status!(status, body, 200);
        assert_eq!(body["ok"], true);
    }

    /// Auth routes are public and keep their path
    #[actix_web::test]
    async fn test_auth_login_forwarded_unchanged() {
        let backend = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "t" })))
            .expect(1)
            .mount(&backend)
            .await;

        let app = gateway_app!(config_for(&backend.uri()));
        let req = TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({ "email": "a@b.c", "password": "pw" }))
            .to_request();
        let (status, body) = call_json!(app, req);

        assert_status!(status, body, 200);
        assert_eq!(body["token"], "t");
    }

    /// The chef prefix is removed before forwarding
    #[actix_web::test]
    async fn test_chef_prefix_stripped() {
        let backend = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/menus/today"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&backend)
            .await;

        let app = gateway_app!(config_for(&backend.uri()));
        let req = TestRequest::get()
            .uri("/api/v1/chef/menus/today")
            .insert_header(("Authorization", TokenFactory::new().roles(&["Admin_cocina"]).bearer()))
            .to_request();
        let (status, body) = call_json!(app, req);

        assert_status!(status, body, 200);
    }

    /// `/api/v1/kitchens/nearby` wins over the broader kitchens entry
    #[actix_web::test]
    async fn test_specific_entry_precedes_broader_prefix() {
        let backend = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/users/profile"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                crate::common::fixtures::profile_body(json!(3), json!(41)),
            ))
            .expect(1)
            .mount(&backend)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/kitchens/nearby"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "kitchens": [] })))
            .expect(1)
            .mount(&backend)
            .await;

        let app = gateway_app!(config_for(&backend.uri()));
        let req = TestRequest::get()
            .uri("/api/v1/kitchens/nearby")
            .insert_header(("Authorization", TokenFactory::new().bearer()))
            .to_request();
        let (status, body) = call_json!(app, req);

        assert_status!(status, body, 200);
    }

    /// Health never contacts a backend
    #[actix_web::test]
    async fn test_health_is_local() {
        let backend = MockServer::start().await;
        let app = gateway_app!(config_for(&backend.uri()));

        let (status, body) = call_json!(app, TestRequest::get().uri("/health").to_request());

        assert_status!(status, body, 200);
        assert_eq!(body["success"], true);
        assert_eq!(body["service"], "API Gateway");
        assert_eq!(body["services"]["states"], backend.uri());
        assert!(body["timestamp"].is_string());
        assert!(backend.received_requests().await.unwrap_or_default().is_empty());
    }
}
