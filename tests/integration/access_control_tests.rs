//! Access control integration tests
//!
//! Token validation, role gating and location enrichment.

#[cfg(test)]
mod tests {
    use crate::common::assertions::assert_error_body;
    use crate::common::fixtures::{config_for, profile_body};
    use crate::common::TokenFactory;
    use crate::{assert_status, call_json, gateway_app};
    use actix_web::test::TestRequest;
    use jsonwebtoken::Algorithm;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn guarded_backend() -> MockServer {
        let backend = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/kitchens"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "kitchens": [] })))
            .mount(&backend)
            .await;
        backend
    }

    // ==================== Authentication ====================

    #[actix_web::test]
    async fn test_missing_header_rejected() {
        let backend = guarded_backend().await;
        let app = gateway_app!(config_for(&backend.uri()));

        let (status, body) = call_json!(app, TestRequest::get().uri("/api/v1/kitchens").to_request());

        assert_status!(status, body, 401);
        assert_error_body(&body, "Missing Authorization header");
    }

    #[actix_web::test]
    async fn test_missing_bearer_token_rejected() {
        let backend = guarded_backend().await;
        let app = gateway_app!(config_for(&backend.uri()));

        let req = TestRequest::get()
            .uri("/api/v1/kitchens")
            .insert_header(("Authorization", "Basic dXNlcjpwdw=="))
            .to_request();
        let (status, body) = call_json!(app, req);

        assert_status!(status, body, 401);
        assert_error_body(&body, "Missing Bearer token");
    }

    #[actix_web::test]
    async fn test_invalid_tokens_rejected() {
        let backend = guarded_backend().await;
        let app = gateway_app!(config_for(&backend.uri()));

        let tokens = [
            "Bearer not-a-jwt".to_string(),
            TokenFactory::new().secret("some-other-secret").bearer(),
            TokenFactory::new().expired(600).bearer(),
        ];

        for token in tokens {
            let req = TestRequest::get()
                .uri("/api/v1/kitchens")
                .insert_header(("Authorization", token.as_str()))
                .to_request();
            let (status, body) = call_json!(app, req);

            assert_status!(status, body, 401);
            assert_error_body(&body, "Invalid or expired token");
        }
        assert!(backend.received_requests().await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_hs512_token_accepted() {
        let backend = guarded_backend().await;
        let app = gateway_app!(config_for(&backend.uri()));

        let req = TestRequest::get()
            .uri("/api/v1/kitchens")
            .insert_header(("Authorization", TokenFactory::new().algorithm(Algorithm::HS512).bearer()))
            .to_request();
        let (status, body) = call_json!(app, req);

        assert_status!(status, body, 200);
    }

    // ==================== Role Gate ====================

    #[actix_web::test]
    async fn test_inventory_accepts_any_listed_role() {
        let backend = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/inventory"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(2)
            .mount(&backend)
            .await;

        let app = gateway_app!(config_for(&backend.uri()));

        for role in ["Admin_cocina", "Volunteer"] {
            let req = TestRequest::get()
                .uri("/api/v1/inventory")
                .insert_header(("Authorization", TokenFactory::new().roles(&[role]).bearer()))
                .to_request();
            let (status, body) = call_json!(app, req);
            assert_status!(status, body, 200);
        }
    }

    #[actix_web::test]
    async fn test_admin_routes_forbidden_without_role() {
        let backend = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&backend)
            .await;

        let app = gateway_app!(config_for(&backend.uri()));
        let req = TestRequest::get()
            .uri("/api/v1/admin/users")
            .insert_header(("Authorization", TokenFactory::new().roles(&["Admin_cocina"]).bearer()))
            .to_request();
        let (status, body) = call_json!(app, req);

        assert_status!(status, body, 403);
        assert_error_body(&body, "Forbidden: insufficient role permissions");
    }

    #[actix_web::test]
    async fn test_role_check_requires_token_first() {
        let backend = MockServer::start().await;
        let app = gateway_app!(config_for(&backend.uri()));

        let (status, body) = call_json!(app, TestRequest::get().uri("/api/v1/admin").to_request());

        assert_status!(status, body, 401);
    }

    // ==================== Location Enrichment ====================

    #[actix_web::test]
    async fn test_nearby_search_gets_caller_location() {
        let backend = MockServer::start().await;
        let bearer = TokenFactory::new().bearer();
        Mock::given(method("GET"))
            .and(path("/api/v1/users/profile"))
            .and(header("authorization", bearer.as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(profile_body(json!(7), json!("42"))))
            .expect(1)
            .mount(&backend)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/kitchens/nearby"))
            .and(query_param("radius", "5"))
            .and(query_param("stateId", "7"))
            .and(query_param("municipalityId", "42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "kitchens": ["k1"] })))
            .expect(1)
            .mount(&backend)
            .await;

        let app = gateway_app!(config_for(&backend.uri()));
        let req = TestRequest::get()
            .uri("/api/v1/kitchens/nearby?radius=5&stateId=99")
            .insert_header(("Authorization", bearer.as_str()))
            .to_request();
        let (status, body) = call_json!(app, req);

        assert_status!(status, body, 200);
        assert_eq!(body["kitchens"], json!(["k1"]));
    }

    #[actix_web::test]
    async fn test_nearby_search_without_location_never_reaches_kitchens() {
        let backend = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/users/profile"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(profile_body(json!(7), json!(null))),
            )
            .expect(1)
            .mount(&backend)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/kitchens/nearby"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&backend)
            .await;

        let app = gateway_app!(config_for(&backend.uri()));
        let req = TestRequest::get()
            .uri("/api/v1/kitchens/nearby")
            .insert_header(("Authorization", TokenFactory::new().bearer()))
            .to_request();
        let (status, body) = call_json!(app, req);

        assert_status!(status, body, 400);
        assert_error_body(&body, "User does not have stateId or municipalityId assigned");
    }

    #[actix_web::test]
    async fn test_profile_failure_is_internal_error() {
        let backend = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/users/profile"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&backend)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/kitchens/nearby"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&backend)
            .await;

        let app = gateway_app!(config_for(&backend.uri()));
        let req = TestRequest::get()
            .uri("/api/v1/kitchens/nearby")
            .insert_header(("Authorization", TokenFactory::new().bearer()))
            .to_request();
        let (status, body) = call_json!(app, req);

        assert_status!(status, body, 500);
        assert_error_body(&body, "Error resolving user location");
    }
}
