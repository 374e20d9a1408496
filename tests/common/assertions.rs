//! Custom test assertions
//!
//! Error bodies share one shape, so most tests only check status and message.

use serde_json::Value;

/// Assert a gateway error body with the given message
pub fn assert_error_body(body: &Value, message: &str) {
    assert_eq!(
        body["success"],
        Value::Bool(false),
        "Expected success=false in error body, got {}",
        body
    );
    assert_eq!(
        body["message"].as_str(),
        Some(message),
        "Unexpected error message in {}",
        body
    );
}

/// Call the app and return status and JSON body
#[macro_export]
macro_rules! call_json {
    ($app:expr, $req:expr) => {{
        let resp = actix_web::test::call_service(&$app, $req).await;
        let status = resp.status();
        let body: serde_json::Value = actix_web::test::read_body_json(resp).await;
        (status, body)
    }};
}

/// Assert a response status with the body in the failure message
#[macro_export]
macro_rules! assert_status {
    ($status:expr, $body:expr, $expected:expr) => {
        assert_eq!(
            $status.as_u16(),
            $expected,
            "unexpected status {} with body {}",
            $status,
            $body
        );
    };
}
