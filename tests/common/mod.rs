//! Common test utilities for kitchen-gateway
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::common::{fixtures, TokenFactory};
//!
//! #[actix_web::test]
//! async fn my_test() {
//!     let backend = wiremock::MockServer::start().await;
//!     let app = gateway_app!(fixtures::config_for(&backend.uri()));
//!     let token = TokenFactory::new().roles(&["Volunteer"]).sign();
//!     // ...
//! }
//! ```

pub mod assertions;
pub mod fixtures;

pub use fixtures::{TEST_SECRET, TokenFactory};

/// Build the full gateway app for `actix_web::test` from a `Config`
#[macro_export]
macro_rules! gateway_app {
    ($config:expr) => {
        actix_web::test::init_service(kitchen_gateway::server::HttpServer::create_app(
            actix_web::web::Data::new(
                kitchen_gateway::server::AppState::new($config)
                    .expect("test configuration should build an app state"),
            ),
        ))
        .await
    };
}
