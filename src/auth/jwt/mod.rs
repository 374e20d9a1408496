//! Bearer token validation

mod validator;


pub use validator::{JwtValidator, extract_bearer};
