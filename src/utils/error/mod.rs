//! Error handling for the Gateway
//!
//! Every gate reports its own failure as a `GatewayError`; the HTTP layer turns
//! it into the stable `{ success: false, message }` body.

mod helpers;
mod response;
mod types;

pub use response::ErrorResponse;
pub use types::{AuthFailure, GatewayError, Result};
