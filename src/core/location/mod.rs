//! Caller location enrichment
//!
//! Routes flagged with `resolve_location` need the caller's state and
//! municipality as query parameters. They come from the auth service's
//! profile endpoint, called before the route's own backend is contacted.

mod resolver;


pub use resolver::{Location, LocationResolver, PROFILE_PATH};
