//! Header hygiene for both hops

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

/// Framing headers computed for the inbound hop
pub const REQUEST_DENYLIST: [&str; 3] = ["host", "content-length", "transfer-encoding"];

/// Backend framing plus the CORS header the gateway owns
pub const RESPONSE_DENYLIST: [&str; 3] = [
    "content-length",
    "transfer-encoding",
    "access-control-allow-origin",
];

/// Collect raw `(name, value)` pairs into a header map
///
/// Pairs that are not valid header syntax are skipped.
pub fn collect<'a, I>(pairs: I) -> HeaderMap
where
    I: IntoIterator<Item = (&'a str, &'a [u8])>,
{
    let mut headers = HeaderMap::new();
    for (name, value) in pairs {
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_bytes(value),
        ) {
            headers.append(name, value);
        }
    }
    headers
}

/// Copy of `headers` with the request denylist removed
pub fn sanitize_request_headers(headers: &HeaderMap) -> HeaderMap {
    without(headers, &REQUEST_DENYLIST)
}

/// Copy of `headers` with the response denylist removed
pub fn sanitize_response_headers(headers: &HeaderMap) -> HeaderMap {
    without(headers, &RESPONSE_DENYLIST)
}

fn without(headers: &HeaderMap, denylist: &[&str]) -> HeaderMap {
    let mut sanitized = headers.clone();
    for name in denylist {
        sanitized.remove(*name);
    }
    sanitized
}
