//! Header rewrite rules for both directions of the relay.
//!
//! # Responsibilities
//! - Promote `X-Cookie` to `Cookie` on the way out
//! - Substitute a browser `User-Agent` when the caller sends none
//! - Strip unsafe and hop-by-hop headers from terminal responses
//! - Inject the fixed CORS header set
//! - Rename `Set-Cookie` to `X-Set-Cookie` on the way back
//!
//! # Design Decisions
//! - Header name matching is case-insensitive (`HeaderMap` normalizes)
//! - Every `Set-Cookie` value is preserved, in upstream order
//! - CORS values overwrite whatever the upstream supplied

use axum::http::{header, HeaderMap, HeaderName, HeaderValue};

/// Request header tunneling cookie data past environments that strip `Cookie`.
pub const X_COOKIE: &str = "x-cookie";

/// Response header mirroring upstream `Set-Cookie` values back to the caller.
pub const X_SET_COOKIE: &str = "x-set-cookie";

/// Response headers never forwarded to the caller: either stale for the
/// relay's origin or scoped to the upstream's security policy. Both spellings
/// of the referrer policy header are listed; some upstreams send the
/// misspelled one.
const UNSAFE_RESPONSE_HEADERS: [&str; 7] = [
    "host",
    "content-length",
    "content-security-policy",
    "referrer-policy",
    "referer-policy",
    "expect-ct",
    "x-frame-options",
];

/// Connection-scoped request headers; the transport recomputes these for the
/// new destination on every hop.
const CONNECTION_REQUEST_HEADERS: [&str; 4] =
    ["host", "content-length", "connection", "transfer-encoding"];

/// Hop-by-hop response headers; the relay's own transport re-derives them.
const HOP_BY_HOP_RESPONSE_HEADERS: [&str; 6] =
    ["connection", "transfer-encoding", "keep-alive", "te", "trailer", "upgrade"];

/// The fixed CORS header set, injected on every preflight and terminal
/// response.
pub fn cors_headers() -> [(HeaderName, HeaderValue); 5] {
    [
        (
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ),
        (
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET, HEAD, POST, PUT, DELETE, OPTIONS"),
        ),
        (
            header::ACCESS_CONTROL_EXPOSE_HEADERS,
            HeaderValue::from_static("*"),
        ),
        (
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("*"),
        ),
        (
            header::ACCESS_CONTROL_MAX_AGE,
            HeaderValue::from_static("86400"),
        ),
    ]
}

/// Build the outbound header set from the inbound one. Applied once per
/// request; the result is reused unchanged on every redirect hop.
pub fn rewrite_request_headers(
    inbound: &HeaderMap,
    default_user_agent: &HeaderValue,
) -> HeaderMap {
    let mut headers = inbound.clone();

    if let Some(cookie) = headers.remove(X_COOKIE) {
        headers.insert(header::COOKIE, cookie);
    }

    for name in CONNECTION_REQUEST_HEADERS {
        headers.remove(name);
    }

    if !headers.contains_key(header::USER_AGENT) {
        headers.insert(header::USER_AGENT, default_user_agent.clone());
    }

    headers
}

/// Sanitize a terminal upstream response's headers for the original caller.
pub fn sanitize_response_headers(upstream: &HeaderMap) -> HeaderMap {
    let mut headers = upstream.clone();

    for name in UNSAFE_RESPONSE_HEADERS
        .iter()
        .chain(HOP_BY_HOP_RESPONSE_HEADERS.iter())
    {
        headers.remove(*name);
    }

    let cookies: Vec<HeaderValue> = headers.get_all(header::SET_COOKIE).iter().cloned().collect();
    if !cookies.is_empty() {
        headers.remove(header::SET_COOKIE);
        for cookie in cookies {
            headers.append(X_SET_COOKIE, cookie);
        }
    }

    for (name, value) in cors_headers() {
        headers.insert(name, value);
    }

    headers
}
