//! Response construction at the relay boundary.
//!
//! # Responsibilities
//! - Answer OPTIONS preflights with the fixed CORS header set and no body
//! - Map every relay error to a plain-text HTTP response
//!
//! # Design Decisions
//! - Error text is the error's own message; descriptive bodies are
//!   acceptable for a debugging proxy

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::relay::headers::cors_headers;
use crate::relay::RelayError;

/// Empty preflight response carrying the fixed CORS header set. No
/// forwarding is attempted for preflights.
pub fn preflight() -> Response {
    let mut response = StatusCode::NO_CONTENT.into_response();
    let headers = response.headers_mut();
    for (name, value) in cors_headers() {
        headers.insert(name, value);
    }
    response
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header;

    #[test]
    fn preflight_carries_the_full_cors_set_and_no_body() {
        let response = preflight();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let headers = response.headers();
        assert_eq!(headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(), "*");
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_METHODS).unwrap(),
            "GET, HEAD, POST, PUT, DELETE, OPTIONS"
        );
        assert_eq!(headers.get(header::ACCESS_CONTROL_EXPOSE_HEADERS).unwrap(), "*");
        assert_eq!(headers.get(header::ACCESS_CONTROL_ALLOW_HEADERS).unwrap(), "*");
        assert_eq!(headers.get(header::ACCESS_CONTROL_MAX_AGE).unwrap(), "86400");
    }

    #[test]
    fn missing_target_renders_the_usage_message() {
        let response = RelayError::MissingTarget.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
