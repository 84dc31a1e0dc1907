//! Proxy forwarding with manual, bounded redirect chasing.
//!
//! # Responsibilities
//! - Build the outbound request from the inbound one plus the target URL
//! - Issue one upstream call per hop with transport redirects disabled
//! - Resolve `Location` against the current target and loop, up to the budget
//! - Sanitize and stream the terminal response
//!
//! # Design Decisions
//! - Iterative loop with an explicit hop counter, not recursion
//! - The inbound method, headers, and body are reused unchanged on every
//!   hop, regardless of status code (303 included)
//! - Redirect response bodies are discarded; only the terminal body streams

use std::time::Duration;

use axum::body::{Body, Bytes};
use axum::http::{header, HeaderMap, HeaderValue, Method, StatusCode};
use axum::response::Response;
use reqwest::redirect;
use url::Url;

use crate::config::RelayConfig;
use crate::observability::metrics;
use crate::relay::error::RelayError;
use crate::relay::headers::{rewrite_request_headers, sanitize_response_headers};
use crate::relay::target::ensure_supported_scheme;

/// Stateless upstream forwarder shared by all in-flight requests.
pub struct Forwarder {
    client: reqwest::Client,
    user_agent: HeaderValue,
    max_redirects: u32,
}

impl Forwarder {
    /// Build the outbound client. Transport-level redirect following is
    /// disabled; this component owns redirect semantics.
    pub fn new(config: &RelayConfig) -> Result<Self, RelayError> {
        let user_agent = HeaderValue::from_str(&config.forwarding.user_agent)
            .map_err(|e| RelayError::Unexpected(format!("invalid configured user-agent: {e}")))?;

        let client = reqwest::Client::builder()
            .redirect(redirect::Policy::none())
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .read_timeout(Duration::from_secs(config.timeouts.idle_secs))
            .build()
            .map_err(|e| RelayError::Unexpected(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            user_agent,
            max_redirects: config.forwarding.max_redirects,
        })
    }

    /// Forward the request to `target`, chasing redirects up to the budget,
    /// and return the sanitized terminal response with a streaming body.
    pub async fn forward(
        &self,
        method: Method,
        inbound_headers: &HeaderMap,
        body: Bytes,
        mut target: Url,
    ) -> Result<Response, RelayError> {
        let headers = rewrite_request_headers(inbound_headers, &self.user_agent);
        let mut hops: u32 = 0;

        loop {
            if hops > self.max_redirects {
                return Err(RelayError::TooManyRedirects);
            }
            ensure_supported_scheme(&target)?;

            let upstream = self
                .client
                .request(method.clone(), target.clone())
                .headers(headers.clone())
                .body(body.clone())
                .send()
                .await?;

            let status = upstream.status();
            match redirect_location(&upstream) {
                Some(location) => {
                    let next = target
                        .join(&location)
                        .map_err(|_| RelayError::MalformedTarget(location))?;
                    tracing::debug!(
                        hop = hops + 1,
                        status = %status,
                        location = %next,
                        "Following redirect"
                    );
                    target = next;
                    hops += 1;
                }
                None => {
                    metrics::record_hops(hops);
                    return Ok(into_streamed_response(upstream));
                }
            }
        }
    }
}

/// The `Location` value to follow, when the response is a redirect carrying
/// one. Anything else is terminal.
fn redirect_location(upstream: &reqwest::Response) -> Option<String> {
    if !is_redirect_status(upstream.status()) {
        return None;
    }
    upstream
        .headers()
        .get(header::LOCATION)?
        .to_str()
        .ok()
        .map(str::to_owned)
}

fn is_redirect_status(status: StatusCode) -> bool {
    matches!(status.as_u16(), 301 | 302 | 303 | 307 | 308)
}

/// Convert the terminal upstream response: upstream status, sanitized
/// headers, and the body forwarded as a live stream rather than buffered.
fn into_streamed_response(upstream: reqwest::Response) -> Response {
    let status = upstream.status();
    let headers = sanitize_response_headers(upstream.headers());

    let mut response = Response::new(Body::from_stream(upstream.bytes_stream()));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    response
}
