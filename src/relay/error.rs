//! Error taxonomy for the relay core.
//!
//! # Design Decisions
//! - Every variant maps to exactly one HTTP status code
//! - Errors are converted to responses at the handler boundary; nothing
//!   propagates past it
//! - The redirect budget gets a deliberately unusual status (418) so callers
//!   can recognize it unambiguously

use axum::http::StatusCode;
use thiserror::Error;

/// Everything that can go wrong while resolving a target or forwarding to it.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The request path carried no target at all.
    #[error("URL path required\n\nUsage: /example.com/file.ext")]
    MissingTarget,

    /// The path segment did not parse as a URL even after scheme defaulting.
    #[error("invalid target URL: {0}")]
    MalformedTarget(String),

    /// The resolved scheme is something other than `http` or `https`.
    #[error("unsupported protocol: {0}")]
    UnsupportedProtocol(String),

    /// The redirect hop budget was exhausted before a terminal response.
    #[error("too many redirects")]
    TooManyRedirects,

    /// Network-level failure reaching the target (DNS, connect, timeout).
    #[error("upstream request failed: {0}")]
    UpstreamUnavailable(#[from] reqwest::Error),

    /// The inbound body could not be buffered for replay across hops.
    #[error("request body exceeds the {0} byte limit")]
    BodyTooLarge(usize),

    /// Catch-all for anything else during processing.
    #[error("unexpected relay failure: {0}")]
    Unexpected(String),
}

impl RelayError {
    /// Status code reported to the original caller.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingTarget | Self::MalformedTarget(_) | Self::UnsupportedProtocol(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::TooManyRedirects => StatusCode::IM_A_TEAPOT,
            Self::UpstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
            Self::BodyTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
