//! Target URL resolution.
//!
//! # Responsibilities
//! - Parse the inbound path segment into an absolute URL
//! - Default to `https` when the segment carries no scheme
//! - Merge the relay's own query parameters into the target
//! - Enforce the http/https scheme invariant
//!
//! # Design Decisions
//! - Scheme prefix matching is case-insensitive (`HTTP://` counts)
//! - Query parameters are appended, never overwritten; duplicates survive
//! - Pure functions, no side effects

use url::Url;

use crate::relay::error::RelayError;

/// Schemes the relay is willing to dial.
const SUPPORTED_SCHEMES: [&str; 2] = ["http", "https"];

/// Resolve the inbound path segment (leading separator already removed) into
/// an absolute target URL, appending the relay URL's own query parameters.
pub fn resolve(path_segment: &str, original_query: &[(String, String)]) -> Result<Url, RelayError> {
    if path_segment.is_empty() {
        return Err(RelayError::MissingTarget);
    }

    let mut target = parse_with_scheme_default(path_segment)?;
    ensure_supported_scheme(&target)?;

    if !original_query.is_empty() {
        let mut pairs = target.query_pairs_mut();
        for (key, value) in original_query {
            pairs.append_pair(key, value);
        }
    }

    Ok(target)
}

/// Parse the segment as-is when it already names an HTTP scheme, otherwise
/// assume `https`.
fn parse_with_scheme_default(path_segment: &str) -> Result<Url, RelayError> {
    let lower = path_segment.to_ascii_lowercase();
    let parsed = if lower.starts_with("http://") || lower.starts_with("https://") {
        Url::parse(path_segment)
    } else {
        Url::parse(&format!("https://{path_segment}"))
    };
    parsed.map_err(|_| RelayError::MalformedTarget(path_segment.to_string()))
}

/// Scheme invariant, checked before any network call. The forwarder applies
/// this to every redirect hop target as well; a `Location` header may point
/// anywhere.
pub fn ensure_supported_scheme(url: &Url) -> Result<(), RelayError> {
    if SUPPORTED_SCHEMES.contains(&url.scheme()) {
        Ok(())
    } else {
        Err(RelayError::UnsupportedProtocol(url.scheme().to_string()))
    }
}
