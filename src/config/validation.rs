//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: RelayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use axum::http::HeaderValue;

use crate::config::schema::RelayConfig;

/// Hard ceiling on the configurable redirect budget.
const MAX_REDIRECT_CEILING: u32 = 32;

/// A single semantic problem found in a configuration.
#[derive(Debug)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Check a configuration for semantic problems, reporting every one found.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError {
            field: "listener.bind_address",
            message: format!("not a valid socket address: {}", config.listener.bind_address),
        });
    }

    if config.forwarding.max_redirects > MAX_REDIRECT_CEILING {
        errors.push(ValidationError {
            field: "forwarding.max_redirects",
            message: format!("must be at most {MAX_REDIRECT_CEILING}"),
        });
    }

    if config.forwarding.max_body_bytes == 0 {
        errors.push(ValidationError {
            field: "forwarding.max_body_bytes",
            message: "must be greater than zero".to_string(),
        });
    }

    if HeaderValue::from_str(&config.forwarding.user_agent).is_err() {
        errors.push(ValidationError {
            field: "forwarding.user_agent",
            message: "not a valid header value".to_string(),
        });
    }

    if config.timeouts.connect_secs == 0
        || config.timeouts.request_secs == 0
        || config.timeouts.idle_secs == 0
    {
        errors.push(ValidationError {
            field: "timeouts",
            message: "all timeouts must be greater than zero".to_string(),
        });
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError {
            field: "observability.metrics_address",
            message: format!(
                "not a valid socket address: {}",
                config.observability.metrics_address
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
