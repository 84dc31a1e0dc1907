//! The relay core: target resolution and proxy forwarding.
//!
//! # Data Flow
//! ```text
//! Inbound request (path, query, headers, body)
//!     → target.rs (path segment → validated absolute URL)
//!     → headers.rs (request rewrite rules)
//!     → forwarder.rs (bounded redirect loop, one upstream call per hop)
//!     → headers.rs (response sanitization, CORS injection)
//!     → Streamed response to the caller
//! ```
//!
//! # Design Decisions
//! - Redirects are followed here, not by the transport, so the rewrite and
//!   sanitization pipeline applies exactly once, to the terminal response
//! - The hop counter is local to one request's call chain; no shared state
//! - Terminal response bodies stream; redirect bodies are discarded

pub mod error;
pub mod forwarder;
pub mod headers;
pub mod target;

pub use error::RelayError;
pub use forwarder::Forwarder;
