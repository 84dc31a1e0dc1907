//! Stateless CORS-enabling HTTP forwarding relay.
//!
//! Accepts an inbound request whose destination is encoded in the request
//! path, reissues an equivalent request to that destination, and streams the
//! response back with headers sanitized and cross-origin access enabled.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌───────────────────────────────────────────────┐
//!                        │                  CORS RELAY                   │
//!                        │                                               │
//!     Client Request     │  ┌────────┐    ┌──────────┐   ┌───────────┐  │
//!     ───────────────────┼─▶│  http  │───▶│  target  │──▶│ forwarder │──┼──▶ Upstream
//!                        │  │ server │    │ resolver │   │ (hop loop)│  │
//!                        │  └────────┘    └──────────┘   └─────┬─────┘  │
//!                        │                                     │        │
//!     Client Response    │  ┌──────────────────┐               │        │
//!     ◀──────────────────┼──│ header sanitizer │◀──────────────┘        │
//!                        │  └──────────────────┘                        │
//!                        │                                              │
//!                        │  ┌────────────────────────────────────────┐  │
//!                        │  │         Cross-Cutting Concerns         │  │
//!                        │  │   config · observability · lifecycle   │  │
//!                        │  └────────────────────────────────────────┘  │
//!                        └──────────────────────────────────────────────┘
//! ```

// Core subsystems
pub mod config;
pub mod http;
pub mod relay;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::RelayConfig;
pub use http::RelayServer;
pub use lifecycle::Shutdown;
