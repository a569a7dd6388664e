//! HTTP transport adapter.
//!
//! Builds `reqwest` clients with a fixed configuration (timeouts, user agent,
//! request/response logging), caches them per base address in a
//! [`ClientRegistry`], and reports every request as an
//! [`api_core::ResponseEnvelope`].
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** All HTTP transport, URL resolution, and body decoding
//! live here. Typed services see only [`HttpClient`] and [`ClientRegistry`];
//! callers of typed services see only [`api_core::ApiResult`].

pub mod client;
pub mod config;
pub mod error;
pub mod registry;

pub use client::{ClientId, HttpClient};
pub use config::NetworkConfig;
pub use error::TransportError;
pub use registry::ClientRegistry;
