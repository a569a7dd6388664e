//! Transport-level failures.
//!
//! Every variant surfaces to callers as the cause of an
//! [`api_core::ApiResult::Exception`]; none of them is ever a remote
//! "error" response (those are carried in the envelope instead).

use thiserror::Error;

/// Errors raised while building a client or performing a request.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TransportError {
    /// The base address could not be used as a URL root.
    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl {
        /// The address as supplied by the caller.
        url: String,
        /// Diagnostic text (unstable format, for logging only).
        reason: String,
    },

    /// A request path could not be resolved against the base URL.
    #[error("Invalid request path '{path}': {reason}")]
    InvalidPath {
        /// The relative path that failed to resolve.
        path: String,
        /// Diagnostic text (unstable format, for logging only).
        reason: String,
    },

    /// Network configuration could not be loaded.
    #[error("Invalid network configuration: {message}")]
    InvalidConfig {
        /// Description of the configuration problem.
        message: String,
    },

    /// The underlying HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// The request did not finish within the configured timeouts.
    #[error("Request timed out: {0}")]
    Timeout(#[source] reqwest::Error),

    /// Connection, protocol, or body transfer failure.
    #[error("Request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// A successful response body was not valid JSON for the expected shape.
    #[error("Failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl TransportError {
    /// Returns `true` if this error is a timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err)
        } else {
            Self::Request(err)
        }
    }
}
