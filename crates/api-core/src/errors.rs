//! Error types shared by every API call.
//!
//! [`StatusError`] is the normalized form of a remote failure (a status code
//! plus a message). [`ApiError`] is the owned failure produced when an
//! [`crate::ApiResult`] is converted into a standard [`Result`]. [`Cancelled`]
//! is the cause recorded when a call is aborted through its cancellation token.

use thiserror::Error;

/// Boxed, thread-safe error used as the cause of an exceptional outcome.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

// ---------------------------------------------------------------------------
// Remote failures
// ---------------------------------------------------------------------------

/// A non-exceptional failure reported by the remote endpoint.
///
/// Produced for failing statuses and for successful statuses that carried no
/// body. The display text is `Code: {code}, Message: {message}`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Code: {code}, Message: {message}")]
pub struct StatusError {
    /// Status code returned by the endpoint.
    pub code: u16,
    /// Reason reported with the status, or a fixed fallback text.
    pub message: String,
}

impl StatusError {
    /// Creates a new [`StatusError`].
    pub fn new(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Owned failure
// ---------------------------------------------------------------------------

/// Failure side of [`crate::ApiResult::into_result`].
#[derive(Debug, Error)]
pub enum ApiError {
    /// The endpoint answered, but not with a usable payload.
    #[error(transparent)]
    Status(#[from] StatusError),

    /// The call itself raised an error (connectivity, decoding, cancellation).
    #[error("{0}")]
    Exception(#[source] BoxError),
}

impl ApiError {
    /// Returns the status code for [`ApiError::Status`], `None` otherwise.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status(status) => Some(status.code),
            Self::Exception(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Cancellation
// ---------------------------------------------------------------------------

/// Recorded as the exception cause when a call's cancellation token fires
/// before the call completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Error)]
#[error("API call was cancelled before it completed")]
pub struct Cancelled;
