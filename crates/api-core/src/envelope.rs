//! Raw outcome of a single transport round-trip.

/// Status code, optional decoded body, and optional reason text returned by
/// a transport for one request.
///
/// Transports build envelopes; [`crate::api_call`] turns them into
/// [`crate::ApiResult`] values. The success indicator is derived from the
/// status rather than stored, so an envelope can never disagree with itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseEnvelope<T> {
    /// Status code of the response.
    pub status: u16,
    /// Decoded body. `None` when the response had no body, an empty body, or
    /// a failing status.
    pub body: Option<T>,
    /// Reason text reported alongside the status (e.g. `"Not Found"`).
    pub message: Option<String>,
}

impl<T> ResponseEnvelope<T> {
    /// Creates an envelope from its parts.
    pub fn new(status: u16, body: Option<T>, message: Option<String>) -> Self {
        Self {
            status,
            body,
            message,
        }
    }

    /// Successful response carrying `body`.
    pub fn ok(status: u16, body: T) -> Self {
        Self::new(status, Some(body), None)
    }

    /// Successful response with no body.
    pub fn empty(status: u16) -> Self {
        Self::new(status, None, None)
    }

    /// Failing response with an optional reason text.
    pub fn failed(status: u16, message: Option<String>) -> Self {
        Self::new(status, None, message)
    }

    /// Returns `true` if the status is in the `2xx` range.
    pub fn is_successful(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
