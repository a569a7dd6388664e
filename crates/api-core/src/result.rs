//! The tagged outcome of one API call.
//!
//! [`ApiResult`] is the only value a typed service hands back to its callers.
//! Every outcome is exactly one of:
//!
//! | Variant | Meaning |
//! |---------|---------|
//! | [`ApiResult::Success`] | The endpoint answered with a successful status and a body. |
//! | [`ApiResult::Error`] | The endpoint answered, but with a failing status or without a body. |
//! | [`ApiResult::Exception`] | The call raised an error before a usable answer arrived. |
//!
//! Callers are expected to `match` on the variant. The accessor methods are
//! conveniences for the common "just give me the value" paths.

use crate::errors::{ApiError, BoxError, StatusError};

/// Outcome of a single API call.
///
/// Values are immutable snapshots; the chaining helpers ([`ApiResult::on_success`],
/// [`ApiResult::on_error`]) hand the same value back without changing its variant.
#[derive(Debug)]
#[must_use = "an ApiResult may hold an error that should be handled"]
pub enum ApiResult<T> {
    /// The call produced a value.
    Success(T),

    /// The endpoint reported a failure.
    Error {
        /// Status code returned by the endpoint.
        code: u16,
        /// Reason text, or a fixed fallback when none was reported.
        message: String,
    },

    /// The call raised an error (connectivity, timeout, decoding, cancellation).
    Exception(BoxError),
}

impl<T> ApiResult<T> {
    /// Wraps a successful value.
    pub fn success(value: T) -> Self {
        Self::Success(value)
    }

    /// Wraps a remote failure.
    pub fn error(code: u16, message: impl Into<String>) -> Self {
        Self::Error {
            code,
            message: message.into(),
        }
    }

    /// Wraps a raised error.
    pub fn exception(cause: impl Into<BoxError>) -> Self {
        Self::Exception(cause.into())
    }

    /// Returns `true` iff this is [`ApiResult::Success`].
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns `true` iff this is [`ApiResult::Error`] or [`ApiResult::Exception`].
    pub fn is_error(&self) -> bool {
        !self.is_success()
    }

    /// Borrows the value if this is a success.
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Success(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the value if this is a success, `None` otherwise.
    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Success(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the value if this is a success, `default` otherwise.
    pub fn value_or(self, default: T) -> T {
        match self {
            Self::Success(value) => value,
            _ => default,
        }
    }

    /// Runs `action` on the value if this is a success.
    pub fn on_success<F>(self, action: F) -> Self
    where
        F: FnOnce(&T),
    {
        if let Self::Success(value) = &self {
            action(value);
        }
        self
    }

    /// Runs `action` on the normalized error if this is not a success.
    ///
    /// [`ApiResult::Error`] is presented as a [`StatusError`];
    /// [`ApiResult::Exception`] passes its original cause through.
    pub fn on_error<F>(self, action: F) -> Self
    where
        F: FnOnce(&(dyn std::error::Error + 'static)),
    {
        match &self {
            Self::Success(_) => {}
            Self::Error { code, message } => action(&StatusError::new(*code, message.clone())),
            Self::Exception(cause) => action(cause.as_ref()),
        }
        self
    }

    /// Transforms the success value, keeping failures as they are.
    pub fn map<U, F>(self, f: F) -> ApiResult<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Success(value) => ApiResult::Success(f(value)),
            Self::Error { code, message } => ApiResult::Error { code, message },
            Self::Exception(cause) => ApiResult::Exception(cause),
        }
    }

    /// Converts into a standard [`Result`] for use with `?`.
    pub fn into_result(self) -> Result<T, ApiError> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Error { code, message } => Err(StatusError { code, message }.into()),
            Self::Exception(cause) => Err(ApiError::Exception(cause)),
        }
    }
}

impl<T> From<ApiResult<T>> for Result<T, ApiError> {
    fn from(result: ApiResult<T>) -> Self {
        result.into_result()
    }
}
