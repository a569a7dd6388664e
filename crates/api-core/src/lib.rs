//! Outcome types and call-wrapping discipline for typed API clients.
//!
//! Every typed service in the workspace returns an [`ApiResult`]. Transports
//! produce [`ResponseEnvelope`] values; the call wrappers in [`call`] are the
//! one place where envelopes and raised errors are translated into results.
//!
//! ## Architectural Layer
//!
//! **Domain types.** This crate has no HTTP dependency. It defines *what* a
//! call outcome looks like; the `network` crate defines *how* one is obtained.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`result`] | [`ApiResult`], the tagged call outcome |
//! | [`envelope`] | [`ResponseEnvelope`], the raw transport outcome |
//! | [`call`] | [`api_call`], [`safe_call`] and their cancellable forms |
//! | [`errors`] | [`StatusError`], [`ApiError`], [`Cancelled`] |

pub mod call;
pub mod envelope;
pub mod errors;
pub mod result;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use call::{
    api_call, api_call_cancellable, api_call_no_content, api_call_no_content_cancellable,
    safe_call, safe_call_cancellable, NULL_BODY_MESSAGE, UNKNOWN_ERROR_MESSAGE,
};
pub use envelope::ResponseEnvelope;
pub use errors::{ApiError, BoxError, Cancelled, StatusError};
pub use result::ApiResult;
pub use tokio_util::sync::CancellationToken;
