//! Call wrappers: the single boundary where raw transport outcomes become
//! [`ApiResult`] values.
//!
//! No `Err` escapes these functions. Every caller-visible outcome is an
//! [`ApiResult`], whichever way the call went.

use std::future::Future;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::errors::{BoxError, Cancelled};
use crate::{ApiResult, ResponseEnvelope};

/// Message used when a successful status arrives without a body.
pub const NULL_BODY_MESSAGE: &str = "Response body is null";

/// Message used when a failing status arrives without a reason text.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error";

/// Awaits `call` and maps its envelope into an [`ApiResult`].
///
/// - `Err(e)` becomes [`ApiResult::Exception`].
/// - A successful status with a body becomes [`ApiResult::Success`].
/// - A successful status without a body becomes
///   `Error(status, "Response body is null")`: callers of this wrapper expect
///   a payload. Use [`api_call_no_content`] for endpoints that legitimately
///   answer without one.
/// - A failing status becomes `Error(status, message)`, with
///   `"Unknown error"` standing in for a missing message.
pub async fn api_call<T, E, F, Fut>(call: F) -> ApiResult<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<ResponseEnvelope<T>, E>>,
    E: Into<BoxError>,
{
    match call().await {
        Ok(envelope) => from_envelope(envelope),
        Err(e) => exception(e.into()),
    }
}

/// Like [`api_call`], but for endpoints whose successful responses carry no
/// payload (e.g. `DELETE`). Any successful status becomes `Success(())`.
pub async fn api_call_no_content<T, E, F, Fut>(call: F) -> ApiResult<()>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<ResponseEnvelope<T>, E>>,
    E: Into<BoxError>,
{
    match call().await {
        Ok(envelope) if envelope.is_successful() => ApiResult::Success(()),
        Ok(envelope) => from_envelope(ResponseEnvelope::<()>::failed(
            envelope.status,
            envelope.message,
        )),
        Err(e) => exception(e.into()),
    }
}

/// Awaits `call`, which yields a plain value rather than an envelope.
///
/// `Ok(v)` becomes `Success(v)` and `Err(e)` becomes `Exception(e)`. There is
/// no status to inspect, so this wrapper never produces [`ApiResult::Error`].
pub async fn safe_call<T, E, F, Fut>(call: F) -> ApiResult<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Into<BoxError>,
{
    match call().await {
        Ok(value) => ApiResult::Success(value),
        Err(e) => exception(e.into()),
    }
}

/// [`api_call`] that gives up when `token` is cancelled.
///
/// On cancellation the in-flight future is dropped, which aborts the
/// underlying request, and the outcome is `Exception(Cancelled)`.
pub async fn api_call_cancellable<T, E, F, Fut>(token: &CancellationToken, call: F) -> ApiResult<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<ResponseEnvelope<T>, E>>,
    E: Into<BoxError>,
{
    until_cancelled(token, api_call(call)).await
}

/// [`api_call_no_content`] that gives up when `token` is cancelled.
pub async fn api_call_no_content_cancellable<T, E, F, Fut>(
    token: &CancellationToken,
    call: F,
) -> ApiResult<()>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<ResponseEnvelope<T>, E>>,
    E: Into<BoxError>,
{
    until_cancelled(token, api_call_no_content(call)).await
}

/// [`safe_call`] that gives up when `token` is cancelled.
pub async fn safe_call_cancellable<T, E, F, Fut>(token: &CancellationToken, call: F) -> ApiResult<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Into<BoxError>,
{
    until_cancelled(token, safe_call(call)).await
}

async fn until_cancelled<T, Fut>(token: &CancellationToken, call: Fut) -> ApiResult<T>
where
    Fut: Future<Output = ApiResult<T>>,
{
    tokio::select! {
        biased;
        () = token.cancelled() => exception(Box::new(Cancelled)),
        result = call => result,
    }
}

fn from_envelope<T>(envelope: ResponseEnvelope<T>) -> ApiResult<T> {
    let status = envelope.status;
    if envelope.is_successful() {
        match envelope.body {
            Some(body) => ApiResult::Success(body),
            None => {
                debug!(status, "successful response carried no body");
                ApiResult::error(status, NULL_BODY_MESSAGE)
            }
        }
    } else {
        let message = envelope
            .message
            .unwrap_or_else(|| UNKNOWN_ERROR_MESSAGE.to_string());
        debug!(status, %message, "API call returned a failing status");
        ApiResult::Error {
            code: status,
            message,
        }
    }
}

fn exception<T>(cause: BoxError) -> ApiResult<T> {
    debug!(error = %cause, "API call raised an error");
    ApiResult::Exception(cause)
}
