//! Printing an [`ApiResult`] and choosing the exit code.

use std::process::ExitCode;

use api_core::ApiResult;
use clap::error::ErrorKind;
use serde::Serialize;
use tracing::{error, warn};

/// Exit code for [`ApiResult::Error`].
pub const EXIT_API_ERROR: u8 = 1;
/// Exit code for [`ApiResult::Exception`].
pub const EXIT_CALL_FAILED: u8 = 2;
/// Exit code for failures before any call was made.
pub const EXIT_STARTUP: u8 = 3;

/// Exit code for a command line that did not parse.
///
/// `--help` and `--version` surface as parse errors but are successful runs.
pub fn parse_failure_code(err: &clap::Error) -> u8 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => EXIT_STARTUP,
    }
}

/// Exit code for an outcome, without printing anything.
pub fn exit_code<T>(result: &ApiResult<T>) -> u8 {
    match result {
        ApiResult::Success(_) => 0,
        ApiResult::Error { .. } => EXIT_API_ERROR,
        ApiResult::Exception(_) => EXIT_CALL_FAILED,
    }
}

/// Prints the value as pretty JSON on stdout, or the failure on stderr.
pub fn report<T: Serialize>(result: ApiResult<T>) -> ExitCode {
    let exit = exit_code(&result);
    match result {
        ApiResult::Success(value) => match serde_json::to_string_pretty(&value) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                error!(error = %e, "failed to render result");
                return ExitCode::from(EXIT_CALL_FAILED);
            }
        },
        ApiResult::Error { code, message } => {
            warn!(code, %message, "API returned an error");
            eprintln!("error: API returned {code}: {message}");
        }
        ApiResult::Exception(cause) => {
            error!(error = %cause, "API call failed");
            eprintln!("error: {cause}");
        }
    }
    ExitCode::from(exit)
}
