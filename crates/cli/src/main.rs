//! `example-client` entry point.
//!
//! This binary is the composition root. Responsibilities:
//!
//! 1. **Parse configuration** — command-line flags with environment fallbacks,
//!    plus `EXAMPLE_*_TIMEOUT_SECS` overrides for the network layer.
//! 2. **Wire observability** — install the `tracing` subscriber and, when
//!    configured, the OpenTelemetry OTLP exporter.
//! 3. **Construct infrastructure** — one [`ClientRegistry`] for the process,
//!    injected into the [`UserService`].
//! 4. **Dispatch** — run the selected command, print the outcome, and map it
//!    to an exit code. Ctrl-C cancels the in-flight call.

mod args;
mod observability;
mod report;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use api_core::CancellationToken;
use clap::Parser;
use example_api::{UserRequest, UserService};
use network::{ClientRegistry, NetworkConfig};
use tracing::{debug, info};

use crate::args::{Args, Command};

#[tokio::main]
async fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(report::parse_failure_code(&e));
        }
    };

    let telemetry = match observability::init(args.log_format, args.otlp_endpoint.as_deref()) {
        Ok(telemetry) => telemetry,
        Err(e) => {
            eprintln!("error: {e:#}");
            return ExitCode::from(report::EXIT_STARTUP);
        }
    };

    let code = match run(args).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "startup failed");
            eprintln!("error: {e:#}");
            ExitCode::from(report::EXIT_STARTUP)
        }
    };

    telemetry.shutdown();
    code
}

async fn run(args: Args) -> Result<ExitCode> {
    let config = NetworkConfig::from_env().context("loading network configuration")?;
    debug!(?config, "network configuration loaded");

    let registry = Arc::new(ClientRegistry::with_config(config));
    let cancel = CancellationToken::new();
    spawn_ctrl_c_handler(cancel.clone());

    let users = UserService::new(args.base_url.as_str(), registry).with_cancellation(cancel);
    info!(base_url = %args.base_url, command = ?args.command, "running command");

    let code = match args.command {
        Command::GetUser { id } => report::report(users.get_user(&id).await),
        Command::ListUsers { page } => report::report(users.get_users(page).await),
        Command::CreateUser { name, email } => {
            report::report(users.create_user(&UserRequest::new(name, email)).await)
        }
        Command::DeleteUser { id } => report::report(users.delete_user(&id).await),
    };
    Ok(code)
}

fn spawn_ctrl_c_handler(cancel: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("interrupt received, cancelling");
            cancel.cancel();
        }
    });
}
