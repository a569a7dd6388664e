//! Command-line surface.

use clap::{Parser, Subcommand, ValueEnum};
use example_api::DEFAULT_PAGE;

#[derive(Debug, Parser)]
#[command(name = "example-client")]
#[command(version, about = "Call the example users API")]
#[command(long_about = r#"Call the example users API and print the outcome.

Successful results are printed to stdout as JSON. Failures are printed to
stderr.

EXIT CODES:
    0 - Success
    1 - The API answered with an error (failing status or missing body)
    2 - The call failed (connection, timeout, decoding, cancellation)
    3 - Startup failure (invalid configuration, logging setup)
"#)]
pub struct Args {
    /// Root URL of the users API (e.g. https://api.example.com/)
    #[arg(long, env = "EXAMPLE_API_BASE_URL", value_name = "URL")]
    pub base_url: String,

    /// Log output format
    #[arg(long, env = "EXAMPLE_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// OTLP/gRPC endpoint to export spans to (disabled when unset)
    #[arg(long, env = "OTEL_EXPORTER_OTLP_ENDPOINT", value_name = "URL")]
    pub otlp_endpoint: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Fetch one user by id
    GetUser {
        /// User id
        id: String,
    },

    /// List one page of users
    ListUsers {
        /// Page number, starting at 1
        #[arg(long, default_value_t = DEFAULT_PAGE)]
        page: u32,
    },

    /// Create a user
    CreateUser {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
    },

    /// Delete a user by id
    DeleteUser {
        /// User id
        id: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable single-line records
    Text,
    /// One JSON object per line
    Json,
    /// Multi-line, indented records (for development)
    Pretty,
}
