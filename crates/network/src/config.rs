//! Fixed client configuration shared by every client a registry builds.

use std::time::Duration;

use crate::TransportError;

/// Default connect, read, and overall request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// `User-Agent` sent by default.
pub const DEFAULT_USER_AGENT: &str = concat!("example-client/", env!("CARGO_PKG_VERSION"));

/// Env var overriding [`NetworkConfig::connect_timeout`], in whole seconds.
pub const CONNECT_TIMEOUT_ENV: &str = "EXAMPLE_CONNECT_TIMEOUT_SECS";
/// Env var overriding [`NetworkConfig::read_timeout`], in whole seconds.
pub const READ_TIMEOUT_ENV: &str = "EXAMPLE_READ_TIMEOUT_SECS";
/// Env var overriding [`NetworkConfig::request_timeout`], in whole seconds.
pub const REQUEST_TIMEOUT_ENV: &str = "EXAMPLE_REQUEST_TIMEOUT_SECS";

/// Timeouts and identity applied to every [`crate::HttpClient`].
///
/// The configuration is fixed per [`crate::ClientRegistry`]; individual calls
/// cannot override it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkConfig {
    /// Maximum time to establish a connection.
    pub connect_timeout: Duration,
    /// Maximum time between two successful reads of the response.
    pub read_timeout: Duration,
    /// Maximum time for the whole request, from send to end of body.
    /// Bounds the write phase as well, which the HTTP client does not time on
    /// its own.
    pub request_timeout: Duration,
    /// `User-Agent` header value.
    pub user_agent: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            connect_timeout: DEFAULT_TIMEOUT,
            read_timeout: DEFAULT_TIMEOUT,
            request_timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl NetworkConfig {
    /// Defaults, overridden by any of the `EXAMPLE_*_TIMEOUT_SECS` variables
    /// present in the process environment.
    pub fn from_env() -> Result<Self, TransportError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults, overridden by the values `lookup` returns for the timeout
    /// variable names.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, TransportError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(secs) = parse_secs(&lookup, CONNECT_TIMEOUT_ENV)? {
            config.connect_timeout = secs;
        }
        if let Some(secs) = parse_secs(&lookup, READ_TIMEOUT_ENV)? {
            config.read_timeout = secs;
        }
        if let Some(secs) = parse_secs(&lookup, REQUEST_TIMEOUT_ENV)? {
            config.request_timeout = secs;
        }
        Ok(config)
    }

    /// Sets [`NetworkConfig::connect_timeout`].
    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets [`NetworkConfig::read_timeout`].
    #[must_use]
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Sets [`NetworkConfig::request_timeout`].
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Sets [`NetworkConfig::user_agent`].
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

fn parse_secs<F>(lookup: &F, key: &str) -> Result<Option<Duration>, TransportError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    match raw.trim().parse::<u64>() {
        Ok(0) => Err(TransportError::InvalidConfig {
            message: format!("{key} must be greater than zero"),
        }),
        Ok(secs) => Ok(Some(Duration::from_secs(secs))),
        Err(e) => Err(TransportError::InvalidConfig {
            message: format!("{key}='{raw}' is not a whole number of seconds: {e}"),
        }),
    }
}
