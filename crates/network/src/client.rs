//! A configured HTTP client bound to one base URL.
//!
//! [`HttpClient`] performs JSON requests relative to its base URL and returns
//! the raw outcome as an [`api_core::ResponseEnvelope`]. It never decides
//! whether an outcome is a success for the caller; that is the call wrapper's
//! job.
//!
//! Every request runs inside an `http_request` span carrying the client id,
//! method, and URL. Status and latency are logged at `debug`, bodies at `trace`.

use std::time::Instant;

use api_core::ResponseEnvelope;
use reqwest::{Method, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, debug_span, trace, Instrument, Level};
use uuid::Uuid;

use crate::{NetworkConfig, TransportError};

/// Identifies one constructed [`HttpClient`] instance.
///
/// Generated fresh on construction, so a client rebuilt after a cache clear
/// can be told apart from the one it replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClientId(Uuid);

impl ClientId {
    fn new_random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for ClientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------

/// JSON-over-HTTP client rooted at a base URL.
#[derive(Debug)]
pub struct HttpClient {
    id: ClientId,
    base_url: Url,
    inner: reqwest::Client,
}

impl HttpClient {
    /// Builds a client for `base_url` using the fixed `config`.
    ///
    /// The base URL must be an absolute `http` or `https` URL. A trailing `/`
    /// is added when missing so relative paths resolve beneath it.
    pub fn new(base_url: &str, config: &NetworkConfig) -> Result<Self, TransportError> {
        let base_url = parse_base_url(base_url)?;
        let inner = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .read_timeout(config.read_timeout)
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(TransportError::ClientBuild)?;

        Ok(Self {
            id: ClientId::new_random(),
            base_url,
            inner,
        })
    }

    /// Identity of this instance.
    pub fn id(&self) -> ClientId {
        self.id
    }

    /// Base URL every request path is resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends `segments` to the base URL path.
    ///
    /// Each segment is percent-encoded on its own, so values such as user ids
    /// can never inject extra path components or a query string. Empty, `.`
    /// and `..` segments are rejected since they would address a different
    /// resource.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, TransportError> {
        if let Some(bad) = segments.iter().find(|s| matches!(**s, "" | "." | "..")) {
            return Err(TransportError::InvalidPath {
                path: segments.join("/"),
                reason: format!("segment '{bad}' is not allowed"),
            });
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| TransportError::InvalidPath {
                path: segments.join("/"),
                reason: "base URL cannot carry a path".to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// `GET` the joined `path` and decode the JSON body as `T`.
    pub async fn get_json<T>(&self, path: &[&str]) -> Result<ResponseEnvelope<T>, TransportError>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        let request = self.inner.get(url.clone());
        self.execute(Method::GET, url, request, decode_body).await
    }

    /// `GET` the joined `path` with `query` appended and decode the JSON body as `T`.
    pub async fn get_json_with_query<T, Q>(
        &self,
        path: &[&str],
        query: &Q,
    ) -> Result<ResponseEnvelope<T>, TransportError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let url = self.endpoint(path)?;
        let request = self.inner.get(url.clone()).query(query);
        self.execute(Method::GET, url, request, decode_body).await
    }

    /// `POST` to the joined `path` with a JSON `body` and decode the JSON response as `T`.
    pub async fn post_json<B, T>(
        &self,
        path: &[&str],
        body: &B,
    ) -> Result<ResponseEnvelope<T>, TransportError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        let request = self.inner.post(url.clone()).json(body);
        self.execute(Method::POST, url, request, decode_body).await
    }

    /// `DELETE` the joined `path`. The response body is read but never decoded,
    /// so the envelope body is always `None`.
    pub async fn delete(&self, path: &[&str]) -> Result<ResponseEnvelope<()>, TransportError> {
        let url = self.endpoint(path)?;
        let request = self.inner.delete(url.clone());
        self.execute(Method::DELETE, url, request, |_| Ok(None)).await
    }

    async fn execute<T, D>(
        &self,
        method: Method,
        url: Url,
        request: RequestBuilder,
        decode: D,
    ) -> Result<ResponseEnvelope<T>, TransportError>
    where
        D: FnOnce(&[u8]) -> Result<Option<T>, serde_json::Error>,
    {
        let span = debug_span!(
            "http_request",
            client_id = %self.id,
            method = %method,
            url = %url,
        );

        async move {
            let started = Instant::now();
            debug!("sending request");

            let response = request.send().await?;
            let status = response.status();
            let message = reason_phrase(status);
            debug!(
                status = status.as_u16(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "received response"
            );

            if !status.is_success() {
                if tracing::enabled!(Level::TRACE) {
                    if let Ok(bytes) = response.bytes().await {
                        trace!(body = %String::from_utf8_lossy(&bytes), "error response body");
                    }
                }
                return Ok(ResponseEnvelope::failed(status.as_u16(), message));
            }

            let bytes = response.bytes().await?;
            trace!(body = %String::from_utf8_lossy(&bytes), "response body");
            let body = decode(&bytes)?;
            Ok(ResponseEnvelope::new(status.as_u16(), body, message))
        }
        .instrument(span)
        .await
    }
}

fn parse_base_url(raw: &str) -> Result<Url, TransportError> {
    let invalid = |reason: String| TransportError::InvalidBaseUrl {
        url: raw.to_string(),
        reason,
    };

    let mut url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.host_str().is_none() {
        return Err(invalid("missing host".to_string()));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn reason_phrase(status: StatusCode) -> Option<String> {
    status.canonical_reason().map(str::to_string)
}

/// Empty bodies and a literal JSON `null` both decode to `None`.
fn decode_body<T: DeserializeOwned>(bytes: &[u8]) -> Result<Option<T>, serde_json::Error> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice::<Option<T>>(bytes)
}
