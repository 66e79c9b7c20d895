// Single HTTP execution primitive shared by both dialects.
//
// Builds the reqwest client (TLS policy, timeout, default headers), sends one
// request, reads the body under a byte cap, and classifies the status code.
// Envelope decoding happens one layer up.

use std::path::PathBuf;
use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE, ETAG, HeaderMap, HeaderValue, IF_MATCH};
use reqwest::{Method, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;

/// Default overall request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default cap on response body bytes.
pub const DEFAULT_MAX_RESPONSE_BYTES: usize = 8 * 1024 * 1024;

const API_KEY_HEADER: &str = "X-API-Key";

/// TLS verification mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsMode {
    /// Use the system certificate store.
    #[default]
    System,
    /// Trust an additional CA certificate from the given PEM file.
    CustomCa(PathBuf),
    /// Accept any certificate (self-signed on-appliance certificates).
    DangerAcceptInvalid,
}

/// Timeout, TLS, and response-size policy for the HTTP transport.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub tls: TlsMode,
    pub timeout: Duration,
    pub max_response_bytes: usize,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            tls: TlsMode::System,
            timeout: DEFAULT_TIMEOUT,
            max_response_bytes: DEFAULT_MAX_RESPONSE_BYTES,
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` that sends the API key and
    /// `Accept: application/json` on every request.
    fn build_client(&self, api_key: &SecretString) -> Result<reqwest::Client, Error> {
        let mut headers = HeaderMap::new();
        let mut key_value = HeaderValue::from_str(api_key.expose_secret())
            .map_err(|_| Error::Validation("API key contains invalid header characters".into()))?;
        key_value.set_sensitive(true);
        headers.insert(API_KEY_HEADER, key_value);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("unibridge/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers);

        match &self.tls {
            TlsMode::System => {}
            TlsMode::CustomCa(path) => {
                let cert_pem = std::fs::read(path)
                    .map_err(|e| Error::Tls(format!("failed to read CA cert: {e}")))?;
                let cert = reqwest::Certificate::from_pem(&cert_pem)
                    .map_err(|e| Error::Tls(format!("invalid CA cert: {e}")))?;
                builder = builder.add_root_certificate(cert);
            }
            TlsMode::DangerAcceptInvalid => {
                builder = builder.danger_accept_invalid_certs(true);
            }
        }

        builder
            .build()
            .map_err(|e| Error::Tls(format!("failed to build HTTP client: {e}")))
    }
}

// ── Request / response ───────────────────────────────────────────────

/// One outgoing request. The body is pre-serialized so that encoding
/// failures surface before anything is sent.
#[derive(Debug, Clone)]
pub(crate) struct Request {
    method: Method,
    url: Url,
    body: Option<Vec<u8>>,
    if_match: Option<String>,
}

impl Request {
    pub(crate) fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            body: None,
            if_match: None,
        }
    }

    pub(crate) fn get(url: Url) -> Self {
        Self::new(Method::GET, url)
    }

    pub(crate) fn json(mut self, body: &(impl Serialize + ?Sized)) -> Result<Self, Error> {
        self.body = Some(serde_json::to_vec(body).map_err(Error::Encode)?);
        Ok(self)
    }

    pub(crate) fn if_match(mut self, etag: Option<String>) -> Self {
        self.if_match = etag;
        self
    }

    pub(crate) fn has_precondition(&self) -> bool {
        self.if_match.is_some()
    }
}

/// Raw 2xx response: body bytes plus the entity tag, if the controller sent one.
#[derive(Debug, Clone)]
pub(crate) struct RawResponse {
    pub(crate) body: Vec<u8>,
    pub(crate) etag: Option<String>,
}

// ── Transport ────────────────────────────────────────────────────────

/// Executes requests against the controller. Cheap to clone; the
/// underlying connection pool is shared.
#[derive(Clone)]
pub(crate) struct Transport {
    http: reqwest::Client,
    max_response_bytes: usize,
}

impl Transport {
    pub(crate) fn new(config: &TransportConfig, api_key: &SecretString) -> Result<Self, Error> {
        Ok(Self {
            http: config.build_client(api_key)?,
            max_response_bytes: config.max_response_bytes,
        })
    }

    /// Send one request. Never retries.
    ///
    /// Status outside [200, 300) becomes [`Error::HttpStatus`] with the body
    /// text preserved; reqwest failures (including the configured timeout)
    /// become [`Error::Transport`].
    pub(crate) async fn execute(&self, request: Request) -> Result<RawResponse, Error> {
        let Request {
            method,
            url,
            body,
            if_match,
        } = request;
        debug!("{method} {url}");

        let mut builder = self.http.request(method, url);
        if let Some(body) = body {
            builder = builder
                .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
                .body(body);
        }
        if let Some(etag) = if_match {
            builder = builder.header(IF_MATCH, etag);
        }

        let resp = builder.send().await?;
        let status = resp.status();
        let etag = resp
            .headers()
            .get(ETAG)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        if !status.is_success() {
            return Err(self.status_error(status, resp).await);
        }

        let body = read_capped(resp, self.max_response_bytes).await?;
        trace!(status = status.as_u16(), bytes = body.len(), "response received");
        Ok(RawResponse { body, etag })
    }

    async fn status_error(&self, status: StatusCode, resp: reqwest::Response) -> Error {
        let (bytes, truncated) = read_prefix(resp, self.max_response_bytes).await;
        let mut body = String::from_utf8_lossy(&bytes).into_owned();
        if truncated {
            body.push_str(TRUNCATED_MARKER);
        }
        Error::HttpStatus {
            status: status.as_u16(),
            body,
        }
    }
}

/// Appended to an error body cut off at the byte cap.
const TRUNCATED_MARKER: &str = " [truncated]";

/// Read at most `limit` bytes of an error body. A read failure keeps what
/// arrived so far. The flag reports whether anything was cut.
async fn read_prefix(mut resp: reqwest::Response, limit: usize) -> (Vec<u8>, bool) {
    let mut body = Vec::new();
    while let Ok(Some(chunk)) = resp.chunk().await {
        let room = limit - body.len();
        if chunk.len() > room {
            body.extend_from_slice(&chunk[..room]);
            return (body, true);
        }
        body.extend_from_slice(&chunk);
    }
    (body, false)
}

/// Read the body chunk by chunk, failing as soon as it exceeds `limit`.
async fn read_capped(mut resp: reqwest::Response, limit: usize) -> Result<Vec<u8>, Error> {
    if let Some(declared) = resp.content_length() {
        let fits = usize::try_from(declared).is_ok_and(|len| len <= limit);
        if !fits {
            return Err(Error::ResponseTooLarge { limit });
        }
    }

    let mut body = Vec::new();
    while let Some(chunk) = resp.chunk().await? {
        if body.len() + chunk.len() > limit {
            return Err(Error::ResponseTooLarge { limit });
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}
