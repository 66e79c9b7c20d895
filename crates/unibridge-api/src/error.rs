use std::fmt;

use thiserror::Error;

/// Top-level error type for the `unibridge-api` crate.
///
/// Both controller dialects report failures through this one enum. Callers
/// that need to branch on the failure class should use [`Error::kind`], which
/// sees through the operation context attached by every public method.
#[derive(Debug, Error)]
pub enum Error {
    // ── Caller input ────────────────────────────────────────────────
    /// A local precondition failed (negative pagination, missing ID, ...).
    /// Never reaches the network.
    #[error("Invalid argument: {0}")]
    Validation(String),

    /// A request body could not be serialized.
    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// The configured base URL is unusable.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, ...).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// TLS setup error (unreadable or invalid CA bundle).
    #[error("TLS error: {0}")]
    Tls(String),

    /// The response body exceeded the configured byte cap.
    #[error("Response body exceeded the {limit}-byte limit")]
    ResponseTooLarge { limit: usize },

    // ── Controller responses ────────────────────────────────────────
    /// Non-2xx HTTP status. The body is kept for diagnostics.
    #[error("Controller returned HTTP {status}: {}", preview(.body))]
    HttpStatus { status: u16, body: String },

    /// The body did not match the expected shape.
    #[error("Failed to decode response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
        body: String,
    },

    /// Logical failure reported inside a 2xx envelope (legacy `meta.rc`,
    /// UniFi OS `{"error": {...}}`).
    #[error("Controller rejected the request ({code}): {message}")]
    Controller { code: String, message: String },

    /// Exhaustive scan completed without finding the requested item.
    #[error("{resource} '{id}' not found")]
    NotFound { resource: &'static str, id: String },

    /// Optimistic-concurrency precondition failed on a merge write.
    #[error("Conflicting update: {message}")]
    Conflict { message: String },

    // ── Context ─────────────────────────────────────────────────────
    /// Operation name and scoping parameters wrapped around the first
    /// error an operation hit. Does not change [`Error::kind`].
    #[error("{operation} [{scope}]: {source}")]
    Context {
        operation: &'static str,
        scope: String,
        source: Box<Error>,
    },
}

/// Coarse failure class, stable across dialects and context wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    Transport,
    HttpStatus,
    Decode,
    Controller,
    NotFound,
    Conflict,
}

impl Error {
    /// Classify this error, looking through any number of context layers.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) | Self::Encode(_) | Self::InvalidUrl(_) => ErrorKind::Validation,
            Self::Transport(_) | Self::Tls(_) | Self::ResponseTooLarge { .. } => {
                ErrorKind::Transport
            }
            Self::HttpStatus { .. } => ErrorKind::HttpStatus,
            Self::Decode { .. } => ErrorKind::Decode,
            Self::Controller { .. } => ErrorKind::Controller,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Conflict { .. } => ErrorKind::Conflict,
            Self::Context { source, .. } => source.kind(),
        }
    }

    /// The innermost error, with all context layers removed.
    pub fn root(&self) -> &Self {
        match self {
            Self::Context { source, .. } => source.root(),
            other => other,
        }
    }

    /// The operation name from the outermost context layer, if any.
    pub fn operation(&self) -> Option<&'static str> {
        match self {
            Self::Context { operation, .. } => Some(*operation),
            _ => None,
        }
    }

    /// HTTP status, if the controller answered with a non-2xx response.
    pub fn status(&self) -> Option<u16> {
        match self.root() {
            Self::HttpStatus { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` for scan misses and HTTP 404 responses.
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound || self.status() == Some(404)
    }

    /// Returns `true` if the request timed out in transport.
    pub fn is_timeout(&self) -> bool {
        matches!(self.root(), Self::Transport(e) if e.is_timeout())
    }

    /// Message and code from an Integration API error body
    /// (`{"message": "...", "code": "..."}`), when the body has that shape.
    pub fn api_message(&self) -> Option<ApiErrorBody> {
        match self.root() {
            Self::HttpStatus { body, .. } => serde_json::from_str(body).ok(),
            _ => None,
        }
    }
}

/// Error response shape from the Integration API.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

/// Attach an operation name and its scoping parameters to an error.
pub trait ResultExt<T> {
    fn context(self, operation: &'static str, scope: impl fmt::Display) -> Result<T, Error>;

    /// Like [`ResultExt::context`], building the scope only on failure.
    fn with_context<F>(self, operation: &'static str, scope: F) -> Result<T, Error>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T, Error> {
    fn context(self, operation: &'static str, scope: impl fmt::Display) -> Result<T, Error> {
        self.with_context(operation, || scope.to_string())
    }

    fn with_context<F>(self, operation: &'static str, scope: F) -> Result<T, Error>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|source| Error::Context {
            operation,
            scope: scope(),
            source: Box::new(source),
        })
    }
}

fn preview(body: &str) -> &str {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body;
    }
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}
