// Controller client: configuration, site scoping, and URL construction.
//
// Resource operations live on two borrowed views, `IntegrationClient` and
// `LegacyClient`, so every call site is statically bound to one dialect's
// path layout and envelope rules.

use std::fmt;

use secrecy::SecretString;
use url::Url;

use crate::error::Error;
use crate::integration::IntegrationClient;
use crate::legacy::LegacyClient;
use crate::transport::{Request, Transport, TransportConfig};

/// Everything needed to construct a [`Client`].
///
/// `base_url` is the Network application root, e.g.
/// `https://192.168.1.1/proxy/network` on UniFi OS or
/// `https://controller:8443` on a standalone controller.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: Url,
    pub api_key: SecretString,
    pub default_site: String,
    pub transport: TransportConfig,
}

/// Async client for a UniFi Network controller.
///
/// Immutable after construction and cheap to clone; share it across tasks
/// freely. Dropping an operation's future aborts its in-flight request.
#[derive(Clone)]
pub struct Client {
    base_url: Url,
    default_site: String,
    transport: Transport,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url.as_str())
            .field("default_site", &self.default_site)
            .finish_non_exhaustive()
    }
}

impl Client {
    // ── Constructors ─────────────────────────────────────────────────

    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        let ClientConfig {
            base_url,
            api_key,
            default_site,
            transport,
        } = config;

        if !matches!(base_url.scheme(), "http" | "https") || base_url.cannot_be_a_base() {
            return Err(Error::Validation(format!(
                "base URL must be an http(s) URL, got {base_url}"
            )));
        }
        if default_site.trim().is_empty() {
            return Err(Error::Validation("default site is required".into()));
        }
        if secrecy::ExposeSecret::expose_secret(&api_key).is_empty() {
            return Err(Error::Validation("API key is required".into()));
        }

        let transport = Transport::new(&transport, &api_key)?;
        Ok(Self {
            base_url,
            default_site,
            transport,
        })
    }

    /// Parse `base_url` and build a client with default transport settings.
    pub fn from_parts(
        base_url: &str,
        api_key: SecretString,
        default_site: impl Into<String>,
    ) -> Result<Self, Error> {
        Self::new(ClientConfig {
            base_url: Url::parse(base_url)?,
            api_key,
            default_site: default_site.into(),
            transport: TransportConfig::default(),
        })
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn default_site(&self) -> &str {
        &self.default_site
    }

    /// Operations on the Integration API (`/integration/v1`).
    pub fn integration(&self) -> IntegrationClient<'_> {
        IntegrationClient::new(self)
    }

    /// Operations on the Legacy API (`/api/s/{site}`).
    pub fn legacy(&self) -> LegacyClient<'_> {
        LegacyClient::new(self)
    }

    // ── Site scoping ─────────────────────────────────────────────────

    /// Effective site for a call: `site` if non-empty, else the default.
    ///
    /// Never consults the controller.
    pub fn resolve_site<'a>(&'a self, site: Option<&'a str>) -> &'a str {
        match site {
            Some(s) if !s.is_empty() => s,
            _ => &self.default_site,
        }
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Append path segments to the base URL. Each segment is
    /// percent-encoded, so IDs cannot escape their path position.
    pub(crate) fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // base_url is checked to be a base URL in `new`.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub(crate) async fn execute(
        &self,
        request: Request,
    ) -> Result<crate::transport::RawResponse, Error> {
        self.transport.execute(request).await
    }
}

/// Append query parameters, leaving the URL untouched when there are none.
pub(crate) fn with_query(mut url: Url, params: &[(&str, String)]) -> Url {
    if !params.is_empty() {
        url.query_pairs_mut().extend_pairs(params);
    }
    url
}

/// Reject an empty required argument before any request is built.
pub(crate) fn require<'a>(field: &str, value: &'a str) -> Result<&'a str, Error> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::Validation(format!("{field} is required")));
    }
    Ok(trimmed)
}
