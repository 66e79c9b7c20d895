// Legacy API (`/api/s/{site}/...`).
//
// Every response is wrapped in `{ data: [...], meta: { rc, msg } }` and a
// logical failure can arrive with HTTP 200, so the envelope is always
// checked. Endpoint families are inherent methods on `LegacyClient`, one
// file per family.

mod clients;
mod config;
mod devices;
mod stats;

pub mod models;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::trace;
use url::Url;

use crate::client::{Client, require};
use crate::error::Error;
use crate::integration::decode_single;
use crate::transport::Request;

/// Legacy-dialect view of a [`Client`].
#[derive(Debug, Clone, Copy)]
pub struct LegacyClient<'a> {
    client: &'a Client,
}

impl<'a> LegacyClient<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    fn site<'s>(&'s self, site: Option<&'s str>) -> &'s str {
        self.client.resolve_site(site)
    }

    /// `{base}/api/s/{site}/{path...}`
    fn site_url(&self, site: &str, path: &[&str]) -> Url {
        let segments: Vec<&str> = ["api", "s", site]
            .into_iter()
            .chain(path.iter().copied())
            .collect();
        self.client.url(&segments)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// GET and unwrap `data`.
    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<Vec<T>, Error> {
        let resp = self.client.execute(Request::get(url.clone())).await?;
        decode_legacy(&resp.body, &url)
    }

    /// POST a body and unwrap `data`.
    async fn post<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &(impl Serialize + Sync + ?Sized),
    ) -> Result<Vec<T>, Error> {
        let request = Request::new(Method::POST, url.clone()).json(body)?;
        let resp = self.client.execute(request).await?;
        decode_legacy(&resp.body, &url)
    }

    /// PUT a body and unwrap `data`.
    async fn put<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &(impl Serialize + Sync + ?Sized),
    ) -> Result<Vec<T>, Error> {
        let request = Request::new(Method::PUT, url.clone()).json(body)?;
        let resp = self.client.execute(request).await?;
        decode_legacy(&resp.body, &url)
    }

    /// POST a `cmd/*` body where only `meta.rc` matters.
    async fn command(
        &self,
        url: Url,
        body: &(impl Serialize + Sync + ?Sized),
    ) -> Result<(), Error> {
        let request = Request::new(Method::POST, url.clone()).json(body)?;
        let resp = self.client.execute(request).await?;
        check_legacy_rc(&resp.body, &url)
    }
}

// ── Envelope codec ───────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
struct Meta {
    #[serde(default)]
    rc: Option<String>,
    #[serde(default)]
    msg: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default = "Vec::new")]
    data: Vec<T>,
    #[serde(default)]
    meta: Meta,
}

#[derive(Debug, Deserialize)]
struct MetaOnly {
    #[serde(default)]
    meta: Meta,
}

/// UniFi OS wraps some errors as `{"error":{"code":N,"message":"..."}}`
/// with HTTP 200.
#[derive(Debug, Deserialize)]
struct UnifiOsError {
    #[serde(default)]
    error: Option<UnifiOsErrorInner>,
}

#[derive(Debug, Deserialize)]
struct UnifiOsErrorInner {
    #[serde(default)]
    code: Option<serde_json::Value>,
    #[serde(default)]
    message: Option<String>,
}

fn unifi_os_error(body: &[u8]) -> Option<Error> {
    let inner = serde_json::from_slice::<UnifiOsError>(body).ok()?.error?;
    let code = match inner.code {
        Some(serde_json::Value::String(s)) => s,
        Some(other) => other.to_string(),
        None => "unifi_os".into(),
    };
    Some(Error::Controller {
        code,
        message: inner.message.unwrap_or_default(),
    })
}

/// `rc` absent, empty, or `"ok"` is success.
fn check_meta(meta: Meta) -> Result<(), Error> {
    match meta.rc.as_deref() {
        None | Some("" | "ok") => Ok(()),
        Some(rc) => {
            trace!(rc, "legacy envelope reported failure");
            Err(Error::Controller {
                code: rc.to_owned(),
                message: meta.msg.unwrap_or_else(|| format!("rc={rc}")),
            })
        }
    }
}

/// Decode `{data, meta}` and return `data`, or the controller's rejection.
pub(crate) fn decode_legacy<T: DeserializeOwned>(body: &[u8], url: &Url) -> Result<Vec<T>, Error> {
    if let Some(err) = unifi_os_error(body) {
        return Err(err);
    }
    let envelope: Envelope<T> = decode_single(body, url)?;
    check_meta(envelope.meta)?;
    Ok(envelope.data)
}

/// Validate only `meta.rc` of a command response.
pub(crate) fn check_legacy_rc(body: &[u8], url: &Url) -> Result<(), Error> {
    if let Some(err) = unifi_os_error(body) {
        return Err(err);
    }
    let envelope: MetaOnly = decode_single(body, url)?;
    check_meta(envelope.meta)
}

/// MAC addresses are sent lowercase; an empty MAC never leaves the process.
pub(crate) fn normalize_mac(mac: &str) -> Result<String, Error> {
    Ok(require("mac", mac)?.to_ascii_lowercase())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::Value;

    use super::*;
    use crate::error::ErrorKind;

    fn url() -> Url {
        Url::parse("https://unifi.local/api/s/default/stat/sta").unwrap()
    }

    #[test]
    fn ok_envelope_yields_data() {
        let body = br#"{"meta":{"rc":"ok"},"data":[{"mac":"aa"},{"mac":"bb"}]}"#;
        let data: Vec<Value> = decode_legacy(body, &url()).unwrap();
        assert_eq!(data.len(), 2);
    }

    #[test]
    fn missing_or_empty_rc_is_success() {
        let data: Vec<Value> = decode_legacy(br#"{"data":[]}"#, &url()).unwrap();
        assert!(data.is_empty());
        check_legacy_rc(br#"{"meta":{"rc":""}}"#, &url()).unwrap();
    }

    #[test]
    fn error_rc_becomes_controller_error() {
        let body = br#"{"meta":{"rc":"error","msg":"api.err.UnknownStation"},"data":[]}"#;
        let err = check_legacy_rc(body, &url()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Controller);
        assert!(matches!(
            err,
            Error::Controller { ref code, ref message }
                if code == "error" && message == "api.err.UnknownStation"
        ));
    }

    #[test]
    fn error_rc_without_msg_reports_rc() {
        let err = decode_legacy::<Value>(br#"{"meta":{"rc":"error"}}"#, &url()).unwrap_err();
        assert!(matches!(err, Error::Controller { ref message, .. } if message == "rc=error"));
    }

    #[test]
    fn unifi_os_error_shape_is_controller_error() {
        let body = br#"{"error":{"code":403,"message":"Forbidden"}}"#;
        let err = decode_legacy::<Value>(body, &url()).unwrap_err();
        assert!(matches!(
            err,
            Error::Controller { ref code, ref message } if code == "403" && message == "Forbidden"
        ));
    }

    #[test]
    fn malformed_body_is_decode_error() {
        let err = decode_legacy::<Value>(b"<html>", &url()).unwrap_err();
        assert!(matches!(err, Error::Decode { ref path, .. } if path == "/api/s/default/stat/sta"));
    }

    #[test]
    fn mac_is_trimmed_and_lowercased() {
        assert_eq!(normalize_mac(" AA:BB:CC:00:11:22 ").unwrap(), "aa:bb:cc:00:11:22");
        assert_eq!(normalize_mac("  ").unwrap_err().kind(), ErrorKind::Validation);
    }
}
