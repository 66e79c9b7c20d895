// Integration API (`/integration/v1/...`).
//
// List endpoints answer with the `{data, totalCount, offset, limit, count}`
// envelope; single-object endpoints answer with the bare JSON value.
// Resource operations are inherent methods on `IntegrationClient`, split by
// resource family across the files of this module.

mod acl;
mod devices;
mod dns;
mod firewall;
mod networks;
mod reference;
mod sites;
mod vouchers;

pub mod types;

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::client::{Client, with_query};
use crate::error::Error;
use crate::merge::{self, FieldMap};
use crate::pagination::{Page, PageRequest};
use crate::transport::Request;

const PREFIX: [&str; 2] = ["integration", "v1"];

/// Integration-dialect view of a [`Client`].
#[derive(Debug, Clone, Copy)]
pub struct IntegrationClient<'a> {
    client: &'a Client,
}

impl<'a> IntegrationClient<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    fn site<'s>(&'s self, site: Option<&'s str>) -> &'s str {
        self.client.resolve_site(site)
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// `{base}/integration/v1/{path...}`
    fn url(&self, path: &[&str]) -> Url {
        let segments: Vec<&str> = PREFIX.iter().copied().chain(path.iter().copied()).collect();
        self.client.url(&segments)
    }

    /// `{base}/integration/v1/sites/{site}/{path...}`
    fn site_url(&self, site: &str, path: &[&str]) -> Url {
        let segments: Vec<&str> = PREFIX
            .iter()
            .copied()
            .chain(["sites", site])
            .chain(path.iter().copied())
            .collect();
        self.client.url(&segments)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        let resp = self.client.execute(Request::get(url.clone())).await?;
        decode_single(&resp.body, &url)
    }

    /// Validate the cursor, then GET one page.
    async fn get_page<T: DeserializeOwned>(
        &self,
        url: Url,
        page: PageRequest,
    ) -> Result<Page<T>, Error> {
        let url = with_query(url, &page.query()?);
        let resp = self.client.execute(Request::get(url.clone())).await?;
        decode_page(&resp.body, &url)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        body: &(impl Serialize + Sync + ?Sized),
    ) -> Result<T, Error> {
        let request = Request::new(method, url.clone()).json(body)?;
        let resp = self.client.execute(request).await?;
        decode_single(&resp.body, &url)
    }

    /// POST a body whose response carries nothing of interest.
    async fn post_no_response(
        &self,
        url: Url,
        body: &(impl Serialize + Sync + ?Sized),
    ) -> Result<(), Error> {
        let request = Request::new(Method::POST, url).json(body)?;
        self.client.execute(request).await?;
        Ok(())
    }

    async fn delete(&self, url: Url) -> Result<(), Error> {
        self.client
            .execute(Request::new(Method::DELETE, url))
            .await?;
        Ok(())
    }

    /// Fetch-merge-write: GET the resource as an ordered map, strip the
    /// read-only fields, overlay `changes`, and PUT the full map back.
    ///
    /// When the GET carried an `ETag` it is sent back as `If-Match`, and a
    /// 412 answer becomes [`Error::Conflict`]. Without one, a concurrent
    /// writer between the GET and the PUT is silently overwritten.
    async fn merge_update<T: DeserializeOwned>(
        &self,
        url: Url,
        changes: FieldMap,
    ) -> Result<T, Error> {
        let current = self.client.execute(Request::get(url.clone())).await?;
        let fields: FieldMap = decode_single(&current.body, &url)?;
        let body = merge::merged(fields, changes);

        let request = Request::new(Method::PUT, url.clone())
            .json(&body)?
            .if_match(current.etag);
        let guarded = request.has_precondition();

        let resp = match self.client.execute(request).await {
            Err(Error::HttpStatus { status: 412, body }) if guarded => {
                return Err(Error::Conflict {
                    message: if body.is_empty() {
                        "resource changed since it was read".into()
                    } else {
                        body
                    },
                });
            }
            other => other?,
        };
        decode_single(&resp.body, &url)
    }
}

// ── Envelope codec ───────────────────────────────────────────────────

/// Decode a bare JSON single-object body.
pub(crate) fn decode_single<T: DeserializeOwned>(body: &[u8], url: &Url) -> Result<T, Error> {
    serde_json::from_slice(body).map_err(|source| Error::Decode {
        path: url.path().to_owned(),
        source,
        body: String::from_utf8_lossy(body).into_owned(),
    })
}

/// Decode the list envelope. Missing or malformed `data` is a decode error.
pub(crate) fn decode_page<T: DeserializeOwned>(body: &[u8], url: &Url) -> Result<Page<T>, Error> {
    decode_single(body, url)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::Value;

    use super::*;

    fn url() -> Url {
        Url::parse("https://unifi.local/integration/v1/sites").unwrap()
    }

    #[test]
    fn page_decodes_counters() {
        let body = br#"{"data":[{"id":"a"}],"totalCount":3,"offset":0,"limit":1,"count":1}"#;
        let page: Page<Value> = decode_page(body, &url()).unwrap();
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.total_count, 3);
        assert_eq!(page.count, 1);
    }

    #[test]
    fn page_without_data_is_a_decode_error() {
        let err = decode_page::<Value>(br#"{"totalCount":0}"#, &url()).unwrap_err();
        assert!(matches!(err, Error::Decode { ref path, .. } if path == "/integration/v1/sites"));
    }

    #[test]
    fn page_with_malformed_data_is_a_decode_error() {
        let err = decode_page::<Value>(br#"{"data":"oops","totalCount":1}"#, &url()).unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
    }

    #[test]
    fn non_object_merge_source_is_a_decode_error() {
        let err = decode_single::<FieldMap>(b"[1,2,3]", &url()).unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
    }
}
