// Integration API: application info and sites.
//
// The controller has no get-by-ID endpoint for sites, so `get_site` pages
// through the site list until it finds a match.

use tracing::debug;

use super::IntegrationClient;
use super::types::{ApplicationInfo, Site};
use crate::error::{Error, ResultExt};
use crate::pagination::{self, DEFAULT_SCAN_PAGE_SIZE, Page, PageRequest};

impl IntegrationClient<'_> {
    /// `GET /integration/v1/info`
    pub async fn get_info(&self) -> Result<ApplicationInfo, Error> {
        self.get(self.url(&["info"]))
            .await
            .context("get_info", "controller")
    }

    /// `GET /integration/v1/sites`
    pub async fn list_sites(&self, page: PageRequest) -> Result<Page<Site>, Error> {
        self.get_page(self.url(&["sites"]), page)
            .await
            .with_context("list_sites", || format!("offset={} limit={}", page.offset, page.limit))
    }

    /// Every site visible to the API key.
    pub async fn list_all_sites(&self) -> Result<Vec<Site>, Error> {
        pagination::collect_all(DEFAULT_SCAN_PAGE_SIZE, |page| {
            self.get_page(self.url(&["sites"]), page)
        })
        .await
        .context("list_all_sites", "controller")
    }

    /// Look up one site by ID, falling back to the default site.
    ///
    /// Scans `GET /integration/v1/sites` page by page; returns [`Error::NotFound`] once
    /// the list is exhausted without a match.
    pub async fn get_site(&self, site: Option<&str>) -> Result<Site, Error> {
        let site = self.client.resolve_site(site);
        debug!(site, "resolving site by scan");
        pagination::scan_for_id("site", site, DEFAULT_SCAN_PAGE_SIZE, |page| {
            self.get_page(self.url(&["sites"]), page)
        })
        .await
        .with_context("get_site", || format!("site={site}"))
    }
}
