// Integration API: read-only reference data.
//
// Traffic matching lists, WAN interfaces, VPN tunnels and servers, RADIUS
// profiles, and the DPI catalogue. DPI endpoints are controller-wide.

use super::IntegrationClient;
use super::types::{DpiEntry, RadiusProfile, TrafficMatchingList, VpnServer, VpnTunnel, Wan};
use crate::client::require;
use crate::error::{Error, ResultExt};
use crate::pagination::{Page, PageRequest};

impl IntegrationClient<'_> {
    // ── Traffic matching lists ───────────────────────────────────────

    pub async fn list_traffic_matching_lists(
        &self,
        site: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<TrafficMatchingList>, Error> {
        let site = self.site(site);
        self.get_page(self.site_url(site, &["traffic-matching-lists"]), page)
            .await
            .with_context("list_traffic_matching_lists", || format!("site={site}"))
    }

    pub async fn get_traffic_matching_list(
        &self,
        site: Option<&str>,
        list_id: &str,
    ) -> Result<TrafficMatchingList, Error> {
        let site = self.site(site);
        async {
            let id = require("list_id", list_id)?;
            self.get(self.site_url(site, &["traffic-matching-lists", id]))
                .await
        }
        .await
        .with_context("get_traffic_matching_list", || {
            format!("site={site} list={list_id}")
        })
    }

    // ── WAN / VPN ────────────────────────────────────────────────────

    pub async fn list_wans(
        &self,
        site: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<Wan>, Error> {
        let site = self.site(site);
        self.get_page(self.site_url(site, &["wans"]), page)
            .await
            .with_context("list_wans", || format!("site={site}"))
    }

    /// `GET /integration/v1/sites/{site}/vpn/site-to-site-tunnels`
    pub async fn list_vpn_tunnels(
        &self,
        site: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<VpnTunnel>, Error> {
        let site = self.site(site);
        self.get_page(self.site_url(site, &["vpn", "site-to-site-tunnels"]), page)
            .await
            .with_context("list_vpn_tunnels", || format!("site={site}"))
    }

    pub async fn list_vpn_servers(
        &self,
        site: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<VpnServer>, Error> {
        let site = self.site(site);
        self.get_page(self.site_url(site, &["vpn", "servers"]), page)
            .await
            .with_context("list_vpn_servers", || format!("site={site}"))
    }

    // ── RADIUS ───────────────────────────────────────────────────────

    pub async fn list_radius_profiles(
        &self,
        site: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<RadiusProfile>, Error> {
        let site = self.site(site);
        self.get_page(self.site_url(site, &["radius", "profiles"]), page)
            .await
            .with_context("list_radius_profiles", || format!("site={site}"))
    }

    // ── DPI ──────────────────────────────────────────────────────────

    /// `GET /integration/v1/dpi/categories`
    pub async fn list_dpi_categories(&self, page: PageRequest) -> Result<Page<DpiEntry>, Error> {
        self.get_page(self.url(&["dpi", "categories"]), page)
            .await
            .context("list_dpi_categories", "controller")
    }

    /// `GET /integration/v1/dpi/applications`
    pub async fn list_dpi_applications(&self, page: PageRequest) -> Result<Page<DpiEntry>, Error> {
        self.get_page(self.url(&["dpi", "applications"]), page)
            .await
            .context("list_dpi_applications", "controller")
    }
}
