// Integration API: networks and WiFi broadcasts.

use tracing::debug;

use super::IntegrationClient;
use super::types::{Network, WifiBroadcast};
use crate::client::require;
use crate::error::{Error, ResultExt};
use crate::merge;
use crate::pagination::{Page, PageRequest};

impl IntegrationClient<'_> {
    // ── Networks ─────────────────────────────────────────────────────

    pub async fn list_networks(
        &self,
        site: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<Network>, Error> {
        let site = self.site(site);
        self.get_page(self.site_url(site, &["networks"]), page)
            .await
            .with_context("list_networks", || format!("site={site}"))
    }

    pub async fn get_network(
        &self,
        site: Option<&str>,
        network_id: &str,
    ) -> Result<Network, Error> {
        let site = self.site(site);
        async {
            let id = require("network_id", network_id)?;
            self.get(self.site_url(site, &["networks", id])).await
        }
        .await
        .with_context("get_network", || format!("site={site} network={network_id}"))
    }

    /// Enable or disable a network via fetch-merge-write.
    pub async fn set_network_enabled(
        &self,
        site: Option<&str>,
        network_id: &str,
        enabled: bool,
    ) -> Result<Network, Error> {
        let site = self.site(site);
        async {
            let id = require("network_id", network_id)?;
            debug!(site, network = id, enabled, "toggling network");
            self.merge_update(self.site_url(site, &["networks", id]), merge::enabled(enabled)?)
                .await
        }
        .await
        .with_context("set_network_enabled", || {
            format!("site={site} network={network_id} enabled={enabled}")
        })
    }

    // ── WiFi broadcasts ──────────────────────────────────────────────

    pub async fn list_wifi_broadcasts(
        &self,
        site: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<WifiBroadcast>, Error> {
        let site = self.site(site);
        self.get_page(self.site_url(site, &["wifi", "broadcasts"]), page)
            .await
            .with_context("list_wifi_broadcasts", || format!("site={site}"))
    }

    pub async fn get_wifi_broadcast(
        &self,
        site: Option<&str>,
        broadcast_id: &str,
    ) -> Result<WifiBroadcast, Error> {
        let site = self.site(site);
        async {
            let id = require("broadcast_id", broadcast_id)?;
            self.get(self.site_url(site, &["wifi", "broadcasts", id]))
                .await
        }
        .await
        .with_context("get_wifi_broadcast", || {
            format!("site={site} broadcast={broadcast_id}")
        })
    }

    /// Enable or disable an SSID via fetch-merge-write on
    /// `/integration/v1/sites/{site}/wifi/broadcasts/{id}`.
    pub async fn set_wifi_broadcast_enabled(
        &self,
        site: Option<&str>,
        broadcast_id: &str,
        enabled: bool,
    ) -> Result<WifiBroadcast, Error> {
        let site = self.site(site);
        async {
            let id = require("broadcast_id", broadcast_id)?;
            debug!(site, broadcast = id, enabled, "toggling wifi broadcast");
            self.merge_update(
                self.site_url(site, &["wifi", "broadcasts", id]),
                merge::enabled(enabled)?,
            )
            .await
        }
        .await
        .with_context("set_wifi_broadcast_enabled", || {
            format!("site={site} broadcast={broadcast_id} enabled={enabled}")
        })
    }
}
