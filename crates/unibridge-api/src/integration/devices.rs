// Integration API: devices, device tags, clients and site statistics.

use serde::Serialize;
use tracing::debug;

use super::IntegrationClient;
use super::types::{
    ClientStatistics, Device, DeviceStatistics, DeviceTag, KnownClient, NetworkClient,
    PendingDevice, SiteStatistics,
};
use crate::client::require;
use crate::error::{Error, ResultExt};
use crate::pagination::{Page, PageRequest};

#[derive(Serialize)]
struct ActionBody<'a> {
    action: &'a str,
}

impl IntegrationClient<'_> {
    // ── Devices ──────────────────────────────────────────────────────

    pub async fn list_devices(
        &self,
        site: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<Device>, Error> {
        let site = self.site(site);
        self.get_page(self.site_url(site, &["devices"]), page)
            .await
            .with_context("list_devices", || format!("site={site}"))
    }

    pub async fn get_device(&self, site: Option<&str>, device_id: &str) -> Result<Device, Error> {
        let site = self.site(site);
        async {
            let id = require("device_id", device_id)?;
            self.get(self.site_url(site, &["devices", id])).await
        }
        .await
        .with_context("get_device", || format!("site={site} device={device_id}"))
    }

    /// `GET /integration/v1/sites/{site}/devices/{id}/statistics/latest`
    pub async fn get_device_statistics(
        &self,
        site: Option<&str>,
        device_id: &str,
    ) -> Result<DeviceStatistics, Error> {
        let site = self.site(site);
        async {
            let id = require("device_id", device_id)?;
            self.get(self.site_url(site, &["devices", id, "statistics", "latest"]))
                .await
        }
        .await
        .with_context("get_device_statistics", || format!("site={site} device={device_id}"))
    }

    /// `POST /integration/v1/sites/{site}/devices/{id}/actions` with
    /// `{"action": "RESTART"}`
    pub async fn restart_device(&self, site: Option<&str>, device_id: &str) -> Result<(), Error> {
        let site = self.site(site);
        async {
            let id = require("device_id", device_id)?;
            debug!(site, device = id, "restarting device");
            self.post_no_response(
                self.site_url(site, &["devices", id, "actions"]),
                &ActionBody { action: "RESTART" },
            )
            .await
        }
        .await
        .with_context("restart_device", || format!("site={site} device={device_id}"))
    }

    /// `POST .../devices/{id}/interfaces/ports/{idx}/actions` with
    /// `{"action": "POWER_CYCLE"}`. Port indexes start at 1.
    pub async fn power_cycle_port(
        &self,
        site: Option<&str>,
        device_id: &str,
        port_idx: u32,
    ) -> Result<(), Error> {
        let site = self.site(site);
        async {
            let id = require("device_id", device_id)?;
            if port_idx == 0 {
                return Err(Error::Validation("port index must be at least 1".into()));
            }
            let port = port_idx.to_string();
            debug!(site, device = id, port_idx, "power-cycling port");
            self.post_no_response(
                self.site_url(
                    site,
                    &["devices", id, "interfaces", "ports", &port, "actions"],
                ),
                &ActionBody {
                    action: "POWER_CYCLE",
                },
            )
            .await
        }
        .await
        .with_context("power_cycle_port", || {
            format!("site={site} device={device_id} port={port_idx}")
        })
    }

    /// `GET /integration/v1/pending-devices`. Not site-scoped.
    pub async fn list_pending_devices(
        &self,
        page: PageRequest,
    ) -> Result<Page<PendingDevice>, Error> {
        self.get_page(self.url(&["pending-devices"]), page)
            .await
            .context("list_pending_devices", "controller")
    }

    pub async fn list_device_tags(
        &self,
        site: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<DeviceTag>, Error> {
        let site = self.site(site);
        self.get_page(self.site_url(site, &["device-tags"]), page)
            .await
            .with_context("list_device_tags", || format!("site={site}"))
    }

    // ── Clients ──────────────────────────────────────────────────────

    pub async fn list_clients(
        &self,
        site: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<NetworkClient>, Error> {
        let site = self.site(site);
        self.get_page(self.site_url(site, &["clients"]), page)
            .await
            .with_context("list_clients", || format!("site={site}"))
    }

    pub async fn get_client(
        &self,
        site: Option<&str>,
        client_id: &str,
    ) -> Result<NetworkClient, Error> {
        let site = self.site(site);
        async {
            let id = require("client_id", client_id)?;
            self.get(self.site_url(site, &["clients", id])).await
        }
        .await
        .with_context("get_client", || format!("site={site} client={client_id}"))
    }

    /// Every client the site has recorded, including disconnected ones.
    pub async fn list_known_clients(
        &self,
        site: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<KnownClient>, Error> {
        let site = self.site(site);
        self.get_page(self.site_url(site, &["clients", "history"]), page)
            .await
            .with_context("list_known_clients", || format!("site={site}"))
    }

    pub async fn get_client_statistics(
        &self,
        site: Option<&str>,
        client_id: &str,
    ) -> Result<ClientStatistics, Error> {
        let site = self.site(site);
        async {
            let id = require("client_id", client_id)?;
            self.get(self.site_url(site, &["statistics", "clients", id]))
                .await
        }
        .await
        .with_context("get_client_statistics", || {
            format!("site={site} client={client_id}")
        })
    }

    // ── Site statistics ──────────────────────────────────────────────

    pub async fn get_site_statistics(&self, site: Option<&str>) -> Result<SiteStatistics, Error> {
        let site = self.site(site);
        self.get(self.site_url(site, &["statistics", "site"]))
            .await
            .with_context("get_site_statistics", || format!("site={site}"))
    }
}
