// Integration API: firewall policies and zones.
//
// Policies only support toggling and deletion here; zones support full CRUD
// plus a merge-based partial update.

use reqwest::Method;
use tracing::debug;

use super::IntegrationClient;
use super::types::{FirewallPolicy, FirewallZone, FirewallZonePatch, FirewallZoneRequest};
use crate::client::require;
use crate::error::{Error, ResultExt};
use crate::merge::{self, FieldMap};
use crate::pagination::{Page, PageRequest};

impl IntegrationClient<'_> {
    // ── Policies ─────────────────────────────────────────────────────

    pub async fn list_firewall_policies(
        &self,
        site: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<FirewallPolicy>, Error> {
        let site = self.site(site);
        self.get_page(self.site_url(site, &["firewall", "policies"]), page)
            .await
            .with_context("list_firewall_policies", || format!("site={site}"))
    }

    pub async fn get_firewall_policy(
        &self,
        site: Option<&str>,
        policy_id: &str,
    ) -> Result<FirewallPolicy, Error> {
        let site = self.site(site);
        async {
            let id = require("policy_id", policy_id)?;
            self.get(self.site_url(site, &["firewall", "policies", id]))
                .await
        }
        .await
        .with_context("get_firewall_policy", || {
            format!("site={site} policy={policy_id}")
        })
    }

    /// Enable or disable a policy via fetch-merge-write. Every field the
    /// controller returned, other than `id` and `metadata`, is sent back
    /// unchanged.
    pub async fn set_firewall_policy_enabled(
        &self,
        site: Option<&str>,
        policy_id: &str,
        enabled: bool,
    ) -> Result<FirewallPolicy, Error> {
        let site = self.site(site);
        async {
            let id = require("policy_id", policy_id)?;
            debug!(site, policy = id, enabled, "toggling firewall policy");
            self.merge_update(
                self.site_url(site, &["firewall", "policies", id]),
                merge::enabled(enabled)?,
            )
            .await
        }
        .await
        .with_context("set_firewall_policy_enabled", || {
            format!("site={site} policy={policy_id} enabled={enabled}")
        })
    }

    pub async fn delete_firewall_policy(
        &self,
        site: Option<&str>,
        policy_id: &str,
    ) -> Result<(), Error> {
        let site = self.site(site);
        async {
            let id = require("policy_id", policy_id)?;
            debug!(site, policy = id, "deleting firewall policy");
            self.delete(self.site_url(site, &["firewall", "policies", id]))
                .await
        }
        .await
        .with_context("delete_firewall_policy", || {
            format!("site={site} policy={policy_id}")
        })
    }

    // ── Zones ────────────────────────────────────────────────────────

    pub async fn list_firewall_zones(
        &self,
        site: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<FirewallZone>, Error> {
        let site = self.site(site);
        self.get_page(self.site_url(site, &["firewall", "zones"]), page)
            .await
            .with_context("list_firewall_zones", || format!("site={site}"))
    }

    pub async fn get_firewall_zone(
        &self,
        site: Option<&str>,
        zone_id: &str,
    ) -> Result<FirewallZone, Error> {
        let site = self.site(site);
        async {
            let id = require("zone_id", zone_id)?;
            self.get(self.site_url(site, &["firewall", "zones", id]))
                .await
        }
        .await
        .with_context("get_firewall_zone", || format!("site={site} zone={zone_id}"))
    }

    pub async fn create_firewall_zone(
        &self,
        site: Option<&str>,
        request: &FirewallZoneRequest,
    ) -> Result<FirewallZone, Error> {
        let site = self.site(site);
        async {
            require("name", &request.name)?;
            debug!(site, name = %request.name, "creating firewall zone");
            self.send(
                Method::POST,
                self.site_url(site, &["firewall", "zones"]),
                request,
            )
            .await
        }
        .await
        .with_context("create_firewall_zone", || {
            format!("site={site} name={}", request.name)
        })
    }

    /// Full replacement: fields not in `request` are reset by the controller.
    /// Use [`IntegrationClient::patch_firewall_zone`] to change one field.
    pub async fn update_firewall_zone(
        &self,
        site: Option<&str>,
        zone_id: &str,
        request: &FirewallZoneRequest,
    ) -> Result<FirewallZone, Error> {
        let site = self.site(site);
        async {
            let id = require("zone_id", zone_id)?;
            require("name", &request.name)?;
            self.send(
                Method::PUT,
                self.site_url(site, &["firewall", "zones", id]),
                request,
            )
            .await
        }
        .await
        .with_context("update_firewall_zone", || {
            format!("site={site} zone={zone_id}")
        })
    }

    /// Change only the supplied fields of a zone via fetch-merge-write.
    pub async fn patch_firewall_zone(
        &self,
        site: Option<&str>,
        zone_id: &str,
        patch: &FirewallZonePatch,
    ) -> Result<FirewallZone, Error> {
        let site = self.site(site);
        async {
            let id = require("zone_id", zone_id)?;
            let changes = zone_changes(patch)?;
            debug!(site, zone = id, fields = changes.len(), "patching firewall zone");
            self.merge_update(self.site_url(site, &["firewall", "zones", id]), changes)
                .await
        }
        .await
        .with_context("patch_firewall_zone", || format!("site={site} zone={zone_id}"))
    }

    pub async fn delete_firewall_zone(
        &self,
        site: Option<&str>,
        zone_id: &str,
    ) -> Result<(), Error> {
        let site = self.site(site);
        async {
            let id = require("zone_id", zone_id)?;
            debug!(site, zone = id, "deleting firewall zone");
            self.delete(self.site_url(site, &["firewall", "zones", id]))
                .await
        }
        .await
        .with_context("delete_firewall_zone", || format!("site={site} zone={zone_id}"))
    }
}

fn zone_changes(patch: &FirewallZonePatch) -> Result<FieldMap, Error> {
    let changes = merge::changes(patch)?;
    if changes.is_empty() {
        return Err(Error::Validation(
            "zone patch must set at least one field".into(),
        ));
    }
    Ok(changes)
}
