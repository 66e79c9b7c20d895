// Legacy API REST configuration collections (rest/*).

use serde_json::json;
use tracing::debug;

use super::LegacyClient;
use super::models::{LegacyFirewallRule, PortForward, Wlan};
use crate::client::require;
use crate::error::{Error, ResultExt};

impl LegacyClient<'_> {
    /// `GET /api/s/{site}/rest/wlanconf`
    pub async fn list_wlans(&self, site: Option<&str>) -> Result<Vec<Wlan>, Error> {
        let site = self.site(site);
        self.get(self.site_url(site, &["rest", "wlanconf"]))
            .await
            .with_context("list_wlans", || format!("site={site}"))
    }

    /// Enable or disable a WLAN. Legacy REST accepts partial bodies, so only
    /// `{"enabled": ...}` is sent.
    ///
    /// `PUT /api/s/{site}/rest/wlanconf/{id}`
    pub async fn set_wlan_enabled(
        &self,
        site: Option<&str>,
        wlan_id: &str,
        enabled: bool,
    ) -> Result<Wlan, Error> {
        let site = self.site(site);
        async {
            let id = require("wlan_id", wlan_id)?;
            debug!(site, wlan = id, enabled, "toggling WLAN");
            let updated: Vec<Wlan> = self
                .put(
                    self.site_url(site, &["rest", "wlanconf", id]),
                    &json!({ "enabled": enabled }),
                )
                .await?;
            updated.into_iter().next().ok_or_else(|| Error::NotFound {
                resource: "wlan",
                id: id.to_owned(),
            })
        }
        .await
        .with_context("set_wlan_enabled", || {
            format!("site={site} wlan={wlan_id} enabled={enabled}")
        })
    }

    /// `GET /api/s/{site}/rest/portforward`
    pub async fn list_port_forwards(&self, site: Option<&str>) -> Result<Vec<PortForward>, Error> {
        let site = self.site(site);
        self.get(self.site_url(site, &["rest", "portforward"]))
            .await
            .with_context("list_port_forwards", || format!("site={site}"))
    }

    /// Rules from the pre-zone firewall. Zone-based policies live on the
    /// Integration API instead.
    ///
    /// `GET /api/s/{site}/rest/firewallrule`
    pub async fn list_legacy_firewall_rules(
        &self,
        site: Option<&str>,
    ) -> Result<Vec<LegacyFirewallRule>, Error> {
        let site = self.site(site);
        self.get(self.site_url(site, &["rest", "firewallrule"]))
            .await
            .with_context("list_legacy_firewall_rules", || format!("site={site}"))
    }
}
