// Legacy API client (station) endpoints
//
// Listing via stat/sta, commands via cmd/stamgr.

use serde_json::{Value, json};
use tracing::debug;

use super::models::{GuestAuthorization, LegacyClientEntry};
use super::{LegacyClient, normalize_mac};
use crate::error::{Error, ResultExt};

impl LegacyClient<'_> {
    /// List currently connected clients.
    ///
    /// `GET /api/s/{site}/stat/sta`
    pub async fn list_active_clients(
        &self,
        site: Option<&str>,
    ) -> Result<Vec<LegacyClientEntry>, Error> {
        let site = self.site(site);
        debug!(site, "listing connected clients");
        self.get(self.site_url(site, &["stat", "sta"]))
            .await
            .with_context("list_active_clients", || format!("site={site}"))
    }

    /// `POST /api/s/{site}/cmd/stamgr` with `{"cmd": "block-sta", "mac": "..."}`
    pub async fn block_client(&self, site: Option<&str>, mac: &str) -> Result<(), Error> {
        self.station_command("block_client", "block-sta", site, mac)
            .await
    }

    /// `POST /api/s/{site}/cmd/stamgr` with `{"cmd": "unblock-sta", "mac": "..."}`
    pub async fn unblock_client(&self, site: Option<&str>, mac: &str) -> Result<(), Error> {
        self.station_command("unblock_client", "unblock-sta", site, mac)
            .await
    }

    /// Disconnect a client without banning it; it may reconnect at once.
    ///
    /// `POST /api/s/{site}/cmd/stamgr` with `{"cmd": "kick-sta", "mac": "..."}`
    pub async fn kick_client(&self, site: Option<&str>, mac: &str) -> Result<(), Error> {
        self.station_command("kick_client", "kick-sta", site, mac)
            .await
    }

    /// Permanently remove the client's history from the controller.
    ///
    /// `POST /api/s/{site}/cmd/stamgr` with `{"cmd": "forget-sta", "mac": "..."}`
    pub async fn forget_client(&self, site: Option<&str>, mac: &str) -> Result<(), Error> {
        self.station_command("forget_client", "forget-sta", site, mac)
            .await
    }

    /// Authorize a guest on the hotspot portal for `auth.minutes`.
    pub async fn authorize_guest(
        &self,
        site: Option<&str>,
        mac: &str,
        auth: GuestAuthorization,
    ) -> Result<(), Error> {
        let site = self.site(site);
        async {
            let mac = normalize_mac(mac)?;
            if auth.minutes == 0 {
                return Err(Error::Validation(
                    "guest authorization needs at least 1 minute".into(),
                ));
            }
            debug!(site, mac = %mac, minutes = auth.minutes, "authorizing guest");
            self.command(self.site_url(site, &["cmd", "stamgr"]), &guest_body(&mac, auth))
                .await
        }
        .await
        .with_context("authorize_guest", || format!("site={site} mac={mac}"))
    }

    async fn station_command(
        &self,
        operation: &'static str,
        cmd: &'static str,
        site: Option<&str>,
        mac: &str,
    ) -> Result<(), Error> {
        let site = self.site(site);
        async {
            let mac = normalize_mac(mac)?;
            debug!(site, mac = %mac, cmd, "station command");
            self.command(
                self.site_url(site, &["cmd", "stamgr"]),
                &json!({
                    "cmd": cmd,
                    "mac": mac,
                }),
            )
            .await
        }
        .await
        .with_context(operation, || format!("site={site} mac={mac}"))
    }
}

fn guest_body(mac: &str, auth: GuestAuthorization) -> Value {
    let mut body = serde_json::Map::new();
    body.insert("cmd".into(), json!("authorize-guest"));
    body.insert("mac".into(), json!(mac));
    body.insert("minutes".into(), json!(auth.minutes));
    if let Some(up) = auth.up_kbps {
        body.insert("up".into(), json!(up));
    }
    if let Some(down) = auth.down_kbps {
        body.insert("down".into(), json!(down));
    }
    if let Some(quota) = auth.quota_mb {
        body.insert("bytes".into(), json!(quota));
    }
    Value::Object(body)
}
