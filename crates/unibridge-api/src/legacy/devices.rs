// Legacy API device commands
//
// Everything goes through cmd/devmgr. Devices are addressed by MAC here,
// not by the Integration API's device ID.

use serde_json::json;
use tracing::debug;

use super::models::SpeedTestStatus;
use super::{LegacyClient, normalize_mac};
use crate::error::{Error, ResultExt};

impl LegacyClient<'_> {
    /// `POST /api/s/{site}/cmd/devmgr` with `{"cmd": "restart", "mac": "..."}`
    pub async fn legacy_restart_device(&self, site: Option<&str>, mac: &str) -> Result<(), Error> {
        self.device_command("legacy_restart_device", "restart", site, mac)
            .await
    }

    /// Toggle the LED locator: `set-locate` when `enable`, else `unset-locate`.
    pub async fn locate_device(
        &self,
        site: Option<&str>,
        mac: &str,
        enable: bool,
    ) -> Result<(), Error> {
        let cmd = if enable { "set-locate" } else { "unset-locate" };
        self.device_command("locate_device", cmd, site, mac).await
    }

    /// Upgrade firmware from Ubiquiti's cloud, or from `firmware_url`
    /// (`upgrade-external`) when given.
    pub async fn upgrade_device(
        &self,
        site: Option<&str>,
        mac: &str,
        firmware_url: Option<&str>,
    ) -> Result<(), Error> {
        let site = self.site(site);
        async {
            let mac = normalize_mac(mac)?;
            debug!(site, mac = %mac, ?firmware_url, "upgrading device firmware");
            let body = match firmware_url.map(str::trim).filter(|u| !u.is_empty()) {
                Some(url) => json!({
                    "cmd": "upgrade-external",
                    "mac": mac,
                    "url": url,
                }),
                None => json!({
                    "cmd": "upgrade",
                    "mac": mac,
                }),
            };
            self.command(self.site_url(site, &["cmd", "devmgr"]), &body)
                .await
        }
        .await
        .with_context("upgrade_device", || format!("site={site} mac={mac}"))
    }

    /// `POST /api/s/{site}/cmd/devmgr` with `{"cmd": "force-provision", "mac": "..."}`
    pub async fn force_provision_device(
        &self,
        site: Option<&str>,
        mac: &str,
    ) -> Result<(), Error> {
        self.device_command("force_provision_device", "force-provision", site, mac)
            .await
    }

    /// Start a gateway speed test. Poll [`LegacyClient::get_speed_test_status`]
    /// for the result.
    pub async fn run_speed_test(&self, site: Option<&str>) -> Result<(), Error> {
        let site = self.site(site);
        debug!(site, "starting speed test");
        self.command(
            self.site_url(site, &["cmd", "devmgr"]),
            &json!({ "cmd": "speedtest" }),
        )
        .await
        .with_context("run_speed_test", || format!("site={site}"))
    }

    /// Latest speed test state, or `None` if the gateway never ran one.
    pub async fn get_speed_test_status(
        &self,
        site: Option<&str>,
    ) -> Result<Option<SpeedTestStatus>, Error> {
        let site = self.site(site);
        async {
            let rows: Vec<SpeedTestStatus> = self
                .post(
                    self.site_url(site, &["cmd", "devmgr"]),
                    &json!({ "cmd": "speedtest-status" }),
                )
                .await?;
            Ok(rows.into_iter().next())
        }
        .await
        .with_context("get_speed_test_status", || format!("site={site}"))
    }

    async fn device_command(
        &self,
        operation: &'static str,
        cmd: &'static str,
        site: Option<&str>,
        mac: &str,
    ) -> Result<(), Error> {
        let site = self.site(site);
        async {
            let mac = normalize_mac(mac)?;
            debug!(site, mac = %mac, cmd, "device command");
            self.command(
                self.site_url(site, &["cmd", "devmgr"]),
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
