// Legacy API events, alarms, and site health
//
// Reads from stat/event, stat/alarm and stat/health; alarm archival goes
// through cmd/evtmgr.

use serde_json::json;
use tracing::debug;

use super::LegacyClient;
use super::models::{HealthSubsystem, LegacyAlarm, LegacyEvent};
use crate::client::{require, with_query};
use crate::error::{Error, ResultExt};

impl LegacyClient<'_> {
    /// Recent events, newest first. `limit == 0` leaves the count to the
    /// controller (typically 200).
    ///
    /// `GET /api/s/{site}/stat/event?_limit={limit}`
    pub async fn list_events(
        &self,
        site: Option<&str>,
        limit: u32,
    ) -> Result<Vec<LegacyEvent>, Error> {
        let site = self.site(site);
        let mut params = Vec::new();
        if limit > 0 {
            params.push(("_limit", limit.to_string()));
        }
        debug!(site, limit, "listing events");
        self.get(with_query(self.site_url(site, &["stat", "event"]), &params))
            .await
            .with_context("list_events", || format!("site={site} limit={limit}"))
    }

    /// Active alarms, or archived ones with `archived_only`.
    ///
    /// `GET /api/s/{site}/stat/alarm[?archived=true]`
    pub async fn list_alarms(
        &self,
        site: Option<&str>,
        archived_only: bool,
    ) -> Result<Vec<LegacyAlarm>, Error> {
        let site = self.site(site);
        let mut params = Vec::new();
        if archived_only {
            params.push(("archived", "true".to_owned()));
        }
        debug!(site, archived_only, "listing alarms");
        self.get(with_query(self.site_url(site, &["stat", "alarm"]), &params))
            .await
            .with_context("list_alarms", || {
                format!("site={site} archived={archived_only}")
            })
    }

    /// `POST /api/s/{site}/cmd/evtmgr` with `{"cmd": "archive-alarm", "_id": "..."}`
    pub async fn archive_alarm(&self, site: Option<&str>, alarm_id: &str) -> Result<(), Error> {
        let site = self.site(site);
        async {
            let id = require("alarm_id", alarm_id)?;
            debug!(site, id, "archiving alarm");
            self.command(
                self.site_url(site, &["cmd", "evtmgr"]),
                &json!({
                    "cmd": "archive-alarm",
                    "_id": id,
                }),
            )
            .await
        }
        .await
        .with_context("archive_alarm", || format!("site={site} alarm={alarm_id}"))
    }

    /// Per-subsystem health summary.
    ///
    /// `GET /api/s/{site}/stat/health`
    pub async fn get_health(&self, site: Option<&str>) -> Result<Vec<HealthSubsystem>, Error> {
        let site = self.site(site);
        self.get(self.site_url(site, &["stat", "health"]))
            .await
            .with_context("get_health", || format!("site={site}"))
    }
}
