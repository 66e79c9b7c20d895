// Legacy API response types
//
// Field presence varies across firmware versions, so almost everything is
// optional and unknown fields land in `extra`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ── Client (Station) ─────────────────────────────────────────────────

/// Connected client from `stat/sta`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LegacyClientEntry {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub mac: String,
    #[serde(default)]
    pub hostname: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default)]
    pub oui: Option<String>,
    #[serde(default)]
    pub is_guest: Option<bool>,
    #[serde(default)]
    pub is_wired: Option<bool>,
    #[serde(default)]
    pub authorized: Option<bool>,
    #[serde(default)]
    pub blocked: Option<bool>,
    #[serde(default)]
    pub essid: Option<String>,
    #[serde(default)]
    pub network: Option<String>,
    #[serde(default)]
    pub signal: Option<i32>,
    #[serde(default)]
    pub tx_bytes: Option<i64>,
    #[serde(default)]
    pub rx_bytes: Option<i64>,
    #[serde(default)]
    pub uptime: Option<i64>,
    #[serde(default)]
    pub last_seen: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Optional limits for [`LegacyClient::authorize_guest`](super::LegacyClient::authorize_guest).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GuestAuthorization {
    pub minutes: u32,
    pub up_kbps: Option<u32>,
    pub down_kbps: Option<u32>,
    pub quota_mb: Option<u32>,
}

// ── Events & alarms ──────────────────────────────────────────────────

/// Event object from `stat/event`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LegacyEvent {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub datetime: Option<String>,
    #[serde(default)]
    pub subsystem: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Alarm object from `stat/alarm`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LegacyAlarm {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub datetime: Option<String>,
    #[serde(default)]
    pub archived: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One subsystem row (`wan`, `lan`, `wlan`, `vpn`, `www`) from `stat/health`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HealthSubsystem {
    #[serde(default)]
    pub subsystem: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub num_user: Option<i64>,
    #[serde(default)]
    pub num_guest: Option<i64>,
    #[serde(default)]
    pub num_adopted: Option<i64>,
    #[serde(default)]
    pub num_disconnected: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ── Speed test ───────────────────────────────────────────────────────

/// Gateway speed test state from `cmd/devmgr` `speedtest-status`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpeedTestStatus {
    #[serde(default)]
    pub status_summary: Option<i64>,
    #[serde(default)]
    pub status_download: Option<i64>,
    #[serde(default)]
    pub status_upload: Option<i64>,
    #[serde(default)]
    pub xput_download: Option<f64>,
    #[serde(default)]
    pub xput_upload: Option<f64>,
    #[serde(default)]
    pub latency: Option<f64>,
    #[serde(default)]
    pub rundate: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ── REST configuration ───────────────────────────────────────────────

/// WLAN configuration from `rest/wlanconf`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Wlan {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub security: Option<String>,
    #[serde(default)]
    pub is_guest: Option<bool>,
    #[serde(default)]
    pub networkconf_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Port forward from `rest/portforward`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortForward {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub proto: Option<String>,
    #[serde(default)]
    pub dst_port: Option<String>,
    #[serde(default)]
    pub fwd: Option<String>,
    #[serde(default)]
    pub fwd_port: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Firewall rule from the pre-zone `rest/firewallrule` endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LegacyFirewallRule {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub ruleset: Option<String>,
    #[serde(default)]
    pub rule_index: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn client_entry_keeps_unknown_fields() {
        let entry: LegacyClientEntry = serde_json::from_str(
            r#"{"_id":"c1","mac":"aa:bb","hostname":"laptop","satisfaction":97}"#,
        )
        .unwrap();
        assert_eq!(entry.id, "c1");
        assert_eq!(entry.hostname.as_deref(), Some("laptop"));
        assert_eq!(entry.extra["satisfaction"], 97);
    }

    #[test]
    fn wlan_defaults_missing_fields() {
        let wlan: Wlan = serde_json::from_str(r#"{"_id":"w1"}"#).unwrap();
        assert_eq!(wlan.id, "w1");
        assert!(!wlan.enabled);
        assert!(wlan.name.is_empty());
    }
}
