// Integration API request and response types.
//
// Response types model the fields callers commonly need and keep everything
// else in a flattened `extra` map; the controller adds fields across firmware
// releases and a strict schema would reject them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::pagination::Identified;

// ── System ───────────────────────────────────────────────────────────

/// `GET /integration/v1/info`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationInfo {
    #[serde(default)]
    pub application_version: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ── Sites ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub internal_reference: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Identified for Site {
    fn id(&self) -> &str {
        &self.id
    }
}

// ── Devices ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: String,
    #[serde(default)]
    pub mac_address: String,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    /// ONLINE, OFFLINE, PENDING_ADOPTION, UPDATING, ...
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub firmware_version: Option<String>,
    #[serde(default)]
    pub firmware_updatable: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `GET /integration/v1/sites/{site}/devices/{id}/statistics/latest`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceStatistics {
    #[serde(default)]
    pub uptime_sec: Option<i64>,
    #[serde(default)]
    pub last_heartbeat_at: Option<String>,
    #[serde(default)]
    pub cpu_utilization_pct: Option<f64>,
    #[serde(default)]
    pub memory_utilization_pct: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Device awaiting adoption. Not site-scoped.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingDevice {
    #[serde(default)]
    pub mac_address: String,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceTag {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub device_ids: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ── Clients ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkClient {
    pub id: String,
    /// WIRED, WIRELESS, VPN, TELEPORT
    #[serde(default, rename = "type")]
    pub client_type: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub connected_at: Option<String>,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub mac_address: Option<String>,
    #[serde(default)]
    pub uplink_device_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Client seen by the site at some point, connected or not.
///
/// `GET /integration/v1/sites/{site}/clients/history`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnownClient {
    #[serde(default, alias = "macAddress")]
    pub mac: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, alias = "lastSeen")]
    pub last_seen: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `GET /integration/v1/sites/{site}/statistics/clients/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientStatistics {
    #[serde(default, alias = "macAddress")]
    pub mac: Option<String>,
    #[serde(default)]
    pub hostname: Option<String>,
    #[serde(default, alias = "ipAddress")]
    pub ip: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ── Site statistics ──────────────────────────────────────────────────

/// Aggregate counters for one site. `GET /integration/v1/sites/{site}/statistics/site`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteStatistics {
    #[serde(default, alias = "numUser")]
    pub num_user: Option<i64>,
    #[serde(default, alias = "numGuest")]
    pub num_guest: Option<i64>,
    #[serde(default, alias = "numAp")]
    pub num_ap: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ── Networks & WiFi ──────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Network {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub vlan_id: Option<i64>,
    /// GATEWAY, SWITCH, UNMANAGED
    #[serde(default)]
    pub management: Option<String>,
    #[serde(default)]
    pub default: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WifiBroadcast {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// STANDARD or IOT_OPTIMIZED
    #[serde(default, rename = "type")]
    pub broadcast_type: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ── Firewall ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirewallPolicy {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub index: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirewallZone {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub network_ids: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Full replacement body for `POST`/`PUT .../firewall/zones`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FirewallZoneRequest {
    pub name: String,
    pub network_ids: Vec<String>,
}

/// Partial zone update applied through fetch-merge-write. Unset fields
/// keep their current value.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FirewallZonePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_ids: Option<Vec<String>>,
}

// ── ACL rules ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AclRule {
    pub id: String,
    /// IPV4 or MAC
    #[serde(default, rename = "type")]
    pub rule_type: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub enabled: bool,
    /// ALLOW or BLOCK
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub index: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Create/replace body for ACL rules. Filters and other type-specific
/// settings go in `extra`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AclRuleRequest {
    #[serde(rename = "type")]
    pub rule_type: String,
    pub name: String,
    pub action: String,
    pub enabled: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AclRuleOrdering {
    pub ordered_acl_rule_ids: Vec<String>,
}

// ── DNS ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsPolicy {
    pub id: String,
    /// A_RECORD, AAAA_RECORD, CNAME_RECORD, ...
    #[serde(default, rename = "type")]
    pub policy_type: String,
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub ipv4_address: Option<String>,
    #[serde(default)]
    pub ttl_seconds: Option<u32>,
    #[serde(default)]
    pub enabled: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsPolicyRequest {
    #[serde(rename = "type")]
    pub policy_type: String,
    pub domain: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipv4_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl_seconds: Option<u32>,
    pub enabled: bool,
}

// ── Hotspot vouchers ─────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Voucher {
    pub id: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub time_limit_minutes: Option<u64>,
    #[serde(default)]
    pub expired: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoucherRequest {
    pub count: u32,
    pub name: String,
    pub time_limit_minutes: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorized_guest_limit: Option<u32>,
    #[serde(
        rename = "dataUsageLimitMBytes",
        skip_serializing_if = "Option::is_none"
    )]
    pub data_usage_limit_mbytes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rx_rate_limit_kbps: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tx_rate_limit_kbps: Option<u64>,
}

/// `POST .../hotspot/vouchers` answers `{"vouchers": [...]}`.
#[derive(Debug, Deserialize)]
pub(crate) struct VoucherCreateResponse {
    pub vouchers: Vec<Voucher>,
}

// ── Reference data ───────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrafficMatchingList {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "type")]
    pub list_type: Option<String>,
    #[serde(default)]
    pub items: Vec<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wan {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VpnTunnel {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub tunnel_type: Option<String>,
    #[serde(default)]
    pub enabled: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VpnServer {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub server_type: Option<String>,
    #[serde(default)]
    pub enabled: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// DPI category or application. IDs are numeric on current firmware.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DpiEntry {
    pub id: Value,
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadiusProfile {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
