#![allow(clippy::unwrap_used)]
// Remaining operation families: one request-shape check per family.

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use unibridge_api::types::{DnsPolicyRequest, FirewallZoneRequest};
use unibridge_api::{Client, ErrorKind, PageRequest};

const SITE: &str = "site-default";

async fn setup() -> (MockServer, Client) {
    let server = MockServer::start().await;
    let client = Client::from_parts(
        &format!("{}/proxy/network", server.uri()),
        SecretString::from("test-key".to_owned()),
        SITE,
    )
    .unwrap();
    (server, client)
}

fn v1(suffix: &str) -> String {
    format!("/proxy/network/integration/v1/{suffix}")
}

fn site_path(suffix: &str) -> String {
    v1(&format!("sites/{SITE}/{suffix}"))
}

fn legacy_path(suffix: &str) -> String {
    format!("/proxy/network/api/s/{SITE}/{suffix}")
}

fn legacy_ok(data: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "meta": { "rc": "ok" }, "data": data }))
}

// ── Integration ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_all_sites_uses_scan_page_size() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(v1("sites")))
        .and(query_param("limit", "200"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "id": "s1", "name": "HQ" }, { "id": "s2", "name": "Branch" }],
            "totalCount": 2, "offset": 0, "limit": 200, "count": 2
        })))
        .expect(1)
        .mount(&server)
        .await;

    let sites = client.integration().list_all_sites().await.unwrap();
    let ids: Vec<_> = sites.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, ["s1", "s2"]);
}

#[tokio::test]
async fn test_device_statistics_and_pending_devices() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(site_path("devices/dev-1/statistics/latest")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "uptimeSec": 86400, "cpuUtilizationPct": 12.5, "loadAverage1Min": 0.3
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(v1("pending-devices")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "macAddress": "aa:bb:cc:00:00:09", "model": "U6-Lite" }],
            "totalCount": 1
        })))
        .mount(&server)
        .await;

    let api = client.integration();
    let stats = api.get_device_statistics(None, "dev-1").await.unwrap();
    assert_eq!(stats.uptime_sec, Some(86400));
    assert_eq!(stats.extra["loadAverage1Min"], json!(0.3));

    let pending = api.list_pending_devices(PageRequest::default()).await.unwrap();
    assert_eq!(pending.data[0].model.as_deref(), Some("U6-Lite"));
}

#[tokio::test]
async fn test_get_client_by_id() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(site_path("clients/cl-1")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "cl-1", "type": "WIRELESS", "name": "phone", "ipAddress": "10.0.0.20"
        })))
        .mount(&server)
        .await;

    let found = client.integration().get_client(None, "cl-1").await.unwrap();
    assert_eq!(found.client_type.as_deref(), Some("WIRELESS"));
    assert_eq!(found.ip_address.as_deref(), Some("10.0.0.20"));
}

#[tokio::test]
async fn test_known_clients_history() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(site_path("clients/history")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "mac": "dd:ee:ff:00:00:01", "name": "old-tablet" }],
            "totalCount": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let known = client
        .integration()
        .list_known_clients(None, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(known.total_count, 1);
    assert_eq!(known.data[0].mac.as_deref(), Some("dd:ee:ff:00:00:01"));
    assert_eq!(known.data[0].name.as_deref(), Some("old-tablet"));
}

#[tokio::test]
async fn test_site_and_client_statistics() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(site_path("statistics/site")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "num_user": 42, "num_guest": 3 })),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(site_path("statistics/clients/cl-99")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "mac": "11:22:33:44:55:66", "hostname": "tv", "ip": "10.0.0.50", "rxBytes": 1024
        })))
        .mount(&server)
        .await;

    let api = client.integration();
    let site = api.get_site_statistics(None).await.unwrap();
    assert_eq!(site.num_user, Some(42));
    assert_eq!(site.num_guest, Some(3));

    let stats = api.get_client_statistics(None, "cl-99").await.unwrap();
    assert_eq!(stats.hostname.as_deref(), Some("tv"));
    assert_eq!(stats.ip.as_deref(), Some("10.0.0.50"));
    assert_eq!(stats.extra["rxBytes"], json!(1024));
}

#[tokio::test]
async fn test_statistics_errors_name_the_operation() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(site_path("statistics/site")))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such site"))
        .mount(&server)
        .await;

    let api = client.integration();
    let err = api.get_site_statistics(None).await.unwrap_err();
    assert!(err.to_string().contains("get_site_statistics"));

    let err = api.get_client_statistics(None, "  ").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_network_toggle_keeps_vlan() {
    let (server, client) = setup().await;
    let url = site_path("networks/net-1");

    Mock::given(method("GET"))
        .and(path(url.clone()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "net-1", "name": "IoT", "enabled": true, "vlanId": 30,
            "management": "GATEWAY", "metadata": { "origin": "USER_DEFINED" }
        })))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(url))
        .and(body_json(json!({
            "name": "IoT", "enabled": false, "vlanId": 30, "management": "GATEWAY"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "net-1", "name": "IoT", "enabled": false, "vlanId": 30
        })))
        .expect(1)
        .mount(&server)
        .await;

    let updated = client
        .integration()
        .set_network_enabled(None, "net-1", false)
        .await
        .unwrap();
    assert!(!updated.enabled);
    assert_eq!(updated.vlan_id, Some(30));
}

#[tokio::test]
async fn test_create_zone_and_delete_policy() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(site_path("firewall/zones")))
        .and(body_json(json!({ "name": "Cameras", "networkIds": ["net-1"] })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "zone-9", "name": "Cameras", "networkIds": ["net-1"]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(site_path("firewall/policies/pol-3")))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let api = client.integration();
    let zone = api
        .create_firewall_zone(
            None,
            &FirewallZoneRequest {
                name: "Cameras".into(),
                network_ids: vec!["net-1".into()],
            },
        )
        .await
        .unwrap();
    assert_eq!(zone.id, "zone-9");

    api.delete_firewall_policy(None, "pol-3").await.unwrap();
}

#[tokio::test]
async fn test_dns_policy_lifecycle() {
    let (server, client) = setup().await;
    let request = DnsPolicyRequest {
        policy_type: "A_RECORD".into(),
        domain: "nas.home.arpa".into(),
        ipv4_address: Some("10.0.0.5".into()),
        ttl_seconds: None,
        enabled: true,
    };
    let created = json!({
        "id": "dns-1", "type": "A_RECORD", "domain": "nas.home.arpa",
        "ipv4Address": "10.0.0.5", "enabled": true
    });

    Mock::given(method("POST"))
        .and(path(site_path("dns/policies")))
        .and(body_json(json!({
            "type": "A_RECORD", "domain": "nas.home.arpa",
            "ipv4Address": "10.0.0.5", "enabled": true
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(created.clone()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(site_path("dns/policies/dns-1")))
        .respond_with(ResponseTemplate::new(200).set_body_json(created))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(site_path("dns/policies/dns-1")))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let api = client.integration();
    let policy = api.create_dns_policy(None, &request).await.unwrap();
    assert_eq!(policy.ipv4_address.as_deref(), Some("10.0.0.5"));
    api.update_dns_policy(None, &policy.id, &request).await.unwrap();
    api.delete_dns_policy(None, &policy.id).await.unwrap();
}

#[tokio::test]
async fn test_dns_policy_requires_domain() {
    let (server, client) = setup().await;
    let request = DnsPolicyRequest {
        policy_type: "A_RECORD".into(),
        domain: "  ".into(),
        ipv4_address: None,
        ttl_seconds: None,
        enabled: true,
    };

    let err = client
        .integration()
        .create_dns_policy(None, &request)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_traffic_list_and_radius_profiles() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(site_path("traffic-matching-lists/tml-1")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "tml-1", "name": "Blocked ports", "type": "PORTS",
            "items": [{ "type": "PORT_NUMBER", "value": 23 }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(site_path("radius/profiles")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "id": "rad-1", "name": "Default" }], "totalCount": 1
        })))
        .mount(&server)
        .await;

    let api = client.integration();
    let list = api.get_traffic_matching_list(None, "tml-1").await.unwrap();
    assert_eq!(list.list_type.as_deref(), Some("PORTS"));
    assert_eq!(list.items.len(), 1);

    let profiles = api
        .list_radius_profiles(None, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(profiles.data[0].name, "Default");
}

// ── Legacy ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_upgrade_device_from_custom_url() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(legacy_path("cmd/devmgr")))
        .and(body_json(json!({
            "cmd": "upgrade-external",
            "mac": "aa:bb:cc:00:00:01",
            "url": "https://fw.example/u6.bin"
        })))
        .respond_with(legacy_ok(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    client
        .legacy()
        .upgrade_device(None, "AA:BB:CC:00:00:01", Some("https://fw.example/u6.bin"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_force_provision_and_speed_test() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(legacy_path("cmd/devmgr")))
        .and(body_json(json!({ "cmd": "force-provision", "mac": "aa:bb:cc:00:00:02" })))
        .respond_with(legacy_ok(json!([])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(legacy_path("cmd/devmgr")))
        .and(body_json(json!({ "cmd": "speedtest" })))
        .respond_with(legacy_ok(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let legacy = client.legacy();
    legacy
        .force_provision_device(None, "aa:bb:cc:00:00:02")
        .await
        .unwrap();
    legacy.run_speed_test(None).await.unwrap();
}

#[tokio::test]
async fn test_health_subsystems() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(legacy_path("stat/health")))
        .respond_with(legacy_ok(json!([
            { "subsystem": "wan", "status": "ok", "wan_ip": "203.0.113.7" },
            { "subsystem": "wlan", "status": "warning", "num_user": 14 }
        ])))
        .mount(&server)
        .await;

    let health = client.legacy().get_health(None).await.unwrap();
    assert_eq!(health.len(), 2);
    assert_eq!(health[0].extra["wan_ip"], json!("203.0.113.7"));
    assert_eq!(health[1].num_user, Some(14));
}

#[tokio::test]
async fn test_wlans_and_legacy_firewall_rules() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(legacy_path("rest/wlanconf")))
        .respond_with(legacy_ok(json!([
            { "_id": "wl-1", "name": "Home", "enabled": true, "security": "wpapsk" }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(legacy_path("rest/firewallrule")))
        .respond_with(legacy_ok(json!([
            { "_id": "fr-1", "name": "Drop telnet", "enabled": true,
              "action": "drop", "ruleset": "WAN_IN", "rule_index": 2000 }
        ])))
        .mount(&server)
        .await;

    let legacy = client.legacy();
    let wlans = legacy.list_wlans(None).await.unwrap();
    assert_eq!(wlans[0].id, "wl-1");
    assert_eq!(wlans[0].security.as_deref(), Some("wpapsk"));

    let rules = legacy.list_legacy_firewall_rules(None).await.unwrap();
    assert_eq!(rules[0].ruleset.as_deref(), Some("WAN_IN"));
    assert_eq!(rules[0].rule_index, Some(2000));
}

#[tokio::test]
async fn test_legacy_failure_status_is_http_status() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(legacy_path("stat/health")))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "meta": { "rc": "error", "msg": "api.err.LoginRequired" }, "data": []
        })))
        .mount(&server)
        .await;

    let err = client.legacy().get_health(None).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::HttpStatus);
    assert_eq!(err.status(), Some(401));
    assert_eq!(err.operation(), Some("get_health"));
}
