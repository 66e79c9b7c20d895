#![allow(clippy::unwrap_used)]
// Transport behaviour: headers, body cap, timeout, caller cancellation.

use std::time::Duration;

use secrecy::SecretString;
use serde_json::json;
use url::Url;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use unibridge_api::{Client, ClientConfig, Error, ErrorKind, PageRequest, TransportConfig};

async fn client_with(server: &MockServer, transport: TransportConfig) -> Client {
    Client::new(ClientConfig {
        base_url: Url::parse(&server.uri()).unwrap(),
        api_key: SecretString::from("test-key".to_owned()),
        default_site: "default".into(),
        transport,
    })
    .unwrap()
}

#[tokio::test]
async fn test_get_sends_key_and_accept_but_no_content_type() {
    let server = MockServer::start().await;
    let client = client_with(&server, TransportConfig::default()).await;

    Mock::given(method("GET"))
        .and(path("/integration/v1/sites"))
        .and(header("X-API-Key", "test-key"))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .expect(1)
        .mount(&server)
        .await;

    client
        .integration()
        .list_sites(PageRequest::default())
        .await
        .unwrap();

    let reqs = server.received_requests().await.unwrap();
    assert!(reqs[0].headers.get("content-type").is_none());
}

#[tokio::test]
async fn test_oversized_body_is_transport_failure() {
    let server = MockServer::start().await;
    let transport = TransportConfig {
        max_response_bytes: 64,
        ..TransportConfig::default()
    };
    let client = client_with(&server, transport).await;

    let sites: Vec<_> = (0..20)
        .map(|i| json!({ "id": format!("site-{i}"), "name": "x" }))
        .collect();
    Mock::given(method("GET"))
        .and(path("/integration/v1/sites"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": sites })))
        .mount(&server)
        .await;

    let err = client
        .integration()
        .list_sites(PageRequest::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
}

#[tokio::test]
async fn test_oversized_error_body_keeps_a_prefix() {
    let server = MockServer::start().await;
    let transport = TransportConfig {
        max_response_bytes: 64,
        ..TransportConfig::default()
    };
    let client = client_with(&server, transport).await;

    Mock::given(method("GET"))
        .and(path("/integration/v1/sites"))
        .respond_with(ResponseTemplate::new(502).set_body_string("e".repeat(200)))
        .mount(&server)
        .await;

    let err = client
        .integration()
        .list_sites(PageRequest::default())
        .await
        .unwrap_err();
    match err.root() {
        Error::HttpStatus { status, body } => {
            assert_eq!(*status, 502);
            assert_eq!(body, &format!("{} [truncated]", "e".repeat(64)));
        }
        other => panic!("expected HttpStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn test_slow_controller_hits_timeout() {
    let server = MockServer::start().await;
    let transport = TransportConfig {
        timeout: Duration::from_millis(200),
        ..TransportConfig::default()
    };
    let client = client_with(&server, transport).await;

    Mock::given(method("GET"))
        .and(path("/integration/v1/info"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_secs(5))
                .set_body_json(json!({ "applicationVersion": "9.0" })),
        )
        .mount(&server)
        .await;

    let err = client.integration().get_info().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert!(err.is_timeout());
}

#[tokio::test]
async fn test_dropping_the_future_cancels_the_call() {
    let server = MockServer::start().await;
    let client = client_with(&server, TransportConfig::default()).await;

    Mock::given(method("GET"))
        .and(path("/integration/v1/info"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_secs(10))
                .set_body_json(json!({ "applicationVersion": "9.0" })),
        )
        .mount(&server)
        .await;

    let started = std::time::Instant::now();
    let outcome = tokio::time::timeout(
        Duration::from_millis(100),
        client.integration().get_info(),
    )
    .await;

    assert!(outcome.is_err());
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn test_server_error_is_not_retried() {
    let server = MockServer::start().await;
    let client = client_with(&server, TransportConfig::default()).await;

    Mock::given(method("GET"))
        .and(path("/integration/v1/info"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client.integration().get_info().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::HttpStatus);
    assert!(err.to_string().contains("maintenance"));
}
