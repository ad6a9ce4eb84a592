//! Integration tests for the events API connector using wiremock
//!
//! These tests mock the configuration service to verify the connector's HTTP behavior.

use boothcfg_core::{ConfigSource, Error};
use boothcfg_egress::{EventsApiConfig, EventsApiConnector};
use std::time::Duration;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

fn event_body(slug: &str, title: &str) -> serde_json::Value {
    serde_json::json!({
        "_id": format!("evt-{}", slug),
        "user_id": "u-1",
        "user_slug": "acme",
        "slug": slug,
        "title": title,
        "is_active": true,
        "postgres_event_id": "42",
        "theme": { "brandName": "Acme" },
        "templates": [],
        "branding": {},
        "settings": {}
    })
}

fn connector(server: &MockServer) -> EventsApiConnector {
    EventsApiConnector::new(EventsApiConfig::new(server.uri())).unwrap()
}

#[tokio::test]
async fn test_resolve_by_slug_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/events/acme/launch-party"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(event_body("launch-party", "Launch Party")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = connector(&mock_server)
        .resolve_by_slug("acme", "launch-party")
        .await
        .unwrap();

    assert_eq!(config.slug, "launch-party");
    assert_eq!(config.title, "Launch Party");
    assert_eq!(config.postgres_event_id, Some(42));
    assert_eq!(config.theme.brand_name.as_deref(), Some("Acme"));
}

#[tokio::test]
async fn test_resolve_by_id_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/events/by-id/42/launch-party"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(event_body("launch-party", "Launch Party")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = connector(&mock_server)
        .resolve_by_id(42, "launch-party")
        .await
        .unwrap();

    assert_eq!(config.id, "evt-launch-party");
}

#[tokio::test]
async fn test_not_found_maps_to_event_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/events/acme/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "detail": "Event not found"
        })))
        .mount(&mock_server)
        .await;

    let err = connector(&mock_server)
        .resolve_by_slug("acme", "missing")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::EventNotFound));
    assert_eq!(err.to_string(), "Event not found");
}

#[tokio::test]
async fn test_server_error_carries_status_text() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/events/acme/launch-party"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let err = connector(&mock_server)
        .resolve_by_slug("acme", "launch-party")
        .await
        .unwrap_err();

    match &err {
        Error::Http { status_code, .. } => assert_eq!(*status_code, 503),
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(err.to_string(), "Failed to load event: Service Unavailable");
}

#[tokio::test]
async fn test_invalid_body_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/events/acme/launch-party"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy error</html>"))
        .mount(&mock_server)
        .await;

    let err = connector(&mock_server)
        .resolve_by_slug("acme", "launch-party")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Parse(_)));
    assert!(err.to_string().starts_with("Invalid event configuration:"));
}

#[tokio::test]
async fn test_timeout_reports_configured_limit() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/events/acme/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(event_body("slow", "Slow"))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let connector =
        EventsApiConnector::new(EventsApiConfig::new(mock_server.uri()).with_timeout_secs(1))
            .unwrap();

    let err = connector.resolve_by_slug("acme", "slow").await.unwrap_err();

    assert!(matches!(err, Error::Timeout(1)));
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // Nothing listens on port 1
    let uri = "http://127.0.0.1:1".to_string();

    let connector = EventsApiConnector::new(EventsApiConfig::new(uri)).unwrap();
    let err = connector
        .resolve_by_slug("acme", "launch-party")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Transport(_)));
    assert!(!err.to_string().is_empty());
}
