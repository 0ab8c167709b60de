#![allow(clippy::unwrap_used)]
// Integration tests for `SonarrClient` using wiremock.

use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sonarr_api::endpoint;
use sonarr_api::models::{
    DownloadClientResource, Field, HostConfigResource, QualityDefinitionResource, TagResource,
};
use sonarr_api::{Credentials, Error, SonarrClient, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, SonarrClient) {
    let server = MockServer::start().await;
    let creds = Credentials::new(SecretString::from("test-key"));
    let client = SonarrClient::new(&server.uri(), &creds, &TransportConfig::default()).unwrap();
    (server, client)
}

fn qbittorrent_body(id: i64) -> serde_json::Value {
    json!({
        "id": id,
        "name": "qb",
        "implementation": "QBittorrent",
        "configContract": "QBittorrentSettings",
        "protocol": "torrent",
        "enable": true,
        "priority": 1,
        "tags": [],
        "fields": [
            {"name": "host", "value": "qb.lan"},
            {"name": "port", "value": 8080}
        ]
    })
}

// ── Authentication ──────────────────────────────────────────────────

#[tokio::test]
async fn test_api_key_header_is_sent() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/system/status"))
        .and(header("X-Api-Key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "appName": "Sonarr",
            "instanceName": "Sonarr",
            "version": "4.0.0.0"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let status = client.system_status().await.unwrap();
    assert_eq!(status.app_name, "Sonarr");
    assert_eq!(status.version, "4.0.0.0");
}

#[tokio::test]
async fn test_extra_header_is_sent() {
    let server = MockServer::start().await;
    let creds = Credentials::new(SecretString::from("test-key"))
        .with_extra_header("X-Gate", SecretString::from("open-sesame"));
    let client = SonarrClient::new(&server.uri(), &creds, &TransportConfig::default()).unwrap();

    Mock::given(method("GET"))
        .and(path("/api/v3/tag"))
        .and(header("X-Gate", "open-sesame"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let tags: Vec<TagResource> = client.list(endpoint::TAG).await.unwrap();
    assert!(tags.is_empty());
}

#[tokio::test]
async fn test_unauthorized_maps_to_invalid_api_key() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/tag"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result: Result<Vec<TagResource>, _> = client.list(endpoint::TAG).await;
    assert!(
        matches!(result, Err(Error::InvalidApiKey)),
        "expected InvalidApiKey, got: {result:?}"
    );
}

// ── Collections ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_download_client() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v3/downloadclient"))
        .and(body_partial_json(json!({
            "implementation": "QBittorrent",
            "fields": [{"name": "host", "value": "qb.lan"}, {"name": "port", "value": 8080}]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(qbittorrent_body(7)))
        .expect(1)
        .mount(&server)
        .await;

    let body = DownloadClientResource {
        name: "qb".into(),
        implementation: "QBittorrent".into(),
        config_contract: "QBittorrentSettings".into(),
        tags: Some(Vec::new()),
        fields: vec![
            Field::new("host", json!("qb.lan")),
            Field::new("port", json!(8080)),
        ],
        ..Default::default()
    };

    let created: DownloadClientResource = client
        .create(endpoint::DOWNLOAD_CLIENT, &body)
        .await
        .unwrap();
    assert_eq!(created.id, 7);
    assert_eq!(created.header.protocol, "torrent");
}

#[tokio::test]
async fn test_fetch_and_update_download_client() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/downloadclient/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(qbittorrent_body(7)))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/v3/downloadclient/7"))
        .and(body_partial_json(json!({"id": 7, "priority": 5})))
        .respond_with(ResponseTemplate::new(202).set_body_json(qbittorrent_body(7)))
        .expect(1)
        .mount(&server)
        .await;

    let mut fetched: DownloadClientResource =
        client.fetch(endpoint::DOWNLOAD_CLIENT, 7).await.unwrap();
    fetched.header.priority = 5;

    let updated: DownloadClientResource = client
        .update(endpoint::DOWNLOAD_CLIENT, 7, &fetched)
        .await
        .unwrap();
    assert_eq!(updated.id, 7);
}

#[tokio::test]
async fn test_fetch_missing_is_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/downloadclient/99"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "NotFound",
            "description": "download client 99 does not exist"
        })))
        .mount(&server)
        .await;

    let err = client
        .fetch::<DownloadClientResource>(endpoint::DOWNLOAD_CLIENT, 99)
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert!(err.to_string().contains("download client 99 does not exist"));
}

#[tokio::test]
async fn test_remove_download_client() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v3/downloadclient/12"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client.remove(endpoint::DOWNLOAD_CLIENT, 12).await.unwrap();
}

#[tokio::test]
async fn test_validation_failure_is_summarised() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v3/tag"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!([{
            "propertyName": "Label",
            "errorMessage": "Label must be unique",
            "attemptedValue": "dupe"
        }])))
        .mount(&server)
        .await;

    let body = TagResource {
        id: 0,
        label: "dupe".into(),
    };
    let err = client
        .create::<TagResource, _>(endpoint::TAG, &body)
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(400));
    assert_eq!(
        err.to_string(),
        "Sonarr API error (HTTP 400): Label: Label must be unique"
    );
}

#[tokio::test]
async fn test_malformed_body_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/tag/3"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy login</html>"))
        .mount(&server)
        .await;

    let result = client.fetch::<TagResource>(endpoint::TAG, 3).await;
    assert!(
        matches!(result, Err(Error::Deserialization { .. })),
        "expected Deserialization error, got: {result:?}"
    );
}

// ── Singletons ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_host_config_roundtrip() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/config/host"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1,
            "bindAddress": "*",
            "port": 8989,
            "authenticationMethod": "forms",
            "username": "admin",
            "password": "********",
            "logLevel": "info"
        })))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/v3/config/host/1"))
        .and(body_partial_json(json!({"id": 1, "port": 9000})))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({"id": 1, "port": 9000})))
        .expect(1)
        .mount(&server)
        .await;

    let mut host: HostConfigResource = client
        .fetch_singleton(endpoint::HOST_CONFIG)
        .await
        .unwrap();
    assert_eq!(host.id, endpoint::SINGLETON_ID);
    assert_eq!(host.username, "admin");

    host.port = 9000;
    let written: HostConfigResource = client
        .update(endpoint::HOST_CONFIG, endpoint::SINGLETON_ID, &host)
        .await
        .unwrap();
    assert_eq!(written.port, 9000);
}

#[tokio::test]
async fn test_quality_definitions_replace() {
    let (server, client) = setup().await;

    let defs = json!([{
        "id": 1,
        "quality": {"id": 1, "name": "SDTV", "source": "television", "resolution": 480},
        "title": "SDTV",
        "weight": 2,
        "minSize": 2.0,
        "maxSize": 100.0,
        "preferredSize": 95.0
    }]);

    Mock::given(method("PUT"))
        .and(path("/api/v3/qualitydefinition/update"))
        .respond_with(ResponseTemplate::new(202).set_body_json(defs.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let body: Vec<QualityDefinitionResource> = serde_json::from_value(defs).unwrap();
    let written: Vec<QualityDefinitionResource> = client
        .replace(endpoint::QUALITY_DEFINITION_UPDATE, &body)
        .await
        .unwrap();

    assert_eq!(written.len(), 1);
    assert_eq!(written[0].quality.name, "SDTV");
    assert_eq!(written[0].max_size, Some(100.0));
}
