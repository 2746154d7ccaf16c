//! End-to-end tests for connector operations through the real HTTP client.

use futures::TryStreamExt;
use serde_json::{json, Value};
use wiotp_historian::dsc::CONNECTORS_PATH;
use wiotp_historian::{
    ApiKey, AuthToken, BaseUrl, Connector, ConnectorDefinition, ConnectorFilter, ConnectorType,
    Connectors, HttpClient, PlatformConfig, ResourceError,
};
use wiremock::matchers::{basic_auth, body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const COLLECTION: &str = "/api/v0002/historianconnectors";

fn client_for(server: &MockServer) -> HttpClient {
    let config = PlatformConfig::builder()
        .api_key(ApiKey::new("a-ab12cd-k3y").unwrap())
        .auth_token(AuthToken::new("t0ken").unwrap())
        .base_url(BaseUrl::new(server.uri()).unwrap())
        .build()
        .unwrap();
    HttpClient::new(&config)
}

fn connector_json(id: &str, enabled: bool) -> Value {
    json!({
        "id": id,
        "name": format!("connector-{id}"),
        "type": "cloudant",
        "serviceId": "svc-1",
        "adminDisabled": false,
        "enabled": enabled,
        "timezone": "UTC",
        "created": "2019-05-06T10:11:12Z",
        "createdBy": "a-ab12cd-k3y"
    })
}

fn bookmark_of(request: &wiremock::Request) -> Option<String> {
    request
        .url
        .query_pairs()
        .find(|(key, _)| key == "bookmark")
        .map(|(_, value)| value.into_owned())
}

/// Mounts a three page listing. Pages are matched most specific first.
async fn mount_three_pages(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(COLLECTION))
        .and(query_param("bookmark", "page-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [connector_json("c5", true)],
            "meta": {"total_rows": 5}
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(COLLECTION))
        .and(query_param("bookmark", "page-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [connector_json("c3", true), connector_json("c4", true)],
            "bookmark": "page-2",
            "meta": {"total_rows": 5}
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(COLLECTION))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [connector_json("c1", true), connector_json("c2", true)],
            "bookmark": "page-1",
            "meta": {"total_rows": 5}
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_find_walks_every_page_once() {
    let server = MockServer::start().await;
    mount_three_pages(&server).await;

    let client = client_for(&server);
    let connectors = Connectors::new(&client);
    let list = connectors.find(&ConnectorFilter::new().enabled(true));

    let mut cursor = list.cursor();
    let mut ids = Vec::new();
    while let Some(connector) = cursor.next().await {
        ids.push(connector.unwrap().id().to_string());
    }

    assert_eq!(ids, vec!["c1", "c2", "c3", "c4", "c5"]);
    assert_eq!(cursor.total_rows(), Some(5));

    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 3);
    let bookmarks: Vec<Option<String>> = received.iter().map(bookmark_of).collect();
    assert_eq!(
        bookmarks,
        vec![None, Some("page-1".to_string()), Some("page-2".to_string())]
    );
    for request in &received {
        assert!(request
            .url
            .query_pairs()
            .any(|(key, value)| key == "enabled" && value == "true"));
    }
}

#[tokio::test]
async fn test_find_is_lazy_and_restartable() {
    let server = MockServer::start().await;
    mount_three_pages(&server).await;

    let client = client_for(&server);
    let connectors = Connectors::new(&client);
    let list = connectors.list();

    assert!(server.received_requests().await.unwrap().is_empty());

    let first: Vec<Connector> = list.stream().try_collect().await.unwrap();
    let second = list.collect().await.unwrap();

    assert_eq!(first.len(), 5);
    assert_eq!(first, second);
    assert_eq!(server.received_requests().await.unwrap().len(), 6);
}

#[tokio::test]
async fn test_page_failure_surfaces_after_earlier_items() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(COLLECTION))
        .and(query_param("bookmark", "page-1"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"message": "Internal error"})),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(COLLECTION))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [connector_json("c1", true)],
            "bookmark": "page-1"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let connectors = Connectors::new(&client);
    let list = connectors.list();
    let mut cursor = list.cursor();

    let first = cursor.next().await.unwrap().unwrap();
    let failure = cursor.next().await.unwrap();

    assert_eq!(first.id(), "c1");
    match failure {
        Err(ResourceError::Api(e)) => {
            assert_eq!(e.code, 500);
            assert_eq!(e.message, "Internal error");
        }
        other => panic!("Expected Api error, got {other:?}"),
    }
    assert!(cursor.next().await.is_none());
}

#[tokio::test]
async fn test_html_login_page_fails_the_listing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(COLLECTION))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html")
                .set_body_string("<html>login</html>"),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let connectors = Connectors::new(&client);

    let result = connectors.list().collect().await;

    assert!(matches!(result, Err(ResourceError::Json { .. })));
}

#[tokio::test]
async fn test_page_with_unexpected_envelope_fails_the_listing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(COLLECTION))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "rows": [connector_json("c1", true)],
            "bookmark": "b"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let connectors = Connectors::new(&client);

    let result = connectors.list().collect().await;

    assert!(matches!(result, Err(ResourceError::Json { .. })));
}

#[tokio::test]
async fn test_listing_accepts_timestamps_without_offset() {
    let server = MockServer::start().await;

    let mut record = connector_json("c1", true);
    record["created"] = json!("2019-05-06T10:11:12");
    Mock::given(method("GET"))
        .and(path(COLLECTION))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [record, connector_json("c2", true)]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let connectors = Connectors::new(&client);

    let all = connectors.list().collect().await.unwrap();

    assert_eq!(all.len(), 2);
    assert_eq!(all[0].created(), all[1].created());
}

#[tokio::test]
async fn test_create_posts_definition_and_expects_201() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COLLECTION))
        .and(basic_auth("a-ab12cd-k3y", "t0ken"))
        .and(body_json(json!({
            "name": "archive",
            "type": "eventstreams",
            "serviceId": "svc-1",
            "description": "Long term storage",
            "timezone": "Europe/London",
            "enabled": false,
            "configuration": {"partitions": 3}
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(connector_json("c1", false)))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let connectors = Connectors::new(&client);
    let definition = ConnectorDefinition::new("archive", ConnectorType::EventStreams, "svc-1")
        .description("Long term storage")
        .timezone("Europe/London")
        .enabled(false)
        .configuration(json!({"partitions": 3}));

    let created = connectors.create(&definition).await.unwrap();

    assert_eq!(created.id(), "c1");
    assert!(!created.enabled().unwrap());
    assert_eq!(created.created_by(), Some("a-ab12cd-k3y"));
}

#[tokio::test]
async fn test_create_validation_failure_carries_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COLLECTION))
        .respond_with(
            ResponseTemplate::new(400)
                .insert_header("x-request-id", "req-7")
                .set_body_json(json!({
                    "message": "CUDHC0301E: The service with id 'missing' does not exist",
                    "exception": {"id": "CUDHC0301E"}
                })),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let connectors = Connectors::new(&client);

    let error = connectors
        .create(&ConnectorDefinition::new("archive", "cloudant", "missing"))
        .await
        .unwrap_err();

    assert_eq!(error.status(), Some(400));
    assert_eq!(error.request_id(), Some("req-7"));
    match error {
        ResourceError::Api(e) => assert_eq!(e.body["exception"]["id"], "CUDHC0301E"),
        other => panic!("Expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_update_puts_full_body_with_id() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path(format!("{COLLECTION}/c1")))
        .and(body_json(json!({
            "id": "c1",
            "name": "renamed",
            "type": "cloudant",
            "serviceId": "svc-1",
            "description": "",
            "timezone": "UTC",
            "enabled": true
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(connector_json("c1", true)))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let connectors = Connectors::new(&client);

    let updated = connectors
        .update("c1", &ConnectorDefinition::new("renamed", ConnectorType::Cloudant, "svc-1"))
        .await
        .unwrap();

    assert_eq!(updated.id(), "c1");
}

#[tokio::test]
async fn test_get_contains_and_delete() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{COLLECTION}/c1")))
        .respond_with(ResponseTemplate::new(200).set_body_json(connector_json("c1", true)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{COLLECTION}/gone")))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not found"})))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(format!("{COLLECTION}/c1")))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(format!("{COLLECTION}/gone")))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let connectors = Connectors::new(&client);

    let found = connectors.get("c1").await.unwrap();
    assert_eq!(found.service_id().unwrap(), "svc-1");
    assert!(matches!(
        connectors.get("gone").await,
        Err(ResourceError::NotFound { .. })
    ));

    assert!(connectors.contains("c1").await.unwrap());
    assert!(!connectors.contains("gone").await.unwrap());

    connectors.delete("c1").await.unwrap();
    assert!(matches!(
        connectors.delete("gone").await,
        Err(ResourceError::NotFound { .. })
    ));
}

#[test]
fn test_collection_path_constant() {
    assert_eq!(format!("/{CONNECTORS_PATH}"), COLLECTION);
}
