//! End-to-end tests for the search-and-resolve flow over the real reqwest transport.
//!
//! wiremock stands in for both the NASA search endpoint and the per-item
//! collection manifests.

use std::sync::Arc;

use nasa_media_search::{
    config::Config, AppError, ItemOutcome, MediaSearchService, MediaTransport, MediaType,
    NasaImagesClient, SearchFilters, SearchQuery,
};
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn item(server: &MockServer, id: &str, title: &str, media_type: &str) -> Value {
    json!({
        "href": format!("{}/{}/collection.json", server.uri(), id),
        "data": [{ "nasa_id": id, "title": title, "media_type": media_type }]
    })
}

fn client() -> Arc<NasaImagesClient> {
    Arc::new(NasaImagesClient::new(&Config::default()).unwrap())
}

async fn mount_collection(server: &MockServer, id: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/{}/collection.json", id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_single_item_end_to_end() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "mars"))
        .and(query_param("media_type", "image"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "collection": { "items": [item(&server, "PIA1", "Mars", "image")] }
        })))
        .expect(1)
        .mount(&server)
        .await;
    mount_collection(&server, "PIA1", json!({ "version": "1" })).await;

    let service = MediaSearchService::new(client(), server.uri());
    let outcomes = service.search("mars", "image").await.unwrap();

    assert_eq!(outcomes.len(), 1);
    let record = outcomes[0].record().unwrap();
    assert_eq!(record.id, "PIA1");
    assert_eq!(record.media_type, MediaType::Image);
    assert_eq!(record.title, "Mars");
    assert_eq!(record.description, None);
    assert_eq!(record.preview, None);
    assert_eq!(record.caption, None);
    assert_eq!(record.collection, json!({ "version": "1" }));
}

#[tokio::test]
async fn test_failed_detail_fetch_is_captured_in_place() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "collection": { "items": [
                item(&server, "A", "First", "image"),
                item(&server, "B", "Second", "image"),
                item(&server, "C", "Third", "image")
            ] }
        })))
        .mount(&server)
        .await;
    mount_collection(&server, "A", json!(["a.jpg"])).await;
    Mock::given(method("GET"))
        .and(path("/B/collection.json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_collection(&server, "C", json!(["c.jpg"])).await;

    let service = MediaSearchService::new(client(), server.uri());
    let outcomes = service.search("mars", "image").await.unwrap();

    assert_eq!(outcomes.len(), 3);
    assert_eq!(outcomes[0].record().unwrap().collection, json!(["a.jpg"]));
    assert!(matches!(
        outcomes[1],
        ItemOutcome::Failed(ref failure) if failure.id == "B" && failure.position == 2
    ));
    assert!(matches!(outcomes[1].error(), Some(AppError::ExternalApi(_))));
    assert_eq!(outcomes[2].record().unwrap().collection, json!(["c.jpg"]));
}

#[tokio::test]
async fn test_unparsable_detail_body_is_captured() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "collection": { "items": [item(&server, "A", "First", "video")] }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/A/collection.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let service = MediaSearchService::new(client(), server.uri());
    let outcomes = service.search("launch", "video").await.unwrap();

    assert_eq!(outcomes.len(), 1);
    assert!(outcomes[0].error().unwrap().is_transport());
}

#[tokio::test]
async fn test_primary_failure_aborts_run() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let service = MediaSearchService::new(client(), server.uri());
    let result = service.search("mars", "image").await;

    match result {
        Err(AppError::ExternalApi(message)) => assert!(message.contains("503")),
        other => panic!("expected ExternalApi error, got {:?}", other.map(|o| o.len())),
    }
}

#[tokio::test]
async fn test_validation_failure_sends_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let service = MediaSearchService::new(client(), server.uri());
    let result = service.search("", "").await;

    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn test_links_and_description_pass_through() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "collection": { "items": [{
                "href": format!("{}/V1/collection.json", server.uri()),
                "data": [{
                    "nasa_id": "V1",
                    "title": "Apollo 11 Launch",
                    "description": "Saturn V liftoff",
                    "media_type": "video"
                }],
                "links": [
                    { "rel": "preview", "href": "https://x/V1~thumb.jpg", "render": "image" },
                    { "rel": "captions", "href": "https://x/V1.srt" }
                ]
            }] }
        })))
        .mount(&server)
        .await;
    mount_collection(&server, "V1", json!(["V1~orig.mp4"])).await;

    let service = MediaSearchService::new(client(), server.uri());
    let outcomes = service.search("apollo", "video").await.unwrap();

    let value = serde_json::to_value(&outcomes[0]).unwrap();
    assert_eq!(
        value,
        json!({
            "status": "resolved",
            "id": "V1",
            "type": "video",
            "title": "Apollo 11 Launch",
            "description": "Saturn V liftoff",
            "preview": "https://x/V1~thumb.jpg",
            "caption": "https://x/V1.srt",
            "collection": ["V1~orig.mp4"]
        })
    );
}

#[tokio::test]
async fn test_full_filter_set_reaches_the_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("center", "JPL"))
        .and(query_param("page", "2"))
        .and(query_param("year_start", "2004"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "collection": { "items": [] }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let query = SearchQuery::new(SearchFilters {
        center: Some("JPL".to_string()),
        page: Some(2),
        year_start: Some("2004".to_string()),
        ..Default::default()
    })
    .unwrap();

    let service = MediaSearchService::new(client(), server.uri());
    let outcomes = service.search_query(query).await.unwrap();

    assert!(outcomes.is_empty());
}

#[tokio::test]
async fn test_user_agent_is_sent() {
    let server = MockServer::start().await;
    let config = Config {
        user_agent: "media-search-test/1.0".to_string(),
        ..Config::default()
    };

    Mock::given(method("GET"))
        .and(path("/ping.json"))
        .and(header("user-agent", "media-search-test/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    let transport = NasaImagesClient::new(&config).unwrap();
    let body = transport
        .fetch_detail(&format!("{}/ping.json", server.uri()))
        .await
        .unwrap();

    assert_eq!(body, json!({ "ok": true }));
}

#[tokio::test]
async fn test_media_types_merge_images_then_videos() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("media_type", "image"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "collection": { "items": [item(&server, "IMG1", "Nebula", "image")] }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("media_type", "video"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "collection": { "items": [
                item(&server, "VID1", "Flyby", "video"),
                item(&server, "VID2", "Landing", "video")
            ] }
        })))
        .mount(&server)
        .await;
    for id in ["IMG1", "VID1", "VID2"] {
        mount_collection(&server, id, json!({ "id": id })).await;
    }

    let service = MediaSearchService::new(client(), server.uri()).with_max_concurrency(Some(1));
    let outcomes = service
        .search_media_types("galaxy", &[MediaType::Image, MediaType::Video])
        .await
        .unwrap();

    let ids: Vec<_> = outcomes.iter().map(|o| o.id()).collect();
    assert_eq!(ids, vec!["IMG1", "VID1", "VID2"]);
    assert!(outcomes.iter().all(ItemOutcome::is_resolved));
}

#[tokio::test]
async fn test_query_without_media_type_requests_supported_types_only() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "apollo"))
        .and(query_param("media_type", "image,video"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "collection": { "items": [
                item(&server, "IMG", "Saturn V", "image"),
                item(&server, "VID", "Liftoff", "video")
            ] }
        })))
        .expect(1)
        .mount(&server)
        .await;
    mount_collection(&server, "IMG", json!(["img.jpg"])).await;
    mount_collection(&server, "VID", json!(["vid.mp4"])).await;

    let query = SearchQuery::new(SearchFilters {
        q: Some("apollo".to_string()),
        ..Default::default()
    })
    .unwrap();

    let service = MediaSearchService::new(client(), server.uri());
    let outcomes = service.search_query(query).await.unwrap();

    let ids: Vec<_> = outcomes.iter().map(|o| o.id()).collect();
    assert_eq!(ids, vec!["IMG", "VID"]);
    assert!(outcomes.iter().all(ItemOutcome::is_resolved));
}
