//! HTTP client tests against a local mock backend.

use serde_json::json;
use sightseer_core::api::{ApiError, AttractionApi, HttpAttractionClient};
use std::time::Duration;
use tracing_subscriber::{prelude::*, EnvFilter};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .try_init();
}

fn client_for(server: &MockServer) -> HttpAttractionClient {
    init_tracing();
    HttpAttractionClient::with_base_url(&server.uri(), Duration::from_secs(5))
}

fn hermitage() -> serde_json::Value {
    json!({
        "id": 1,
        "name": "Hermitage",
        "city": "Saint Petersburg",
        "address": "Palace Square, 2",
        "description_short": "Art museum",
        "average_rating": 4.8,
        "main_photo_url": "https://example.org/hermitage.jpg",
        "latitude": 59.9398,
        "longitude": 30.3146
    })
}

#[tokio::test]
async fn city_search_posts_city_and_reads_dedicated_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/cities/"))
        .and(body_json(json!({ "city": "Saint Petersburg" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "attractions": [hermitage()] })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let attractions = client_for(&server)
        .search_by_city("Saint Petersburg")
        .await
        .expect("city search");

    assert_eq!(attractions.len(), 1);
    assert_eq!(attractions[0].name, "Hermitage");
    assert_eq!(attractions[0].description, "Art museum");
    assert_eq!(attractions[0].rating(), Some(4.8));
}

#[tokio::test]
async fn city_search_accepts_paged_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/cities/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 2,
            "next": null,
            "results": [hermitage(), { "id": 2, "name": "Kunstkamera" }]
        })))
        .mount(&server)
        .await;

    let attractions = client_for(&server)
        .search_by_city("Saint Petersburg")
        .await
        .expect("city search");

    let names: Vec<_> = attractions.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, ["Hermitage", "Kunstkamera"]);
    assert_eq!(attractions[1].address, "");
    assert_eq!(attractions[1].rating(), None);
}

#[tokio::test]
async fn unknown_list_shape_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/cities/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([hermitage()])))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .search_by_city("Saint Petersburg")
        .await
        .expect_err("bare array is not a known envelope");
    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn server_error_is_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/cities/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database unavailable"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .search_by_city("Moscow")
        .await
        .expect_err("500 must fail");
    match err {
        ApiError::Status { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "database unavailable");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn location_search_sends_fixed_precision_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/map/attractions/"))
        .and(query_param("lat", "55.751244"))
        .and(query_param("lng", "37.618423"))
        .and(query_param("radius", "0.010000"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "results": [hermitage()] })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let attractions = client_for(&server)
        .search_by_location(55.751_244, 37.618_423, 0.01)
        .await
        .expect("location search");
    assert_eq!(attractions.len(), 1);
}

#[tokio::test]
async fn detail_is_fetched_by_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/attractions/5/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 5,
            "name": "Bolshoi Theatre",
            "description_short": "Opera house",
            "description": "Historic theatre for ballet and opera.",
            "phone_number": "+7 495 455-55-55",
            "website": "",
            "additional_photos": ["https://example.org/1.jpg"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let detail = client_for(&server)
        .attraction_detail(5)
        .await
        .expect("detail");

    assert_eq!(detail.id, 5);
    assert_eq!(detail.best_description(), "Historic theatre for ballet and opera.");
    assert_eq!(detail.phone, "+7 495 455-55-55");
    assert!(detail.website.is_empty());
    assert_eq!(detail.photos.len(), 1);
}

#[tokio::test]
async fn ill_formed_text_is_cleaned_before_decoding() {
    let server = MockServer::start().await;
    let mut body = br#"{"attractions":[{"id":3,"name":"Caf"#.to_vec();
    body.extend_from_slice(b"\xC3\xA9\xFF Pushkin");
    body.extend_from_slice(br#""}]}"#);

    Mock::given(method("POST"))
        .and(path("/cities/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(body, "application/json"),
        )
        .mount(&server)
        .await;

    let attractions = client_for(&server)
        .search_by_city("Moscow")
        .await
        .expect("cleaned body decodes");
    assert_eq!(attractions[0].name, "Café Pushkin");
}

#[tokio::test]
async fn unreachable_backend_is_network_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let client =
        HttpAttractionClient::with_base_url(&format!("http://{addr}"), Duration::from_secs(2));
    let err = client
        .attraction_detail(1)
        .await
        .expect_err("nothing is listening");
    assert!(matches!(err, ApiError::Network(_)));
}

#[tokio::test]
async fn configured_timeout_is_applied() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/attractions/1/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "id": 1, "name": "Slow" }))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    init_tracing();
    let client = HttpAttractionClient::with_base_url(&server.uri(), Duration::from_millis(200));
    let err = client
        .attraction_detail(1)
        .await
        .expect_err("response arrives after the timeout");
    assert!(matches!(err, ApiError::Network(_)));
}
