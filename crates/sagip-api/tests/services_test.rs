#![allow(clippy::unwrap_used)]
// Integration tests for the Nominatim and OpenRouteService clients.

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sagip_api::{Error, GeocodingClient, RoutingClient, TransportConfig};

// ── Geocoding ───────────────────────────────────────────────────────

async fn geocoder() -> (MockServer, GeocodingClient) {
    let server = MockServer::start().await;
    let client =
        GeocodingClient::with_client(reqwest::Client::new(), &format!("{}/reverse", server.uri()))
            .unwrap();
    (server, client)
}

#[tokio::test]
async fn test_reverse_geocode() {
    let (server, client) = geocoder().await;

    Mock::given(method("GET"))
        .and(path("/reverse"))
        .and(query_param("format", "jsonv2"))
        .and(query_param("lat", "14.1709"))
        .and(query_param("lon", "121.244"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "display_name": "Dayap, Calauan, Laguna, Calabarzon, Philippines",
            "address": { "village": "Dayap", "town": "Calauan" }
        })))
        .mount(&server)
        .await;

    let place = client.reverse(14.1709, 121.244).await.unwrap();
    assert_eq!(
        place.display_name.as_deref(),
        Some("Dayap, Calauan, Laguna, Calabarzon, Philippines")
    );
    assert_eq!(place.address.unwrap().village.as_deref(), Some("Dayap"));
}

#[tokio::test]
async fn test_reverse_geocode_unable_to_geocode() {
    let (server, client) = geocoder().await;

    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "error": "Unable to geocode" })),
        )
        .mount(&server)
        .await;

    let result = client.reverse(0.5, 0.5).await;
    assert!(
        matches!(result, Err(Error::Geocoding { ref message }) if message == "Unable to geocode"),
        "expected Geocoding error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_reverse_geocode_rate_limited() {
    let (server, client) = geocoder().await;

    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "3"))
        .mount(&server)
        .await;

    let result = client.reverse(14.17, 121.24).await;
    assert!(
        matches!(result, Err(Error::RateLimited { retry_after_secs: 3 })),
        "expected RateLimited error, got: {result:?}"
    );
}

// ── Routing ─────────────────────────────────────────────────────────

fn route_body() -> serde_json::Value {
    json!({
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "geometry": {
                "type": "LineString",
                "coordinates": [[121.244, 14.1709], [121.245, 14.1712], [121.246, 14.1720]]
            },
            "properties": {
                "segments": [{
                    "distance": 1234.5,
                    "duration": 888.8,
                    "steps": [
                        { "distance": 200.0, "duration": 144.0, "instruction": "Head north on Rizal Street", "name": "Rizal Street" },
                        { "distance": 1034.5, "duration": 744.8, "instruction": "Turn right", "name": "-" }
                    ]
                }]
            }
        }]
    })
}

#[tokio::test]
async fn test_walking_route_sends_key_and_body() {
    let server = MockServer::start().await;
    let key: secrecy::SecretString = "ors-test-key".to_string().into();
    let client =
        RoutingClient::from_api_key(&server.uri(), &key, &TransportConfig::default()).unwrap();

    Mock::given(method("POST"))
        .and(path("/v2/directions/foot-walking/geojson"))
        .and(header("authorization", "ors-test-key"))
        .and(body_partial_json(json!({
            "coordinates": [[121.244, 14.1709], [121.246, 14.172]],
            "preference": "shortest"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(route_body()))
        .expect(1)
        .mount(&server)
        .await;

    let feature = client
        .walking_route((14.1709, 121.244), (14.172, 121.246))
        .await
        .unwrap();
    assert_eq!(feature.geometry.coordinates.len(), 3);
    let segment = &feature.properties.segments[0];
    assert!((segment.distance - 1234.5).abs() < f64::EPSILON);
    assert_eq!(segment.steps[0].instruction, "Head north on Rizal Street");
}

#[tokio::test]
async fn test_walking_route_forbidden() {
    let server = MockServer::start().await;
    let client = RoutingClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();

    Mock::given(method("POST"))
        .and(path("/v2/directions/foot-walking/geojson"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(json!({ "error": "Access to this API has been disallowed" })),
        )
        .mount(&server)
        .await;

    let result = client.walking_route((14.17, 121.24), (14.18, 121.25)).await;
    match result {
        Err(Error::Routing { message, status }) => {
            assert_eq!(message, "Access to this API has been disallowed");
            assert_eq!(status, Some(403));
        }
        other => panic!("expected Routing error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_walking_route_empty_features() {
    let server = MockServer::start().await;
    let client = RoutingClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();

    Mock::given(method("POST"))
        .and(path("/v2/directions/foot-walking/geojson"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "features": [] })))
        .mount(&server)
        .await;

    let result = client.walking_route((14.17, 121.24), (14.18, 121.25)).await;
    assert!(
        matches!(result, Err(Error::Routing { status: None, .. })),
        "expected Routing error, got: {result:?}"
    );
}
