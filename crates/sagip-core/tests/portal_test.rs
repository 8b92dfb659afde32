#![allow(clippy::unwrap_used)]
// Integration tests for `Portal` against mocked backend, Nominatim, and
// OpenRouteService servers.

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sagip_api::{BackendClient, Endpoints, GeocodingClient, RoutingClient};
use sagip_core::{
    CapacityStatus, CenterFilter, Coordinates, CoreError, Detent, FixedLocation, HazardKind,
    IncidentDraft, Portal, PortalConfig, RecordId, ReportValidationError, Severity, SheetEffect,
    SheetEvent, Viewport,
};

// ── Helpers ─────────────────────────────────────────────────────────

const CENTERS: &str = "/Disaster-backend/controllers/evacuationCenterController.php";
const CONTACTS: &str = "/Disaster-backend/public/barangayContact.php";
const HAZARDS: &str = "/Disaster-backend/public/disasterMapping.php";
const INCIDENTS: &str = "/Disaster-backend/public/createIncident.php";

async fn setup(with_router: bool) -> (MockServer, Portal) {
    let server = MockServer::start().await;
    let http = reqwest::Client::new();
    let backend = BackendClient::with_client(
        http.clone(),
        &format!("{}/Disaster-backend", server.uri()),
        Endpoints::default(),
    )
    .unwrap();
    let geocoder =
        GeocodingClient::with_client(http.clone(), &format!("{}/reverse", server.uri())).unwrap();
    let router = with_router
        .then(|| RoutingClient::from_reqwest(&format!("{}/ors", server.uri()), http).unwrap());
    let portal = Portal::from_clients(PortalConfig::default(), backend, geocoder, router);
    (server, portal)
}

fn here() -> Coordinates {
    Coordinates::new(14.170, 121.240).unwrap()
}

fn center_rows() -> serde_json::Value {
    json!([
        { "id": 1, "name": "Bayog Covered Court", "capacity": "50", "current_evacuees": "50",
          "lat": "14.170", "long": "121.240", "created_by": "admin, Bayog" },
        { "id": "2", "name": "Bayog Chapel", "capacity": 100, "current_evacuees": 10,
          "lat": 14.172, "long": 121.242, "created_by": "admin, Bayog" },
        { "id": 3, "name": "Timugan School", "capacity": 0, "current_evacuees": 0,
          "lat": null, "long": "", "created_by": "admin, Timugan" },
        { "id": 4, "name": "Far Gym", "capacity": 80, "current_evacuees": 60,
          "lat": 14.620, "long": 121.240, "created_by": "admin, Bagong Silang" }
    ])
}

fn draft() -> IncidentDraft {
    IncidentDraft {
        reporter_name: "Ana Reyes".into(),
        reporter_contact: "639171234567".into(),
        description: "Flooded underpass".into(),
        severity: Some(Severity::Critical),
        location: Some(here()),
        photo: None,
    }
    .with_photo("flood.png", vec![0x89, 0x50, 0x4E, 0x47])
}

// ── Centers ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_centers_classified_and_filtered() {
    let (server, portal) = setup(false).await;
    Mock::given(method("GET"))
        .and(path(CENTERS))
        .respond_with(ResponseTemplate::new(200).set_body_json(center_rows()))
        .mount(&server)
        .await;

    let centers = portal.centers().await;
    assert_eq!(centers.len(), 4);

    let views = portal.filtered_centers(&CenterFilter::default());
    assert_eq!(views[0].occupancy.status, CapacityStatus::Full);
    assert!((views[0].occupancy.percent_full - 100.0).abs() < f64::EPSILON);
    assert_eq!(views[2].occupancy.status, CapacityStatus::NoData);
    assert!(views[2].center.coordinates.is_none());

    let near: Vec<String> = portal
        .nearest_centers(here())
        .iter()
        .map(|v| v.center.id.to_string())
        .collect();
    assert_eq!(near, vec!["1", "2"]);

    assert!(portal.store().center(&RecordId::from("4")).is_some());
}

#[tokio::test]
async fn test_centers_degrade_to_empty() {
    let (server, portal) = setup(false).await;
    Mock::given(method("GET"))
        .and(path(CENTERS))
        .respond_with(ResponseTemplate::new(200).set_body_json(center_rows()))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(CENTERS))
        .respond_with(ResponseTemplate::new(500).set_body_string("Fatal error"))
        .mount(&server)
        .await;

    assert_eq!(portal.centers().await.len(), 4);

    let err = portal.refresh_centers().await.unwrap_err();
    assert!(matches!(err, CoreError::Api { status: Some(500), .. }));

    assert!(portal.centers().await.is_empty());
    assert_eq!(portal.store().centers_version(), 2);
}

#[tokio::test]
async fn test_center_detail_not_found() {
    let (server, portal) = setup(false).await;
    Mock::given(method("GET"))
        .and(path(CENTERS))
        .and(query_param("id", "99"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(null)))
        .mount(&server)
        .await;

    let err = portal.center("99").await.unwrap_err();
    assert_eq!(err.to_string(), "Evacuation center not found: 99");
}

// ── Contacts ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_contacts_sorted_by_barangay() {
    let (server, portal) = setup(false).await;
    Mock::given(method("GET"))
        .and(path(CONTACTS))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "barangay_name": "timugan", "lat": "14.16", "lng": "121.23" },
            { "id": 2, "barangay_name": "Anos", "faceebook_page": "fb.com/anos",
              "lat": 0, "lng": 0 }
        ])))
        .mount(&server)
        .await;

    let contacts = portal.contacts().await;
    let names: Vec<String> = contacts.iter().map(|c| c.display_name()).collect();
    assert_eq!(names, vec!["Anos", "Timugan"]);
    assert!(!contacts[0].has_location());
    assert_eq!(contacts[0].facebook_page.as_deref(), Some("fb.com/anos"));
}

#[tokio::test]
async fn test_contacts_degrade_on_garbage() {
    let (server, portal) = setup(false).await;
    Mock::given(method("GET"))
        .and(path(CONTACTS))
        .respond_with(ResponseTemplate::new(200).set_body_string("<br /><b>Warning</b>"))
        .mount(&server)
        .await;

    assert!(portal.contacts().await.is_empty());
}

// ── Hazards ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_hazard_addresses_backfilled() {
    let (server, portal) = setup(false).await;
    Mock::given(method("GET"))
        .and(path(HAZARDS))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [
                { "id": 1, "type": "Flood", "lat": "14.1709", "lng": "121.244" },
                { "id": 2, "type": "FallenTree", "lat": "14.18", "lng": "121.25",
                  "address": "Lopez Avenue" },
                { "id": 3, "type": "Hospital", "lat": "14.19", "lng": "121.26" }
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/reverse"))
        .and(query_param("lat", "14.1709"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "display_name": "Jamboree Road, Timugan, Los Baños, Laguna, Calabarzon, 4031, Philippines"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/reverse"))
        .and(query_param("lat", "14.19"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let hazards = portal.hazards().await;
    assert_eq!(hazards.len(), 3);
    assert_eq!(
        hazards[0].address.as_deref(),
        Some("Jamboree Road, Timugan, Los Baños, 4031")
    );
    assert_eq!(hazards[1].kind, HazardKind::FallenTree);
    assert_eq!(hazards[1].address.as_deref(), Some("Lopez Avenue"));
    assert_eq!(hazards[2].address.as_deref(), Some("Unknown location"));
}

#[tokio::test]
async fn test_hazards_unsuccessful_envelope_is_empty() {
    let (server, portal) = setup(false).await;
    Mock::given(method("GET"))
        .and(path(HAZARDS))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "success": false, "error": "DB down" })),
        )
        .mount(&server)
        .await;

    assert!(portal.hazards().await.is_empty());
}

#[tokio::test]
async fn test_store_subscribers_see_refreshes() {
    let (server, portal) = setup(false).await;
    Mock::given(method("GET"))
        .and(path(CENTERS))
        .respond_with(ResponseTemplate::new(200).set_body_json(center_rows()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(CONTACTS))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "barangay_name": "Anos", "lat": 0, "lng": 0 }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(HAZARDS))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [{ "id": 7, "type": "Landslide", "lat": "14.18", "lng": "121.25",
                       "address": "Mt. Makiling trail" }]
        })))
        .mount(&server)
        .await;

    let mut centers = portal.store().subscribe_centers();
    let mut contacts = portal.store().subscribe_contacts();
    let mut hazards = portal.store().subscribe_hazards();
    assert!(!centers.has_changed().unwrap());

    portal.centers().await;
    portal.contacts().await;
    portal.hazards().await;

    assert!(centers.has_changed().unwrap());
    assert_eq!(centers.borrow_and_update().len(), 4);
    assert!(contacts.has_changed().unwrap());
    assert_eq!(contacts.borrow_and_update()[0].display_name(), "Anos");
    assert!(hazards.has_changed().unwrap());
    assert_eq!(hazards.borrow_and_update()[0].kind, HazardKind::Landslide);
    assert!(!centers.has_changed().unwrap());
}

// ── Bottom sheet ────────────────────────────────────────────────────

#[tokio::test]
async fn test_bottom_sheet_uses_configured_detents() {
    let (_server, portal) = setup(false).await;
    let mut sheet = portal.bottom_sheet(Viewport::new(400.0, 1000.0));
    assert_eq!(sheet.detent(), Detent::Collapsed);
    assert!((sheet.current_height() - 170.0).abs() < 1e-6);

    sheet.handle(SheetEvent::PointerDown { y: 900.0 });
    sheet.handle(SheetEvent::PointerMove { y: 0.0 });
    sheet.handle(SheetEvent::Frame);
    match sheet.handle(SheetEvent::PointerUp) {
        SheetEffect::Snap(t) => assert_eq!(t.detent, Detent::Full),
        other => panic!("expected Snap, got {other:?}"),
    }
    assert!((sheet.current_height() - 900.0).abs() < 1e-6);
}

// ── Reports ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_invalid_report_never_hits_network() {
    let (server, portal) = setup(false).await;
    Mock::given(method("POST"))
        .and(path(INCIDENTS))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(0)
        .mount(&server)
        .await;

    let mut bad = draft();
    bad.reporter_contact = "09171234567".into();
    let err = portal.submit_report(bad).await.unwrap_err();
    assert!(matches!(
        err,
        CoreError::ValidationFailed(ReportValidationError::InvalidPhone)
    ));
}

#[tokio::test]
async fn test_report_submitted() {
    let (server, portal) = setup(false).await;
    Mock::given(method("POST"))
        .and(path(INCIDENTS))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    portal.submit_report(draft()).await.unwrap();
}

#[tokio::test]
async fn test_report_rejected_by_backend() {
    let (server, portal) = setup(false).await;
    Mock::given(method("POST"))
        .and(path(INCIDENTS))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "success": false, "error": "Invalid file type" })),
        )
        .mount(&server)
        .await;

    let err = portal.submit_report(draft()).await.unwrap_err();
    assert_eq!(err.to_string(), "Rejected by backend: Invalid file type");
}

#[tokio::test]
async fn test_report_location_label_falls_back() {
    let (server, portal) = setup(false).await;
    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    assert_eq!(
        portal.report_location_label(here()).await,
        "Unnamed area near (14.17000, 121.24000)"
    );
}

// ── Routing & location ──────────────────────────────────────────────

#[tokio::test]
async fn test_walking_route_to_center() {
    let (server, portal) = setup(true).await;
    Mock::given(method("GET"))
        .and(path(CENTERS))
        .respond_with(ResponseTemplate::new(200).set_body_json(center_rows()))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/ors/v2/directions/foot-walking/geojson"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "features": [{
                "geometry": { "coordinates": [[121.240, 14.170], [121.242, 14.172]] },
                "properties": { "segments": [{
                    "distance": 320.0, "duration": 230.0,
                    "steps": [{ "distance": 320.0, "duration": 230.0,
                                "instruction": "Head northeast" }]
                }]}
            }]
        })))
        .mount(&server)
        .await;

    let centers = portal.centers().await;
    let route = portal.walking_route(here(), &centers[1]).await.unwrap();
    assert_eq!(route.path[1], [14.172, 121.242]);
    assert_eq!(route.steps[0].text, "Head northeast in 320 m");

    let err = portal.walking_route(here(), &centers[2]).await.unwrap_err();
    assert!(matches!(err, CoreError::MissingCoordinates { .. }));
}

#[tokio::test]
async fn test_walking_route_without_key() {
    let (_server, portal) = setup(false).await;
    let center = sagip_core::EvacuationCenter {
        id: RecordId::from("1"),
        name: "Gym".into(),
        location: String::new(),
        capacity: 10,
        current_evacuees: 0,
        contact_person: None,
        contact_number: None,
        coordinates: Some(here()),
        created_by: None,
    };
    let err = portal.walking_route(here(), &center).await.unwrap_err();
    assert!(matches!(err, CoreError::RoutingUnavailable { .. }));
}

#[tokio::test]
async fn test_locate_denied() {
    let (_server, portal) = setup(false).await;
    let err = portal.locate(&FixedLocation::denied()).await.unwrap_err();
    assert!(matches!(err, CoreError::LocationUnavailable { .. }));
    assert_eq!(portal.locate(&FixedLocation::at(here())).await.unwrap(), here());
}
