// ── Portal facade ──
//
// One entry point for consumers. Owns the backend, geocoding, and routing
// clients plus the session store, and turns wire records into domain
// types. List fetches degrade: a failure is logged and the view falls back
// to an empty list. Requests are never coordinated with each other, so the
// last response to land is what the store holds.

use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, info, warn};

use sagip_api::{BackendClient, GeocodingClient, IncidentSubmission, RoutingClient};

use crate::address::{UNKNOWN_LOCATION, report_location_label, shorten_display_name};
use crate::capacity::CapacityClassifier;
use crate::config::PortalConfig;
use crate::error::CoreError;
use crate::filter::{CenterFilter, CenterView};
use crate::geo::{Coordinates, DistanceMetric};
use crate::location::{LocationProvider, locate};
use crate::model::{BarangayContact, EvacuationCenter, HazardMarker, sort_contacts};
use crate::report::IncidentDraft;
use crate::route::WalkingRoute;
use crate::sheet::{BottomSheet, Viewport};
use crate::store::{PortalStore, Snapshot};

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc<PortalInner>`.
#[derive(Clone)]
pub struct Portal {
    inner: Arc<PortalInner>,
}

struct PortalInner {
    config: PortalConfig,
    backend: BackendClient,
    geocoder: GeocodingClient,
    router: Option<RoutingClient>,
    classifier: CapacityClassifier,
    store: PortalStore,
}

impl Portal {
    /// Build every client from configuration. Fails only on malformed
    /// URLs, TLS setup, or an unusable API key; nothing is fetched yet.
    pub fn new(config: PortalConfig) -> Result<Self, CoreError> {
        let transport = config.transport();
        let backend =
            BackendClient::new(&config.backend_url, config.endpoints.clone(), &transport)?;
        let geocoder = GeocodingClient::new(&config.nominatim_url, &transport)?;
        let router = config
            .ors_api_key
            .as_ref()
            .map(|key| RoutingClient::from_api_key(&config.ors_url, key, &transport))
            .transpose()?;
        if router.is_none() {
            debug!("no OpenRouteService key configured; walking routes disabled");
        }
        Ok(Self::from_clients(config, backend, geocoder, router))
    }

    /// Assemble a portal from pre-built clients.
    pub fn from_clients(
        config: PortalConfig,
        backend: BackendClient,
        geocoder: GeocodingClient,
        router: Option<RoutingClient>,
    ) -> Self {
        let classifier = CapacityClassifier::new(config.almost_full_threshold);
        Self {
            inner: Arc::new(PortalInner {
                config,
                backend,
                geocoder,
                router,
                classifier,
                store: PortalStore::new(),
            }),
        }
    }

    pub fn config(&self) -> &PortalConfig {
        &self.inner.config
    }

    pub fn store(&self) -> &PortalStore {
        &self.inner.store
    }

    /// The classifier every view shares.
    pub fn classifier(&self) -> &CapacityClassifier {
        &self.inner.classifier
    }

    // ── Evacuation centers ───────────────────────────────────────────

    /// Fetch the center list and make it the current snapshot.
    pub async fn refresh_centers(&self) -> Result<Snapshot<EvacuationCenter>, CoreError> {
        let records = self.inner.backend.list_centers().await?;
        let centers: Vec<EvacuationCenter> =
            records.into_iter().map(EvacuationCenter::from).collect();
        self.inner.store.apply_centers(centers);
        debug!(centers = self.inner.store.center_count(), "center refresh complete");
        Ok(self.inner.store.centers())
    }

    /// Fetch the center list, falling back to an empty one on failure.
    pub async fn centers(&self) -> Snapshot<EvacuationCenter> {
        match self.refresh_centers().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(error = %e, "could not load evacuation centers");
                self.inner.store.apply_centers(Vec::new());
                self.inner.store.centers()
            }
        }
    }

    /// Fetch a single center's detail record.
    pub async fn center(&self, id: &str) -> Result<Arc<EvacuationCenter>, CoreError> {
        let record = self.inner.backend.get_center(id).await?;
        record
            .map(|r| Arc::new(EvacuationCenter::from(r)))
            .ok_or_else(|| CoreError::CenterNotFound {
                identifier: id.to_owned(),
            })
    }

    /// Apply `filter` to the current snapshot.
    pub fn filtered_centers(&self, filter: &CenterFilter) -> Vec<CenterView> {
        filter.apply(&self.inner.store.centers(), &self.inner.classifier)
    }

    /// Centers within the configured radius of `origin`, nearest first.
    ///
    /// Screening uses the flat degree approximation; the distances shown
    /// are great-circle, so the two can disagree right at the boundary.
    pub fn nearest_centers(&self, origin: Coordinates) -> Vec<CenterView> {
        let filter = CenterFilter::default()
            .nearest(origin, self.inner.config.nearest_radius_km, DistanceMetric::Planar)
            .sorted_by_distance();
        self.filtered_centers(&filter)
    }

    // ── Barangay contacts ────────────────────────────────────────────

    /// Fetch contacts, sorted by barangay name.
    pub async fn refresh_contacts(&self) -> Result<Snapshot<BarangayContact>, CoreError> {
        let records = self.inner.backend.list_contacts().await?;
        let mut contacts: Vec<BarangayContact> =
            records.into_iter().map(BarangayContact::from).collect();
        sort_contacts(&mut contacts);
        self.inner.store.apply_contacts(contacts);
        Ok(self.inner.store.contacts())
    }

    /// Fetch contacts, falling back to an empty list on failure.
    pub async fn contacts(&self) -> Snapshot<BarangayContact> {
        match self.refresh_contacts().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(error = %e, "could not load barangay contacts");
                self.inner.store.apply_contacts(Vec::new());
                self.inner.store.contacts()
            }
        }
    }

    // ── Hazard markers ───────────────────────────────────────────────

    /// Fetch hazard markers and fill in missing addresses.
    pub async fn refresh_hazards(&self) -> Result<Snapshot<HazardMarker>, CoreError> {
        self.refresh_hazards_with(true).await
    }

    /// Fetch hazard markers, reverse-geocoding missing addresses only when
    /// `backfill` is set.
    pub async fn refresh_hazards_with(
        &self,
        backfill: bool,
    ) -> Result<Snapshot<HazardMarker>, CoreError> {
        let records = self.inner.backend.list_hazards().await?;
        let mut markers: Vec<HazardMarker> =
            records.into_iter().map(HazardMarker::from).collect();
        if backfill {
            markers = self.backfill_addresses(markers).await;
        }
        self.inner.store.apply_hazards(markers);
        Ok(self.inner.store.hazards())
    }

    /// Fetch hazard markers, falling back to an empty list on failure.
    pub async fn hazards(&self) -> Snapshot<HazardMarker> {
        self.hazards_with(true).await
    }

    /// [`Portal::hazards`] with address backfill optional.
    pub async fn hazards_with(&self, backfill: bool) -> Snapshot<HazardMarker> {
        match self.refresh_hazards_with(backfill).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(error = %e, "could not load hazard markers");
                self.inner.store.apply_hazards(Vec::new());
                self.inner.store.hazards()
            }
        }
    }

    /// Reverse-geocode every placed marker that has no address. Lookups
    /// run concurrently; each failure only affects its own marker.
    pub async fn backfill_addresses(&self, markers: Vec<HazardMarker>) -> Vec<HazardMarker> {
        join_all(markers.into_iter().map(|mut marker| async move {
            let lookup = marker.coordinates.filter(|_| marker.address.is_none());
            if let Some(at) = lookup {
                marker.address = Some(self.place_name(at).await);
            }
            marker
        }))
        .await
    }

    /// Shortened display name for a point, or "Unknown location".
    pub async fn place_name(&self, at: Coordinates) -> String {
        match self.inner.geocoder.reverse(at.lat, at.lon).await {
            Ok(place) => place.display_name.map_or_else(
                || UNKNOWN_LOCATION.to_owned(),
                |name| shorten_display_name(&name, &self.inner.config.region_suffixes),
            ),
            Err(e) => {
                warn!(error = %e, %at, "reverse geocoding failed");
                UNKNOWN_LOCATION.to_owned()
            }
        }
    }

    // ── Incident reports ─────────────────────────────────────────────

    /// Compact address line for the report form. Falls back to the raw
    /// coordinates when geocoding fails.
    pub async fn report_location_label(&self, at: Coordinates) -> String {
        match self.inner.geocoder.reverse(at.lat, at.lon).await {
            Ok(place) => report_location_label(place.address.as_ref(), at),
            Err(e) => {
                warn!(error = %e, %at, "reverse geocoding failed");
                report_location_label(None, at)
            }
        }
    }

    /// Validate a draft and, only if it passes, send it.
    pub async fn submit_report(&self, draft: IncidentDraft) -> Result<(), CoreError> {
        let report = draft.validate()?;
        let severity = report.severity;
        self.inner
            .backend
            .submit_incident(IncidentSubmission::from(report))
            .await?;
        info!(%severity, "incident report submitted");
        Ok(())
    }

    // ── Routing & location ───────────────────────────────────────────

    /// Walking directions from `from` to a center.
    pub async fn walking_route(
        &self,
        from: Coordinates,
        center: &EvacuationCenter,
    ) -> Result<WalkingRoute, CoreError> {
        let router = self
            .inner
            .router
            .as_ref()
            .ok_or_else(|| CoreError::RoutingUnavailable {
                message: "no OpenRouteService API key configured".into(),
            })?;
        let to = center
            .coordinates
            .ok_or_else(|| CoreError::MissingCoordinates {
                entity: "Evacuation center",
                identifier: center.id.to_string(),
            })?;
        let feature = router.walking_route(from.as_tuple(), to.as_tuple()).await?;
        Ok(WalkingRoute::from(feature))
    }

    /// One-shot position fix with the configured timeout.
    pub async fn locate(&self, provider: &dyn LocationProvider) -> Result<Coordinates, CoreError> {
        locate(provider, self.inner.config.location_timeout).await
    }

    /// A drag controller sized for `viewport`, using the configured detents.
    pub fn bottom_sheet(&self, viewport: Viewport) -> BottomSheet {
        BottomSheet::new(self.inner.config.sheet.clone(), viewport)
    }
}
