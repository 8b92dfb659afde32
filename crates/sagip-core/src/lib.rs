//! Domain model and view logic between `sagip-api` and the portal's
//! consumers (the `sagip` CLI, or any UI shell).
//!
//! - **[`Portal`]**: Facade owning the backend, Nominatim, and
//!   OpenRouteService clients. List fetches degrade to empty snapshots on
//!   failure; reports are validated before any network call.
//!
//! - **[`PortalStore`]**: Session-scoped snapshots of centers, contacts, and
//!   hazard markers (`DashMap` index + `tokio::sync::watch`). The last
//!   response applied wins.
//!
//! - **[`CapacityClassifier`]**: Maps `(capacity, occupied)` onto a
//!   [`CapacityStatus`] and fill percentage.
//!
//! - **Geo-distance filtering** ([`geo`], [`filter`]): Radius screening and
//!   stable nearest-N ranking over anything [`Located`], plus the combined
//!   evacuation-center list filter.
//!
//! - **[`BottomSheet`]**: Drag controller for the map's bottom sheet: an
//!   explicit state machine with frame-coalesced moves and detent snapping.
//!   [`ScrollLock`] scopes page-scroll suppression to a guard's lifetime.

pub mod address;
pub mod barangay;
pub mod capacity;
pub mod config;
pub mod convert;
pub mod error;
pub mod filter;
pub mod geo;
pub mod location;
pub mod map;
pub mod model;
pub mod portal;
pub mod report;
pub mod route;
pub mod scroll;
pub mod sheet;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use capacity::{CapacityClassifier, CapacityStatus, Occupancy};
pub use config::{PortalConfig, TlsVerification};
pub use error::CoreError;
pub use filter::{CenterFilter, CenterView, ToggleSet};
pub use geo::{Coordinates, DistanceMetric, Located, Ranked};
pub use location::{FixedLocation, LocationProvider};
pub use map::MapView;
pub use portal::Portal;
pub use report::{IncidentDraft, IncidentReport, PhoneNumber, ReportValidationError, Severity};
pub use route::WalkingRoute;
pub use scroll::{ScrollGuard, ScrollLock};
pub use sheet::{
    BottomSheet, Detent, DetentHeights, InvalidSheetConfig, SheetConfig, SheetEffect, SheetEvent,
    SheetState, Viewport,
};
pub use store::{PortalStore, Snapshot};

// Re-export model types at the crate root for ergonomics.
pub use model::{BarangayContact, EvacuationCenter, HazardKind, HazardMarker, RecordId};
