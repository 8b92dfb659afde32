// ── View filters ──
//
// `CenterFilter` combines the evacuation-center list controls (search box,
// barangay picker, status chips, "nearest" toggle) into one pass over a
// snapshot. `ToggleSet` implements the chip-bar behaviour shared by the
// status and hazard-kind filters. Records without usable coordinates never
// reach a map layer.

use std::sync::Arc;

use serde::Serialize;

use crate::barangay;
use crate::capacity::{CapacityClassifier, CapacityStatus, Occupancy};
use crate::geo::{Coordinates, DistanceMetric, Located};
use crate::model::{EvacuationCenter, HazardKind, HazardMarker};

/// Radius for the "nearest centers" toggle.
pub const DEFAULT_NEAREST_RADIUS_KM: f64 = 2.0;

// ── Toggle chips ─────────────────────────────────────────────────────

/// A set of filter chips over a fixed universe.
///
/// Starts with every chip active. While all are active, clicking one
/// isolates it. Otherwise clicking flips it, and switching off the last
/// active chip switches everything back on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleSet<T> {
    universe: Vec<T>,
    active: Vec<T>,
}

impl<T: Clone + PartialEq> ToggleSet<T> {
    pub fn all(universe: impl IntoIterator<Item = T>) -> Self {
        let universe: Vec<T> = universe.into_iter().collect();
        Self {
            active: universe.clone(),
            universe,
        }
    }

    pub fn toggle(&mut self, item: &T) {
        if !self.universe.contains(item) {
            return;
        }
        if self.all_active() {
            self.active = vec![item.clone()];
        } else if self.active.contains(item) {
            self.active.retain(|t| t != item);
            if self.active.is_empty() {
                self.reset();
            }
        } else {
            let universe = &self.universe;
            self.active.push(item.clone());
            self.active.sort_by_key(|t| universe.iter().position(|u| u == t));
        }
    }

    pub fn reset(&mut self) {
        self.active = self.universe.clone();
    }

    pub fn is_active(&self, item: &T) -> bool {
        self.active.contains(item)
    }

    pub fn all_active(&self) -> bool {
        self.active.len() == self.universe.len()
    }

    /// Active chips in universe order.
    pub fn active(&self) -> &[T] {
        &self.active
    }

    pub fn universe(&self) -> &[T] {
        &self.universe
    }
}

// ── Hazard layers ────────────────────────────────────────────────────

/// Markers drawn on the evacuation map's risk layer: hazards only, no
/// hospitals or pharmacies, and only those that can be placed.
pub fn risk_layer(markers: &[Arc<HazardMarker>]) -> Vec<Arc<HazardMarker>> {
    markers
        .iter()
        .filter(|m| !m.kind.is_facility() && m.coordinates.is_some())
        .cloned()
        .collect()
}

/// Placeable markers whose kind is switched on. Kinds outside the chip bar
/// only show while every chip is active.
pub fn hazards_matching(
    markers: &[Arc<HazardMarker>],
    kinds: &ToggleSet<HazardKind>,
) -> Vec<Arc<HazardMarker>> {
    markers
        .iter()
        .filter(|m| m.coordinates.is_some())
        .filter(|m| {
            if kinds.universe().contains(&m.kind) {
                kinds.is_active(&m.kind)
            } else {
                kinds.all_active()
            }
        })
        .cloned()
        .collect()
}

// ── Center filter ────────────────────────────────────────────────────

/// A center annotated for display.
#[derive(Debug, Clone, Serialize)]
pub struct CenterView {
    pub center: Arc<EvacuationCenter>,
    pub occupancy: Occupancy,
    /// Great-circle distance from the user, when their location is known.
    pub distance_km: Option<f64>,
}

/// Filters for the evacuation-center list. The default shows everything.
#[derive(Debug, Clone, Default)]
pub struct CenterFilter {
    /// Case-insensitive substring of the center name.
    pub search: Option<String>,
    /// Barangay name or slug; `None` or `"all"` for every barangay.
    pub barangay: Option<String>,
    /// Statuses to keep; empty keeps all.
    pub statuses: Vec<CapacityStatus>,
    /// User location, used for distance display and the nearest screen.
    pub origin: Option<Coordinates>,
    /// When set (and `origin` is known), keep only centers this close.
    pub nearest_within_km: Option<f64>,
    /// Metric for the nearest screen. Displayed distances are always
    /// great-circle.
    pub screening: DistanceMetric,
    /// Order results nearest first (stable) instead of backend order.
    pub sort_by_distance: bool,
}

impl CenterFilter {
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    pub fn barangay(mut self, name: impl Into<String>) -> Self {
        self.barangay = Some(name.into());
        self
    }

    pub fn statuses(mut self, statuses: impl IntoIterator<Item = CapacityStatus>) -> Self {
        self.statuses = statuses.into_iter().collect();
        self
    }

    pub fn origin(mut self, origin: Coordinates) -> Self {
        self.origin = Some(origin);
        self
    }

    /// Keep centers within `radius_km` of `origin`, screened with `metric`.
    pub fn nearest(mut self, origin: Coordinates, radius_km: f64, metric: DistanceMetric) -> Self {
        self.origin = Some(origin);
        self.nearest_within_km = Some(radius_km);
        self.screening = metric;
        self
    }

    pub fn sorted_by_distance(mut self) -> Self {
        self.sort_by_distance = true;
        self
    }

    fn matches_search(&self, center: &EvacuationCenter) -> bool {
        match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(needle) => center
                .name
                .to_lowercase()
                .contains(&needle.to_lowercase()),
        }
    }

    fn matches_barangay(&self, center: &EvacuationCenter) -> bool {
        match self.barangay.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(wanted) if wanted.eq_ignore_ascii_case("all") => true,
            Some(wanted) => center
                .barangay()
                .is_some_and(|have| barangay::same(have, wanted)),
        }
    }

    fn within_reach(&self, center: &EvacuationCenter) -> bool {
        match (self.origin, self.nearest_within_km) {
            (Some(origin), Some(radius)) => center
                .coordinates()
                .is_some_and(|at| self.screening.km(origin, at) <= radius),
            _ => true,
        }
    }

    /// Apply every filter to a snapshot, in input order unless
    /// `sort_by_distance` is set.
    pub fn apply(
        &self,
        centers: &[Arc<EvacuationCenter>],
        classifier: &CapacityClassifier,
    ) -> Vec<CenterView> {
        let mut views: Vec<CenterView> = centers
            .iter()
            .filter(|c| self.matches_search(c) && self.matches_barangay(c))
            .filter_map(|c| {
                let occupancy = c.occupancy(classifier);
                if !self.statuses.is_empty() && !self.statuses.contains(&occupancy.status) {
                    return None;
                }
                Some(CenterView {
                    center: Arc::clone(c),
                    occupancy,
                    distance_km: None,
                })
            })
            .filter(|v| self.within_reach(&v.center))
            .collect();

        if let Some(origin) = self.origin {
            for view in &mut views {
                view.distance_km = view.center.coordinates().map(|at| origin.haversine_km(at));
            }
            if self.sort_by_distance {
                // Centers without coordinates sort last.
                views.sort_by(|a, b| {
                    let a = a.distance_km.unwrap_or(f64::INFINITY);
                    let b = b.distance_km.unwrap_or(f64::INFINITY);
                    a.total_cmp(&b)
                });
            }
        }
        views
    }
}
