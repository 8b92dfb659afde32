// ── Geo-distance filter ──
//
// Coordinates, distance metrics, and radius / nearest-N screening over
// anything with an optional position. Points without usable coordinates are
// dropped before any distance is computed; nothing here ever fails.

use geo::{Distance, Haversine, Point};
use serde::{Deserialize, Serialize};

/// Kilometres per degree used by the planar screening metric.
///
/// Exact only along meridians and the equator; east-west distances shrink
/// with `cos(latitude)`, so planar screening over-includes away from the
/// equator.
pub const KM_PER_DEGREE: f64 = 111.0;

/// A validated WGS84 position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    /// Validate a coordinate pair.
    ///
    /// Rejects non-finite or out-of-range values and any pair with a zero
    /// component: the backend writes `0` for "not set".
    pub fn new(lat: f64, lon: f64) -> Option<Self> {
        let valid = lat.is_finite()
            && lon.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lon)
            && lat != 0.0
            && lon != 0.0;
        valid.then_some(Self { lat, lon })
    }

    /// Build from the optional fields a wire record carries.
    pub fn from_parts(lat: Option<f64>, lon: Option<f64>) -> Option<Self> {
        Self::new(lat?, lon?)
    }

    fn point(self) -> Point<f64> {
        Point::new(self.lon, self.lat)
    }

    /// Great-circle distance in kilometres.
    pub fn haversine_km(self, other: Self) -> f64 {
        Haversine.distance(self.point(), other.point()) / 1000.0
    }

    /// Euclidean distance in degrees, converted with [`KM_PER_DEGREE`].
    pub fn planar_km(self, other: Self) -> f64 {
        (self.lat - other.lat).hypot(self.lon - other.lon) * KM_PER_DEGREE
    }

    /// `(lat, lon)` tuple, the order map widgets and routing helpers take.
    pub fn as_tuple(self) -> (f64, f64) {
        (self.lat, self.lon)
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.5}, {:.5}", self.lat, self.lon)
    }
}

/// Anything that may have a position on the map.
pub trait Located {
    fn coordinates(&self) -> Option<Coordinates>;
}

impl Located for Coordinates {
    fn coordinates(&self) -> Option<Coordinates> {
        Some(*self)
    }
}

impl<T: Located + ?Sized> Located for &T {
    fn coordinates(&self) -> Option<Coordinates> {
        (**self).coordinates()
    }
}

impl<T: Located + ?Sized> Located for std::sync::Arc<T> {
    fn coordinates(&self) -> Option<Coordinates> {
        (**self).coordinates()
    }
}

/// How to measure distance between two points.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DistanceMetric {
    /// Great-circle distance on a spherical earth. Used for display.
    #[default]
    Haversine,
    /// Flat degree distance times [`KM_PER_DEGREE`]. Cheap screening only.
    Planar,
}

impl DistanceMetric {
    pub fn km(self, a: Coordinates, b: Coordinates) -> f64 {
        match self {
            Self::Haversine => a.haversine_km(b),
            Self::Planar => a.planar_km(b),
        }
    }
}

/// A point paired with its distance from some origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranked<T> {
    pub item: T,
    pub distance_km: f64,
}

/// Keep the points within `radius_km` of `origin`, in input order.
///
/// Points without usable coordinates are excluded regardless of radius.
pub fn within_radius<T: Located>(
    origin: Coordinates,
    points: impl IntoIterator<Item = T>,
    radius_km: f64,
    metric: DistanceMetric,
) -> Vec<T> {
    points
        .into_iter()
        .filter(|p| {
            p.coordinates()
                .is_some_and(|c| metric.km(origin, c) <= radius_km)
        })
        .collect()
}

/// Rank located points by distance from `origin`, nearest first.
///
/// The sort is stable: points at equal distance keep their input order.
/// `limit` of `None` ranks everything.
pub fn nearest<T: Located>(
    origin: Coordinates,
    points: impl IntoIterator<Item = T>,
    limit: Option<usize>,
    metric: DistanceMetric,
) -> Vec<Ranked<T>> {
    let mut ranked: Vec<Ranked<T>> = points
        .into_iter()
        .filter_map(|item| {
            let at = item.coordinates()?;
            Some(Ranked {
                distance_km: metric.km(origin, at),
                item,
            })
        })
        .collect();
    ranked.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    if let Some(n) = limit {
        ranked.truncate(n);
    }
    ranked
}
