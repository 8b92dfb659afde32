// ── Capacity classifier ──
//
// Turns raw occupancy numbers into a status bucket and a fill percentage.
// Every view that shows a status (list cards, map pins, filters, details)
// goes through one `CapacityClassifier`, so the almost-full boundary is the
// same everywhere.

use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};

/// Vacancy rate below which a center counts as almost full.
pub const DEFAULT_ALMOST_FULL_THRESHOLD: f64 = 0.5;

/// Occupancy bucket for an evacuation center.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::AsRefStr,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
pub enum CapacityStatus {
    #[strum(serialize = "No capacity data")]
    NoData,
    #[strum(serialize = "Full")]
    Full,
    #[strum(serialize = "Almost Full")]
    AlmostFull,
    #[strum(serialize = "Plenty of space")]
    PlentyOfSpace,
}

impl CapacityStatus {
    /// Every status, in filter-bar order.
    pub fn all() -> Vec<Self> {
        Self::iter().collect()
    }

    /// Marker colour used by the map views.
    pub fn color(self) -> &'static str {
        match self {
            Self::NoData => "gray",
            Self::Full => "red",
            Self::AlmostFull => "orange",
            Self::PlentyOfSpace => "green",
        }
    }
}

/// Derived occupancy figures for one center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Occupancy {
    pub status: CapacityStatus,
    /// `occupied / capacity * 100`; exceeds 100 when over capacity, 0 when
    /// capacity is unknown.
    pub percent_full: f64,
    /// Free slots, floored at zero.
    pub vacancy: u32,
    /// `(capacity - occupied) / capacity`; `None` when capacity is 0.
    /// Negative when over capacity.
    pub vacancy_rate: Option<f64>,
}

impl Occupancy {
    /// `percent_full` rounded for display.
    pub fn percent_label(&self) -> String {
        format!("{:.0}%", self.percent_full)
    }
}

/// Capacity classifier with a single almost-full threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapacityClassifier {
    almost_full_threshold: f64,
}

impl Default for CapacityClassifier {
    fn default() -> Self {
        Self {
            almost_full_threshold: DEFAULT_ALMOST_FULL_THRESHOLD,
        }
    }
}

impl CapacityClassifier {
    /// Build a classifier. The threshold is a vacancy rate in `[0, 1]`;
    /// out-of-range values are clamped and non-finite values fall back to
    /// [`DEFAULT_ALMOST_FULL_THRESHOLD`].
    pub fn new(almost_full_threshold: f64) -> Self {
        let almost_full_threshold = if almost_full_threshold.is_finite() {
            almost_full_threshold.clamp(0.0, 1.0)
        } else {
            DEFAULT_ALMOST_FULL_THRESHOLD
        };
        Self {
            almost_full_threshold,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.almost_full_threshold
    }

    /// Classify a center. First match wins:
    ///
    /// 1. capacity 0 → `NoData`
    /// 2. occupied ≥ capacity → `Full`
    /// 3. vacancy rate < threshold → `AlmostFull`
    /// 4. otherwise → `PlentyOfSpace`
    pub fn classify(&self, capacity: u32, occupied: u32) -> Occupancy {
        if capacity == 0 {
            return Occupancy {
                status: CapacityStatus::NoData,
                percent_full: 0.0,
                vacancy: 0,
                vacancy_rate: None,
            };
        }

        let cap = f64::from(capacity);
        let occ = f64::from(occupied);
        let vacancy_rate = (cap - occ) / cap;

        let status = if occupied >= capacity {
            CapacityStatus::Full
        } else if vacancy_rate < self.almost_full_threshold {
            CapacityStatus::AlmostFull
        } else {
            CapacityStatus::PlentyOfSpace
        };

        Occupancy {
            status,
            percent_full: occ / cap * 100.0,
            vacancy: capacity.saturating_sub(occupied),
            vacancy_rate: Some(vacancy_rate),
        }
    }
}

/// Classify with the default threshold.
pub fn classify(capacity: u32, occupied: u32) -> Occupancy {
    CapacityClassifier::default().classify(capacity, occupied)
}
