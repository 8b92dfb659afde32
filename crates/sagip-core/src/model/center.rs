use serde::Serialize;

use crate::barangay;
use crate::capacity::{CapacityClassifier, Occupancy};
use crate::geo::{Coordinates, Located};
use crate::model::RecordId;

/// An evacuation center as last reported by the backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvacuationCenter {
    pub id: RecordId,
    pub name: String,
    /// Free-text address label.
    pub location: String,
    /// 0 means the backend has no capacity figure.
    pub capacity: u32,
    /// May exceed `capacity`.
    pub current_evacuees: u32,
    pub contact_person: Option<String>,
    pub contact_number: Option<String>,
    pub coordinates: Option<Coordinates>,
    pub created_by: Option<String>,
}

impl EvacuationCenter {
    /// Barangay derived from `created_by`.
    pub fn barangay(&self) -> Option<&str> {
        self.created_by.as_deref().and_then(barangay::from_created_by)
    }

    /// Logo shown on the center card.
    pub fn logo_file(&self) -> String {
        barangay::logo_file(self.barangay())
    }

    /// Free slots, floored at zero.
    pub fn vacancy(&self) -> u32 {
        self.capacity.saturating_sub(self.current_evacuees)
    }

    /// Status and fill percentage under `classifier`.
    pub fn occupancy(&self, classifier: &CapacityClassifier) -> Occupancy {
        classifier.classify(self.capacity, self.current_evacuees)
    }
}

impl Located for EvacuationCenter {
    fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::capacity::CapacityStatus;

    fn center(capacity: u32, current_evacuees: u32) -> EvacuationCenter {
        EvacuationCenter {
            id: RecordId::from("1"),
            name: "Bayog Elementary School".into(),
            location: "Bayog".into(),
            capacity,
            current_evacuees,
            contact_person: None,
            contact_number: None,
            coordinates: Coordinates::new(14.17, 121.24),
            created_by: Some("kagawad.reyes, Bayog".into()),
        }
    }

    #[test]
    fn derived_fields() {
        let c = center(80, 100);
        assert_eq!(c.barangay(), Some("Bayog"));
        assert_eq!(c.logo_file(), "bayog-logo.png");
        assert_eq!(c.vacancy(), 0);
        assert_eq!(
            c.occupancy(&CapacityClassifier::default()).status,
            CapacityStatus::Full
        );
    }
}
