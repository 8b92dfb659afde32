// ── Wire → domain conversion ──
//
// Lenient decoding already happened in `sagip-api`; this layer validates
// coordinates, normalizes ids, and trims text.

use sagip_api::{CenterRecord, ContactRecord, HazardRecord};

use crate::geo::Coordinates;
use crate::model::{BarangayContact, EvacuationCenter, HazardKind, HazardMarker, RecordId};

fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
}

impl From<CenterRecord> for EvacuationCenter {
    fn from(rec: CenterRecord) -> Self {
        Self {
            id: RecordId::from(rec.id),
            name: rec.name.trim().to_owned(),
            location: rec.location.trim().to_owned(),
            capacity: rec.capacity,
            current_evacuees: rec.current_evacuees,
            contact_person: clean(rec.contact_person),
            contact_number: clean(rec.contact_number),
            coordinates: Coordinates::from_parts(rec.lat, rec.long),
            created_by: clean(rec.created_by),
        }
    }
}

impl From<ContactRecord> for BarangayContact {
    fn from(rec: ContactRecord) -> Self {
        Self {
            id: RecordId::from(rec.id),
            barangay_name: rec.barangay_name.trim().to_owned(),
            contact_number: clean(rec.contact_number),
            landline: clean(rec.landline),
            email: clean(rec.email),
            facebook_page: clean(rec.facebook_page),
            captain_name: clean(rec.captain_name),
            secretary_name: clean(rec.secretary_name),
            coordinates: Coordinates::from_parts(rec.lat, rec.lng),
        }
    }
}

impl From<HazardRecord> for HazardMarker {
    fn from(rec: HazardRecord) -> Self {
        Self {
            id: RecordId::from(rec.id),
            kind: HazardKind::parse(&rec.kind),
            coordinates: Coordinates::from_parts(rec.lat, rec.lng),
            address: clean(rec.address),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn center_from_wire() {
        let rec: CenterRecord = serde_json::from_value(json!({
            "id": 12,
            "name": " Mayondon Covered Court ",
            "location": "Purok 2, Mayondon",
            "capacity": "150",
            "current_evacuees": "30",
            "contact_person": "  ",
            "lat": "14.1801",
            "long": "121.2312",
            "created_by": "admin, Mayondon"
        }))
        .unwrap();
        let center = EvacuationCenter::from(rec);
        assert_eq!(center.id.as_str(), "12");
        assert_eq!(center.name, "Mayondon Covered Court");
        assert_eq!(center.contact_person, None);
        assert_eq!(center.barangay(), Some("Mayondon"));
        assert!(center.coordinates.is_some());
    }

    #[test]
    fn zero_coordinates_become_none() {
        let rec: CenterRecord =
            serde_json::from_value(json!({"id": "3", "name": "Gym", "lat": "0", "long": "0"}))
                .unwrap();
        assert_eq!(EvacuationCenter::from(rec).coordinates, None);
    }

    #[test]
    fn hazard_from_wire() {
        let rec: HazardRecord = serde_json::from_value(
            json!({"id": 5, "type": "RoadBlockage", "lat": 14.17, "lng": 121.24, "address": " "}),
        )
        .unwrap();
        let marker = HazardMarker::from(rec);
        assert_eq!(marker.kind, HazardKind::RoadBlockage);
        assert_eq!(marker.address, None);
    }

    #[test]
    fn contact_from_wire() {
        let rec: ContactRecord = serde_json::from_value(json!({
            "id": 9,
            "barangay_name": "bagong-silang",
            "email": "bagongsilang@example.ph",
            "long": "121.25",
            "lat": "14.19"
        }))
        .unwrap();
        let contact = BarangayContact::from(rec);
        assert_eq!(contact.display_name(), "Bagong Silang");
        assert!(contact.has_location());
    }
}
