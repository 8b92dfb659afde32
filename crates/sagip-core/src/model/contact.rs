use serde::Serialize;

use crate::barangay;
use crate::geo::{Coordinates, Located};
use crate::model::RecordId;

/// Emergency contact card for one barangay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarangayContact {
    pub id: RecordId,
    /// Slug-like key, e.g. `"san-isidro"`. Assumed unique per list.
    pub barangay_name: String,
    pub contact_number: Option<String>,
    pub landline: Option<String>,
    pub email: Option<String>,
    pub facebook_page: Option<String>,
    pub captain_name: Option<String>,
    pub secretary_name: Option<String>,
    pub coordinates: Option<Coordinates>,
}

impl BarangayContact {
    /// `"san-isidro"` → `"San Isidro"`.
    pub fn display_name(&self) -> String {
        barangay::display_name(&self.barangay_name)
    }

    pub fn logo_file(&self) -> String {
        barangay::logo_file(Some(&self.barangay_name))
    }

    pub fn has_location(&self) -> bool {
        self.coordinates.is_some()
    }
}

impl Located for BarangayContact {
    fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates
    }
}

/// Sort contacts by barangay name, case-insensitively. Stable.
pub fn sort_contacts(contacts: &mut [BarangayContact]) {
    contacts.sort_by_cached_key(|c| c.barangay_name.to_lowercase());
}
