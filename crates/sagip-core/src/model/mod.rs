// ── Domain model ──
//
// Read-side copies of backend records. Every type here is a snapshot: the
// backend owns the data, this crate only decodes, annotates, and filters it.

mod center;
mod contact;
mod hazard;
mod record_id;

pub use center::EvacuationCenter;
pub use contact::{BarangayContact, sort_contacts};
pub use hazard::{HazardKind, HazardMarker};
pub use record_id::RecordId;
