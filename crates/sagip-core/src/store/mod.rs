// ── Portal data store ──
//
// Session-scoped, read-side copies of backend records. Nothing is persisted;
// a new session starts empty.

mod collection;

use std::sync::Arc;

use tokio::sync::watch;

use crate::model::{BarangayContact, EvacuationCenter, HazardMarker, RecordId};

use self::collection::RecordCollection;
pub use self::collection::Snapshot;

/// Latest snapshots of every record type the portal shows.
pub struct PortalStore {
    centers: RecordCollection<EvacuationCenter>,
    contacts: RecordCollection<BarangayContact>,
    hazards: RecordCollection<HazardMarker>,
}

impl Default for PortalStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PortalStore {
    pub fn new() -> Self {
        Self {
            centers: RecordCollection::new(),
            contacts: RecordCollection::new(),
            hazards: RecordCollection::new(),
        }
    }

    // ── Apply ────────────────────────────────────────────────────────

    pub(crate) fn apply_centers(&self, centers: Vec<EvacuationCenter>) {
        self.centers
            .replace_all(centers.into_iter().map(|c| (c.id.clone(), c)).collect());
    }

    pub(crate) fn apply_contacts(&self, contacts: Vec<BarangayContact>) {
        self.contacts
            .replace_all(contacts.into_iter().map(|c| (c.id.clone(), c)).collect());
    }

    pub(crate) fn apply_hazards(&self, hazards: Vec<HazardMarker>) {
        self.hazards
            .replace_all(hazards.into_iter().map(|h| (h.id.clone(), h)).collect());
    }

    // ── Read ─────────────────────────────────────────────────────────

    pub fn centers(&self) -> Snapshot<EvacuationCenter> {
        self.centers.snapshot()
    }

    pub fn contacts(&self) -> Snapshot<BarangayContact> {
        self.contacts.snapshot()
    }

    pub fn hazards(&self) -> Snapshot<HazardMarker> {
        self.hazards.snapshot()
    }

    pub fn center(&self, id: &RecordId) -> Option<Arc<EvacuationCenter>> {
        self.centers.get(id)
    }

    pub fn center_count(&self) -> usize {
        self.centers.len()
    }

    /// How many center snapshots have been applied this session.
    pub fn centers_version(&self) -> u64 {
        self.centers.version()
    }

    // ── Subscribe ────────────────────────────────────────────────────

    pub fn subscribe_centers(&self) -> watch::Receiver<Snapshot<EvacuationCenter>> {
        self.centers.subscribe()
    }

    pub fn subscribe_contacts(&self) -> watch::Receiver<Snapshot<BarangayContact>> {
        self.contacts.subscribe()
    }

    pub fn subscribe_hazards(&self) -> watch::Receiver<Snapshot<HazardMarker>> {
        self.hazards.subscribe()
    }
}
