// ── Reactive record collection ──
//
// Ordered snapshot storage with O(1) id lookups and push-based change
// notification via `watch` channels. A fetch replaces the whole snapshot;
// whichever response is applied last wins.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::watch;

use crate::model::RecordId;

/// Snapshot handed to subscribers: records in backend order.
pub type Snapshot<T> = Arc<Vec<Arc<T>>>;

/// A reactive collection for one record type.
///
/// The snapshot keeps backend order (the order lists and tie-breaks use);
/// the `DashMap` index serves id lookups. Every replacement bumps a version
/// counter.
pub(crate) struct RecordCollection<T: Send + Sync + 'static> {
    /// Id index. Records without an id are only in the snapshot.
    by_id: DashMap<RecordId, Arc<T>>,

    /// Version counter, bumped on every replacement.
    version: watch::Sender<u64>,

    /// Full snapshot, swapped on replacement.
    snapshot: watch::Sender<Snapshot<T>>,
}

impl<T: Send + Sync + 'static> RecordCollection<T> {
    pub(crate) fn new() -> Self {
        let (version, _) = watch::channel(0u64);
        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));

        Self {
            by_id: DashMap::new(),
            version,
            snapshot,
        }
    }

    /// Swap in a fresh snapshot. Duplicate ids resolve to the later record
    /// for lookups; both stay in the list.
    pub(crate) fn replace_all(&self, items: Vec<(RecordId, T)>) {
        let mut values = Vec::with_capacity(items.len());
        let mut index = Vec::with_capacity(items.len());
        for (id, item) in items {
            let item = Arc::new(item);
            if !id.is_unassigned() {
                index.push((id, Arc::clone(&item)));
            }
            values.push(item);
        }

        self.by_id.clear();
        for (id, item) in index {
            self.by_id.insert(id, item);
        }
        // `send_modify` updates unconditionally, even with zero receivers.
        self.snapshot.send_modify(|snap| *snap = Arc::new(values));
        self.version.send_modify(|v| *v += 1);
    }

    /// Look up a record by id.
    pub(crate) fn get(&self, id: &RecordId) -> Option<Arc<T>> {
        self.by_id.get(id).map(|r| Arc::clone(r.value()))
    }

    /// Get the current snapshot (cheap `Arc` clone).
    pub(crate) fn snapshot(&self) -> Snapshot<T> {
        self.snapshot.borrow().clone()
    }

    /// Subscribe to snapshot changes via a `watch::Receiver`.
    pub(crate) fn subscribe(&self) -> watch::Receiver<Snapshot<T>> {
        self.snapshot.subscribe()
    }

    /// Number of replacements applied so far.
    pub(crate) fn version(&self) -> u64 {
        *self.version.borrow()
    }

    pub(crate) fn len(&self) -> usize {
        self.snapshot.borrow().len()
    }
}
