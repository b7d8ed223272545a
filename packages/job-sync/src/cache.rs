//! Process-lifetime overlay of transient attributes.

use dashmap::DashMap;

use crate::types::record::JobId;
use crate::types::transient::TransientAttributes;

/// In-memory map from job id to the transient attributes of its latest fetch.
///
/// Unbounded and never persisted: a new process starts empty and every read
/// degrades to the persisted-only view until a fetch repopulates the entry.
/// A `put` replaces the previous entry whole.
#[derive(Debug, Default)]
pub struct TransientCache {
    entries: DashMap<JobId, TransientAttributes>,
}

impl TransientCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&self, id: JobId, attrs: TransientAttributes) {
        self.entries.insert(id, attrs);
    }

    pub fn get(&self, id: JobId) -> Option<TransientAttributes> {
        self.entries.get(&id).map(|entry| entry.value().clone())
    }

    pub fn contains(&self, id: JobId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
