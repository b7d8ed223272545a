//! In-memory storage implementation for testing and development.

use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{Result, SyncError};
use crate::traits::store::LocalStore;
use crate::types::record::{JobId, JobRecord};

/// In-memory job store.
///
/// Rows keep the position of their first insertion, so scans are stable
/// across upserts. Not durable: data is lost on restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    jobs: RwLock<IndexMap<JobId, JobRecord>>,
}

impl MemoryStore {
    /// Create a new empty memory store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, IndexMap<JobId, JobRecord>> {
        self.jobs.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, IndexMap<JobId, JobRecord>> {
        self.jobs.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of stored jobs.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}

#[async_trait]
impl LocalStore for MemoryStore {
    async fn upsert_all(&self, records: &[JobRecord]) -> Result<()> {
        let mut jobs = self.write();
        for record in records {
            let mut incoming = record.clone();
            if let Some(existing) = jobs.get(&record.id) {
                incoming.bookmarked = existing.bookmarked;
            }
            jobs.insert(record.id, incoming);
        }
        Ok(())
    }

    async fn get_all(&self) -> Result<Vec<JobRecord>> {
        Ok(self.read().values().cloned().collect())
    }

    async fn get_bookmarked(&self) -> Result<Vec<JobRecord>> {
        Ok(self
            .read()
            .values()
            .filter(|job| job.bookmarked)
            .cloned()
            .collect())
    }

    async fn get_by_id(&self, id: JobId) -> Result<Option<JobRecord>> {
        Ok(self.read().get(&id).cloned())
    }

    async fn update_one(&self, record: &JobRecord) -> Result<()> {
        match self.write().get_mut(&record.id) {
            Some(slot) => {
                *slot = record.clone();
                Ok(())
            }
            None => Err(SyncError::JobNotFound { id: record.id }),
        }
    }
}
