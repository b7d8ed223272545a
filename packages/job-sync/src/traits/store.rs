//! Durable storage contract for the persisted half of listings.

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::Result;
use crate::types::record::{JobId, JobRecord};

/// Durable keyed storage for `JobRecord`s.
///
/// Implementations must return rows in a stable order from both scans.
#[async_trait]
pub trait LocalStore: Send + Sync {
    /// Insert or replace rows by id. Must accept an empty slice.
    ///
    /// Every persisted field is replaced from the incoming record except
    /// `bookmarked`: when a row for the id already exists its stored flag is
    /// kept, since the bookmark is owned locally. New rows take the incoming
    /// flag.
    async fn upsert_all(&self, records: &[JobRecord]) -> Result<()>;

    /// Full scan.
    async fn get_all(&self) -> Result<Vec<JobRecord>>;

    /// Rows whose bookmark flag is set, in the same order as `get_all`.
    async fn get_bookmarked(&self) -> Result<Vec<JobRecord>>;

    /// Point lookup.
    async fn get_by_id(&self, id: JobId) -> Result<Option<JobRecord>>;

    /// Replace one existing row, bookmark flag included.
    ///
    /// Fails with `SyncError::JobNotFound` when the id is not stored.
    async fn update_one(&self, record: &JobRecord) -> Result<()>;
}

#[async_trait]
impl<S: LocalStore + ?Sized> LocalStore for Arc<S> {
    async fn upsert_all(&self, records: &[JobRecord]) -> Result<()> {
        (**self).upsert_all(records).await
    }

    async fn get_all(&self) -> Result<Vec<JobRecord>> {
        (**self).get_all().await
    }

    async fn get_bookmarked(&self) -> Result<Vec<JobRecord>> {
        (**self).get_bookmarked().await
    }

    async fn get_by_id(&self, id: JobId) -> Result<Option<JobRecord>> {
        (**self).get_by_id(id).await
    }

    async fn update_one(&self, record: &JobRecord) -> Result<()> {
        (**self).update_one(record).await
    }
}
