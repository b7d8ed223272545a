//! Local bookmark toggling.

use crate::error::Result;
use crate::traits::store::LocalStore;
use crate::types::record::JobId;

/// Flips the locally owned bookmark flag on stored jobs.
///
/// Works directly against the store and ignores pagination state, so it may
/// run while a page is being fetched.
pub struct BookmarkService<L> {
    store: L,
}

impl<L: LocalStore> BookmarkService<L> {
    pub fn new(store: L) -> Self {
        Self { store }
    }

    /// Invert the bookmark flag of a stored job.
    ///
    /// Returns the new flag, or `None` when the id is not stored (nothing to
    /// act on, not an error). Every other persisted field is written back
    /// unchanged.
    pub async fn toggle(&self, id: JobId) -> Result<Option<bool>> {
        let Some(current) = self.store.get_by_id(id).await? else {
            tracing::debug!(job_id = %id, "Bookmark toggle for unknown job ignored");
            return Ok(None);
        };

        let updated = current.toggled();
        self.store.update_one(&updated).await?;

        tracing::info!(job_id = %id, bookmarked = updated.bookmarked, "Bookmark toggled");
        Ok(Some(updated.bookmarked))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stores::MemoryStore;
    use crate::types::record::{JobRecord, PrimaryDetails};
    use std::sync::Arc;

    fn stored_job() -> JobRecord {
        JobRecord::new(3, "Cook", "Acme")
            .with_primary_details(PrimaryDetails {
                place: "Pune".into(),
                ..Default::default()
            })
            .with_phone("9999")
            .with_openings(4)
    }

    #[tokio::test]
    async fn test_toggle_twice_restores_record() {
        let store = Arc::new(MemoryStore::new());
        store.upsert_all(&[stored_job()]).await.unwrap();
        let service = BookmarkService::new(Arc::clone(&store));

        assert_eq!(service.toggle(JobId::new(3)).await.unwrap(), Some(true));
        let marked = store.get_by_id(JobId::new(3)).await.unwrap().unwrap();
        assert!(marked.bookmarked);
        assert_eq!(marked.phone, "9999");

        assert_eq!(service.toggle(JobId::new(3)).await.unwrap(), Some(false));
        assert_eq!(
            store.get_by_id(JobId::new(3)).await.unwrap(),
            Some(stored_job())
        );
    }

    #[tokio::test]
    async fn test_toggle_unknown_id_is_noop() {
        let store = Arc::new(MemoryStore::new());
        let service = BookmarkService::new(Arc::clone(&store));

        assert_eq!(service.toggle(JobId::new(42)).await.unwrap(), None);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_toggle_shows_up_in_bookmarked_scan() {
        let store = Arc::new(MemoryStore::new());
        store
            .upsert_all(&[stored_job(), JobRecord::new(4, "Driver", "Beta")])
            .await
            .unwrap();
        let service = BookmarkService::new(Arc::clone(&store));

        service.toggle(JobId::new(4)).await.unwrap();

        let bookmarked = store.get_bookmarked().await.unwrap();
        assert_eq!(bookmarked.len(), 1);
        assert_eq!(bookmarked[0].id, JobId::new(4));
    }
}
