//! `JobFeed`: one handle over pagination, reads and bookmarks.

use std::sync::Arc;

use crate::bookmarks::BookmarkService;
use crate::cache::TransientCache;
use crate::error::Result;
use crate::pagination::{LoadOutcome, PaginationController, PaginationState};
use crate::reconcile::Reconciler;
use crate::traits::{source::RemoteSource, store::LocalStore};
use crate::types::{config::SyncConfig, record::JobId, view::JobView};

/// The reconciled job feed.
///
/// Shares one store and one transient cache between the pagination
/// controller, the bookmark service and the read paths, so every read sees
/// the latest bookmark flags and whatever overlay this session has fetched.
///
/// # Example
///
/// ```rust,ignore
/// use job_sync::{JobFeed, MemoryStore};
/// use job_sync::testing::{numbered_page, MockSource};
///
/// let feed = JobFeed::new(MockSource::new().with_page(1, numbered_page(1..=10)), MemoryStore::new());
/// let first = feed.load_first().await?.into_jobs();
/// feed.toggle_bookmark(first[0].id()).await?;
/// let saved = feed.bookmarked().await?;
/// ```
pub struct JobFeed<S, L> {
    store: Arc<L>,
    reconciler: Reconciler,
    controller: PaginationController<S, Arc<L>>,
    bookmarks: BookmarkService<Arc<L>>,
}

impl<S: RemoteSource, L: LocalStore> JobFeed<S, L> {
    pub fn new(source: S, store: L) -> Self {
        Self::with_config(source, store, SyncConfig::default())
    }

    pub fn with_config(source: S, store: L, config: SyncConfig) -> Self {
        Self::from_parts(
            source,
            Arc::new(store),
            Arc::new(TransientCache::new()),
            config,
        )
    }

    /// Build over an existing store and cache.
    pub fn from_parts(
        source: S,
        store: Arc<L>,
        cache: Arc<TransientCache>,
        config: SyncConfig,
    ) -> Self {
        let controller =
            PaginationController::with_config(source, Arc::clone(&store), Arc::clone(&cache), config);
        Self {
            reconciler: Reconciler::new(cache),
            bookmarks: BookmarkService::new(Arc::clone(&store)),
            store,
            controller,
        }
    }

    pub async fn load_first(&self) -> Result<LoadOutcome> {
        self.controller.load_first().await
    }

    pub async fn load_more(&self) -> Result<LoadOutcome> {
        self.controller.load_more().await
    }

    /// `load_more`, but only once a consumer showing `total` rows has
    /// scrolled to `last_visible` close enough to the end. Otherwise
    /// `LoadOutcome::Skipped`.
    pub async fn load_more_near(&self, last_visible: usize, total: usize) -> Result<LoadOutcome> {
        let trigger = self.controller.config().load_more_trigger;
        if !trigger.should_load(last_visible, total) {
            tracing::trace!(last_visible, total, "Not near the end yet");
            return Ok(LoadOutcome::Skipped);
        }
        self.load_more().await
    }

    /// Everything stored, reconciled, without fetching.
    pub async fn stored(&self) -> Result<Vec<JobView>> {
        Ok(self.reconciler.view(self.store.get_all().await?))
    }

    pub async fn bookmarked(&self) -> Result<Vec<JobView>> {
        Ok(self.reconciler.view(self.store.get_bookmarked().await?))
    }

    /// A single stored job with its overlay, if any.
    pub async fn job(&self, id: JobId) -> Result<Option<JobView>> {
        Ok(self
            .store
            .get_by_id(id)
            .await?
            .map(|record| self.reconciler.view_one(record)))
    }

    /// See [`BookmarkService::toggle`].
    pub async fn toggle_bookmark(&self, id: JobId) -> Result<Option<bool>> {
        self.bookmarks.toggle(id).await
    }

    pub fn state(&self) -> PaginationState {
        self.controller.state()
    }

    pub fn current_page(&self) -> u32 {
        self.controller.current_page()
    }

    pub fn can_load_more(&self) -> bool {
        self.controller.can_load_more()
    }

    pub fn is_loading(&self) -> bool {
        self.controller.is_loading()
    }

    pub fn store(&self) -> &Arc<L> {
        &self.store
    }

    pub fn cache(&self) -> &Arc<TransientCache> {
        self.reconciler.cache()
    }
}
