//! First-load / load-more state machine over a `RemoteSource`.
//!
//! ```text
//!            load_first                      load_more
//!   Idle ────────────────► LoadingFirst   Idle|Error ─────► LoadingMore
//!   Error                     │                               │
//!   Exhausted                 ├─ ok ──────► Idle              ├─ empty page ─► Exhausted
//!                             └─ remote err ► Error           ├─ ok ─────────► Idle
//!                                                             └─ remote err ─► Error
//! ```
//!
//! The state itself is the concurrency guard: it is checked and moved to a
//! loading state under one short lock, so a second call made while a step is
//! in flight returns `LoadOutcome::Skipped` instead of fetching again.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::cache::TransientCache;
use crate::error::{Result, SourceError};
use crate::reconcile::Reconciler;
use crate::traits::{source::RemoteSource, store::LocalStore};
use crate::types::{
    config::{FailedPagePolicy, SyncConfig},
    page::Page,
    record::{JobId, JobRecord},
    view::JobView,
};
use crate::validator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaginationState {
    Idle,
    LoadingFirst,
    LoadingMore,
    Exhausted,
    Error,
}

impl PaginationState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::LoadingFirst | Self::LoadingMore)
    }
}

/// Result of one pagination step.
#[derive(Debug)]
pub enum LoadOutcome {
    /// Rejected by the state guard: a step is already in flight, or the feed
    /// is exhausted (`load_more` only). Nothing was fetched.
    Skipped,

    /// `load_first`: the whole reconciled store after the upsert.
    /// `load_more`: only the records this page added; empty on exhaustion.
    /// Overlays refreshed for already-stored ids are not included here, re-read
    /// the store (`JobFeed::stored`) to pick them up.
    Loaded(Vec<JobView>),

    /// The remote fetch failed. For `load_first`, `jobs` is whatever the store
    /// already held; for `load_more` it is empty.
    Failed { jobs: Vec<JobView>, error: SourceError },
}

impl LoadOutcome {
    pub fn jobs(&self) -> &[JobView] {
        match self {
            LoadOutcome::Skipped => &[],
            LoadOutcome::Loaded(jobs) | LoadOutcome::Failed { jobs, .. } => jobs,
        }
    }

    pub fn into_jobs(self) -> Vec<JobView> {
        match self {
            LoadOutcome::Skipped => Vec::new(),
            LoadOutcome::Loaded(jobs) | LoadOutcome::Failed { jobs, .. } => jobs,
        }
    }

    pub fn error(&self) -> Option<&SourceError> {
        match self {
            LoadOutcome::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, LoadOutcome::Skipped)
    }
}

#[derive(Debug)]
struct Cursor {
    state: PaginationState,
    current_page: u32,
}

/// Held for the duration of one step. Dropping it without settling (an error
/// bubbled up, or the future was cancelled) leaves the machine in `Error`.
struct InFlight<'a> {
    cursor: &'a Mutex<Cursor>,
    rollback_on_failure: bool,
    settled: bool,
}

impl InFlight<'_> {
    fn settle(mut self, state: PaginationState) {
        lock(self.cursor).state = state;
        self.settled = true;
    }

    fn fail(mut self) {
        self.mark_failed();
        self.settled = true;
    }

    fn mark_failed(&mut self) {
        let mut cursor = lock(self.cursor);
        cursor.state = PaginationState::Error;
        if self.rollback_on_failure {
            cursor.current_page = cursor.current_page.saturating_sub(1);
        }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.settled {
            tracing::warn!("Pagination step ended without settling, moving to error state");
            self.mark_failed();
        }
    }
}

fn lock(cursor: &Mutex<Cursor>) -> MutexGuard<'_, Cursor> {
    cursor.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Drives `load_first` and `load_more` over a remote source, persisting
/// validated records and caching their transient attributes.
pub struct PaginationController<S, L> {
    source: S,
    store: L,
    cache: Arc<TransientCache>,
    reconciler: Reconciler,
    config: SyncConfig,
    cursor: Mutex<Cursor>,
}

impl<S: RemoteSource, L: LocalStore> PaginationController<S, L> {
    pub fn new(source: S, store: L, cache: Arc<TransientCache>) -> Self {
        Self::with_config(source, store, cache, SyncConfig::default())
    }

    pub fn with_config(source: S, store: L, cache: Arc<TransientCache>, config: SyncConfig) -> Self {
        let reconciler = Reconciler::new(Arc::clone(&cache));
        Self {
            source,
            store,
            cache,
            reconciler,
            config,
            cursor: Mutex::new(Cursor {
                state: PaginationState::Idle,
                current_page: 0,
            }),
        }
    }

    pub fn state(&self) -> PaginationState {
        lock(&self.cursor).state
    }

    /// Last page index requested (0 before the first load).
    pub fn current_page(&self) -> u32 {
        lock(&self.cursor).current_page
    }

    pub fn can_load_more(&self) -> bool {
        self.state() != PaginationState::Exhausted
    }

    pub fn is_loading(&self) -> bool {
        self.state().is_loading()
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Fetch the first page, persist it, and return the full reconciled store.
    ///
    /// Allowed from any state except an in-flight one; resets exhaustion and
    /// the page counter. On a remote failure the stored rows are returned
    /// alongside the error so callers can keep showing stale data.
    pub async fn load_first(&self) -> Result<LoadOutcome> {
        let page = self.config.first_page;
        let Some(step) = self.begin_first(page) else {
            tracing::debug!("load_first skipped, a pagination step is already in flight");
            return Ok(LoadOutcome::Skipped);
        };

        tracing::info!(page, source = self.source.name(), "Loading first page");

        match self.source.fetch_page(page).await {
            Ok(fetched) => {
                self.absorb(page, fetched).await?;
                let jobs = self.reconciler.view(self.store.get_all().await?);
                step.settle(PaginationState::Idle);

                tracing::info!(page, total = jobs.len(), "First page loaded");
                Ok(LoadOutcome::Loaded(jobs))
            }
            Err(error) => {
                tracing::warn!(page, error = %error, "First page fetch failed, falling back to stored jobs");
                let jobs = self.reconciler.view(self.store.get_all().await?);
                step.fail();
                Ok(LoadOutcome::Failed { jobs, error })
            }
        }
    }

    /// Fetch the next page and return only the records it added.
    ///
    /// No-op while a step is in flight or once the feed is exhausted. An empty
    /// page moves the machine to `Exhausted` without touching the store.
    pub async fn load_more(&self) -> Result<LoadOutcome> {
        let rollback = self.config.failed_page_policy == FailedPagePolicy::RetrySame;
        let Some((step, page)) = self.begin_more(rollback) else {
            tracing::debug!(state = ?self.state(), "load_more skipped");
            return Ok(LoadOutcome::Skipped);
        };

        tracing::info!(page, source = self.source.name(), "Loading more");

        match self.source.fetch_page(page).await {
            Ok(fetched) if fetched.is_empty() => {
                step.settle(PaginationState::Exhausted);
                tracing::info!(page, "Feed exhausted");
                Ok(LoadOutcome::Loaded(Vec::new()))
            }
            Ok(fetched) => {
                let added = self.absorb(page, fetched).await?;
                let jobs = self.reconciler.view(added);
                step.settle(PaginationState::Idle);

                tracing::info!(page, added = jobs.len(), "Page loaded");
                Ok(LoadOutcome::Loaded(jobs))
            }
            Err(error) => {
                tracing::warn!(
                    page,
                    error = %error,
                    policy = ?self.config.failed_page_policy,
                    "Page fetch failed"
                );
                step.fail();
                Ok(LoadOutcome::Failed {
                    jobs: Vec::new(),
                    error,
                })
            }
        }
    }

    fn begin_first(&self, page: u32) -> Option<InFlight<'_>> {
        let mut cursor = lock(&self.cursor);
        if cursor.state.is_loading() {
            return None;
        }
        cursor.state = PaginationState::LoadingFirst;
        cursor.current_page = page;
        drop(cursor);

        Some(InFlight {
            cursor: &self.cursor,
            rollback_on_failure: false,
            settled: false,
        })
    }

    fn begin_more(&self, rollback_on_failure: bool) -> Option<(InFlight<'_>, u32)> {
        let mut cursor = lock(&self.cursor);
        match cursor.state {
            PaginationState::Idle | PaginationState::Error => {}
            PaginationState::LoadingFirst
            | PaginationState::LoadingMore
            | PaginationState::Exhausted => return None,
        }
        cursor.state = PaginationState::LoadingMore;
        cursor.current_page += 1;
        let page = cursor.current_page;
        drop(cursor);

        Some((
            InFlight {
                cursor: &self.cursor,
                rollback_on_failure,
                settled: false,
            },
            page,
        ))
    }

    /// Validate, upsert, then cache. Returns the stored rows for ids that were
    /// not in the store before this page, in page order.
    async fn absorb(&self, page: u32, fetched: Page) -> Result<Vec<JobRecord>> {
        let fetched_count = fetched.len();
        let mut accepted = Vec::with_capacity(fetched_count);

        for job in fetched {
            match validator::check(&job.record) {
                None => accepted.push(job),
                Some(reason) => {
                    tracing::warn!(
                        page,
                        job_id = %job.record.id,
                        reason = reason.as_str(),
                        "Dropping malformed job from feed"
                    );
                }
            }
        }

        let mut seen = HashSet::with_capacity(accepted.len());
        let mut new_ids: Vec<JobId> = Vec::new();
        for job in &accepted {
            if seen.insert(job.id()) && self.store.get_by_id(job.id()).await?.is_none() {
                new_ids.push(job.id());
            }
        }

        let records: Vec<JobRecord> = accepted.iter().map(|j| j.record.clone()).collect();
        self.store.upsert_all(&records).await?;

        for job in accepted {
            self.cache.put(job.record.id, job.transient);
        }

        tracing::debug!(
            page,
            fetched = fetched_count,
            accepted = records.len(),
            rejected = fetched_count - records.len(),
            new = new_ids.len(),
            "Absorbed page"
        );

        let mut added = Vec::with_capacity(new_ids.len());
        for id in new_ids {
            if let Some(record) = self.store.get_by_id(id).await? {
                added.push(record);
            }
        }
        Ok(added)
    }
}
