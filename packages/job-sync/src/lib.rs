//! Job Listing Sync Library
//!
//! Keeps a local, queryable set of job listings consistent with a paginated
//! remote feed.
//!
//! # Model
//!
//! Every listing is split in two:
//!
//! - a persisted [`JobRecord`], written to a [`LocalStore`] and kept across
//!   restarts, with a bookmark flag owned locally;
//! - [`TransientAttributes`] (tags, contact preference, creatives, extended
//!   content) that the store does not keep. They live in a process-wide
//!   [`TransientCache`] and are overlaid on reads by the [`Reconciler`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use job_sync::{JobFeed, SyncConfig, FailedPagePolicy};
//! use job_sync::sources::HttpSource;
//! use job_sync::stores::SqliteStore;
//!
//! let source = HttpSource::new("https://testapi.getlokalapp.com/", timeout)?;
//! let store = SqliteStore::new("sqlite://lokaljob.db?mode=rwc").await?;
//! let feed = JobFeed::with_config(
//!     source,
//!     store,
//!     SyncConfig::new().with_failed_page_policy(FailedPagePolicy::RetrySame),
//! );
//!
//! let jobs = feed.load_first().await?.into_jobs();
//! let more = feed.load_more().await?.into_jobs();
//! ```
//!
//! # Modules
//!
//! - [`traits`] - `RemoteSource` and `LocalStore` seams
//! - [`types`] - Records, transient attributes, views and config
//! - [`pagination`] - First-load / load-more state machine
//! - [`stores`] - Storage implementations (MemoryStore, SqliteStore)
//! - [`sources`] - Remote sources (MockSource, HttpSource)
//! - [`testing`] - Fixtures for tests

pub mod bookmarks;
pub mod cache;
pub mod error;
pub mod feed;
pub mod pagination;
pub mod reconcile;
pub mod sources;
pub mod stores;
pub mod testing;
pub mod traits;
pub mod types;
pub mod validator;

// Re-export core types at crate root
pub use bookmarks::BookmarkService;
pub use cache::TransientCache;
pub use error::{Result, SourceError, SourceResult, SyncError};
pub use feed::JobFeed;
pub use pagination::{LoadOutcome, PaginationController, PaginationState};
pub use reconcile::Reconciler;
pub use traits::{source::RemoteSource, store::LocalStore};
pub use types::{
    config::{FailedPagePolicy, LoadMoreTrigger, SyncConfig},
    page::{FetchedJob, Page},
    record::{JobId, JobRecord, PrimaryDetails},
    transient::{ContactPreference, ContentItem, Creative, JobTag, TransientAttributes},
    view::JobView,
};

// Re-export store implementations
pub use stores::MemoryStore;

#[cfg(feature = "sqlite")]
pub use stores::SqliteStore;

#[cfg(feature = "http")]
pub use sources::HttpSource;
