//! Remote feed abstraction.

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::SourceResult;
use crate::types::page::Page;

/// Fetches one page of listings from the remote feed.
///
/// Pages are 1-indexed. Exactly one attempt per call: no caching and no retry
/// at this layer. An empty page is a successful answer meaning the feed has
/// nothing more to give; only transport or protocol failures are errors.
#[async_trait]
pub trait RemoteSource: Send + Sync {
    async fn fetch_page(&self, page: u32) -> SourceResult<Page>;

    /// Source name (for logging/debugging).
    fn name(&self) -> &str {
        "unknown"
    }
}

#[async_trait]
impl<S: RemoteSource + ?Sized> RemoteSource for Arc<S> {
    async fn fetch_page(&self, page: u32) -> SourceResult<Page> {
        (**self).fetch_page(page).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
