//! Scripted remote source for tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::error::{SourceError, SourceResult};
use crate::traits::source::RemoteSource;
use crate::types::page::Page;

#[derive(Debug, Clone)]
enum Scripted {
    Page(Page),
    Failure(String),
}

#[derive(Debug, Default)]
struct Script {
    pages: HashMap<u32, Scripted>,
    calls: Vec<u32>,
    latency: Option<Duration>,
}

/// Remote source answering from a per-page script.
///
/// Pages with no script entry come back empty, which reads as exhaustion.
/// Clones share the script and the call log.
///
/// # Example
///
/// ```rust
/// use job_sync::sources::MockSource;
/// use job_sync::testing::numbered_page;
///
/// let source = MockSource::new()
///     .with_page(1, numbered_page(1..=10))
///     .with_failure(2, "connection reset");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockSource {
    script: Arc<Mutex<Script>>,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    fn script(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Script a successful page (builder pattern).
    pub fn with_page(self, page: u32, jobs: Page) -> Self {
        self.set_page(page, jobs);
        self
    }

    /// Script a transport failure (builder pattern).
    pub fn with_failure(self, page: u32, message: impl Into<String>) -> Self {
        self.set_failure(page, message);
        self
    }

    /// Delay every fetch, to exercise overlapping calls.
    pub fn with_latency(self, latency: Duration) -> Self {
        self.script().latency = Some(latency);
        self
    }

    pub fn set_page(&self, page: u32, jobs: Page) {
        self.script().pages.insert(page, Scripted::Page(jobs));
    }

    pub fn set_failure(&self, page: u32, message: impl Into<String>) {
        self.script()
            .pages
            .insert(page, Scripted::Failure(message.into()));
    }

    /// Page indices requested so far, in call order.
    pub fn fetch_calls(&self) -> Vec<u32> {
        self.script().calls.clone()
    }

    pub fn reset_calls(&self) {
        self.script().calls.clear();
    }
}

#[async_trait]
impl RemoteSource for MockSource {
    async fn fetch_page(&self, page: u32) -> SourceResult<Page> {
        let (latency, answer) = {
            let mut script = self.script();
            script.calls.push(page);
            (script.latency, script.pages.get(&page).cloned())
        };

        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        match answer {
            Some(Scripted::Page(jobs)) => Ok(jobs),
            Some(Scripted::Failure(message)) => Err(SourceError::Network(message.into())),
            None => Ok(Vec::new()),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
