//! End-to-end feed behaviour over the mock source and the memory store.

use std::sync::Arc;

use job_sync::testing::{fetched, numbered_page, tagged, MockSource};
use job_sync::{
    FailedPagePolicy, JobFeed, JobId, LoadOutcome, MemoryStore, PaginationState, SyncConfig,
    TransientCache,
};

#[tokio::test]
async fn malformed_record_is_dropped_on_first_load() {
    let source = MockSource::new().with_page(
        1,
        vec![fetched(1, "Cook", "Acme"), fetched(0, "", "")],
    );
    let feed = JobFeed::new(source, MemoryStore::new());

    let jobs = feed.load_first().await.unwrap().into_jobs();

    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].id(), JobId::new(1));
    assert_eq!(feed.store().len(), 1);
    assert!(feed.job(JobId::new(0)).await.unwrap().is_none());
}

#[tokio::test]
async fn empty_page_exhausts_and_keeps_store() {
    let source = MockSource::new().with_page(1, numbered_page(1..=10));
    let feed = JobFeed::new(source.clone(), MemoryStore::new());

    assert_eq!(feed.load_first().await.unwrap().jobs().len(), 10);

    let more = feed.load_more().await.unwrap();
    assert!(matches!(&more, LoadOutcome::Loaded(jobs) if jobs.is_empty()));
    assert_eq!(feed.state(), PaginationState::Exhausted);
    assert_eq!(feed.stored().await.unwrap().len(), 10);

    assert!(feed.load_more().await.unwrap().is_skipped());
    assert_eq!(source.fetch_calls(), vec![1, 2]);
}

#[tokio::test]
async fn toggle_keeps_transient_tags() {
    let source = MockSource::new().with_page(
        1,
        vec![
            fetched(4, "Driver", "Beta"),
            tagged(5, "Cook", "Acme", &["Urgent", "Part time"]),
        ],
    );
    let feed = JobFeed::new(source, MemoryStore::new());
    feed.load_first().await.unwrap();

    assert_eq!(feed.toggle_bookmark(JobId::new(5)).await.unwrap(), Some(true));

    let job = feed.job(JobId::new(5)).await.unwrap().unwrap();
    assert!(job.is_bookmarked());
    assert_eq!(job.tag_labels(), vec!["Urgent", "Part time"]);

    let bookmarked = feed.bookmarked().await.unwrap();
    assert_eq!(bookmarked.len(), 1);
    assert_eq!(bookmarked[0].tag_labels(), vec!["Urgent", "Part time"]);
}

#[tokio::test]
async fn bookmark_survives_refetch() {
    let source = MockSource::new().with_page(1, numbered_page(1..=3));
    let feed = JobFeed::new(source, MemoryStore::new());
    feed.load_first().await.unwrap();

    feed.toggle_bookmark(JobId::new(2)).await.unwrap();
    let jobs = feed.load_first().await.unwrap().into_jobs();

    let marked: Vec<JobId> = jobs
        .iter()
        .filter(|j| j.is_bookmarked())
        .map(|j| j.id())
        .collect();
    assert_eq!(marked, vec![JobId::new(2)]);
}

#[tokio::test]
async fn load_more_returns_only_new_records() {
    let source = MockSource::new()
        .with_page(1, numbered_page(1..=10))
        .with_page(2, numbered_page(9..=14));
    let feed = JobFeed::new(source, MemoryStore::new());
    feed.load_first().await.unwrap();

    let added: Vec<i64> = feed
        .load_more()
        .await
        .unwrap()
        .jobs()
        .iter()
        .map(|j| j.id().0)
        .collect();

    assert_eq!(added, vec![11, 12, 13, 14]);
    assert_eq!(feed.stored().await.unwrap().len(), 14);
}

#[tokio::test]
async fn restart_with_fresh_cache_reads_bare_views() {
    let store = Arc::new(MemoryStore::new());
    let source = MockSource::new().with_page(1, vec![tagged(1, "Cook", "Acme", &["Urgent"])]);

    let session = JobFeed::from_parts(
        source.clone(),
        Arc::clone(&store),
        Arc::new(TransientCache::new()),
        SyncConfig::default(),
    );
    session.load_first().await.unwrap();
    assert!(session.job(JobId::new(1)).await.unwrap().unwrap().has_overlay());

    let restarted = JobFeed::from_parts(
        source,
        store,
        Arc::new(TransientCache::new()),
        SyncConfig::default(),
    );
    let job = restarted.job(JobId::new(1)).await.unwrap().unwrap();
    assert!(!job.has_overlay());
    assert_eq!(job.record.title, "Cook");
}

#[tokio::test]
async fn first_load_failure_falls_back_to_stored_jobs() {
    let store = Arc::new(MemoryStore::new());
    let warm = MockSource::new().with_page(1, numbered_page(1..=3));
    JobFeed::from_parts(warm, Arc::clone(&store), Arc::new(TransientCache::new()), SyncConfig::default())
        .load_first()
        .await
        .unwrap();

    let offline = MockSource::new().with_failure(1, "network unreachable");
    let feed = JobFeed::from_parts(offline, store, Arc::new(TransientCache::new()), SyncConfig::default());

    let outcome = feed.load_first().await.unwrap();
    assert!(outcome.error().is_some());
    assert_eq!(outcome.jobs().len(), 3);
    assert_eq!(feed.state(), PaginationState::Error);
}

#[tokio::test]
async fn retry_policy_refetches_failed_page() {
    let source = MockSource::new()
        .with_page(1, numbered_page(1..=10))
        .with_failure(2, "timeout");
    let feed = JobFeed::with_config(
        source.clone(),
        MemoryStore::new(),
        SyncConfig::new().with_failed_page_policy(FailedPagePolicy::RetrySame),
    );
    feed.load_first().await.unwrap();

    assert!(feed.load_more().await.unwrap().error().is_some());
    assert_eq!(feed.current_page(), 1);

    source.set_page(2, numbered_page(11..=12));
    assert_eq!(feed.load_more().await.unwrap().jobs().len(), 2);
    assert_eq!(source.fetch_calls(), vec![1, 2, 2]);
}
