//! Testing utilities: page fixtures and re-exported mocks.
//!
//! Useful for exercising a `JobFeed` or `PaginationController` without a
//! network or a database.

use std::ops::RangeInclusive;

use crate::types::{
    page::{FetchedJob, Page},
    record::JobRecord,
    transient::{JobTag, TransientAttributes},
};

pub use crate::sources::MockSource;
pub use crate::stores::MemoryStore;

/// A fetched job with no transient attributes.
pub fn fetched(id: i64, title: &str, company: &str) -> FetchedJob {
    FetchedJob::new(JobRecord::new(id, title, company))
}

/// A fetched job carrying the given tag titles.
pub fn tagged(id: i64, title: &str, company: &str, tags: &[&str]) -> FetchedJob {
    let attrs = tags
        .iter()
        .fold(TransientAttributes::new(), |attrs, t| attrs.with_tag(JobTag::new(*t)));
    fetched(id, title, company).with_transient(attrs)
}

/// One valid job per id, titled `Job {id}` at `Company {id}`.
pub fn numbered_page(ids: RangeInclusive<i64>) -> Page {
    ids.map(|id| fetched(id, &format!("Job {id}"), &format!("Company {id}")))
        .collect()
}
