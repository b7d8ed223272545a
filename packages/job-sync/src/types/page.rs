//! What one remote fetch yields.

use serde::{Deserialize, Serialize};

use super::record::{JobId, JobRecord};
use super::transient::TransientAttributes;

/// A freshly fetched listing, already split into its persisted and transient halves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchedJob {
    pub record: JobRecord,
    #[serde(default)]
    pub transient: TransientAttributes,
}

impl FetchedJob {
    pub fn new(record: JobRecord) -> Self {
        Self {
            record,
            transient: TransientAttributes::default(),
        }
    }

    pub fn with_transient(mut self, transient: TransientAttributes) -> Self {
        self.transient = transient;
        self
    }

    pub fn id(&self) -> JobId {
        self.record.id
    }
}

/// Ordered listings returned by one `fetch_page` call. Empty means exhausted.
pub type Page = Vec<FetchedJob>;
