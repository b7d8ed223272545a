//! The externally visible, reconciled listing.

use serde::{Deserialize, Serialize};

use super::record::{JobId, JobRecord};
use super::transient::TransientAttributes;

/// A persisted record with its transient overlay, if one is cached.
///
/// `transient` is `None` when nothing was fetched for this id during the
/// current process lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobView {
    #[serde(flatten)]
    pub record: JobRecord,
    #[serde(default)]
    pub transient: Option<TransientAttributes>,
}

impl JobView {
    pub fn bare(record: JobRecord) -> Self {
        Self {
            record,
            transient: None,
        }
    }

    pub fn overlaid(record: JobRecord, transient: TransientAttributes) -> Self {
        Self {
            record,
            transient: Some(transient),
        }
    }

    pub fn id(&self) -> JobId {
        self.record.id
    }

    pub fn is_bookmarked(&self) -> bool {
        self.record.bookmarked
    }

    pub fn has_overlay(&self) -> bool {
        self.transient.is_some()
    }

    /// Tag labels, empty when no overlay is present.
    pub fn tag_labels(&self) -> Vec<&str> {
        self.transient
            .as_ref()
            .map(|t| t.tags.iter().map(|tag| tag.label()).collect())
            .unwrap_or_default()
    }
}
