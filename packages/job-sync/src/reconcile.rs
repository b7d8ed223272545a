//! Merge-on-read of persisted records and cached transient attributes.

use std::sync::Arc;

use crate::cache::TransientCache;
use crate::types::record::JobRecord;
use crate::types::view::JobView;

/// Joins persisted records with the transient cache by id.
///
/// Pure lookup-and-overlay: no I/O, cannot fail, never adds or drops records.
#[derive(Debug, Clone)]
pub struct Reconciler {
    cache: Arc<TransientCache>,
}

impl Reconciler {
    pub fn new(cache: Arc<TransientCache>) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &Arc<TransientCache> {
        &self.cache
    }

    /// Overlay one record. Cached attributes replace, never merge.
    pub fn view_one(&self, record: JobRecord) -> JobView {
        match self.cache.get(record.id) {
            Some(attrs) => JobView::overlaid(record, attrs),
            None => JobView::bare(record),
        }
    }

    /// Overlay every record, preserving input order 1:1.
    pub fn view(&self, records: Vec<JobRecord>) -> Vec<JobView> {
        let views: Vec<JobView> = records.into_iter().map(|r| self.view_one(r)).collect();

        let overlaid = views.iter().filter(|v| v.has_overlay()).count();
        tracing::trace!(
            total = views.len(),
            overlaid,
            bare = views.len() - overlaid,
            "Reconciled records"
        );

        views
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::record::JobId;
    use crate::types::transient::{JobTag, TransientAttributes};
    use proptest::prelude::*;

    #[test]
    fn test_overlay_and_bare() {
        let cache = Arc::new(TransientCache::new());
        cache.put(
            JobId::new(2),
            TransientAttributes::new().with_tag(JobTag::new("Urgent")),
        );
        let reconciler = Reconciler::new(cache);

        let views = reconciler.view(vec![
            JobRecord::new(1, "A", "X"),
            JobRecord::new(2, "B", "Y"),
        ]);

        assert_eq!(views.len(), 2);
        assert!(!views[0].has_overlay());
        assert_eq!(views[1].tag_labels(), vec!["Urgent"]);
    }

    #[test]
    fn test_overlay_does_not_touch_persisted_fields() {
        let cache = Arc::new(TransientCache::new());
        cache.put(JobId::new(9), TransientAttributes::new());
        let reconciler = Reconciler::new(cache);

        let record = JobRecord::new(9, "Cook", "Acme").with_bookmarked(true);
        let view = reconciler.view_one(record.clone());

        assert_eq!(view.record, record);
        assert_eq!(view.transient, Some(TransientAttributes::new()));
    }

    proptest! {
        #[test]
        fn view_is_total_and_order_preserving(
            ids in proptest::collection::vec(-50i64..50, 0..40),
            cached in proptest::collection::hash_set(-50i64..50, 0..20),
        ) {
            let cache = Arc::new(TransientCache::new());
            for id in &cached {
                cache.put(JobId::new(*id), TransientAttributes::new().with_tag(JobTag::new(id.to_string())));
            }
            let reconciler = Reconciler::new(cache);

            let records: Vec<JobRecord> = ids.iter().map(|id| JobRecord::new(*id, "t", "c")).collect();
            let views = reconciler.view(records.clone());

            prop_assert_eq!(views.len(), records.len());
            for (view, record) in views.iter().zip(records.iter()) {
                prop_assert_eq!(&view.record, record);
                prop_assert_eq!(view.has_overlay(), cached.contains(&record.id.0));
            }
        }
    }
}
