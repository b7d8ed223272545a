//! Configuration types for pagination.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::SyncError;

/// What `load_more` does with the page counter after a remote failure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailedPagePolicy {
    /// Keep the advanced counter; the next `load_more` asks for the page after
    /// the one that failed.
    #[default]
    SkipForward,
    /// Roll the counter back so the failed page is requested again.
    RetrySame,
}

impl FromStr for FailedPagePolicy {
    type Err = SyncError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "skip" | "skip_forward" => Ok(Self::SkipForward),
            "retry" | "retry_same" => Ok(Self::RetrySame),
            other => Err(SyncError::Config(format!(
                "unknown failed page policy: {other}"
            ))),
        }
    }
}

/// Configuration for the pagination controller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Page index used by `load_first`. The feed is 1-indexed.
    ///
    /// Default: 1.
    pub first_page: u32,

    /// Counter handling after a failed `load_more`.
    ///
    /// Default: `SkipForward`.
    pub failed_page_policy: FailedPagePolicy,

    /// Scroll position rule for `JobFeed::load_more_near`.
    ///
    /// Default: within 5 rows of the end, at least 10 rows loaded.
    pub load_more_trigger: LoadMoreTrigger,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            first_page: 1,
            failed_page_policy: FailedPagePolicy::default(),
            load_more_trigger: LoadMoreTrigger::default(),
        }
    }
}

impl SyncConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_first_page(mut self, page: u32) -> Self {
        self.first_page = page.max(1);
        self
    }

    pub fn with_failed_page_policy(mut self, policy: FailedPagePolicy) -> Self {
        self.failed_page_policy = policy;
        self
    }

    pub fn with_load_more_trigger(mut self, trigger: LoadMoreTrigger) -> Self {
        self.load_more_trigger = trigger;
        self
    }
}

/// Decides when a list consumer should ask for the next page.
///
/// Fires once the last visible row is within `threshold` rows of the end and
/// at least `min_items` rows are already loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadMoreTrigger {
    pub threshold: usize,
    pub min_items: usize,
}

impl Default for LoadMoreTrigger {
    fn default() -> Self {
        Self {
            threshold: 5,
            min_items: 10,
        }
    }
}

impl LoadMoreTrigger {
    /// `last_visible` is the 0-based index of the last row on screen.
    pub fn should_load(&self, last_visible: usize, total: usize) -> bool {
        total >= self.min_items && last_visible + 1 + self.threshold >= total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_parsing() {
        assert_eq!(
            "skip".parse::<FailedPagePolicy>().unwrap(),
            FailedPagePolicy::SkipForward
        );
        assert_eq!(
            " Retry ".parse::<FailedPagePolicy>().unwrap(),
            FailedPagePolicy::RetrySame
        );
        assert!("sometimes".parse::<FailedPagePolicy>().is_err());
    }

    #[test]
    fn test_first_page_is_at_least_one() {
        assert_eq!(SyncConfig::new().with_first_page(0).first_page, 1);
        assert_eq!(SyncConfig::default().first_page, 1);
    }

    #[test]
    fn test_trigger_near_end() {
        let trigger = LoadMoreTrigger::default();

        // 20 rows, looking at row 14 (15 seen, 5 left)
        assert!(trigger.should_load(14, 20));
        assert!(!trigger.should_load(13, 20));
    }

    #[test]
    fn test_trigger_needs_minimum_items() {
        let trigger = LoadMoreTrigger::default();
        assert!(!trigger.should_load(8, 9));
        assert!(trigger.should_load(9, 10));
    }
}
