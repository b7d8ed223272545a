//! Decides which fetched records are fit to persist.

use crate::types::record::JobRecord;

/// Why a record was turned away. Used for logging only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    ZeroId,
    BlankTitle,
    BlankCompany,
}

impl Rejection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rejection::ZeroId => "zero id",
            Rejection::BlankTitle => "blank title",
            Rejection::BlankCompany => "blank company",
        }
    }
}

/// First reason `record` cannot be stored, if any.
pub fn check(record: &JobRecord) -> Option<Rejection> {
    if record.id.is_zero() {
        Some(Rejection::ZeroId)
    } else if record.title.trim().is_empty() {
        Some(Rejection::BlankTitle)
    } else if record.company.trim().is_empty() {
        Some(Rejection::BlankCompany)
    } else {
        None
    }
}

/// A record is persistable iff its id is non-zero and both title and company
/// are non-blank after trimming. No other field is looked at.
pub fn is_valid(record: &JobRecord) -> bool {
    check(record).is_none()
}
