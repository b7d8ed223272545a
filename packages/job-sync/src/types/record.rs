//! The persisted half of a job listing.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identity of a job listing; the join key between the durable store
/// and the transient cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub i64);

impl JobId {
    pub fn new(id: i64) -> Self {
        JobId(id)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn into_inner(self) -> i64 {
        self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for JobId {
    fn from(id: i64) -> Self {
        JobId(id)
    }
}

/// Structured summary block shown on listing cards. All free text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimaryDetails {
    pub place: String,
    pub salary: String,
    pub job_type: String,
    pub experience: String,
    pub fees_charged: String,
    pub qualification: String,
}

/// Fields retained by the local store across restarts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    pub id: JobId,
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub primary_details: PrimaryDetails,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub bookmarked: bool,
    #[serde(default)]
    pub openings_count: Option<i64>,
    #[serde(default)]
    pub num_applications: Option<i64>,
}

impl JobRecord {
    /// Create a record with identity, title and company; everything else empty.
    pub fn new(id: i64, title: impl Into<String>, company: impl Into<String>) -> Self {
        Self {
            id: JobId(id),
            title: title.into(),
            company: company.into(),
            primary_details: PrimaryDetails::default(),
            content: String::new(),
            description: String::new(),
            phone: String::new(),
            category: String::new(),
            role: String::new(),
            bookmarked: false,
            openings_count: None,
            num_applications: None,
        }
    }

    pub fn with_primary_details(mut self, details: PrimaryDetails) -> Self {
        self.primary_details = details;
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    pub fn with_bookmarked(mut self, bookmarked: bool) -> Self {
        self.bookmarked = bookmarked;
        self
    }

    pub fn with_openings(mut self, count: i64) -> Self {
        self.openings_count = Some(count);
        self
    }

    pub fn with_applications(mut self, count: i64) -> Self {
        self.num_applications = Some(count);
        self
    }

    /// Same record with the bookmark flag inverted.
    pub fn toggled(&self) -> Self {
        Self {
            bookmarked: !self.bookmarked,
            ..self.clone()
        }
    }
}
