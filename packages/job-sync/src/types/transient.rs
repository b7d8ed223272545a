//! The non-persisted half of a job listing.
//!
//! These attributes only live as long as the in-memory cache that holds them.
//! Every successful fetch supplies them as one unit per job.

use serde::{Deserialize, Serialize};

/// Attributes known only for the lifetime of the process that fetched them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransientAttributes {
    #[serde(default)]
    pub tags: Vec<JobTag>,
    #[serde(default)]
    pub contact_preference: Option<ContactPreference>,
    #[serde(default)]
    pub creatives: Vec<Creative>,
    #[serde(default)]
    pub extended_content: Vec<ContentItem>,
}

impl TransientAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tag(mut self, tag: JobTag) -> Self {
        self.tags.push(tag);
        self
    }

    pub fn with_contact_preference(mut self, preference: ContactPreference) -> Self {
        self.contact_preference = Some(preference);
        self
    }

    pub fn with_creative(mut self, creative: Creative) -> Self {
        self.creatives.push(creative);
        self
    }

    pub fn with_content_item(mut self, item: ContentItem) -> Self {
        self.extended_content.push(item);
        self
    }

    /// True when the fetch carried none of the optional blocks.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
            && self.contact_preference.is_none()
            && self.creatives.is_empty()
            && self.extended_content.is_empty()
    }
}

/// A display tag such as "Urgent hiring".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobTag {
    pub value: String,
    pub title: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub bg_color: Option<String>,
    #[serde(default)]
    pub text_color: Option<String>,
}

impl JobTag {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Text to show: the title, falling back to the raw value.
    pub fn label(&self) -> &str {
        if self.title.trim().is_empty() {
            &self.value
        } else {
            &self.title
        }
    }

    /// Background color, preferring `bg_color` over the legacy `color`.
    pub fn background(&self) -> Option<&str> {
        self.bg_color
            .as_deref()
            .or(self.color.as_deref())
            .filter(|c| !c.trim().is_empty())
    }
}

/// How the employer prefers to be contacted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactPreference {
    #[serde(default)]
    pub preference: i64,
    #[serde(default)]
    pub whatsapp: bool,
    #[serde(default)]
    pub whatsapp_link: Option<String>,
    #[serde(default)]
    pub call_start: Option<String>,
    #[serde(default)]
    pub call_end: Option<String>,
}

impl ContactPreference {
    /// Deep link, if one was supplied and is non-blank.
    pub fn deep_link(&self) -> Option<&str> {
        self.whatsapp_link
            .as_deref()
            .filter(|link| !link.trim().is_empty())
    }

    /// Preferred call window, only when both ends are known.
    pub fn call_window(&self) -> Option<(&str, &str)> {
        match (self.call_start.as_deref(), self.call_end.as_deref()) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }
}

/// An image or other creative asset attached to a listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creative {
    #[serde(default)]
    pub file: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub thumb_url: Option<String>,
    #[serde(default)]
    pub creative_type: i64,
}

impl Creative {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Where to load the asset from: `url`, else `file`.
    pub fn source(&self) -> Option<&str> {
        [self.url.as_str(), self.file.as_str()]
            .into_iter()
            .find(|s| !s.trim().is_empty())
    }
}

/// Free-form key/label/value row ("extended content").
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    pub key: String,
    pub label: String,
    pub value: String,
}

impl ContentItem {
    pub fn new(key: impl Into<String>, label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_label_falls_back_to_value() {
        let tag = JobTag {
            value: "urgent".into(),
            title: "  ".into(),
            ..Default::default()
        };
        assert_eq!(tag.label(), "urgent");
        assert_eq!(JobTag::new("Hot").label(), "Hot");
    }

    #[test]
    fn test_tag_background_prefers_bg_color() {
        let tag = JobTag {
            color: Some("red".into()),
            bg_color: Some("#fff".into()),
            ..Default::default()
        };
        assert_eq!(tag.background(), Some("#fff"));
        assert_eq!(JobTag::new("x").with_color("red").background(), Some("red"));
        assert_eq!(JobTag::new("x").background(), None);
    }

    #[test]
    fn test_creative_source_falls_back_to_file() {
        let creative = Creative {
            file: "https://cdn/file.png".into(),
            ..Default::default()
        };
        assert_eq!(creative.source(), Some("https://cdn/file.png"));
        assert_eq!(Creative::default().source(), None);
    }

    #[test]
    fn test_call_window_requires_both_ends() {
        let mut pref = ContactPreference {
            call_start: Some("09:00".into()),
            ..Default::default()
        };
        assert!(pref.call_window().is_none());

        pref.call_end = Some("18:00".into());
        assert_eq!(pref.call_window(), Some(("09:00", "18:00")));
    }

    #[test]
    fn test_is_empty() {
        assert!(TransientAttributes::new().is_empty());
        assert!(!TransientAttributes::new().with_tag(JobTag::new("a")).is_empty());
    }
}
