//! `RemoteSource` backed by the live jobs REST feed.
//!
//! Requires the `http` feature.

use async_trait::async_trait;
use std::time::Duration;

use jobs_client::{
    ApiContactPreference, ApiContentV3, ApiCreative, ApiJob, ApiJobTag, ClientError, JobsClient,
};

use crate::error::{SourceError, SourceResult, SyncError};
use crate::traits::source::RemoteSource;
use crate::types::{
    page::{FetchedJob, Page},
    record::{JobId, JobRecord, PrimaryDetails},
    transient::{ContactPreference, ContentItem, Creative, JobTag, TransientAttributes},
};

/// Fetches pages from `GET {base_url}/common/jobs?page=N`.
pub struct HttpSource {
    client: JobsClient,
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, SyncError> {
        let client = JobsClient::with_timeout(base_url, timeout)
            .map_err(|e| SyncError::Config(e.to_string()))?;
        Ok(Self::from_client(client))
    }

    pub fn from_client(client: JobsClient) -> Self {
        Self { client }
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }
}

#[async_trait]
impl RemoteSource for HttpSource {
    async fn fetch_page(&self, page: u32) -> SourceResult<Page> {
        let response = self
            .client
            .get_jobs(page)
            .await
            .map_err(|e| into_source_error(page, e))?;

        Ok(response.results.into_iter().map(FetchedJob::from).collect())
    }

    fn name(&self) -> &str {
        "http"
    }
}

fn into_source_error(page: u32, err: ClientError) -> SourceError {
    if err.is_timeout() {
        return SourceError::Timeout { page };
    }
    match err {
        ClientError::Api { status, message } => SourceError::Api { status, message },
        ClientError::Decode(e) => SourceError::Protocol(e.to_string()),
        ClientError::Network(e) => SourceError::Network(Box::new(e)),
        ClientError::Config(message) => SourceError::Network(message.into()),
    }
}

impl From<ApiJob> for FetchedJob {
    fn from(job: ApiJob) -> Self {
        let transient = TransientAttributes {
            tags: job
                .job_tags
                .unwrap_or_default()
                .into_iter()
                .map(JobTag::from)
                .collect(),
            contact_preference: job.contact_preference.map(ContactPreference::from),
            creatives: job
                .creatives
                .unwrap_or_default()
                .into_iter()
                .map(Creative::from)
                .collect(),
            extended_content: job.content_v3.map(content_items).unwrap_or_default(),
        };

        let details = job.primary_details;
        let record = JobRecord {
            id: JobId::new(job.id),
            title: job.title,
            company: job.company_name,
            primary_details: PrimaryDetails {
                place: details.place,
                salary: details.salary,
                job_type: details.job_type,
                experience: details.experience,
                fees_charged: details.fees_charged,
                qualification: details.qualification,
            },
            content: job.content,
            description: job.other_details,
            phone: job.whatsapp_no,
            category: job.job_category,
            role: job.job_role,
            bookmarked: job.is_bookmarked,
            openings_count: job.openings_count,
            num_applications: job.num_applications,
        };

        FetchedJob { record, transient }
    }
}

impl From<ApiJobTag> for JobTag {
    fn from(tag: ApiJobTag) -> Self {
        JobTag {
            value: tag.value,
            title: tag.title,
            color: Some(tag.color).filter(|c| !c.is_empty()),
            bg_color: tag.bg_color,
            text_color: tag.text_color,
        }
    }
}

impl From<ApiContactPreference> for ContactPreference {
    fn from(pref: ApiContactPreference) -> Self {
        ContactPreference {
            preference: pref.preference,
            whatsapp: pref.whatsapp,
            whatsapp_link: pref.whatsapp_link,
            call_start: pref.preferred_call_start_time,
            call_end: pref.preferred_call_end_time,
        }
    }
}

impl From<ApiCreative> for Creative {
    fn from(creative: ApiCreative) -> Self {
        Creative {
            file: creative.file,
            url: creative.url,
            thumb_url: creative.thumb_url,
            creative_type: creative.creative_type,
        }
    }
}

fn content_items(content: ApiContentV3) -> Vec<ContentItem> {
    content
        .items
        .into_iter()
        .map(|item| ContentItem {
            key: item.field_key,
            label: item.field_name,
            value: item.field_value,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_job_splits_into_record_and_overlay() {
        let json = r#"{
            "id": 5,
            "title": "Cook",
            "company_name": "Acme",
            "primary_details": {"Place": "Pune"},
            "whatsapp_no": "9999",
            "other_details": "Night shift",
            "openings_count": 3,
            "job_tags": [{"value": "u", "title": "Urgent", "color": ""}, {"value": "n", "title": "New"}],
            "contact_preference": {"whatsapp": true, "preferred_call_start_time": "09:00"},
            "contentV3": {"V3": [{"field_key": "k", "field_name": "Shift", "field_value": "Night"}]}
        }"#;
        let job: ApiJob = serde_json::from_str(json).unwrap();
        let fetched = FetchedJob::from(job);

        assert_eq!(fetched.record.id, JobId::new(5));
        assert_eq!(fetched.record.company, "Acme");
        assert_eq!(fetched.record.primary_details.place, "Pune");
        assert_eq!(fetched.record.phone, "9999");
        assert_eq!(fetched.record.description, "Night shift");
        assert_eq!(fetched.record.openings_count, Some(3));

        assert_eq!(fetched.transient.tags.len(), 2);
        assert_eq!(fetched.transient.tags[0].color, None);
        assert!(fetched.transient.contact_preference.as_ref().unwrap().whatsapp);
        assert!(fetched.transient.creatives.is_empty());
        assert_eq!(fetched.transient.extended_content[0].label, "Shift");
    }

    #[test]
    fn test_api_status_maps_to_api_error() {
        let err = into_source_error(
            3,
            ClientError::Api {
                status: 503,
                message: "down".into(),
            },
        );
        assert!(matches!(err, SourceError::Api { status: 503, .. }));
    }

    #[test]
    fn test_non_http_base_url_is_a_config_error() {
        let err = HttpSource::new("file:///tmp", Duration::from_secs(1)).err().unwrap();
        assert!(matches!(err, SyncError::Config(_)));
    }
}
