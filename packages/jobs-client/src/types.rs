//! Wire types for the `common/jobs` endpoint.
//!
//! Decoding is deliberately forgiving. Missing or `null` scalar fields fall
//! back to their defaults, and a malformed optional block (tags, contact
//! preference, creatives, `contentV3`) decodes to its empty value instead of
//! failing the whole page.

use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};

/// One page of the feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobsPage {
    #[serde(deserialize_with = "null_as_default")]
    pub results: Vec<ApiJob>,
}

/// A single job listing as served by the feed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiJob {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub company_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub primary_details: ApiPrimaryDetails,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_bookmarked: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub whatsapp_no: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub job_category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub job_role: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub other_details: String,
    #[serde(default)]
    pub openings_count: Option<i64>,
    #[serde(default)]
    pub num_applications: Option<i64>,

    #[serde(default, deserialize_with = "lenient")]
    pub job_tags: Option<Vec<ApiJobTag>>,
    #[serde(default, deserialize_with = "lenient")]
    pub contact_preference: Option<ApiContactPreference>,
    #[serde(default, deserialize_with = "lenient")]
    pub creatives: Option<Vec<ApiCreative>>,
    #[serde(rename = "contentV3", default, deserialize_with = "lenient")]
    pub content_v3: Option<ApiContentV3>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiPrimaryDetails {
    #[serde(rename = "Place", default, deserialize_with = "null_as_default")]
    pub place: String,
    #[serde(rename = "Salary", default, deserialize_with = "null_as_default")]
    pub salary: String,
    #[serde(rename = "Job_Type", default, deserialize_with = "null_as_default")]
    pub job_type: String,
    #[serde(rename = "Experience", default, deserialize_with = "null_as_default")]
    pub experience: String,
    #[serde(rename = "Fees_Charged", default, deserialize_with = "null_as_default")]
    pub fees_charged: String,
    #[serde(rename = "Qualification", default, deserialize_with = "null_as_default")]
    pub qualification: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiJobTag {
    #[serde(default, deserialize_with = "null_as_default")]
    pub value: String,
    #[serde(alias = "name", alias = "tag_name", default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(alias = "tag_color", default, deserialize_with = "null_as_default")]
    pub color: String,
    #[serde(default)]
    pub bg_color: Option<String>,
    #[serde(default)]
    pub text_color: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiContactPreference {
    #[serde(default, deserialize_with = "null_as_default")]
    pub preference: i64,
    #[serde(
        alias = "is_whatsapp",
        alias = "has_whatsapp",
        default,
        deserialize_with = "null_as_default"
    )]
    pub whatsapp: bool,
    #[serde(default)]
    pub whatsapp_link: Option<String>,
    #[serde(default)]
    pub preferred_call_start_time: Option<String>,
    #[serde(default)]
    pub preferred_call_end_time: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiCreative {
    #[serde(default, deserialize_with = "null_as_default")]
    pub file: String,
    #[serde(alias = "image_url", alias = "img_url", default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default)]
    pub thumb_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub creative_type: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiContentV3 {
    #[serde(rename = "V3", default, deserialize_with = "null_as_default")]
    pub items: Vec<ApiContentItem>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiContentItem {
    #[serde(default, deserialize_with = "null_as_default")]
    pub field_key: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub field_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub field_value: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Present-but-malformed blocks become `Some(T::default())`; absent or null stay `None`.
fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.map(|value| match serde_json::from_value(value) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::debug!(error = %e, "Malformed optional block, using empty value");
            T::default()
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_and_null_fields_take_defaults() {
        let json = r#"{"results":[{"id":7,"title":null,"company_name":"Acme","openings_count":null}]}"#;
        let page: JobsPage = serde_json::from_str(json).unwrap();
        let job = &page.results[0];

        assert_eq!(job.id, 7);
        assert_eq!(job.title, "");
        assert_eq!(job.company_name, "Acme");
        assert!(!job.is_bookmarked);
        assert!(job.openings_count.is_none());
        assert!(job.job_tags.is_none());
        assert!(job.contact_preference.is_none());
    }

    #[test]
    fn alternate_field_names_are_accepted() {
        let json = r#"{
            "id": 1,
            "job_tags": [{"value": "v", "tag_name": "Urgent", "tag_color": "red"}],
            "contact_preference": {"has_whatsapp": true, "whatsapp_link": "https://wa.me/1"},
            "creatives": [{"img_url": "https://cdn/x.png", "creative_type": 1}]
        }"#;
        let job: ApiJob = serde_json::from_str(json).unwrap();

        let tags = job.job_tags.unwrap();
        assert_eq!(tags[0].title, "Urgent");
        assert_eq!(tags[0].color, "red");
        assert!(job.contact_preference.unwrap().whatsapp);
        assert_eq!(job.creatives.unwrap()[0].url, "https://cdn/x.png");
    }

    #[test]
    fn malformed_optional_blocks_degrade_to_empty() {
        let json = r#"{
            "id": 2,
            "title": "Cook",
            "job_tags": "not-a-list",
            "contact_preference": [1, 2],
            "creatives": {"oops": true},
            "contentV3": 42
        }"#;
        let job: ApiJob = serde_json::from_str(json).unwrap();

        assert_eq!(job.title, "Cook");
        assert!(job.job_tags.unwrap().is_empty());
        assert!(!job.contact_preference.unwrap().whatsapp);
        assert!(job.creatives.unwrap().is_empty());
        assert!(job.content_v3.unwrap().items.is_empty());
    }

    #[test]
    fn primary_details_and_content_v3_decode() {
        let json = r#"{
            "id": 3,
            "primary_details": {"Place": "Pune", "Salary": "10k", "Job_Type": "Full time",
                                "Experience": "1 yr", "Fees_Charged": "0", "Qualification": "12th"},
            "contentV3": {"V3": [{"field_key": "k", "field_name": "Shift", "field_value": "Night"}]}
        }"#;
        let job: ApiJob = serde_json::from_str(json).unwrap();

        assert_eq!(job.primary_details.place, "Pune");
        assert_eq!(job.primary_details.job_type, "Full time");
        assert_eq!(job.content_v3.unwrap().items[0].field_value, "Night");
    }

    #[test]
    fn envelope_without_results_is_an_error() {
        assert!(serde_json::from_str::<JobsPage>(r#"{"count": 0}"#).is_err());
        let empty: JobsPage = serde_json::from_str(r#"{"results": null}"#).unwrap();
        assert!(empty.results.is_empty());
    }
}
