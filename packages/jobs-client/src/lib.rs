//! Pure REST client for the job listings feed.
//!
//! Fetches one page per call from `GET {base_url}/common/jobs?page=N`. No
//! caching and no retries: callers decide what to do with a failure.
//!
//! # Example
//!
//! ```rust,ignore
//! use jobs_client::JobsClient;
//!
//! let client = JobsClient::new("https://testapi.getlokalapp.com/")?;
//! let page = client.get_jobs(1).await?;
//! for job in &page.results {
//!     println!("{} at {}", job.title, job.company_name);
//! }
//! ```

pub mod error;
pub mod types;

pub use error::{ClientError, Result};
pub use types::{
    ApiContactPreference, ApiContentItem, ApiContentV3, ApiCreative, ApiJob, ApiJobTag,
    ApiPrimaryDetails, JobsPage,
};

use std::time::Duration;

const JOBS_PATH: &str = "common/jobs";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub struct JobsClient {
    client: reqwest::Client,
    base_url: String,
}

impl JobsClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let base_url = base_url.into();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ClientError::Config(format!(
                "base URL must be http(s): {base_url}"
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Config(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn jobs_url(&self) -> String {
        format!("{}/{}", self.base_url, JOBS_PATH)
    }

    /// Fetch a single 1-indexed page. An empty `results` list is a valid answer.
    pub async fn get_jobs(&self, page: u32) -> Result<JobsPage> {
        tracing::debug!(page, "Fetching jobs page");

        let resp = self
            .client
            .get(self.jobs_url())
            .query(&[("page", page)])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(page, status = status.as_u16(), "Jobs feed returned an error status");
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = resp.text().await?;
        let parsed: JobsPage = serde_json::from_str(&body)?;
        tracing::debug!(page, count = parsed.results.len(), "Fetched jobs page");

        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalized() {
        let client = JobsClient::new("https://testapi.getlokalapp.com/").unwrap();
        assert_eq!(client.base_url(), "https://testapi.getlokalapp.com");
        assert_eq!(
            client.jobs_url(),
            "https://testapi.getlokalapp.com/common/jobs"
        );
    }

    #[test]
    fn non_http_base_url_is_rejected() {
        let err = JobsClient::new("ftp://example.com").err().unwrap();
        assert!(matches!(err, ClientError::Config(_)));
    }

    #[tokio::test]
    async fn unreachable_host_is_a_network_error() {
        let client =
            JobsClient::with_timeout("http://127.0.0.1:9", Duration::from_millis(500)).unwrap();
        let err = client.get_jobs(1).await.unwrap_err();
        assert!(matches!(err, ClientError::Network(_)));
    }
}
