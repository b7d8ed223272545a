use anyhow::{Context, Result};
use dotenvy::dotenv;
use job_sync::FailedPagePolicy;
use std::env;
use std::time::Duration;

const DEFAULT_API_BASE_URL: &str = "https://testapi.getlokalapp.com/";
const DEFAULT_DATABASE_URL: &str = "sqlite://lokaljob.db?mode=rwc";

/// CLI configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub api_timeout: Duration,
    pub database_url: String,
    pub failed_page_policy: FailedPagePolicy,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self {
            api_base_url: lookup("JOBS_API_BASE_URL")
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            api_timeout: Duration::from_secs(
                lookup("JOBS_API_TIMEOUT_SECS")
                    .unwrap_or_else(|| "30".to_string())
                    .parse::<u64>()
                    .context("JOBS_API_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            failed_page_policy: match lookup("FAILED_PAGE_POLICY") {
                Some(raw) => raw
                    .parse::<FailedPagePolicy>()
                    .context("FAILED_PAGE_POLICY must be `skip` or `retry`")?,
                None => FailedPagePolicy::default(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.api_timeout, Duration::from_secs(30));
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.failed_page_policy, FailedPagePolicy::SkipForward);
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("JOBS_API_BASE_URL", "http://localhost:8080"),
            ("JOBS_API_TIMEOUT_SECS", "5"),
            ("FAILED_PAGE_POLICY", "retry"),
        ])
        .unwrap();
        assert_eq!(config.api_base_url, "http://localhost:8080");
        assert_eq!(config.api_timeout, Duration::from_secs(5));
        assert_eq!(config.failed_page_policy, FailedPagePolicy::RetrySame);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(config(&[("JOBS_API_TIMEOUT_SECS", "soon")]).is_err());
        assert!(config(&[("FAILED_PAGE_POLICY", "sometimes")]).is_err());
    }
}
