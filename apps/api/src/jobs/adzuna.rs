//! Regional API Adapter — Adzuna job search, keyed access.
//!
//! Requires an application id/key pair. When the pair is absent the adapter
//! reports itself unconfigured before any network call, so callers can omit
//! the section instead of displaying a misleading empty list.

use async_trait::async_trait;
use serde::Deserialize;

use super::{JobPosting, JobSource, SourceError};

pub const MAX_RESULTS: usize = 30;
/// Country segment of the search path. The service targets the Indian market.
pub const DEFAULT_COUNTRY: &str = "in";
const BASE_URL: &str = "https://api.adzuna.com";
const DEFAULT_LOCATION: &str = "india";

#[derive(Debug, Deserialize)]
struct AdzunaResponse {
    #[serde(default)]
    results: Vec<AdzunaJob>,
}

#[derive(Debug, Deserialize)]
struct AdzunaJob {
    #[serde(default)]
    title: String,
    company: Option<AdzunaName>,
    location: Option<AdzunaName>,
    category: Option<AdzunaCategory>,
    #[serde(default)]
    redirect_url: String,
}

#[derive(Debug, Deserialize)]
struct AdzunaName {
    #[serde(default)]
    display_name: String,
}

#[derive(Debug, Deserialize)]
struct AdzunaCategory {
    #[serde(default)]
    label: String,
}

impl AdzunaJob {
    fn into_posting(self) -> JobPosting {
        JobPosting {
            title: self.title,
            company: self.company.map(|c| c.display_name).unwrap_or_default(),
            location: self.location.map(|l| l.display_name).unwrap_or_default(),
            tags: self
                .category
                .map(|c| c.label)
                .filter(|l| !l.is_empty())
                .into_iter()
                .collect(),
            apply_url: self.redirect_url,
            match_score: None,
        }
    }
}

#[derive(Clone)]
pub struct AdzunaSource {
    client: reqwest::Client,
    credentials: Option<(String, String)>,
    base_url: String,
}

impl AdzunaSource {
    pub fn new(credentials: Option<(String, String)>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(10))
                .build()
                .expect("Failed to build HTTP client"),
            credentials,
            base_url: BASE_URL.to_string(),
        }
    }
}

#[async_trait]
impl JobSource for AdzunaSource {
    fn name(&self) -> &'static str {
        "adzuna"
    }

    async fn fetch(
        &self,
        query: &str,
        location: Option<&str>,
        limit: usize,
    ) -> Result<Vec<JobPosting>, SourceError> {
        let Some((app_id, app_key)) = &self.credentials else {
            return Err(SourceError::Unconfigured { source_name: "adzuna" });
        };

        let limit = limit.min(MAX_RESULTS);
        let url = format!(
            "{}/v1/api/jobs/{}/search/1",
            self.base_url, DEFAULT_COUNTRY
        );
        let per_page = limit.to_string();
        let response = self
            .client
            .get(&url)
            .query(&[
                ("app_id", app_id.as_str()),
                ("app_key", app_key.as_str()),
                ("what", query),
                ("where", location.unwrap_or(DEFAULT_LOCATION)),
                ("results_per_page", per_page.as_str()),
                ("content-type", "application/json"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Provider {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        let body: AdzunaResponse = response.json().await?;
        Ok(normalize_results(body, limit))
    }
}

/// Maps provider records into `JobPosting`, re-capping at `limit` in case the
/// provider ignores `results_per_page`.
fn normalize_results(body: AdzunaResponse, limit: usize) -> Vec<JobPosting> {
    body.results
        .into_iter()
        .take(limit)
        .map(AdzunaJob::into_posting)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"{
        "results": [
            {
                "title": "Data Engineer",
                "company": {"display_name": "Acme Analytics"},
                "location": {"display_name": "Bengaluru, Karnataka"},
                "category": {"label": "IT Jobs", "tag": "it-jobs"},
                "redirect_url": "https://www.adzuna.in/details/1",
                "salary_min": 900000
            },
            {
                "title": "Platform Engineer",
                "redirect_url": "https://www.adzuna.in/details/2"
            }
        ]
    }"#;

    #[tokio::test]
    async fn test_missing_credentials_report_unconfigured() {
        let source = AdzunaSource::new(None);
        let err = source.fetch("backend", None, 10).await.unwrap_err();
        assert!(matches!(
            err,
            SourceError::Unconfigured { source_name: "adzuna" }
        ));
    }

    #[test]
    fn test_fixture_normalizes_to_postings() {
        let body: AdzunaResponse = serde_json::from_str(FIXTURE).unwrap();
        let postings = normalize_results(body, 30);
        assert_eq!(postings.len(), 2);
        assert_eq!(postings[0].title, "Data Engineer");
        assert_eq!(postings[0].company, "Acme Analytics");
        assert_eq!(postings[0].location, "Bengaluru, Karnataka");
        assert_eq!(postings[0].tags, vec!["IT Jobs"]);
        assert_eq!(postings[0].apply_url, "https://www.adzuna.in/details/1");
    }

    #[test]
    fn test_absent_fields_stay_empty() {
        let body: AdzunaResponse = serde_json::from_str(FIXTURE).unwrap();
        let postings = normalize_results(body, 30);
        assert_eq!(postings[1].company, "");
        assert_eq!(postings[1].location, "");
        assert!(postings[1].tags.is_empty());
    }

    #[test]
    fn test_results_recapped_at_limit() {
        let body: AdzunaResponse = serde_json::from_str(FIXTURE).unwrap();
        let postings = normalize_results(body, 1);
        assert_eq!(postings.len(), 1);
    }

    #[test]
    fn test_empty_results_is_not_an_error() {
        let body: AdzunaResponse = serde_json::from_str(r#"{"results": []}"#).unwrap();
        assert!(normalize_results(body, 30).is_empty());
    }
}
