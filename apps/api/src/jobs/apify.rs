//! Scraping Platform Adapter — Apify actor runs against job portals without a
//! public API.
//!
//! Flow: start an actor run, poll its status until it reaches a terminal
//! state (bounded by `SCRAPE_TIMEOUT_SECS`), then read the run's default
//! dataset. Two portals are supported — LinkedIn and Naukri — each with its
//! own actor and run input. A succeeded run with zero items is a valid empty
//! result (portal layout drift, no matches), not an error.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

use super::{JobPosting, JobSource, SourceError};

pub const MAX_RESULTS: usize = 60;
const BASE_URL: &str = "https://api.apify.com";
const POLL_INTERVAL: Duration = Duration::from_secs(5);
const SCRAPE_TIMEOUT_SECS: u64 = 180;

/// Which job portal the actor scrapes. Actor IDs and run-input schemas differ
/// per portal; the two are genuinely distinct sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Portal {
    LinkedIn,
    Naukri,
}

impl Portal {
    pub fn actor_id(self) -> &'static str {
        match self {
            Portal::LinkedIn => "BHzefUZlZRKWxkTck",
            Portal::Naukri => "alpcnRV9YI9lYVPWk",
        }
    }

    fn source_name(self) -> &'static str {
        match self {
            Portal::LinkedIn => "linkedin",
            Portal::Naukri => "naukri",
        }
    }

    /// Builds the actor run input for a search. Each actor has its own schema.
    pub fn run_input(self, query: &str, location: &str, limit: usize) -> Value {
        match self {
            Portal::LinkedIn => json!({
                "title": query,
                "location": location,
                "rows": limit,
                "proxy": {
                    "useApifyProxy": true,
                    "apifyProxyGroups": ["RESIDENTIAL"],
                },
            }),
            Portal::Naukri => json!({
                "keyword": query,
                "maxJobs": limit,
                "freshness": "all",
                "sortBy": "relevance",
                "experience": "all",
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RunEnvelope {
    data: RunState,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RunState {
    id: String,
    status: String,
    default_dataset_id: String,
}

/// One scraped dataset item. Actors disagree on field names, so the URL and
/// title accept the known spellings; anything missing stays empty.
#[derive(Debug, Deserialize)]
struct ScrapedJob {
    #[serde(default, alias = "position")]
    title: String,
    #[serde(default, rename = "companyName", alias = "company")]
    company: String,
    #[serde(default)]
    location: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default, alias = "jobUrl", alias = "link", alias = "jobLink")]
    url: String,
}

impl ScrapedJob {
    fn into_posting(self) -> JobPosting {
        JobPosting {
            title: self.title,
            company: self.company,
            location: self.location,
            tags: self.tags,
            apply_url: self.url,
            match_score: None,
        }
    }
}

#[derive(Clone)]
pub struct ApifySource {
    client: reqwest::Client,
    token: Option<String>,
    portal: Portal,
    base_url: String,
}

impl ApifySource {
    pub fn new(portal: Portal, token: Option<String>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to build HTTP client"),
            token,
            portal,
            base_url: BASE_URL.to_string(),
        }
    }

    async fn start_run(&self, token: &str, input: &Value) -> Result<RunState, SourceError> {
        let url = format!(
            "{}/v2/acts/{}/runs?token={token}",
            self.base_url,
            self.portal.actor_id()
        );
        let response = self.client.post(&url).json(input).send().await?;
        read_run_state(response).await
    }

    async fn run_state(&self, token: &str, run_id: &str) -> Result<RunState, SourceError> {
        let url = format!("{}/v2/actor-runs/{run_id}?token={token}", self.base_url);
        let response = self.client.get(&url).send().await?;
        read_run_state(response).await
    }

    async fn dataset_items(
        &self,
        token: &str,
        dataset_id: &str,
        limit: usize,
    ) -> Result<Vec<Value>, SourceError> {
        let url = format!(
            "{}/v2/datasets/{dataset_id}/items?token={token}&format=json&clean=true&limit={limit}",
            self.base_url
        );
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Provider {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl JobSource for ApifySource {
    fn name(&self) -> &'static str {
        self.portal.source_name()
    }

    async fn fetch(
        &self,
        query: &str,
        location: Option<&str>,
        limit: usize,
    ) -> Result<Vec<JobPosting>, SourceError> {
        let Some(token) = &self.token else {
            return Err(SourceError::Unconfigured {
                source_name: self.portal.source_name(),
            });
        };

        let limit = limit.min(MAX_RESULTS);
        let input = self.portal.run_input(query, location.unwrap_or("India"), limit);

        let mut run = self.start_run(token, &input).await?;
        debug!("{} scrape run {} started", self.name(), run.id);

        let deadline = tokio::time::Instant::now() + Duration::from_secs(SCRAPE_TIMEOUT_SECS);
        while !is_terminal(&run.status) {
            if tokio::time::Instant::now() >= deadline {
                return Err(SourceError::ScrapeTimeout {
                    seconds: SCRAPE_TIMEOUT_SECS,
                });
            }
            tokio::time::sleep(POLL_INTERVAL).await;
            run = self.run_state(token, &run.id).await?;
        }

        if run.status != "SUCCEEDED" {
            return Err(SourceError::ScrapeFailed {
                run_id: run.id,
                status: run.status,
            });
        }

        let items = self
            .dataset_items(token, &run.default_dataset_id, limit)
            .await?;
        Ok(normalize_items(items, limit))
    }
}

async fn read_run_state(response: reqwest::Response) -> Result<RunState, SourceError> {
    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::Provider {
            status: status.as_u16(),
            message: response.text().await.unwrap_or_default(),
        });
    }
    let envelope: RunEnvelope = response.json().await?;
    Ok(envelope.data)
}

fn is_terminal(status: &str) -> bool {
    matches!(status, "SUCCEEDED" | "FAILED" | "ABORTED" | "TIMED-OUT")
}

/// Maps dataset items into postings, skipping entries that are not objects in
/// the expected shape and capping at `limit`.
fn normalize_items(items: Vec<Value>, limit: usize) -> Vec<JobPosting> {
    items
        .into_iter()
        .filter_map(|item| serde_json::from_value::<ScrapedJob>(item).ok())
        .take(limit)
        .map(ScrapedJob::into_posting)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_token_reports_unconfigured() {
        let source = ApifySource::new(Portal::Naukri, None);
        let err = source.fetch("data scientist", None, 60).await.unwrap_err();
        assert!(matches!(
            err,
            SourceError::Unconfigured { source_name: "naukri" }
        ));
    }

    #[test]
    fn test_naukri_run_input_shape() {
        let input = Portal::Naukri.run_input("data scientist", "India", 60);
        assert_eq!(input["keyword"], "data scientist");
        assert_eq!(input["maxJobs"], 60);
        assert_eq!(input["freshness"], "all");
        assert_eq!(input["sortBy"], "relevance");
    }

    #[test]
    fn test_linkedin_run_input_shape() {
        let input = Portal::LinkedIn.run_input("backend engineer", "India", 60);
        assert_eq!(input["title"], "backend engineer");
        assert_eq!(input["location"], "India");
        assert_eq!(input["rows"], 60);
        assert_eq!(input["proxy"]["useApifyProxy"], true);
    }

    #[test]
    fn test_portals_use_distinct_actors() {
        assert_ne!(Portal::LinkedIn.actor_id(), Portal::Naukri.actor_id());
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(is_terminal("SUCCEEDED"));
        assert!(is_terminal("FAILED"));
        assert!(is_terminal("ABORTED"));
        assert!(is_terminal("TIMED-OUT"));
        assert!(!is_terminal("RUNNING"));
        assert!(!is_terminal("READY"));
    }

    #[test]
    fn test_items_normalize_across_url_spellings() {
        let items = vec![
            serde_json::json!({
                "title": "Data Scientist",
                "companyName": "Acme AI",
                "location": "Bengaluru",
                "jobUrl": "https://naukri.com/job/1",
            }),
            serde_json::json!({
                "position": "ML Engineer",
                "company": "Beta Labs",
                "link": "https://linkedin.com/jobs/2",
            }),
        ];
        let postings = normalize_items(items, 60);
        assert_eq!(postings.len(), 2);
        assert_eq!(postings[0].apply_url, "https://naukri.com/job/1");
        assert_eq!(postings[0].company, "Acme AI");
        assert_eq!(postings[1].title, "ML Engineer");
        assert_eq!(postings[1].apply_url, "https://linkedin.com/jobs/2");
        assert_eq!(postings[1].location, "");
    }

    #[test]
    fn test_items_capped_at_limit() {
        let items: Vec<Value> = (0..80)
            .map(|i| serde_json::json!({"title": format!("Job {i}"), "url": "u"}))
            .collect();
        assert_eq!(normalize_items(items, 60).len(), 60);
    }

    #[test]
    fn test_empty_dataset_is_not_an_error() {
        assert!(normalize_items(Vec::new(), 60).is_empty());
    }

    #[test]
    fn test_run_envelope_deserializes() {
        let json = r#"{
            "data": {
                "id": "run-123",
                "status": "RUNNING",
                "defaultDatasetId": "ds-456"
            }
        }"#;
        let envelope: RunEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.data.id, "run-123");
        assert!(!is_terminal(&envelope.data.status));
        assert_eq!(envelope.data.default_dataset_id, "ds-456");
    }
}
