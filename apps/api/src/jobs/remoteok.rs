//! Open Feed Adapter — RemoteOK public feed, no credentials required.
//!
//! The feed is one JSON array whose first element is legal/metadata, not a
//! job. Filtering is client-side: the query is a comma-separated term list
//! and a posting matches when any term appears in its title, company, or
//! tags. An unreachable feed yields an empty result set so the rest of the
//! recommendation flow keeps rendering.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use super::{JobPosting, JobSource, SourceError};

pub const MAX_RESULTS: usize = 30;
const FEED_URL: &str = "https://remoteok.com/api";
const MAX_TAGS: usize = 5;

#[derive(Debug, Deserialize)]
struct RemoteOkJob {
    #[serde(default)]
    position: String,
    #[serde(default)]
    company: String,
    #[serde(default)]
    location: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    url: String,
}

impl RemoteOkJob {
    fn into_posting(self) -> JobPosting {
        let mut tags = self.tags;
        tags.truncate(MAX_TAGS);
        JobPosting {
            title: self.position,
            company: self.company,
            location: self.location,
            tags,
            apply_url: self.url,
            match_score: None,
        }
    }
}

#[derive(Clone)]
pub struct RemoteOkSource {
    client: reqwest::Client,
    feed_url: String,
}

impl RemoteOkSource {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(10))
                .build()
                .expect("Failed to build HTTP client"),
            feed_url: FEED_URL.to_string(),
        }
    }

    #[cfg(test)]
    fn with_feed_url(feed_url: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(2))
                .build()
                .expect("Failed to build HTTP client"),
            feed_url: feed_url.to_string(),
        }
    }

    async fn fetch_feed(&self) -> Result<Vec<Value>, SourceError> {
        let response = self.client.get(&self.feed_url).send().await?;
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

impl Default for RemoteOkSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl JobSource for RemoteOkSource {
    fn name(&self) -> &'static str {
        "remoteok"
    }

    /// `location` is ignored: every posting on this feed is remote.
    async fn fetch(
        &self,
        query: &str,
        _location: Option<&str>,
        limit: usize,
    ) -> Result<Vec<JobPosting>, SourceError> {
        let limit = limit.min(MAX_RESULTS);
        match self.fetch_feed().await {
            Ok(raw) => Ok(filter_feed(raw, query, limit)),
            Err(err) => {
                // Feed unavailability degrades to zero results, never an error.
                warn!("remoteok feed unavailable: {err}");
                Ok(Vec::new())
            }
        }
    }
}

/// Skips the metadata head, keeps postings matching any query term, stops at
/// `limit`. Scans at most `limit * 2` feed entries, mirroring the feed's own
/// relevance ordering.
fn filter_feed(raw: Vec<Value>, query: &str, limit: usize) -> Vec<JobPosting> {
    let terms: Vec<String> = query
        .to_lowercase()
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();

    let mut postings = Vec::new();
    for entry in raw.into_iter().skip(1).take(limit * 2) {
        let Ok(job) = serde_json::from_value::<RemoteOkJob>(entry) else {
            continue;
        };
        let haystack =
            format!("{} {} {}", job.position, job.company, job.tags.join(" ")).to_lowercase();
        if terms.iter().any(|t| haystack.contains(t)) {
            postings.push(job.into_posting());
        }
        if postings.len() >= limit {
            break;
        }
    }
    postings
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fixture_feed(job_count: usize) -> Vec<Value> {
        let mut feed = vec![json!({"legal": "API terms of service apply"})];
        for i in 0..job_count {
            feed.push(json!({
                "position": format!("Backend Engineer {i}"),
                "company": "Acme Remote",
                "location": "Worldwide",
                "tags": ["backend", "rust", "api", "sql", "cloud", "extra-tag"],
                "url": format!("https://remoteok.com/jobs/{i}"),
            }));
        }
        feed
    }

    #[test]
    fn test_metadata_head_is_skipped() {
        let postings = filter_feed(fixture_feed(1), "backend", 30);
        assert_eq!(postings.len(), 1);
        assert_eq!(postings[0].title, "Backend Engineer 0");
    }

    #[test]
    fn test_limit_is_respected() {
        let postings = filter_feed(fixture_feed(40), "backend engineer", 10);
        assert_eq!(postings.len(), 10);
        for p in &postings {
            assert!(!p.title.is_empty());
            assert!(!p.apply_url.is_empty());
        }
    }

    #[test]
    fn test_any_comma_term_matches() {
        let mut feed = fixture_feed(0);
        feed.push(json!({
            "position": "ML Researcher",
            "company": "LabCo",
            "tags": ["pytorch"],
            "url": "https://remoteok.com/jobs/ml",
        }));
        let postings = filter_feed(feed, "data scientist, ml researcher", 30);
        assert_eq!(postings.len(), 1);
        assert_eq!(postings[0].company, "LabCo");
    }

    #[test]
    fn test_non_matching_jobs_are_dropped() {
        let postings = filter_feed(fixture_feed(5), "underwater welder", 30);
        assert!(postings.is_empty());
    }

    #[test]
    fn test_tags_truncated_and_fields_default_empty() {
        let mut feed = fixture_feed(1);
        feed.push(json!({"position": "Backend temp", "url": ""}));
        let postings = filter_feed(feed, "backend", 30);
        assert_eq!(postings[0].tags.len(), MAX_TAGS);
        // Second posting has no company/location/tags in the source.
        assert_eq!(postings[1].company, "");
        assert!(postings[1].tags.is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_feed_yields_empty_set() {
        // TEST-NET-1 address, nothing listens there.
        let source = RemoteOkSource::with_feed_url("http://192.0.2.1:9/api");
        let postings = source.fetch("backend engineer", None, 10).await.unwrap();
        assert!(postings.is_empty());
    }
}
