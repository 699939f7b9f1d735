//! Job Source Adapters — uniform interface over three external listing sources.
//!
//! Each adapter normalizes its provider's native schema into `JobPosting` and
//! caps results at its own maximum. Adapters share no mutable state and may be
//! invoked concurrently; result sets are sectioned per source, never merged.

pub mod adzuna;
pub mod apify;
pub mod remoteok;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// Normalized job record. Fields a source does not provide stay empty,
/// never fabricated.
#[derive(Debug, Clone, Default, Serialize)]
pub struct JobPosting {
    pub title: String,
    pub company: String,
    pub location: String,
    pub tags: Vec<String>,
    pub apply_url: String,
    /// 0–100 résumé-skill match, present only when the caller supplied skills.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_score: Option<u32>,
}

#[derive(Debug, Error)]
pub enum SourceError {
    /// Credentials for an optional source are absent. Distinct from zero
    /// results so callers can omit the section instead of showing an empty list.
    #[error("{source_name} adapter is not configured")]
    Unconfigured { source_name: &'static str },

    #[error("transport failure: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider returned status {status}: {message}")]
    Provider { status: u16, message: String },

    #[error("scrape run {run_id} ended as {status}")]
    ScrapeFailed { run_id: String, status: String },

    #[error("scrape run did not finish within {seconds}s")]
    ScrapeTimeout { seconds: u64 },
}

/// Uniform adapter contract: `query` is the search term, `location` narrows
/// results where the source supports it, and the returned set never exceeds
/// `limit` (itself clamped to the source maximum).
#[async_trait]
pub trait JobSource: Send + Sync {
    fn name(&self) -> &'static str;

    async fn fetch(
        &self,
        query: &str,
        location: Option<&str>,
        limit: usize,
    ) -> Result<Vec<JobPosting>, SourceError>;
}
