//! Job recommendation endpoints.
//!
//! `/api/v1/jobs` fans out to all three adapters concurrently and returns one
//! tagged section per source: a failed or unconfigured source degrades its
//! own section while the others still render. The two `/api/v1/tools/*`
//! endpoints expose the scraped portals as independently callable procedures.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::analysis::skills::job_match_score;
use crate::errors::AppError;
use crate::jobs::{JobPosting, JobSource, SourceError};
use crate::state::AppState;

/// Default per-source limit for the combined endpoint; each adapter clamps to
/// its own maximum.
const DEFAULT_LIMIT: usize = 30;
/// Facade defaults, per the remote tool contract.
const TOOL_LOCATION: &str = "India";
const TOOL_LIMIT: usize = 60;

#[derive(Debug, Deserialize)]
pub struct JobsQuery {
    pub query: String,
    pub location: Option<String>,
    pub limit: Option<usize>,
    /// Comma-separated résumé skills (from a prior analyze call). When
    /// present, each posting is annotated with a match score.
    pub skills: Option<String>,
}

/// Per-source result: jobs, or an explicit marker the caller can act on.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SourceOutcome {
    Ready { jobs: Vec<JobPosting> },
    Unconfigured,
    Unavailable { message: String },
}

#[derive(Debug, Serialize)]
pub struct SourceSection {
    pub source: &'static str,
    #[serde(flatten)]
    pub outcome: SourceOutcome,
}

#[derive(Debug, Serialize)]
pub struct JobsResponse {
    pub sections: Vec<SourceSection>,
}

/// GET /api/v1/jobs
pub async fn handle_jobs(
    State(state): State<AppState>,
    Query(params): Query<JobsQuery>,
) -> Result<Json<JobsResponse>, AppError> {
    if params.query.trim().is_empty() {
        return Err(AppError::Validation(
            "query parameter must not be empty".to_string(),
        ));
    }
    let location = params.location.as_deref();
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT);
    let resume_skills = params.skills.as_deref().map(parse_skills).unwrap_or_default();

    let (remoteok, adzuna, naukri) = tokio::join!(
        state.remoteok.fetch(&params.query, location, limit),
        state.adzuna.fetch(&params.query, location, limit),
        state.naukri.fetch(&params.query, location, limit),
    );

    Ok(Json(JobsResponse {
        sections: vec![
            section("remoteok", remoteok, &resume_skills),
            section("adzuna", adzuna, &resume_skills),
            section("naukri", naukri, &resume_skills),
        ],
    }))
}

fn parse_skills(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Deserialize)]
pub struct ToolKeywords {
    pub keywords: Vec<String>,
}

/// POST /api/v1/tools/linkedin-jobs
pub async fn handle_linkedin_tool(
    State(state): State<AppState>,
    Json(req): Json<ToolKeywords>,
) -> Result<Json<SourceSection>, AppError> {
    let query = join_keywords(&req.keywords)?;
    let result = state
        .linkedin
        .fetch(&query, Some(TOOL_LOCATION), TOOL_LIMIT)
        .await;
    Ok(Json(section("linkedin", result, &[])))
}

/// POST /api/v1/tools/naukri-jobs
pub async fn handle_naukri_tool(
    State(state): State<AppState>,
    Json(req): Json<ToolKeywords>,
) -> Result<Json<SourceSection>, AppError> {
    let query = join_keywords(&req.keywords)?;
    let result = state
        .naukri
        .fetch(&query, Some(TOOL_LOCATION), TOOL_LIMIT)
        .await;
    Ok(Json(section("naukri", result, &[])))
}

/// Joins the keyword sequence into the single query string the adapters take.
fn join_keywords(keywords: &[String]) -> Result<String, AppError> {
    let query = keywords
        .iter()
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if query.is_empty() {
        return Err(AppError::Validation(
            "keywords must contain at least one non-empty entry".to_string(),
        ));
    }
    Ok(query)
}

/// Converts an adapter result into its displayable section. Raw provider
/// errors stay in the logs; the client sees a short reason only.
fn section(
    source: &'static str,
    result: Result<Vec<JobPosting>, SourceError>,
    resume_skills: &[String],
) -> SourceSection {
    let outcome = match result {
        Ok(mut jobs) => {
            if !resume_skills.is_empty() {
                for job in &mut jobs {
                    job.match_score =
                        Some(job_match_score(resume_skills, &job.title, &job.tags.join(" ")));
                }
            }
            SourceOutcome::Ready { jobs }
        }
        Err(SourceError::Unconfigured { .. }) => {
            debug!("{source} section omitted: adapter not configured");
            SourceOutcome::Unconfigured
        }
        Err(err) => {
            warn!("{source} jobs unavailable: {err}");
            SourceOutcome::Unavailable {
                message: format!("{source} jobs unavailable: {}", public_reason(&err)),
            }
        }
    };
    SourceSection { source, outcome }
}

fn public_reason(err: &SourceError) -> String {
    match err {
        SourceError::Unconfigured { .. } => "not configured".to_string(),
        SourceError::Http(_) => "network failure".to_string(),
        SourceError::Provider { status, .. } => format!("provider returned status {status}"),
        SourceError::ScrapeFailed { .. } => "scrape run failed".to_string(),
        SourceError::ScrapeTimeout { seconds } => {
            format!("scrape did not finish within {seconds}s")
        }
    }
}
