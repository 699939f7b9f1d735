//! Resume analysis endpoint: multipart PDF upload → extraction → the
//! four-call LLM pipeline plus local ATS and skill scoring.

use anyhow::anyhow;
use axum::extract::{Multipart, State};
use axum::Json;
use bytes::Bytes;
use serde::Serialize;

use crate::analysis::ats::{calculate_ats_score, AtsScore};
use crate::analysis::skills::{extract_skills, SkillProfile};
use crate::analysis::{run_analysis, AnalysisReport};
use crate::errors::AppError;
use crate::extract::extract_resume_text;
use crate::state::AppState;

/// Multipart field carrying the PDF payload.
const RESUME_FIELD: &str = "resume";

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub analysis: AnalysisReport,
    pub ats: AtsScore,
    pub skills: SkillProfile,
}

/// POST /api/v1/resumes/analyze
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let Some(llm) = &state.llm else {
        return Err(AppError::AnalysisUnconfigured(
            "GROQ_API_KEY is not set; resume analysis is disabled".to_string(),
        ));
    };

    let pdf_bytes = read_resume_field(multipart).await?;

    // pdf parsing is CPU-bound; keep it off the async workers.
    let resume_text = tokio::task::spawn_blocking(move || extract_resume_text(&pdf_bytes))
        .await
        .map_err(|e| AppError::Internal(anyhow!("extraction task panicked: {e}")))??;

    let analysis = run_analysis(&resume_text, llm).await;
    let ats = calculate_ats_score(&resume_text);
    let skills = extract_skills(&resume_text);

    Ok(Json(AnalyzeResponse {
        analysis,
        ats,
        skills,
    }))
}

/// Pulls the `resume` field out of the multipart body.
async fn read_resume_field(mut multipart: Multipart) -> Result<Bytes, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("malformed multipart body: {e}")))?
    {
        if field.name() == Some(RESUME_FIELD) {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("failed to read upload: {e}")))?;
            if bytes.is_empty() {
                return Err(AppError::Validation("uploaded file is empty".to_string()));
            }
            return Ok(bytes);
        }
    }
    Err(AppError::Validation(format!(
        "multipart field '{RESUME_FIELD}' is required"
    )))
}
