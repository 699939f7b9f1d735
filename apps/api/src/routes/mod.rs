pub mod health;
pub mod jobs;
pub mod resume;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume analysis
        .route("/api/v1/resumes/analyze", post(resume::handle_analyze))
        // Job recommendations (all sources, sectioned)
        .route("/api/v1/jobs", get(jobs::handle_jobs))
        // Remote tool facade — one endpoint per scraped portal
        .route(
            "/api/v1/tools/linkedin-jobs",
            post(jobs::handle_linkedin_tool),
        )
        .route("/api/v1/tools/naukri-jobs", post(jobs::handle_naukri_tool))
        .with_state(state)
}
