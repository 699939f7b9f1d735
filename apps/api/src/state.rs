use std::sync::Arc;

use crate::jobs::adzuna::AdzunaSource;
use crate::jobs::apify::ApifySource;
use crate::jobs::remoteok::RemoteOkSource;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum extractors.
/// Adapters are constructed once from `Config` at startup; credentials never
/// get read from the ambient environment after that.
#[derive(Clone)]
pub struct AppState {
    /// `None` when GROQ_API_KEY is absent — the analysis pipeline is disabled
    /// while job fetching stays functional.
    pub llm: Option<LlmClient>,
    pub remoteok: Arc<RemoteOkSource>,
    pub adzuna: Arc<AdzunaSource>,
    pub linkedin: Arc<ApifySource>,
    pub naukri: Arc<ApifySource>,
}
