mod analysis;
mod config;
mod errors;
mod extract;
mod jobs;
mod llm_client;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::jobs::adzuna::AdzunaSource;
use crate::jobs::apify::{ApifySource, Portal};
use crate::jobs::remoteok::RemoteOkSource;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first; credentials are read exactly once.
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Job Recommender API v{}", env!("CARGO_PKG_VERSION"));

    // LLM client — optional: without it the analysis pipeline is disabled
    // but job fetching keeps working.
    let llm = match &config.groq_api_key {
        Some(key) => {
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Some(LlmClient::new(key.clone()))
        }
        None => {
            warn!("GROQ_API_KEY not set — resume analysis disabled");
            None
        }
    };

    // Job source adapters, constructed once from config.
    let adzuna_credentials = config.adzuna_credentials();
    if adzuna_credentials.is_none() {
        warn!("ADZUNA_APP_ID/ADZUNA_APP_KEY not set — adzuna section disabled");
    }
    if config.apify_api_token.is_none() {
        warn!("APIFY_API_TOKEN not set — linkedin/naukri sections disabled");
    }

    let state = AppState {
        llm,
        remoteok: Arc::new(RemoteOkSource::new()),
        adzuna: Arc::new(AdzunaSource::new(adzuna_credentials)),
        linkedin: Arc::new(ApifySource::new(
            Portal::LinkedIn,
            config.apify_api_token.clone(),
        )),
        naukri: Arc::new(ApifySource::new(
            Portal::Naukri,
            config.apify_api_token.clone(),
        )),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
