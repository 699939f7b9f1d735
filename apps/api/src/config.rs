use anyhow::{Context, Result};

/// Application configuration loaded from environment variables once at startup.
/// Provider credentials are all optional: a missing credential disables the
/// feature that needs it, never the whole service.
#[derive(Debug, Clone)]
pub struct Config {
    /// Groq API key. Absent → the analysis pipeline is disabled; job fetching still works.
    pub groq_api_key: Option<String>,
    /// Apify platform token for the scraping adapters (LinkedIn, Naukri).
    pub apify_api_token: Option<String>,
    /// Adzuna application credentials. Both must be present for the adapter to run.
    pub adzuna_app_id: Option<String>,
    pub adzuna_app_key: Option<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            groq_api_key: optional_env("GROQ_API_KEY"),
            apify_api_token: optional_env("APIFY_API_TOKEN"),
            adzuna_app_id: optional_env("ADZUNA_APP_ID"),
            adzuna_app_key: optional_env("ADZUNA_APP_KEY"),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Adzuna credentials as a pair, present only when both halves are set.
    pub fn adzuna_credentials(&self) -> Option<(String, String)> {
        match (&self.adzuna_app_id, &self.adzuna_app_key) {
            (Some(id), Some(key)) => Some((id.clone(), key.clone())),
            _ => None,
        }
    }
}

/// Reads an env var, treating empty strings as absent.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
