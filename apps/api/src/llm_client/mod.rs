/// LLM Client — the single point of entry for all Groq API calls.
///
/// ARCHITECTURAL RULE: No other module may call the Groq API directly.
/// All LLM interactions MUST go through this module.
///
/// Model: llama-3.3-70b-versatile (hardcoded — do not make configurable to prevent drift)
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod prompts;

const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
/// The model used for all LLM calls.
/// This is intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "llama-3.3-70b-versatile";

/// Completions are not retried here: a failed call degrades only the section
/// that needed it, and the pipeline decides what to surface.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("authentication rejected (status {status}); check GROQ_API_KEY")]
    Auth { status: u16 },

    #[error("rate limited by the model provider")]
    RateLimited,

    #[error("transient provider failure: {0}")]
    Transient(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned empty content")]
    EmptyContent,
}

impl From<reqwest::Error> for LlmError {
    fn from(e: reqwest::Error) -> Self {
        LlmError::Transient(e.to_string())
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GroqError {
    error: GroqErrorBody,
}

#[derive(Debug, Deserialize)]
struct GroqErrorBody {
    message: String,
}

/// Seam for the analysis pipeline: production code uses `LlmClient`, tests
/// swap in a stub to exercise per-section degradation.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(
        &self,
        prompt: &str,
        system: &str,
        max_tokens: u32,
    ) -> Result<String, LlmError>;
}

/// The single LLM client used by every service in the API.
/// Wraps the Groq chat-completions endpoint (OpenAI-compatible schema).
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
}

impl LlmClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }

    /// Makes one call to the Groq API and returns the completion text.
    pub async fn call(
        &self,
        prompt: &str,
        system: &str,
        max_tokens: u32,
    ) -> Result<String, LlmError> {
        let request_body = ChatRequest {
            model: MODEL,
            max_tokens,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
        };

        let response = self
            .client
            .post(GROQ_API_URL)
            .bearer_auth(&self.api_key)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(error_for_status(status, &body));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Transient(format!("malformed provider response: {e}")))?;

        if let Some(usage) = &chat.usage {
            debug!(
                "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        let text = chat
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|t| t.trim().to_string())
            .unwrap_or_default();

        if text.is_empty() {
            return Err(LlmError::EmptyContent);
        }
        Ok(text)
    }
}

#[async_trait]
impl CompletionClient for LlmClient {
    async fn complete(
        &self,
        prompt: &str,
        system: &str,
        max_tokens: u32,
    ) -> Result<String, LlmError> {
        self.call(prompt, system, max_tokens).await
    }
}

/// Maps a non-success provider status to the error taxonomy:
/// 401/403 → Auth, 429 → RateLimited, 5xx → Transient, anything else → Api.
fn error_for_status(status: u16, body: &str) -> LlmError {
    match status {
        401 | 403 => LlmError::Auth { status },
        429 => LlmError::RateLimited,
        500..=599 => LlmError::Transient(format!("provider returned {status}")),
        _ => {
            let message = serde_json::from_str::<GroqError>(body)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| body.to_string());
            LlmError::Api { status, message }
        }
    }
}
