use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    advice::AdviceStrategy,
    error::ResolutionFailure,
    model::{AdviceResult, WeatherSnapshot},
};

pub const OPENAI_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Model replies are free text; anything longer than this is cut off before
/// it reaches the user.
pub const MAX_REPLY_CHARS: usize = 400;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// The non-deterministic strategy: serializes the snapshot into a prompt
/// and asks an OpenAI-compatible chat endpoint what to wear.
#[derive(Debug, Clone)]
pub struct GenerativeAdvice {
    api_key: String,
    model: String,
    base_url: String,
    http: Client,
}

impl GenerativeAdvice {
    pub fn new(api_key: String, model: String) -> Result<Self> {
        Self::with_base_url(api_key, model, OPENAI_API_BASE.to_string())
    }

    /// Point the strategy at a different endpoint, e.g. a test server.
    pub fn with_base_url(api_key: String, model: String, base_url: String) -> Result<Self> {
        if api_key.is_empty() {
            return Err(anyhow!("Generative API key cannot be empty"));
        }

        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client for generative advice")?;

        Ok(Self { api_key, model, base_url, http })
    }

    fn build_prompt(snapshot: &WeatherSnapshot) -> String {
        format!(
            "The temperature is {}°C, precipitation is {} mm and the wind speed is {} m/s. \
             In one short street-smart sentence, tell me what to wear.",
            snapshot.temperature_c, snapshot.precipitation_mm, snapshot.wind_speed_ms,
        )
    }
}

#[async_trait]
impl AdviceStrategy for GenerativeAdvice {
    async fn advise(
        &self,
        snapshot: &WeatherSnapshot,
    ) -> Result<AdviceResult, ResolutionFailure> {
        let url = format!("{}/chat/completions", self.base_url);

        debug!(model = %self.model, "requesting generative advice");

        let request = ChatRequest {
            model: self.model.as_str(),
            messages: vec![ChatMessage {
                role: "user",
                content: Self::build_prompt(snapshot),
            }],
            max_tokens: 120,
        };

        let res = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                ResolutionFailure::upstream(format!("generative request failed: {e}"))
            })?;

        let status = res.status();
        let body = res.text().await.map_err(|e| {
            ResolutionFailure::upstream(format!("failed to read generative response body: {e}"))
        })?;

        if !status.is_success() {
            return Err(ResolutionFailure::upstream(format!(
                "generative request failed with status {}: {}",
                status,
                truncate_body(&body),
            )));
        }

        let parsed: ChatResponse = serde_json::from_str(&body).map_err(|e| {
            ResolutionFailure::malformed(format!("failed to parse generative JSON: {e}"))
        })?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .unwrap_or_default();

        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Err(ResolutionFailure::malformed(
                "generative response contained no advice text".to_string(),
            ));
        }

        let text: String = trimmed.chars().take(MAX_REPLY_CHARS).collect();

        Ok(AdviceResult { text })
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

// Char-based so a cut inside a multibyte body cannot panic.
fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    let truncated: String = body.chars().take(MAX).collect();
    if truncated.len() < body.len() { format!("{truncated}...") } else { truncated }
}
