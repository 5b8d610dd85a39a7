use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::GenerationError;

pub const DEFAULT_MODEL: &str = "claude-3-7-sonnet-latest";
pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
pub const MAX_TOKENS: u32 = 4000;
pub const TEMPERATURE: f64 = 0.7;
const REQUEST_TIMEOUT_SECS: u64 = 120;
const SYSTEM_PROMPT: &str =
    "You are an expert podcast producer who creates concise, informative program notes.";

/// Turns a finished prompt into program notes
#[async_trait]
pub trait NotesGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

#[derive(Serialize)]
struct ClaudeRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f64,
    system: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ClaudeResponse {
    content: Vec<Content>,
}

#[derive(Deserialize)]
struct Content {
    #[serde(default)]
    text: Option<String>,
}

pub struct ClaudeNotesGenerator {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl ClaudeNotesGenerator {
    pub fn new(api_key: String, model: impl Into<String>) -> Result<Self, GenerationError> {
        Self::with_base_url(api_key, model, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(
        api_key: String,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, GenerationError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(GenerationError::Request)?;

        Ok(Self {
            client,
            api_key,
            model: model.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl NotesGenerator for ClaudeNotesGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let request = ClaudeRequest {
            model: &self.model,
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
            system: SYSTEM_PROMPT,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        };

        info!("Requesting program notes from {}", self.model);
        debug!("Prompt is {} characters", prompt.chars().count());

        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(GenerationError::Request)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("unknown error"));
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    GenerationError::Unauthorized(error_text)
                }
                StatusCode::TOO_MANY_REQUESTS => GenerationError::RateLimited(error_text),
                _ => GenerationError::Api {
                    status,
                    body: error_text,
                },
            });
        }

        let claude_response = response
            .json::<ClaudeResponse>()
            .await
            .map_err(GenerationError::Decode)?;

        Ok(claude_response
            .content
            .into_iter()
            .filter_map(|c| c.text)
            .collect::<String>())
    }
}
