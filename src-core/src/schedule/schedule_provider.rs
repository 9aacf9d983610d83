//! Text-generation collaborator for schedule planning.
//!
//! One request/response operation against an OpenAI-compatible
//! chat-completions endpoint. No retry, no streaming, no caching.

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::schedule::schedule_errors::ScheduleError;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o";

/// System role sent with every planning request.
pub const SYSTEM_ROLE: &str = "You are an AI productivity assistant.";

/// Sampling temperature for schedule generation.
const COMPLETION_TEMPERATURE: f32 = 0.7;

/// A text-generation collaborator: prompt in, raw reply text out.
#[async_trait]
pub trait ScheduleProviderTrait: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, ScheduleError>;
}

/// OpenAI-compatible chat-completions client.
pub struct ChatCompletionProvider {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

// ============================================================================
// Request/response structures for the chat-completions API
// ============================================================================

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReplyMessage,
}

#[derive(Deserialize)]
struct ChatReplyMessage {
    content: Option<String>,
}

impl ChatCompletionProvider {
    pub fn new(
        api_key: Option<String>,
        base_url: Option<String>,
        model: Option<String>,
    ) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .unwrap_or_else(|_| Client::new());

        ChatCompletionProvider {
            client,
            api_key,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        }
    }
}

#[async_trait]
impl ScheduleProviderTrait for ChatCompletionProvider {
    async fn complete(&self, prompt: &str) -> Result<String, ScheduleError> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(ScheduleError::MissingApiKey)?;

        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        debug!("Requesting schedule completion from {}", url);

        let body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_ROLE,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: COMPLETION_TEMPERATURE,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ScheduleError::Provider(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ScheduleError::Provider(format!("HTTP {}: {}", status, text)));
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ScheduleError::Provider(format!("Invalid provider response: {}", e)))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();

        Ok(content.trim().to_string())
    }
}
