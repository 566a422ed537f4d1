//! Chat-Completion API Client
//!
//! Thin reqwest client for an OpenAI-compatible `/chat/completions`
//! endpoint: send messages, get text back.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::chat::ChatMessage;
use crate::config::AppConfig;
use crate::error::{AppError, Result};

/// Request timeout for completion calls
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

// == Chat Client ==
/// Client for the hosted chat-completion API.
#[derive(Debug, Clone)]
pub struct ChatClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl ChatClient {
    // == Constructor ==
    /// Builds a client from resolved configuration.
    ///
    /// Fails when no API key is configured; callers surface this as a
    /// server-side configuration error, not a client fault.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        if config.openai.api_key.is_empty() {
            return Err(AppError::Config("OpenAI API key not found".to_string()));
        }

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| AppError::Internal(format!("failed to build HTTP client: {err}")))?;

        Ok(Self {
            http,
            api_key: config.openai.api_key.clone(),
            base_url: config.openai.base_url.clone(),
            model: config.openai.model.clone(),
            max_tokens: config.settings.max_tokens,
            temperature: config.settings.temperature,
        })
    }

    // == Complete ==
    /// Sends a message sequence and returns the assistant's reply text.
    pub async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&CompletionRequest {
                model: &self.model,
                messages,
                max_tokens: self.max_tokens,
                temperature: self.temperature,
            })
            .send()
            .await
            .map_err(|err| AppError::Upstream(format!("chat API request failed: {err}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!(
                "chat API returned {status}: {body}"
            )));
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|err| AppError::Upstream(format!("unparsable chat API response: {err}")))?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .ok_or_else(|| AppError::Upstream("chat API returned an empty response".to_string()))
    }
}

// == Wire Types ==

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: String,
}
