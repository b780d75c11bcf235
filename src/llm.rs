//! Chat-completion client for summarisation calls.
//!
//! A thin pass-through over an OpenAI-style `/chat/completions` endpoint:
//! one system message, one user message, first choice back. No retries, no
//! streaming, no timeout beyond the transport's own.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use thiserror::Error;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("LLM request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("LLM API error: {0}")]
    ApiError(String),
    #[error("no text in LLM response")]
    MalformedResponse,
}

/// Capability that answers a (system role, prompt) exchange with the model's
/// first-choice text. The summariser only depends on this trait.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn complete(
        &self,
        model: &str,
        temperature: f32,
        system_role: &str,
        prompt: &str,
    ) -> Result<String, LlmError>;
}

/// OpenAI-compatible chat client
pub struct OpenAiChat {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenAiChat {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the client at a different OpenAI-compatible endpoint
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl ChatModel for OpenAiChat {
    async fn complete(
        &self,
        model: &str,
        temperature: f32,
        system_role: &str,
        prompt: &str,
    ) -> Result<String, LlmError> {
        let request_body = json!({
            "model": model,
            "temperature": temperature,
            "messages": [
                { "role": "system", "content": system_role },
                { "role": "user", "content": prompt }
            ]
        });

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(LlmError::ApiError(error_text));
        }

        let response_json: Value = response.json().await?;

        first_choice_content(&response_json).ok_or(LlmError::MalformedResponse)
    }
}

/// Pull `choices[0].message.content` out of a chat-completion response
fn first_choice_content(response: &Value) -> Option<String> {
    response
        .get("choices")?
        .as_array()?
        .first()?
        .get("message")?
        .get("content")?
        .as_str()
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_first_choice_content() {
        let response = json!({
            "choices": [
                { "message": { "role": "assistant", "content": "a summary" } },
                { "message": { "role": "assistant", "content": "ignored" } }
            ]
        });
        assert_eq!(
            first_choice_content(&response),
            Some("a summary".to_string())
        );
    }

    #[test]
    fn missing_choices_is_malformed() {
        assert_eq!(first_choice_content(&json!({ "choices": [] })), None);
        assert_eq!(first_choice_content(&json!({ "error": "boom" })), None);
    }
}
