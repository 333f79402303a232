//! Text completion capability used by the scoring adapter
//!
//! [`TextCompletion`] is the seam: the orchestrator receives an
//! `Arc<dyn TextCompletion>` at construction, so tests plug in stubs and
//! production plugs in [`AnthropicCompletion`].

use crate::config::{AnthropicConfig, GenerationOptions};
use crate::error::{RelevanceError, Result};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// A generative text completion provider
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextCompletion: Send + Sync {
    /// Complete `prompt` and return the text of the single candidate
    async fn generate(&self, prompt: &str, options: &GenerationOptions) -> Result<String>;

    fn model_name(&self) -> &str;
}

/// Anthropic Messages API client
pub struct AnthropicCompletion {
    config: AnthropicConfig,
    client: Client,
}

/// Anthropic API message format
#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    top_k: u32,
    top_p: f32,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

/// Anthropic API response format
#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

impl AnthropicCompletion {
    pub fn new(config: AnthropicConfig) -> Result<Self> {
        if config.api_key.expose_secret().is_empty() {
            return Err(RelevanceError::Config(
                "ANTHROPIC_API_KEY not set".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl TextCompletion for AnthropicCompletion {
    async fn generate(&self, prompt: &str, options: &GenerationOptions) -> Result<String> {
        debug!(
            "Calling Anthropic API ({} chars, model {})",
            prompt.len(),
            self.config.model
        );

        // The Messages API always returns exactly one candidate
        if options.candidate_count != 1 {
            return Err(RelevanceError::Config(format!(
                "Anthropic Messages API returns one candidate, {} requested",
                options.candidate_count
            )));
        }

        let request = AnthropicRequest {
            model: &self.config.model,
            max_tokens: options.max_output_tokens,
            temperature: options.temperature,
            top_k: options.top_k,
            top_p: options.top_p,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(self.messages_url())
            .header("x-api-key", self.config.api_key.expose_secret())
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(RelevanceError::LlmApi(format!(
                "API request failed with status {}: {}",
                status, error_text
            )));
        }

        let api_response: AnthropicResponse = response
            .json()
            .await
            .map_err(|e| RelevanceError::LlmApi(format!("Failed to parse response: {}", e)))?;

        first_text(api_response)
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

fn first_text(response: AnthropicResponse) -> Result<String> {
    response
        .content
        .into_iter()
        .filter(|c| c.kind == "text")
        .find_map(|c| c.text)
        .ok_or_else(|| RelevanceError::LlmApi("Empty response from API".to_string()))
}
