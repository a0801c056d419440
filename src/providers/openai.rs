// OpenAI-compatible chat-completion provider
//
// Moonshot (Kimi) exposes the same /v1/chat/completions format as OpenAI, so
// one implementation covers both.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::types::{ChatMessage, ProviderRequest, ProviderResponse};
use super::LlmProvider;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Provider for any OpenAI-compatible chat-completion endpoint
#[derive(Clone)]
pub struct OpenAiCompatibleProvider {
    client: Client,
    api_key: String,
    base_url: String,
    default_model: String,
    provider_name: String,
}

impl OpenAiCompatibleProvider {
    /// Create a provider with custom settings
    pub fn new(
        api_key: String,
        base_url: String,
        default_model: String,
        provider_name: String,
    ) -> Result<Self> {
        Self::with_timeout(
            api_key,
            base_url,
            default_model,
            provider_name,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        )
    }

    /// Create a provider with a custom request timeout
    pub fn with_timeout(
        api_key: String,
        base_url: String,
        default_model: String,
        provider_name: String,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            default_model,
            provider_name,
        })
    }

    /// Endpoint URL for chat completions
    pub fn completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url)
    }

    /// Convert ProviderRequest to the wire format
    fn to_wire_request<'a>(&'a self, request: &'a ProviderRequest) -> CompletionRequest<'a> {
        let model = if request.model.is_empty() {
            self.default_model.as_str()
        } else {
            request.model.as_str()
        };

        CompletionRequest {
            model,
            messages: &request.messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        }
    }

    /// Extract the first choice from a parsed response
    fn from_wire_response(&self, response: CompletionResponse) -> Result<ProviderResponse> {
        let choice = response
            .choices
            .into_iter()
            .next()
            .context("Completion API returned no choices in response")?;

        Ok(ProviderResponse {
            content: choice.message.content,
            model: response.model,
            provider: self.provider_name.clone(),
        })
    }
}

#[async_trait]
impl LlmProvider for OpenAiCompatibleProvider {
    async fn send_message(&self, request: &ProviderRequest) -> Result<ProviderResponse> {
        let wire_request = self.to_wire_request(request);
        let url = self.completions_url();

        tracing::debug!("Sending request to {}: {:?}", self.provider_name, wire_request);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .json(&wire_request)
            .send()
            .await
            .with_context(|| format!("Failed to send request to {} API", self.provider_name))?;

        let status = response.status();

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            anyhow::bail!(
                "{} API request failed\n\nStatus: {}\nBody: {}",
                self.provider_name,
                status,
                error_body
            );
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .with_context(|| format!("Failed to parse {} API response", self.provider_name))?;

        tracing::debug!("Received response: {:?}", completion);

        self.from_wire_response(completion)
    }

    fn name(&self) -> &str {
        &self.provider_name
    }

    fn default_model(&self) -> &str {
        &self.default_model
    }
}

// Wire types

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    content: String,
}
