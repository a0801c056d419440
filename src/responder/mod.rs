// AI response generator
//
// Two-stage pipeline: one attempt at the remote completion API, then the
// comfort bank. Every failure path resolves to a Reply; nothing is returned
// to the caller as an error.

use anyhow::Result;
use serde::Serialize;
use std::sync::Arc;

use crate::comfort::{ComfortBank, FallbackPool};
use crate::config::{ApiConfig, ModeSettings};
use crate::emotion::EmotionCategory;
use crate::providers::{create_provider, ChatMessage, LlmProvider, ProviderRequest};

pub mod prompts;

/// Which prompt and sampling parameters to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseMode {
    /// One empathetic reply to a journal entry
    SingleShot,
    /// Next turn of the assistant dialogue
    Conversation,
}

/// Outcome of a generation attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", content = "text", rename_all = "snake_case")]
pub enum Reply {
    /// Text produced by the remote model
    Generated(String),
    /// Static message used because generation was unavailable or failed
    Fallback(String),
}

impl Reply {
    pub fn text(&self) -> &str {
        match self {
            Reply::Generated(text) | Reply::Fallback(text) => text,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Reply::Generated(text) | Reply::Fallback(text) => text,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Reply::Fallback(_))
    }
}

/// Builds prompts, calls the provider, falls back to the comfort bank
pub struct ResponseGenerator {
    provider: Option<Arc<dyn LlmProvider>>,
    bank: Arc<ComfortBank>,
    single_shot: ModeSettings,
    conversation: ModeSettings,
    fallback_pool: FallbackPool,
}

impl ResponseGenerator {
    /// Create a generator; `provider` is None when no credential is configured
    pub fn new(provider: Option<Box<dyn LlmProvider>>, bank: ComfortBank, api: &ApiConfig) -> Self {
        Self {
            provider: provider.map(Arc::from),
            bank: Arc::new(bank),
            single_shot: api.single_shot.clone(),
            conversation: api.conversation.clone(),
            fallback_pool: api.fallback_pool,
        }
    }

    /// Create a generator from configuration with an entropy-seeded bank
    pub fn from_config(api: &ApiConfig) -> Result<Self> {
        let provider = create_provider(api)?;
        let bank = ComfortBank::from_entropy()?;

        match &provider {
            Some(p) => tracing::info!("Response generator using provider {}", p.name()),
            None => tracing::info!("Response generator running without a provider"),
        }

        Ok(Self::new(provider, bank, api))
    }

    /// Whether a remote provider is configured
    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// The comfort bank used for fallbacks
    pub fn bank(&self) -> &ComfortBank {
        &self.bank
    }

    /// Sampling parameters for a mode
    pub fn settings(&self, mode: ResponseMode) -> &ModeSettings {
        match mode {
            ResponseMode::SingleShot => &self.single_shot,
            ResponseMode::Conversation => &self.conversation,
        }
    }

    /// Build the completion request for a mode
    ///
    /// In conversation mode `text` is the formatted transcript plus the new
    /// message; in single-shot mode it is the raw entry text.
    pub fn build_request(&self, category: EmotionCategory, text: &str, mode: ResponseMode) -> ProviderRequest {
        let (system, user) = match mode {
            ResponseMode::SingleShot => (
                prompts::SINGLE_SHOT_SYSTEM_PROMPT,
                prompts::single_shot_prompt(category, text),
            ),
            ResponseMode::Conversation => (
                prompts::CONVERSATION_SYSTEM_PROMPT,
                prompts::conversation_prompt(category, text),
            ),
        };

        let settings = self.settings(mode);
        ProviderRequest::new(vec![ChatMessage::system(system), ChatMessage::user(user)])
            .with_model(settings.model.clone())
            .with_temperature(settings.temperature)
            .with_max_tokens(settings.max_tokens)
    }

    /// Generate a reply; never fails
    pub async fn generate(&self, category: EmotionCategory, text: &str, mode: ResponseMode) -> Reply {
        let Some(provider) = &self.provider else {
            tracing::debug!("No API key configured, using comfort bank");
            return self.fallback(category);
        };

        let request = self.build_request(category, text, mode);

        match provider.send_message(&request).await {
            Ok(response) => {
                let reply = response.text();
                if reply.is_empty() {
                    tracing::warn!(
                        provider = provider.name(),
                        "Completion was empty, using comfort bank"
                    );
                    return self.fallback(category);
                }
                Reply::Generated(reply.to_string())
            }
            Err(e) => {
                tracing::warn!(
                    provider = provider.name(),
                    error = %format!("{:#}", e),
                    "Completion request failed, using comfort bank"
                );
                self.fallback(category)
            }
        }
    }

    fn fallback(&self, category: EmotionCategory) -> Reply {
        Reply::Fallback(self.bank.pick(category, self.fallback_pool).to_string())
    }
}
