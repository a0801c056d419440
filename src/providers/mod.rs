// Chat-completion provider support
//
// The responder talks to a remote language model through LlmProvider. The
// only shipped implementation speaks the OpenAI-compatible chat-completion
// protocol (Moonshot/Kimi, OpenAI, and anything else exposing
// /v1/chat/completions).

use anyhow::Result;
use async_trait::async_trait;

pub mod factory;
pub mod openai;
pub mod types;

pub use factory::create_provider;
pub use openai::OpenAiCompatibleProvider;
pub use types::{ChatMessage, ChatRole, ProviderRequest, ProviderResponse};

/// A remote chat-completion backend
///
/// Implementations make exactly one request per call and never retry; the
/// caller decides what a failure degrades to.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// One non-streaming completion for the request
    async fn send_message(&self, request: &ProviderRequest) -> Result<ProviderResponse>;

    /// Short name for logs (e.g., "kimi")
    fn name(&self) -> &str;

    /// Model used when the request leaves it empty
    fn default_model(&self) -> &str;
}
