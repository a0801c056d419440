// Provider factory
//
// Creates the completion provider from configuration

use anyhow::Result;
use std::time::Duration;

use super::openai::OpenAiCompatibleProvider;
use super::LlmProvider;
use crate::config::{ApiConfig, DEFAULT_BASE_URL};

/// Create a provider from the API configuration
///
/// Returns Ok(None) when no credential is configured; that is an expected
/// state and callers fall back to the comfort bank.
pub fn create_provider(config: &ApiConfig) -> Result<Option<Box<dyn LlmProvider>>> {
    let Some(api_key) = config.credential() else {
        return Ok(None);
    };

    let provider_name = if config.base_url.trim_end_matches('/') == DEFAULT_BASE_URL {
        "kimi"
    } else {
        "openai-compatible"
    };

    let provider = OpenAiCompatibleProvider::with_timeout(
        api_key.to_string(),
        config.base_url.clone(),
        config.single_shot.model.clone(),
        provider_name.to_string(),
        Duration::from_secs(config.timeout_secs),
    )?;

    Ok(Some(Box::new(provider)))
}
