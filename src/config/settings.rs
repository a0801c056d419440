// Configuration structs

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::comfort::FallbackPool;

pub const DEFAULT_BASE_URL: &str = "https://api.moonshot.cn";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Chat-completion API settings
    pub api: ApiConfig,

    /// Where journal entries are kept
    pub storage: StorageConfig,

    /// Conversational safety monitor
    pub safety: SafetyConfig,

    /// Local HTTP server
    pub server: ServerSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Bearer credential; None means replies always come from the comfort bank
    pub api_key: Option<String>,

    /// Base URL of the OpenAI-compatible endpoint (without /v1/...)
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Parameters for single-shot entry replies
    pub single_shot: ModeSettings,

    /// Parameters for multi-turn assistant replies
    pub conversation: ModeSettings,

    /// Table used when generation is unavailable
    pub fallback_pool: FallbackPool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            single_shot: ModeSettings {
                model: "kimi-k2-turbo-preview".to_string(),
                temperature: 0.7,
                max_tokens: 200,
            },
            conversation: ModeSettings {
                model: "moonshot-v1-8k".to_string(),
                temperature: 0.8,
                max_tokens: 500,
            },
            fallback_pool: FallbackPool::Comfort,
        }
    }
}

impl ApiConfig {
    /// Credential if present and non-blank
    pub fn credential(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeSettings {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the entry slot file
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: super::moodwall_dir().join("data"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SafetyConfig {
    /// Delay before the supportive message is appended
    pub delay_ms: u64,

    /// Optional JSON file overriding the built-in crisis terms
    pub terms_path: Option<PathBuf>,
}

impl Default for SafetyConfig {
    fn default() -> Self {
        Self {
            delay_ms: 2000,
            terms_path: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Bind address (e.g., "127.0.0.1:8787")
    pub bind_address: String,
    /// Maximum number of open assistant conversations
    pub max_sessions: usize,
    /// Idle conversations are dropped after this many minutes
    pub session_timeout_minutes: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8787".to_string(),
            max_sessions: 100,
            session_timeout_minutes: 30,
        }
    }
}
