// Configuration loader
// Reads ~/.moodwall/config.toml (optional) and the API key from the environment

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::settings::Config;
use crate::errors::config_parse_error;

/// Environment variables checked for the API key, in priority order
pub const API_KEY_VARS: [&str; 2] = ["KIMI_API_KEY", "NEXT_PUBLIC_KIMI_API_KEY"];

/// Load configuration from the given file, MOODWALL_CONFIG, or the default path
///
/// A missing file yields the defaults. A missing API key is not an error.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let path = resolve_config_path(path);

    let mut config = match path {
        Some(path) if path.exists() => load_from_file(&path)?,
        Some(path) => {
            tracing::debug!("No config file at {}, using defaults", path.display());
            Config::default()
        }
        None => Config::default(),
    };

    apply_env_overrides(&mut config, |name| std::env::var(name).ok());
    validate(&config)?;

    if config.api.credential().is_none() {
        tracing::info!("No API key configured; replies will come from the comfort bank");
    }

    Ok(config)
}

fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    if let Ok(path) = std::env::var("MOODWALL_CONFIG") {
        if !path.is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    dirs::home_dir().map(|home| home.join(".moodwall/config.toml"))
}

/// Parse a TOML config file
pub fn load_from_file(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    parse_config(&contents)
}

/// Parse TOML config contents; absent fields take their defaults
pub fn parse_config(contents: &str) -> Result<Config> {
    toml::from_str(contents).map_err(|e| anyhow::anyhow!(config_parse_error(&e.to_string())))
}

/// Apply credential overrides from the environment
///
/// The first non-blank variable in API_KEY_VARS wins over the file value.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    for name in API_KEY_VARS {
        if let Some(value) = lookup(name) {
            if !value.trim().is_empty() {
                tracing::debug!("Using API key from {}", name);
                config.api.api_key = Some(value);
                return;
            }
        }
    }
}

/// Reject settings that invert the intent of the two reply modes
///
/// Conversation replies are expected to be at least as long and as
/// exploratory as single-shot replies.
pub fn validate(config: &Config) -> Result<()> {
    let single = &config.api.single_shot;
    let conversation = &config.api.conversation;

    if conversation.max_tokens < single.max_tokens {
        bail!(
            "api.conversation.max_tokens ({}) must be >= api.single_shot.max_tokens ({})",
            conversation.max_tokens,
            single.max_tokens
        );
    }

    if conversation.temperature < single.temperature {
        bail!(
            "api.conversation.temperature ({}) must be >= api.single_shot.temperature ({})",
            conversation.temperature,
            single.temperature
        );
    }

    if config.api.base_url.trim().is_empty() {
        bail!("api.base_url must not be empty");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comfort::FallbackPool;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.api_key, None);
        assert_eq!(config.api.single_shot.temperature, 0.7);
        assert_eq!(config.api.single_shot.max_tokens, 200);
        assert_eq!(config.api.conversation.temperature, 0.8);
        assert_eq!(config.api.conversation.max_tokens, 500);
        assert_eq!(config.safety.delay_ms, 2000);
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_parse_partial_file() {
        let config = parse_config(
            r#"
            [api]
            api_key = "sk-test"
            fallback_pool = "reply"

            [safety]
            delay_ms = 50
            "#,
        )
        .unwrap();

        assert_eq!(config.api.credential(), Some("sk-test"));
        assert_eq!(config.api.fallback_pool, FallbackPool::Reply);
        assert_eq!(config.safety.delay_ms, 50);
        assert_eq!(config.api.conversation.model, "moonshot-v1-8k");
    }

    #[test]
    fn test_parse_error_is_friendly() {
        let err = parse_config("[api\napi_key = ").unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_env_override_priority() {
        let mut config = Config::default();
        config.api.api_key = Some("from-file".to_string());

        apply_env_overrides(&mut config, |name| match name {
            "KIMI_API_KEY" => Some("  ".to_string()),
            "NEXT_PUBLIC_KIMI_API_KEY" => Some("public-key".to_string()),
            _ => None,
        });
        assert_eq!(config.api.credential(), Some("public-key"));

        apply_env_overrides(&mut config, |name| {
            (name == "KIMI_API_KEY").then(|| "kimi-key".to_string())
        });
        assert_eq!(config.api.credential(), Some("kimi-key"));
    }

    #[test]
    fn test_blank_key_is_absent() {
        let mut config = Config::default();
        config.api.api_key = Some("   ".to_string());
        assert_eq!(config.api.credential(), None);
    }

    #[test]
    fn test_validate_rejects_inverted_modes() {
        let mut config = Config::default();
        config.api.conversation.max_tokens = 100;
        assert!(validate(&config).is_err());

        let mut config = Config::default();
        config.api.conversation.temperature = 0.2;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config.server.bind_address, "127.0.0.1:8787");
    }
}
