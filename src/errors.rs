// User-friendly error messages
//
// Provides helpers to convert technical errors into actionable messages
// that guide users toward solutions.
//
// Localization Support:
// Headings follow the LANG environment variable. Chinese (zh*) and English
// are supported; anything else falls back to English.

use anyhow::{Context, Result};

/// Get the current locale from environment
fn get_locale() -> &'static str {
    if let Ok(lang) = std::env::var("LANG") {
        if lang.starts_with("zh") {
            return "zh";
        }
    }
    "en"
}

/// Localized text helper
fn t(key: &str) -> &str {
    match (get_locale(), key) {
        ("zh", "try") => "可以尝试:",
        ("zh", "suggestion") => "建议:",
        ("zh", "possible_causes") => "可能的原因:",
        ("zh", "error") => "错误:",

        (_, "try") => "Try:",
        (_, "suggestion") => "Suggestion:",
        (_, "possible_causes") => "Possible causes:",
        (_, "error") => "Error:",
        (_, other) => other,
    }
}

/// Wrap an error with user-friendly context
pub trait UserFriendlyError {
    /// Add user-friendly context to this error
    fn user_context(self, message: &str) -> Self;

    /// Add user-friendly context with a suggestion
    fn user_context_with_suggestion(self, problem: &str, suggestion: &str) -> Self;
}

impl<T> UserFriendlyError for Result<T> {
    fn user_context(self, message: &str) -> Self {
        self.with_context(|| message.to_string())
    }

    fn user_context_with_suggestion(self, problem: &str, suggestion: &str) -> Self {
        self.with_context(|| {
            format!(
                "{}\n\n\x1b[1;33m{}\x1b[0m {}",
                problem,
                t("suggestion"),
                suggestion
            )
        })
    }
}

/// Format a config parse error with helpful suggestions
pub fn config_parse_error(error: &str) -> String {
    format!(
        "Failed to parse config file\n\n\
        \x1b[1;33m{}\x1b[0m {}\n\n\
        \x1b[1;32m{}\x1b[0m\n\
        1. Check config file syntax:\n\
           \x1b[36mcat ~/.moodwall/config.toml\x1b[0m\n\n\
        2. Move it aside to fall back to defaults:\n\
           \x1b[36mmv ~/.moodwall/config.toml ~/.moodwall/config.toml.backup\x1b[0m\n\n\
        3. Common mistakes:\n\
           • Missing quotes around strings\n\
           • Unclosed section headers like [api\n\
           • fallback_pool must be \"comfort\" or \"reply\"",
        t("error"),
        error,
        t("try")
    )
}

/// Format a journal storage error with helpful suggestions
pub fn storage_error(path: &str, operation: &str) -> String {
    format!(
        "Could not {} journal entries at {}\n\n\
        \x1b[1;33m{}\x1b[0m\n\
        • Data directory is not writable\n\
        • Disk is full\n\
        • The entry file was edited by hand and is no longer valid JSON\n\n\
        \x1b[1;32m{}\x1b[0m\n\
        1. Check directory permissions:\n\
           \x1b[36mls -la {}\x1b[0m\n\n\
        2. Point storage.data_dir in ~/.moodwall/config.toml somewhere writable",
        operation,
        path,
        t("possible_causes"),
        t("try"),
        path
    )
}

/// Suggestion attached to crisis terms file failures
pub const TERMS_FILE_SUGGESTION: &str =
    "check safety.terms_path in ~/.moodwall/config.toml; the file must look like {\"terms\": [\"...\"]}";

/// Notice shown when no API key is configured
pub fn missing_api_key_notice() -> String {
    format!(
        "No API key configured: replies will use built-in comfort messages.\n\n\
        \x1b[1;32m{}\x1b[0m\n\
        1. Export a key:\n\
           \x1b[36mexport KIMI_API_KEY=\"sk-...\"\x1b[0m\n\n\
        2. Or set it in ~/.moodwall/config.toml:\n\
           \x1b[36m[api]\x1b[0m\n\
           \x1b[36mapi_key = \"sk-...\"\x1b[0m",
        t("try")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_parse_error_has_paths() {
        let msg = config_parse_error("expected `]`");
        assert!(msg.contains("expected `]`"));
        assert!(msg.contains("~/.moodwall/config.toml"));
    }

    #[test]
    fn test_storage_error_mentions_operation() {
        let msg = storage_error("/tmp/moodwall", "save");
        assert!(msg.contains("Could not save"));
        assert!(msg.contains("storage.data_dir"));
    }

    #[test]
    fn test_missing_key_notice_names_env_var() {
        assert!(missing_api_key_notice().contains("KIMI_API_KEY"));
    }

    #[test]
    fn test_user_context_with_suggestion() {
        let result: Result<()> = Err(anyhow::anyhow!("boom"));
        let err = result
            .user_context_with_suggestion("Could not open journal", "check permissions")
            .unwrap_err();
        assert!(format!("{:#}", err).contains("check permissions"));
    }
}
