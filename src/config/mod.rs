// Configuration module
// Public interface for configuration loading

mod loader;
mod settings;

use std::path::PathBuf;

pub use loader::{apply_env_overrides, load_config, load_from_file, parse_config, validate, API_KEY_VARS};
pub use settings::{
    ApiConfig, Config, ModeSettings, SafetyConfig, ServerSettings, StorageConfig, DEFAULT_BASE_URL,
};

/// ~/.moodwall (or ./.moodwall when no home directory is known)
pub fn moodwall_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".moodwall")
}
