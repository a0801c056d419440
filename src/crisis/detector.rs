// Crisis keyword detector

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::config::SafetyConfig;

/// Built-in crisis-indicating terms (hopelessness, self-harm intent)
pub const DEFAULT_CRISIS_TERMS: [&str; 9] = [
    "难过", "痛苦", "绝望", "无助", "孤独", "焦虑", "抑郁", "想死", "自杀",
];

/// On-disk term list format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrisisTerms {
    pub terms: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct CrisisDetector {
    // stored lowercased
    terms: Vec<String>,
}

impl Default for CrisisDetector {
    fn default() -> Self {
        Self::from_terms(DEFAULT_CRISIS_TERMS)
    }
}

impl CrisisDetector {
    /// Build a detector from a list of terms
    pub fn from_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let terms = terms
            .into_iter()
            .map(|term| term.as_ref().trim().to_lowercase())
            .filter(|term| !term.is_empty())
            .collect();
        Self { terms }
    }

    /// Load crisis terms from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read crisis terms file: {}", path.display()))?;

        let parsed: CrisisTerms = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        if parsed.terms.is_empty() {
            anyhow::bail!("Crisis terms file {} contains no terms", path.display());
        }

        Ok(Self::from_terms(parsed.terms))
    }

    /// First crisis term found in the text (case-insensitive)
    pub fn detect(&self, text: &str) -> Option<&str> {
        let text_lower = text.to_lowercase();

        let found = self
            .terms
            .iter()
            .find(|term| text_lower.contains(term.as_str()))
            .map(String::as_str);

        if let Some(term) = found {
            tracing::warn!("Crisis detected: term '{}'", term);
        }

        found
    }

    /// Detector from the configured terms file, or the built-in terms
    pub fn from_config(config: &SafetyConfig) -> Result<Self> {
        match &config.terms_path {
            Some(path) => Self::load_from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Active terms, lowercased
    pub fn terms(&self) -> &[String] {
        &self.terms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crisis_detection() {
        let detector = CrisisDetector::default();

        assert_eq!(detector.detect("我真的好绝望"), Some("绝望"));
        assert!(detector.detect("有时候会想死").is_some());
        assert!(detector.detect("今天天气不错").is_none());
    }

    #[test]
    fn test_case_insensitive() {
        let detector = CrisisDetector::from_terms(["Hopeless"]);

        assert!(detector.detect("I feel HOPELESS").is_some());
        assert!(detector.detect("hopeless").is_some());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("terms.json");
        fs::write(&path, r#"{"terms": ["崩溃", " "]}"#).unwrap();

        let detector = CrisisDetector::load_from_file(&path).unwrap();
        assert_eq!(detector.terms(), ["崩溃".to_string()]);
        assert!(detector.detect("快崩溃了").is_some());
    }

    #[test]
    fn test_empty_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("terms.json");
        fs::write(&path, r#"{"terms": []}"#).unwrap();

        assert!(CrisisDetector::load_from_file(&path).is_err());
    }
}
