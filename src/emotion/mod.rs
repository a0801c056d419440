// Emotion categories
//
// Every per-category table in the crate (lexicon, labels, comfort pools) is an
// exhaustive match on EmotionCategory, so a new variant cannot ship without
// entries in all of them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub mod classifier;
pub mod lexicon;

pub use classifier::{classify, score, ClassificationScore};

/// The ten fixed emotion tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionCategory {
    Happy,
    Sad,
    Angry,
    Anxious,
    Calm,
    Love,
    Confused,
    Excited,
    Tired,
    Grateful,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EmotionError {
    #[error("unknown emotion '{0}'")]
    UnknownEmotion(String),
}

impl EmotionCategory {
    /// All categories in lexicon declaration order (tie-break order)
    pub const ALL: [EmotionCategory; 10] = [
        EmotionCategory::Happy,
        EmotionCategory::Sad,
        EmotionCategory::Angry,
        EmotionCategory::Anxious,
        EmotionCategory::Calm,
        EmotionCategory::Love,
        EmotionCategory::Confused,
        EmotionCategory::Excited,
        EmotionCategory::Tired,
        EmotionCategory::Grateful,
    ];

    /// Lowercase identifier, matches the serde representation
    pub fn as_str(&self) -> &'static str {
        match self {
            EmotionCategory::Happy => "happy",
            EmotionCategory::Sad => "sad",
            EmotionCategory::Angry => "angry",
            EmotionCategory::Anxious => "anxious",
            EmotionCategory::Calm => "calm",
            EmotionCategory::Love => "love",
            EmotionCategory::Confused => "confused",
            EmotionCategory::Excited => "excited",
            EmotionCategory::Tired => "tired",
            EmotionCategory::Grateful => "grateful",
        }
    }

    /// Human-readable label with emoji, used in prompts and listings
    pub fn label(&self) -> &'static str {
        match self {
            EmotionCategory::Happy => "😊 快乐",
            EmotionCategory::Sad => "😢 悲伤",
            EmotionCategory::Angry => "😠 愤怒",
            EmotionCategory::Anxious => "😰 焦虑",
            EmotionCategory::Calm => "😌 平静",
            EmotionCategory::Love => "❤️ 爱",
            EmotionCategory::Confused => "🤔 困惑",
            EmotionCategory::Excited => "🤗 兴奋",
            EmotionCategory::Tired => "😴 疲惫",
            EmotionCategory::Grateful => "🙏 感恩",
        }
    }

    /// Label without the emoji
    pub fn short_label(&self) -> &'static str {
        match self {
            EmotionCategory::Happy => "快乐",
            EmotionCategory::Sad => "悲伤",
            EmotionCategory::Angry => "愤怒",
            EmotionCategory::Anxious => "焦虑",
            EmotionCategory::Calm => "平静",
            EmotionCategory::Love => "爱",
            EmotionCategory::Confused => "困惑",
            EmotionCategory::Excited => "兴奋",
            EmotionCategory::Tired => "疲惫",
            EmotionCategory::Grateful => "感恩",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            EmotionCategory::Happy => "😊",
            EmotionCategory::Sad => "😢",
            EmotionCategory::Angry => "😠",
            EmotionCategory::Anxious => "😰",
            EmotionCategory::Calm => "😌",
            EmotionCategory::Love => "❤️",
            EmotionCategory::Confused => "🤔",
            EmotionCategory::Excited => "🤗",
            EmotionCategory::Tired => "😴",
            EmotionCategory::Grateful => "🙏",
        }
    }
}

impl fmt::Display for EmotionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmotionCategory {
    type Err = EmotionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        EmotionCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == needle)
            .ok_or_else(|| EmotionError::UnknownEmotion(s.to_string()))
    }
}
