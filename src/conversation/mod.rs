// Assistant dialogue: messages, transcript and session state

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::emotion::EmotionCategory;

pub mod session;

pub use session::{ConversationSession, SessionError};

/// Number of prior messages included in the reply context
pub const CONTEXT_WINDOW: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Speaker prefix used when formatting history for the model
    pub fn speaker(&self) -> &'static str {
        match self {
            Role::User => "用户",
            Role::Assistant => "疗愈师",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub id: String,
    pub role: Role,
    pub text: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotion: Option<EmotionCategory>,
}

impl ConversationMessage {
    pub fn user(text: impl Into<String>, emotion: Option<EmotionCategory>) -> Self {
        Self::new(Role::User, text.into(), emotion)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, text.into(), None)
    }

    fn new(role: Role, text: String, emotion: Option<EmotionCategory>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            text,
            created_at: Utc::now(),
            emotion,
        }
    }
}

/// Ordered, append-only message list
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transcript {
    messages: Vec<ConversationMessage>,
}

/// Transcript shared between a session and its safety timer
pub type SharedTranscript = Arc<Mutex<Transcript>>;

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: ConversationMessage) {
        self.messages.push(message);
    }

    /// Last `n` messages in order
    pub fn recent(&self, n: usize) -> &[ConversationMessage] {
        let start = self.messages.len().saturating_sub(n);
        &self.messages[start..]
    }

    pub fn messages(&self) -> &[ConversationMessage] {
        &self.messages
    }

    pub fn snapshot(&self) -> Vec<ConversationMessage> {
        self.messages.clone()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Clear everything (dialog closed)
    pub fn reset(&mut self) {
        self.messages.clear();
    }
}

/// Opening assistant message for a new dialog
pub fn welcome_message(emotion: Option<EmotionCategory>, context: Option<&str>) -> String {
    let context = context.map(str::trim).filter(|c| !c.is_empty());

    match (emotion, context) {
        (Some(emotion), Some(context)) => format!(
            "我注意到你现在的情绪是{}，你说：\"{}\"\n\n我是你的AI疗愈助手，专门来这里陪伴和支持你的。\
            你可以和我聊聊你的感受，我会用心倾听并提供温暖的建议。",
            emotion.short_label(),
            context
        ),
        (Some(emotion), None) => format!(
            "我感受到你现在的情绪是{}。我是你的AI疗愈助手，专门来这里陪伴和支持你的。想聊聊发生了什么吗？",
            emotion.short_label()
        ),
        _ => "你好！我是你的AI疗愈助手 🤗\n\n我专门设计来帮助你理解和调节情绪。\
            无论你正在经历什么，我都在这里陪伴你、支持你。请随时和我分享你的感受！"
            .to_string(),
    }
}

/// Format prior messages plus the new one as model context
pub fn format_context(history: &[ConversationMessage], latest: &str) -> String {
    let lines = history
        .iter()
        .map(|m| format!("{}: {}", m.role.speaker(), m.text))
        .collect::<Vec<_>>()
        .join("\n");

    format!("对话历史:\n{}\n用户最新消息: {}", lines, latest)
}
