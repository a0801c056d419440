// One assistant dialog: transcript, busy flag and safety timer

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use thiserror::Error;
use uuid::Uuid;

use super::{format_context, welcome_message, ConversationMessage, SharedTranscript, Transcript, CONTEXT_WINDOW};
use crate::crisis::SafetyMonitor;
use crate::emotion::{classify, EmotionCategory};
use crate::responder::{ResponseGenerator, ResponseMode};
use crate::sync::lock;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("message is empty")]
    EmptyMessage,

    #[error("a reply is still being generated")]
    Busy,

    #[error("conversation was closed before the reply arrived")]
    Closed,
}

/// Clears the busy flag when a send finishes or its future is dropped
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

pub struct ConversationSession {
    id: String,
    created_at: DateTime<Utc>,
    last_activity: Mutex<DateTime<Utc>>,
    emotion: Mutex<Option<EmotionCategory>>,
    transcript: SharedTranscript,
    generator: Arc<ResponseGenerator>,
    monitor: SafetyMonitor,
    generating: AtomicBool,
    // bumped on close so in-flight replies can be discarded
    epoch: AtomicU64,
}

impl std::fmt::Debug for ConversationSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversationSession")
            .field("id", &self.id)
            .field("created_at", &self.created_at)
            .finish_non_exhaustive()
    }
}

impl ConversationSession {
    pub fn new(generator: Arc<ResponseGenerator>, monitor: SafetyMonitor) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: now,
            last_activity: Mutex::new(now),
            emotion: Mutex::new(None),
            transcript: Arc::new(Mutex::new(Transcript::new())),
            generator,
            monitor,
            generating: AtomicBool::new(false),
            epoch: AtomicU64::new(0),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn emotion(&self) -> Option<EmotionCategory> {
        *lock(&self.emotion)
    }

    /// Whether a reply is currently pending
    pub fn is_generating(&self) -> bool {
        self.generating.load(Ordering::SeqCst)
    }

    /// Check if the session has been idle longer than `timeout`
    pub fn is_expired(&self, timeout: ChronoDuration) -> bool {
        Utc::now() - *lock(&self.last_activity) > timeout
    }

    /// Start the dialog, appending the welcome message if the transcript is empty
    pub fn open(&self, emotion: Option<EmotionCategory>, context: Option<&str>) -> Option<ConversationMessage> {
        *lock(&self.emotion) = emotion;
        self.touch();

        let mut transcript = lock(&self.transcript);
        if !transcript.is_empty() {
            return None;
        }

        let welcome = ConversationMessage::assistant(welcome_message(emotion, context));
        transcript.push(welcome.clone());
        Some(welcome)
    }

    /// Send a user message and wait for the assistant reply
    ///
    /// Returns the appended assistant message. Generation failures are
    /// absorbed by the responder, so the only errors are input/state ones.
    pub async fn send(&self, text: &str) -> Result<ConversationMessage, SessionError> {
        // blank check only; the transcript keeps what the user typed
        if text.trim().is_empty() {
            return Err(SessionError::EmptyMessage);
        }

        if self
            .generating
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(SessionError::Busy);
        }
        let _busy = BusyGuard(&self.generating);

        self.touch();
        let epoch = self.epoch.load(Ordering::SeqCst);
        let user_message = ConversationMessage::user(text, self.emotion());

        let history = {
            let mut transcript = lock(&self.transcript);
            let history = transcript.recent(CONTEXT_WINDOW).to_vec();
            transcript.push(user_message.clone());
            history
        };

        // no earlier reply is in flight here; the claim above belongs to this send
        self.monitor.observe(&user_message, &self.transcript, false);

        let category = classify(text).unwrap_or(EmotionCategory::Calm);
        let context = format_context(&history, text);

        tracing::debug!(session = %self.id, emotion = %category, "Generating conversation reply");

        let reply = self
            .generator
            .generate(category, &context, ResponseMode::Conversation)
            .await;

        if self.epoch.load(Ordering::SeqCst) != epoch {
            tracing::debug!(session = %self.id, "Discarding reply for closed conversation");
            return Err(SessionError::Closed);
        }

        let assistant_message = ConversationMessage::assistant(reply.into_text());
        lock(&self.transcript).push(assistant_message.clone());
        self.touch();

        Ok(assistant_message)
    }

    /// Tear down: cancel any pending safety message and clear the transcript
    pub fn close(&self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        self.monitor.cancel();
        lock(&self.transcript).reset();
        *lock(&self.emotion) = None;
        tracing::debug!(session = %self.id, "Conversation closed");
    }

    /// Snapshot of the transcript
    pub fn messages(&self) -> Vec<ConversationMessage> {
        lock(&self.transcript).snapshot()
    }

    fn touch(&self) {
        *lock(&self.last_activity) = Utc::now();
    }
}
