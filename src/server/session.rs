// Open conversations shared across HTTP requests

use chrono::Duration as ChronoDuration;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time;

use crate::conversation::ConversationSession;
use crate::crisis::{CrisisDetector, SafetyMonitor};
use crate::emotion::EmotionCategory;
use crate::responder::ResponseGenerator;

const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

type Conversations = DashMap<String, Arc<ConversationSession>>;

/// Registry of open conversations keyed by session id
///
/// Each conversation gets its own safety monitor built from the shared
/// detector. Removing a conversation closes it, which cancels any pending
/// supportive message.
pub struct SessionManager {
    sessions: Arc<Conversations>,
    max_sessions: usize,
    generator: Arc<ResponseGenerator>,
    detector: CrisisDetector,
    support_delay: Duration,
    sweeper: JoinHandle<()>,
}

impl SessionManager {
    /// Must be called from within a tokio runtime (spawns the idle sweeper)
    pub fn new(
        max_sessions: usize,
        timeout_minutes: u64,
        generator: Arc<ResponseGenerator>,
        detector: CrisisDetector,
        support_delay: Duration,
    ) -> Self {
        let sessions = Arc::new(DashMap::new());
        let idle_timeout = ChronoDuration::minutes(timeout_minutes as i64);
        let sweeper = spawn_sweeper(Arc::clone(&sessions), idle_timeout);

        Self {
            sessions,
            max_sessions,
            generator,
            detector,
            support_delay,
            sweeper,
        }
    }

    /// Open a conversation with its welcome message
    pub fn create(
        &self,
        emotion: Option<EmotionCategory>,
        context: Option<&str>,
    ) -> anyhow::Result<Arc<ConversationSession>> {
        let open = self.sessions.len();
        if open >= self.max_sessions {
            anyhow::bail!("Too many open conversations ({} of {})", open, self.max_sessions);
        }

        let monitor = SafetyMonitor::new(self.detector.clone(), self.support_delay);
        let session = Arc::new(ConversationSession::new(Arc::clone(&self.generator), monitor));
        session.open(emotion, context);

        self.sessions.insert(session.id().to_string(), Arc::clone(&session));
        tracing::info!(
            session_id = %session.id(),
            emotion = ?emotion,
            "Conversation opened"
        );

        Ok(session)
    }

    pub fn get(&self, session_id: &str) -> Option<Arc<ConversationSession>> {
        self.sessions.get(session_id).map(|entry| Arc::clone(entry.value()))
    }

    /// Close and forget a conversation; false when the id is unknown
    pub fn delete(&self, session_id: &str) -> bool {
        let Some((_, session)) = self.sessions.remove(session_id) else {
            return false;
        };

        session.close();
        tracing::info!(session_id = %session_id, "Conversation closed");
        true
    }

    pub fn active_count(&self) -> usize {
        self.sessions.len()
    }
}

impl Drop for SessionManager {
    fn drop(&mut self) {
        self.sweeper.abort();
    }
}

fn spawn_sweeper(sessions: Arc<Conversations>, idle_timeout: ChronoDuration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = time::interval(SWEEP_INTERVAL);
        loop {
            ticker.tick().await;
            sweep_idle(&sessions, idle_timeout);
        }
    })
}

/// Close conversations idle longer than `idle_timeout`
///
/// A conversation waiting on a reply is never swept.
fn sweep_idle(sessions: &Conversations, idle_timeout: ChronoDuration) -> usize {
    let idle: Vec<String> = sessions
        .iter()
        .filter(|entry| {
            let session = entry.value();
            !session.is_generating() && session.is_expired(idle_timeout)
        })
        .map(|entry| entry.key().clone())
        .collect();

    let mut swept = 0;
    for id in idle {
        if let Some((_, session)) = sessions.remove(&id) {
            session.close();
            swept += 1;
        }
    }

    if swept > 0 {
        tracing::info!(swept, remaining = sessions.len(), "Idle conversations closed");
    }

    swept
}
