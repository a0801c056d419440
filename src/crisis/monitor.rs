// Conversational safety monitor
//
// Watches the latest user message for crisis terms and appends one fixed
// supportive assistant message after a delay. Advisory only: the user's own
// message is never touched.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::detector::CrisisDetector;
use crate::conversation::{ConversationMessage, Role, SharedTranscript};
use crate::sync::lock;

/// Supplementary message appended after a crisis term is seen
pub const SUPPORT_MESSAGE: &str = "我感受到你现在可能正在经历一些困难。记住，你并不孤单，我在这里陪伴你。\
如果你觉得情绪很难承受，也可以考虑联系专业的心理咨询师或拨打心理援助热线。";

pub const DEFAULT_SUPPORT_DELAY: Duration = Duration::from_secs(2);

struct PendingTimer {
    id: u64,
    token: CancellationToken,
}

/// Schedules delayed supportive messages for one conversation
///
/// At most one supportive message is pending at a time: qualifying messages
/// that arrive while a timer is running are coalesced into it.
pub struct SafetyMonitor {
    detector: CrisisDetector,
    delay: Duration,
    pending: Arc<Mutex<Option<PendingTimer>>>,
    next_id: AtomicU64,
}

impl SafetyMonitor {
    pub fn new(detector: CrisisDetector, delay: Duration) -> Self {
        Self {
            detector,
            delay,
            pending: Arc::new(Mutex::new(None)),
            next_id: AtomicU64::new(0),
        }
    }

    /// Whether a supportive message is scheduled but not yet appended
    pub fn is_pending(&self) -> bool {
        lock(&self.pending).is_some()
    }

    /// Inspect the latest message and schedule support if needed
    ///
    /// Schedules only for user messages containing a crisis term, when no
    /// reply is being generated and no supportive message is already pending.
    /// Returns the timer task when one was scheduled. Must be called from
    /// within a tokio runtime.
    pub fn observe(
        &self,
        latest: &ConversationMessage,
        transcript: &SharedTranscript,
        generating: bool,
    ) -> Option<JoinHandle<()>> {
        if latest.role != Role::User || generating {
            return None;
        }

        self.detector.detect(&latest.text)?;

        let mut pending = lock(&self.pending);
        if pending.is_some() {
            tracing::debug!("Supportive message already pending, coalescing");
            return None;
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let token = CancellationToken::new();
        *pending = Some(PendingTimer {
            id,
            token: token.clone(),
        });
        drop(pending);

        tracing::info!(delay_ms = self.delay.as_millis() as u64, "Scheduling supportive message");

        let delay = self.delay;
        let transcript = Arc::clone(transcript);
        let pending = Arc::clone(&self.pending);

        Some(tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    tracing::debug!("Supportive message cancelled");
                }
                _ = tokio::time::sleep(delay) => {
                    lock(&transcript).push(ConversationMessage::assistant(SUPPORT_MESSAGE));
                }
            }

            let mut pending = lock(&pending);
            if pending.as_ref().map(|timer| timer.id) == Some(id) {
                *pending = None;
            }
        }))
    }

    /// Cancel a pending supportive message (conversation teardown)
    pub fn cancel(&self) {
        if let Some(timer) = lock(&self.pending).take() {
            timer.token.cancel();
        }
    }
}

impl Drop for SafetyMonitor {
    fn drop(&mut self) {
        self.cancel();
    }
}
