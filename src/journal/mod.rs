// Mood journal: entries, persistence and the submission pipeline

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use uuid::Uuid;

use crate::emotion::{classify, EmotionCategory};
use crate::responder::{Reply, ResponseGenerator, ResponseMode};
use crate::sync::lock;

pub mod events;
pub mod kv;
pub mod stats;
pub mod store;

pub use events::EntryEvents;
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use stats::{daily_trend, emotion_counts, filter_by_emotion, group_by_date, DayTrend, EmotionSummary};
pub use store::{EntryStore, ENTRY_SLOT};

/// One recorded mood entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: String,
    pub text: String,
    pub emotion: EmotionCategory,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_response: Option<String>,
}

impl JournalEntry {
    pub fn new(text: impl Into<String>, emotion: EmotionCategory, ai_response: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            emotion,
            created_at: Utc::now(),
            ai_response,
        }
    }

    /// UTC calendar day of the entry
    pub fn date(&self) -> NaiveDate {
        self.created_at.date_naive()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum JournalError {
    #[error("entry text is empty")]
    EmptyText,

    #[error("the same entry is already being submitted")]
    Busy,

    #[error("no entry with id {0}")]
    NotFound(String),
}

/// Result of recording an entry
#[derive(Debug, Clone, Serialize)]
pub struct Submission {
    pub entry: JournalEntry,
    pub reply: Reply,
    /// False when the store write failed; the entry is still valid for display
    pub persisted: bool,
}

/// Releases a claimed entry text when its submission finishes or is dropped
struct SubmitGuard<'a> {
    in_flight: &'a Mutex<HashSet<String>>,
    text: String,
}

impl<'a> SubmitGuard<'a> {
    fn claim(in_flight: &'a Mutex<HashSet<String>>, text: &str) -> Option<Self> {
        if !lock(in_flight).insert(text.to_string()) {
            return None;
        }
        Some(Self {
            in_flight,
            text: text.to_string(),
        })
    }
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        lock(self.in_flight).remove(&self.text);
    }
}

/// Submission pipeline and journal queries
pub struct Journal {
    store: EntryStore,
    generator: Arc<ResponseGenerator>,
    events: EntryEvents,
    // texts with a submission still waiting on its reply
    in_flight: Mutex<HashSet<String>>,
    // the store rewrites the whole slot, so writers take turns
    writes: Mutex<()>,
}

impl Journal {
    pub fn new(store: EntryStore, generator: Arc<ResponseGenerator>) -> Self {
        Self {
            store,
            generator,
            events: EntryEvents::new(),
            in_flight: Mutex::new(HashSet::new()),
            writes: Mutex::new(()),
        }
    }

    pub fn events(&self) -> &EntryEvents {
        &self.events
    }

    pub fn generator(&self) -> &Arc<ResponseGenerator> {
        &self.generator
    }

    /// Record an entry: classify, generate a reply, persist, signal
    ///
    /// The keyword classification wins over `chosen` when it finds a match.
    /// A second submission of the same text while the first is still
    /// generating is rejected as `Busy`; different texts run side by side.
    pub async fn submit(&self, text: &str, chosen: EmotionCategory) -> Result<Submission, JournalError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(JournalError::EmptyText);
        }

        let Some(_guard) = SubmitGuard::claim(&self.in_flight, text) else {
            return Err(JournalError::Busy);
        };

        let emotion = classify(text).unwrap_or(chosen);
        tracing::debug!(chosen = %chosen, resolved = %emotion, "Recording entry");

        let reply = self.generator.generate(emotion, text, ResponseMode::SingleShot).await;
        let entry = JournalEntry::new(text, emotion, Some(reply.text().to_string()));

        let saved = {
            let _writing = lock(&self.writes);
            self.store.save(&entry)
        };
        let persisted = match saved {
            Ok(()) => {
                self.events.notify();
                true
            }
            Err(e) => {
                tracing::error!("Failed to save entry {}: {:#}", entry.id, e);
                false
            }
        };

        Ok(Submission { entry, reply, persisted })
    }

    /// Entries newest-first, optionally filtered; read failures yield nothing
    pub fn entries(&self, filter: Option<EmotionCategory>) -> Vec<JournalEntry> {
        match self.store.load() {
            Ok(entries) => filter_by_emotion(&entries, filter),
            Err(e) => {
                tracing::error!("Failed to load entries: {:#}", e);
                Vec::new()
            }
        }
    }

    /// Delete one entry
    ///
    /// A write failure is logged and treated as done; the entry may reappear
    /// on the next read.
    pub fn delete(&self, id: &str) -> Result<(), JournalError> {
        let deleted = {
            let _writing = lock(&self.writes);
            self.store.delete(id)
        };
        match deleted {
            Ok(true) => {
                self.events.notify();
                Ok(())
            }
            Ok(false) => Err(JournalError::NotFound(id.to_string())),
            Err(e) => {
                tracing::error!("Failed to delete entry {}: {:#}", id, e);
                Ok(())
            }
        }
    }

    /// Remove every entry
    pub fn clear(&self) {
        let cleared = {
            let _writing = lock(&self.writes);
            self.store.clear()
        };
        match cleared {
            Ok(()) => self.events.notify(),
            Err(e) => tracing::error!("Failed to clear entries: {:#}", e),
        }
    }

    pub fn summary(&self) -> EmotionSummary {
        EmotionSummary::from_entries(&self.entries(None))
    }

    /// Per-day totals for the last `days` days including today (UTC)
    pub fn trend(&self, days: u32) -> Vec<DayTrend> {
        daily_trend(&self.entries(None), Utc::now().date_naive(), days)
    }
}
