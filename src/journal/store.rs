// Entry collection persisted under a single slot

use anyhow::{Context, Result};
use std::sync::Arc;

use super::kv::KeyValueStore;
use super::JournalEntry;

/// Storage slot holding the JSON array of entries
pub const ENTRY_SLOT: &str = "emotion_entries";

/// Newest-first entry list on top of a key-value store
///
/// Every mutation is read-modify-write of the whole collection with no
/// locking; concurrent writers race and the last write wins.
#[derive(Clone)]
pub struct EntryStore {
    kv: Arc<dyn KeyValueStore>,
}

impl EntryStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// All entries, newest first; a missing slot is an empty journal
    pub fn load(&self) -> Result<Vec<JournalEntry>> {
        let Some(raw) = self.kv.get(ENTRY_SLOT)? else {
            return Ok(Vec::new());
        };

        let mut entries: Vec<JournalEntry> =
            serde_json::from_str(&raw).context("Failed to parse stored entries")?;

        // stable: entries sharing a timestamp keep stored order
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(entries)
    }

    /// Prepend an entry and rewrite the collection
    pub fn save(&self, entry: &JournalEntry) -> Result<()> {
        let mut entries = self.load()?;
        entries.insert(0, entry.clone());
        self.write(&entries)
    }

    /// Remove an entry by id; returns whether it existed
    pub fn delete(&self, id: &str) -> Result<bool> {
        let mut entries = self.load()?;
        let before = entries.len();
        entries.retain(|entry| entry.id != id);

        if entries.len() == before {
            return Ok(false);
        }

        self.write(&entries)?;
        Ok(true)
    }

    /// Drop the whole collection
    pub fn clear(&self) -> Result<()> {
        self.kv.remove(ENTRY_SLOT)
    }

    fn write(&self, entries: &[JournalEntry]) -> Result<()> {
        let json = serde_json::to_string(entries).context("Failed to serialize entries")?;
        self.kv.set(ENTRY_SLOT, &json)
    }
}
