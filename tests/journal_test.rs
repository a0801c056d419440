// Integration tests for the journal pipeline and entry persistence

use anyhow::Result;
use chrono::{Duration, Utc};
use moodwall::comfort::{comfort_pool, ComfortBank};
use moodwall::config::ApiConfig;
use moodwall::emotion::EmotionCategory;
use moodwall::journal::{EntryStore, FileStore, Journal, JournalEntry, JournalError, KeyValueStore, MemoryStore};
use moodwall::responder::ResponseGenerator;
use moodwall::providers::{create_provider, LlmProvider, ProviderRequest, ProviderResponse};
use std::sync::Arc;
use tokio::sync::Notify;

// Store whose writes always fail
struct ReadOnlyStore;

impl KeyValueStore for ReadOnlyStore {
    fn get(&self, _key: &str) -> Result<Option<String>> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<()> {
        anyhow::bail!("disk full")
    }

    fn remove(&self, _key: &str) -> Result<()> {
        anyhow::bail!("disk full")
    }
}

// Provider that answers only when released
struct GatedProvider {
    gate: Arc<Notify>,
    started: Arc<Notify>,
}

#[async_trait::async_trait]
impl LlmProvider for GatedProvider {
    async fn send_message(&self, request: &ProviderRequest) -> Result<ProviderResponse> {
        self.started.notify_one();
        self.gate.notified().await;
        Ok(ProviderResponse {
            content: "ok".to_string(),
            model: Some(request.model.clone()),
            provider: "gated".to_string(),
        })
    }

    fn name(&self) -> &str {
        "gated"
    }

    fn default_model(&self) -> &str {
        "gated-model"
    }
}

fn offline_generator() -> Arc<ResponseGenerator> {
    Arc::new(ResponseGenerator::new(None, ComfortBank::seeded(7).unwrap(), &ApiConfig::default()))
}

#[tokio::test]
async fn test_sad_entry_with_failing_api_persists_fallback() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(500)
        .create_async()
        .await;

    let api = ApiConfig {
        api_key: Some("test-key".to_string()),
        base_url: server.url(),
        ..ApiConfig::default()
    };
    let generator = ResponseGenerator::new(create_provider(&api).unwrap(), ComfortBank::seeded(1).unwrap(), &api);

    let dir = tempfile::tempdir().unwrap();
    let store = EntryStore::new(Arc::new(FileStore::new(dir.path())));
    let journal = Journal::new(store.clone(), Arc::new(generator));

    let submission = journal
        .submit("考试失利，伤心又难过", EmotionCategory::Calm)
        .await
        .unwrap();

    assert_eq!(submission.entry.emotion, EmotionCategory::Sad);
    assert!(submission.reply.is_fallback());
    assert!(submission.persisted);

    let stored = store.load().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].emotion, EmotionCategory::Sad);

    let response = stored[0].ai_response.as_deref().unwrap();
    assert!(comfort_pool(EmotionCategory::Sad).contains(&response));
}

#[tokio::test]
async fn test_persist_failure_still_returns_entry() {
    let journal = Journal::new(EntryStore::new(Arc::new(ReadOnlyStore)), offline_generator());
    let mut rx = journal.events().subscribe();

    let submission = journal.submit("谢谢你", EmotionCategory::Calm).await.unwrap();

    assert!(!submission.persisted);
    assert_eq!(submission.entry.emotion, EmotionCategory::Grateful);
    assert!(submission.entry.ai_response.is_some());
    // no signal without a successful write
    assert!(rx.try_recv().is_err());

    // clear failure is absorbed
    journal.clear();
}

#[tokio::test]
async fn test_duplicate_submit_is_busy() {
    let gate = Arc::new(Notify::new());
    let provider = GatedProvider {
        gate: Arc::clone(&gate),
        started: Arc::new(Notify::new()),
    };
    let started = Arc::clone(&provider.started);

    let generator = ResponseGenerator::new(
        Some(Box::new(provider)),
        ComfortBank::seeded(1).unwrap(),
        &ApiConfig::default(),
    );
    let journal = Arc::new(Journal::new(
        EntryStore::new(Arc::new(MemoryStore::new())),
        Arc::new(generator),
    ));

    let first = {
        let journal = Arc::clone(&journal);
        tokio::spawn(async move { journal.submit("开心", EmotionCategory::Happy).await })
    };
    started.notified().await;

    // the same text again is a double submit
    assert_eq!(
        journal.submit(" 开心 ", EmotionCategory::Happy).await.unwrap_err(),
        JournalError::Busy
    );

    // another entry goes ahead while the first is still waiting
    let second = {
        let journal = Arc::clone(&journal);
        tokio::spawn(async move { journal.submit("今天也开心", EmotionCategory::Happy).await })
    };
    started.notified().await;

    gate.notify_waiters();
    let first = first.await.unwrap().unwrap();
    let second = second.await.unwrap().unwrap();
    assert_eq!(first.reply.text(), "ok");
    assert!(first.persisted && second.persisted);
    assert_eq!(journal.entries(None).len(), 2);

    // the text is released once its submission completes
    gate.notify_one();
    assert!(journal.submit("开心", EmotionCategory::Happy).await.is_ok());
    assert_eq!(journal.entries(None).len(), 3);
}

#[test]
fn test_store_roundtrip_keeps_order_and_timestamps() {
    let dir = tempfile::tempdir().unwrap();
    let store = EntryStore::new(Arc::new(FileStore::new(dir.path())));

    let base = Utc::now() - Duration::days(3);
    let emotions = EmotionCategory::ALL;
    let mut saved = Vec::new();

    for (i, emotion) in emotions.iter().enumerate() {
        let mut entry = JournalEntry::new(format!("entry {}", i), *emotion, Some(format!("reply {}", i)));
        entry.created_at = base + Duration::minutes(i as i64 * 37) + Duration::nanoseconds(123_456_789);
        store.save(&entry).unwrap();
        saved.push(entry);
    }

    let loaded = store.load().unwrap();
    assert_eq!(loaded.len(), saved.len());

    saved.reverse();
    for (loaded, saved) in loaded.iter().zip(&saved) {
        assert_eq!(loaded.id, saved.id);
        assert_eq!(loaded.created_at, saved.created_at);
        assert_eq!(loaded, saved);
    }
}

#[tokio::test]
async fn test_entries_filter_and_summary() {
    let journal = Journal::new(EntryStore::new(Arc::new(MemoryStore::new())), offline_generator());

    for text in ["开心的一天", "哈哈哈", "压力很大", "感谢朋友"] {
        journal.submit(text, EmotionCategory::Calm).await.unwrap();
    }

    let happy = journal.entries(Some(EmotionCategory::Happy));
    assert_eq!(happy.len(), 2);
    assert_eq!(happy[0].text, "哈哈哈");

    let summary = journal.summary();
    assert_eq!(summary.total, 4);
    assert_eq!(summary.distinct_emotions, 3);
    assert_eq!(summary.happy_count, 2);
    assert_eq!(summary.active_days, 1);

    let trend = journal.trend(7);
    assert_eq!(trend.last().map(|d| d.total), Some(4));
}
