// Integration tests for HTTP server

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use moodwall::comfort::{comfort_pool, ComfortBank};
use moodwall::config::ApiConfig;
use moodwall::crisis::{CrisisDetector, SUPPORT_MESSAGE};
use moodwall::emotion::EmotionCategory;
use moodwall::journal::{EntryStore, Journal, MemoryStore};
use moodwall::responder::ResponseGenerator;
use moodwall::server::{create_router, AppServer, ServerConfig, SessionManager};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

fn test_app(max_sessions: usize) -> Router {
    let generator = Arc::new(ResponseGenerator::new(
        None,
        ComfortBank::seeded(4).unwrap(),
        &ApiConfig::default(),
    ));
    let journal = Arc::new(Journal::new(
        EntryStore::new(Arc::new(MemoryStore::new())),
        Arc::clone(&generator),
    ));
    let sessions = SessionManager::new(
        max_sessions,
        30,
        Arc::clone(&generator),
        CrisisDetector::default(),
        Duration::from_millis(20),
    );
    let server_config = ServerConfig {
        bind_address: "127.0.0.1:0".to_string(), // Use port 0 for test
        max_sessions,
        session_timeout_minutes: 30,
    };

    create_router(Arc::new(AppServer::new(journal, generator, sessions, server_config)))
}

async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, value)
}

#[tokio::test]
async fn test_health() {
    let app = test_app(10);
    let (status, body) = call(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["provider_configured"], false);
}

#[tokio::test]
async fn test_classify() {
    let app = test_app(10);

    let (status, body) = call(&app, "POST", "/v1/classify", Some(json!({"text": "伤心又担心"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["emotion"], "sad");
    assert_eq!(body["scores"]["sad"], 1);
    assert_eq!(body["scores"]["anxious"], 1);

    let (_, body) = call(&app, "POST", "/v1/classify", Some(json!({"text": "hello"}))).await;
    assert!(body["emotion"].is_null());
}

#[tokio::test]
async fn test_entry_lifecycle() {
    let app = test_app(10);

    let (status, created) = call(
        &app,
        "POST",
        "/v1/entries",
        Some(json!({"text": "今天好累，想睡觉", "emotion": "calm"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["persisted"], true);
    assert_eq!(created["reply"]["source"], "fallback");
    let id = created["entry"]["id"].as_str().unwrap().to_string();

    call(&app, "POST", "/v1/entries", Some(json!({"text": "谢谢大家"}))).await;

    let (status, list) = call(&app, "GET", "/v1/entries", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 2);
    assert_eq!(list[0]["text"], "谢谢大家");

    let (_, filtered) = call(&app, "GET", "/v1/entries?emotion=grateful", None).await;
    assert_eq!(filtered.as_array().unwrap().len(), 1);

    let (status, _) = call(&app, "DELETE", &format!("/v1/entries/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, error) = call(&app, "DELETE", &format!("/v1/entries/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["error"]["type"], "not_found_error");

    let (status, _) = call(&app, "DELETE", "/v1/entries", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, list) = call(&app, "GET", "/v1/entries", None).await;
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_blank_entry_rejected() {
    let app = test_app(10);
    let (status, body) = call(&app, "POST", "/v1/entries", Some(json!({"text": "   "}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["type"], "invalid_request_error");
}

#[tokio::test]
async fn test_stats() {
    let app = test_app(10);
    call(&app, "POST", "/v1/entries", Some(json!({"text": "开心"}))).await;
    call(&app, "POST", "/v1/entries", Some(json!({"text": "哈哈"}))).await;

    let (status, stats) = call(&app, "GET", "/v1/stats?days=3", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["summary"]["total"], 2);
    assert_eq!(stats["summary"]["happy_count"], 2);
    assert_eq!(stats["distribution"]["happy"], 2);
    assert_eq!(stats["trend"].as_array().unwrap().len(), 3);

    let (status, _) = call(&app, "GET", "/v1/stats?days=5000", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_comfort() {
    let app = test_app(10);
    let (status, body) = call(&app, "POST", "/v1/comfort", Some(json!({"emotion": "tired"}))).await;

    assert_eq!(status, StatusCode::OK);
    let message = body["message"].as_str().unwrap();
    assert!(comfort_pool(EmotionCategory::Tired).contains(&message));
}

#[tokio::test]
async fn test_conversation_flow() {
    let app = test_app(10);

    let (status, created) = call(
        &app,
        "POST",
        "/v1/conversations",
        Some(json!({"emotion": "sad", "context": "失恋了"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_str().unwrap().to_string();
    assert!(created["messages"][0]["text"].as_str().unwrap().contains("悲伤"));

    let uri = format!("/v1/conversations/{}/messages", id);
    let (status, sent) = call(&app, "POST", &uri, Some(json!({"text": "我好孤独"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(sent["reply"]["role"], "assistant");
    assert_eq!(sent["conversation"]["messages"].as_array().unwrap().len(), 3);

    let (status, _) = call(&app, "POST", &uri, Some(json!({"text": " "}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // the delayed supportive message lands after the reply
    tokio::time::sleep(Duration::from_millis(100)).await;
    let (status, fetched) = call(&app, "GET", &format!("/v1/conversations/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    let texts: Vec<_> = fetched["messages"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["text"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(texts.len(), 4);
    assert_eq!(texts[3], SUPPORT_MESSAGE);

    let (status, _) = call(&app, "DELETE", &format!("/v1/conversations/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = call(&app, "GET", &format!("/v1/conversations/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_conversation_limit() {
    let app = test_app(1);
    let (status, _) = call(&app, "POST", "/v1/conversations", Some(json!({}))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = call(&app, "POST", "/v1/conversations", Some(json!({}))).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body["error"]["message"].as_str().unwrap().contains("Too many open conversations"));
}

#[tokio::test]
async fn test_unknown_conversation() {
    let app = test_app(10);
    let (status, _) = call(
        &app,
        "POST",
        "/v1/conversations/missing/messages",
        Some(json!({"text": "hi"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
