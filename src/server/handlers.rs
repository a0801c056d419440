// HTTP request handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{delete, get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

use super::AppServer;
use crate::conversation::{ConversationMessage, SessionError};
use crate::emotion::{self, EmotionCategory};
use crate::journal::{emotion_counts, DayTrend, EmotionSummary, JournalEntry, JournalError, Submission};

const DEFAULT_TREND_DAYS: u32 = 7;
const MAX_TREND_DAYS: u32 = 366;

/// Create the main application router
pub fn create_router(server: Arc<AppServer>) -> Router {
    Router::new()
        .route("/v1/classify", post(classify_text))
        .route("/v1/entries", post(create_entry).get(list_entries).delete(clear_entries))
        .route("/v1/entries/:id", delete(delete_entry))
        .route("/v1/stats", get(get_stats))
        .route("/v1/comfort", post(get_comfort))
        .route("/v1/conversations", post(create_conversation))
        .route("/v1/conversations/:id", get(get_conversation).delete(delete_conversation))
        .route("/v1/conversations/:id/messages", post(send_message))
        .route("/health", get(health_check))
        .with_state(server)
}

#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    pub emotion: Option<EmotionCategory>,
    /// Non-zero keyword hits per category
    pub scores: BTreeMap<EmotionCategory, usize>,
}

/// Handle POST /v1/classify
async fn classify_text(Json(request): Json<ClassifyRequest>) -> Json<ClassifyResponse> {
    let score = emotion::score(&request.text);

    Json(ClassifyResponse {
        emotion: emotion::classify(&request.text),
        scores: score.nonzero().into_iter().collect(),
    })
}

#[derive(Debug, Deserialize)]
pub struct EntryRequest {
    pub text: String,
    /// Emotion picked by the user; keyword classification overrides it
    #[serde(default)]
    pub emotion: Option<EmotionCategory>,
}

/// Handle POST /v1/entries
async fn create_entry(
    State(server): State<Arc<AppServer>>,
    Json(request): Json<EntryRequest>,
) -> Result<(StatusCode, Json<Submission>), AppError> {
    let chosen = request.emotion.unwrap_or(EmotionCategory::Calm);
    let submission = server
        .journal()
        .submit(&request.text, chosen)
        .await
        .map_err(AppError::journal)?;

    Ok((StatusCode::CREATED, Json(submission)))
}

#[derive(Debug, Deserialize)]
pub struct EntryFilter {
    #[serde(default)]
    pub emotion: Option<EmotionCategory>,
}

/// Handle GET /v1/entries
async fn list_entries(
    State(server): State<Arc<AppServer>>,
    Query(filter): Query<EntryFilter>,
) -> Json<Vec<JournalEntry>> {
    Json(server.journal().entries(filter.emotion))
}

/// Handle DELETE /v1/entries/:id
async fn delete_entry(
    State(server): State<Arc<AppServer>>,
    Path(entry_id): Path<String>,
) -> Result<StatusCode, AppError> {
    server.journal().delete(&entry_id).map_err(AppError::journal)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handle DELETE /v1/entries
async fn clear_entries(State(server): State<Arc<AppServer>>) -> StatusCode {
    server.journal().clear();
    StatusCode::NO_CONTENT
}

#[derive(Debug, Deserialize)]
pub struct StatsQuery {
    #[serde(default)]
    pub days: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub summary: EmotionSummary,
    pub distribution: BTreeMap<EmotionCategory, usize>,
    pub trend: Vec<DayTrend>,
}

/// Handle GET /v1/stats
async fn get_stats(
    State(server): State<Arc<AppServer>>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<StatsResponse>, AppError> {
    let days = query.days.unwrap_or(DEFAULT_TREND_DAYS);
    if days > MAX_TREND_DAYS {
        return Err(AppError::bad_request(format!(
            "days must be at most {}",
            MAX_TREND_DAYS
        )));
    }

    let entries = server.journal().entries(None);
    let today = chrono::Utc::now().date_naive();

    Ok(Json(StatsResponse {
        summary: EmotionSummary::from_entries(&entries),
        distribution: emotion_counts(&entries),
        trend: crate::journal::daily_trend(&entries, today, days),
    }))
}

#[derive(Debug, Deserialize)]
pub struct ComfortRequest {
    pub emotion: EmotionCategory,
}

#[derive(Debug, Serialize)]
pub struct ComfortResponse {
    pub emotion: EmotionCategory,
    pub message: String,
}

/// Handle POST /v1/comfort
async fn get_comfort(
    State(server): State<Arc<AppServer>>,
    Json(request): Json<ComfortRequest>,
) -> Json<ComfortResponse> {
    let message = server.generator().bank().pick_comfort_message(request.emotion);

    Json(ComfortResponse {
        emotion: request.emotion,
        message: message.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
pub struct ConversationRequest {
    #[serde(default)]
    pub emotion: Option<EmotionCategory>,
    #[serde(default)]
    pub context: Option<String>,
}

/// Conversation state returned to clients
#[derive(Debug, Serialize)]
pub struct ConversationInfo {
    pub id: String,
    pub created_at: String,
    pub generating: bool,
    pub messages: Vec<ConversationMessage>,
}

/// Handle POST /v1/conversations
async fn create_conversation(
    State(server): State<Arc<AppServer>>,
    Json(request): Json<ConversationRequest>,
) -> Result<(StatusCode, Json<ConversationInfo>), AppError> {
    let session = server
        .session_manager()
        .create(request.emotion, request.context.as_deref())
        .map_err(AppError::unavailable)?;

    Ok((StatusCode::CREATED, Json(conversation_info(&session))))
}

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct SendMessageResponse {
    pub reply: ConversationMessage,
    pub conversation: ConversationInfo,
}

/// Handle POST /v1/conversations/:id/messages
async fn send_message(
    State(server): State<Arc<AppServer>>,
    Path(session_id): Path<String>,
    Json(request): Json<SendMessageRequest>,
) -> Result<Json<SendMessageResponse>, AppError> {
    let session = server
        .session_manager()
        .get(&session_id)
        .ok_or_else(|| AppError::not_found(format!("Conversation not found: {}", session_id)))?;

    let reply = session.send(&request.text).await.map_err(AppError::session)?;

    Ok(Json(SendMessageResponse {
        reply,
        conversation: conversation_info(&session),
    }))
}

/// Handle GET /v1/conversations/:id
async fn get_conversation(
    State(server): State<Arc<AppServer>>,
    Path(session_id): Path<String>,
) -> Result<Json<ConversationInfo>, AppError> {
    let session = server
        .session_manager()
        .get(&session_id)
        .ok_or_else(|| AppError::not_found(format!("Conversation not found: {}", session_id)))?;

    Ok(Json(conversation_info(&session)))
}

/// Handle DELETE /v1/conversations/:id
async fn delete_conversation(
    State(server): State<Arc<AppServer>>,
    Path(session_id): Path<String>,
) -> Result<StatusCode, AppError> {
    if server.session_manager().delete(&session_id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found(format!("Conversation not found: {}", session_id)))
    }
}

fn conversation_info(session: &crate::conversation::ConversationSession) -> ConversationInfo {
    ConversationInfo {
        id: session.id().to_string(),
        created_at: session.created_at().to_rfc3339(),
        generating: session.is_generating(),
        messages: session.messages(),
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub uptime_seconds: u64,
    pub active_sessions: usize,
    pub provider_configured: bool,
}

/// Handle GET /health - Health check endpoint
pub async fn health_check(State(server): State<Arc<AppServer>>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy".to_string(),
        uptime_seconds: server.uptime().as_secs(),
        active_sessions: server.session_manager().active_count(),
        provider_configured: server.generator().has_provider(),
    })
}

/// Application error wrapper for proper HTTP error responses
pub struct AppError {
    status: StatusCode,
    kind: &'static str,
    error: anyhow::Error,
}

impl AppError {
    fn new(status: StatusCode, kind: &'static str, error: impl Into<anyhow::Error>) -> Self {
        Self {
            status,
            kind,
            error: error.into(),
        }
    }

    pub fn bad_request(message: String) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "invalid_request_error", anyhow::anyhow!(message))
    }

    pub fn not_found(message: String) -> Self {
        Self::new(StatusCode::NOT_FOUND, "not_found_error", anyhow::anyhow!(message))
    }

    fn unavailable(error: anyhow::Error) -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, "overloaded_error", error)
    }

    fn journal(error: JournalError) -> Self {
        match error {
            JournalError::EmptyText => Self::new(StatusCode::BAD_REQUEST, "invalid_request_error", error),
            JournalError::Busy => Self::new(StatusCode::CONFLICT, "conflict_error", error),
            JournalError::NotFound(_) => Self::new(StatusCode::NOT_FOUND, "not_found_error", error),
        }
    }

    fn session(error: SessionError) -> Self {
        match error {
            SessionError::EmptyMessage => Self::new(StatusCode::BAD_REQUEST, "invalid_request_error", error),
            SessionError::Busy | SessionError::Closed => Self::new(StatusCode::CONFLICT, "conflict_error", error),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(error = %self.error, "Request failed");
        } else {
            tracing::debug!(status = %self.status, error = %self.error, "Request rejected");
        }

        let body = serde_json::json!({
            "error": {
                "message": self.error.to_string(),
                "type": self.kind
            }
        });

        (self.status, Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "api_error", err)
    }
}
