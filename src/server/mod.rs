// Moodwall - local HTTP server
// Journal, comfort and conversation endpoints over shared state

mod handlers;
mod session;

pub use handlers::{create_router, health_check, AppError};
pub use session::SessionManager;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::{Config, ServerSettings};
use crate::crisis::CrisisDetector;
use crate::errors::{UserFriendlyError, TERMS_FILE_SUGGESTION};
use crate::journal::{EntryStore, FileStore, Journal};
use crate::responder::ResponseGenerator;

/// Configuration for the HTTP server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:8787")
    pub bind_address: String,
    /// Maximum number of concurrent conversations
    pub max_sessions: usize,
    /// Conversation idle timeout in minutes
    pub session_timeout_minutes: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::from(&ServerSettings::default())
    }
}

impl From<&ServerSettings> for ServerConfig {
    fn from(settings: &ServerSettings) -> Self {
        Self {
            bind_address: settings.bind_address.clone(),
            max_sessions: settings.max_sessions,
            session_timeout_minutes: settings.session_timeout_minutes,
        }
    }
}

/// Shared application state
pub struct AppServer {
    journal: Arc<Journal>,
    generator: Arc<ResponseGenerator>,
    session_manager: Arc<SessionManager>,
    config: ServerConfig,
    started_at: Instant,
}

impl AppServer {
    /// Build the server from application configuration
    ///
    /// Must be called from within a tokio runtime.
    pub fn from_config(config: &Config) -> Result<Self> {
        let generator = Arc::new(ResponseGenerator::from_config(&config.api)?);
        let detector = CrisisDetector::from_config(&config.safety)
            .user_context_with_suggestion("Could not load crisis terms", TERMS_FILE_SUGGESTION)?;
        tracing::debug!(terms = detector.terms().len(), "Crisis terms loaded");
        let store = EntryStore::new(Arc::new(FileStore::new(&config.storage.data_dir)));
        let journal = Arc::new(Journal::new(store, Arc::clone(&generator)));

        let server_config = ServerConfig::from(&config.server);
        let session_manager = SessionManager::new(
            server_config.max_sessions,
            server_config.session_timeout_minutes,
            Arc::clone(&generator),
            detector,
            Duration::from_millis(config.safety.delay_ms),
        );

        Ok(Self::new(journal, generator, session_manager, server_config))
    }

    pub fn new(
        journal: Arc<Journal>,
        generator: Arc<ResponseGenerator>,
        session_manager: SessionManager,
        config: ServerConfig,
    ) -> Self {
        Self {
            journal,
            generator,
            session_manager: Arc::new(session_manager),
            config,
            started_at: Instant::now(),
        }
    }

    /// Start the HTTP server
    pub async fn serve(self) -> Result<()> {
        let addr: SocketAddr = self
            .config
            .bind_address
            .parse()
            .with_context(|| format!("Invalid bind address: {}", self.config.bind_address))?;

        let app_state = Arc::new(self);

        let app = create_router(app_state).layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        );

        tracing::info!("Starting moodwall server on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        axum::serve(listener, app).await?;

        Ok(())
    }

    pub fn journal(&self) -> &Arc<Journal> {
        &self.journal
    }

    pub fn generator(&self) -> &Arc<ResponseGenerator> {
        &self.generator
    }

    pub fn session_manager(&self) -> &Arc<SessionManager> {
        &self.session_manager
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }
}
