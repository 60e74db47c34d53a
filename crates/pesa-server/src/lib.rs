//! Pesa Web Server
//!
//! Axum-based HTTP surface for the pesa spending tracker:
//! - `/health` liveness probe with uptime and chat transport status
//! - `/api/messages` webhook: the chat transport adapter forwards each
//!   inbound message and posts back the returned reply
//! - `/api/summary` read-only spending summaries
//! - Sanitized error responses

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use pesa_core::{Bot, BotConfig, Database};

mod handlers;

/// Maximum number of transactions a category report may list
pub const MAX_PAGE_LIMIT: usize = 1000;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bot: BotConfig,
    /// Initial chat transport status reported by `/health`
    pub transport_connected: bool,
}

/// Process liveness and chat transport status
pub struct Health {
    started: Instant,
    transport_connected: AtomicBool,
}

impl Health {
    pub fn new(transport_connected: bool) -> Self {
        Self {
            started: Instant::now(),
            transport_connected: AtomicBool::new(transport_connected),
        }
    }

    pub fn uptime(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn transport_connected(&self) -> bool {
        self.transport_connected.load(Ordering::Relaxed)
    }

    pub fn set_transport_connected(&self, connected: bool) {
        let was = self.transport_connected.swap(connected, Ordering::Relaxed);
        if was != connected {
            if connected {
                info!("Chat transport connected");
            } else {
                warn!("Chat transport disconnected");
            }
        }
    }
}

/// Shared application state
pub struct AppState {
    pub db: Database,
    pub bot: Bot<Database>,
    pub health: Health,
}

/// Create the application router
pub fn create_router(db: Database, config: ServerConfig) -> Router {
    let state = Arc::new(AppState {
        bot: Bot::new(config.bot, db.clone()),
        db,
        health: Health::new(config.transport_connected),
    });

    let api_routes = Router::new()
        // Chat transport
        .route("/messages", post(handlers::post_message))
        .route("/transport", post(handlers::set_transport_status))
        // Summaries
        .route("/summary", get(handlers::get_summary))
        .route("/summary/:category", get(handlers::get_category_summary));

    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api", api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Start the server
pub async fn serve(db: Database, host: &str, port: u16, config: ServerConfig) -> anyhow::Result<()> {
    info!(
        channel_id = %config.bot.channel_id,
        categories = %config.bot.categories,
        "Listening for chat messages"
    );
    if config.bot.bot_user_id.is_none() {
        warn!("PESA_BOT_USER_ID not set - the bot cannot recognize its own messages");
    }

    let app = create_router(db, config);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Return generic message to client
            message: "An internal error occurred".to_string(),
            // Keep full error for logging
            internal: Some(err),
        }
    }
}
