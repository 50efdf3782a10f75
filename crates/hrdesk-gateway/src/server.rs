// SPDX-FileCopyrightText: 2026 HR Desk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the chat surface.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    Router,
    extract::FromRef,
    routing::{get, post},
};
use axum_extra::extract::cookie::Key;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::info;

use hrdesk_config::model::ServerConfig;
use hrdesk_core::HrDeskError;
use hrdesk_rag::ResponseGenerator;
use hrdesk_storage::ChatHistoryStore;

use crate::handlers;
use crate::session;
use crate::ui::ChatPage;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct AppState {
    pub history: Arc<ChatHistoryStore>,
    pub generator: Arc<ResponseGenerator>,
    pub page: Arc<ChatPage>,
    pub cookie_name: String,
    /// Signs the session cookie.
    pub key: Key,
    /// Process start time for uptime calculation.
    pub started: Instant,
}

impl AppState {
    pub fn new(
        config: &ServerConfig,
        history: Arc<ChatHistoryStore>,
        generator: Arc<ResponseGenerator>,
    ) -> Result<Self, HrDeskError> {
        Ok(Self {
            history,
            generator,
            page: Arc::new(ChatPage::new()?),
            cookie_name: config.cookie_name.clone(),
            key: session::signing_key(config.secret_key.as_deref()),
            started: Instant::now(),
        })
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.key.clone()
    }
}

/// All routes with request tracing applied.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index).post(handlers::ask))
        .route("/history", get(handlers::history))
        .route("/clear-history", post(handlers::clear_history))
        .route("/delete-history-item", post(handlers::delete_history_item))
        .route("/get-response", post(handlers::get_response))
        .route("/health", get(handlers::health))
        .route("/static/chat.js", get(handlers::chat_script))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `host:port` and serve until `shutdown` is cancelled.
pub async fn start_server(
    config: &ServerConfig,
    state: AppState,
    shutdown: CancellationToken,
) -> Result<(), HrDeskError> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| HrDeskError::Internal(format!("failed to bind {addr}: {e}")))?;

    info!("HR Desk listening on http://{addr}");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(|e| HrDeskError::Internal(format!("server error: {e}")))?;

    info!("HTTP server stopped");
    Ok(())
}
