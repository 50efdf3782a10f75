// SPDX-FileCopyrightText: 2026 HR Desk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the chat surface.

use axum::{
    Form, Json,
    extract::State,
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
};
use axum_extra::extract::cookie::SignedCookieJar;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use hrdesk_core::CategorizedHistory;

use crate::server::AppState;
use crate::session;
use crate::ui::CHAT_SCRIPT;

/// Shown instead of raw error text when generation fails.
pub const GENERATION_FAILED: &str =
    "Sorry, something went wrong while generating an answer. Please try again.";

/// Form body for POST /.
#[derive(Debug, Deserialize)]
pub struct AskForm {
    #[serde(default)]
    pub query: String,
}

/// JSON body for POST /get-response.
#[derive(Debug, Deserialize)]
pub struct LookupRequest {
    #[serde(default)]
    pub query: String,
}

/// JSON body for POST /delete-history-item.
#[derive(Debug, Deserialize)]
pub struct DeleteRequest {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    pub response: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub history: CategorizedHistory,
}

/// `{"status":"success"}` or `{"status":"error","message":...}`.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl StatusResponse {
    fn success() -> Self {
        Self {
            status: "success",
            message: None,
        }
    }

    fn error(message: String) -> Self {
        Self {
            status: "error",
            message: Some(message),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_secs: u64,
}

/// GET /
pub async fn index(State(state): State<AppState>, jar: SignedCookieJar) -> Response {
    let (jar, session) = session::resolve(jar, &state.cookie_name);
    let messages = state.history.get_messages(&session).await.unwrap_or_else(|e| {
        warn!(session_id = %session, error = %e, "could not load history for page");
        Vec::new()
    });

    match state.page.render(&messages) {
        Ok(html) => (jar, Html(html)).into_response(),
        Err(e) => {
            error!(error = %e, "chat page render failed");
            (StatusCode::INTERNAL_SERVER_ERROR, jar, "internal error").into_response()
        }
    }
}

/// POST /
///
/// Answers the query and stores grounded answers in the session log.
pub async fn ask(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<AskForm>,
) -> Response {
    let (jar, session) = session::resolve(jar, &state.cookie_name);
    let query = form.query;

    let answer = match state.generator.generate(&query).await {
        Ok(answer) => answer,
        Err(e) => {
            error!(session_id = %session, error = %e, "answer generation failed");
            let body = AnswerResponse {
                response: Some(GENERATION_FAILED.to_string()),
            };
            return (StatusCode::INTERNAL_SERVER_ERROR, jar, Json(body)).into_response();
        }
    };

    if answer.is_grounded() {
        match state.history.append_pair(&session, &query, &answer.text).await {
            Ok(true) => info!(session_id = %session, "answer stored"),
            Ok(false) => {}
            Err(e) => warn!(session_id = %session, error = %e, "could not store answer"),
        }
    }

    let body = AnswerResponse {
        response: Some(answer.text),
    };
    (jar, Json(body)).into_response()
}

/// GET /history
pub async fn history(State(state): State<AppState>, jar: SignedCookieJar) -> Response {
    let (jar, session) = session::resolve(jar, &state.cookie_name);
    let history = state
        .history
        .get_categorized(&session)
        .await
        .unwrap_or_else(|e| {
            warn!(session_id = %session, error = %e, "history unavailable, returning empty");
            CategorizedHistory::default()
        });
    (jar, Json(HistoryResponse { history })).into_response()
}

/// POST /clear-history
pub async fn clear_history(State(state): State<AppState>, jar: SignedCookieJar) -> Response {
    let (jar, session) = session::resolve(jar, &state.cookie_name);
    let body = match state.history.clear(&session).await {
        Ok(()) => StatusResponse::success(),
        Err(e) => {
            warn!(session_id = %session, error = %e, "clear history failed");
            StatusResponse::error(e.to_string())
        }
    };
    (jar, Json(body)).into_response()
}

/// POST /delete-history-item
pub async fn delete_history_item(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Json(request): Json<DeleteRequest>,
) -> Response {
    let (jar, session) = session::resolve(jar, &state.cookie_name);
    let body = match state
        .history
        .delete_by_content(&session, &request.message)
        .await
    {
        Ok(removed) => {
            info!(session_id = %session, removed, "history item deleted");
            StatusResponse::success()
        }
        Err(e) => {
            warn!(session_id = %session, error = %e, "delete history item failed");
            StatusResponse::error(e.to_string())
        }
    };
    (jar, Json(body)).into_response()
}

/// POST /get-response
///
/// Looks up the stored answer to an earlier question without calling the model.
pub async fn get_response(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Json(request): Json<LookupRequest>,
) -> Response {
    let (jar, session) = session::resolve(jar, &state.cookie_name);
    let response = state
        .history
        .find_response(&session, &request.query)
        .await
        .unwrap_or_else(|e| {
            warn!(session_id = %session, error = %e, "stored answer lookup failed");
            None
        });
    (jar, Json(AnswerResponse { response })).into_response()
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        uptime_secs: state.started.elapsed().as_secs(),
    })
}

/// GET /static/chat.js
pub async fn chat_script() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        CHAT_SCRIPT,
    )
}
