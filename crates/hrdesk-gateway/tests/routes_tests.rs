// SPDX-FileCopyrightText: 2026 HR Desk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Route-level tests driven through `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use hrdesk_config::model::ServerConfig;
use hrdesk_core::RetrieverAdapter;
use hrdesk_gateway::{AppState, GENERATION_FAILED, router};
use hrdesk_rag::{OUT_OF_DOMAIN, ResponseGenerator};
use hrdesk_storage::ChatHistoryStore;
use hrdesk_test_utils::{InMemoryMessageLog, MockProvider, MockRetriever};

struct TestApp {
    app: Router,
    log: Arc<InMemoryMessageLog>,
    provider: MockProvider,
}

fn test_app(retriever: MockRetriever, provider: MockProvider) -> TestApp {
    let log = InMemoryMessageLog::new();
    let history = Arc::new(ChatHistoryStore::new(log.clone(), "message_store:"));
    let generator = Arc::new(ResponseGenerator::new(
        Some(Arc::new(retriever) as Arc<dyn RetrieverAdapter>),
        Arc::new(provider.clone()),
        "llama3.2:latest",
        2,
    ));
    let config = ServerConfig {
        secret_key: Some("test-secret".into()),
        ..ServerConfig::default()
    };
    let state = AppState::new(&config, history, generator).unwrap();
    TestApp {
        app: router(state),
        log,
        provider,
    }
}

fn policy_app() -> TestApp {
    test_app(
        MockRetriever::with_passages(["Employees receive 20 days of annual leave."]),
        MockProvider::with_responses(["<think>x</think>You get 20 days."]),
    )
}

struct Reply {
    status: StatusCode,
    cookie: Option<String>,
    content_type: Option<String>,
    body: Vec<u8>,
}

impl Reply {
    fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }

    fn text(&self) -> String {
        String::from_utf8(self.body.clone()).unwrap()
    }
}

async fn send(app: &Router, request: Request<Body>) -> Reply {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(str::to_string);
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec();
    Reply {
        status,
        cookie,
        content_type,
        body,
    }
}

fn ask(query: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::post("/").header(
        header::CONTENT_TYPE,
        "application/x-www-form-urlencoded",
    );
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let body = format!("query={}", query.replace(' ', "+"));
    builder.body(Body::from(body)).unwrap()
}

fn post_json(uri: &str, body: Value, cookie: &str) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::COOKIE, cookie)
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::get(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

/// Ask one question and return the session cookie it created.
async fn start_session(app: &Router, query: &str) -> String {
    let reply = send(app, ask(query, None)).await;
    assert_eq!(reply.status, StatusCode::OK);
    reply.cookie.expect("new session sets a cookie")
}

#[tokio::test]
async fn ask_returns_answer_and_stores_pair() {
    let t = policy_app();
    let reply = send(&t.app, ask("How much leave?", None)).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.json(), json!({"response": "You get 20 days."}));
    let cookie = reply.cookie.unwrap();
    assert!(cookie.starts_with("hrdesk_session="));

    let history = send(&t.app, get("/history", Some(&cookie))).await.json();
    assert_eq!(
        history["history"]["Today"],
        json!([
            {"type": "User", "message": "How much leave?"},
            {"type": "Bot", "message": "You get 20 days."},
        ])
    );
    assert_eq!(history["history"]["Yesterday"], json!([]));
    assert_eq!(history["history"]["Older"], json!([]));
}

#[tokio::test]
async fn repeated_question_is_answered_but_stored_once() {
    let t = policy_app();
    let cookie = start_session(&t.app, "How much leave?").await;
    t.provider.add_response("Still 20 days.").await;

    let reply = send(&t.app, ask("  how much LEAVE? ", Some(&cookie))).await;
    assert_eq!(reply.json()["response"], "Still 20 days.");

    let history = send(&t.app, get("/history", Some(&cookie))).await.json();
    assert_eq!(history["history"]["Today"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn out_of_domain_answer_is_not_stored() {
    let t = test_app(MockRetriever::empty(), MockProvider::new());
    let reply = send(&t.app, ask("What is the weather?", None)).await;
    assert_eq!(reply.json()["response"], OUT_OF_DOMAIN);
    assert_eq!(t.provider.call_count().await, 0);

    let cookie = reply.cookie.unwrap();
    let history = send(&t.app, get("/history", Some(&cookie))).await.json();
    assert_eq!(history["history"]["Today"], json!([]));
}

#[tokio::test]
async fn generation_failure_returns_500_with_apology() {
    let provider = MockProvider::new();
    provider.add_failure("model offline").await;
    provider.add_failure("model offline").await;
    let t = test_app(MockRetriever::with_passages(["policy"]), provider);

    let reply = send(&t.app, ask("leave?", None)).await;
    assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(reply.json(), json!({"response": GENERATION_FAILED}));
    assert!(!reply.text().contains("model offline"));
}

#[tokio::test]
async fn sessions_are_isolated() {
    let t = policy_app();
    let _first = start_session(&t.app, "How much leave?").await;

    let other = send(&t.app, get("/history", None)).await;
    assert!(other.cookie.is_some());
    assert_eq!(other.json()["history"]["Today"], json!([]));
}

#[tokio::test]
async fn get_response_finds_stored_answer() {
    let t = policy_app();
    let cookie = start_session(&t.app, "How much leave?").await;

    let found = send(
        &t.app,
        post_json("/get-response", json!({"query": "HOW MUCH LEAVE?"}), &cookie),
    )
    .await;
    assert_eq!(found.json(), json!({"response": "You get 20 days."}));

    let missing = send(
        &t.app,
        post_json("/get-response", json!({"query": "parental leave?"}), &cookie),
    )
    .await;
    assert_eq!(missing.json(), json!({"response": null}));
}

#[tokio::test]
async fn delete_history_item_removes_pair() {
    let t = policy_app();
    let cookie = start_session(&t.app, "How much leave?").await;

    let reply = send(
        &t.app,
        post_json("/delete-history-item", json!({"message": "how much leave?"}), &cookie),
    )
    .await;
    assert_eq!(reply.json(), json!({"status": "success"}));

    let history = send(&t.app, get("/history", Some(&cookie))).await.json();
    assert_eq!(history["history"]["Today"], json!([]));
}

#[tokio::test]
async fn clear_history_reports_success_and_store_errors() {
    let t = policy_app();
    let cookie = start_session(&t.app, "How much leave?").await;

    let clear = || {
        Request::post("/clear-history")
            .header(header::COOKIE, cookie.as_str())
            .body(Body::empty())
            .unwrap()
    };
    assert_eq!(send(&t.app, clear()).await.json(), json!({"status": "success"}));

    t.log.set_unavailable(true);
    let failed = send(&t.app, clear()).await.json();
    assert_eq!(failed["status"], "error");
    assert!(failed["message"].as_str().unwrap().contains("connection refused"));
}

#[tokio::test]
async fn history_degrades_to_empty_when_store_is_down() {
    let t = policy_app();
    t.log.set_unavailable(true);
    let reply = send(&t.app, get("/history", None)).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(
        reply.json(),
        json!({"history": {"Today": [], "Yesterday": [], "Older": []}})
    );
}

#[tokio::test]
async fn index_renders_session_log() {
    let t = policy_app();
    let cookie = start_session(&t.app, "How much leave?").await;

    let page = send(&t.app, get("/", Some(&cookie))).await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.content_type.as_deref().unwrap().starts_with("text/html"));
    let html = page.text();
    assert!(html.contains("How much leave?"));
    assert!(html.contains("You get 20 days."));
}

#[tokio::test]
async fn health_reports_version() {
    let t = policy_app();
    let reply = send(&t.app, get("/health", None)).await;
    let body = reply.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert!(body["uptime_secs"].is_u64());
}

#[tokio::test]
async fn serves_chat_script() {
    let t = policy_app();
    let reply = send(&t.app, get("/static/chat.js", None)).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.content_type.as_deref().unwrap().starts_with("application/javascript"));
    assert!(reply.text().contains("/get-response"));
}
