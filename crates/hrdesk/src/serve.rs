// SPDX-FileCopyrightText: 2026 HR Desk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `hrdesk serve` command implementation.
//!
//! Builds the history store, Ollama client, retriever and generator once,
//! then serves the web surface until SIGINT/SIGTERM.

use std::sync::Arc;

use tracing::{info, warn};

use hrdesk_config::HrDeskConfig;
use hrdesk_core::traits::{EmbeddingAdapter, PluginAdapter, RetrieverAdapter};
use hrdesk_core::{HealthStatus, HrDeskError};
use hrdesk_gateway::AppState;
use hrdesk_ollama::OllamaClient;
use hrdesk_rag::ResponseGenerator;
use hrdesk_retrieval::HybridRetriever;

use crate::shutdown;

pub async fn run_serve(config: HrDeskConfig) -> Result<(), HrDeskError> {
    init_tracing(&config.agent.log_level);
    info!(version = env!("CARGO_PKG_VERSION"), "starting HR Desk");

    let history = Arc::new(hrdesk_storage::open_history_store(&config.storage).await?);

    let ollama = Arc::new(OllamaClient::new(&config.ollama)?);
    match ollama.health_check().await {
        Ok(HealthStatus::Healthy) => info!("Ollama reachable"),
        Ok(HealthStatus::Degraded(msg) | HealthStatus::Unhealthy(msg)) => {
            warn!(detail = %msg, "Ollama not ready, answers may fail until it is")
        }
        Err(e) => warn!(error = %e, "Ollama health check failed"),
    }

    let retriever = build_retriever(&config, ollama.clone()).await;
    let generator = Arc::new(ResponseGenerator::from_config(&config, retriever, ollama));

    let state = AppState::new(&config.server, history.clone(), generator)?;
    let cancel = shutdown::install_signal_handler();
    hrdesk_gateway::start_server(&config.server, state, cancel).await?;

    if let Err(e) = history.backend().shutdown().await {
        warn!(error = %e, "chat history backend did not shut down cleanly");
    }
    info!("HR Desk stopped");
    Ok(())
}

/// The hybrid retriever, or `None` when its artifacts are unavailable.
async fn build_retriever(
    config: &HrDeskConfig,
    embedder: Arc<dyn EmbeddingAdapter>,
) -> Option<Arc<dyn RetrieverAdapter>> {
    match HybridRetriever::build(&config.retrieval, &config.pinecone, embedder).await {
        Ok(retriever) => {
            info!(
                top_k = config.retrieval.top_k,
                alpha = config.retrieval.alpha,
                "knowledge base loaded"
            );
            Some(Arc::new(retriever) as Arc<dyn RetrieverAdapter>)
        }
        Err(e) => {
            warn!(error = %e, "knowledge base not loaded, every answer will report it");
            None
        }
    }
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    // Target directives are prefixes, so `hrdesk` also covers the `hrdesk_*` crates.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("hrdesk={log_level},tower_http={log_level},warn"))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
