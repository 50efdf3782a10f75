// SPDX-FileCopyrightText: 2026 HR Desk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `hrdesk doctor` command implementation.
//!
//! Runs diagnostic checks against every backing service so a broken setup
//! is visible before the first question is asked.

use std::io::IsTerminal;
use std::path::Path;
use std::time::{Duration, Instant};

use hrdesk_config::HrDeskConfig;
use hrdesk_config::model::{PineconeConfig, StorageConfig};
use hrdesk_core::traits::PluginAdapter;
use hrdesk_core::{HealthStatus, HrDeskError};
use hrdesk_ollama::OllamaClient;
use hrdesk_retrieval::{Bm25Encoder, PineconeIndex};
use tracing::warn;

/// Status of a diagnostic check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Warn,
    Fail,
}

/// Result of a single diagnostic check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub duration: Duration,
}

impl CheckResult {
    fn new(name: &str, status: CheckStatus, message: impl Into<String>, start: Instant) -> Self {
        Self {
            name: name.to_string(),
            status,
            message: message.into(),
            duration: start.elapsed(),
        }
    }

    fn from_health(name: &str, health: Result<HealthStatus, HrDeskError>, start: Instant) -> Self {
        match health {
            Ok(HealthStatus::Healthy) => Self::new(name, CheckStatus::Pass, "healthy", start),
            Ok(HealthStatus::Degraded(msg)) => Self::new(name, CheckStatus::Warn, msg, start),
            Ok(HealthStatus::Unhealthy(msg)) => Self::new(name, CheckStatus::Fail, msg, start),
            Err(e) => Self::new(name, CheckStatus::Fail, e.to_string(), start),
        }
    }
}

/// Run the `hrdesk doctor` command. With `plain`, disables colored output.
pub async fn run_doctor(config: &HrDeskConfig, plain: bool) -> Result<(), HrDeskError> {
    let use_color = !plain && std::io::stdout().is_terminal();

    let results = vec![
        check_config(),
        check_storage(&config.storage).await,
        check_bm25(&config.retrieval.bm25_params_path),
        check_ollama(config).await,
        check_pinecone(&config.pinecone).await,
    ];

    println!();
    println!("  hrdesk doctor");
    println!("  {}", "-".repeat(50));
    for result in &results {
        println!("{}", format_line(result, use_color));
    }
    println!();

    let issues = results
        .iter()
        .filter(|r| r.status != CheckStatus::Pass)
        .count();
    if issues > 0 {
        let issue_word = if issues == 1 { "issue" } else { "issues" };
        println!("  {issues} {issue_word} found.");
    } else {
        println!("  All checks passed.");
    }
    println!();

    Ok(())
}

fn format_line(result: &CheckResult, use_color: bool) -> String {
    let duration_ms = result.duration.as_millis();
    if use_color {
        use colored::Colorize;
        let (symbol, message) = match result.status {
            CheckStatus::Pass => ("✓".green(), result.message.normal()),
            CheckStatus::Warn => ("!".yellow(), result.message.yellow()),
            CheckStatus::Fail => ("✗".red(), result.message.red()),
        };
        format!(
            "    {symbol} {:<20} {message} ({duration_ms}ms)",
            result.name
        )
    } else {
        let tag = match result.status {
            CheckStatus::Pass => "[OK]  ",
            CheckStatus::Warn => "[WARN]",
            CheckStatus::Fail => "[FAIL]",
        };
        format!(
            "    {tag} {:<20} {} ({duration_ms}ms)",
            result.name, result.message
        )
    }
}

fn check_config() -> CheckResult {
    let start = Instant::now();
    match hrdesk_config::load_and_validate() {
        Ok(_) => CheckResult::new("Configuration", CheckStatus::Pass, "valid", start),
        Err(errors) => CheckResult::new(
            "Configuration",
            CheckStatus::Fail,
            format!("{} error(s)", errors.len()),
            start,
        ),
    }
}

async fn check_storage(config: &StorageConfig) -> CheckResult {
    let start = Instant::now();
    match hrdesk_storage::open_message_log(config).await {
        Ok(log) => {
            let health = log.health_check().await;
            if let Err(e) = log.shutdown().await {
                warn!(error = %e, "chat history backend did not shut down cleanly");
            }
            CheckResult::from_health("Chat history", health, start)
        }
        Err(e) => CheckResult::new("Chat history", CheckStatus::Fail, e.to_string(), start),
    }
}

fn check_bm25(path: &str) -> CheckResult {
    let start = Instant::now();
    match Bm25Encoder::load(Path::new(path)) {
        Ok(encoder) => CheckResult::new(
            "BM25 parameters",
            CheckStatus::Pass,
            format!("{} documents", encoder.params().n_docs),
            start,
        ),
        Err(e) => CheckResult::new("BM25 parameters", CheckStatus::Fail, e.to_string(), start),
    }
}

async fn check_ollama(config: &HrDeskConfig) -> CheckResult {
    let start = Instant::now();
    match OllamaClient::new(&config.ollama) {
        Ok(client) => CheckResult::from_health("Ollama", client.health_check().await, start),
        Err(e) => CheckResult::new("Ollama", CheckStatus::Fail, e.to_string(), start),
    }
}

async fn check_pinecone(config: &PineconeConfig) -> CheckResult {
    let start = Instant::now();
    if config.api_key.is_none() {
        return CheckResult::new(
            "Pinecone",
            CheckStatus::Warn,
            "not configured (set pinecone.api_key)",
            start,
        );
    }
    match PineconeIndex::connect(config).await {
        Ok(_) => CheckResult::new("Pinecone", CheckStatus::Pass, "index host resolved", start),
        Err(e) => CheckResult::new("Pinecone", CheckStatus::Fail, e.to_string(), start),
    }
}
