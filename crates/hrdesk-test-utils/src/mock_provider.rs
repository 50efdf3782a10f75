// SPDX-FileCopyrightText: 2026 HR Desk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock language model for deterministic tests.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use hrdesk_core::traits::{PluginAdapter, ProviderAdapter};
use hrdesk_core::types::{AdapterType, HealthStatus, ProviderRequest, ProviderResponse};
use hrdesk_core::HrDeskError;

/// A provider that replays scripted outcomes.
///
/// Outcomes are popped from a FIFO queue; an empty queue answers
/// "mock response". Every prompt received is recorded.
#[derive(Clone, Default)]
pub struct MockProvider {
    outcomes: Arc<Mutex<VecDeque<Result<String, String>>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-load successful replies.
    pub fn with_responses<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let outcomes = responses.into_iter().map(|r| Ok(r.into())).collect();
        Self {
            outcomes: Arc::new(Mutex::new(outcomes)),
            prompts: Arc::default(),
        }
    }

    pub async fn add_response(&self, text: impl Into<String>) {
        self.outcomes.lock().await.push_back(Ok(text.into()));
    }

    /// Queue a failure; the next call returns a provider error with `message`.
    pub async fn add_failure(&self, message: impl Into<String>) {
        self.outcomes.lock().await.push_back(Err(message.into()));
    }

    /// Prompts received so far, oldest first.
    pub async fn prompts(&self) -> Vec<String> {
        self.prompts.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.prompts.lock().await.len()
    }
}

#[async_trait]
impl PluginAdapter for MockProvider {
    fn name(&self) -> &str {
        "mock-provider"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, HrDeskError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), HrDeskError> {
        Ok(())
    }
}

#[async_trait]
impl ProviderAdapter for MockProvider {
    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, HrDeskError> {
        self.prompts.lock().await.push(request.prompt);
        let outcome = self
            .outcomes
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Ok("mock response".to_string()));

        match outcome {
            Ok(content) => Ok(ProviderResponse {
                content,
                model: request.model,
            }),
            Err(message) => Err(HrDeskError::Provider {
                message,
                source: None,
            }),
        }
    }
}
