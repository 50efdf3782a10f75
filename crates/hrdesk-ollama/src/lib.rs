// SPDX-FileCopyrightText: 2026 HR Desk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ollama adapters for HR Desk.
//!
//! [`OllamaClient`] implements both [`EmbeddingAdapter`] (`POST /api/embed`)
//! for dense query vectors and [`ProviderAdapter`] (`POST /api/generate`)
//! for answer generation.

pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use hrdesk_config::model::OllamaConfig;
use hrdesk_core::traits::{EmbeddingAdapter, PluginAdapter, ProviderAdapter};
use hrdesk_core::types::{
    AdapterType, EmbeddingInput, EmbeddingOutput, HealthStatus, ProviderRequest, ProviderResponse,
};
use hrdesk_core::HrDeskError;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::types::{
    EmbedRequest, EmbedResponse, ErrorResponse, GenerateRequest, GenerateResponse, TagsResponse,
};

/// HTTP client for a local Ollama server.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: reqwest::Client,
    base_url: String,
    embedding_model: String,
    llm_model: String,
    timeout: Duration,
}

impl OllamaClient {
    pub fn new(config: &OllamaConfig) -> Result<Self, HrDeskError> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| HrDeskError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        info!(
            base_url = %config.base_url,
            embedding_model = %config.embedding_model,
            llm_model = %config.llm_model,
            "Ollama client initialized"
        );

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            embedding_model: config.embedding_model.clone(),
            llm_model: config.llm_model.clone(),
            timeout,
        })
    }

    /// Model used when a [`ProviderRequest`] leaves `model` empty.
    pub fn llm_model(&self) -> &str {
        &self.llm_model
    }

    pub fn embedding_model(&self) -> &str {
        &self.embedding_model
    }

    /// Names of the models installed on the server.
    pub async fn list_models(&self) -> Result<Vec<String>, reqwest::Error> {
        let tags: TagsResponse = self
            .client
            .get(format!("{}/api/tags", self.base_url))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }

    /// POST `body` to `path` and decode the JSON reply.
    ///
    /// `wrap` builds the adapter-specific error variant.
    async fn post_json<B, T>(
        &self,
        path: &str,
        body: &B,
        wrap: fn(String, Option<Box<dyn std::error::Error + Send + Sync>>) -> HrDeskError,
    ) -> Result<T, HrDeskError>
    where
        B: serde::Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{path}", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport_error(e, wrap))?;

        let status = response.status();
        debug!(%url, status = %status, "ollama response received");

        let text = response
            .text()
            .await
            .map_err(|e| self.transport_error(e, wrap))?;

        if !status.is_success() {
            let detail = serde_json::from_str::<ErrorResponse>(&text)
                .map(|e| e.error)
                .unwrap_or(text);
            return Err(wrap(format!("Ollama returned {status}: {detail}"), None));
        }

        serde_json::from_str(&text).map_err(|e| {
            wrap(
                format!("failed to parse Ollama response: {e}"),
                Some(Box::new(e)),
            )
        })
    }

    fn transport_error(
        &self,
        e: reqwest::Error,
        wrap: fn(String, Option<Box<dyn std::error::Error + Send + Sync>>) -> HrDeskError,
    ) -> HrDeskError {
        if e.is_timeout() {
            HrDeskError::Timeout {
                duration: self.timeout,
            }
        } else {
            wrap(format!("HTTP request failed: {e}"), Some(Box::new(e)))
        }
    }
}

fn embedding_error(
    message: String,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
) -> HrDeskError {
    HrDeskError::Embedding { message, source }
}

fn provider_error(
    message: String,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
) -> HrDeskError {
    HrDeskError::Provider { message, source }
}

#[async_trait]
impl PluginAdapter for OllamaClient {
    fn name(&self) -> &str {
        "ollama"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, HrDeskError> {
        let models = match self.list_models().await {
            Ok(models) => models,
            Err(e) => return Ok(HealthStatus::Unhealthy(format!("unreachable: {e}"))),
        };

        let missing: Vec<&str> = [self.llm_model.as_str(), self.embedding_model.as_str()]
            .into_iter()
            .filter(|wanted| !models.iter().any(|m| model_matches(m, wanted)))
            .collect();

        if missing.is_empty() {
            Ok(HealthStatus::Healthy)
        } else {
            Ok(HealthStatus::Degraded(format!(
                "model(s) not pulled: {}",
                missing.join(", ")
            )))
        }
    }

    async fn shutdown(&self) -> Result<(), HrDeskError> {
        Ok(())
    }
}

// Ollama lists `nomic-embed-text:latest` for a model requested as `nomic-embed-text`.
fn model_matches(installed: &str, wanted: &str) -> bool {
    installed == wanted
        || (!wanted.contains(':') && installed.strip_suffix(":latest") == Some(wanted))
}

#[async_trait]
impl EmbeddingAdapter for OllamaClient {
    async fn embed(&self, input: EmbeddingInput) -> Result<EmbeddingOutput, HrDeskError> {
        let request = EmbedRequest {
            model: &self.embedding_model,
            input: &input.texts,
        };
        let response: EmbedResponse = self
            .post_json("/api/embed", &request, embedding_error)
            .await?;

        if response.embeddings.len() != input.texts.len() {
            return Err(HrDeskError::Embedding {
                message: format!(
                    "expected {} embeddings, got {}",
                    input.texts.len(),
                    response.embeddings.len()
                ),
                source: None,
            });
        }

        let dimensions = response.embeddings.first().map_or(0, Vec::len);
        Ok(EmbeddingOutput {
            embeddings: response.embeddings,
            dimensions,
        })
    }
}

#[async_trait]
impl ProviderAdapter for OllamaClient {
    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, HrDeskError> {
        let model = if request.model.is_empty() {
            self.llm_model.as_str()
        } else {
            request.model.as_str()
        };
        let body = GenerateRequest {
            model,
            prompt: &request.prompt,
            stream: false,
        };
        let response: GenerateResponse = self
            .post_json("/api/generate", &body, provider_error)
            .await?;

        Ok(ProviderResponse {
            content: response.response,
            model: response.model.unwrap_or_else(|| model.to_string()),
        })
    }
}
