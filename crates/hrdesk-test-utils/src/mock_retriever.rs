// SPDX-FileCopyrightText: 2026 HR Desk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock retriever and embedder.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use hrdesk_core::traits::{EmbeddingAdapter, PluginAdapter, RetrieverAdapter};
use hrdesk_core::types::{AdapterType, EmbeddingInput, EmbeddingOutput, HealthStatus, Passage};
use hrdesk_core::HrDeskError;

/// Returns the same passages for every query and records the queries.
#[derive(Clone, Default)]
pub struct MockRetriever {
    passages: Vec<Passage>,
    fail: bool,
    queries: Arc<Mutex<Vec<String>>>,
}

impl MockRetriever {
    pub fn with_passages<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            passages: texts.into_iter().map(Passage::new).collect(),
            ..Self::default()
        }
    }

    /// A retriever that finds nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A retriever whose every query fails.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub async fn queries(&self) -> Vec<String> {
        self.queries.lock().await.clone()
    }
}

#[async_trait]
impl PluginAdapter for MockRetriever {
    fn name(&self) -> &str {
        "mock-retriever"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Retriever
    }

    async fn health_check(&self) -> Result<HealthStatus, HrDeskError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), HrDeskError> {
        Ok(())
    }
}

#[async_trait]
impl RetrieverAdapter for MockRetriever {
    async fn retrieve(&self, query: &str) -> Result<Vec<Passage>, HrDeskError> {
        self.queries.lock().await.push(query.to_string());
        if self.fail {
            return Err(HrDeskError::Retrieval {
                message: "mock index unreachable".into(),
                source: None,
            });
        }
        Ok(self.passages.clone())
    }
}

/// Embeds every text as a constant vector of `dimensions` values.
#[derive(Debug, Clone)]
pub struct MockEmbedder {
    dimensions: usize,
    value: f32,
}

impl MockEmbedder {
    pub fn new(dimensions: usize, value: f32) -> Self {
        Self { dimensions, value }
    }
}

#[async_trait]
impl PluginAdapter for MockEmbedder {
    fn name(&self) -> &str {
        "mock-embedder"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Embedding
    }

    async fn health_check(&self) -> Result<HealthStatus, HrDeskError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), HrDeskError> {
        Ok(())
    }
}

#[async_trait]
impl EmbeddingAdapter for MockEmbedder {
    async fn embed(&self, input: EmbeddingInput) -> Result<EmbeddingOutput, HrDeskError> {
        let embeddings = input
            .texts
            .iter()
            .map(|_| vec![self.value; self.dimensions])
            .collect();
        Ok(EmbeddingOutput {
            embeddings,
            dimensions: self.dimensions,
        })
    }
}
