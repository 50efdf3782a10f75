// SPDX-FileCopyrightText: 2026 HR Desk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dense + sparse retriever over a Pinecone hybrid index.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use hrdesk_config::model::{PineconeConfig, RetrievalConfig};
use hrdesk_core::traits::{EmbeddingAdapter, PluginAdapter, RetrieverAdapter};
use hrdesk_core::types::{AdapterType, EmbeddingInput, HealthStatus, Passage};
use hrdesk_core::HrDeskError;

use crate::bm25::{Bm25Encoder, SparseVector};
use crate::pinecone::{PineconeIndex, ScoredMatch};

/// Convex combination of the two query vectors: dense weighted by `alpha`,
/// sparse by `1 - alpha`.
pub fn hybrid_scale(dense: &[f32], sparse: &SparseVector, alpha: f32) -> (Vec<f32>, SparseVector) {
    let dense = dense.iter().map(|v| v * alpha).collect();
    let sparse = SparseVector {
        indices: sparse.indices.clone(),
        values: sparse.values.iter().map(|v| v * (1.0 - alpha)).collect(),
    };
    (dense, sparse)
}

/// Retriever combining BM25 keyword weights with dense embeddings.
pub struct HybridRetriever {
    encoder: Bm25Encoder,
    embedder: Arc<dyn EmbeddingAdapter>,
    index: PineconeIndex,
    top_k: usize,
    alpha: f32,
    text_key: String,
}

impl HybridRetriever {
    pub fn new(
        encoder: Bm25Encoder,
        embedder: Arc<dyn EmbeddingAdapter>,
        index: PineconeIndex,
        config: &RetrievalConfig,
    ) -> Self {
        Self {
            encoder,
            embedder,
            index,
            top_k: config.top_k,
            alpha: config.alpha,
            text_key: config.text_key.clone(),
        }
    }

    /// Load the BM25 parameters and connect to the index.
    ///
    /// Fails with [`HrDeskError::RetrieverUnavailable`] when the parameter
    /// file is missing or the index cannot be resolved.
    pub async fn build(
        retrieval: &RetrievalConfig,
        pinecone: &PineconeConfig,
        embedder: Arc<dyn EmbeddingAdapter>,
    ) -> Result<Self, HrDeskError> {
        let path = Path::new(&retrieval.bm25_params_path);
        let json = tokio::fs::read_to_string(path).await.map_err(|e| {
            HrDeskError::RetrieverUnavailable(format!(
                "cannot read BM25 parameters at {}: {e}",
                path.display()
            ))
        })?;
        let encoder = Bm25Encoder::from_json(&json)?;
        let index = PineconeIndex::connect(pinecone).await?;
        Ok(Self::new(encoder, embedder, index, retrieval))
    }

    fn to_passage(&self, hit: ScoredMatch) -> Option<Passage> {
        let mut metadata = hit.metadata.unwrap_or_default();
        let text = match metadata.remove(&self.text_key) {
            Some(serde_json::Value::String(text)) => text,
            _ => {
                warn!(id = %hit.id, key = %self.text_key, "match has no passage text, skipping");
                return None;
            }
        };
        Some(Passage {
            text,
            score: hit.score,
            metadata: metadata.into_iter().collect(),
        })
    }
}

#[async_trait]
impl PluginAdapter for HybridRetriever {
    fn name(&self) -> &str {
        "pinecone-hybrid"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Retriever
    }

    async fn health_check(&self) -> Result<HealthStatus, HrDeskError> {
        self.embedder.health_check().await
    }

    async fn shutdown(&self) -> Result<(), HrDeskError> {
        Ok(())
    }
}

#[async_trait]
impl RetrieverAdapter for HybridRetriever {
    async fn retrieve(&self, query: &str) -> Result<Vec<Passage>, HrDeskError> {
        let sparse = self.encoder.encode_query(query);
        let embedded = self
            .embedder
            .embed(EmbeddingInput {
                texts: vec![query.to_string()],
            })
            .await?;
        let dense = embedded
            .embeddings
            .into_iter()
            .next()
            .ok_or_else(|| HrDeskError::Embedding {
                message: "embedding model returned no vector".into(),
                source: None,
            })?;

        let (dense, sparse) = hybrid_scale(&dense, &sparse, self.alpha);
        let hits = self.index.query(&dense, &sparse, self.top_k).await?;
        let passages: Vec<Passage> = hits.into_iter().filter_map(|h| self.to_passage(h)).collect();
        debug!(passages = passages.len(), "hybrid retrieval complete");
        Ok(passages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_weights_dense_and_sparse() {
        let sparse = SparseVector {
            indices: vec![1, 2],
            values: vec![0.6, 0.4],
        };
        let (dense, sparse) = hybrid_scale(&[1.0, -2.0], &sparse, 0.25);
        assert_eq!(dense, vec![0.25, -0.5]);
        assert_eq!(sparse.indices, vec![1, 2]);
        assert!((sparse.values[0] - 0.45).abs() < 1e-6);
        assert!((sparse.values[1] - 0.3).abs() < 1e-6);
    }

    #[test]
    fn half_alpha_halves_both() {
        let sparse = SparseVector {
            indices: vec![9],
            values: vec![1.0],
        };
        let (dense, sparse) = hybrid_scale(&[0.8], &sparse, 0.5);
        assert_eq!(dense, vec![0.4]);
        assert_eq!(sparse.values, vec![0.5]);
    }
}
